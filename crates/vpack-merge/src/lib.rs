//! Deep merge for V-Pack theme configuration trees.
//!
//! A configuration tree is a `serde_json::Value`. Mappings are merged key by
//! key, everything else (scalars, arrays) is atomic and replaced wholesale by
//! the override side.

mod merge;

pub use merge::{is_plain_mapping, merge, merge_all, merge_owned};
