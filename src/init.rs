//! Theme template scaffolding (`vpack init`).

use serde_json::Value;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use crate::config::DefaultTheme;

/// Default template file name
pub const DEFAULT_THEME_FILE: &str = "vpack.theme.json";

/// What `init_theme_file` did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    Created,
    Overwritten,
}

#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error("{0} already exists (use --force to overwrite)")]
    AlreadyExists(PathBuf),

    #[error("Unsupported template format (expected .json or .toml): {0}")]
    UnsupportedFormat(PathBuf),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Render the default theme template for the file's extension
pub fn render_template(path: &Path) -> Result<String, InitError> {
    let template = DefaultTheme::default().to_value();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    match extension.as_deref() {
        Some("json") => serde_json::to_string_pretty(&template)
            .map(|mut json| {
                json.push('\n');
                json
            })
            .map_err(|e| InitError::Serialization(e.to_string())),
        Some("toml") => render_toml(&template),
        _ => Err(InitError::UnsupportedFormat(path.to_path_buf())),
    }
}

fn render_toml(template: &Value) -> Result<String, InitError> {
    toml::to_string_pretty(template).map_err(|e| InitError::Serialization(e.to_string()))
}

/// Write the default theme template to `path`.
///
/// An existing file is left untouched unless `force` is set.
pub fn init_theme_file(path: &Path, force: bool) -> Result<InitOutcome, InitError> {
    let exists = path.exists();
    if exists && !force {
        return Err(InitError::AlreadyExists(path.to_path_buf()));
    }

    let contents = render_template(path)?;
    fs::write(path, contents)?;

    tracing::info!(path = %path.display(), overwritten = exists, "wrote theme template");

    Ok(if exists {
        InitOutcome::Overwritten
    } else {
        InitOutcome::Created
    })
}

/// Ask whether an existing template should be overwritten.
///
/// Anything other than `y` or `yes` (case-insensitive), including end of
/// input, declines.
pub fn confirm_overwrite<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> io::Result<bool> {
    write!(output, "Do you want to overwrite it? [y/N] ")?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    let answer = answer.trim().to_ascii_lowercase();
    Ok(answer == "y" || answer == "yes")
}

/// Guidance printed after the template is written
pub fn next_steps(path: &Path) -> String {
    let path = path.display();
    format!(
        "Next steps:\n\
         \n\
         1. Edit the palettes in {path}\n\
         \n\
         2. Check the merged colors:\n\
         \x20  vpack colors --theme {path}\n\
         \n\
         3. Resolve a color token:\n\
         \x20  vpack color primary-500 --theme {path}\n"
    )
}
