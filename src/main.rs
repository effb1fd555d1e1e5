//! V-Pack theme CLI
//!
//! Entry point for the `vpack` command-line tool.

use clap::{Parser, Subcommand};
use serde_json::Value;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;
use vpack_theme::config::ConfigError;
use vpack_theme::init::{
    confirm_overwrite, init_theme_file, next_steps, InitError, InitOutcome, DEFAULT_THEME_FILE,
};
use vpack_theme::{DefaultTheme, EffectiveTheme, ResolvedTheme};

#[derive(Parser)]
#[command(name = "vpack")]
#[command(about = "V-Pack theme tooling", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the default theme template
    Init {
        /// Template path (.json or .toml)
        #[arg(long, short = 'p', default_value = DEFAULT_THEME_FILE)]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Deep-merge theme files and print the result
    Merge {
        /// Theme files, lowest precedence first
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Do not start from the built-in palettes
        #[arg(long)]
        no_defaults: bool,
    },

    /// Print the effective theme with provenance
    Effective {
        /// Theme files, lowest precedence first
        #[arg(long, short = 't')]
        theme: Vec<PathBuf>,

        /// Inline JSON override, applied last
        #[arg(long)]
        set: Option<String>,
    },

    /// Resolve a color token (e.g. primary-500)
    Color {
        token: String,

        /// Theme files, lowest precedence first
        #[arg(long, short = 't')]
        theme: Vec<PathBuf>,
    },

    /// List available colors
    Colors {
        /// Theme files, lowest precedence first
        #[arg(long, short = 't')]
        theme: Vec<PathBuf>,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init { path, force } => run_init(&path, force),
        Commands::Merge { files, no_defaults } => run_merge(&files, no_defaults),
        Commands::Effective { theme, set } => run_effective(&theme, set.as_deref()),
        Commands::Color { token, theme } => run_color(&token, &theme),
        Commands::Colors { theme, json } => run_colors(&theme, json),
    }
}

fn run_init(path: &Path, force: bool) {
    let outcome = match init_theme_file(path, force) {
        Err(InitError::AlreadyExists(_)) if io::stdin().is_terminal() => {
            println!("{} already exists!", path.display());
            match confirm_overwrite(&mut io::stdin().lock(), &mut io::stdout()) {
                Ok(true) => init_theme_file(path, true),
                Ok(false) => {
                    println!("Initialization cancelled.");
                    return;
                }
                Err(e) => Err(InitError::Io(e)),
            }
        }
        other => other,
    };

    match outcome {
        Ok(InitOutcome::Created) => println!("Created {}\n", path.display()),
        Ok(InitOutcome::Overwritten) => println!("Overwrote {}\n", path.display()),
        Err(e) => {
            eprintln!("Error creating theme template: {}", e);
            process::exit(1);
        }
    }

    print!("{}", next_steps(path));
}

fn run_merge(files: &[PathBuf], no_defaults: bool) {
    let base = if no_defaults {
        None
    } else {
        Some(DefaultTheme::default().to_value())
    };

    let effective = or_exit(EffectiveTheme::build_on(base, &as_paths(files), None));
    print_json(&effective.config);
}

fn run_effective(theme: &[PathBuf], set: Option<&str>) {
    let inline = set.map(|raw| match serde_json::from_str::<Value>(raw) {
        Ok(value) => value,
        Err(e) => {
            eprintln!("Invalid --set JSON: {}", e);
            process::exit(1);
        }
    });

    let effective = or_exit(EffectiveTheme::build(&as_paths(theme), inline));
    match effective.to_json() {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing output: {}", e);
            process::exit(1);
        }
    }
}

fn run_color(token: &str, theme: &[PathBuf]) {
    let resolved = load_resolved(theme);

    match resolved.color(token) {
        Some(color) => println!("{}", color),
        None => {
            eprintln!("Unknown color '{}'", token);
            eprintln!("Available colors: {}", resolved.palette_names().join(", "));
            process::exit(1);
        }
    }
}

fn run_colors(theme: &[PathBuf], json_output: bool) {
    let resolved = load_resolved(theme);

    if json_output {
        print_json(resolved.colors());
        return;
    }

    let tokens = resolved.tokens();
    if tokens.is_empty() {
        println!("No colors configured.");
        return;
    }

    println!("Available colors ({} total):\n", tokens.len());
    let width = tokens.keys().map(String::len).max().unwrap_or(0);
    for (token, color) in tokens {
        println!("  {:<width$}  {}", token, color, width = width);
    }
}

fn load_resolved(theme: &[PathBuf]) -> ResolvedTheme {
    let effective = or_exit(EffectiveTheme::build(&as_paths(theme), None));
    or_exit(effective.resolve())
}

fn as_paths(paths: &[PathBuf]) -> Vec<&Path> {
    paths.iter().map(PathBuf::as_path).collect()
}

fn or_exit<T>(result: Result<T, ConfigError>) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            eprintln!("Theme error: {}", e);
            process::exit(1);
        }
    }
}

fn print_json(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing output: {}", e);
            process::exit(1);
        }
    }
}
