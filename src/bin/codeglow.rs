//! # codeglow Command Line Interface
//!
//! A thin CLI wrapper around the codeglow processing API. Reads a source
//! file plus a mode-specific second input (a color template for mirror
//! mode, a JSON semantic-token array for clangd mode, unused for gcc mode)
//! and writes one HTML output file.
//!
//! This binary follows a strict separation of concerns: argument parsing,
//! validation, and file I/O live here; the pure processing functions live
//! in [`codeglow::api`].

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};

use codeglow::api::{dump_clangd_tokens, highlight_clangd, highlight_gcc, highlight_mirror};
use codeglow::code::DEFAULT_KEYWORDS;
use codeglow::options::{ClangdOptions, GccOptions, MirrorOptions};
use codeglow::semantic::SemanticTokenWire;
use codeglow::HighlighterError;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Mode {
    Mirror,
    Clangd,
    Gcc,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Html,
    Json,
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the source code file
    input_code: PathBuf,

    /// Color template (mirror mode) or JSON semantic tokens (clangd mode);
    /// unused in gcc mode
    input_color_or_semantic_tokens: Option<PathBuf>,

    /// Path to write the rendered output to
    output_html: PathBuf,

    /// Which highlighter pipeline to run
    #[arg(long, value_enum, default_value_t = Mode::Mirror)]
    mode: Mode,

    /// Replace underscores with hyphens in CSS class names (mirror mode)
    #[arg(long)]
    replace: bool,

    /// Output format: rendered HTML, or a JSON dump of the raw token stream
    #[arg(long, value_enum, default_value_t = OutputFormat::Html)]
    format: OutputFormat,
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), HighlighterError> {
    let code = fs::read_to_string(&args.input_code)?;

    let output = match args.mode {
        Mode::Mirror => {
            let color_path = args
                .input_color_or_semantic_tokens
                .as_ref()
                .ok_or_else(|| missing_second_input("mirror"))?;
            let color = fs::read_to_string(color_path)?;
            let options = MirrorOptions { replace_underscores_to_hyphens: args.replace, ..Default::default() };
            highlight_mirror(&code, &color, &options)?
        }
        Mode::Clangd => {
            let tokens_path = args
                .input_color_or_semantic_tokens
                .as_ref()
                .ok_or_else(|| missing_second_input("clangd"))?;
            let raw_tokens = fs::read_to_string(tokens_path)?;
            let wire: Vec<SemanticTokenWire> = serde_json::from_str(&raw_tokens)?;
            let tokens: Vec<_> = wire.into_iter().map(SemanticTokenWire::into_semantic_token).collect();
            let keywords: Vec<String> = DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect();
            let options = ClangdOptions::default();
            match args.format {
                OutputFormat::Html => highlight_clangd(&code, &tokens, &keywords, &options)?,
                OutputFormat::Json => dump_clangd_tokens(&code, &tokens, &keywords, &options)?,
            }
        }
        Mode::Gcc => {
            let options = GccOptions::default();
            highlight_gcc(&code, &options)?
        }
    };

    fs::write(&args.output_html, output)?;
    Ok(())
}

fn missing_second_input(mode: &str) -> HighlighterError {
    use codeglow::ErrorReason;
    HighlighterError::internal(ErrorReason::InvalidInput(format!(
        "{mode} mode requires the second positional input"
    )))
}
