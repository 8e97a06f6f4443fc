//! CLI argument definitions for formfit.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use formfit_cli::prefs::DEFAULT_PREFS_FILE;
use formfit_core::encode::{OutputFormat, DEFAULT_QUALITY};
use formfit_core::{Category, CropRect, Language};

#[derive(Parser)]
#[command(
    name = "formfit",
    version,
    about = "Resize photos and signatures for PAN card and other form uploads",
    long_about = "Resize photos, signatures and documents to the exact size a form asks for.\n\n\
                  Runs the same upload, requirement and editor steps as the web tool."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format.
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Preference file holding the chosen language.
    #[arg(
        long = "prefs",
        env = "FORMFIT_PREFS",
        value_name = "PATH",
        default_value = DEFAULT_PREFS_FILE,
        global = true
    )]
    pub prefs: PathBuf,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the supported document requirements.
    Requirements(RequirementsArgs),

    /// Resize a photo or signature for a requirement.
    Resize(ResizeArgs),

    /// Show or change the interface language.
    Language(LanguageArgs),

    /// Check a contact form submission.
    ValidateContact(ContactArgs),
}

#[derive(Args)]
pub struct RequirementsArgs {
    /// Only list one tab (photo, signature, document).
    #[arg(long = "tab", value_name = "TAB")]
    pub tab: Option<Category>,
}

#[derive(Args)]
pub struct ResizeArgs {
    /// Image to resize (JPEG or PNG).
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Requirement id, see `formfit requirements`.
    #[arg(long = "requirement", short = 'r', value_name = "ID")]
    pub requirement: String,

    /// Brightness offset (-100 to 100).
    #[arg(long = "brightness", default_value_t = 0, allow_negative_numbers = true)]
    pub brightness: i32,

    /// Contrast in percent (0 to 200).
    #[arg(long = "contrast", default_value_t = 100)]
    pub contrast: i32,

    /// Number of zoom-in clicks (x1.2 each).
    #[arg(long = "zoom-in", value_name = "N", default_value_t = 0)]
    pub zoom_in: u32,

    /// Number of zoom-out clicks (x0.8 each).
    #[arg(long = "zoom-out", value_name = "N", default_value_t = 0)]
    pub zoom_out: u32,

    /// Crop box as fractions of the image: LEFT,TOP,WIDTH,HEIGHT.
    #[arg(long = "crop", value_name = "L,T,W,H", value_parser = parse_crop)]
    pub crop: Option<CropRect>,

    /// Output format (default: the requirement's format).
    #[arg(long = "format", value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// JPEG quality, 0.0 to 1.0.
    #[arg(long = "quality", default_value_t = DEFAULT_QUALITY)]
    pub quality: f32,

    /// Lower JPEG quality until the file fits the requirement's size limit.
    #[arg(long = "fit-size")]
    pub fit_size: bool,

    /// Directory for the resized file (default: the current directory).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,
}

#[derive(Args)]
pub struct LanguageArgs {
    /// Language to switch to (en, hi). Omit to show the current one.
    #[arg(value_name = "LANG")]
    pub language: Option<Language>,
}

#[derive(Args)]
pub struct ContactArgs {
    #[arg(long = "name", default_value = "")]
    pub name: String,

    #[arg(long = "email", default_value = "")]
    pub email: String,

    #[arg(long = "subject", default_value = "")]
    pub subject: String,

    #[arg(long = "message", default_value = "")]
    pub message: String,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

fn parse_crop(value: &str) -> Result<CropRect, String> {
    let parts = value
        .split(',')
        .map(|p| p.trim().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| format!("invalid crop value: {e}"))?;
    match parts.as_slice() {
        &[left, top, width, height] if parts.iter().all(|v| v.is_finite()) => {
            Ok(CropRect::new(left, top, width, height))
        }
        _ => Err("expected four numbers: LEFT,TOP,WIDTH,HEIGHT".to_string()),
    }
}
