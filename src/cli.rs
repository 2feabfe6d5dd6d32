//! Command-line argument parsing for the replay tool

use std::path::PathBuf;

use clap::Parser;

use tagfield::{TagError, TagFieldConfig};

/// Replay a scripted tag field session
#[derive(Parser, Debug)]
#[command(
    name = "tagfield",
    version,
    about = "Replay a scripted tag field session"
)]
pub struct CliArgs {
    /// YAML list of messages to replay
    #[arg(value_name = "SCRIPT")]
    pub script: PathBuf,

    /// Config file to use instead of the one in the config directory
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// TrueType font for label layout (overrides the config's font_path)
    #[arg(short, long, value_name = "PATH")]
    pub font: Option<PathBuf>,

    /// Write every tag pill as a PNG into this directory
    #[arg(short, long, value_name = "DIR")]
    pub export: Option<PathBuf>,

    /// Print the final state as JSON
    #[arg(long)]
    pub json: bool,
}

impl CliArgs {
    /// Configuration for this run
    pub fn resolve_config(&self) -> Result<TagFieldConfig, TagError> {
        let mut config = match &self.config {
            Some(path) => TagFieldConfig::load_from(path)?,
            None => TagFieldConfig::load(),
        };
        if let Some(font) = &self.font {
            config.font_path = Some(font.clone());
        }
        Ok(config)
    }
}
