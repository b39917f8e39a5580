use super::app_config::LogLevel;
use crate::domain::entities::ViewId;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(
    name = "homeboard",
    version,
    about = "Headless smart-home dashboard shell",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Load templates from this directory.
    #[arg(long, value_name = "DIR", conflicts_with = "base_url")]
    pub templates_root: Option<PathBuf>,

    /// Load templates from this URL.
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// View shown at startup.
    #[arg(long, value_name = "VIEW")]
    pub start_view: Option<ViewId>,

    /// Views to show after startup, in order.
    #[arg(long = "show", value_name = "VIEW")]
    pub show: Vec<String>,

    /// Print the final document markup to stdout.
    #[arg(long)]
    pub print_html: bool,

    /// Skip template preloading.
    #[arg(long)]
    pub no_preload: bool,
}
