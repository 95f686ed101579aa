use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use paperup::config::{AppConfig, DEFAULT_BASE_URL};
use paperup::ui;

#[derive(Parser)]
#[command(name = "paperup")]
#[command(about = "Interactive updater for PaperMC server builds", long_about = None)]
struct Cli {
    /// Release API base URL
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Path the server jar is downloaded to
    #[arg(long, default_value = "paper.jar")]
    artifact: PathBuf,

    /// Directory for the operation log and install marker
    #[arg(long, default_value = "logs")]
    logs_dir: PathBuf,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig {
        base_url: cli.base_url,
        project: "paper".to_string(),
        artifact_path: cli.artifact,
        logs_dir: cli.logs_dir,
    };
    ui::run(config)
}
