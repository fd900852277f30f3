use std::fs::File;
use std::path::PathBuf;

use clap::Parser;
use simplelog::{ConfigBuilder, WriteLogger};
use text2sql::core::config::{self, CliOverrides};
use text2sql::tui;

#[derive(Parser)]
#[command(name = "text2sql", about = "Turn plain-English questions into SQL from your terminal")]
struct Args {
    /// Base URL of the text-to-SQL service
    #[arg(short, long)]
    server: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long)]
    log_level: Option<String>,

    /// Log file path
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let loaded = config::load_config();
    let config_error = match &loaded {
        Ok(_) => None,
        Err(e) => {
            eprintln!("Ignoring config file: {e}");
            Some(e.to_string())
        }
    };
    let file_values = loaded.unwrap_or_default();

    let cli = CliOverrides {
        server_url: args.server,
        log_level: args.log_level,
        log_file: args.log_file,
    };
    let resolved = config::resolve(&file_values, &cli);

    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create(&resolved.log_file) {
        let _ = WriteLogger::init(resolved.log_level, log_config, log_file);
    }

    if let Some(e) = config_error {
        log::warn!("Config file ignored: {}", e);
    }
    log::info!("text2sql starting up against {}", resolved.server_url);

    tui::run(resolved)
}
