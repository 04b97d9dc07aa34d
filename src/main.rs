use clap::Parser;
use log::LevelFilter;
use querychat::ReplyOrder;
use querychat::core::config::{self, CliOverrides};
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "querychat", about = "Terminal chat client for a query endpoint")]
struct Args {
    /// Query endpoint URL (default http://127.0.0.1:8000/query/)
    #[arg(short, long)]
    endpoint: Option<String>,

    /// How overlapping replies are applied
    #[arg(short, long, value_enum)]
    reply_order: Option<ReplyOrder>,

    /// Client-side request timeout in seconds
    #[arg(short, long)]
    timeout_secs: Option<u64>,

    /// Config file to read instead of ~/.querychat/config.toml
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // File logger - the terminal belongs to the TUI. Installed before config
    // is read so config problems land in the log; narrowed once resolved.
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("querychat.log") {
        let _ = WriteLogger::init(LevelFilter::Trace, log_config, log_file);
    }
    log::set_max_level(config::DEFAULT_LOG_LEVEL);

    let file_config = match config::load_config(args.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            log::warn!("{e}; using defaults");
            eprintln!("querychat: {e}; using defaults");
            config::QueryChatConfig::default()
        }
    };

    let cli = CliOverrides {
        endpoint: args.endpoint,
        reply_order: args.reply_order,
        timeout_secs: args.timeout_secs,
    };
    let resolved = config::resolve(&file_config, &cli);
    for warning in &resolved.warnings {
        log::warn!("{warning}");
    }
    log::set_max_level(resolved.log_level);

    log::info!(
        "querychat starting: endpoint={}, reply_order={}, timeout={:?}",
        resolved.endpoint,
        resolved.reply_order.label(),
        resolved.timeout
    );

    querychat::tui::run(resolved)
}
