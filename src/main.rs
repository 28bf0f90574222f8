use clap::Parser;
use responder::core::config::{self, CliOverrides};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "responder", about = "Terminal form for generating mood-styled responses")]
struct Args {
    /// Base URL of the generation service (e.g. http://localhost:3000)
    #[arg(long)]
    base_url: Option<String>,

    /// Procedure name under the tRPC namespace (e.g. event.hello)
    #[arg(long)]
    procedure: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to responder.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("responder.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().map_err(std::io::Error::other)?;
    let cli = CliOverrides {
        base_url: args.base_url,
        procedure: args.procedure,
        timeout_secs: args.timeout,
    };
    let resolved = config::resolve(&file_config, &cli);

    log::info!("Responder starting up against {}", resolved.endpoint_url());

    responder::tui::run(resolved, || log::info!("Close notification delivered"))
}
