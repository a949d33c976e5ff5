use clap::Parser;
use tracing_subscriber::EnvFilter;

use fincalc::api::{self, Cli};

fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));
    // Logs go to stderr so one-shot commands keep stdout as clean JSON.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(&cli.log);

    if let Err(e) = api::run(cli.command).await {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
