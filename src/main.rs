use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use url_keeper::config::{self, Config};
use url_keeper::server;

/// URL shortening service.
#[derive(Parser)]
#[command(name = "url-keeper", version, about)]
struct Cli {
    /// Address to listen on, overrides the configured listen address
    #[arg(long, env = "LISTEN")]
    addr: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = config::load_from_env()?;
    if let Some(addr) = cli.addr {
        config.listen_addr = addr;
        config.validate()?;
    }

    init_tracing(&config);
    config.print_summary();

    server::run(config).await
}

fn init_tracing(config: &Config) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if config.log_format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}
