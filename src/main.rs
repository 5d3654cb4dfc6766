use std::path::PathBuf;

use clap::Parser;
use tower_lsp::{LspService, Server};
use tracing::{info, warn};

use jinie_lsp::Backend;
use jinie_lsp::config::{self, Config, PartialConfig};
use jinie_lsp::logging;

/// Language server for JINIE sources.
#[derive(Debug, Parser)]
#[command(name = "jinie_lsp", version, about)]
struct Cli {
    /// Communicate over stdin/stdout (the only supported transport).
    #[arg(long)]
    stdio: bool,

    /// Log filter, e.g. `debug` or `jinie_lsp=trace`. Overrides RUST_LOG.
    #[arg(long, value_name = "FILTER")]
    log_level: Option<String>,

    /// Disable ANSI colors in log output.
    #[arg(long)]
    no_color: bool,

    /// Extra TOML config file, applied after the user config.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Defaults, then the user config file, then `--config`.
fn startup_config(extra: Option<&PathBuf>) -> Config {
    let mut config = Config::default();
    let layers = config::user_config_path().into_iter().chain(extra.cloned());
    for path in layers {
        match PartialConfig::load(&path) {
            Ok(layer) => config.apply(layer),
            Err(e) => warn!("{e}; ignoring"),
        }
    }
    config
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init_logger(cli.no_color, cli.log_level.as_deref()) {
        eprintln!("failed to initialise logging: {e}");
    }

    let config = startup_config(cli.config.as_ref());
    info!(version = env!("CARGO_PKG_VERSION"), stdio = cli.stdio, "starting JinieLSP");

    let (service, socket) = LspService::new(|client| Backend::with_config(client, config));
    Server::new(tokio::io::stdin(), tokio::io::stdout(), socket)
        .serve(service)
        .await;
}
