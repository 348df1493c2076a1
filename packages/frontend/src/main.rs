use std::process::ExitCode;

use clap::Parser;
use delivery_frontend::{logging, render_paths, AppConfig, Result};
use delivery_router::HistoryMode;

/// Navigate the delivery console from the command line.
///
/// Each path is pushed onto the history in order. For every path the visible URL is printed,
/// followed by the rendered page.
#[derive(Parser, Debug)]
#[clap(name = "delivery-frontend", version)]
struct Cli {
    /// The history mode, `hash` or `memory`. Overrides DELIVERY_HISTORY.
    #[clap(long)]
    history: Option<HistoryMode>,

    /// The path the console is served from. Overrides DELIVERY_BASE_PATH.
    #[clap(long)]
    base_path: Option<String>,

    /// The document URL to start from. Overrides DELIVERY_ORIGIN.
    #[clap(long)]
    origin: Option<String>,

    /// The paths to navigate to.
    paths: Vec<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = AppConfig::from_env()?;
    if let Some(history) = cli.history {
        config.history = history;
    }
    if let Some(base_path) = cli.base_path {
        config.base_path = Some(base_path);
    }
    if let Some(origin) = cli.origin {
        config.set_origin(origin)?;
    }

    logging::init(&config.log_filter);

    let router = delivery_frontend::launch(&config)?;
    let paths = match cli.paths.is_empty() {
        true => vec!["/".to_string()],
        false => cli.paths,
    };

    let mut stdout = std::io::stdout().lock();
    render_paths(&router, &paths, &mut stdout).await?;
    Ok(())
}
