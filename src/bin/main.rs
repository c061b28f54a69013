use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_CONFIG: &str = "cinescope.yaml";

#[derive(Parser, Debug)]
#[command(name = "cinescope-server")]
#[command(about = "Movie discovery server backed by TMDB", long_about = None)]
struct Args {
    /// Config file. Without this flag ./cinescope.yaml is used if present.
    #[arg(short, long)]
    config: Option<String>,

    #[arg(short, long)]
    debug: bool,

    /// Emit logs as JSON lines.
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let default_filter = if args.debug {
        "cinescope=debug,tower_http=debug"
    } else {
        "cinescope=info,tower_http=info"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    if args.json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    let (config_path, required) = match args.config {
        Some(ref path) => (path.as_str(), true),
        None => (DEFAULT_CONFIG, false),
    };

    if let Err(e) = cinescope::run(config_path, required, args.debug).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
