use clap::Parser;

use vnstock_cli::{app, cli::Cli};

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    if let Err(err) = app::run(cli).await {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}
