//! Budgetweb main entry point

use budgetweb_api::start_server;
use budgetweb_config::Config;
use clap::Parser;
use env_logger::Env;
use std::path::PathBuf;
use tokio::runtime::Runtime;

#[derive(Parser, Debug)]
#[command(name = "budgetweb")]
#[command(author = "Budgetweb Contributors")]
#[command(version = "0.1.0")]
#[command(about = "Authenticated gateway in front of a personal budget backend", long_about = None)]
struct Args {
    /// Configuration file path; defaults apply when it does not exist
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Print the default configuration and exit
    #[arg(long)]
    print_default_config: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.print_default_config {
        print!("{}", Config::generate_default());
        return Ok(());
    }

    let config = match Config::load_or_default(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e.to_details());
            std::process::exit(1);
        }
    };

    env_logger::init_from_env(Env::new().default_filter_or(config.logging.level.as_str()));
    log::info!(
        target: "budgetweb",
        "Config loaded from {} (backend {})",
        args.config.display(),
        config.backend.base_url
    );

    let rt = Runtime::new()?;
    rt.block_on(start_server(config))
}
