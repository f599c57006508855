use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{error, LevelFilter};
use simple_logger::SimpleLogger;

use stela::build::build_site;
use stela::config::Config;
use stela::watch;

/// Builds a static website from `pages/`, `templates/`, and `public/` into
/// `out/`.
#[derive(Parser)]
#[command(name = "stela", version)]
struct Args {
    /// Build token injected into every rendered page, typically a
    /// source-control revision identifier.
    #[arg(long, default_value = Config::DEFAULT_HASH)]
    hash: String,

    /// Watch the source directories and rebuild on change. Forces the build
    /// token to "DevMode".
    #[arg(long)]
    dev: bool,

    /// The working root containing `templates/`, `pages/`, `public/`, and
    /// `out/`.
    #[arg(long, default_value = ".")]
    root: PathBuf,
}

fn main() -> ExitCode {
    let args = Args::parse();
    let _ = SimpleLogger::new().with_level(LevelFilter::Info).init();

    if args.dev {
        let config = Config::from_root(&args.root, Config::DEV_HASH);
        match watch::watch(&config) {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                error!("{}", err);
                ExitCode::FAILURE
            }
        }
    } else {
        let config = Config::from_root(&args.root, &args.hash);
        match build_site(&config) {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                error!("Build failed: {}", err);
                ExitCode::FAILURE
            }
        }
    }
}
