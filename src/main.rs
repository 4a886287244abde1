use clap::Parser;
use log::{debug, info, warn};
use snafu::ErrorCompat;

mod args;
mod vcheck;

fn main() {
    let args = args::Args::parse();

    let mut logger = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if args.verbose {
        logger.filter_level(log::LevelFilter::Debug);
    }
    logger.init();

    info!("args: {:?}", args);

    let res = vcheck::resolve_config(&args)
        .and_then(|config| vcheck::run_validation(&config, args.reference.clone()));

    match res {
        Ok(report) => {
            debug!("done, {} invalid voters", report.summary.invalid);
        }
        Err(e) => {
            warn!("Error occured {:?}", e);
            eprintln!("An error occured: {}", e);
            if let Some(bt) = ErrorCompat::backtrace(&e) {
                eprintln!("trace: {}", bt);
            }
            std::process::exit(1);
        }
    }
}
