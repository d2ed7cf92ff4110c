mod args;
mod report;

use clap::Parser;
use log::{debug, error};
use snafu::ErrorCompat;

use crate::args::Args;

fn main() {
    let args = Args::parse();

    let mut logger =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if args.verbose {
        logger.filter_level(log::LevelFilter::Debug);
    }
    logger.init();
    debug!("args: {:?}", args);

    let res = match args.config.clone() {
        Some(config_path) => {
            report::run_report(config_path, args.out.clone(), args.reference.clone())
        }
        None => report::run_input(
            args.input.clone(),
            args.input_type.clone(),
            args.data_kind.clone(),
            args.out.clone(),
            args.reference.clone(),
        ),
    };

    if let Err(e) = res {
        error!("{:?}", e);
        eprintln!("An error occured: {}", e);
        for cause in e.iter_chain().skip(1) {
            eprintln!("  caused by: {}", cause);
        }
        std::process::exit(1);
    }
}
