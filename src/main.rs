use std::process::ExitCode;

use clap::Parser;

use flexbar::app::App;
use flexbar::cli::Cli;
use flexbar::logging::init_logging;

fn main() -> ExitCode {
    let config = Cli::parse().into_config();
    if let Err(err) = init_logging(config.effective_logging()) {
        eprintln!("flexbar: cannot open log file: {err}");
        return ExitCode::FAILURE;
    }

    match App::new(config).run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            eprintln!("flexbar: {err}");
            ExitCode::FAILURE
        }
    }
}
