use clap::Parser;

use recall_match::config::Config;
use recall_match::ui;

fn init_logging() {
    env_logger::init();
}

fn main() {
    init_logging();
    let config = Config::parse();
    log::debug!("{:?}", config);

    if let Err(err) = ui::run(&config) {
        log::error!("terminal I/O failed: {}", err);
        std::process::exit(1);
    }
}
