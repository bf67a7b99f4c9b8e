use clap::Parser;
use minidb_engine::cli::{self, logger, parsers::CliParser};

fn main() {
    // a missing .env file is not an error
    dotenvy::dotenv().ok();

    let config = CliParser::parse();

    logger::init(config.log_level);
    if config.no_color {
        colored::control::set_override(false);
    }

    cli::run_client(&config);
}
