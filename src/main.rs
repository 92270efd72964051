use anyhow::Result;
use clap::Parser;

use gesture_tetris::config::{Cli, Settings};
use gesture_tetris::{app, logging};

fn main() -> Result<()> {
    let settings = Settings::try_from(Cli::parse())?;
    logging::init(&settings.log_file)?;
    app::run(settings)
}
