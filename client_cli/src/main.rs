// Application.
pub mod app;

use anyhow::Result;
use app::App;
use log::info;
use std::io;
use store::{Color, GameConfig};

const HELP: &str = "\
client_cli

USAGE:
  client_cli [OPTIONS]

OPTIONS:
  --seed NUMBER     seed the dice, for a reproducible game
  --white NAME      name of the White player
  --black NAME      name of the Black player
  --black-first     Black moves first
  -h, --help        print this help
";

fn parse_args() -> Result<Option<GameConfig>> {
    let mut pargs = pico_args::Arguments::from_env();
    if pargs.contains(["-h", "--help"]) {
        print!("{}", HELP);
        return Ok(None);
    }

    let defaults = GameConfig::default();
    let config = GameConfig {
        seed: pargs.opt_value_from_str("--seed")?,
        white_name: pargs
            .opt_value_from_str("--white")?
            .unwrap_or(defaults.white_name),
        black_name: pargs
            .opt_value_from_str("--black")?
            .unwrap_or(defaults.black_name),
        first_player: if pargs.contains("--black-first") {
            Color::Black
        } else {
            Color::White
        },
    };

    let remaining = pargs.finish();
    if !remaining.is_empty() {
        eprintln!("Warning: unused arguments left: {:?}.", remaining);
    }
    Ok(Some(config))
}

fn main() -> Result<()> {
    env_logger::init();
    let Some(config) = parse_args()? else {
        return Ok(());
    };
    info!("Starting with {:?}", config);

    // Create an application.
    let mut app = App::new(config);
    println!("{}", app.display());

    // Start the main loop.
    while !app.should_quit {
        println!("whot?>");
        let mut input = String::new();
        let bytecount = io::stdin().read_line(&mut input)?;
        if bytecount == 0 {
            break;
        }
        app.input(input.trim());
    }

    Ok(())
}
