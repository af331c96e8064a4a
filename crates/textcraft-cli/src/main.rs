mod app;
mod input;

use anyhow::{Context, Result};
use crossterm::{
    cursor::MoveTo,
    execute,
    terminal::{Clear, ClearType},
};
use std::{
    env,
    io::{self, BufRead, Write},
    path::PathBuf,
    process,
};
use textcraft_config::Config;

use crate::app::{App, Step};

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    let config = match args.as_slice() {
        [_] => Config::load()
            .with_context(|| format!("loading {}", Config::config_path().display()))?
            .unwrap_or_default(),
        [_, flag, path] if flag == "--config" => {
            let path = Config::expand_path(&PathBuf::from(path))
                .unwrap_or_else(|| PathBuf::from(path));
            match Config::load_from_path(&path)? {
                Some(config) => config,
                None => {
                    eprintln!("Error: config file '{}' not found", path.display());
                    process::exit(1);
                }
            }
        }
        _ => {
            eprintln!("Usage: {} [--config <path>]", program_name(&args));
            process::exit(1);
        }
    };

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.log_level.as_str()),
    )
    .init();

    log::info!("textcraft starting up");
    log::debug!("config: {config:?}");

    let mut app = App::new(&config);
    run(&mut app, &config)?;

    println!("Thank you for using TextCraft!");
    log::info!("textcraft shutting down");
    Ok(())
}

/// argv[0], which the OS does not guarantee to pass
fn program_name(args: &[String]) -> &str {
    args.first().map_or("textcraft", String::as_str)
}

fn run(app: &mut App, config: &Config) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut lines = stdin.lock().lines();

    loop {
        if config.clear_screen {
            execute!(stdout, Clear(ClearType::All), MoveTo(0, 0))?;
        }
        app.render(&mut stdout)?;
        print!("{}", app.prompt());
        stdout.flush()?;

        let Some(line) = lines.next() else {
            println!();
            println!("Exiting...");
            return Ok(());
        };
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if app.handle_line(line) == Step::Quit {
            return Ok(());
        }

        if config.pause_after_command {
            if let Some(message) = app.last_message() {
                println!("{message}");
            }
            print!("Press Enter to continue...");
            stdout.flush()?;
            if lines.next().transpose()?.is_none() {
                return Ok(());
            }
        }
    }
}
