use std::panic;

use crate::{app::App, config::Config};
use colored::Colorize;

mod app;
mod config;
mod corpus;
mod events;
mod prompts;
mod resolver;
mod services;
mod state;
mod types;
mod widgets;

#[tokio::main]
async fn main() {
    let result = run().await;

    ratatui::restore();

    if let Err(e) = result {
        eprintln!("{}", format!("[Error]: {e}").red());
    }
}

async fn run() -> Result<(), anyhow::Error> {
    panic::set_hook(Box::new(|e| {
        ratatui::restore();
        eprintln!("{}", format!("[Error]: {e}").red());
    }));

    // A missing .env is fine, the process environment still applies.
    dotenv::dotenv().ok();
    let config = Config::from_env()?;

    let terminal = ratatui::init();

    let mut app = App::new(terminal, &config)?;
    app.start().await?;

    Ok(())
}
