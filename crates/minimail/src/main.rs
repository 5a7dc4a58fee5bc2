//! `MiniMail+` - terminal email simulator
//!
//! Users, inboxes, drafts and sent mail live in two local JSON files.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod app;
mod console;
mod render;

use std::io;

use anyhow::Context;
use minimail_core::{Config, Session};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use console::Console;

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they never mix with the menus on stdout
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "minimail=warn,minimail_core=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    info!("Starting MiniMail+");

    let config = Config::load().context("Failed to load settings")?;
    let mut session = Session::open(config).context("Failed to load mail data")?;

    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout().lock());
    app::run(&mut session, &mut console)
}
