// Entrypoint for the Pokedex REPL.
// - Keeps `main` small: set up logging, build the API client and hand a
//   session to the UI loop.
// - `exit` comes back as `Outcome::Terminate`; only here does the process
//   actually end.

use anyhow::Context;
use pokedex_cli::{
    api::PokeApiClient,
    commands::{Outcome, Session},
    config::Config,
    ui::run_repl,
};
use std::io;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout stays a clean transcript. `RUST_LOG`
    // overrides the default of warnings only.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true)
        .init();

    // `POKEDEX_API_URL` / `POKEDEX_TIMEOUT_SECS`, see `config::Config`.
    let config = Config::from_env().context("Invalid configuration")?;
    tracing::debug!(base_url = %config.base_url, timeout = ?config.timeout, "starting");

    let client = PokeApiClient::new(&config)?;
    let mut session = Session::new(client, config.base_url);

    // Blocks until `exit` or end of input.
    let outcome = run_repl(&mut session, io::stdin().lock(), io::stdout().lock())?;
    if outcome == Outcome::Terminate {
        std::process::exit(0);
    }
    Ok(())
}
