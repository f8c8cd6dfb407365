// UI layer: the line-based REPL. Reads one command per line, runs it
// against the session and keeps going until `exit` or end of input.

use crate::api::PageSource;
use crate::commands::{Outcome, Registry, Session, UNKNOWN_COMMAND};
use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use tracing::{debug, warn};

pub const PROMPT: &str = "Pokedex > ";

/// Run the REPL until `exit` (returns `Outcome::Terminate`) or end of
/// input (returns `Outcome::Continue`).
///
/// Command errors are printed as `Error: <message>` and never stop the
/// loop. A failure to read input ends it and is reported once.
pub fn run_repl<S, R, W>(session: &mut Session<S>, mut input: R, mut output: W) -> Result<Outcome>
where
    S: PageSource,
    R: BufRead,
    W: Write,
{
    let registry = Registry::new();
    let mut line = Vec::new();

    loop {
        write!(output, "{}", PROMPT)?;
        output.flush().context("Failed to flush prompt")?;

        line.clear();
        match input.read_until(b'\n', &mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                warn!(error = %e, "reading input failed");
                writeln!(output, "Error reading input: {}", e)?;
                break;
            }
        }
        // A line that is not UTF-8 cannot name a command; it is just
        // unknown input.
        let command = std::str::from_utf8(strip_line_ending(&line))
            .ok()
            .and_then(|word| registry.lookup(word));

        let Some(command) = command else {
            debug!(input = %String::from_utf8_lossy(&line).trim_end(), "unknown command");
            writeln!(output, "{}", UNKNOWN_COMMAND)?;
            continue;
        };

        debug!(command = command.name, "dispatching");
        match session.execute(&registry, command.action, &mut output) {
            Ok(Outcome::Terminate) => return Ok(Outcome::Terminate),
            Ok(Outcome::Continue) => {}
            Err(e) => writeln!(output, "Error: {}", e)?,
        }
    }

    // Leave the terminal on a fresh line after Ctrl-D.
    writeln!(output)?;
    Ok(Outcome::Continue)
}

/// Drop the line terminator only; the rest of the line must match a
/// command exactly.
fn strip_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}
