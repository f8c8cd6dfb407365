// Command registry and session state.
// - The registry maps a command word to a description and a tagged
//   `Action`. It holds no state, so it can be built once and shared.
// - `Session` owns the pagination cursor and the page source; every
//   action runs against it explicitly.

use crate::api::{LocationPage, PageSource};
use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Write;
use tracing::debug;

pub const UNKNOWN_COMMAND: &str = "Unknown command. Type 'help' for a list of commands.";
pub const NO_PREVIOUS_PAGE: &str = "No previous page available.";
pub const NO_NEXT_PAGE: &str = "No next page available.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Help,
    Exit,
    Map,
    MapBack,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub name: &'static str,
    pub description: &'static str,
    pub action: Action,
}

/// What the REPL should do after a command ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Terminate,
}

/// Fixed table of commands, kept in registration order so `help` lists
/// them the same way every time.
#[derive(Debug, Clone)]
pub struct Registry {
    commands: Vec<Command>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    pub fn new() -> Self {
        let commands = vec![
            Command {
                name: "help",
                description: "Displays a help message",
                action: Action::Help,
            },
            Command {
                name: "exit",
                description: "Exit the Pokedex",
                action: Action::Exit,
            },
            Command {
                name: "map",
                description: "Display the next 20 location areas",
                action: Action::Map,
            },
            Command {
                name: "mapb",
                description: "Display the previous 20 location areas",
                action: Action::MapBack,
            },
        ];
        Registry { commands }
    }

    /// Exact, case-sensitive lookup.
    pub fn lookup(&self, name: &str) -> Option<&Command> {
        self.commands.iter().find(|c| c.name == name)
    }

    pub fn commands(&self) -> impl Iterator<Item = &Command> {
        self.commands.iter()
    }

    /// Usage text printed by `help`.
    pub fn usage(&self) -> String {
        let mut text = String::from("\nWelcome to the Pokedex!\nUsage:\n\n");
        for command in self.commands() {
            text.push_str(&format!("{}: {}\n", command.name, command.description));
        }
        text
    }
}

/// Forward and backward links of the page currently shown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaginationCursor {
    pub next: Option<String>,
    pub previous: Option<String>,
    /// Set once any page has been shown. Distinguishes "nothing loaded
    /// yet" from "on the last page", both of which have no `next`.
    pub page_loaded: bool,
}

impl PaginationCursor {
    fn update(&mut self, page: &LocationPage) {
        self.next = page.next.clone();
        self.previous = page.previous.clone();
        self.page_loaded = true;
    }
}

pub struct Session<S> {
    source: S,
    base_url: String,
    cursor: PaginationCursor,
}

impl<S: PageSource> Session<S> {
    /// `base_url` is the first page, fetched by the first `map`.
    pub fn new(source: S, base_url: impl Into<String>) -> Self {
        Session {
            source,
            base_url: base_url.into(),
            cursor: PaginationCursor::default(),
        }
    }

    pub fn cursor(&self) -> &PaginationCursor {
        &self.cursor
    }

    /// Run one action, writing anything user-visible to `out`. Fetch
    /// failures are returned and leave the cursor untouched.
    pub fn execute(
        &mut self,
        registry: &Registry,
        action: Action,
        out: &mut dyn Write,
    ) -> Result<Outcome> {
        match action {
            Action::Help => {
                writeln!(out, "{}", registry.usage())?;
            }
            Action::Exit => {
                debug!("exit requested");
                return Ok(Outcome::Terminate);
            }
            Action::Map => self.map_forward(out)?,
            Action::MapBack => self.map_back(out)?,
        }
        Ok(Outcome::Continue)
    }

    fn map_forward(&mut self, out: &mut dyn Write) -> Result<()> {
        let url = match (&self.cursor.next, self.cursor.page_loaded) {
            (Some(next), _) => next.clone(),
            (None, false) => self.base_url.clone(),
            (None, true) => {
                writeln!(out, "{}", NO_NEXT_PAGE)?;
                return Ok(());
            }
        };
        self.show_page(&url, out)
    }

    fn map_back(&mut self, out: &mut dyn Write) -> Result<()> {
        let Some(url) = self.cursor.previous.clone() else {
            writeln!(out, "{}", NO_PREVIOUS_PAGE)?;
            return Ok(());
        };
        self.show_page(&url, out)
    }

    fn show_page(&mut self, url: &str, out: &mut dyn Write) -> Result<()> {
        // Spinner is drawn once on stderr and stays hidden when that is not
        // a terminal, so piped output is just the names.
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
        spinner.set_message("Fetching location areas...");
        spinner.tick();
        let fetched = self.source.fetch_page(url);
        spinner.finish_and_clear();

        let page = fetched?;
        for area in &page.results {
            writeln!(out, "{}", area.name)?;
        }
        self.cursor.update(&page);
        debug!(next = ?self.cursor.next, previous = ?self.cursor.previous, "cursor moved");
        Ok(())
    }
}
