// Library root
// -----------
// The binary (`main.rs`) wires these modules into the interactive
// Pokedex REPL.
//
// Module responsibilities:
// - `config`: Base listing URL and request timeout, read from the
//   environment with sensible defaults.
// - `api`: Blocking HTTP client for the location-area listing, the page
//   types it decodes and the `PageSource` trait commands fetch through.
// - `commands`: Command registry, pagination cursor and the session that
//   executes `help`, `exit`, `map` and `mapb`.
// - `ui`: The read-eval-print loop over any line-based input.
pub mod api;
pub mod commands;
pub mod config;
pub mod ui;
