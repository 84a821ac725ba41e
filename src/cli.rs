//! CLI domain: parse, route, output, and presentation only.
//! No pipeline logic; the route table dispatches to the campaign engine.

mod output;
mod parse;
mod presentation;
mod route;

pub use output::map_error;
pub use parse::{Cli, Commands};
pub use presentation::{
    format_generate_json, format_generate_text, format_library, format_package_summary,
    GenerateOutput, LibraryEntry, LIVE_NOTICE, MOCK_NOTICE,
};
pub use route::{read_records, RunContext};
