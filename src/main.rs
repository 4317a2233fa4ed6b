//! create-cntrl-site - scaffold a new Cntrl site
//!
//! ## Architecture
//!
//! ```text
//! cli → config → scaffold (git clone → npm ci → prompt → .env.local → npm run generate-layouts)
//! ```

mod cli;
mod config;
mod error;
mod exec;
mod scaffold;
mod utils;

use clap::Parser;

use cli::Cli;
use error::ScaffoldError;
use utils::terminal;

fn main() {
    let cli = Cli::parse();

    if let Err(err) = cli.execute() {
        match err.downcast_ref::<ScaffoldError>() {
            Some(scaffold_err) => scaffold_err.display_with_hints(),
            None => terminal::print_error(&format!("{:#}", err)),
        }
        std::process::exit(1);
    }
}
