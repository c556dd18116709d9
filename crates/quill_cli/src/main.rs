//! quill: generate documentation from a program tree
//!
//! ```text
//! quill <tree.json> [--output FILE] [--format xml|json] [--config quill.toml] [--list]
//! ```
//!
//! Log verbosity is controlled with `QUILL_LOG` (default `info`).

mod generate;

use anyhow::Result;
use std::env;

fn main() -> Result<()> {
    use tracing_subscriber::EnvFilter;
    let filter = EnvFilter::try_from_env("QUILL_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    generate::run(&args)
}
