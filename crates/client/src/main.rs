//! Escape client binary.
//!
//! Composition root: reads `.env` and the `ESCAPE_*` variables, sets up
//! logging, builds a session and lets the autopilot play it.
//!
//! ```bash
//! ESCAPE_SEED=7 ESCAPE_MAP_SIZE=large cargo run -p escape-client
//! ESCAPE_OUTPUT=json cargo run -p escape-client
//! ```
mod logging;
mod presentation;

use std::env;

use anyhow::{Context, Result};
use escape_runtime::{AgentController, Autopilot, RuntimeConfig, Session};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
enum OutputFormat {
    /// Turn-by-turn narration followed by the summary.
    #[default]
    Text,
    /// Only the summary, as JSON.
    Json,
}

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let runtime_config = RuntimeConfig::from_env();
    let output = env::var("ESCAPE_OUTPUT")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or_default();

    let _guard = logging::setup_logging(runtime_config.session_id.as_deref())?;

    let mut session =
        Session::from_runtime_config(&runtime_config).context("Failed to set up session")?;
    let mut autopilot = Autopilot::new();

    match output {
        OutputFormat::Text => {
            println!("{}", session.environment().map_summary());
            while !session.is_over() {
                let command = autopilot.next_command(&session);
                let report = session.step(command)?;
                println!("{}", presentation::render_turn(&report));
            }
            println!();
            println!("{}", session.summary());
        }
        OutputFormat::Json => {
            session.run(&mut autopilot)?;
            println!("{}", session.summary().to_json()?);
        }
    }

    Ok(())
}
