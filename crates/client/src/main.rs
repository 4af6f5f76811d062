//! `battle-sim`: run one seeded battle from the command line.
//!
//! ```bash
//! BATTLE_SEED=7 BATTLE_POLICY=weakest cargo run -p battle-client
//! ```
//!
//! The battle log goes to stdout followed by a JSON summary; tracing output
//! goes to stderr.

use anyhow::{Context, Result};
use battle_client::{Autoplay, SimConfig, SimReport, logging};
use battle_content::{ContentFactory, RosterEntry};
use battle_core::{BattleState, RandRng};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = SimConfig::from_env();
    let _guard = logging::setup_logging(config.log_dir.as_deref())?;

    let factory = match &config.content_dir {
        Some(dir) => ContentFactory::new(dir),
        None => ContentFactory::bundled(),
    };
    tracing::info!("Loading content from {}", factory.data_dir().display());

    let battle_config = factory.load_config()?;
    let catalog = factory.load_characters()?;

    let players = RosterEntry::parse_list(&config.player_roster).context("player roster")?;
    let opponents = RosterEntry::parse_list(&config.opponent_roster).context("opponent roster")?;
    let mut state = BattleState::with_progression(
        &catalog.roster(&players)?,
        &catalog.roster(&opponents)?,
        &battle_config,
    )?;

    tracing::info!(
        seed = config.seed,
        player_policy = %config.player_policy,
        opponent_policy = %config.opponent_policy,
        "Starting battle"
    );

    let mut rng = RandRng(StdRng::seed_from_u64(config.seed));
    let stop = Autoplay::new(
        &battle_config,
        config.player_policy.policy(),
        config.opponent_policy.policy(),
        config.max_turns,
    )
    .run(&mut state, &mut rng, |turn, lines| {
        println!("--- turn {turn} ---");
        for line in lines {
            println!("{line}");
        }
    })?;

    let report = SimReport {
        seed: config.seed,
        stop,
        summary: state.summary(),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);

    tracing::info!("Battle finished: {} ({})", report.summary.outcome, stop);
    Ok(())
}
