//! Battle history subcommands: list, stats.

use std::io::Write;

use arena_core::CredentialStore;
use arena_core::stats;

use crate::context::Context;
use crate::fmt::{describe_api_error, write_battles, write_report, write_tally};
use crate::Outcome;

/// Battles subcommand actions.
#[derive(clap::Subcommand, Debug)]
pub enum BattlesAction {
    /// List finished battles.
    List,
    /// Win/loss statistics per opponent.
    Stats,
}

/// Execute a battles subcommand.
pub async fn run<S: CredentialStore>(
    action: BattlesAction,
    ctx: &mut Context<S>,
    out: &mut impl Write,
) -> anyhow::Result<Outcome> {
    let Some((_principal, credential)) = ctx.authenticate(out).await? else {
        return Ok(Outcome::Failed);
    };
    match action {
        BattlesAction::List => match ctx.client().battle_records(&credential).await {
            Ok(battles) => {
                write_battles(out, &battles)?;
                if !battles.is_empty() {
                    writeln!(out)?;
                    write_tally(out, &stats::tally(&battles))?;
                }
                Ok(Outcome::Done)
            }
            Err(e) => {
                writeln!(out, "Could not load battles: {}", describe_api_error(&e))?;
                Ok(Outcome::Failed)
            }
        },
        BattlesAction::Stats => match ctx.client().aggregated_battle_records(&credential).await {
            Ok(records) => {
                write_report(out, &stats::report(&records))?;
                Ok(Outcome::Done)
            }
            Err(e) => {
                writeln!(out, "Could not load statistics: {}", describe_api_error(&e))?;
                Ok(Outcome::Failed)
            }
        },
    }
}
