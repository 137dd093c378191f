//! Player directory subcommands: list, subscribe, unsubscribe, toggle.
//!
//! Every toggle is followed by a fresh read of the directory, so what gets
//! printed is always the backend's state, not a guess.

use std::io::Write;

use arena_client::Toggle;
use arena_core::model::{Principal, UserId};
use arena_core::{Credential, CredentialStore};

use crate::context::Context;
use crate::fmt::{describe_api_error, write_directory};
use crate::Outcome;

/// Users subcommand actions.
#[derive(clap::Subcommand, Debug)]
pub enum UsersAction {
    /// List other players and whether you follow them.
    List,
    /// Follow a player.
    Subscribe {
        /// Player ID.
        id: UserId,
    },
    /// Stop following a player.
    Unsubscribe {
        /// Player ID.
        id: UserId,
    },
    /// Follow a player you don't follow yet, or stop following one you do.
    Toggle {
        /// Player ID.
        id: UserId,
    },
}

/// Execute a users subcommand.
pub async fn run<S: CredentialStore>(
    action: UsersAction,
    ctx: &mut Context<S>,
    out: &mut impl Write,
) -> anyhow::Result<Outcome> {
    match action {
        UsersAction::List => list(ctx, out).await,
        UsersAction::Subscribe { id } => toggle(ctx, Toggle::Subscribe(id), out).await,
        UsersAction::Unsubscribe { id } => toggle(ctx, Toggle::Unsubscribe(id), out).await,
        UsersAction::Toggle { id } => flip(ctx, id, out).await,
    }
}

async fn list<S: CredentialStore>(
    ctx: &mut Context<S>,
    out: &mut impl Write,
) -> anyhow::Result<Outcome> {
    let Some((_principal, credential)) = ctx.authenticate(out).await? else {
        return Ok(Outcome::Failed);
    };
    match ctx.toggle.refresh(&credential).await {
        Ok(view) => {
            write_directory(out, &view)?;
            Ok(Outcome::Done)
        }
        Err(e) => {
            writeln!(out, "Could not load players: {}", describe_api_error(&e))?;
            Ok(Outcome::Failed)
        }
    }
}

async fn toggle<S: CredentialStore>(
    ctx: &mut Context<S>,
    toggle: Toggle,
    out: &mut impl Write,
) -> anyhow::Result<Outcome> {
    let Some((principal, credential)) = ctx.authenticate(out).await? else {
        return Ok(Outcome::Failed);
    };
    apply(ctx, &credential, &principal, toggle, out).await
}

/// Pick the action from the backend's current subscription set, then apply it.
async fn flip<S: CredentialStore>(
    ctx: &mut Context<S>,
    id: UserId,
    out: &mut impl Write,
) -> anyhow::Result<Outcome> {
    let Some((principal, credential)) = ctx.authenticate(out).await? else {
        return Ok(Outcome::Failed);
    };
    let toggle = match ctx.toggle.refresh(&credential).await {
        Ok(view) => view.toggle_for(id),
        Err(e) => {
            writeln!(out, "Could not load players: {}", describe_api_error(&e))?;
            return Ok(Outcome::Failed);
        }
    };
    apply(ctx, &credential, &principal, toggle, out).await
}

async fn apply<S: CredentialStore>(
    ctx: &Context<S>,
    credential: &Credential,
    principal: &Principal,
    toggle: Toggle,
    out: &mut impl Write,
) -> anyhow::Result<Outcome> {
    let outcome = ctx.toggle.apply(credential, principal, toggle).await;
    let target = outcome.toggle.target();

    let mut result = match (&outcome.mutation, outcome.toggle) {
        (Ok(()), Toggle::Subscribe(_)) => {
            writeln!(out, "Subscribed to player {target}.")?;
            Outcome::Done
        }
        (Ok(()), Toggle::Unsubscribe(_)) => {
            writeln!(out, "Unsubscribed from player {target}.")?;
            Outcome::Done
        }
        (Err(e), toggle) => {
            let verb = match toggle {
                Toggle::Subscribe(_) => "subscribe to",
                Toggle::Unsubscribe(_) => "unsubscribe from",
            };
            writeln!(out, "Could not {verb} player {target}: {}", describe_api_error(e))?;
            Outcome::Failed
        }
    };

    match &outcome.view {
        Ok(view) => write_directory(out, view)?,
        Err(e) => {
            writeln!(out, "Could not refresh players: {}", describe_api_error(e))?;
            result = Outcome::Failed;
        }
    }
    Ok(result)
}
