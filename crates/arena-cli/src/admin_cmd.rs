//! Administrator subcommands: dumps, dump, restore.
//!
//! Non-administrators get an access-denied page, not an error. So does a
//! super user the backend answers with 403.

use std::io::Write;

use arena_client::{AdminError, ApiError};
use arena_core::CredentialStore;

use crate::context::Context;
use crate::fmt::describe_api_error;
use crate::Outcome;

/// Admin subcommand actions.
#[derive(clap::Subcommand, Debug)]
pub enum AdminAction {
    /// List available database dumps.
    Dumps,
    /// Create a new database dump.
    Dump,
    /// Restore the database from a dump.
    Restore {
        /// Dump file name, as shown by `arena admin dumps`.
        filename: String,
    },
}

/// Execute an admin subcommand.
pub async fn run<S: CredentialStore>(
    action: AdminAction,
    ctx: &mut Context<S>,
    out: &mut impl Write,
) -> anyhow::Result<Outcome> {
    let Some((principal, credential)) = ctx.authenticate(out).await? else {
        return Ok(Outcome::Failed);
    };

    let result = match action {
        AdminAction::Dumps => ctx
            .admin
            .list_dumps(&credential, &principal)
            .await
            .map(|dumps| {
                if dumps.is_empty() {
                    vec!["No dumps available.".to_string()]
                } else {
                    dumps
                }
            }),
        AdminAction::Dump => ctx
            .admin
            .create_dump(&credential, &principal)
            .await
            .map(|r| vec![format!("Created dump {}", r.filename)]),
        AdminAction::Restore { filename } => ctx
            .admin
            .restore(&credential, &principal, &filename)
            .await
            .map(|()| vec![format!("Restored from {filename}")]),
    };

    match result {
        Ok(lines) => {
            for line in lines {
                writeln!(out, "{line}")?;
            }
            Ok(Outcome::Done)
        }
        Err(AdminError::AccessDenied | AdminError::Api(ApiError::Api { status: 403, .. })) => {
            write_access_denied(out)?;
            Ok(Outcome::Failed)
        }
        Err(AdminError::Api(e)) => {
            writeln!(out, "Administration request failed: {}", describe_api_error(&e))?;
            Ok(Outcome::Failed)
        }
    }
}

/// Shown whether the client refused the request or the backend answered 403.
fn write_access_denied(out: &mut impl Write) -> std::io::Result<()> {
    writeln!(out, "Access denied")?;
    writeln!(out, "This page is only available to administrators.")
}
