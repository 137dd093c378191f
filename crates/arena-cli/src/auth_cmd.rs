//! Auth subcommands: register, login, logout, status.
//!
//! User-facing output uses writeln! to the given writer (stdout in the binary).

use std::io::Write;

use arena_client::{LoginError, RegisterError};
use arena_core::CredentialStore;
use arena_core::model::Registration;

use crate::context::Context;
use crate::fmt::{describe_api_error, write_principal};
use crate::Outcome;

/// Auth subcommand actions.
#[derive(clap::Subcommand, Debug)]
pub enum AuthAction {
    /// Create a new account.
    Register {
        /// Email address, used as the login name.
        #[arg(short, long)]
        email: String,
        /// Player tag.
        #[arg(short, long)]
        tag: String,
        /// Display name.
        #[arg(short, long)]
        name: Option<String>,
        /// Password (prompted when omitted).
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Log in and remember the session.
    Login {
        /// Email used at registration.
        #[arg(short, long)]
        username: String,
        /// Password (prompted when omitted).
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Forget the stored session.
    Logout,
    /// Show who is logged in.
    Status,
}

/// Execute an auth subcommand.
pub async fn run<S: CredentialStore>(
    action: AuthAction,
    ctx: &mut Context<S>,
    out: &mut impl Write,
) -> anyhow::Result<Outcome> {
    match action {
        AuthAction::Register {
            email,
            tag,
            name,
            password,
        } => {
            let registration = Registration {
                email,
                password: password_or_prompt(password)?,
                tag,
                name,
            };
            register(ctx, &registration, out).await
        }
        AuthAction::Login { username, password } => {
            let password = password_or_prompt(password)?;
            login(ctx, &username, &password, out).await
        }
        AuthAction::Logout => logout(ctx, out),
        AuthAction::Status => status(ctx, out).await,
    }
}

fn password_or_prompt(password: Option<String>) -> anyhow::Result<String> {
    match password {
        Some(p) => Ok(p),
        None => Ok(dialoguer::Password::new()
            .with_prompt("Password")
            .interact()?),
    }
}

pub async fn register<S: CredentialStore>(
    ctx: &Context<S>,
    registration: &Registration,
    out: &mut impl Write,
) -> anyhow::Result<Outcome> {
    match ctx.session.gateway().register(registration).await {
        Ok(()) => {
            writeln!(out, "Registered successfully. You can now log in.")?;
            Ok(Outcome::Done)
        }
        Err(RegisterError::Incomplete) => {
            writeln!(out, "Please fill in all fields.")?;
            Ok(Outcome::Failed)
        }
        Err(RegisterError::Api(e)) => {
            writeln!(out, "Registration failed: {}", describe_api_error(&e))?;
            Ok(Outcome::Failed)
        }
    }
}

pub async fn login<S: CredentialStore>(
    ctx: &mut Context<S>,
    username: &str,
    password: &str,
    out: &mut impl Write,
) -> anyhow::Result<Outcome> {
    match ctx.session.login(username, password).await {
        Ok(()) => {
            writeln!(out, "Logged in as {username}")?;
            Ok(Outcome::Done)
        }
        Err(LoginError::Incomplete) => {
            writeln!(out, "Please fill in all fields.")?;
            Ok(Outcome::Failed)
        }
        Err(LoginError::InvalidCredentials) => {
            writeln!(out, "Invalid credentials. Check your email and password.")?;
            Ok(Outcome::Failed)
        }
        Err(LoginError::Unavailable(e)) => {
            writeln!(out, "Login failed: {}. Try again later.", describe_api_error(&e))?;
            Ok(Outcome::Failed)
        }
        Err(LoginError::Store(e)) => Err(e.into()),
    }
}

pub fn logout<S: CredentialStore>(
    ctx: &mut Context<S>,
    out: &mut impl Write,
) -> anyhow::Result<Outcome> {
    ctx.session.logout()?;
    writeln!(out, "Logged out")?;
    Ok(Outcome::Done)
}

/// Home view: who am I, verified against the backend.
pub async fn status<S: CredentialStore>(
    ctx: &mut Context<S>,
    out: &mut impl Write,
) -> anyhow::Result<Outcome> {
    let Some((principal, _credential)) = ctx.authenticate(out).await? else {
        return Ok(Outcome::Failed);
    };
    writeln!(out, "Logged in")?;
    write_principal(out, &principal)?;
    Ok(Outcome::Done)
}
