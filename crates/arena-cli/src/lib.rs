//! Arena CLI Library
//!
//! Command-line views over the Arena backend: account management, the
//! player directory with follow/unfollow, battle statistics and the
//! administrator dump tools.

pub mod admin_cmd;
pub mod auth_cmd;
pub mod battles_cmd;
pub mod context;
pub mod fmt;
pub mod users_cmd;

pub use context::Context;

/// How a command finished, after its output has been rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Done,
    Failed,
}

impl From<Outcome> for std::process::ExitCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Done => Self::SUCCESS,
            Outcome::Failed => Self::FAILURE,
        }
    }
}
