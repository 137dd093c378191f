//! Backend data model.
//!
//! Deserialization structs matching the Arena REST API JSON bodies. All of
//! these are backend-authoritative: the client reads them, never edits them.

use serde::{Deserialize, Serialize};

/// Identifier of a player on the backend.
pub type UserId = i64;

/// Authenticated identity resolved from a credential by `GET /user/login`.
///
/// A `Principal` is only valid for the verification call that produced it.
/// Crowns change between views, so callers re-verify instead of caching one.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Principal {
    pub id: UserId,
    #[serde(default)]
    pub name: String,
    pub tag: String,
    #[serde(default)]
    pub crowns: i64,
    #[serde(default)]
    pub max_crowns: i64,
    #[serde(default)]
    pub is_super_user: bool,
}

impl Principal {
    /// Name to show in views; falls back to the tag for accounts registered
    /// before names existed.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.tag
        } else {
            &self.name
        }
    }
}

/// Another player, as listed by `GET /user/get_all_except_self`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserSummary {
    pub id: UserId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub crowns: i64,
    #[serde(default)]
    pub max_crowns: i64,
}

/// Directed "follows" edge owned by the caller, from `GET /subscriptions/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct SubscriptionEdge {
    #[serde(default)]
    pub user_id1: Option<UserId>,
    pub user_id2: UserId,
}

/// One finished match from the viewer's perspective.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BattleRecord {
    pub opponent_name: String,
    pub score: u32,
    pub opponent_score: u32,
    #[serde(default)]
    pub crowns_gained: i64,
    #[serde(default)]
    pub opponent_crowns_gained: i64,
    pub is_win: bool,
}

/// Backend rollup of every match between two named players.
///
/// `score1 + score2` is the number of matches the pairing contributed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AggregatedBattleRecord {
    pub name1: String,
    pub name2: String,
    pub score1: u32,
    pub score2: u32,
}

/// Body of `POST /user/register`.
#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub tag: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Registration {
    /// Whether every mandatory field has been filled in.
    pub fn is_complete(&self) -> bool {
        !self.email.trim().is_empty()
            && !self.password.is_empty()
            && !self.tag.trim().is_empty()
            && self.name.as_deref().is_none_or(|n| !n.trim().is_empty())
    }
}
