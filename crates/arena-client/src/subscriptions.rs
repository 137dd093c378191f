//! Subscribe/unsubscribe against the backend.
//!
//! The backend owns every subscription edge. The client never edits its
//! local view after a toggle: it mutates, then re-reads the user list and the
//! subscription set, whether the mutation succeeded or not.

use std::collections::BTreeSet;

use tracing::{debug, info, warn};

use arena_core::Credential;
use arena_core::model::{Principal, SubscriptionEdge, UserId, UserSummary};

use crate::client::{ApiClient, ApiError};

/// A requested relationship change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Subscribe(UserId),
    Unsubscribe(UserId),
}

impl Toggle {
    pub const fn target(self) -> UserId {
        match self {
            Self::Subscribe(id) | Self::Unsubscribe(id) => id,
        }
    }
}

/// Materialized view of backend state: other players plus whom the caller follows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubscriptionView {
    users: Vec<UserSummary>,
    subscribed: BTreeSet<UserId>,
}

impl SubscriptionView {
    pub fn from_parts(users: Vec<UserSummary>, edges: &[SubscriptionEdge]) -> Self {
        Self {
            users,
            subscribed: edges.iter().map(|e| e.user_id2).collect(),
        }
    }

    pub fn users(&self) -> &[UserSummary] {
        &self.users
    }

    pub const fn subscribed(&self) -> &BTreeSet<UserId> {
        &self.subscribed
    }

    pub fn is_subscribed(&self, id: UserId) -> bool {
        self.subscribed.contains(&id)
    }

    /// Each user with its subscription flag, in backend order.
    pub fn rows(&self) -> impl Iterator<Item = (&UserSummary, bool)> {
        self.users.iter().map(|u| (u, self.is_subscribed(u.id)))
    }

    /// The toggle a control for `id` should offer.
    pub fn toggle_for(&self, id: UserId) -> Toggle {
        if self.is_subscribed(id) {
            Toggle::Unsubscribe(id)
        } else {
            Toggle::Subscribe(id)
        }
    }
}

/// Result of a toggle followed by its mandatory refresh.
#[derive(Debug)]
pub struct ToggleOutcome {
    pub toggle: Toggle,
    /// Backend verdict on the mutation.
    pub mutation: Result<(), ApiError>,
    /// Authoritative state read after the mutation.
    pub view: Result<SubscriptionView, ApiError>,
}

/// Performs subscription changes and re-reads authoritative state.
#[derive(Debug, Clone)]
pub struct RelationshipToggle {
    client: ApiClient,
}

impl RelationshipToggle {
    pub const fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Follow `target`. Only a `201 Created` counts as success.
    pub async fn subscribe(
        &self,
        credential: &Credential,
        principal: &Principal,
        target: UserId,
    ) -> Result<(), ApiError> {
        self.client.subscribe(credential, target).await.inspect_err(|e| {
            warn!(subscriber = principal.id, target, error = %e, "Subscribe rejected");
        })?;
        info!(subscriber = principal.id, target, "Subscribed");
        Ok(())
    }

    /// Unfollow `target`. Only a `200 OK` counts as success.
    pub async fn unsubscribe(
        &self,
        credential: &Credential,
        principal: &Principal,
        target: UserId,
    ) -> Result<(), ApiError> {
        self.client
            .unsubscribe(credential, target)
            .await
            .inspect_err(|e| {
                warn!(subscriber = principal.id, target, error = %e, "Unsubscribe rejected");
            })?;
        info!(subscriber = principal.id, target, "Unsubscribed");
        Ok(())
    }

    /// Re-read the user list and the subscription set.
    pub async fn refresh(&self, credential: &Credential) -> Result<SubscriptionView, ApiError> {
        let users = self.client.list_users(credential).await?;
        let edges = self.client.list_subscriptions(credential).await?;
        debug!(users = users.len(), edges = edges.len(), "Refreshed subscription view");
        Ok(SubscriptionView::from_parts(users, &edges))
    }

    /// Apply one toggle, then refresh unconditionally.
    pub async fn apply(
        &self,
        credential: &Credential,
        principal: &Principal,
        toggle: Toggle,
    ) -> ToggleOutcome {
        let mutation = match toggle {
            Toggle::Subscribe(target) => self.subscribe(credential, principal, target).await,
            Toggle::Unsubscribe(target) => self.unsubscribe(credential, principal, target).await,
        };
        let view = self.refresh(credential).await;
        ToggleOutcome {
            toggle,
            mutation,
            view,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    fn user(id: UserId, name: &str) -> UserSummary {
        UserSummary {
            id,
            name: name.into(),
            crowns: 0,
            max_crowns: 0,
        }
    }

    fn edge(id: UserId) -> SubscriptionEdge {
        SubscriptionEdge {
            user_id1: Some(1),
            user_id2: id,
        }
    }

    #[test]
    fn duplicate_edges_collapse() {
        let view = SubscriptionView::from_parts(vec![user(2, "b")], &[edge(2), edge(2)]);
        assert_eq!(view.subscribed().len(), 1);
        assert!(view.is_subscribed(2));
    }

    #[test]
    fn rows_flag_subscribed_users() {
        let view = SubscriptionView::from_parts(vec![user(2, "b"), user(3, "c")], &[edge(3)]);
        let flags: Vec<_> = view.rows().map(|(u, s)| (u.id, s)).collect();
        assert_eq!(flags, vec![(2, false), (3, true)]);
    }

    #[test]
    fn toggle_for_offers_the_opposite_action() {
        let view = SubscriptionView::from_parts(vec![user(2, "b"), user(3, "c")], &[edge(3)]);
        assert_eq!(view.toggle_for(2), Toggle::Subscribe(2));
        assert_eq!(view.toggle_for(3), Toggle::Unsubscribe(3));
        assert_eq!(view.toggle_for(3).target(), 3);
    }

    #[test]
    fn empty_view_has_no_subscriptions() {
        let view = SubscriptionView::default();
        assert!(view.users().is_empty());
        assert!(!view.is_subscribed(1));
    }
}
