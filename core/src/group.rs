// SPDX-FileCopyrightText: 2026 TimeMesh contributors
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;

use crate::error::Result;

/// Resolved membership of a group, as seen by the requesting user.
#[derive(Debug, Clone)]
pub struct GroupMembership {
    /// Whether the requesting user is an accepted member.
    pub is_member: bool,

    /// Accepted member ids, in ascending order.
    pub members: Vec<String>,
}

/// Supplies resolved group membership for group-scoped queries.
///
/// Group lifecycle (invites, acceptance, ownership) is an external concern.
/// The engine only needs the accepted member list and whether the requester
/// belongs to it; a non-member request is rejected before any slot query.
#[async_trait]
pub trait GroupResolver {
    /// Resolve the accepted membership of `group_id` as seen by `user_id`.
    async fn resolve(&self, group_id: &str, user_id: &str) -> Result<GroupMembership>;
}
