// SPDX-FileCopyrightText: 2026 TimeMesh contributors
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::error::Result;
use crate::group::{GroupMembership, GroupResolver};

/// Group membership table access.
///
/// This is the in-tree [`GroupResolver`]: enough bookkeeping to resolve an
/// accepted member list. Invite and ownership workflows live outside the
/// core.
#[derive(Debug, Clone)]
pub struct Groups {
    pool: SqlitePool,
}

impl Groups {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Record `user_id` as an accepted member of `group_id`. Idempotent.
    pub async fn add_member(&self, group_id: &str, user_id: &str) -> Result<()> {
        const SQL: &str = "\
INSERT INTO group_members (group_id, user_id, accepted)
VALUES (?, ?, 1)
ON CONFLICT(group_id, user_id) DO UPDATE SET accepted = 1;
";

        sqlx::query(SQL)
            .bind(group_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn accepted_members(&self, group_id: &str) -> Result<Vec<String>> {
        const SQL: &str = "\
SELECT user_id FROM group_members
WHERE group_id = ? AND accepted = 1
ORDER BY user_id ASC;
";

        let rows: Vec<(String,)> = sqlx::query_as(SQL)
            .bind(group_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(|(user,)| user).collect())
    }
}

#[async_trait]
impl GroupResolver for Groups {
    async fn resolve(&self, group_id: &str, user_id: &str) -> Result<GroupMembership> {
        let members = self.accepted_members(group_id).await?;
        let is_member = members.iter().any(|member| member == user_id);
        Ok(GroupMembership { is_member, members })
    }
}
