// SPDX-FileCopyrightText: 2026 TimeMesh contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tokio::fs;

use crate::config::Config;
use crate::error::{Result, TimeMeshError};
use crate::group::GroupResolver;
use crate::localdb::{LocalDb, Slots};
use crate::matcher::{self, MatchWindow};
use crate::resolver;
use crate::slot::{Slot, SlotDraft, SlotKey};
use crate::types::{BatchCreateReport, BatchDeleteReport, CreateError, DateSpan, DeleteError};

const DB_NAME: &str = "timemesh.db";

/// TimeMesh availability engine core.
#[derive(Debug, Clone)]
pub struct TimeMesh {
    config: Config,
    db: LocalDb,
}

impl TimeMesh {
    /// Creates a new TimeMesh instance with the given configuration.
    pub async fn new(mut config: Config) -> Result<Self> {
        config
            .normalize()
            .map_err(|e| TimeMeshError::Config(e.to_string()))?;
        prepare(&config).await?;

        let filename = config.state_dir.as_ref().map(|dir| dir.join(DB_NAME));
        let db = LocalDb::open(filename.as_deref())
            .await
            .map_err(|e| TimeMeshError::Config(format!("Failed to initialize db: {e}")))?;

        Ok(Self { config, db })
    }

    /// The normalized configuration the instance runs with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Create availability from the draft, sliced into at-most-one-hour
    /// sub-intervals.
    ///
    /// Slices are resolved in chronological order against the evolving
    /// collection, and the fully resolved collection is persisted once,
    /// inside a single transaction. The returned slots mirror the hour
    /// slices of the request; the stored collection may merge a slice
    /// with a same-label neighbor.
    pub async fn create_slot(&self, owner: &str, draft: SlotDraft) -> Result<Vec<Slot>> {
        tracing::debug!(owner, date = %draft.date, "creating slot");
        draft.validate()?;

        let date = draft.date;
        let mut tx = self.db.begin().await?;
        let before = Slots::list_day(&mut tx, owner, date).await?;
        resolver::ensure_disjoint(&before)?;

        let slices = draft.slice_hourly();
        let mut working = before.clone();
        let mut created = Vec::with_capacity(slices.len());
        for slice in slices {
            let slot = slice.into_slot(owner);
            created.push(slot.clone());
            working = resolver::resolve(slot, &working);
        }

        Slots::apply(&mut tx, &before, &working).await?;
        tx.commit().await?;
        Ok(created)
    }

    /// Create several drafts, reporting per-item outcomes.
    ///
    /// A rejected draft is reported with its reason and does not abort the
    /// remaining items; database failures do.
    pub async fn create_slots(&self, owner: &str, drafts: Vec<SlotDraft>) -> Result<BatchCreateReport> {
        tracing::debug!(owner, count = drafts.len(), "creating slot batch");
        let mut report = BatchCreateReport::default();
        for draft in drafts {
            match self.create_slot(owner, draft.clone()).await {
                Ok(slots) => report.created.push(slots),
                Err(TimeMeshError::Database(e)) => return Err(TimeMeshError::Database(e)),
                Err(e) => report.errors.push(CreateError {
                    draft,
                    error: e.to_string(),
                }),
            }
        }
        Ok(report)
    }

    /// Delete slots by exact `(date, start, end)` match.
    ///
    /// Keys matching nothing are reported per item; the rest of the batch
    /// still commits.
    pub async fn delete_slots(&self, owner: &str, keys: Vec<SlotKey>) -> Result<BatchDeleteReport> {
        tracing::debug!(owner, count = keys.len(), "deleting slots");
        let mut report = BatchDeleteReport::default();
        let mut tx = self.db.begin().await?;
        for key in keys {
            let deleted = Slots::delete_exact(&mut tx, owner, &key).await?;
            if deleted == 0 {
                report.errors.push(DeleteError {
                    slot: key,
                    error: TimeMeshError::SlotNotFound.to_string(),
                });
            } else {
                report.deleted += deleted;
            }
        }
        tx.commit().await?;
        Ok(report)
    }

    /// List an owner's slots, optionally restricted to one date.
    pub async fn list_slots(&self, owner: &str, date: Option<NaiveDate>) -> Result<Vec<Slot>> {
        Ok(self.db.slots.list_owner(owner, date).await?)
    }

    /// Find the windows on `date` where every listed user is covered.
    ///
    /// All slots participate regardless of their availability flag; use
    /// [`TimeMesh::match_group`] for availability-filtered matching.
    pub async fn match_users(&self, user_ids: &[String], date: NaiveDate) -> Result<Vec<MatchWindow>> {
        let users = matcher::dedup_users(user_ids);
        if users.is_empty() {
            return Err(TimeMeshError::validation(
                "users",
                "at least one user id is required",
            ));
        }

        let slots = self.db.slots.list_span(&users, &[date]).await?;
        let by_user = group_by_owner(slots);
        Ok(matcher::match_date(&users, &by_user, date, false))
    }

    /// Find the windows where every accepted member of the group has an
    /// available slot.
    ///
    /// The requester must be an accepted member; a non-member is rejected
    /// without revealing anything about the group. The span covers at
    /// most 31 days and is validated before any query runs.
    #[tracing::instrument(skip(self))]
    pub async fn match_group(
        &self,
        group_id: &str,
        requester: &str,
        span: DateSpan,
    ) -> Result<Vec<MatchWindow>> {
        span.validate()?;

        let membership = self.db.groups.resolve(group_id, requester).await?;
        if !membership.is_member {
            return Err(TimeMeshError::Forbidden);
        }

        let days = span.days();
        let slots = self.db.slots.list_span(&membership.members, &days).await?;
        let by_user = group_by_owner(slots);
        Ok(matcher::match_span(&membership.members, &by_user, &days, true))
    }

    /// Record an accepted group member.
    ///
    /// Plain bookkeeping behind the group resolver; invite workflows are
    /// not the engine's concern.
    pub async fn add_group_member(&self, group_id: &str, user_id: &str) -> Result<()> {
        self.db.groups.add_member(group_id, user_id).await
    }

    /// List a group's accepted members. Members only.
    pub async fn group_members(&self, group_id: &str, requester: &str) -> Result<Vec<String>> {
        let membership = self.db.groups.resolve(group_id, requester).await?;
        if !membership.is_member {
            return Err(TimeMeshError::Forbidden);
        }
        Ok(membership.members)
    }

    /// Close the TimeMesh instance, releasing the database.
    pub async fn close(self) {
        self.db.close().await;
    }
}

fn group_by_owner(slots: Vec<Slot>) -> BTreeMap<String, Vec<Slot>> {
    let mut map: BTreeMap<String, Vec<Slot>> = BTreeMap::new();
    for slot in slots {
        map.entry(slot.owner.clone()).or_default().push(slot);
    }
    map
}

async fn prepare(config: &Config) -> Result<()> {
    if let Some(dir) = &config.state_dir {
        tracing::debug!(path = %dir.display(), "ensuring state directory exists");
        fs::create_dir_all(dir)
            .await
            .map_err(|e| TimeMeshError::Config(format!("Failed to create state directory: {e}")))?;
    }
    Ok(())
}
