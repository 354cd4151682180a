// SPDX-FileCopyrightText: 2026 TimeMesh contributors
//
// SPDX-License-Identifier: Apache-2.0

use chrono::{NaiveDate, NaiveTime, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TimeMeshError};

/// Maximum length of a slot label, in characters.
pub const MAX_LABEL_LEN: usize = 100;

/// A labeled availability interval within one calendar date.
///
/// The range is half-open: a slot covers `[start, end)`. Slots of one
/// `(owner, date)` never overlap once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    /// Storage row id, `None` until the slot has been persisted.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub id: Option<i64>,

    /// The user owning this slot. Slots are never mutated across owners.
    pub owner: String,

    /// The calendar date the slot belongs to.
    pub date: NaiveDate,

    /// Start of the range, inclusive.
    #[serde(rename = "start_time")]
    pub start: NaiveTime,

    /// End of the range, exclusive.
    #[serde(rename = "end_time")]
    pub end: NaiveTime,

    /// Free-text label, at most [`MAX_LABEL_LEN`] characters.
    pub label: String,

    /// Whether the owner is available during this slot.
    pub available: bool,
}

impl Slot {
    /// Whether this slot intersects `other` with nonzero measure.
    pub fn overlaps(&self, other: &Slot) -> bool {
        self.start < other.end && self.end > other.start
    }

    /// Whether this slot covers the whole `[start, end)` range.
    pub fn covers(&self, start: NaiveTime, end: NaiveTime) -> bool {
        self.start <= start && self.end >= end
    }
}

/// Draft for a slot, used for creating new slots.
///
/// The owner is not part of the draft; it comes from the authenticated
/// identity of the request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotDraft {
    pub date: NaiveDate,
    #[serde(rename = "start_time")]
    pub start: NaiveTime,
    #[serde(rename = "end_time")]
    pub end: NaiveTime,
    pub label: String,

    /// Defaults to available when omitted.
    #[serde(default = "default_available")]
    pub available: bool,
}

fn default_available() -> bool {
    true
}

impl SlotDraft {
    /// Validate the draft before it reaches the resolver.
    pub fn validate(&self) -> Result<()> {
        if self.start >= self.end {
            return Err(TimeMeshError::validation(
                "end_time",
                "end time must be after start time",
            ));
        }

        let label = self.label.trim();
        if label.is_empty() {
            return Err(TimeMeshError::validation("label", "label must not be empty"));
        }
        if label.chars().count() > MAX_LABEL_LEN {
            return Err(TimeMeshError::validation(
                "label",
                format!("label must be at most {MAX_LABEL_LEN} characters"),
            ));
        }

        Ok(())
    }

    /// Split into consecutive sub-drafts of at most one hour each.
    ///
    /// Slices are aligned to the draft's own start time, so only the final
    /// slice may be shorter than an hour. The draft must already be
    /// validated.
    pub fn slice_hourly(&self) -> Vec<SlotDraft> {
        let mut slices = Vec::new();
        let mut cursor = self.start;
        while cursor < self.end {
            let (bumped, wrapped) = cursor.overflowing_add_signed(TimeDelta::hours(1));
            let next = if wrapped != 0 || bumped > self.end {
                self.end
            } else {
                bumped
            };
            slices.push(SlotDraft {
                start: cursor,
                end: next,
                ..self.clone()
            });
            cursor = next;
        }
        slices
    }

    /// Turn the draft into an unpersisted slot owned by `owner`.
    pub fn into_slot(self, owner: &str) -> Slot {
        Slot {
            id: None,
            owner: owner.to_string(),
            date: self.date,
            start: self.start,
            end: self.end,
            label: self.label.trim().to_string(),
            available: self.available,
        }
    }
}

/// Exact-match key identifying a stored slot for deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotKey {
    pub date: NaiveDate,
    #[serde(rename = "start_time")]
    pub start: NaiveTime,
    #[serde(rename = "end_time")]
    pub end: NaiveTime,
}
