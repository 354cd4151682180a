// SPDX-FileCopyrightText: 2026 TimeMesh contributors
//
// SPDX-License-Identifier: Apache-2.0

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::{Result, TimeMeshError};
use crate::slot::{Slot, SlotDraft, SlotKey};

/// Maximum number of calendar days a match query may span.
pub const MAX_SPAN_DAYS: i64 = 31;

/// A query span of calendar days, either a single date or an inclusive range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateSpan {
    /// A single calendar day.
    Single(NaiveDate),

    /// An inclusive date range, at most [`MAX_SPAN_DAYS`] days.
    Range { start: NaiveDate, end: NaiveDate },
}

impl DateSpan {
    /// Validate the span before any storage query runs.
    pub fn validate(&self) -> Result<()> {
        if let DateSpan::Range { start, end } = self {
            if start > end {
                return Err(TimeMeshError::validation(
                    "end_date",
                    "end date must not be before start date",
                ));
            }
            let days = (*end - *start).num_days() + 1;
            if days > MAX_SPAN_DAYS {
                return Err(TimeMeshError::validation(
                    "end_date",
                    format!("date range must cover at most {MAX_SPAN_DAYS} days"),
                ));
            }
        }
        Ok(())
    }

    /// The calendar days covered by the span, in order.
    pub fn days(&self) -> Vec<NaiveDate> {
        match self {
            DateSpan::Single(date) => vec![*date],
            DateSpan::Range { start, end } => start.iter_days().take_while(|d| d <= end).collect(),
        }
    }
}

impl From<NaiveDate> for DateSpan {
    fn from(date: NaiveDate) -> Self {
        DateSpan::Single(date)
    }
}

/// A batch-create item that was rejected, with the reason.
#[derive(Debug, Clone, Serialize)]
pub struct CreateError {
    pub draft: SlotDraft,
    pub error: String,
}

/// Per-item report of a batch create. Failures never abort the batch.
#[derive(Debug, Default, Serialize)]
pub struct BatchCreateReport {
    /// Successfully created items, each with its resulting slots.
    pub created: Vec<Vec<Slot>>,

    /// Rejected items with their reasons.
    pub errors: Vec<CreateError>,
}

/// A batch-delete key that matched no stored slot.
#[derive(Debug, Clone, Serialize)]
pub struct DeleteError {
    pub slot: SlotKey,
    pub error: String,
}

/// Per-item report of a batch delete.
#[derive(Debug, Default, Serialize)]
pub struct BatchDeleteReport {
    /// Number of slots actually deleted.
    pub deleted: u64,

    /// Keys that matched nothing.
    pub errors: Vec<DeleteError>,
}
