// SPDX-FileCopyrightText: 2026 TimeMesh contributors
//
// SPDX-License-Identifier: Apache-2.0

use chrono::NaiveDate;
use thiserror::Error;

/// Errors produced by the TimeMesh core.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum TimeMeshError {
    /// Malformed or contradictory input, rejected before touching storage.
    #[error("{field}: {message}")]
    Validation {
        /// The request field the message refers to.
        field: &'static str,
        message: String,
    },

    /// The requesting user is not an accepted member of the group.
    #[error("not a member of this group")]
    Forbidden,

    /// No stored slot matches the given key.
    #[error("Slot not found")]
    SlotNotFound,

    /// A stored collection violates the non-overlap invariant.
    ///
    /// This signals a defect in the store, never an expected runtime
    /// condition, and is logged at error level where detected.
    #[error("stored slots overlap for {owner} on {date}")]
    CorruptCollection { owner: String, date: NaiveDate },

    /// Configuration or startup error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Underlying database failure.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl TimeMeshError {
    pub(crate) fn validation(field: &'static str, message: impl Into<String>) -> Self {
        TimeMeshError::Validation {
            field,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TimeMeshError>;
