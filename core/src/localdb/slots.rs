// SPDX-FileCopyrightText: 2026 TimeMesh contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::HashSet;

use chrono::NaiveDate;
use sqlx::{Sqlite, SqlitePool, Transaction};

use crate::slot::{Slot, SlotKey};

/// Slot table access.
#[derive(Debug, Clone)]
pub struct Slots {
    pool: SqlitePool,
}

const SELECT_COLUMNS: &str = "id, owner, date, start_time, end_time, label, available";

impl Slots {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All slots of one owner, ordered by date and start time.
    pub async fn list_owner(
        &self,
        owner: &str,
        date: Option<NaiveDate>,
    ) -> Result<Vec<Slot>, sqlx::Error> {
        let mut sql = format!("SELECT {SELECT_COLUMNS} FROM slots WHERE owner = ?");
        if date.is_some() {
            sql += " AND date = ?";
        }
        sql += " ORDER BY date ASC, start_time ASC;";

        let mut query = sqlx::query_as(&sql).bind(owner);
        if let Some(date) = date {
            query = query.bind(date.to_string());
        }

        let rows: Vec<SlotRow> = query.fetch_all(&self.pool).await?;
        rows.into_iter().map(Slot::try_from).collect()
    }

    /// All slots of the given owners on the given dates, in one statement.
    ///
    /// A single SELECT keeps the matcher's view a consistent snapshot of
    /// every participating collection.
    pub async fn list_span(
        &self,
        owners: &[String],
        dates: &[NaiveDate],
    ) -> Result<Vec<Slot>, sqlx::Error> {
        if owners.is_empty() || dates.is_empty() {
            return Ok(Vec::new());
        }

        let mut sql = format!("SELECT {SELECT_COLUMNS} FROM slots WHERE owner IN (");
        sql += &placeholders(owners.len());
        sql += ") AND date IN (";
        sql += &placeholders(dates.len());
        sql += ") ORDER BY owner ASC, date ASC, start_time ASC;";

        let mut query = sqlx::query_as(&sql);
        for owner in owners {
            query = query.bind(owner);
        }
        for date in dates {
            query = query.bind(date.to_string());
        }

        let rows: Vec<SlotRow> = query.fetch_all(&self.pool).await?;
        rows.into_iter().map(Slot::try_from).collect()
    }

    /// Load one day's collection inside the caller's transaction, ordered
    /// by start time.
    pub async fn list_day(
        tx: &mut Transaction<'_, Sqlite>,
        owner: &str,
        date: NaiveDate,
    ) -> Result<Vec<Slot>, sqlx::Error> {
        let sql = format!(
            "SELECT {SELECT_COLUMNS} FROM slots \
             WHERE owner = ? AND date = ? ORDER BY start_time ASC;"
        );

        let rows: Vec<SlotRow> = sqlx::query_as(&sql)
            .bind(owner)
            .bind(date.to_string())
            .fetch_all(&mut **tx)
            .await?;
        rows.into_iter().map(Slot::try_from).collect()
    }

    /// Persist a resolved collection by diffing it against the loaded one.
    ///
    /// Rows whose id vanished are deleted, surviving rows are rewritten,
    /// and id-less slots are inserted. Deletes run first so freed
    /// `(owner, date, start, end)` keys can be taken by the survivors.
    /// Everything happens inside the caller's transaction; a failed
    /// resolution leaves no partial state behind.
    pub async fn apply(
        tx: &mut Transaction<'_, Sqlite>,
        before: &[Slot],
        after: &[Slot],
    ) -> Result<(), sqlx::Error> {
        const DELETE_SQL: &str = "DELETE FROM slots WHERE id = ?;";
        const UPDATE_SQL: &str = "\
UPDATE slots
SET start_time = ?, end_time = ?, label = ?, available = ?
WHERE id = ?;
";
        const INSERT_SQL: &str = "\
INSERT INTO slots (owner, date, start_time, end_time, label, available)
VALUES (?, ?, ?, ?, ?, ?);
";

        let surviving: HashSet<i64> = after.iter().filter_map(|slot| slot.id).collect();
        for slot in before {
            if let Some(id) = slot.id {
                if !surviving.contains(&id) {
                    sqlx::query(DELETE_SQL).bind(id).execute(&mut **tx).await?;
                }
            }
        }

        for slot in after {
            match slot.id {
                Some(id) => {
                    sqlx::query(UPDATE_SQL)
                        .bind(slot.start.to_string())
                        .bind(slot.end.to_string())
                        .bind(&slot.label)
                        .bind(slot.available)
                        .bind(id)
                        .execute(&mut **tx)
                        .await?;
                }
                None => {
                    sqlx::query(INSERT_SQL)
                        .bind(&slot.owner)
                        .bind(slot.date.to_string())
                        .bind(slot.start.to_string())
                        .bind(slot.end.to_string())
                        .bind(&slot.label)
                        .bind(slot.available)
                        .execute(&mut **tx)
                        .await?;
                }
            }
        }

        Ok(())
    }

    /// Delete the slot exactly matching the key. Returns the rows removed.
    pub async fn delete_exact(
        tx: &mut Transaction<'_, Sqlite>,
        owner: &str,
        key: &SlotKey,
    ) -> Result<u64, sqlx::Error> {
        const SQL: &str = "\
DELETE FROM slots
WHERE owner = ? AND date = ? AND start_time = ? AND end_time = ?;
";

        let result = sqlx::query(SQL)
            .bind(owner)
            .bind(key.date.to_string())
            .bind(key.start.to_string())
            .bind(key.end.to_string())
            .execute(&mut **tx)
            .await?;
        Ok(result.rows_affected())
    }
}

#[derive(Debug, sqlx::FromRow)]
struct SlotRow {
    id: i64,
    owner: String,
    date: String,
    start_time: String,
    end_time: String,
    label: String,
    available: bool,
}

impl TryFrom<SlotRow> for Slot {
    type Error = sqlx::Error;

    fn try_from(row: SlotRow) -> Result<Self, Self::Error> {
        Ok(Slot {
            id: Some(row.id),
            owner: row.owner,
            date: row.date.parse().map_err(decode_err)?,
            start: row.start_time.parse().map_err(decode_err)?,
            end: row.end_time.parse().map_err(decode_err)?,
            label: row.label,
            available: row.available,
        })
    }
}

fn decode_err(e: chrono::ParseError) -> sqlx::Error {
    sqlx::Error::Decode(Box::new(e))
}

/// Comma-separated list of `n` bind placeholders (`?, ?, ...`).
fn placeholders(n: usize) -> String {
    std::iter::repeat("?").take(n).collect::<Vec<_>>().join(", ")
}
