// SPDX-FileCopyrightText: 2026 TimeMesh contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Common-availability matching across users.
//!
//! A match query asks: on a given date, which sub-intervals are covered by
//! a slot of every queried user? The matcher sweeps the breakpoints (every
//! start and end among the collected slots) and reports one window per
//! breakpoint pair that all users cover. Windows are computed fresh per
//! query and never persisted.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

use crate::slot::Slot;

/// One user's covering slot label within a match window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchEntry {
    pub user: String,
    pub label: String,
}

/// A sub-interval of one date covered by every queried user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchWindow {
    pub date: NaiveDate,
    #[serde(rename = "start_time")]
    pub start: NaiveTime,
    #[serde(rename = "end_time")]
    pub end: NaiveTime,

    /// One entry per queried user, in query order.
    pub users: Vec<MatchEntry>,
}

/// De-duplicate a user list, preserving first-seen order.
pub fn dedup_users(users: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(users.len());
    for user in users {
        if seen.insert(user.clone()) {
            out.push(user.clone());
        }
    }
    out
}

/// Compute all common-availability windows on `date`.
///
/// `users` is the ordered, de-duplicated query list. `slots_by_user` maps
/// each user to their slots, possibly spanning several dates; only slots
/// on `date` participate. With `available_only`, slots flagged unavailable
/// are ignored (the group-scoped variant).
///
/// Fewer than two users holding any slot that day yields no windows.
/// Contiguous identical windows are reported separately, one per
/// breakpoint pair; they are not coalesced.
pub fn match_date(
    users: &[String],
    slots_by_user: &BTreeMap<String, Vec<Slot>>,
    date: NaiveDate,
    available_only: bool,
) -> Vec<MatchWindow> {
    let collected: Vec<(&String, Vec<&Slot>)> = users
        .iter()
        .map(|user| {
            let slots = slots_by_user
                .get(user)
                .map(|slots| {
                    slots
                        .iter()
                        .filter(|s| s.date == date && (!available_only || s.available))
                        .collect()
                })
                .unwrap_or_default();
            (user, slots)
        })
        .collect();

    let holding = collected.iter().filter(|(_, s)| !s.is_empty()).count();
    if holding < 2 {
        return Vec::new();
    }

    let mut breakpoints = BTreeSet::new();
    for (_, slots) in &collected {
        for slot in slots {
            breakpoints.insert(slot.start);
            breakpoints.insert(slot.end);
        }
    }
    let breakpoints: Vec<NaiveTime> = breakpoints.into_iter().collect();

    let mut windows = Vec::new();
    'pairs: for pair in breakpoints.windows(2) {
        let (lo, hi) = (pair[0], pair[1]);
        let mut entries = Vec::with_capacity(collected.len());
        for (user, slots) in &collected {
            match slots.iter().find(|slot| slot.covers(lo, hi)) {
                Some(slot) => entries.push(MatchEntry {
                    user: (*user).clone(),
                    label: slot.label.clone(),
                }),
                None => continue 'pairs,
            }
        }
        windows.push(MatchWindow {
            date,
            start: lo,
            end: hi,
            users: entries,
        });
    }
    windows
}

/// Run [`match_date`] over several days, concatenating the results.
pub fn match_span(
    users: &[String],
    slots_by_user: &BTreeMap<String, Vec<Slot>>,
    days: &[NaiveDate],
    available_only: bool,
) -> Vec<MatchWindow> {
    days.iter()
        .flat_map(|day| match_date(users, slots_by_user, *day, available_only))
        .collect()
}
