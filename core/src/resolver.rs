// SPDX-FileCopyrightText: 2026 TimeMesh contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Overlap resolution for per-day slot collections.
//!
//! The resolver is a pure function of a candidate slot and the existing
//! collection for the same `(owner, date)`. It returns the replacement
//! collection: the candidate is present, overshadowed edges of existing
//! slots survive as residuals, and adjacent same-label slots are merged.
//! Overlap is a transient input condition only; the output never contains
//! one.

use chrono::NaiveTime;

use crate::error::{Result, TimeMeshError};
use crate::slot::Slot;

/// Resolve `candidate` against the existing collection.
///
/// `existing` must be the full collection for the candidate's
/// `(owner, date)`, sorted by start. Returns the new collection, sorted by
/// start, with no overlaps remaining.
///
/// Two policies apply, decided by how the overlapped slots sit relative to
/// the candidate:
///
/// * every overlapped slot lies fully inside the candidate: the first
///   overlapped slot (lowest start) keeps its row identity and takes the
///   candidate's bounds, label and availability; the rest are dropped.
/// * anything else: all overlapped slots are dropped, the candidate is
///   inserted, and the uncovered edges are re-emitted as residuals with
///   their original label and availability.
pub fn resolve(candidate: Slot, existing: &[Slot]) -> Vec<Slot> {
    if existing.is_empty() {
        return vec![candidate];
    }

    let (overlapped, kept): (Vec<Slot>, Vec<Slot>) = existing
        .iter()
        .cloned()
        .partition(|slot| slot.overlaps(&candidate));

    let mut next = kept;
    if overlapped.is_empty() {
        next.push(candidate);
    } else if overlapped
        .iter()
        .all(|e| e.start >= candidate.start && e.end <= candidate.end)
    {
        // contained overwrite: reuse the first overlapped row's identity
        let mut iter = overlapped.into_iter();
        if let Some(mut target) = iter.next() {
            target.start = candidate.start;
            target.end = candidate.end;
            target.label = candidate.label;
            target.available = candidate.available;
            next.push(target);
        }
    } else {
        for e in &overlapped {
            if e.start < candidate.start {
                next.push(residual(e, e.start, candidate.start));
            }
            if e.end > candidate.end {
                next.push(residual(e, candidate.end, e.end));
            }
        }
        next.push(candidate);
    }

    next.sort_by(|a, b| a.start.cmp(&b.start));
    merge_adjacent(next)
}

fn residual(source: &Slot, start: NaiveTime, end: NaiveTime) -> Slot {
    Slot {
        id: None,
        owner: source.owner.clone(),
        date: source.date,
        start,
        end,
        label: source.label.clone(),
        available: source.available,
    }
}

/// Merge consecutive slots that touch and share label and availability.
///
/// `slots` must be sorted by start. The linear pass is re-run until it
/// makes no change, so the result is stable and the pass is idempotent on
/// already-merged input. A merged pair keeps the earlier slot's row id.
pub fn merge_adjacent(mut slots: Vec<Slot>) -> Vec<Slot> {
    loop {
        let mut merged: Vec<Slot> = Vec::with_capacity(slots.len());
        let mut changed = false;
        for slot in slots {
            match merged.last_mut() {
                Some(last)
                    if last.end == slot.start
                        && last.label == slot.label
                        && last.available == slot.available =>
                {
                    last.end = slot.end;
                    changed = true;
                }
                _ => merged.push(slot),
            }
        }
        if !changed {
            return merged;
        }
        slots = merged;
    }
}

/// Check the stored non-overlap invariant on a collection sorted by start.
///
/// A violation is a defect in the store, not an expected runtime condition:
/// it is logged at error level and surfaced as
/// [`TimeMeshError::CorruptCollection`], never silently repaired.
pub fn ensure_disjoint(slots: &[Slot]) -> Result<()> {
    for pair in slots.windows(2) {
        if pair[0].end > pair[1].start {
            let slot = &pair[1];
            tracing::error!(
                owner = %slot.owner,
                date = %slot.date,
                "stored slots overlap"
            );
            return Err(TimeMeshError::CorruptCollection {
                owner: slot.owner.clone(),
                date: slot.date,
            });
        }
    }
    Ok(())
}
