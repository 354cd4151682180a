// SPDX-FileCopyrightText: 2026 TimeMesh contributors
//
// SPDX-License-Identifier: Apache-2.0

//! End-to-end slot lifecycle tests: creation with hour slicing, overlap
//! resolution against stored state, and batch operations.

use timemesh_core::Slot;

use crate::common::{date, draft, key, setup_temp_mesh, time};

fn assert_disjoint(slots: &[Slot]) {
    for pair in slots.windows(2) {
        assert!(
            pair[0].end <= pair[1].start,
            "stored slots overlap: {pair:?}"
        );
    }
}

#[tokio::test]
async fn create_and_list_slot() {
    // Arrange
    let mesh = setup_temp_mesh().await.unwrap();

    // Act
    let created = mesh
        .create_slot("alice", draft("2026-08-06", "09:00:00", "10:00:00", "Work"))
        .await
        .unwrap();

    // Assert
    assert_eq!(created.len(), 1);
    let slots = mesh.list_slots("alice", None).await.unwrap();
    assert_eq!(slots.len(), 1);
    assert!(slots[0].id.is_some());
    assert_eq!(slots[0].owner, "alice");
    assert_eq!(slots[0].label, "Work");
    assert!(slots[0].available);
    assert_eq!(slots[0].start, time("09:00:00"));
    assert_eq!(slots[0].end, time("10:00:00"));
}

#[tokio::test]
async fn create_reports_hour_slices() {
    let mesh = setup_temp_mesh().await.unwrap();

    let created = mesh
        .create_slot("alice", draft("2026-08-06", "08:00:00", "10:30:00", "Work"))
        .await
        .unwrap();

    // the response reports one slot per hour slice
    let bounds: Vec<(String, String)> = created
        .iter()
        .map(|s| (s.start.to_string(), s.end.to_string()))
        .collect();
    assert_eq!(
        bounds,
        vec![
            ("08:00:00".to_string(), "09:00:00".to_string()),
            ("09:00:00".to_string(), "10:00:00".to_string()),
            ("10:00:00".to_string(), "10:30:00".to_string()),
        ]
    );

    // stored state merges the same-label slices back together
    let slots = mesh.list_slots("alice", None).await.unwrap();
    assert_eq!(slots.len(), 1);
    assert_eq!(slots[0].start, time("08:00:00"));
    assert_eq!(slots[0].end, time("10:30:00"));
}

#[tokio::test]
async fn insert_inside_existing_splits_edges() {
    let mesh = setup_temp_mesh().await.unwrap();
    mesh.create_slot("alice", draft("2026-08-06", "09:00:00", "12:00:00", "Gym"))
        .await
        .unwrap();

    mesh.create_slot("alice", draft("2026-08-06", "10:00:00", "11:00:00", "Work"))
        .await
        .unwrap();

    let slots = mesh.list_slots("alice", None).await.unwrap();
    let summary: Vec<(String, String, String)> = slots
        .iter()
        .map(|s| (s.start.to_string(), s.end.to_string(), s.label.clone()))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("09:00:00".into(), "10:00:00".into(), "Gym".into()),
            ("10:00:00".into(), "11:00:00".into(), "Work".into()),
            ("11:00:00".into(), "12:00:00".into(), "Gym".into()),
        ]
    );
    assert_disjoint(&slots);
}

#[tokio::test]
async fn contained_overwrite_keeps_row_identity() {
    let mesh = setup_temp_mesh().await.unwrap();
    mesh.create_slot("alice", draft("2026-08-06", "09:00:00", "09:30:00", "Gym"))
        .await
        .unwrap();
    let original = mesh.list_slots("alice", None).await.unwrap();
    let original_id = original[0].id;

    // the new slot fully covers the old one, so the row is rewritten
    mesh.create_slot("alice", draft("2026-08-06", "09:00:00", "10:00:00", "Work"))
        .await
        .unwrap();

    let slots = mesh.list_slots("alice", None).await.unwrap();
    assert_eq!(slots.len(), 1);
    assert_eq!(slots[0].id, original_id);
    assert_eq!(slots[0].label, "Work");
    assert_eq!(slots[0].start, time("09:00:00"));
    assert_eq!(slots[0].end, time("10:00:00"));
}

#[tokio::test]
async fn residuals_keep_label_and_availability() {
    let mesh = setup_temp_mesh().await.unwrap();
    let mut blocked = draft("2026-08-06", "09:00:00", "12:00:00", "Blocked");
    blocked.available = false;
    mesh.create_slot("alice", blocked).await.unwrap();

    mesh.create_slot("alice", draft("2026-08-06", "10:00:00", "11:00:00", "Work"))
        .await
        .unwrap();

    let slots = mesh.list_slots("alice", None).await.unwrap();
    assert_eq!(slots.len(), 3);
    assert_eq!(slots[0].label, "Blocked");
    assert!(!slots[0].available);
    assert!(slots[1].available);
    assert_eq!(slots[2].label, "Blocked");
    assert!(!slots[2].available);
}

#[tokio::test]
async fn adjacent_same_label_creates_merge() {
    let mesh = setup_temp_mesh().await.unwrap();
    mesh.create_slot("alice", draft("2026-08-06", "08:00:00", "09:00:00", "Work"))
        .await
        .unwrap();
    let first_id = mesh.list_slots("alice", None).await.unwrap()[0].id;

    mesh.create_slot("alice", draft("2026-08-06", "09:00:00", "10:00:00", "Work"))
        .await
        .unwrap();

    let slots = mesh.list_slots("alice", None).await.unwrap();
    assert_eq!(slots.len(), 1);
    assert_eq!(slots[0].id, first_id);
    assert_eq!(slots[0].start, time("08:00:00"));
    assert_eq!(slots[0].end, time("10:00:00"));
}

#[tokio::test]
async fn no_overlap_invariant_across_create_sequence() {
    let mesh = setup_temp_mesh().await.unwrap();
    let inserts = [
        ("09:00:00", "10:00:00", "A"),
        ("09:30:00", "10:30:00", "B"),
        ("08:00:00", "12:00:00", "C"),
        ("08:30:00", "08:45:00", "D"),
        ("11:00:00", "11:30:00", "E"),
    ];

    for (start, end, label) in inserts {
        mesh.create_slot("alice", draft("2026-08-06", start, end, label))
            .await
            .unwrap();
        let slots = mesh.list_slots("alice", None).await.unwrap();
        assert_disjoint(&slots);
    }
}

#[tokio::test]
async fn dates_are_isolated() {
    let mesh = setup_temp_mesh().await.unwrap();
    mesh.create_slot("alice", draft("2026-08-06", "09:00:00", "10:00:00", "Work"))
        .await
        .unwrap();
    // same times on the next day must not interact with the first
    mesh.create_slot("alice", draft("2026-08-07", "09:00:00", "10:00:00", "Work"))
        .await
        .unwrap();

    let all = mesh.list_slots("alice", None).await.unwrap();
    assert_eq!(all.len(), 2);

    let day_one = mesh
        .list_slots("alice", Some(date("2026-08-06")))
        .await
        .unwrap();
    assert_eq!(day_one.len(), 1);
    assert_eq!(day_one[0].date, date("2026-08-06"));
}

#[tokio::test]
async fn owners_are_isolated() {
    let mesh = setup_temp_mesh().await.unwrap();
    mesh.create_slot("alice", draft("2026-08-06", "09:00:00", "12:00:00", "Work"))
        .await
        .unwrap();
    mesh.create_slot("bob", draft("2026-08-06", "10:00:00", "11:00:00", "Study"))
        .await
        .unwrap();

    // bob's insert must not split alice's slot
    let alice = mesh.list_slots("alice", None).await.unwrap();
    assert_eq!(alice.len(), 1);
    let bob = mesh.list_slots("bob", None).await.unwrap();
    assert_eq!(bob.len(), 1);
}

#[tokio::test]
async fn batch_create_reports_partial_failure() {
    let mesh = setup_temp_mesh().await.unwrap();
    let drafts = vec![
        draft("2026-08-06", "09:00:00", "10:00:00", "Work"),
        draft("2026-08-06", "11:00:00", "10:00:00", "Backwards"),
        draft("2026-08-06", "13:00:00", "14:00:00", "   "),
    ];

    let report = mesh.create_slots("alice", drafts).await.unwrap();
    assert_eq!(report.created.len(), 1);
    assert_eq!(report.errors.len(), 2);
    assert!(report.errors[0].error.contains("end time"));
    assert!(report.errors[1].error.contains("label"));

    // the valid item landed despite the failures
    let slots = mesh.list_slots("alice", None).await.unwrap();
    assert_eq!(slots.len(), 1);
}

#[tokio::test]
async fn batch_delete_reports_missing_keys() {
    let mesh = setup_temp_mesh().await.unwrap();
    mesh.create_slot("alice", draft("2026-08-06", "09:00:00", "10:00:00", "Work"))
        .await
        .unwrap();

    let report = mesh
        .delete_slots(
            "alice",
            vec![
                key("2026-08-06", "09:00:00", "10:00:00"),
                key("2026-08-06", "23:00:00", "23:30:00"),
            ],
        )
        .await
        .unwrap();

    assert_eq!(report.deleted, 1);
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].error, "Slot not found");
    assert_eq!(report.errors[0].slot, key("2026-08-06", "23:00:00", "23:30:00"));

    assert!(mesh.list_slots("alice", None).await.unwrap().is_empty());
}

#[tokio::test]
async fn delete_only_touches_exact_matches() {
    let mesh = setup_temp_mesh().await.unwrap();
    mesh.create_slot("alice", draft("2026-08-06", "09:00:00", "10:00:00", "Work"))
        .await
        .unwrap();

    // a key covering half the slot is not an exact match
    let report = mesh
        .delete_slots("alice", vec![key("2026-08-06", "09:00:00", "09:30:00")])
        .await
        .unwrap();
    assert_eq!(report.deleted, 0);
    assert_eq!(report.errors.len(), 1);
    assert_eq!(mesh.list_slots("alice", None).await.unwrap().len(), 1);
}
