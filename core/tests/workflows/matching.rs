// SPDX-FileCopyrightText: 2026 TimeMesh contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Availability matching workflows: explicit user lists, group-scoped
//! matching with authorization, and date-range queries.

use timemesh_core::{DateSpan, TimeMeshError};

use crate::common::{date, draft, setup_temp_mesh};

#[tokio::test]
async fn two_users_share_one_window() {
    // Arrange: alice 09:00-11:00 "Work", bob 10:00-12:00 "Study"
    let mesh = setup_temp_mesh().await.unwrap();
    mesh.create_slot("alice", draft("2026-08-06", "09:00:00", "11:00:00", "Work"))
        .await
        .unwrap();
    mesh.create_slot("bob", draft("2026-08-06", "10:00:00", "12:00:00", "Study"))
        .await
        .unwrap();

    // Act
    let windows = mesh
        .match_users(
            &["alice".to_string(), "bob".to_string()],
            date("2026-08-06"),
        )
        .await
        .unwrap();

    // Assert: exactly the 10:00-11:00 intersection, labels per user
    assert_eq!(windows.len(), 1);
    assert_eq!(windows[0].start.to_string(), "10:00:00");
    assert_eq!(windows[0].end.to_string(), "11:00:00");
    assert_eq!(windows[0].users.len(), 2);
    assert_eq!(windows[0].users[0].user, "alice");
    assert_eq!(windows[0].users[0].label, "Work");
    assert_eq!(windows[0].users[1].user, "bob");
    assert_eq!(windows[0].users[1].label, "Study");
}

#[tokio::test]
async fn entries_follow_query_order() {
    let mesh = setup_temp_mesh().await.unwrap();
    mesh.create_slot("alice", draft("2026-08-06", "09:00:00", "11:00:00", "Work"))
        .await
        .unwrap();
    mesh.create_slot("bob", draft("2026-08-06", "09:00:00", "11:00:00", "Study"))
        .await
        .unwrap();

    let windows = mesh
        .match_users(
            &["bob".to_string(), "alice".to_string()],
            date("2026-08-06"),
        )
        .await
        .unwrap();
    assert_eq!(windows[0].users[0].user, "bob");
    assert_eq!(windows[0].users[1].user, "alice");
}

#[tokio::test]
async fn fewer_than_two_parties_is_empty() {
    let mesh = setup_temp_mesh().await.unwrap();
    mesh.create_slot("alice", draft("2026-08-06", "09:00:00", "11:00:00", "Work"))
        .await
        .unwrap();

    let windows = mesh
        .match_users(&["alice".to_string()], date("2026-08-06"))
        .await
        .unwrap();
    assert!(windows.is_empty());

    // duplicates collapse to a single party
    let windows = mesh
        .match_users(
            &["alice".to_string(), "alice".to_string()],
            date("2026-08-06"),
        )
        .await
        .unwrap();
    assert!(windows.is_empty());
}

#[tokio::test]
async fn empty_user_list_is_a_validation_error() {
    let mesh = setup_temp_mesh().await.unwrap();
    let err = mesh.match_users(&[], date("2026-08-06")).await.unwrap_err();
    assert!(matches!(err, TimeMeshError::Validation { field: "users", .. }));
}

#[tokio::test]
async fn listed_user_without_slots_blocks_all_windows() {
    let mesh = setup_temp_mesh().await.unwrap();
    mesh.create_slot("alice", draft("2026-08-06", "09:00:00", "11:00:00", "Work"))
        .await
        .unwrap();
    mesh.create_slot("bob", draft("2026-08-06", "09:00:00", "11:00:00", "Study"))
        .await
        .unwrap();

    let windows = mesh
        .match_users(
            &[
                "alice".to_string(),
                "bob".to_string(),
                "carol".to_string(),
            ],
            date("2026-08-06"),
        )
        .await
        .unwrap();
    assert!(windows.is_empty());
}

#[tokio::test]
async fn explicit_match_includes_busy_slots() {
    let mesh = setup_temp_mesh().await.unwrap();
    mesh.create_slot("alice", draft("2026-08-06", "09:00:00", "11:00:00", "Work"))
        .await
        .unwrap();
    let mut busy = draft("2026-08-06", "09:00:00", "11:00:00", "Blocked");
    busy.available = false;
    mesh.create_slot("bob", busy).await.unwrap();

    let windows = mesh
        .match_users(
            &["alice".to_string(), "bob".to_string()],
            date("2026-08-06"),
        )
        .await
        .unwrap();
    assert_eq!(windows.len(), 1);
    assert_eq!(windows[0].users[1].label, "Blocked");
}

#[tokio::test]
async fn group_match_requires_membership() {
    let mesh = setup_temp_mesh().await.unwrap();
    mesh.add_group_member("team-1", "alice").await.unwrap();
    mesh.add_group_member("team-1", "bob").await.unwrap();

    let err = mesh
        .match_group("team-1", "carol", DateSpan::Single(date("2026-08-06")))
        .await
        .unwrap_err();
    assert!(matches!(err, TimeMeshError::Forbidden));
}

#[tokio::test]
async fn group_match_finds_member_windows() {
    let mesh = setup_temp_mesh().await.unwrap();
    mesh.add_group_member("team-1", "alice").await.unwrap();
    mesh.add_group_member("team-1", "bob").await.unwrap();
    mesh.create_slot("alice", draft("2026-08-06", "09:00:00", "11:00:00", "Work"))
        .await
        .unwrap();
    mesh.create_slot("bob", draft("2026-08-06", "10:00:00", "12:00:00", "Study"))
        .await
        .unwrap();

    let windows = mesh
        .match_group("team-1", "alice", DateSpan::Single(date("2026-08-06")))
        .await
        .unwrap();
    assert_eq!(windows.len(), 1);
    assert_eq!(windows[0].start.to_string(), "10:00:00");
    assert_eq!(windows[0].end.to_string(), "11:00:00");
}

#[tokio::test]
async fn group_match_ignores_busy_slots() {
    let mesh = setup_temp_mesh().await.unwrap();
    mesh.add_group_member("team-1", "alice").await.unwrap();
    mesh.add_group_member("team-1", "bob").await.unwrap();
    mesh.create_slot("alice", draft("2026-08-06", "09:00:00", "11:00:00", "Work"))
        .await
        .unwrap();
    let mut busy = draft("2026-08-06", "09:00:00", "11:00:00", "Blocked");
    busy.available = false;
    mesh.create_slot("bob", busy).await.unwrap();

    let windows = mesh
        .match_group("team-1", "alice", DateSpan::Single(date("2026-08-06")))
        .await
        .unwrap();
    assert!(windows.is_empty());
}

#[tokio::test]
async fn group_match_spans_multiple_days() {
    let mesh = setup_temp_mesh().await.unwrap();
    mesh.add_group_member("team-1", "alice").await.unwrap();
    mesh.add_group_member("team-1", "bob").await.unwrap();
    for day in ["2026-08-06", "2026-08-07"] {
        mesh.create_slot("alice", draft(day, "09:00:00", "10:00:00", "Work"))
            .await
            .unwrap();
        mesh.create_slot("bob", draft(day, "09:30:00", "10:30:00", "Study"))
            .await
            .unwrap();
    }

    let windows = mesh
        .match_group(
            "team-1",
            "alice",
            DateSpan::Range {
                start: date("2026-08-06"),
                end: date("2026-08-08"),
            },
        )
        .await
        .unwrap();
    assert_eq!(windows.len(), 2);
    assert_eq!(windows[0].date, date("2026-08-06"));
    assert_eq!(windows[1].date, date("2026-08-07"));
}

#[tokio::test]
async fn group_match_rejects_overlong_range() {
    let mesh = setup_temp_mesh().await.unwrap();
    mesh.add_group_member("team-1", "alice").await.unwrap();

    // 32 days, rejected before any query
    let err = mesh
        .match_group(
            "team-1",
            "alice",
            DateSpan::Range {
                start: date("2026-08-01"),
                end: date("2026-09-01"),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        TimeMeshError::Validation {
            field: "end_date",
            ..
        }
    ));
}

#[tokio::test]
async fn group_match_rejects_inverted_range() {
    let mesh = setup_temp_mesh().await.unwrap();
    let err = mesh
        .match_group(
            "team-1",
            "alice",
            DateSpan::Range {
                start: date("2026-08-07"),
                end: date("2026-08-06"),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, TimeMeshError::Validation { .. }));
}

#[tokio::test]
async fn group_members_visible_to_members_only() {
    let mesh = setup_temp_mesh().await.unwrap();
    mesh.add_group_member("team-1", "bob").await.unwrap();
    mesh.add_group_member("team-1", "alice").await.unwrap();

    let members = mesh.group_members("team-1", "alice").await.unwrap();
    assert_eq!(members, vec!["alice".to_string(), "bob".to_string()]);

    let err = mesh.group_members("team-1", "carol").await.unwrap_err();
    assert!(matches!(err, TimeMeshError::Forbidden));
}
