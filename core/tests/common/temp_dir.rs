// SPDX-FileCopyrightText: 2026 TimeMesh contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Temporary state directory management for integration tests.

use std::error::Error;

use timemesh_core::{Config, TimeMesh};

/// Creates a TimeMesh instance backed by a fresh temporary state
/// directory, so every test runs against an empty database.
pub async fn setup_temp_mesh() -> Result<TimeMesh, Box<dyn Error>> {
    let state_dir = tempfile::tempdir()?.keep();
    let config = Config {
        state_dir: Some(state_dir),
    };
    Ok(TimeMesh::new(config).await?)
}
