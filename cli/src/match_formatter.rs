// SPDX-FileCopyrightText: 2026 TimeMesh contributors
//
// SPDX-License-Identifier: Apache-2.0

use timemesh_core::MatchWindow;

use crate::parser::ArgOutputFormat;
use crate::table::Table;

/// Renders common-availability windows for terminal output.
#[derive(Debug, Clone, Copy)]
pub struct MatchFormatter {
    output_format: ArgOutputFormat,
}

impl MatchFormatter {
    pub fn new(output_format: ArgOutputFormat) -> Self {
        Self { output_format }
    }

    pub fn format(&self, windows: &[MatchWindow]) -> String {
        match self.output_format {
            ArgOutputFormat::Json => {
                serde_json::to_string_pretty(windows).unwrap_or_else(|_| "[]".to_string())
            }
            ArgOutputFormat::Table => {
                if windows.is_empty() {
                    return "No common availability found.".to_string();
                }

                let mut table = Table::new(vec!["Date", "Start", "End", "Users"]);
                for window in windows {
                    let users = window
                        .users
                        .iter()
                        .map(|entry| format!("{} ({})", entry.user, entry.label))
                        .collect::<Vec<_>>()
                        .join(", ");
                    table.push(vec![
                        window.date.to_string(),
                        window.start.to_string(),
                        window.end.to_string(),
                        users,
                    ]);
                }
                table.render()
            }
        }
    }
}
