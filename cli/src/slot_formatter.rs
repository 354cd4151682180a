// SPDX-FileCopyrightText: 2026 TimeMesh contributors
//
// SPDX-License-Identifier: Apache-2.0

use timemesh_core::Slot;

use crate::parser::ArgOutputFormat;
use crate::table::Table;

/// Renders slot lists for terminal output.
#[derive(Debug, Clone, Copy)]
pub struct SlotFormatter {
    output_format: ArgOutputFormat,
}

impl SlotFormatter {
    pub fn new(output_format: ArgOutputFormat) -> Self {
        Self { output_format }
    }

    pub fn format(&self, slots: &[Slot]) -> String {
        match self.output_format {
            ArgOutputFormat::Json => {
                serde_json::to_string_pretty(slots).unwrap_or_else(|_| "[]".to_string())
            }
            ArgOutputFormat::Table => {
                if slots.is_empty() {
                    return "No slots found.".to_string();
                }

                let mut table = Table::new(vec!["Date", "Start", "End", "Label", "Available"]);
                for slot in slots {
                    table.push(vec![
                        slot.date.to_string(),
                        format_time(&slot.start.to_string()),
                        format_time(&slot.end.to_string()),
                        slot.label.clone(),
                        if slot.available { "yes".to_string() } else { "no".to_string() },
                    ]);
                }
                table.render()
            }
        }
    }
}

/// Display seconds only when they carry information.
fn format_time(time: &str) -> String {
    time.strip_suffix(":00").unwrap_or(time).to_string()
}
