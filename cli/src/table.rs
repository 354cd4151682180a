// SPDX-FileCopyrightText: 2026 TimeMesh contributors
//
// SPDX-License-Identifier: Apache-2.0

use unicode_width::UnicodeWidthStr;

/// A minimal left-aligned text table.
#[derive(Debug)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<S: Into<String>>(headers: Vec<S>) -> Self {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push<S: Into<String>>(&mut self, row: Vec<S>) {
        self.rows.push(row.into_iter().map(Into::into).collect());
    }

    pub fn render(&self) -> String {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.width()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                if let Some(width) = widths.get_mut(i) {
                    *width = (*width).max(cell.width());
                }
            }
        }

        let mut out = String::new();
        out += &render_row(&self.headers, &widths);
        out.push('\n');
        for row in &self.rows {
            out += &render_row(row, &widths);
            out.push('\n');
        }
        out
    }
}

fn render_row(cells: &[String], widths: &[usize]) -> String {
    let mut parts = Vec::with_capacity(cells.len());
    for (i, cell) in cells.iter().enumerate() {
        let width = widths.get(i).copied().unwrap_or(0);
        let padding = width.saturating_sub(cell.width());
        parts.push(format!("{cell}{}", " ".repeat(padding)));
    }
    parts.join("  ").trim_end().to_string()
}
