// Copyright 2025 Lablup Inc. and Jeongkyu Shin
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Borderless target tables for listings and the selection prompt.

use owo_colors::OwoColorize;
use unicode_width::UnicodeWidthStr;

use crate::target::Target;

/// Gap between columns.
const COLUMN_GAP: &str = "  ";

#[derive(Debug, Clone, Copy)]
enum Style {
    Plain,
    Bold,
    Green,
    BoldBlue,
    Dimmed,
}

impl Style {
    fn paint(self, text: &str) -> String {
        match self {
            Style::Plain => text.to_string(),
            Style::Bold => text.bold().to_string(),
            Style::Green => text.green().to_string(),
            Style::BoldBlue => text.blue().bold().to_string(),
            Style::Dimmed => text.dimmed().to_string(),
        }
    }
}

/// Table used by the selection prompt: index, name, group, address.
pub fn selection_table(targets: &[Target], use_colors: bool) -> String {
    let rows = index_rows(targets);
    render(
        &rows,
        &[Style::Bold, Style::Green, Style::Plain, Style::BoldBlue],
        use_colors,
    )
}

/// Table used by `list`: same columns with a header row.
pub fn listing_table(targets: &[Target], use_colors: bool) -> String {
    let mut rows = vec![vec![
        "#".to_string(),
        "NAME".to_string(),
        "GROUP".to_string(),
        "ADDRESS".to_string(),
    ]];
    rows.extend(index_rows(targets));

    let widths = widths(&rows);
    let styles = [Style::Bold, Style::Green, Style::Plain, Style::BoldBlue];
    let mut table = String::new();
    for (i, row) in rows.iter().enumerate() {
        let line = if i == 0 {
            render_row(row, &widths, &[Style::Dimmed; 4], use_colors)
        } else {
            render_row(row, &widths, &styles, use_colors)
        };
        table.push_str(&line);
        table.push('\n');
    }
    table
}

fn index_rows(targets: &[Target]) -> Vec<Vec<String>> {
    targets
        .iter()
        .enumerate()
        .map(|(i, target)| {
            vec![
                (i + 1).to_string(),
                target.display_name().to_string(),
                target.display_group().to_string(),
                target.address.clone(),
            ]
        })
        .collect()
}

fn widths(rows: &[Vec<String>]) -> Vec<usize> {
    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    (0..columns)
        .map(|col| {
            rows.iter()
                .filter_map(|row| row.get(col))
                .map(|cell| cell.width())
                .max()
                .unwrap_or(0)
        })
        .collect()
}

fn render(rows: &[Vec<String>], styles: &[Style], use_colors: bool) -> String {
    let widths = widths(rows);
    let mut table = String::new();
    for row in rows {
        table.push_str(&render_row(row, &widths, styles, use_colors));
        table.push('\n');
    }
    table
}

fn render_row(row: &[String], widths: &[usize], styles: &[Style], use_colors: bool) -> String {
    let last = row.len().saturating_sub(1);
    let cells: Vec<String> = row
        .iter()
        .enumerate()
        .map(|(col, cell)| {
            // Pad on the raw text; escape codes have no display width
            let padding = if col == last {
                0
            } else {
                widths.get(col).copied().unwrap_or(0).saturating_sub(cell.width())
            };
            let styled = match styles.get(col) {
                Some(style) if use_colors && !cell.is_empty() => style.paint(cell),
                _ => cell.clone(),
            };
            format!("{styled}{}", " ".repeat(padding))
        })
        .collect();

    format!("{COLUMN_GAP}{}", cells.join(COLUMN_GAP))
        .trim_end()
        .to_string()
}
