use comfy_table::{presets, CellAlignment, ContentArrangement, Table};
use serde::Serialize;

use crate::app::GlobalOptions;

/// Print `data` as JSON (if `--json`) or call `display_fn` for human-readable output.
pub fn print_output<T: Serialize>(
    data: &T,
    opts: &GlobalOptions,
    display_fn: impl FnOnce(&T),
) -> anyhow::Result<()> {
    if opts.json {
        let json = serde_json::to_string_pretty(data)?;
        println!("{json}");
    } else {
        display_fn(data);
    }
    Ok(())
}

/// Whitespace-aligned two column listing of `label: value` pairs.
pub struct FieldWriter {
    table: Table,
    indent: String,
}

impl FieldWriter {
    pub fn new() -> Self {
        let mut table = Table::new();
        table
            .load_preset(presets::NOTHING)
            .set_content_arrangement(ContentArrangement::Dynamic);

        Self {
            table,
            indent: String::new(),
        }
    }

    /// Set the indent prefix for every line (e.g. `"  "` for 2-space indent).
    pub fn indent(mut self, prefix: &str) -> Self {
        self.indent = prefix.to_string();
        self
    }

    /// Add a field. Absent values are skipped.
    pub fn field(&mut self, label: &str, value: Option<impl ToString>) {
        if let Some(value) = value {
            self.table.add_row(vec![format!("{label}:"), value.to_string()]);
        }
    }

    /// Print the listing to stdout.
    pub fn print(&mut self) {
        // First column: no left padding. Last column: no right padding.
        for (i, padding) in [(0, 1), (1, 0)].into_iter().enumerate() {
            if let Some(col) = self.table.column_mut(i) {
                col.set_cell_alignment(CellAlignment::Left);
                col.set_padding(padding);
            }
        }

        let output = self.table.to_string();
        for line in output.lines() {
            let trimmed = line.trim_end();
            if self.indent.is_empty() {
                println!("{trimmed}");
            } else {
                println!("{}{trimmed}", self.indent);
            }
        }
    }
}
