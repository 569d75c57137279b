//! Human-readable index listing.

use indexscope_core::{RenderResult, Severity, TableIndexes};
use is_terminal::IsTerminal;
use owo_colors::OwoColorize;
use std::fmt::Write;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct IndexRow {
    #[tabled(rename = "Index")]
    name: String,
    #[tabled(rename = "Type")]
    method: String,
    #[tabled(rename = "Unique")]
    unique: &'static str,
    #[tabled(rename = "Cardinality")]
    cardinality: u64,
    #[tabled(rename = "Size (MB)")]
    size_mb: String,
    #[tabled(rename = "Columns")]
    columns: String,
}

/// Format the render result as a human-readable index listing with
/// optional colors.
pub fn format_table(result: &RenderResult, table: &TableIndexes, quiet: bool, use_colors: bool) -> String {
    let colored = use_colors && std::io::stdout().is_terminal();
    let mut out = String::new();

    write_header(&mut out, result, colored);

    if table.indexes.is_empty() {
        writeln!(out, "No indexes defined for this table.").unwrap();
    } else {
        let rows: Vec<IndexRow> = table
            .indexes
            .iter()
            .map(|index| IndexRow {
                name: index.name.clone(),
                method: index.method.to_string(),
                unique: if index.unique { "yes" } else { "no" },
                cardinality: index.cardinality,
                size_mb: format!("{:.2}", index.size_mb),
                columns: index
                    .columns
                    .iter()
                    .map(|c| c.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            })
            .collect();

        writeln!(out, "{}", Table::new(rows).with(Style::sharp())).unwrap();
    }

    if !quiet {
        write_issues(&mut out, result, colored);
    }

    out
}

fn write_header(out: &mut String, result: &RenderResult, colored: bool) {
    let title = format!(
        "Index structure for {}.{}",
        result.graph.schema, result.graph.table
    );
    let line = "═".repeat(50);

    if colored {
        writeln!(out, "{}", title.bold()).unwrap();
        writeln!(out, "{}", line.dimmed()).unwrap();
    } else {
        writeln!(out, "{title}").unwrap();
        writeln!(out, "{line}").unwrap();
    }

    let stats = format!(
        "Graph: {} nodes | {} edges",
        result.graph.nodes.len(),
        result.graph.edges.len()
    );
    if colored {
        writeln!(out, "{}", stats.cyan()).unwrap();
    } else {
        writeln!(out, "{stats}").unwrap();
    }
    writeln!(out).unwrap();
}

fn write_issues(out: &mut String, result: &RenderResult, colored: bool) {
    for issue in &result.issues {
        let line = format!("[{}] {}", issue.code, issue.message);
        if colored {
            match issue.severity {
                Severity::Error => writeln!(out, "{}", line.red()).unwrap(),
                Severity::Warning => writeln!(out, "{}", line.yellow()).unwrap(),
                Severity::Info => writeln!(out, "{}", line.dimmed()).unwrap(),
            }
        } else {
            writeln!(out, "{line}").unwrap();
        }
    }
}
