use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
struct CountRow {
    #[tabled(rename = "Table")]
    table: String,
    #[tabled(rename = "Rows")]
    rows: i64,
}

/// Render per-table row counts as a rounded table
pub fn stats_table(counts: &[(&str, i64)]) -> String {
    if counts.is_empty() {
        return String::new();
    }

    let rows: Vec<CountRow> = counts
        .iter()
        .map(|(table, rows)| CountRow {
            table: table.to_string(),
            rows: *rows,
        })
        .collect();

    Table::new(rows).with(Style::rounded()).to_string()
}
