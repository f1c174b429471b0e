use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use escape_cli::types::MergeResult;
use escape_core::RunSummary;

pub fn print_summary(result: &MergeResult) {
    println!("Data: {}", result.data_dir.display());
    println!("{}", summary_table(&result.summary));
    println!("Escape data: {}", result.outputs.escape_data.display());
    println!("Studies: {}", result.outputs.studies.display());
}

fn summary_table(summary: &RunSummary) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Study"),
        header_cell("Citation"),
        header_cell("Conditions"),
        header_cell("Rows"),
        header_cell("Kept"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 2..5 {
        align_column(&mut table, index, CellAlignment::Right);
    }

    for study in &summary.studies {
        table.add_row(vec![
            Cell::new(&study.study).fg(Color::Blue),
            Cell::new(&study.citation),
            Cell::new(study.conditions),
            Cell::new(study.rows_joined),
            kept_cell(study.rows_kept, study.rows_joined),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(format!("{} studies", summary.studies.len()))
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(summary.studies.iter().map(|s| s.conditions).sum::<usize>())
            .add_attribute(Attribute::Bold),
        Cell::new(summary.total_rows_joined()).add_attribute(Attribute::Bold),
        Cell::new(summary.total_rows_kept()).add_attribute(Attribute::Bold),
    ]);
    table
}

// Studies that lost rows to the cocktail filter stand out.
fn kept_cell(kept: usize, joined: usize) -> Cell {
    if kept < joined {
        Cell::new(kept).fg(Color::Yellow)
    } else {
        Cell::new(kept)
    }
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}
