use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use cca_cli::types::{ProductStatus, RunSummary};

pub fn print_summary(summary: &RunSummary) {
    println!("Data directory: {}", summary.data_dir.display());
    println!("{}", summary_table(summary));
}

fn summary_table(summary: &RunSummary) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Product"),
        header_cell("Records"),
        header_cell("Notes"),
        header_cell("Output"),
    ]);
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    if let Some(column) = table.column_mut(1) {
        column.set_cell_alignment(CellAlignment::Right);
    }

    for product in &summary.products {
        let (records, output, mut notes) = match &product.status {
            ProductStatus::Written { records, path } => (
                Cell::new(records),
                Cell::new(path.display()),
                Vec::new(),
            ),
            ProductStatus::Skipped { reason } => (
                dim_cell("-"),
                dim_cell("-"),
                vec![format!("skipped: {reason}")],
            ),
        };
        notes.extend(product.notes.iter().cloned());
        let notes = if notes.is_empty() {
            dim_cell("-")
        } else {
            Cell::new(notes.join("; "))
        };
        table.add_row(vec![
            Cell::new(&product.product).add_attribute(Attribute::Bold),
            records,
            notes,
            output,
        ]);
    }
    table
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cca_cli::types::ProductSummary;
    use std::path::PathBuf;

    #[test]
    fn test_summary_lists_skipped_products() {
        let mut summary = RunSummary::new(PathBuf::from("data"));
        summary.products.push(
            ProductSummary::written("env_wasmun", 12, PathBuf::from("data/external/a.csv"))
                .with_note("3 missing or non-numeric cells dropped"),
        );
        summary
            .products
            .push(ProductSummary::skipped("survey microdata", "data/raw/md.csv not found"));

        let rendered = summary_table(&summary).to_string();
        assert!(rendered.contains("env_wasmun"));
        assert!(rendered.contains("skipped"));
        assert!(rendered.contains("12"));
    }
}
