//! Pipeline stages run by the `cca-tidy` commands.
//!
//! Each product is computed completely in memory before its file is written,
//! so a failing stage never leaves a partial output behind.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use cca_ingest::{DataSource, fetch_wide_table, load_microdata};
use cca_model::{SeriesDefinition, SeriesPoint};
use cca_output::{
    OutputTable, category_table, indicator_table, joined_table, series_table, write_table,
};
use cca_transform::{
    CoerceOutcome, category_shares, coerce_values, filter_records, indicator_columns,
    indicator_shares, melt, outer_join, project_series, resolve_weights,
};

use crate::config::PipelineConfig;
use crate::types::{ProductSummary, RunSummary};

/// A series reduced to its points, with the number of unusable cells.
#[derive(Debug, Clone, PartialEq)]
pub struct TidySeries {
    pub points: Vec<SeriesPoint>,
    pub dropped: usize,
}

/// Fetches one dataset and reduces it to `(group, period, value)` points.
pub fn tidy_series(
    source: &dyn DataSource,
    definition: &SeriesDefinition,
    group_column: &str,
) -> Result<TidySeries> {
    let span = info_span!("series", dataset = %definition.dataset);
    let _guard = span.enter();

    let table = fetch_wide_table(source, definition)
        .with_context(|| format!("load dataset {}", definition.dataset))?;
    let CoerceOutcome { records, dropped } = coerce_values(melt(&table));
    let records = filter_records(records, &definition.filter);
    let points = project_series(&records, group_column);
    info!(points = points.len(), dropped, "series tidied");

    Ok(TidySeries { points, dropped })
}

fn write_product(table: &OutputTable, path: PathBuf) -> Result<PathBuf> {
    write_table(table, &path).with_context(|| format!("write {}", path.display()))?;
    Ok(path)
}

fn dropped_note(dropped: usize) -> Option<String> {
    (dropped > 0).then(|| format!("{dropped} missing or non-numeric cells dropped"))
}

/// Retrieves both statistical series, writes each of them and their outer
/// join.
pub fn run_statistical_series(
    config: &PipelineConfig,
    source: &dyn DataSource,
) -> Result<RunSummary> {
    let span = info_span!("statistical_series", source = source.name());
    let _guard = span.enter();
    let join = &config.join;

    let left = tidy_series(source, &config.left, &join.group_column)?;
    let right = tidy_series(source, &config.right, &join.group_column)?;
    let outcome = outer_join(&left.points, &right.points);

    let mut summary = RunSummary::new(config.data_dir.clone());
    for (definition, series) in [(&config.left, &left), (&config.right, &right)] {
        let table = series_table(
            &series.points,
            &join.group_column,
            &join.period_column,
            &definition.measure,
        );
        let path = write_product(&table, config.resolve(&definition.output))?;
        let mut product = ProductSummary::written(&definition.dataset, table.len(), path);
        if let Some(note) = dropped_note(series.dropped) {
            product = product.with_note(note);
        }
        summary.products.push(product);
    }

    let table = joined_table(
        &outcome.records,
        &join.group_column,
        &join.period_column,
        &config.left.measure,
        &config.right.measure,
    );
    let path = write_product(&table, config.resolve(&join.output))?;
    let mut product = ProductSummary::written(
        format!("{} + {}", config.left.dataset, config.right.dataset),
        table.len(),
        path,
    );
    if outcome.duplicates > 0 {
        product = product.with_note(format!(
            "{} duplicate keys ignored",
            outcome.duplicates
        ));
    }
    summary.products.push(product);

    Ok(summary)
}

/// Aggregates the optional survey microdata into its share products.
///
/// A missing microdata file, category column or indicator set skips the
/// affected product instead of failing the run.
pub fn run_microdata(config: &PipelineConfig) -> Result<RunSummary> {
    let definition = &config.microdata;
    let path = config.resolve(&definition.path);
    let span = info_span!("microdata", path = %path.display());
    let _guard = span.enter();

    let mut summary = RunSummary::new(config.data_dir.clone());
    let Some(data) = load_microdata(&path, definition.separator)
        .with_context(|| format!("load microdata {}", path.display()))?
    else {
        info!(path = %path.display(), "microdata file not found, skipping survey products");
        summary.products.push(ProductSummary::skipped(
            "survey microdata",
            format!("{} not found", path.display()),
        ));
        return Ok(summary);
    };

    let weights = resolve_weights(&data, &definition.weight_column);
    let weight_note = weights.mode().to_string();

    for product in &definition.categories {
        if !data.has_column(&product.column) {
            info!(column = %product.column, "category column not in microdata, skipping");
            summary.products.push(ProductSummary::skipped(
                &product.column,
                "column not in microdata",
            ));
            continue;
        }
        let shares = category_shares(&data, &weights, &product.column, definition.rounding)
            .with_context(|| format!("aggregate {}", product.column))?;
        let table = category_table(&shares, &product.column);
        let path = write_product(&table, config.resolve(&product.output))?;
        summary.products.push(
            ProductSummary::written(&product.column, table.len(), path)
                .with_note(weight_note.clone()),
        );
    }

    let indicators = &definition.indicators;
    let product_name = format!("{}*", indicators.prefix);
    let columns = indicator_columns(&data, &indicators.prefix);
    if columns.is_empty() {
        info!(prefix = %indicators.prefix, "no indicator columns in microdata, skipping");
        summary
            .products
            .push(ProductSummary::skipped(product_name, "no indicator columns"));
        return Ok(summary);
    }
    let shares = indicator_shares(&data, &weights, &columns, &indicators.yes_value)
        .with_context(|| format!("aggregate {product_name} indicators"))?;
    let table = indicator_table(&shares, &indicators.label);
    let path = write_product(&table, config.resolve(&indicators.output))?;
    summary.products.push(
        ProductSummary::written(product_name, table.len(), path).with_note(weight_note),
    );

    Ok(summary)
}

/// Runs the statistical series and then the survey microdata products.
pub fn run_all(config: &PipelineConfig, source: &dyn DataSource) -> Result<RunSummary> {
    let mut summary = run_statistical_series(config, source)?;
    summary.extend(run_microdata(config)?);
    Ok(summary)
}
