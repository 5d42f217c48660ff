//! Definitions of the persisted data products.
//!
//! Paths are relative to the data directory. The `Default` and named
//! constructors reproduce the reference Eurostat and ESOC 2023 products.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::filter::FilterSpec;

/// Region scope shared by both reference series.
pub const REFERENCE_GEOS: [&str; 2] = ["ES", "EU27_2020"];

/// One statistical series pulled from the upstream data source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesDefinition {
    /// Upstream dataset code, e.g. `env_wasmun`.
    pub dataset: String,
    /// Categorical key columns retained from the wide table.
    pub key_columns: Vec<String>,
    /// Slice of the dataset to keep.
    #[serde(default)]
    pub filter: FilterSpec,
    /// Output column name for the measurement.
    pub measure: String,
    /// Per-series output file.
    pub output: PathBuf,
}

impl SeriesDefinition {
    /// Municipal waste generated per capita (kg per inhabitant).
    pub fn municipal_waste() -> Self {
        Self {
            dataset: "env_wasmun".to_string(),
            key_columns: vec!["geo".into(), "wst_oper".into(), "unit".into()],
            filter: FilterSpec::new()
                .with("unit", ["KG_HAB"])
                .with("wst_oper", ["GEN"])
                .with("geo", REFERENCE_GEOS),
            measure: "residuos_kg_hab".to_string(),
            output: PathBuf::from("external/eurostat_env_wasmun_ES_UE.csv"),
        }
    }

    /// Recycling rate of total packaging waste (percent).
    pub fn packaging_recycling() -> Self {
        Self {
            dataset: "env_waspac".to_string(),
            key_columns: vec![
                "geo".into(),
                "waste".into(),
                "wst_oper".into(),
                "unit".into(),
            ],
            filter: FilterSpec::new()
                .with("geo", REFERENCE_GEOS)
                .with("unit", ["PC"])
                .with("waste", ["W1501"])
                .with("wst_oper", ["RCV"]),
            measure: "reciclaje_envases_pct".to_string(),
            output: PathBuf::from("external/eurostat_env_waspac_ES_UE.csv"),
        }
    }
}

/// How two series are combined into the joined product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JoinDefinition {
    /// Key column identifying the group (region).
    pub group_column: String,
    /// Output header for the period column.
    pub period_column: String,
    pub output: PathBuf,
}

impl Default for JoinDefinition {
    fn default() -> Self {
        Self {
            group_column: "geo".to_string(),
            period_column: "year".to_string(),
            output: PathBuf::from("processed/es_ue_residuos_reciclaje.csv"),
        }
    }
}

/// Rounding applied to category shares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoundingMode {
    /// Round every share to one decimal independently, ties to even.
    #[default]
    Plain,
    /// Distribute tenths by largest remainder so shares total exactly 100.
    LargestRemainder,
}

/// A categorical column aggregated into weighted shares.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryProduct {
    pub column: String,
    pub output: PathBuf,
}

/// The set of binary indicator columns aggregated together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorProduct {
    /// Columns whose lower-cased name starts with this prefix are indicators.
    pub prefix: String,
    /// Cell value meaning "selected".
    pub yes_value: String,
    /// Output header naming the indicator column.
    pub label: String,
    pub output: PathBuf,
}

impl Default for IndicatorProduct {
    fn default() -> Self {
        Self {
            prefix: "medida".to_string(),
            yes_value: "1".to_string(),
            label: "medida".to_string(),
            output: PathBuf::from("processed/esoc2023_medidas_reduccion_pct.csv"),
        }
    }
}

/// Optional survey microdata and the aggregates derived from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MicrodataDefinition {
    pub path: PathBuf,
    pub separator: char,
    /// Weight column; rows are weighted uniformly when it is absent.
    pub weight_column: String,
    pub categories: Vec<CategoryProduct>,
    pub indicators: IndicatorProduct,
    pub rounding: RoundingMode,
}

impl Default for MicrodataDefinition {
    fn default() -> Self {
        Self {
            path: PathBuf::from("raw/md_ESOC2023.csv"),
            separator: ';',
            weight_column: "fep".to_string(),
            categories: vec![CategoryProduct {
                column: "respalim".to_string(),
                output: PathBuf::from("processed/esoc2023_motivos_desechar_alimentos_pct.csv"),
            }],
            indicators: IndicatorProduct::default(),
            rounding: RoundingMode::default(),
        }
    }
}
