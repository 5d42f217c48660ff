//! Data model for the circular analytics tidying pipeline.
//!
//! # Module Organization
//!
//! - [`table`]: Ingested inputs ([`WideTable`], [`Microdata`])
//! - [`record`]: Pipeline-local records (long, joined and aggregate rows)
//! - [`filter`]: Exact-match dimension predicates ([`FilterSpec`])
//! - [`product`]: Definitions of the persisted data products

pub mod error;
pub mod filter;
pub mod product;
pub mod record;
pub mod table;

pub use error::{ModelError, Result};
pub use filter::FilterSpec;
pub use product::{
    CategoryProduct, IndicatorProduct, JoinDefinition, MicrodataDefinition, RoundingMode,
    SeriesDefinition,
};
pub use record::{
    CandidateRecord, CategoryShare, IndicatorShare, JoinedRecord, LongRecord, SeriesPoint,
};
pub use table::{Dimensions, Microdata, PeriodColumn, WideRow, WideTable};
