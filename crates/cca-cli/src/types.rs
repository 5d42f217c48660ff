use std::path::PathBuf;

/// Outcome of one data product in a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductStatus {
    /// The product was written with this many data rows.
    Written { records: usize, path: PathBuf },
    /// The product was not produced; the reason is shown to the user.
    Skipped { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductSummary {
    pub product: String,
    pub status: ProductStatus,
    /// Diagnostics such as dropped cells or duplicate keys.
    pub notes: Vec<String>,
}

impl ProductSummary {
    pub fn written(product: impl Into<String>, records: usize, path: PathBuf) -> Self {
        Self {
            product: product.into(),
            status: ProductStatus::Written { records, path },
            notes: Vec::new(),
        }
    }

    pub fn skipped(product: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            product: product.into(),
            status: ProductStatus::Skipped {
                reason: reason.into(),
            },
            notes: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub data_dir: PathBuf,
    pub products: Vec<ProductSummary>,
}

impl RunSummary {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            products: Vec::new(),
        }
    }

    pub fn extend(&mut self, other: RunSummary) {
        self.products.extend(other.products);
    }

    pub fn written_count(&self) -> usize {
        self.products
            .iter()
            .filter(|p| matches!(p.status, ProductStatus::Written { .. }))
            .count()
    }
}
