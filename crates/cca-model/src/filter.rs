//! Exact-match dimension predicates.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::table::Dimensions;

/// Accepted category codes per dimension column.
///
/// A set of dimensions matches when every constrained column is present and
/// its code is in the accepted set. Columns not named here are
/// unconstrained, so the empty spec matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterSpec {
    constraints: BTreeMap<String, BTreeSet<String>>,
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds accepted codes for `column`, extending any existing constraint.
    #[must_use]
    pub fn with<I, S>(mut self, column: impl Into<String>, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.constraints
            .entry(column.into())
            .or_default()
            .extend(codes.into_iter().map(Into::into));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    /// Constrained column names.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.constraints.keys().map(String::as_str)
    }

    /// Accepted codes for `column`, if it is constrained.
    pub fn accepted(&self, column: &str) -> Option<&BTreeSet<String>> {
        self.constraints.get(column)
    }

    pub fn matches(&self, dims: &Dimensions) -> bool {
        self.constraints.iter().all(|(column, accepted)| {
            dims.get(column)
                .is_some_and(|code| accepted.contains(code))
        })
    }
}
