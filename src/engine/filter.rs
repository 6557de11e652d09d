//! Filter configuration model
//!
//! Per-dimension settings that decide which dimensions are active, in which
//! nesting order they apply, which bucket values they admit, and whether
//! the presentation layer shows them. A configuration always holds at least
//! one dimension; every mutation validates before it writes, so a refused
//! call leaves the configuration exactly as it was.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::catalog::Catalog;
use super::choices::GroupingChoices;
use super::dimension::Dimension;
use crate::error::{SpendscopeError, SpendscopeResult};
use crate::models::Transaction;

/// Settings for one active dimension
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterEntry {
    /// Admit every value; `specifics` is ignored when set
    #[serde(default = "default_true")]
    pub include_all: bool,

    /// Presentation hint only, never affects aggregation
    #[serde(default = "default_true")]
    pub visible: bool,

    /// Admitted bucket ids when `include_all` is false
    #[serde(default)]
    pub specifics: BTreeSet<String>,

    /// Nesting depth; lower is outer
    #[serde(default)]
    pub index: u32,
}

fn default_true() -> bool {
    true
}

impl FilterEntry {
    /// Unfiltered, visible entry at the given depth
    pub fn at_index(index: u32) -> Self {
        Self {
            include_all: true,
            visible: true,
            specifics: BTreeSet::new(),
            index,
        }
    }

    /// Whether a bucket id passes this entry's constraint
    pub fn admits(&self, bucket_id: &str) -> bool {
        self.include_all || self.specifics.contains(bucket_id)
    }
}

/// Outcome of [`FilterConfiguration::toggle_dimension`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Added { index: u32 },
    Removed,
}

/// Active dimensions and their settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterConfiguration {
    entries: BTreeMap<Dimension, FilterEntry>,
}

impl Default for FilterConfiguration {
    fn default() -> Self {
        Self::seeded(Dimension::Category)
    }
}

impl FilterConfiguration {
    /// Single-dimension configuration used on first use
    pub fn seeded(dimension: Dimension) -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(dimension, FilterEntry::at_index(0));
        Self { entries }
    }

    /// Build from explicit entries. An empty map is seeded with `fallback`.
    pub fn from_entries(entries: BTreeMap<Dimension, FilterEntry>, fallback: Dimension) -> Self {
        if entries.is_empty() {
            Self::seeded(fallback)
        } else {
            Self { entries }
        }
    }

    /// Restore the at-least-one-dimension invariant after deserialization
    pub fn ensure_seeded(&mut self, fallback: Dimension) {
        if self.entries.is_empty() {
            self.entries.insert(fallback, FilterEntry::at_index(0));
        }
    }

    pub fn entry(&self, dimension: Dimension) -> Option<&FilterEntry> {
        self.entries.get(&dimension)
    }

    pub fn entries(&self) -> impl Iterator<Item = (Dimension, &FilterEntry)> {
        self.entries.iter().map(|(d, e)| (*d, e))
    }

    pub fn is_active(&self, dimension: Dimension) -> bool {
        self.entries.contains_key(&dimension)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove an active dimension or add an inactive one at the innermost
    /// level. Removing the last dimension is refused.
    pub fn toggle_dimension(&mut self, dimension: Dimension) -> SpendscopeResult<Toggle> {
        if self.entries.contains_key(&dimension) {
            if self.entries.len() == 1 {
                tracing::warn!(%dimension, "refusing to remove the last grouping dimension");
                return Err(SpendscopeError::LastDimension(dimension));
            }
            self.entries.remove(&dimension);
            return Ok(Toggle::Removed);
        }

        let index = match self.entries.values().map(|e| e.index).max() {
            None => 0,
            Some(max) => match max.checked_add(1) {
                Some(next) => next,
                None => self.compact_indices(),
            },
        };
        self.entries.insert(dimension, FilterEntry::at_index(index));
        Ok(Toggle::Added { index })
    }

    /// Renumber indices 0, 1, 2, ... in the current nesting order and
    /// return the next free index
    fn compact_indices(&mut self) -> u32 {
        let mut next = 0;
        for dimension in self.ordered_dimensions() {
            if let Some(entry) = self.entries.get_mut(&dimension) {
                entry.index = next;
                next += 1;
            }
        }
        tracing::debug!(levels = next, "renumbered grouping indices");
        next
    }

    /// Admit only `values` for `dimension`. An empty set admits nothing.
    pub fn set_specifics<I, S>(&mut self, dimension: Dimension, values: I) -> SpendscopeResult<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entry = self
            .entries
            .get_mut(&dimension)
            .ok_or(SpendscopeError::DimensionInactive(dimension))?;
        entry.specifics = values.into_iter().map(Into::into).collect();
        entry.include_all = false;
        Ok(())
    }

    /// Like [`set_specifics`](Self::set_specifics) but refuses values that no
    /// bucket of the dimension can produce.
    pub fn set_specifics_checked<I, S>(
        &mut self,
        dimension: Dimension,
        values: I,
        choices: &GroupingChoices,
    ) -> SpendscopeResult<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if !self.is_active(dimension) {
            return Err(SpendscopeError::DimensionInactive(dimension));
        }
        let values: Vec<String> = values.into_iter().map(Into::into).collect();
        if let Some(unknown) = values.iter().find(|v| !choices.contains(dimension, v)) {
            tracing::warn!(%dimension, value = %unknown, "refusing unknown filter value");
            return Err(SpendscopeError::UnknownFilterValue {
                dimension,
                value: unknown.clone(),
            });
        }
        self.set_specifics(dimension, values)
    }

    /// Drop any value constraint on `dimension`
    pub fn include_all(&mut self, dimension: Dimension) -> SpendscopeResult<()> {
        let entry = self
            .entries
            .get_mut(&dimension)
            .ok_or(SpendscopeError::DimensionInactive(dimension))?;
        entry.include_all = true;
        entry.specifics.clear();
        Ok(())
    }

    /// Show or hide a dimension in presentation
    pub fn set_visible(&mut self, dimension: Dimension, visible: bool) -> SpendscopeResult<()> {
        let entry = self
            .entries
            .get_mut(&dimension)
            .ok_or(SpendscopeError::DimensionInactive(dimension))?;
        entry.visible = visible;
        Ok(())
    }

    /// Change a dimension's nesting index
    pub fn set_index(&mut self, dimension: Dimension, index: u32) -> SpendscopeResult<()> {
        let entry = self
            .entries
            .get_mut(&dimension)
            .ok_or(SpendscopeError::DimensionInactive(dimension))?;
        entry.index = index;
        Ok(())
    }

    /// Active dimensions, outermost first: by index, ties by declaration order
    pub fn ordered_dimensions(&self) -> Vec<Dimension> {
        let mut dims: Vec<(u32, Dimension)> =
            self.entries.iter().map(|(d, e)| (e.index, *d)).collect();
        dims.sort();
        dims.into_iter().map(|(_, d)| d).collect()
    }

    /// Active dimensions marked invisible
    pub fn hidden_dimensions(&self) -> Vec<Dimension> {
        self.ordered_dimensions()
            .into_iter()
            .filter(|d| self.entries.get(d).is_some_and(|e| !e.visible))
            .collect()
    }

    /// Whether a transaction passes the constraint of every dimension in
    /// `dimensions`
    pub fn admits(&self, txn: &Transaction, dimensions: &[Dimension], catalog: &Catalog) -> bool {
        dimensions.iter().all(|d| match self.entries.get(d) {
            Some(entry) if !entry.include_all => {
                entry.admits(&d.bucket_key(txn, catalog).id)
            }
            _ => true,
        })
    }
}
