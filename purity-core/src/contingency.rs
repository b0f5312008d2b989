//! Cross-tabulation of predicted clusters against ground-truth classes.
//!
//! Rows are keyed by cluster and columns by class, both in order of first
//! appearance. Every row holds a count for every class observed anywhere in
//! the evaluation set, so a cluster that never received a class still carries
//! an explicit zero for it.

use std::hash::Hash;

use indexmap::{IndexMap, IndexSet};

/// Counts of `(cluster, class)` co-occurrences for one evaluation.
///
/// # Examples
/// ```
/// use purity_core::ContingencyTable;
///
/// let predictions = ["A", "A", "B", "B", "B"];
/// let labels = ["x", "x", "x", "y", "y"];
/// let table = ContingencyTable::from_pairs(predictions.into_iter().zip(labels));
///
/// assert_eq!(table.row(&"A"), Some(&[2, 0][..]));
/// assert_eq!(table.row(&"B"), Some(&[1, 2][..]));
/// assert_eq!(table.total(), 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContingencyTable<C: Hash + Eq, L: Hash + Eq> {
    classes: IndexSet<L>,
    rows: IndexMap<C, Vec<usize>>,
    total: usize,
}

impl<C: Hash + Eq, L: Hash + Eq> ContingencyTable<C, L> {
    /// Builds a table from `(cluster, class)` pairs, one per sample.
    #[must_use]
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (C, L)>,
    {
        let mut classes = IndexSet::new();
        let mut rows: IndexMap<C, Vec<usize>> = IndexMap::new();
        let mut total = 0_usize;

        for (cluster, class) in pairs {
            let (column, _) = classes.insert_full(class);
            let row = rows.entry(cluster).or_default();
            if row.len() <= column {
                row.resize(column + 1, 0);
            }
            if let Some(cell) = row.get_mut(column) {
                *cell += 1;
            }
            total += 1;
        }

        // Rows created before a class first appeared are still short.
        let width = classes.len();
        for row in rows.values_mut() {
            row.resize(width, 0);
        }

        Self {
            classes,
            rows,
            total,
        }
    }

    /// Returns the distinct classes in order of first appearance.
    pub fn classes(&self) -> impl ExactSizeIterator<Item = &L> {
        self.classes.iter()
    }

    /// Returns the distinct clusters in order of first appearance.
    pub fn clusters(&self) -> impl ExactSizeIterator<Item = &C> {
        self.rows.keys()
    }

    /// Returns the class counts for `cluster`, ordered like [`Self::classes`].
    #[must_use]
    pub fn row(&self, cluster: &C) -> Option<&[usize]> {
        self.rows.get(cluster).map(Vec::as_slice)
    }

    /// Returns how many samples of `class` landed in `cluster`.
    ///
    /// Yields `None` only when the cluster or class never appeared.
    #[must_use]
    pub fn count(&self, cluster: &C, class: &L) -> Option<usize> {
        let column = self.classes.get_index_of(class)?;
        self.rows.get(cluster)?.get(column).copied()
    }

    /// Returns the number of distinct clusters.
    #[must_use]
    pub fn cluster_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns the number of distinct classes.
    #[must_use]
    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    /// Returns the grand total of all cells, i.e. the number of samples.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.total
    }

    /// Returns whether the table was built from no samples.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Purity of each cluster: the smoothed share of its dominant class.
    ///
    /// Each entry is `(max + epsilon) / (sum + epsilon)` over one row, in
    /// cluster order.
    #[must_use]
    pub fn row_purities(&self, epsilon: f64) -> Vec<f64> {
        self.rows
            .values()
            .map(|row| {
                let dominant = row.iter().copied().max().unwrap_or(0);
                let size = row.iter().sum();
                smoothed_share(dominant, size, epsilon)
            })
            .collect()
    }

    /// Purity of each class: the smoothed share of its dominant cluster.
    ///
    /// Each entry is `(max + epsilon) / (sum + epsilon)` over one column, in
    /// class order.
    #[must_use]
    pub fn column_purities(&self, epsilon: f64) -> Vec<f64> {
        (0..self.classes.len())
            .map(|column| {
                let cells = || self.rows.values().filter_map(|row| row.get(column).copied());
                let dominant = cells().max().unwrap_or(0);
                let size = cells().sum();
                smoothed_share(dominant, size, epsilon)
            })
            .collect()
    }
}

#[expect(
    clippy::cast_precision_loss,
    clippy::float_arithmetic,
    reason = "purity is a floating-point ratio of integer counts."
)]
fn smoothed_share(part: usize, whole: usize, epsilon: f64) -> f64 {
    (part as f64 + epsilon) / (whole as f64 + epsilon)
}
