use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;
use std::path::Path;

use crate::error::{Error, Result};
use crate::files::write_atomically;

/// A value that can be counted by equality. Returns None for values
/// that never count as distinct (NaN).
pub trait Distinct {
    type Key: Hash + Eq;
    fn distinct_key(&self) -> Option<Self::Key>;
}

impl Distinct for u64 {
    type Key = u64;

    fn distinct_key(&self) -> Option<u64> {
        Some(*self)
    }
}

impl Distinct for f64 {
    type Key = u64;

    fn distinct_key(&self) -> Option<u64> {
        if self.is_nan() {
            None
        } else if *self == 0.0 {
            Some(0) // -0.0 == 0.0
        } else {
            Some(self.to_bits())
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UniquenessReport {
    pub distinct: usize,
    pub total: usize,
}

impl UniquenessReport {
    pub fn from_values<T: Distinct>(column: &str, values: &[T]) -> Result<Self> {
        if values.is_empty() {
            return Err(Error::EmptyColumn(column.to_owned()));
        }
        let seen: HashSet<T::Key> = values.iter().filter_map(|x| x.distinct_key()).collect();
        Ok(UniquenessReport { distinct: seen.len(), total: values.len() })
    }

    pub fn fraction(&self) -> f64 {
        self.distinct as f64 / self.total as f64
    }

    pub fn percentage(&self) -> f64 {
        self.fraction() * 100.0
    }
}

// Renders as "3 (75.00%)"
impl fmt::Display for UniquenessReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.2}%)", self.distinct, self.percentage())
    }
}

pub fn write_report(path: &Path, report: &UniquenessReport) -> Result<()> {
    write_atomically(path, |out| write!(out, "{}", report))
}
