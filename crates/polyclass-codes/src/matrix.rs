use polyclass_core::{PolyclassError, PolyclassResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Binary code matrix: one row per sub-problem, one column per class.
///
/// Bit `(r, c)` set means class `c` is on the positive side of sub-problem `r`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeMatrix {
    bits: Vec<Vec<bool>>,
    num_classes: usize,
}

impl CodeMatrix {
    /// Build from explicit rows. Rows must be non-empty and equally wide.
    pub fn from_rows(bits: Vec<Vec<bool>>) -> PolyclassResult<Self> {
        let num_classes = bits.first().map(Vec::len).unwrap_or(0);
        if num_classes == 0 {
            return Err(PolyclassError::InvalidParameter(
                "code matrix needs at least one row and one column".into(),
            ));
        }
        if let Some(bad) = bits.iter().position(|r| r.len() != num_classes) {
            return Err(PolyclassError::InvalidParameter(format!(
                "code row {bad} has {} bits, expected {num_classes}",
                bits[bad].len()
            )));
        }
        Ok(CodeMatrix { bits, num_classes })
    }

    pub(crate) fn zeros(rows: usize, num_classes: usize) -> Self {
        CodeMatrix {
            bits: vec![vec![false; num_classes]; rows],
            num_classes,
        }
    }

    pub(crate) fn set(&mut self, row: usize, class: usize, on: bool) {
        self.bits[row][class] = on;
    }

    pub fn num_rows(&self) -> usize {
        self.bits.len()
    }

    pub fn num_classes(&self) -> usize {
        self.num_classes
    }

    pub fn row(&self, row: usize) -> &[bool] {
        &self.bits[row]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        self.bits.iter().map(Vec::as_slice)
    }

    pub fn bit(&self, row: usize, class: usize) -> bool {
        self.bits[row][class]
    }

    /// Class indices on the positive side of `row`.
    pub fn positives(&self, row: usize) -> Vec<usize> {
        self.bits[row]
            .iter()
            .enumerate()
            .filter_map(|(c, &on)| on.then_some(c))
            .collect()
    }

    /// Positive classes of `row` as 1-based comma-separated indices.
    pub fn indices(&self, row: usize) -> String {
        self.positives(row)
            .iter()
            .map(|c| (c + 1).to_string())
            .collect::<Vec<_>>()
            .join(",")
    }

    /// No row is constant and no column is constant.
    ///
    /// A constant row gives a sub-problem with a single label; a constant
    /// column leaves a class that no sub-problem can tell apart.
    pub fn is_valid(&self) -> bool {
        let rows_ok = self
            .bits
            .iter()
            .all(|r| r.iter().any(|&b| b) && !r.iter().all(|&b| b));
        let cols_ok = (0..self.num_classes).all(|c| {
            let any = self.bits.iter().any(|r| r[c]);
            let all = self.bits.iter().all(|r| r[c]);
            any && !all
        });
        rows_ok && cols_ok
    }
}

/// One line per class, one column per code row.
impl fmt::Display for CodeMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in 0..self.num_classes {
            for row in &self.bits {
                write!(f, "{}", if row[c] { " 1" } else { " 0" })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
