use serde::{Deserialize, Serialize};
use std::fmt;

/// Two distinct class indices, `first < second`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClassPair {
    pub first: usize,
    pub second: usize,
}

/// Rendered 1-based, e.g. `1 vs 3`.
impl fmt::Display for ClassPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} vs {}", self.first + 1, self.second + 1)
    }
}

/// Every unordered class pair, in ascending `(first, second)` order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairList {
    pairs: Vec<ClassPair>,
    num_classes: usize,
}

impl PairList {
    pub fn new(num_classes: usize) -> Self {
        let pairs = (0..num_classes)
            .flat_map(|i| ((i + 1)..num_classes).map(move |j| ClassPair { first: i, second: j }))
            .collect();
        PairList { pairs, num_classes }
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn num_classes(&self) -> usize {
        self.num_classes
    }

    pub fn get(&self, idx: usize) -> Option<ClassPair> {
        self.pairs.get(idx).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = ClassPair> + '_ {
        self.pairs.iter().copied()
    }

    pub fn as_slice(&self) -> &[ClassPair] {
        &self.pairs
    }
}
