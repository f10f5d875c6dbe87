use polyclass_core::{PolyclassError, PolyclassResult};
use serde::{Deserialize, Serialize};

use crate::header::Header;

/// One row: feature values and an optional class index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instance {
    pub features: Vec<f64>,
    pub class: Option<usize>,
}

impl Instance {
    pub fn new(features: Vec<f64>, class: usize) -> Self {
        Instance {
            features,
            class: Some(class),
        }
    }

    /// An instance whose class is unknown, e.g. one submitted for prediction.
    pub fn unlabeled(features: Vec<f64>) -> Self {
        Instance {
            features,
            class: None,
        }
    }

    /// Check that the instance fits `header`.
    pub fn check(&self, header: &Header) -> PolyclassResult<()> {
        if self.features.len() != header.num_features() {
            return Err(PolyclassError::InvalidData(format!(
                "instance has {} features, header declares {}",
                self.features.len(),
                header.num_features()
            )));
        }
        if let Some(c) = self.class {
            if c >= header.num_classes() {
                return Err(PolyclassError::ClassIndexOutOfRange {
                    index: c,
                    num_classes: header.num_classes(),
                });
            }
        }
        Ok(())
    }
}

/// A labeled dataset: a header and rows conforming to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instances {
    header: Header,
    rows: Vec<Instance>,
}

impl Instances {
    pub fn new(header: Header, rows: Vec<Instance>) -> PolyclassResult<Self> {
        for row in &rows {
            row.check(&header)?;
        }
        Ok(Instances { header, rows })
    }

    /// An empty dataset sharing `header`.
    pub fn empty(header: Header) -> Self {
        Instances {
            header,
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, instance: Instance) -> PolyclassResult<()> {
        instance.check(&self.header)?;
        self.rows.push(instance);
        Ok(())
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn num_classes(&self) -> usize {
        self.header.num_classes()
    }

    pub fn num_features(&self) -> usize {
        self.header.num_features()
    }

    pub fn instance(&self, idx: usize) -> Option<&Instance> {
        self.rows.get(idx)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Instance> {
        self.rows.iter()
    }

    /// Number of labeled rows per class value. Unlabeled rows are not counted.
    pub fn class_counts(&self) -> Vec<usize> {
        let mut counts = vec![0usize; self.num_classes()];
        for c in self.rows.iter().filter_map(|r| r.class) {
            counts[c] += 1;
        }
        counts
    }

    pub fn into_rows(self) -> Vec<Instance> {
        self.rows
    }
}

impl<'a> IntoIterator for &'a Instances {
    type Item = &'a Instance;
    type IntoIter = std::slice::Iter<'a, Instance>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
