//! Class relabeling filters that turn a multi-class dataset into the
//! two-class view one sub-classifier is trained on.
//!
//! A filter is fit once against the training header and then reused,
//! unchanged, on every instance submitted for prediction.

use polyclass_core::{PolyclassError, PolyclassResult};
use serde::{Deserialize, Serialize};

use crate::header::{ClassAttribute, Header};
use crate::instances::{Instance, Instances};

/// A fitted projection from a multi-class schema to a two-class schema.
pub trait ClassTransform {
    /// Schema of the transformed data.
    fn output_header(&self) -> &Header;

    /// Project a training dataset.
    fn transform(&self, data: &Instances) -> PolyclassResult<Instances>;

    /// Project a single instance the same way at prediction time.
    fn transform_instance(&self, instance: &Instance) -> PolyclassResult<Instance>;
}

/// Re-attach `header` to a copy of `instance`.
///
/// Feature values are kept as they are and the class is cleared: the
/// original class index has no meaning under the new schema.
pub fn restamp(header: &Header, instance: &Instance) -> PolyclassResult<Instance> {
    let out = Instance::unlabeled(instance.features.clone());
    out.check(header)?;
    Ok(out)
}

// ─── Indicator ──────────────────────────────────────────────────────────────

/// Maps class `c` to `pos` when `c` is set in the code row, else to `neg`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorFilter {
    positives: Vec<bool>,
    output: Header,
}

impl IndicatorFilter {
    /// Fit against `header` for one code row (one bit per class).
    pub fn fit(header: &Header, code_row: &[bool]) -> PolyclassResult<Self> {
        if code_row.len() != header.num_classes() {
            return Err(PolyclassError::InvalidParameter(format!(
                "code row has {} bits for {} classes",
                code_row.len(),
                header.num_classes()
            )));
        }
        let output = header.with_class(ClassAttribute::indicator(header.class.name.clone()));
        Ok(IndicatorFilter {
            positives: code_row.to_vec(),
            output,
        })
    }

    pub fn is_positive(&self, class: usize) -> bool {
        self.positives.get(class).copied().unwrap_or(false)
    }

    pub fn positives(&self) -> &[bool] {
        &self.positives
    }

    /// Positive classes as 1-based comma-separated indices, e.g. `"1,3"`.
    pub fn value_range(&self) -> String {
        self.positives
            .iter()
            .enumerate()
            .filter(|&(_, &on)| on)
            .map(|(i, _)| (i + 1).to_string())
            .collect::<Vec<_>>()
            .join(",")
    }

    fn relabel(&self, class: Option<usize>) -> PolyclassResult<Option<usize>> {
        match class {
            None => Ok(None),
            Some(c) if c < self.positives.len() => Ok(Some(usize::from(self.positives[c]))),
            Some(c) => Err(PolyclassError::ClassIndexOutOfRange {
                index: c,
                num_classes: self.positives.len(),
            }),
        }
    }
}

impl ClassTransform for IndicatorFilter {
    fn output_header(&self) -> &Header {
        &self.output
    }

    fn transform(&self, data: &Instances) -> PolyclassResult<Instances> {
        let rows = data
            .iter()
            .map(|inst| self.transform_instance(inst))
            .collect::<PolyclassResult<Vec<_>>>()?;
        Instances::new(self.output.clone(), rows)
    }

    fn transform_instance(&self, instance: &Instance) -> PolyclassResult<Instance> {
        let out = Instance {
            features: instance.features.clone(),
            class: self.relabel(instance.class)?,
        };
        out.check(&self.output)?;
        Ok(out)
    }
}

// ─── Pair ───────────────────────────────────────────────────────────────────

/// Keeps only the instances of two classes, relabeled `class0` / `class1`
/// in pair order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairFilter {
    pair: (usize, usize),
    output: Header,
}

impl PairFilter {
    pub fn fit(header: &Header, first: usize, second: usize) -> PolyclassResult<Self> {
        let n = header.num_classes();
        for idx in [first, second] {
            if idx >= n {
                return Err(PolyclassError::ClassIndexOutOfRange {
                    index: idx,
                    num_classes: n,
                });
            }
        }
        if first == second {
            return Err(PolyclassError::InvalidParameter(format!(
                "class pair ({first}, {second}) must name two distinct classes"
            )));
        }
        Ok(PairFilter {
            pair: (first, second),
            output: header.with_class(ClassAttribute::pairwise()),
        })
    }

    pub fn pair(&self) -> (usize, usize) {
        self.pair
    }
}

impl ClassTransform for PairFilter {
    fn output_header(&self) -> &Header {
        &self.output
    }

    fn transform(&self, data: &Instances) -> PolyclassResult<Instances> {
        let (first, second) = self.pair;
        let rows = data
            .iter()
            .filter_map(|inst| {
                let class = match inst.class {
                    Some(c) if c == first => 0,
                    Some(c) if c == second => 1,
                    _ => return None,
                };
                Some(Instance::new(inst.features.clone(), class))
            })
            .collect();
        Instances::new(self.output.clone(), rows)
    }

    /// Instances are never filtered at prediction time; every one is scored
    /// against the pair.
    fn transform_instance(&self, instance: &Instance) -> PolyclassResult<Instance> {
        restamp(&self.output, instance)
    }
}
