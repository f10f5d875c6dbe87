use polyclass_core::{PolyclassError, PolyclassResult};
use polyclass_data::{Instance, Instances};
use serde::{Deserialize, Serialize};

use crate::learner::{DistributionClassifier, Learner};

/// Learns the class frequencies of the training set and ignores features.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorLearner;

/// Laplace-smoothed class prior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassPrior {
    pub distribution: Vec<f64>,
    pub class_values: Vec<String>,
}

impl Learner for PriorLearner {
    type Model = ClassPrior;

    fn fit(&self, data: &Instances) -> PolyclassResult<ClassPrior> {
        let counts = data.class_counts();
        if counts.is_empty() {
            return Err(PolyclassError::InvalidData("dataset has no class values".into()));
        }
        let total: usize = counts.iter().sum::<usize>() + counts.len();
        let distribution = counts
            .iter()
            .map(|&c| (c + 1) as f64 / total as f64)
            .collect();
        Ok(ClassPrior {
            distribution,
            class_values: data.header().class.values().to_vec(),
        })
    }

    fn name(&self) -> &str {
        "prior"
    }
}

impl DistributionClassifier for ClassPrior {
    fn distribution(&self, _instance: &Instance) -> PolyclassResult<Vec<f64>> {
        Ok(self.distribution.clone())
    }

    fn report(&self) -> String {
        let parts: Vec<String> = self
            .class_values
            .iter()
            .zip(&self.distribution)
            .map(|(v, p)| format!("{v}: {p:.4}"))
            .collect();
        format!("Class prior: {}", parts.join(", "))
    }
}
