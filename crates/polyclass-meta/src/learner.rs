use polyclass_core::PolyclassResult;
use polyclass_data::{Instance, Instances};

/// A trained model that scores an instance with a class distribution.
pub trait DistributionClassifier {
    /// One probability per value of the class attribute the model was
    /// trained on. Binary models return `[p_negative, p_positive]`.
    fn distribution(&self, instance: &Instance) -> PolyclassResult<Vec<f64>>;

    /// Human-readable description used in ensemble reports.
    fn report(&self) -> String {
        String::new()
    }
}

/// Trains a [`DistributionClassifier`] from a dataset.
///
/// A learner is a configuration value; `fit` does not mutate it, so one
/// learner can train many independent models, possibly on several threads.
pub trait Learner: Send + Sync {
    type Model: DistributionClassifier + Send + Sync;

    fn fit(&self, data: &Instances) -> PolyclassResult<Self::Model>;

    fn name(&self) -> &str {
        "classifier"
    }
}
