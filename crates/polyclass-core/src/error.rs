use thiserror::Error;

/// Error type shared by every Polyclass crate.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PolyclassError {
    #[error("No base classifier has been set")]
    NoBaseClassifier,

    #[error("Unrecognized decomposition method: {0}")]
    UnknownMethod(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Exhaustive code needs 2^({num_classes} - 1) - 1 rows; at most {max} classes are supported")]
    CodeTooLarge { num_classes: usize, max: usize },

    #[error("Training failed: {0}")]
    Training(String),

    #[error("Prediction failed: {0}")]
    Prediction(String),

    #[error("No model built yet")]
    NotTrained,

    #[error("Model is already trained; build a fresh classifier to retrain")]
    AlreadyTrained,

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Class index {index} out of range for {num_classes} classes")]
    ClassIndexOutOfRange { index: usize, num_classes: usize },
}

pub type PolyclassResult<T> = Result<T, PolyclassError>;
