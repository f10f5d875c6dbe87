//! # Polyclass
//!
//! Multi-class classification on top of any two-class learner.
//!
//! ## Modules
//!
//! - **core**: Errors and class-distribution helpers (sum, normalize, argmax)
//! - **data**: Headers, instances and the class filters that build binary sub-problems
//! - **codes**: Code matrices (one-against-all, random, exhaustive) and one-vs-one pair lists
//! - **meta**: `MultiClassClassifier` with training, vote decoding, fallback and reports
//! - **io**: CSV datasets, JSON configuration, model serialization

/// Errors and distribution helpers.
pub use polyclass_core as core;

/// Dataset types and class filters.
pub use polyclass_data as data;

/// Code matrices and class pairs.
pub use polyclass_codes as codes;

/// The multi-class meta-classifier.
pub use polyclass_meta as meta;

/// I/O utilities.
pub use polyclass_io as io;
