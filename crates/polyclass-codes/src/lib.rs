pub mod matrix;
pub mod pairs;
pub mod strategy;

pub use matrix::CodeMatrix;
pub use pairs::{ClassPair, PairList};
pub use strategy::{
    exhaustive, one_against_all, random_code, CodeKind, MAX_EXHAUSTIVE_CLASSES,
    MAX_RANDOM_ATTEMPTS, MAX_RANDOM_ROWS,
};
