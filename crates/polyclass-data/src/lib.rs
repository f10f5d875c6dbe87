pub mod filter;
pub mod header;
pub mod instances;

pub use filter::{restamp, ClassTransform, IndicatorFilter, PairFilter};
pub use header::{ClassAttribute, Header};
pub use instances::{Instance, Instances};
