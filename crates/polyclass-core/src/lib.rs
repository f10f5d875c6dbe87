pub mod distribution;
pub mod error;

pub use distribution::{argmax, normalize, sum};
pub use error::{PolyclassError, PolyclassResult};
