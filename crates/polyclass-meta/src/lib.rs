pub mod config;
pub mod ensemble;
pub mod learner;
pub mod model;
pub mod prior;

pub use config::{Method, MultiClassConfig};
pub use ensemble::MultiClassClassifier;
pub use learner::{DistributionClassifier, Learner};
pub use model::{CodeMember, Decomposition, Member, PairMember, TrainedModel};
pub use prior::{ClassPrior, PriorLearner};
