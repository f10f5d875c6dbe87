pub mod config_io;
pub mod csv_io;
pub mod model_io;

pub use config_io::{load_config, save_config};
pub use csv_io::{instances_from_reader, read_instances};
pub use model_io::{load_model, save_model};
