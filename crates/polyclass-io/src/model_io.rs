use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fs;
use std::path::Path;

/// Save a trained model (or any serializable value) as pretty JSON.
pub fn save_model<T: Serialize, P: AsRef<Path>>(model: &T, path: P) -> Result<(), Box<dyn Error>> {
    let json = serde_json::to_string_pretty(model)?;
    fs::write(path, json)?;
    Ok(())
}

/// Load a model written by [`save_model`].
pub fn load_model<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T, Box<dyn Error>> {
    let json = fs::read_to_string(path)?;
    let model: T = serde_json::from_str(&json)?;
    Ok(model)
}
