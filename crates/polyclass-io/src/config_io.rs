use polyclass_meta::MultiClassConfig;
use std::error::Error;
use std::fs;
use std::path::Path;

/// Load and validate a [`MultiClassConfig`] from a JSON file.
/// Missing fields take their default values.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<MultiClassConfig, Box<dyn Error>> {
    let json = fs::read_to_string(path)?;
    let config: MultiClassConfig = serde_json::from_str(&json)?;
    config.validate()?;
    Ok(config)
}

pub fn save_config<P: AsRef<Path>>(config: &MultiClassConfig, path: P) -> Result<(), Box<dyn Error>> {
    fs::write(path, serde_json::to_string_pretty(config)?)?;
    Ok(())
}
