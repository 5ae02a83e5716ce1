//! JSON loading for [`EngineConfig`].
//!
//! Missing keys take their defaults, so `{}` is a valid config.
//!
//! ```json
//! { "seed": 7, "max_altitude": 32, "snapshot_interval_ticks": 60 }
//! ```

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use tw_core::EngineConfig;

use crate::SimResult;

/// Parse and validate a config from any reader.
pub fn load_config_reader<R: Read>(reader: R) -> SimResult<EngineConfig> {
    let config: EngineConfig = serde_json::from_reader(reader)?;
    config.validate()?;
    Ok(config)
}

pub fn load_config_path<P: AsRef<Path>>(path: P) -> SimResult<EngineConfig> {
    load_config_reader(BufReader::new(File::open(path)?))
}
