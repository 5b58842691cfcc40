use anyhow::Result;
use std::path::Path;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::constants::LOG_FILTER;
use common::config::GameConfig;

// ============================================================================
// Logging
// ============================================================================

// RUST_LOG overrides the default filter.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(LOG_FILTER));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

// ============================================================================
// Game Configuration
// ============================================================================

pub fn load_config(path: Option<&Path>) -> Result<GameConfig> {
    let Some(path) = path else {
        return Ok(GameConfig::default());
    };
    let config = GameConfig::load(path)?;
    info!("loaded game config from {}", path.display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn missing_path_uses_defaults() {
        assert_eq!(load_config(None).expect("defaults"), GameConfig::default());
    }

    #[test]
    fn invalid_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "{{ not json").expect("write");
        assert!(load_config(Some(file.path())).is_err());
    }
}
