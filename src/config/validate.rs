// src/config/validate.rs

use std::collections::HashSet;

use crate::config::model::ConfigFile;
use crate::errors::{LivebuildError, Result};

/// Run semantic validation against a loaded configuration.
///
/// This checks:
/// - `watch.poll_ms >= 1`
/// - at least one tracked extension, none of them empty
/// - step names are non-empty and unique
/// - step programs are non-empty
pub fn validate_config(config: &ConfigFile) -> Result<()> {
    if config.watch.poll_ms == 0 {
        return Err(LivebuildError::Config(
            "watch.poll_ms must be at least 1".to_string(),
        ));
    }

    if config.watch.extensions.is_empty() {
        return Err(LivebuildError::Config(
            "watch.extensions must not be empty".to_string(),
        ));
    }
    if config.watch.extensions.iter().any(|ext| ext.trim().is_empty()) {
        return Err(LivebuildError::Config(
            "watch.extensions must not contain empty entries".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for step in &config.step {
        if step.name.trim().is_empty() {
            return Err(LivebuildError::Config(
                "step name must not be empty".to_string(),
            ));
        }
        if !seen.insert(step.name.as_str()) {
            return Err(LivebuildError::Config(format!(
                "duplicate step name '{}'",
                step.name
            )));
        }
        if step.program.trim().is_empty() {
            return Err(LivebuildError::Config(format!(
                "step '{}' has an empty program",
                step.name
            )));
        }
    }

    Ok(())
}
