pub mod plan;
pub mod reflect;
pub mod setup;
pub mod status;

use studyflow_core::narrative::{GeminiNarrator, Narrator, OfflineNarrator};
use studyflow_core::storage::Config;

/// Build the narrator for this invocation.
///
/// Offline mode (or any client construction failure) yields the fallback-only
/// narrator; commands still complete either way.
pub fn narrator(offline: bool) -> Result<Box<dyn Narrator>, Box<dyn std::error::Error>> {
    if offline {
        return Ok(Box::new(OfflineNarrator));
    }
    let config = Config::load()?;
    match GeminiNarrator::from_config(&config.narrative) {
        Ok(narrator) => Ok(Box::new(narrator)),
        Err(e) => {
            log::warn!("narrator unavailable ({e}), continuing offline");
            Ok(Box::new(OfflineNarrator))
        }
    }
}
