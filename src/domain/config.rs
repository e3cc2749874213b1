// ============================================================================
// Registry Configuration
// ============================================================================

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default bound on the instrument universe.
pub const DEFAULT_MAX_INSTRUMENTS: usize = 1024;

/// Configuration for a [`crate::engine::BookRegistry`].
///
/// The registry creates per-instrument books lazily, up to
/// `max_instruments` distinct instruments; exceeding the bound rejects the
/// submission rather than growing without limit.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RegistryConfig {
    /// Maximum number of distinct instruments the registry will carry
    pub max_instruments: usize,
}

impl RegistryConfig {
    pub fn new(max_instruments: usize) -> Self {
        Self { max_instruments }
    }

    /// Builder method: set the instrument universe bound
    pub fn with_max_instruments(mut self, max_instruments: usize) -> Self {
        self.max_instruments = max_instruments;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_instruments == 0 {
            return Err("max_instruments must be at least 1".to_string());
        }
        Ok(())
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            max_instruments: DEFAULT_MAX_INSTRUMENTS,
        }
    }
}
