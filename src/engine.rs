//! Boundary to an external Argon2 hashing engine.
//!
//! The explorer never computes a digest itself. A host that wants a real
//! hash hands the configuration to a [`HashEngine`] in its serialized form,
//! where every parameter travels as a decimal string, and gets back an
//! encoded hash it displays verbatim.

use serde::{Deserialize, Serialize};

use crate::types::Config;

/// Configuration as handed across the engine boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub memory: String,
    pub iterations: String,
    pub parallelism: String,
    /// Variant code (`i`, `d`, `id`)
    pub variant: String,
}

impl From<&Config> for EngineConfig {
    fn from(config: &Config) -> Self {
        Self {
            memory: config.memory.to_string(),
            iterations: config.iterations.to_string(),
            parallelism: config.parallelism.to_string(),
            variant: config.variant.code().to_string(),
        }
    }
}

impl Config {
    /// Serialized form for a [`HashEngine`].
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig::from(self)
    }
}

/// Failures reported by a hashing engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// The engine refused one of the parameters.
    #[error("Invalid engine parameter: {0}")]
    InvalidParameter(String),

    /// The engine could not allocate the requested memory.
    #[error("Memory allocation failed: {0}")]
    Allocation(String),

    /// Any other engine-level failure.
    #[error("Hashing engine error: {0}")]
    Engine(String),
}

/// An Argon2 implementation that turns password, salt and configuration into an encoded hash.
pub trait HashEngine {
    fn hash(
        &self,
        password: &[u8],
        salt: &[u8],
        config: &EngineConfig,
    ) -> Result<String, EngineError>;
}

/// Hash `password` with `salt` under `config` using `engine`.
pub fn hash_config<E: HashEngine + ?Sized>(
    engine: &E,
    password: &[u8],
    salt: &[u8],
    config: &Config,
) -> Result<String, EngineError> {
    let engine_config = config.engine_config();
    log::debug!(
        "hashing with m={} t={} p={} variant={}",
        engine_config.memory,
        engine_config.iterations,
        engine_config.parallelism,
        engine_config.variant
    );
    engine.hash(password, salt, &engine_config)
}
