//! Intent handler error types.
//!
//! City service lookups and directory loading surface errors through
//! [`IntentError`].  Handlers turn lookup failures into spoken fallbacks, so
//! these mostly reach callers during startup.

use std::path::PathBuf;

/// Unified error type for the intent handlers and city services.
#[derive(Debug, thiserror::Error)]
pub enum IntentError {
    // -- Directory errors ----------------------------------------------------
    /// The city directory file could not be read.
    #[error("failed to read city directory {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The city directory file is not valid TOML for the expected schema.
    #[error("invalid city directory: {0}")]
    Toml(#[from] toml::de::Error),

    // -- Service errors ------------------------------------------------------
    /// A city service could not answer.  The bundled directory never fails
    /// this way; the variant is for live service backends behind the
    /// `services` traits.
    #[error("{service} lookup failed: {reason}")]
    Lookup {
        service: &'static str,
        reason: String,
    },

    // -- Upstream crate errors -----------------------------------------------
    /// An error propagated from the kernel crate.
    #[error("kernel error: {0}")]
    Kernel(#[from] mycity_kernel::KernelError),
}

/// Convenience alias used throughout the intents crate.
pub type Result<T> = std::result::Result<T, IntentError>;
