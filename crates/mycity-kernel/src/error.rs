//! Kernel error types.
//!
//! Every public API in this crate surfaces failures through [`KernelError`].
//! Routing failures are hard errors returned to the caller: an unrecognised
//! intent is never turned into a spoken fallback at this layer.

/// Boxed error type returned by intent handlers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Unified error type for the MyCity intent router.
#[derive(Debug, thiserror::Error)]
pub enum KernelError {
    // -- Dispatch errors ----------------------------------------------------
    /// The intent name is neither registered nor `SetAddressIntent`.
    #[error("invalid intent: {intent}")]
    InvalidIntent { intent: String },

    /// An intent request arrived without an intent name.
    #[error("intent request is missing an intent name")]
    MissingIntentName,

    /// The platform sent a request type the dispatcher does not handle.
    #[error("unsupported request type: {request_type}")]
    UnsupportedRequestType { request_type: String },

    /// The request was issued for a different skill.
    #[error("invalid application id: {}", application_id.as_deref().unwrap_or("<none>"))]
    InvalidApplicationId { application_id: Option<String> },

    // -- Registry errors ----------------------------------------------------
    /// The intent name was registered twice.
    #[error("intent already registered: {intent}")]
    DuplicateIntent { intent: String },

    /// The intent name is handled by the dispatcher itself and cannot be
    /// registered.
    #[error("intent is reserved by the dispatcher: {intent}")]
    ReservedIntent { intent: String },

    // -- Handler errors -----------------------------------------------------
    /// An intent handler failed.  The handler's error is passed through as-is.
    #[error(transparent)]
    Handler(BoxError),

    // -- Serialization ------------------------------------------------------
    /// A platform event or reply could not be (de)serialized.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias used throughout the kernel crate.
pub type Result<T> = std::result::Result<T, KernelError>;
