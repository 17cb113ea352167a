use error_location::ErrorLocation;
use thiserror::Error;

/// Binding coordination errors with source location tracking.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Persisted slot record could not be read or parsed.
    #[error("Store load failed for slot {slot_id}: {reason} {location}")]
    StoreLoadFailed {
        /// Slot whose record failed to load.
        slot_id: String,
        /// Description of the load failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Persisted slot record could not be written.
    #[error("Store save failed for slot {slot_id}: {reason} {location}")]
    StoreSaveFailed {
        /// Slot whose record failed to save.
        slot_id: String,
        /// Description of the save failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// OS-level hotkey registration or unregistration failed.
    #[error("Hotkey registration failed: {reason} {location}")]
    RegistrationFailed {
        /// Description of the registration failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// A native action command was rejected.
    #[error("Action failed: {reason} {location}")]
    ActionFailed {
        /// Description of the action failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Failed to send a message through an async channel.
    #[error("Channel send failed: {reason} {location}")]
    ChannelSendFailed {
        /// Description of the send failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },
}

/// Result type alias using [`CoreError`].
pub type Result<T> = std::result::Result<T, CoreError>;
