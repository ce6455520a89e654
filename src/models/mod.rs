//! Data models for the capability bridge.
//!
//! Everything here is transient: requests and results live for one
//! invocation, copy jobs for one background copy. Nothing is persisted.

mod asset;
mod intent;
mod recognition;
mod reference;
mod request;

pub use asset::AssetCopyJob;
pub use intent::{CATEGORY_DEFAULT, HostIntent, IntentAction, IntentFlag};
pub use recognition::{RecognitionOutcome, ScriptProfile};
pub use reference::{CONTENT_SCHEME, ContentUri, FILE_URI_PREFIX, ResourceReference};
pub use request::{CapabilityRequest, CapabilityResult, FailureKind};
