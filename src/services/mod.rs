//! Capability services.
//!
//! Each service is a leaf: it depends only on its host collaborators, never
//! on another service.

mod assets;
mod recognition;
mod resources;

pub use assets::AssetService;
pub use recognition::TextRecognitionService;
pub use resources::{
    DOCUMENT_MIME_TYPE, IMAGE_MIME_TYPE, ResourceAccessService, SHARE_CHOOSER_TITLE,
};
