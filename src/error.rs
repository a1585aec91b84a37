//! Failure taxonomy for registry and page operations
//!
//! Every failure is detected at the failing engine call, carries enough
//! context to diagnose without inspecting engine state (handle, page index,
//! object id, valid range), and is surfaced synchronously. Nothing is
//! retried. Any page acquired by the failing operation is released before
//! the error reaches the caller.

use thiserror::Error;

use crate::registry::DocumentHandle;
use crate::types::{ImageFormat, ObjectKind};

/// Unified error type for all document operations
#[derive(Debug, Error)]
pub enum DocumentError {
    /// Handle is absent from the registry (never opened, or closed)
    #[error("invalid document handle: {0}")]
    InvalidHandle(DocumentHandle),

    /// Engine could not load the document (malformed bytes, bad password)
    #[error("failed to load document: {0}")]
    DocumentLoad(String),

    /// Page index has no corresponding page
    #[error("failed to load page {page_index}: {reason}")]
    PageLoad { page_index: u32, reason: String },

    /// Object id outside `[0, count)` for the loaded page
    #[error("object id {object_id} out of range [0, {count})")]
    ObjectIndexOutOfRange { object_id: u32, count: u32 },

    /// Operation requires a different object type than found
    #[error("object {object_id} is a {actual} object, expected {expected}")]
    ObjectTypeMismatch {
        object_id: u32,
        expected: ObjectKind,
        actual: ObjectKind,
    },

    /// Requested embedding format is not implemented
    #[error("unsupported image format {0}: only jpeg can be embedded inline, convert other formats to jpeg first")]
    UnsupportedFormat(ImageFormat),

    /// Engine text-set primitive rejected the payload
    #[error("engine rejected replacement text for object {object_id}: {reason}")]
    TextMutation { object_id: u32, reason: String },

    /// Engine inline-image primitive rejected the payload
    #[error("failed to embed image into object {object_id}: {reason}")]
    ImageEmbed { object_id: u32, reason: String },

    /// Post-mutation consistency pass failed; the page must be treated as
    /// being in an unspecified state and the document discarded or reopened
    #[error("content regeneration failed on page {page_index}: {reason}")]
    ContentRegeneration { page_index: u32, reason: String },

    /// Render scale was non-positive or non-finite
    #[error("invalid render scale {0}: expected a finite positive number")]
    InvalidScale(f32),

    /// Engine could not produce a consistent serialization
    #[error("failed to save document: {0}")]
    Save(String),

    /// Engine rasterizer failed
    #[error("failed to render page {page_index}: {reason}")]
    Render { page_index: u32, reason: String },

    /// Pixel buffer conversion or encoding failed
    #[error("image error: {0}")]
    Image(String),
}

/// Result type alias for document operations
pub type Result<T> = std::result::Result<T, DocumentError>;
