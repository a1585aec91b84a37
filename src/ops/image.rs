//! Image object replacement

use super::{regenerate, require_object_kind, PageGuard};
use crate::adapter::BufferSource;
use crate::engine::DocumentEngine;
use crate::error::{DocumentError, Result};
use crate::types::{ImageFormat, ObjectKind};

/// Replace the pixel content of an image object with already-encoded JPEG
/// data, then regenerate the page.
///
/// Only [`ImageFormat::Jpeg`] can be embedded without decoding; any other
/// format fails with [`DocumentError::UnsupportedFormat`] before the target
/// object is touched. This is a deliberate scope limit of the inline
/// embedding path, not a missing decode feature: callers transcode to JPEG
/// first.
pub(crate) fn replace_image<E: DocumentEngine>(
    engine: &E,
    document: &E::Document,
    page_index: u32,
    object_id: u32,
    image_bytes: &[u8],
    format: ImageFormat,
) -> Result<()> {
    let guard = PageGuard::load(engine, document, page_index)?;
    require_object_kind(engine, &guard, object_id, ObjectKind::Image)?;

    if format != ImageFormat::Jpeg {
        return Err(DocumentError::UnsupportedFormat(format));
    }

    let source = BufferSource::new(image_bytes);
    engine
        .embed_jpeg(guard.page(), object_id, &source)
        .map_err(|e| DocumentError::ImageEmbed {
            object_id,
            reason: e.to_string(),
        })?;

    regenerate(engine, &guard, page_index)
}
