//! Text object mutation

use super::{regenerate, require_object_kind, PageGuard};
use crate::engine::DocumentEngine;
use crate::error::{DocumentError, Result};
use crate::types::ObjectKind;

/// Replace the text content of a text object, then regenerate the page so
/// the edit is reflected in later renders and saves.
///
/// Replacing text does not alter the object's bounding geometry as reported
/// by [`list_objects`](super::inspect::list_objects); bounds reflow is the
/// engine's concern.
pub(crate) fn set_text<E: DocumentEngine>(
    engine: &E,
    document: &E::Document,
    page_index: u32,
    object_id: u32,
    new_text: &str,
) -> Result<()> {
    let guard = PageGuard::load(engine, document, page_index)?;
    require_object_kind(engine, &guard, object_id, ObjectKind::Text)?;

    // Wide-string form with the terminating NUL the engine expects.
    let wide: Vec<u16> = new_text.encode_utf16().chain(std::iter::once(0)).collect();

    engine
        .set_text(guard.page(), object_id, &wide)
        .map_err(|e| DocumentError::TextMutation {
            object_id,
            reason: e.to_string(),
        })?;

    regenerate(engine, &guard, page_index)
}
