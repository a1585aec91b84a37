//! Page object inspection

use super::PageGuard;
use crate::engine::DocumentEngine;
use crate::error::Result;
use crate::types::PageObjectDescriptor;

/// Enumerate every object on a page, in engine paint order.
///
/// The returned sequence is a snapshot of the page at load time: the ids
/// are stable for that page state and match the range mutation operations
/// validate against, but later mutations are not reflected in it.
pub(crate) fn list_objects<E: DocumentEngine>(
    engine: &E,
    document: &E::Document,
    page_index: u32,
) -> Result<Vec<PageObjectDescriptor>> {
    let guard = PageGuard::load(engine, document, page_index)?;
    let count = engine.object_count(guard.page());

    let mut objects = Vec::with_capacity(count as usize);
    for id in 0..count {
        objects.push(PageObjectDescriptor {
            id,
            kind: engine.object_kind(guard.page(), id),
            bounds: engine.object_bounds(guard.page(), id),
        });
    }

    Ok(objects)
}

/// Native page dimensions in points.
pub(crate) fn page_size<E: DocumentEngine>(
    engine: &E,
    document: &E::Document,
    page_index: u32,
) -> Result<(f32, f32)> {
    let guard = PageGuard::load(engine, document, page_index)?;
    Ok(engine.page_size(guard.page()))
}
