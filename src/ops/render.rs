//! Page rasterization

use super::PageGuard;
use crate::engine::DocumentEngine;
use crate::error::{DocumentError, Result};
use crate::types::RenderResult;

/// Rasterize a page into a white-initialized RGBA buffer.
///
/// Output dimensions are the native page size scaled by `scale`, rounded to
/// the nearest pixel. The registry validates `scale` before calling in, so
/// no engine work happens for an invalid scale. Rendering is read-only and
/// may be repeated with different scales without side effects.
pub(crate) fn render<E: DocumentEngine>(
    engine: &E,
    document: &E::Document,
    page_index: u32,
    scale: f32,
) -> Result<RenderResult> {
    let guard = PageGuard::load(engine, document, page_index)?;
    let (page_width, page_height) = engine.page_size(guard.page());

    let width = (page_width * scale).round() as u32;
    let height = (page_height * scale).round() as u32;

    let mut pixels = vec![0xFF; width as usize * height as usize * 4];
    engine
        .render_page(guard.page(), width, height, &mut pixels)
        .map_err(|e| DocumentError::Render {
            page_index,
            reason: e.to_string(),
        })?;

    Ok(RenderResult {
        pixels,
        width,
        height,
    })
}
