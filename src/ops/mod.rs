//! Operation protocols over a loaded page
//!
//! Every operation other than registry bookkeeping follows the same
//! sequence: acquire page, operate, for mutators regenerate content, release
//! page. [`PageGuard`] makes the release unconditional: the page goes back
//! to the engine when the guard drops, on success and on every error path
//! alike, so engine page references are never leaked.

pub(crate) mod image;
pub(crate) mod inspect;
pub(crate) mod render;
pub(crate) mod text;

use crate::engine::DocumentEngine;
use crate::error::{DocumentError, Result};
use crate::types::ObjectKind;

/// RAII guard over an engine page reference.
pub(crate) struct PageGuard<'e, E: DocumentEngine> {
    engine: &'e E,
    page: Option<E::Page>,
}

impl<'e, E: DocumentEngine> PageGuard<'e, E> {
    /// Load `page_index` from `document`, mapping engine failures to
    /// [`DocumentError::PageLoad`] with the requested index.
    pub(crate) fn load(engine: &'e E, document: &E::Document, page_index: u32) -> Result<Self> {
        let page = engine
            .load_page(document, page_index)
            .map_err(|e| DocumentError::PageLoad {
                page_index,
                reason: e.to_string(),
            })?;

        Ok(Self {
            engine,
            page: Some(page),
        })
    }

    pub(crate) fn page(&self) -> &E::Page {
        // Only None after drop, which no caller can observe.
        self.page.as_ref().expect("page guard already released")
    }
}

impl<E: DocumentEngine> Drop for PageGuard<'_, E> {
    fn drop(&mut self) {
        if let Some(page) = self.page.take() {
            self.engine.close_page(page);
        }
    }
}

/// Validate that `object_id` addresses an existing object of `expected`
/// kind on the guarded page.
pub(crate) fn require_object_kind<E: DocumentEngine>(
    engine: &E,
    guard: &PageGuard<'_, E>,
    object_id: u32,
    expected: ObjectKind,
) -> Result<()> {
    let count = engine.object_count(guard.page());
    if object_id >= count {
        return Err(DocumentError::ObjectIndexOutOfRange { object_id, count });
    }

    let actual = engine.object_kind(guard.page(), object_id);
    if actual != expected {
        return Err(DocumentError::ObjectTypeMismatch {
            object_id,
            expected,
            actual,
        });
    }

    Ok(())
}

/// Run the post-mutation consistency pass. Failure is fatal to the
/// operation: the in-memory object may already be half-changed, so callers
/// surface it as a full operation failure.
pub(crate) fn regenerate<E: DocumentEngine>(
    engine: &E,
    guard: &PageGuard<'_, E>,
    page_index: u32,
) -> Result<()> {
    engine
        .regenerate_content(guard.page())
        .map_err(|e| DocumentError::ContentRegeneration {
            page_index,
            reason: e.to_string(),
        })
}
