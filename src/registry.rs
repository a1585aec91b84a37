//! Document handle registry
//!
//! Owns every open engine document and is the single chokepoint through
//! which operations reach them: no operation touches a document the
//! registry does not know about. Handles are opaque positive integers,
//! allocated monotonically and never reused within a process.
//!
//! # Design
//!
//! The engine is assumed non-reentrant and not thread-safe, so it lives
//! inside the registry mutex together with the handle map. Every public
//! operation, bookkeeping and engine work alike, holds the one lock for its
//! full duration; each call is atomic from the caller's perspective.

use std::collections::HashMap;
use std::fmt;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::engine::DocumentEngine;
use crate::error::{DocumentError, Result};
use crate::ops;
use crate::types::{ImageFormat, PageObjectDescriptor, RenderResult};

/// Opaque identifier for an open document.
///
/// Serializes as a bare integer so host bindings can marshal it as a
/// number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentHandle(u64);

impl DocumentHandle {
    /// Raw handle value.
    pub fn value(self) -> u64 {
        self.0
    }

    /// Rebuild a handle from a raw value received from a host binding.
    ///
    /// Carries no validity guarantee; operations on a value the registry
    /// never issued (or has since closed) fail with
    /// [`DocumentError::InvalidHandle`].
    pub fn from_value(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for DocumentHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Registry state guarded by the engine mutex.
struct Inner<E: DocumentEngine> {
    engine: E,
    documents: HashMap<u64, E::Document>,
    next_handle: u64,
    engine_ready: bool,
}

impl<E: DocumentEngine> Inner<E> {
    fn resolve(&self, handle: DocumentHandle) -> Result<&E::Document> {
        self.documents
            .get(&handle.0)
            .ok_or(DocumentError::InvalidHandle(handle))
    }

    fn ensure_engine_ready(&mut self) {
        if !self.engine_ready {
            self.engine.initialize();
            self.engine_ready = true;
        }
    }
}

/// Registry of open documents over a rendering engine.
///
/// All operations from the public surface live here; they resolve their
/// handle, run their protocol under the registry mutex, and release any
/// page they loaded before returning.
pub struct DocumentRegistry<E: DocumentEngine> {
    inner: Mutex<Inner<E>>,
}

impl<E: DocumentEngine> DocumentRegistry<E> {
    /// Create a registry over `engine`.
    ///
    /// The engine is initialized lazily on the first open and shut down
    /// once when the registry drops.
    pub fn new(engine: E) -> Self {
        Self {
            inner: Mutex::new(Inner {
                engine,
                documents: HashMap::new(),
                next_handle: 1,
                engine_ready: false,
            }),
        }
    }

    /// Load a document from `bytes` and register it under a fresh handle.
    ///
    /// The handle counter advances only on success, and handle values are
    /// never reused, even after close.
    pub fn open(&self, bytes: &[u8], password: Option<&str>) -> Result<DocumentHandle> {
        let mut inner = self.inner.lock();
        inner.ensure_engine_ready();

        let document = inner
            .engine
            .load_document(bytes, password)
            .map_err(|e| DocumentError::DocumentLoad(e.to_string()))?;

        let handle = DocumentHandle(inner.next_handle);
        inner.next_handle += 1;
        inner.documents.insert(handle.0, document);

        tracing::debug!(handle = handle.0, bytes = bytes.len(), "opened document");
        Ok(handle)
    }

    /// Close `handle` and release its engine document.
    ///
    /// Closing an unknown or already-closed handle is a silent no-op, so
    /// callers can close unconditionally and close is idempotent.
    pub fn close(&self, handle: DocumentHandle) {
        let mut inner = self.inner.lock();
        if let Some(document) = inner.documents.remove(&handle.0) {
            inner.engine.close_document(document);
            tracing::debug!(handle = handle.0, "closed document");
        }
    }

    /// Number of pages in the document.
    pub fn page_count(&self, handle: DocumentHandle) -> Result<u32> {
        let inner = self.inner.lock();
        let document = inner.resolve(handle)?;
        Ok(inner.engine.page_count(document))
    }

    /// Serialize the current in-memory document state, reflecting any prior
    /// mutations. The byte-level format is owned entirely by the engine.
    pub fn save(&self, handle: DocumentHandle) -> Result<Vec<u8>> {
        let inner = self.inner.lock();
        let document = inner.resolve(handle)?;

        let bytes = inner
            .engine
            .save_document(document)
            .map_err(|e| DocumentError::Save(e.to_string()))?;

        tracing::debug!(handle = handle.0, bytes = bytes.len(), "saved document");
        Ok(bytes)
    }

    /// Snapshot of every object on a page, in engine paint order.
    pub fn list_objects(
        &self,
        handle: DocumentHandle,
        page_index: u32,
    ) -> Result<Vec<PageObjectDescriptor>> {
        let inner = self.inner.lock();
        let document = inner.resolve(handle)?;
        ops::inspect::list_objects(&inner.engine, document, page_index)
    }

    /// Native page dimensions in points.
    pub fn page_size(&self, handle: DocumentHandle, page_index: u32) -> Result<(f32, f32)> {
        let inner = self.inner.lock();
        let document = inner.resolve(handle)?;
        ops::inspect::page_size(&inner.engine, document, page_index)
    }

    /// Replace the text content of the text object at `object_id`.
    pub fn set_text(
        &self,
        handle: DocumentHandle,
        page_index: u32,
        object_id: u32,
        new_text: &str,
    ) -> Result<()> {
        let inner = self.inner.lock();
        let document = inner.resolve(handle)?;
        ops::text::set_text(&inner.engine, document, page_index, object_id, new_text)?;

        tracing::debug!(handle = handle.0, page_index, object_id, "set text object");
        Ok(())
    }

    /// Replace the pixel content of the image object at `object_id` with
    /// already-encoded image data. Only [`ImageFormat::Jpeg`] is supported.
    pub fn replace_image(
        &self,
        handle: DocumentHandle,
        page_index: u32,
        object_id: u32,
        image_bytes: &[u8],
        format: ImageFormat,
    ) -> Result<()> {
        let inner = self.inner.lock();
        let document = inner.resolve(handle)?;
        ops::image::replace_image(
            &inner.engine,
            document,
            page_index,
            object_id,
            image_bytes,
            format,
        )?;

        tracing::debug!(
            handle = handle.0,
            page_index,
            object_id,
            bytes = image_bytes.len(),
            "replaced image object"
        );
        Ok(())
    }

    /// Rasterize a page at `scale` into a packed RGBA buffer.
    ///
    /// `scale` must be a finite positive number; anything else fails with
    /// [`DocumentError::InvalidScale`] before the handle is even resolved.
    pub fn render(
        &self,
        handle: DocumentHandle,
        page_index: u32,
        scale: f32,
    ) -> Result<RenderResult> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(DocumentError::InvalidScale(scale));
        }

        let inner = self.inner.lock();
        let document = inner.resolve(handle)?;
        ops::render::render(&inner.engine, document, page_index, scale)
    }

    /// Number of currently open documents.
    pub fn open_count(&self) -> usize {
        self.inner.lock().documents.len()
    }
}

impl<E: DocumentEngine> Drop for DocumentRegistry<E> {
    /// Teardown: close every remaining document, then release the engine
    /// exactly once. Safe when no document was ever opened.
    fn drop(&mut self) {
        let inner = self.inner.get_mut();

        let documents = std::mem::take(&mut inner.documents);
        let remaining = documents.len();
        for (_, document) in documents {
            inner.engine.close_document(document);
        }
        if remaining > 0 {
            tracing::debug!(remaining, "closed documents left open at teardown");
        }

        if inner.engine_ready {
            inner.engine.shutdown();
            inner.engine_ready = false;
        }
    }
}
