//! Engine capability boundary
//!
//! The core never parses, lays out, or rasterizes anything itself; it drives
//! an external engine through the narrow trait below. The trait is modeled
//! on the raw surface of page-based rendering engines (load/close for
//! documents and pages, indexed object access, a text-set primitive, inline
//! image loading through a file-access callback, content regeneration, and
//! a rasterizer targeting a caller-owned buffer), so an FFI-backed
//! implementation drops in without changes to the protocol logic.
//!
//! # Contract
//!
//! Engines are assumed non-reentrant and not thread-safe. The registry
//! serializes every call through one mutex; implementations never see two
//! concurrent invocations. `initialize` and `shutdown` bracket the engine
//! library lifecycle and are each called at most once per registry.

use std::fmt::Display;

use crate::adapter::BlockSource;
use crate::types::{ObjectBounds, ObjectKind};

#[cfg(test)]
pub(crate) mod mock;

/// Operations the core requires from a rendering engine.
pub trait DocumentEngine {
    /// Engine-owned document reference.
    type Document;
    /// Engine-owned reference to a loaded page. Scoped to one operation;
    /// the core always returns it through [`DocumentEngine::close_page`].
    type Page;
    /// Engine-level failure, stringified into the core's error taxonomy at
    /// the failing call site.
    type Error: Display;

    /// One-time library initialization, before the first document load.
    fn initialize(&self) {}

    /// Counterpart to `initialize`, called once at registry teardown.
    fn shutdown(&self) {}

    fn load_document(
        &self,
        bytes: &[u8],
        password: Option<&str>,
    ) -> std::result::Result<Self::Document, Self::Error>;

    fn close_document(&self, document: Self::Document);

    fn page_count(&self, document: &Self::Document) -> u32;

    /// Serialize the current in-memory document state, including any prior
    /// mutations.
    fn save_document(&self, document: &Self::Document) -> std::result::Result<Vec<u8>, Self::Error>;

    fn load_page(
        &self,
        document: &Self::Document,
        page_index: u32,
    ) -> std::result::Result<Self::Page, Self::Error>;

    fn close_page(&self, page: Self::Page);

    /// Native page size in points (width, height).
    fn page_size(&self, page: &Self::Page) -> (f32, f32);

    fn object_count(&self, page: &Self::Page) -> u32;

    /// Type tag of the object at `object_id`. Callers validate the index
    /// against [`DocumentEngine::object_count`] first.
    fn object_kind(&self, page: &Self::Page, object_id: u32) -> ObjectKind;

    fn object_bounds(&self, page: &Self::Page, object_id: u32) -> ObjectBounds;

    /// Replace the text content of a text object. `text` is UTF-16 code
    /// units with a terminating NUL, the wide-string form text-set
    /// primitives expect.
    fn set_text(
        &self,
        page: &Self::Page,
        object_id: u32,
        text: &[u16],
    ) -> std::result::Result<(), Self::Error>;

    /// Attach already-encoded JPEG data to an image object, reading it
    /// through the bounded `source`.
    fn embed_jpeg(
        &self,
        page: &Self::Page,
        object_id: u32,
        source: &dyn BlockSource,
    ) -> std::result::Result<(), Self::Error>;

    /// Rewrite the page's content representation after a direct object
    /// mutation, so the change is reflected in later renders and saves.
    fn regenerate_content(&self, page: &Self::Page) -> std::result::Result<(), Self::Error>;

    /// Rasterize the page into `pixels`: RGBA8 row-major,
    /// `width * height * 4` bytes, pre-filled by the caller.
    fn render_page(
        &self,
        page: &Self::Page,
        width: u32,
        height: u32,
        pixels: &mut [u8],
    ) -> std::result::Result<(), Self::Error>;
}
