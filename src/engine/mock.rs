//! In-memory engine used by unit tests
//!
//! Documents are a serde_json model, so `save_document` and `load_document`
//! round-trip through real bytes and arbitrary byte garbage fails to load.
//! The engine counts open pages and documents and supports failure
//! injection, so tests can assert that every error path still releases its
//! page and that teardown closes everything.

use std::cell::Cell;
use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use super::DocumentEngine;
use crate::adapter::BlockSource;
use crate::types::{ObjectBounds, ObjectKind};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct MockObject {
    pub(crate) kind: ObjectKind,
    pub(crate) bounds: ObjectBounds,
    #[serde(default)]
    pub(crate) text: Option<String>,
    #[serde(default)]
    pub(crate) image: Option<Vec<u8>>,
}

impl MockObject {
    pub(crate) fn text(content: &str) -> Self {
        Self {
            kind: ObjectKind::Text,
            bounds: ObjectBounds::new(10.0, 40.0, 110.0, 20.0),
            text: Some(content.to_string()),
            image: None,
        }
    }

    pub(crate) fn image() -> Self {
        Self {
            kind: ObjectKind::Image,
            bounds: ObjectBounds::new(0.0, 50.0, 50.0, 0.0),
            text: None,
            image: None,
        }
    }

    pub(crate) fn path() -> Self {
        Self {
            kind: ObjectKind::Path,
            bounds: ObjectBounds::new(5.0, 15.0, 25.0, 5.0),
            text: None,
            image: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct MockPage {
    pub(crate) width: f32,
    pub(crate) height: f32,
    pub(crate) objects: Vec<MockObject>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct MockModel {
    #[serde(default)]
    pub(crate) password: Option<String>,
    pub(crate) pages: Vec<MockPage>,
}

/// US Letter page with the given objects.
pub(crate) fn page(objects: Vec<MockObject>) -> MockPage {
    MockPage {
        width: 612.0,
        height: 792.0,
        objects,
    }
}

/// Serialized unprotected document.
pub(crate) fn doc_bytes(pages: Vec<MockPage>) -> Vec<u8> {
    serde_json::to_vec(&MockModel {
        password: None,
        pages,
    })
    .expect("serialize mock model")
}

/// Serialized password-protected document.
pub(crate) fn protected_doc_bytes(password: &str, pages: Vec<MockPage>) -> Vec<u8> {
    serde_json::to_vec(&MockModel {
        password: Some(password.to_string()),
        pages,
    })
    .expect("serialize mock model")
}

/// Counters and failure toggles, shared between an engine and the test that
/// handed it to a registry.
#[derive(Debug, Default)]
pub(crate) struct MockState {
    pub(crate) open_documents: Cell<u32>,
    pub(crate) open_pages: Cell<u32>,
    pub(crate) init_calls: Cell<u32>,
    pub(crate) shutdown_calls: Cell<u32>,
    pub(crate) regenerated: Cell<u32>,
    pub(crate) fail_set_text: Cell<bool>,
    pub(crate) fail_embed: Cell<bool>,
    pub(crate) fail_regenerate: Cell<bool>,
    pub(crate) fail_render: Cell<bool>,
    pub(crate) fail_save: Cell<bool>,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct MockEngine {
    pub(crate) state: Rc<MockState>,
}

pub(crate) struct MockPageRef {
    doc: Rc<RefCell<MockModel>>,
    index: usize,
}

impl DocumentEngine for MockEngine {
    type Document = Rc<RefCell<MockModel>>;
    type Page = MockPageRef;
    type Error = String;

    fn initialize(&self) {
        self.state.init_calls.set(self.state.init_calls.get() + 1);
    }

    fn shutdown(&self) {
        self.state
            .shutdown_calls
            .set(self.state.shutdown_calls.get() + 1);
    }

    fn load_document(
        &self,
        bytes: &[u8],
        password: Option<&str>,
    ) -> Result<Self::Document, String> {
        let model: MockModel = serde_json::from_slice(bytes)
            .map_err(|e| format!("not a loadable document: {e}"))?;

        if let Some(expected) = model.password.as_deref() {
            if password != Some(expected) {
                return Err("missing or incorrect password".to_string());
            }
        }

        self.state
            .open_documents
            .set(self.state.open_documents.get() + 1);
        Ok(Rc::new(RefCell::new(model)))
    }

    fn close_document(&self, _document: Self::Document) {
        self.state
            .open_documents
            .set(self.state.open_documents.get() - 1);
    }

    fn page_count(&self, document: &Self::Document) -> u32 {
        document.borrow().pages.len() as u32
    }

    fn save_document(&self, document: &Self::Document) -> Result<Vec<u8>, String> {
        if self.state.fail_save.get() {
            return Err("serialization disabled".to_string());
        }
        serde_json::to_vec(&*document.borrow()).map_err(|e| e.to_string())
    }

    fn load_page(&self, document: &Self::Document, page_index: u32) -> Result<Self::Page, String> {
        if page_index as usize >= document.borrow().pages.len() {
            return Err(format!("no page at index {page_index}"));
        }
        self.state.open_pages.set(self.state.open_pages.get() + 1);
        Ok(MockPageRef {
            doc: Rc::clone(document),
            index: page_index as usize,
        })
    }

    fn close_page(&self, _page: Self::Page) {
        self.state.open_pages.set(self.state.open_pages.get() - 1);
    }

    fn page_size(&self, page: &Self::Page) -> (f32, f32) {
        let doc = page.doc.borrow();
        let p = &doc.pages[page.index];
        (p.width, p.height)
    }

    fn object_count(&self, page: &Self::Page) -> u32 {
        page.doc.borrow().pages[page.index].objects.len() as u32
    }

    fn object_kind(&self, page: &Self::Page, object_id: u32) -> ObjectKind {
        page.doc.borrow().pages[page.index].objects[object_id as usize].kind
    }

    fn object_bounds(&self, page: &Self::Page, object_id: u32) -> ObjectBounds {
        page.doc.borrow().pages[page.index].objects[object_id as usize].bounds
    }

    fn set_text(&self, page: &Self::Page, object_id: u32, text: &[u16]) -> Result<(), String> {
        if self.state.fail_set_text.get() {
            return Err("text primitive rejected input".to_string());
        }

        let without_nul = text.strip_suffix(&[0u16][..]).unwrap_or(text);
        let decoded = String::from_utf16(without_nul).map_err(|e| e.to_string())?;

        page.doc.borrow_mut().pages[page.index].objects[object_id as usize].text = Some(decoded);
        Ok(())
    }

    fn embed_jpeg(
        &self,
        page: &Self::Page,
        object_id: u32,
        source: &dyn BlockSource,
    ) -> Result<(), String> {
        if self.state.fail_embed.get() {
            return Err("image primitive rejected input".to_string());
        }

        let len = source.len() as usize;
        if len < 2 {
            return Err("image data too short".to_string());
        }

        // Pull the data in two block reads, the way a real engine streams
        // file contents through the access callback.
        let mut magic = [0u8; 2];
        if !source.read_block(0, &mut magic) {
            return Err("source refused header read".to_string());
        }
        if magic != [0xFF, 0xD8] {
            return Err("data does not start with a jpeg marker".to_string());
        }

        let mut body = vec![0u8; len - 2];
        if !source.read_block(2, &mut body) {
            return Err("source refused body read".to_string());
        }

        let mut data = magic.to_vec();
        data.extend_from_slice(&body);
        page.doc.borrow_mut().pages[page.index].objects[object_id as usize].image = Some(data);
        Ok(())
    }

    fn regenerate_content(&self, _page: &Self::Page) -> Result<(), String> {
        if self.state.fail_regenerate.get() {
            return Err("content stream rewrite failed".to_string());
        }
        self.state.regenerated.set(self.state.regenerated.get() + 1);
        Ok(())
    }

    fn render_page(
        &self,
        page: &Self::Page,
        width: u32,
        height: u32,
        pixels: &mut [u8],
    ) -> Result<(), String> {
        if self.state.fail_render.get() {
            return Err("raster device failed".to_string());
        }
        if width == 0 || height == 0 {
            return Err("empty raster target".to_string());
        }
        if pixels.len() != width as usize * height as usize * 4 {
            return Err("pixel buffer size mismatch".to_string());
        }

        // Deterministic fill so tests can tell rendered output from the
        // white-initialized buffer.
        for px in pixels.chunks_exact_mut(4) {
            px[0] = page.index as u8;
            px[1] = 0x80;
            px[2] = 0x40;
        }
        Ok(())
    }
}
