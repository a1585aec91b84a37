//! Palimpsest
//!
//! Document handle registry and page-object editing core over a pluggable
//! rendering engine.
//!
//! The engine itself (document parsing, text layout, object graph,
//! rasterizer) is an external collaborator behind the
//! [`engine::DocumentEngine`] trait. This crate owns the protocol around
//! it: which documents are open, how a page object is mutated without
//! corrupting the document's internal representation, and how a page
//! becomes pixels.
//!
//! # Modules
//!
//! - `registry`: open-document tracking and the public operation surface
//! - `engine`: the capability trait the core consumes
//! - `adapter`: in-memory file-access adapter for inline image embedding
//! - `types`: host-facing data model (descriptors, render results)
//! - `error`: failure taxonomy
//!
//! # Usage
//!
//! ```rust,ignore
//! use palimpsest::{DocumentRegistry, ImageFormat};
//!
//! let registry = DocumentRegistry::new(engine);
//!
//! let handle = registry.open(&bytes, None)?;
//! let objects = registry.list_objects(handle, 0)?;
//! registry.set_text(handle, 0, objects[0].id, "Hello")?;
//! registry.replace_image(handle, 0, 2, &jpeg_bytes, ImageFormat::Jpeg)?;
//!
//! let page = registry.render(handle, 0, 2.0)?;
//! let saved = registry.save(handle)?;
//! registry.close(handle);
//! ```

pub mod adapter;
pub mod engine;
pub mod error;
pub mod registry;
pub mod types;

mod ops;

pub use adapter::{BlockSource, BufferSource};
pub use engine::DocumentEngine;
pub use error::{DocumentError, Result};
pub use registry::{DocumentHandle, DocumentRegistry};
pub use types::{ImageFormat, ObjectBounds, ObjectKind, PageObjectDescriptor, RenderResult};
