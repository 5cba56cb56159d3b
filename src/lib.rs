//! Quince - an in-memory document object model for word-processing files
//!
//! This library provides a mutable representation of a structured text
//! document (paragraphs, runs, styles) together with a full list numbering
//! subsystem: reusable style templates, per-use numbering definitions with
//! level overrides, a document-scoped registry with id allocation, and a
//! list builder with explicit unbound/bound states.
//!
//! # Example - Building a numbered list
//!
//! ```rust
//! use quince::document::Document;
//! use quince::numbering::{List, NumberingRegistry};
//! use quince::package::MemoryPartStore;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut doc = Document::new();
//! let mut registry = NumberingRegistry::new();
//!
//! // Accumulate items on an unbound list, then bind it to the document.
//! let mut list = List::numbered(1);
//! list.add_item(&mut doc, "first", 0);
//! list.add_item(&mut doc, "second", 1);
//! let bound = list.bind(&mut doc, &mut registry)?;
//! assert!(bound.num_id() > 0);
//!
//! // Persist the numbering part.
//! let mut store = MemoryPartStore::new();
//! registry.save(&mut store)?;
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Querying a paragraph's numbering
//!
//! ```rust
//! use quince::document::Document;
//! use quince::numbering::{List, NumberFormat, NumberingRegistry, queries};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut doc = Document::new();
//! let mut registry = NumberingRegistry::new();
//!
//! let mut list = List::bulleted();
//! let index = list.add_item(&mut doc, "item", 0);
//! list.bind(&mut doc, &mut registry)?;
//!
//! let para = doc.paragraph(index).unwrap();
//! assert!(queries::is_list_item(para));
//! assert_eq!(queries::numbering_format(para, &registry)?, NumberFormat::Bullet);
//! # Ok(())
//! # }
//! ```

pub mod document;
pub mod error;
pub mod numbering;
pub mod package;

pub use document::{Document, Paragraph, Run};
pub use error::{DomError, Result};
pub use numbering::{BoundList, List, NumberingRegistry};
pub use package::{FilePartStore, MemoryPartStore, PartStore};
