/// List numbering support.
///
/// Numbering is split across three entity layers that live in one
/// document-scoped registry:
/// - [`StyleTemplate`]: a reusable per-depth formatting template,
/// - [`Definition`]: a concrete numbering instance binding one list usage
///   to a template, optionally carrying per-level overrides,
/// - paragraph markers: each member paragraph stores its own depth and
///   definition id.
///
/// The [`NumberingRegistry`] owns templates and definitions, allocates
/// their ids, and persists the collection as one part. Lists are built
/// unbound ([`List`]) and materialized into a registry-backed
/// [`BoundList`] when bound to a document.
///
/// # Example
///
/// ```rust
/// use quince::document::Document;
/// use quince::numbering::{List, NumberingRegistry, queries};
///
/// let mut doc = Document::new();
/// let mut registry = NumberingRegistry::new();
///
/// let mut list = List::numbered(1);
/// list.add_item(&mut doc, "first", 0);
/// list.add_item(&mut doc, "second", 0);
///
/// let bound = list.bind(&mut doc, &mut registry)?;
/// let first = doc.paragraph(0).unwrap();
/// assert_eq!(queries::list_num_id(first), Some(bound.num_id()));
/// # Ok::<(), quince::error::DomError>(())
/// ```
pub mod definition;
pub mod list;
pub mod queries;
pub mod registry;
pub mod template;
pub(crate) mod xml;

pub use definition::{Definition, LevelOverride};
pub use list::{BoundList, List, ListItem};
pub use registry::{NumberingRegistry, ResolvedDefinition};
pub use template::{
    Level, LevelType, MAX_LEVELS, NumberFormat, StyleTemplate, default_level_text,
};
