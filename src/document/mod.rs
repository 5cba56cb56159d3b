/// The mutable document tree.
///
/// This module provides the in-memory representation of a word-processing
/// document: an ordered body of paragraphs (plus optional header/footer
/// containers), each paragraph holding runs with character formatting and an
/// optional set of numbering markers tying it to a list definition.
///
/// # Example
///
/// ```rust
/// use quince::document::Document;
///
/// let mut doc = Document::new();
/// let para = doc.add_paragraph_with_text("Hello, World!");
/// para.set_style("Title");
///
/// let xml = doc.to_xml()?;
/// assert!(xml.contains("Hello, World!"));
/// # Ok::<(), quince::error::DomError>(())
/// ```
pub mod doc;
pub mod format;
pub mod paragraph;
pub mod run;

pub use doc::Document;
pub use format::Alignment;
pub use paragraph::{NumberingMarkers, Paragraph};
pub use run::Run;
