/// The mutable document tree.
use crate::document::paragraph::Paragraph;
use crate::error::Result;

/// A mutable word-processing document.
///
/// The body, header, and footer are ordered paragraph containers. Paragraphs
/// are owned by their container; everything else in the crate (lists,
/// membership queries) holds at most an index into the body, so removing a
/// paragraph silently orphans whatever referenced it.
#[derive(Debug, Default)]
pub struct Document {
    /// Document body paragraphs in document order
    body: Vec<Paragraph>,
    /// Header content (optional)
    header: Option<Vec<Paragraph>>,
    /// Footer content (optional)
    footer: Option<Vec<Paragraph>>,
    /// Whether the document has been modified
    modified: bool,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a new paragraph to the end of the body.
    pub fn add_paragraph(&mut self) -> &mut Paragraph {
        self.modified = true;
        self.body.push(Paragraph::new());
        self.body.last_mut().unwrap()
    }

    /// Add a paragraph with text.
    pub fn add_paragraph_with_text(&mut self, text: &str) -> &mut Paragraph {
        let para = self.add_paragraph();
        para.add_run_with_text(text);
        para
    }

    /// Append an already-built paragraph and return its body index.
    pub fn append_paragraph(&mut self, paragraph: Paragraph) -> usize {
        self.modified = true;
        self.body.push(paragraph);
        self.body.len() - 1
    }

    /// Get a paragraph by body index.
    pub fn paragraph(&self, index: usize) -> Option<&Paragraph> {
        self.body.get(index)
    }

    /// Get a mutable paragraph by body index.
    pub fn paragraph_mut(&mut self, index: usize) -> Option<&mut Paragraph> {
        self.modified = true;
        self.body.get_mut(index)
    }

    /// Remove a paragraph from the body.
    ///
    /// Shifts the indices of all following paragraphs; list handles pointing
    /// past the removed paragraph are orphaned.
    pub fn remove_paragraph(&mut self, index: usize) -> Option<Paragraph> {
        if index >= self.body.len() {
            return None;
        }
        self.modified = true;
        Some(self.body.remove(index))
    }

    /// Get the number of paragraphs in the body.
    pub fn paragraph_count(&self) -> usize {
        self.body.len()
    }

    /// Iterate over the body paragraphs.
    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.body.iter()
    }

    /// Check if the document has been modified.
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Check if the document has a header.
    pub fn has_header(&self) -> bool {
        self.header.is_some()
    }

    /// Check if the document has a footer.
    pub fn has_footer(&self) -> bool {
        self.footer.is_some()
    }

    /// Add a paragraph to the header, creating the header if needed.
    pub fn add_header_paragraph(&mut self) -> &mut Paragraph {
        self.modified = true;
        let header = self.header.get_or_insert_with(Vec::new);
        header.push(Paragraph::new());
        header.last_mut().unwrap()
    }

    /// Add a paragraph to the footer, creating the footer if needed.
    pub fn add_footer_paragraph(&mut self) -> &mut Paragraph {
        self.modified = true;
        let footer = self.footer.get_or_insert_with(Vec::new);
        footer.push(Paragraph::new());
        footer.last_mut().unwrap()
    }

    /// Serialize the document part to XML.
    pub fn to_xml(&self) -> Result<String> {
        let mut xml = String::with_capacity(4096);
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push_str(
            r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">"#,
        );
        xml.push_str("<w:body>");
        for para in &self.body {
            para.to_xml(&mut xml)?;
        }
        xml.push_str("</w:body>");
        xml.push_str("</w:document>");
        Ok(xml)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::paragraph::NumberingMarkers;

    #[test]
    fn test_create_empty_document() {
        let doc = Document::new();
        assert_eq!(doc.paragraph_count(), 0);
        assert!(!doc.is_modified());
    }

    #[test]
    fn test_add_paragraph() {
        let mut doc = Document::new();
        doc.add_paragraph_with_text("Hello, World!");
        assert_eq!(doc.paragraph_count(), 1);
        assert!(doc.is_modified());
    }

    #[test]
    fn test_append_paragraph_returns_index() {
        let mut doc = Document::new();
        doc.add_paragraph_with_text("first");
        let idx = doc.append_paragraph(Paragraph::new());
        assert_eq!(idx, 1);
        assert!(doc.paragraph(idx).is_some());
    }

    #[test]
    fn test_remove_paragraph_orphans_index() {
        let mut doc = Document::new();
        let mut para = Paragraph::new();
        para.set_numbering(NumberingMarkers { num_id: 1, level: 0 });
        let idx = doc.append_paragraph(para);

        assert!(doc.remove_paragraph(idx).is_some());
        assert!(doc.paragraph(idx).is_none());
    }

    #[test]
    fn test_xml_generation() {
        let mut doc = Document::new();
        doc.add_paragraph_with_text("Test paragraph");

        let xml = doc.to_xml().unwrap();
        assert!(xml.contains("<w:document"));
        assert!(xml.contains("<w:body>"));
        assert!(xml.contains("<w:p>"));
        assert!(xml.contains("Test paragraph"));
    }

    #[test]
    fn test_header_footer() {
        let mut doc = Document::new();
        assert!(!doc.has_header());
        doc.add_header_paragraph().add_run_with_text("header");
        doc.add_footer_paragraph().add_run_with_text("footer");
        assert!(doc.has_header());
        assert!(doc.has_footer());
    }
}
