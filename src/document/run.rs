/// Run types and implementation for the document tree.
use crate::document::format::escape_xml;
use crate::error::Result;
use std::fmt::Write as FmtWrite;

/// A text run with character formatting.
#[derive(Debug, Clone, PartialEq)]
pub struct Run {
    /// Text content
    text: String,
    /// Run properties
    properties: RunProperties,
}

/// Character formatting for a run.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct RunProperties {
    pub(crate) bold: Option<bool>,
    pub(crate) italic: Option<bool>,
    pub(crate) font_name: Option<String>,
    /// Font size in half-points (e.g., 24 = 12pt)
    pub(crate) font_size: Option<u32>,
}

impl RunProperties {
    fn has_properties(&self) -> bool {
        self.bold.is_some()
            || self.italic.is_some()
            || self.font_name.is_some()
            || self.font_size.is_some()
    }
}

impl Run {
    pub(crate) fn new() -> Self {
        Self {
            text: String::new(),
            properties: RunProperties::default(),
        }
    }

    /// Set the text content.
    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }

    /// Get the text content.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Make the text bold.
    pub fn set_bold(&mut self, bold: bool) -> &mut Self {
        self.properties.bold = Some(bold);
        self
    }

    /// Make the text italic.
    pub fn set_italic(&mut self, italic: bool) -> &mut Self {
        self.properties.italic = Some(italic);
        self
    }

    /// Set the font name.
    pub fn set_font_name(&mut self, name: &str) -> &mut Self {
        self.properties.font_name = Some(name.to_string());
        self
    }

    /// Set the font size in half-points (e.g., 24 = 12pt).
    pub fn set_font_size(&mut self, size: u32) -> &mut Self {
        self.properties.font_size = Some(size);
        self
    }

    /// Get the font name, if set.
    pub fn font_name(&self) -> Option<&str> {
        self.properties.font_name.as_deref()
    }

    /// Get the font size in half-points, if set.
    pub fn font_size(&self) -> Option<u32> {
        self.properties.font_size
    }

    pub(crate) fn to_xml(&self, xml: &mut String) -> Result<()> {
        xml.push_str("<w:r>");

        if self.properties.has_properties() {
            xml.push_str("<w:rPr>");
            if let Some(ref name) = self.properties.font_name {
                write!(
                    xml,
                    "<w:rFonts w:ascii=\"{0}\" w:hAnsi=\"{0}\"/>",
                    escape_xml(name)
                )?;
            }
            if self.properties.bold == Some(true) {
                xml.push_str("<w:b/>");
            }
            if self.properties.italic == Some(true) {
                xml.push_str("<w:i/>");
            }
            if let Some(size) = self.properties.font_size {
                write!(xml, "<w:sz w:val=\"{}\"/>", size)?;
            }
            xml.push_str("</w:rPr>");
        }

        if !self.text.is_empty() {
            write!(
                xml,
                "<w:t xml:space=\"preserve\">{}</w:t>",
                escape_xml(&self.text)
            )?;
        }

        xml.push_str("</w:r>");
        Ok(())
    }
}

impl Default for Run {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_text() {
        let mut run = Run::new();
        run.set_text("Hello");
        assert_eq!(run.text(), "Hello");
    }

    #[test]
    fn test_run_formatting_xml() {
        let mut run = Run::new();
        run.set_text("Bold");
        run.set_bold(true).set_font_name("Calibri").set_font_size(24);

        let mut xml = String::new();
        run.to_xml(&mut xml).unwrap();
        assert!(xml.contains("<w:b/>"));
        assert!(xml.contains("w:ascii=\"Calibri\""));
        assert!(xml.contains("<w:sz w:val=\"24\"/>"));
    }

    #[test]
    fn test_run_escapes_text() {
        let mut run = Run::new();
        run.set_text("a < b");

        let mut xml = String::new();
        run.to_xml(&mut xml).unwrap();
        assert!(xml.contains("a &lt; b"));
    }
}
