/// Paragraph types and implementation for the document tree.
use crate::document::format::{Alignment, escape_xml};
use crate::document::run::Run;
use crate::error::Result;
use std::fmt::Write as FmtWrite;

/// Numbering markers stamped on a list-member paragraph.
///
/// These are the paragraph's own copy of its list membership: the
/// indentation depth and the numbering definition it references. A `num_id`
/// of 0 means the paragraph belongs to a list that has not been bound to a
/// registry definition yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberingMarkers {
    /// Numbering definition id (`w:numId`); 0 while the owning list is unbound
    pub num_id: u32,
    /// 0-based indentation depth (`w:ilvl`)
    pub level: u8,
}

/// A paragraph with runs and paragraph-level formatting.
#[derive(Debug, Clone, PartialEq)]
pub struct Paragraph {
    /// Runs in this paragraph
    runs: Vec<Run>,
    /// Paragraph style ID
    style: Option<String>,
    /// Paragraph properties
    properties: ParagraphProperties,
}

/// Paragraph properties.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct ParagraphProperties {
    pub(crate) alignment: Option<Alignment>,
    pub(crate) numbering: Option<NumberingMarkers>,
    /// Left indentation in twips
    pub(crate) indent_left: Option<u32>,
    /// Hanging indentation in twips
    pub(crate) indent_hanging: Option<u32>,
}

impl ParagraphProperties {
    fn has_properties(&self) -> bool {
        self.alignment.is_some()
            || self.numbering.is_some()
            || self.indent_left.is_some()
            || self.indent_hanging.is_some()
    }
}

impl Paragraph {
    /// Create a new empty paragraph.
    pub fn new() -> Self {
        Self {
            runs: Vec::new(),
            style: None,
            properties: ParagraphProperties::default(),
        }
    }

    /// Add a new run to the paragraph.
    pub fn add_run(&mut self) -> &mut Run {
        self.runs.push(Run::new());
        self.runs.last_mut().unwrap()
    }

    /// Add a run with text.
    pub fn add_run_with_text(&mut self, text: &str) -> &mut Run {
        let run = self.add_run();
        run.set_text(text);
        run
    }

    /// Get the runs in this paragraph.
    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    /// Get mutable access to the runs in this paragraph.
    pub fn runs_mut(&mut self) -> &mut [Run] {
        &mut self.runs
    }

    /// Concatenated text of all runs.
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text()).collect()
    }

    /// Set the paragraph style.
    pub fn set_style(&mut self, style_id: &str) {
        self.style = Some(style_id.to_string());
    }

    /// Get the paragraph style, if set.
    pub fn style(&self) -> Option<&str> {
        self.style.as_deref()
    }

    /// Set paragraph alignment.
    pub fn set_alignment(&mut self, alignment: Alignment) {
        self.properties.alignment = Some(alignment);
    }

    /// Set left/hanging indentation in twips (1/1440 inch).
    pub fn set_indent(&mut self, left: u32, hanging: u32) {
        self.properties.indent_left = Some(left);
        self.properties.indent_hanging = Some(hanging);
    }

    /// Get the paragraph's numbering markers, if it carries any.
    pub fn numbering(&self) -> Option<NumberingMarkers> {
        self.properties.numbering
    }

    /// Stamp numbering markers onto this paragraph.
    pub fn set_numbering(&mut self, markers: NumberingMarkers) {
        self.properties.numbering = Some(markers);
    }

    /// Remove the paragraph's numbering markers.
    pub fn clear_numbering(&mut self) {
        self.properties.numbering = None;
    }

    pub(crate) fn to_xml(&self, xml: &mut String) -> Result<()> {
        xml.push_str("<w:p>");

        if self.style.is_some() || self.properties.has_properties() {
            xml.push_str("<w:pPr>");

            if let Some(ref style) = self.style {
                write!(xml, "<w:pStyle w:val=\"{}\"/>", escape_xml(style))?;
            }

            if let Some(markers) = self.properties.numbering {
                xml.push_str("<w:numPr>");
                write!(xml, "<w:ilvl w:val=\"{}\"/>", markers.level)?;
                write!(xml, "<w:numId w:val=\"{}\"/>", markers.num_id)?;
                xml.push_str("</w:numPr>");
            }

            if let Some(alignment) = self.properties.alignment {
                write!(xml, "<w:jc w:val=\"{}\"/>", alignment.as_str())?;
            }

            if self.properties.indent_left.is_some() || self.properties.indent_hanging.is_some() {
                xml.push_str("<w:ind");
                if let Some(left) = self.properties.indent_left {
                    write!(xml, " w:left=\"{}\"", left)?;
                }
                if let Some(hanging) = self.properties.indent_hanging {
                    write!(xml, " w:hanging=\"{}\"", hanging)?;
                }
                xml.push_str("/>");
            }

            xml.push_str("</w:pPr>");
        }

        for run in &self.runs {
            run.to_xml(xml)?;
        }

        xml.push_str("</w:p>");
        Ok(())
    }
}

impl Default for Paragraph {
    fn default() -> Self {
        Self::new()
    }
}
