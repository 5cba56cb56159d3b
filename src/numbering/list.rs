/// List building: aggregating paragraphs into one list instance.
///
/// A list starts life as an unbound [`List`] whose member paragraphs carry
/// `num_id` 0. Binding it to a document materializes a real definition in
/// the registry and returns a [`BoundList`] handle; from then on every
/// member paragraph carries the list's definition id.
use crate::document::doc::Document;
use crate::document::paragraph::{NumberingMarkers, Paragraph};
use crate::error::{DomError, Result};
use crate::numbering::queries::LIST_PARAGRAPH_STYLE;
use crate::numbering::registry::NumberingRegistry;
use crate::numbering::template::NumberFormat;

/// A resolved view of one list member.
///
/// The depth and definition id are read from the paragraph's own numbering
/// markers at resolution time; the paragraph is authoritative, not this
/// view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListItem {
    /// Index of the paragraph in the document body
    pub body_index: usize,
    /// 0-based indentation depth
    pub level: u8,
    /// Numbering definition id (0 while the list is unbound)
    pub num_id: u32,
}

/// State shared by the unbound and bound list handles.
#[derive(Debug, Clone)]
struct ListCore {
    list_type: NumberFormat,
    start_number: u32,
    /// Default font cascaded onto item runs
    font_name: Option<String>,
    /// Default font size in half-points cascaded onto item runs
    font_size: Option<u32>,
    /// Body indices of member paragraphs
    items: Vec<usize>,
}

impl ListCore {
    fn new(list_type: NumberFormat, start_number: u32) -> Self {
        Self {
            list_type,
            start_number,
            font_name: None,
            font_size: None,
            items: Vec::new(),
        }
    }

    /// Whether `paragraph` may join a list whose current id is `num_id`.
    ///
    /// The paragraph must already carry numbering markers, and its stored
    /// id must be 0 (freely adoptable) or equal to `num_id`.
    fn can_add(&self, num_id: u32, paragraph: &Paragraph) -> bool {
        match paragraph.numbering() {
            Some(markers) => markers.num_id == 0 || markers.num_id == num_id,
            None => false,
        }
    }

    fn cascade_font(&self, paragraph: &mut Paragraph) {
        if self.font_name.is_none() && self.font_size.is_none() {
            return;
        }
        for run in paragraph.runs_mut() {
            if let Some(ref name) = self.font_name {
                run.set_font_name(name);
            }
            if let Some(size) = self.font_size {
                run.set_font_size(size);
            }
        }
    }

    /// Synthesize a new member paragraph at `level`, stamped with `num_id`.
    fn add_item(&mut self, doc: &mut Document, num_id: u32, text: &str, level: u8) -> usize {
        let mut paragraph = Paragraph::new();
        paragraph.set_style(LIST_PARAGRAPH_STYLE);
        paragraph.set_numbering(NumberingMarkers { num_id, level });
        paragraph.add_run_with_text(text);
        self.cascade_font(&mut paragraph);

        let index = doc.append_paragraph(paragraph);
        self.items.push(index);
        index
    }

    /// Adopt the existing body paragraph at `index` into the list.
    fn adopt_item(
        &mut self,
        doc: &mut Document,
        num_id: u32,
        index: usize,
        level: u8,
    ) -> Result<()> {
        let paragraph = doc
            .paragraph(index)
            .ok_or_else(|| DomError::Validation(format!("no paragraph at body index {}", index)))?;
        if !self.can_add(num_id, paragraph) {
            return Err(DomError::Validation(format!(
                "paragraph at body index {} cannot join list with numId {}",
                index, num_id
            )));
        }

        let paragraph = doc.paragraph_mut(index).unwrap();
        paragraph.set_numbering(NumberingMarkers { num_id, level });
        self.cascade_font(paragraph);
        self.items.push(index);
        Ok(())
    }

    /// Resolve member views from the paragraphs' own markers.
    ///
    /// Paragraphs that were removed from the body (or lost their markers)
    /// are silently skipped as orphans.
    fn items(&self, doc: &Document) -> Vec<ListItem> {
        self.items
            .iter()
            .filter_map(|&body_index| {
                let markers = doc.paragraph(body_index)?.numbering()?;
                Some(ListItem {
                    body_index,
                    level: markers.level,
                    num_id: markers.num_id,
                })
            })
            .collect()
    }
}

/// An unbound list under construction.
///
/// Member paragraphs carry `num_id` 0 until [`List::bind`] materializes a
/// registry definition and rewrites them.
#[derive(Debug, Clone)]
pub struct List {
    core: ListCore,
}

impl List {
    /// Create an unbound list.
    ///
    /// `list_type` is validated when the list is bound (only `Bullet` and
    /// `Decimal` have built-in skeletons).
    pub fn new(list_type: NumberFormat, start_number: u32) -> Self {
        Self {
            core: ListCore::new(list_type, start_number),
        }
    }

    /// A bulleted list starting at 1.
    pub fn bulleted() -> Self {
        Self::new(NumberFormat::Bullet, 1)
    }

    /// A numbered list starting at `start_number`.
    pub fn numbered(start_number: u32) -> Self {
        Self::new(NumberFormat::Decimal, start_number)
    }

    /// The definition id; always 0 for an unbound list.
    pub fn num_id(&self) -> u32 {
        0
    }

    /// Get the list format.
    pub fn list_type(&self) -> NumberFormat {
        self.core.list_type
    }

    /// Get the starting number.
    pub fn start_number(&self) -> u32 {
        self.core.start_number
    }

    /// Set a default font name cascaded onto every item's runs.
    pub fn set_default_font(&mut self, name: &str) {
        self.core.font_name = Some(name.to_string());
    }

    /// Set a default font size (half-points) cascaded onto every item's runs.
    pub fn set_default_font_size(&mut self, half_points: u32) {
        self.core.font_size = Some(half_points);
    }

    /// Number of member paragraphs.
    pub fn item_count(&self) -> usize {
        self.core.items.len()
    }

    /// Append a new item paragraph at `level`; returns its body index.
    pub fn add_item(&mut self, doc: &mut Document, text: &str, level: u8) -> usize {
        self.core.add_item(doc, 0, text, level)
    }

    /// Adopt an existing body paragraph as an item at `level`.
    ///
    /// Fails unless the paragraph already carries numbering markers with
    /// `num_id` 0.
    pub fn adopt_item(&mut self, doc: &mut Document, index: usize, level: u8) -> Result<()> {
        self.core.adopt_item(doc, 0, index, level)
    }

    /// Whether `paragraph` could be adopted into this list.
    pub fn can_add_list_item(&self, paragraph: &Paragraph) -> bool {
        self.core.can_add(0, paragraph)
    }

    /// Resolve member views from the paragraphs' own markers.
    pub fn items(&self, doc: &Document) -> Vec<ListItem> {
        self.core.items(doc)
    }

    /// Bind the list to a document, materializing its registry definition.
    ///
    /// Requests `create(list_type, start_number)` from the registry, stamps
    /// the returned definition id onto every member paragraph, cascades the
    /// default font, and returns the bound handle. Member paragraphs that
    /// were removed from the body are silently left orphaned.
    pub fn bind(
        self,
        doc: &mut Document,
        registry: &mut NumberingRegistry,
    ) -> Result<BoundList> {
        let core = self.core;
        let num_id = registry.create(core.list_type, core.start_number)?.id();

        for &index in &core.items {
            if let Some(paragraph) = doc.paragraph_mut(index) {
                if let Some(markers) = paragraph.numbering() {
                    paragraph.set_numbering(NumberingMarkers {
                        num_id,
                        level: markers.level,
                    });
                }
                core.cascade_font(paragraph);
            }
        }

        Ok(BoundList { num_id, core })
    }
}

/// A list bound to a registry definition.
#[derive(Debug, Clone)]
pub struct BoundList {
    num_id: u32,
    core: ListCore,
}

impl BoundList {
    /// The definition id backing this list; always greater than 0.
    pub fn num_id(&self) -> u32 {
        self.num_id
    }

    /// Get the list format.
    pub fn list_type(&self) -> NumberFormat {
        self.core.list_type
    }

    /// Get the starting number.
    pub fn start_number(&self) -> u32 {
        self.core.start_number
    }

    /// Number of member paragraphs.
    pub fn item_count(&self) -> usize {
        self.core.items.len()
    }

    /// Append a new item paragraph at `level`; returns its body index.
    pub fn add_item(&mut self, doc: &mut Document, text: &str, level: u8) -> usize {
        self.core.add_item(doc, self.num_id, text, level)
    }

    /// Adopt an existing body paragraph as an item at `level`.
    ///
    /// Fails unless the paragraph carries numbering markers whose `num_id`
    /// is 0 or equal to this list's id.
    pub fn adopt_item(&mut self, doc: &mut Document, index: usize, level: u8) -> Result<()> {
        self.core.adopt_item(doc, self.num_id, index, level)
    }

    /// Whether `paragraph` is part of (or adoptable into) this list.
    pub fn can_add_list_item(&self, paragraph: &Paragraph) -> bool {
        self.core.can_add(self.num_id, paragraph)
    }

    /// Resolve member views from the paragraphs' own markers.
    pub fn items(&self, doc: &Document) -> Vec<ListItem> {
        self.core.items(doc)
    }
}
