/// Stateless list-membership queries over paragraphs.
///
/// These functions read only the paragraph's own markers; the registry is
/// consulted solely to resolve a marker's `num_id` into a definition.
use crate::document::paragraph::Paragraph;
use crate::error::{DomError, Result};
use crate::numbering::registry::NumberingRegistry;
use crate::numbering::template::NumberFormat;

/// Paragraph style stamped on list-member paragraphs.
pub const LIST_PARAGRAPH_STYLE: &str = "ListParagraph";

/// Whether the paragraph is tagged as a list member.
///
/// True if it carries numbering markers or the list paragraph style.
pub fn is_list_item(paragraph: &Paragraph) -> bool {
    paragraph.numbering().is_some() || paragraph.style() == Some(LIST_PARAGRAPH_STYLE)
}

/// The paragraph's numbering definition id, if it carries markers.
pub fn list_num_id(paragraph: &Paragraph) -> Option<u32> {
    paragraph.numbering().map(|m| m.num_id)
}

/// The paragraph's 0-based list depth, if it carries markers.
pub fn list_level(paragraph: &Paragraph) -> Option<u8> {
    paragraph.numbering().map(|m| m.level)
}

/// Resolve the effective marker format for a list-member paragraph.
///
/// Follows the paragraph's `num_id` to its definition and the definition's
/// template to the level at the paragraph's depth; a full level replacement
/// on the definition wins over the template level. Fails loudly when the
/// stored `num_id` has no registered definition, when the definition's
/// style reference dangles, or when the depth does not exist — a paragraph
/// pointing at nothing signals document corruption, and no default format
/// is substituted.
pub fn numbering_format(
    paragraph: &Paragraph,
    registry: &NumberingRegistry,
) -> Result<NumberFormat> {
    let markers = paragraph
        .numbering()
        .ok_or_else(|| DomError::Validation("paragraph carries no numbering markers".to_string()))?;

    let definition = registry.definition(markers.num_id).ok_or_else(|| {
        DomError::InvalidFormat(format!(
            "paragraph references unknown numbering definition {}",
            markers.num_id
        ))
    })?;

    if let Some(level_override) = definition.override_for_level(markers.level) {
        if let Some(info) = level_override.level_info() {
            return Ok(info.format());
        }
    }

    let template = registry.style(definition.style_id()).ok_or_else(|| {
        DomError::InvalidFormat(format!(
            "definition {} references unknown style template {}",
            definition.id(),
            definition.style_id()
        ))
    })?;
    let level = template.level(markers.level).ok_or_else(|| {
        DomError::InvalidFormat(format!(
            "style template {} has no level at depth {}",
            template.id(),
            markers.level
        ))
    })?;
    Ok(level.format())
}
