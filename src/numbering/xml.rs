/// Reader and writer for the persisted numbering part.
///
/// The part is a WordprocessingML-shaped tree with two element families:
/// `w:abstractNum` entries (style templates with depth-indexed `w:lvl`
/// children) and `w:num` entries (definitions carrying a template
/// back-reference and optional `w:lvlOverride` children). All identifiers
/// are plain-text integer attributes.
use crate::document::format::{Alignment, escape_xml};
use crate::error::{DomError, Result};
use crate::numbering::definition::{Definition, LevelOverride};
use crate::numbering::registry::NumberingRegistry;
use crate::numbering::template::{Level, LevelType, NumberFormat, StyleTemplate};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::fmt::Write as FmtWrite;

const WORDML_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

/// Serialize a registry to the numbering part XML.
pub(crate) fn write_numbering(registry: &NumberingRegistry) -> Result<String> {
    let mut xml = String::with_capacity(4096);
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    write!(xml, r#"<w:numbering xmlns:w="{}">"#, WORDML_NS)?;

    for template in registry.styles() {
        write_template(&mut xml, template)?;
    }
    for definition in registry.definition_entries() {
        write_definition(&mut xml, definition)?;
    }

    xml.push_str("</w:numbering>");
    Ok(xml)
}

fn write_template(xml: &mut String, template: &StyleTemplate) -> Result<()> {
    write!(xml, r#"<w:abstractNum w:abstractNumId="{}">"#, template.id())?;

    if let Some(creator_id) = template.creator_id() {
        write!(xml, r#"<w:nsid w:val="{}"/>"#, escape_xml(creator_id))?;
    }
    write!(
        xml,
        r#"<w:multiLevelType w:val="{}"/>"#,
        template.level_type().as_str()
    )?;
    if let Some(name) = template.name() {
        write!(xml, r#"<w:name w:val="{}"/>"#, escape_xml(name))?;
    }
    if let Some(link) = template.num_style_link() {
        write!(xml, r#"<w:numStyleLink w:val="{}"/>"#, escape_xml(link))?;
    }
    if let Some(link) = template.style_link() {
        write!(xml, r#"<w:styleLink w:val="{}"/>"#, escape_xml(link))?;
    }

    for level in template.levels() {
        write_level(xml, level)?;
    }

    xml.push_str("</w:abstractNum>");
    Ok(())
}

fn write_level(xml: &mut String, level: &Level) -> Result<()> {
    write!(xml, r#"<w:lvl w:ilvl="{}">"#, level.level())?;
    write!(xml, r#"<w:start w:val="{}"/>"#, level.start())?;
    if let Some(restart) = level.restart() {
        write!(xml, r#"<w:lvlRestart w:val="{}"/>"#, restart)?;
    }
    write!(xml, r#"<w:numFmt w:val="{}"/>"#, level.format().as_str())?;
    write!(xml, r#"<w:lvlText w:val="{}"/>"#, escape_xml(level.text()))?;
    write!(xml, r#"<w:lvlJc w:val="{}"/>"#, level.alignment().as_str())?;

    let (left, hanging) = level.indent();
    write!(
        xml,
        r#"<w:pPr><w:ind w:left="{}" w:hanging="{}"/></w:pPr>"#,
        left, hanging
    )?;
    if let Some(font) = level.font() {
        write!(
            xml,
            r#"<w:rPr><w:rFonts w:ascii="{0}" w:hAnsi="{0}"/></w:rPr>"#,
            escape_xml(font)
        )?;
    }

    xml.push_str("</w:lvl>");
    Ok(())
}

fn write_definition(xml: &mut String, definition: &Definition) -> Result<()> {
    write!(xml, r#"<w:num w:numId="{}">"#, definition.id())?;
    write!(
        xml,
        r#"<w:abstractNumId w:val="{}"/>"#,
        definition.style_id()
    )?;

    for level_override in definition.overrides() {
        write!(
            xml,
            r#"<w:lvlOverride w:ilvl="{}">"#,
            level_override.level()
        )?;
        if let Some(start) = level_override.start() {
            write!(xml, r#"<w:startOverride w:val="{}"/>"#, start)?;
        }
        if let Some(level) = level_override.level_info() {
            write_level(xml, level)?;
        }
        xml.push_str("</w:lvlOverride>");
    }

    xml.push_str("</w:num>");
    Ok(())
}

/// Parse the numbering part XML into a registry.
pub(crate) fn parse_numbering(blob: &[u8]) -> Result<NumberingRegistry> {
    let mut reader = Reader::from_reader(blob);
    reader.config_mut().trim_text(true);

    let mut parser = NumberingParser::default();
    let mut buf = Vec::with_capacity(1024);

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => parser.handle_start(&e)?,
            Ok(Event::Empty(e)) => {
                parser.handle_start(&e)?;
                parser.handle_end(e.local_name().as_ref())?;
            },
            Ok(Event::End(e)) => parser.handle_end(e.local_name().as_ref())?,
            Ok(Event::Eof) => break,
            Err(e) => return Err(DomError::Xml(e.to_string())),
            _ => {},
        }
        buf.clear();
    }

    Ok(parser.registry)
}

/// Event-loop state for the numbering part.
///
/// At most one of each "current" entity is open at a time; `w:lvl` can be
/// open under either a template or a level override.
#[derive(Default)]
struct NumberingParser {
    registry: NumberingRegistry,
    current_template: Option<StyleTemplate>,
    current_level: Option<Level>,
    current_override: Option<LevelOverride>,
    current_num: Option<PendingDefinition>,
}

/// A `w:num` entry under construction; the style reference arrives as a
/// child element, after the definition id.
struct PendingDefinition {
    id: u32,
    style_id: Option<u32>,
    overrides: Vec<LevelOverride>,
}

impl NumberingParser {
    fn handle_start(&mut self, e: &BytesStart<'_>) -> Result<()> {
        match e.local_name().as_ref() {
            b"abstractNum" => {
                let id = attr_u32(e, b"abstractNumId").ok_or_else(|| {
                    DomError::InvalidFormat(
                        "abstractNum entry without an abstractNumId".to_string(),
                    )
                })?;
                self.current_template = Some(StyleTemplate::new(id, LevelType::default()));
            },
            b"lvl" => {
                let depth = attr_u32(e, b"ilvl").ok_or_else(|| {
                    DomError::InvalidFormat("lvl entry without an ilvl".to_string())
                })? as u8;
                self.current_level = Some(Level::new(depth, NumberFormat::None));
            },
            b"num" => {
                let id = attr_u32(e, b"numId").ok_or_else(|| {
                    DomError::InvalidFormat("num entry without a numId".to_string())
                })?;
                self.current_num = Some(PendingDefinition {
                    id,
                    style_id: None,
                    overrides: Vec::new(),
                });
            },
            b"lvlOverride" => {
                let depth = attr_u32(e, b"ilvl").ok_or_else(|| {
                    DomError::InvalidFormat("lvlOverride entry without an ilvl".to_string())
                })? as u8;
                self.current_override = Some(LevelOverride::new(depth));
            },
            name => self.handle_leaf(name, e)?,
        }
        Ok(())
    }

    /// Leaf elements, dispatched innermost context first.
    fn handle_leaf(&mut self, name: &[u8], e: &BytesStart<'_>) -> Result<()> {
        if let Some(level) = self.current_level.as_mut() {
            match name {
                b"start" => {
                    if let Some(start) = attr_u32(e, b"val") {
                        level.set_start(start);
                    }
                },
                b"lvlRestart" => level.set_restart(attr_u32(e, b"val")),
                b"numFmt" => {
                    let value = attr_string(e, b"val").unwrap_or_default();
                    let format = NumberFormat::from_name(&value).ok_or_else(|| {
                        DomError::InvalidFormat(format!("unsupported number format '{}'", value))
                    })?;
                    level.set_format(format);
                },
                b"lvlText" => {
                    if let Some(text) = attr_string(e, b"val") {
                        level.set_text(&text);
                    }
                },
                b"lvlJc" => {
                    if let Some(value) = attr_string(e, b"val") {
                        let alignment = Alignment::from_name(&value).ok_or_else(|| {
                            DomError::InvalidFormat(format!(
                                "unsupported level alignment '{}'",
                                value
                            ))
                        })?;
                        level.set_alignment(alignment);
                    }
                },
                b"ind" => {
                    let (left, hanging) = level.indent();
                    level.set_indent(
                        attr_u32(e, b"left").unwrap_or(left),
                        attr_u32(e, b"hanging").unwrap_or(hanging),
                    );
                },
                b"rFonts" => level.set_font(attr_string(e, b"ascii")),
                _ => {},
            }
        } else if let Some(level_override) = self.current_override.as_mut() {
            if name == b"startOverride" {
                level_override.set_start(attr_u32(e, b"val"));
            }
        } else if let Some(template) = self.current_template.as_mut() {
            match name {
                b"nsid" => template.set_creator_id(attr_string(e, b"val")),
                b"multiLevelType" => {
                    if let Some(value) = attr_string(e, b"val") {
                        let level_type = LevelType::from_name(&value).ok_or_else(|| {
                            DomError::InvalidFormat(format!("unsupported level type '{}'", value))
                        })?;
                        template.set_level_type(level_type);
                    }
                },
                b"name" => template.set_name(attr_string(e, b"val")),
                b"numStyleLink" => template.set_num_style_link(attr_string(e, b"val")),
                b"styleLink" => template.set_style_link(attr_string(e, b"val")),
                _ => {},
            }
        } else if let Some(pending) = self.current_num.as_mut() {
            if name == b"abstractNumId" {
                pending.style_id = attr_u32(e, b"val");
            }
        }
        Ok(())
    }

    fn handle_end(&mut self, name: &[u8]) -> Result<()> {
        match name {
            b"lvl" => {
                if let Some(level) = self.current_level.take() {
                    if let Some(level_override) = self.current_override.as_mut() {
                        level_override.set_level_info(Some(level));
                    } else if let Some(template) = self.current_template.as_mut() {
                        let id = template.id();
                        template.add_level(level).map_err(|_| {
                            DomError::InvalidFormat(format!(
                                "abstractNum {} has duplicate level depths",
                                id
                            ))
                        })?;
                    }
                }
            },
            b"lvlOverride" => {
                if let (Some(level_override), Some(pending)) =
                    (self.current_override.take(), self.current_num.as_mut())
                {
                    pending.overrides.push(level_override);
                }
            },
            b"abstractNum" => {
                if let Some(template) = self.current_template.take() {
                    self.registry.insert_template(template)?;
                }
            },
            b"num" => {
                if let Some(pending) = self.current_num.take() {
                    let style_id = pending.style_id.ok_or_else(|| {
                        DomError::InvalidFormat(format!(
                            "num {} has no abstractNumId reference",
                            pending.id
                        ))
                    })?;
                    let mut definition = Definition::new(pending.id, style_id);
                    for level_override in pending.overrides {
                        let depth = level_override.level();
                        definition.add_override_for_level(level_override).map_err(|_| {
                            DomError::InvalidFormat(format!(
                                "num {} has duplicate overrides for level {}",
                                pending.id, depth
                            ))
                        })?;
                    }
                    self.registry.insert_definition(definition)?;
                }
            },
            _ => {},
        }
        Ok(())
    }
}

/// Read an integer attribute by local name.
fn attr_u32(e: &BytesStart<'_>, name: &[u8]) -> Option<u32> {
    for attr in e.attributes().flatten() {
        if attr.key.local_name().as_ref() == name {
            return atoi_simd::parse::<u32>(&attr.value).ok();
        }
    }
    None
}

/// Read a string attribute by local name.
fn attr_string(e: &BytesStart<'_>, name: &[u8]) -> Option<String> {
    for attr in e.attributes().flatten() {
        if attr.key.local_name().as_ref() == name {
            return Some(String::from_utf8_lossy(&attr.value).into_owned());
        }
    }
    None
}
