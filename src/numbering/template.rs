/// Style templates: reusable numbering-format definitions.
///
/// A `StyleTemplate` carries one `Level` entry per indent depth and is
/// referenced by any number of concrete `Definition`s. Templates are pure
/// data; id allocation and cross-referencing live in the registry.
use crate::document::format::Alignment;
use crate::error::{DomError, Result};
use phf::phf_map;
use smallvec::SmallVec;

/// Maximum number of indent depths in a multi-level template.
pub const MAX_LEVELS: u8 = 9;

/// Left indentation per depth, in twips.
const INDENT_PER_LEVEL: u32 = 720;
/// Hanging indentation of the marker, in twips.
const MARKER_HANGING: u32 = 360;

/// Marker kind for one numbering level (`w:numFmt`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumberFormat {
    Bullet,
    Decimal,
    DecimalZero,
    LowerRoman,
    UpperRoman,
    LowerLetter,
    UpperLetter,
    None,
}

static NUMBER_FORMAT_NAMES: phf::Map<&'static str, NumberFormat> = phf_map! {
    "bullet" => NumberFormat::Bullet,
    "decimal" => NumberFormat::Decimal,
    "decimalZero" => NumberFormat::DecimalZero,
    "lowerRoman" => NumberFormat::LowerRoman,
    "upperRoman" => NumberFormat::UpperRoman,
    "lowerLetter" => NumberFormat::LowerLetter,
    "upperLetter" => NumberFormat::UpperLetter,
    "none" => NumberFormat::None,
};

impl NumberFormat {
    /// The serialized attribute value.
    pub fn as_str(&self) -> &'static str {
        match self {
            NumberFormat::Bullet => "bullet",
            NumberFormat::Decimal => "decimal",
            NumberFormat::DecimalZero => "decimalZero",
            NumberFormat::LowerRoman => "lowerRoman",
            NumberFormat::UpperRoman => "upperRoman",
            NumberFormat::LowerLetter => "lowerLetter",
            NumberFormat::UpperLetter => "upperLetter",
            NumberFormat::None => "none",
        }
    }

    /// Parse a serialized attribute value.
    pub fn from_name(name: &str) -> Option<Self> {
        NUMBER_FORMAT_NAMES.get(name).copied()
    }
}

/// Template level structure (`w:multiLevelType`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LevelType {
    SingleLevel,
    Multilevel,
    #[default]
    HybridMultilevel,
}

impl LevelType {
    /// The serialized attribute value.
    pub fn as_str(&self) -> &'static str {
        match self {
            LevelType::SingleLevel => "singleLevel",
            LevelType::Multilevel => "multilevel",
            LevelType::HybridMultilevel => "hybridMultilevel",
        }
    }

    /// Parse a serialized attribute value.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "singleLevel" => Some(LevelType::SingleLevel),
            "multilevel" => Some(LevelType::Multilevel),
            "hybridMultilevel" => Some(LevelType::HybridMultilevel),
            _ => None,
        }
    }
}

/// Bullet glyphs cycled by depth: solid dot, dash, small square.
const BULLET_GLYPHS: [&str; 3] = ["\u{2022}", "\u{2013}", "\u{25AA}"];

/// Fonts matching the bullet glyph cycle.
const BULLET_FONTS: [&str; 3] = ["Symbol", "Courier New", "Wingdings"];

/// Marker suffix per counter format.
fn marker_suffix(format: NumberFormat) -> &'static str {
    match format {
        NumberFormat::LowerLetter | NumberFormat::UpperLetter => ")",
        _ => ".",
    }
}

/// Default marker text for `(format, level)`.
///
/// A pure function of its arguments: bullets draw from a depth-indexed glyph
/// table, counter formats produce the depth-indexed placeholder pattern
/// (`"%1."`, `"%2)"`, ...), and `None` yields an empty marker. Registry
/// state is never consulted.
pub fn default_level_text(format: NumberFormat, level: u8) -> String {
    match format {
        NumberFormat::Bullet => BULLET_GLYPHS[level as usize % BULLET_GLYPHS.len()].to_string(),
        NumberFormat::None => String::new(),
        _ => format!("%{}{}", level + 1, marker_suffix(format)),
    }
}

/// One indent depth of a style template.
#[derive(Debug, Clone, PartialEq)]
pub struct Level {
    /// 0-based depth (`w:ilvl`)
    level: u8,
    /// Initial counter value (`w:start`)
    start: u32,
    /// Depth after which the counter restarts (`w:lvlRestart`)
    restart: Option<u32>,
    /// Marker kind
    format: NumberFormat,
    /// Marker pattern with depth placeholders (`w:lvlText`)
    text: String,
    /// Marker alignment (`w:lvlJc`)
    alignment: Alignment,
    /// Left indentation in twips
    indent_left: u32,
    /// Hanging indentation in twips
    indent_hanging: u32,
    /// Marker font (`w:rFonts`), mostly for bullet glyphs
    font: Option<String>,
}

impl Level {
    /// Create a level at `depth` with defaults for `format`.
    ///
    /// The marker text is seeded from [`default_level_text`]; indentation
    /// defaults to 720 twips per depth with a 360-twip hanging marker.
    pub fn new(depth: u8, format: NumberFormat) -> Self {
        Self {
            level: depth,
            start: 1,
            restart: None,
            format,
            text: default_level_text(format, depth),
            alignment: Alignment::Left,
            indent_left: INDENT_PER_LEVEL * (depth as u32 + 1),
            indent_hanging: MARKER_HANGING,
            font: None,
        }
    }

    /// Get the 0-based depth.
    #[inline]
    pub fn level(&self) -> u8 {
        self.level
    }

    /// Get the initial counter value.
    #[inline]
    pub fn start(&self) -> u32 {
        self.start
    }

    /// Set the initial counter value.
    pub fn set_start(&mut self, start: u32) {
        self.start = start;
    }

    /// Get the restart depth, if set.
    #[inline]
    pub fn restart(&self) -> Option<u32> {
        self.restart
    }

    /// Set the restart depth.
    pub fn set_restart(&mut self, restart: Option<u32>) {
        self.restart = restart;
    }

    /// Get the marker kind.
    #[inline]
    pub fn format(&self) -> NumberFormat {
        self.format
    }

    /// Set the marker kind. The marker text is left untouched.
    pub fn set_format(&mut self, format: NumberFormat) {
        self.format = format;
    }

    /// Get the marker pattern.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Set the marker pattern.
    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }

    /// Get the marker alignment.
    #[inline]
    pub fn alignment(&self) -> Alignment {
        self.alignment
    }

    /// Set the marker alignment.
    pub fn set_alignment(&mut self, alignment: Alignment) {
        self.alignment = alignment;
    }

    /// Get the left/hanging indentation in twips.
    #[inline]
    pub fn indent(&self) -> (u32, u32) {
        (self.indent_left, self.indent_hanging)
    }

    /// Set the left/hanging indentation in twips.
    pub fn set_indent(&mut self, left: u32, hanging: u32) {
        self.indent_left = left;
        self.indent_hanging = hanging;
    }

    /// Get the marker font, if set.
    #[inline]
    pub fn font(&self) -> Option<&str> {
        self.font.as_deref()
    }

    /// Set the marker font.
    pub fn set_font(&mut self, font: Option<String>) {
        self.font = font;
    }
}

/// A reusable numbering-format template (`w:abstractNum`).
#[derive(Debug, Clone, PartialEq)]
pub struct StyleTemplate {
    /// Template id, unique within the registry (`w:abstractNumId`)
    id: u32,
    /// Stable creator id (`w:nsid`)
    creator_id: Option<String>,
    /// Level structure
    level_type: LevelType,
    /// Template name (`w:name`)
    name: Option<String>,
    /// Numbering style this template links to (`w:numStyleLink`)
    num_style_link: Option<String>,
    /// Style this template is the definition of (`w:styleLink`)
    style_link: Option<String>,
    /// Levels, kept sorted by depth
    levels: SmallVec<[Level; 9]>,
}

impl StyleTemplate {
    /// Create an empty template.
    pub fn new(id: u32, level_type: LevelType) -> Self {
        Self {
            id,
            creator_id: None,
            level_type,
            name: None,
            num_style_link: None,
            style_link: None,
            levels: SmallVec::new(),
        }
    }

    /// Get the template id.
    #[inline]
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Get the creator id, if set.
    #[inline]
    pub fn creator_id(&self) -> Option<&str> {
        self.creator_id.as_deref()
    }

    /// Set the creator id.
    pub fn set_creator_id(&mut self, creator_id: Option<String>) {
        self.creator_id = creator_id;
    }

    /// Get the level structure.
    #[inline]
    pub fn level_type(&self) -> LevelType {
        self.level_type
    }

    /// Set the level structure.
    pub fn set_level_type(&mut self, level_type: LevelType) {
        self.level_type = level_type;
    }

    /// Get the template name, if set.
    #[inline]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Set the template name.
    pub fn set_name(&mut self, name: Option<String>) {
        self.name = name;
    }

    /// Get the linked numbering style, if set.
    #[inline]
    pub fn num_style_link(&self) -> Option<&str> {
        self.num_style_link.as_deref()
    }

    /// Set the linked numbering style.
    pub fn set_num_style_link(&mut self, link: Option<String>) {
        self.num_style_link = link;
    }

    /// Get the style link, if set.
    #[inline]
    pub fn style_link(&self) -> Option<&str> {
        self.style_link.as_deref()
    }

    /// Set the style link.
    pub fn set_style_link(&mut self, link: Option<String>) {
        self.style_link = link;
    }

    /// Get the levels, sorted by depth.
    ///
    /// Document order of serialized levels is not guaranteed to match depth
    /// order, so the collection is kept sorted on every insertion.
    #[inline]
    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    /// Get the level at `depth`, if present.
    pub fn level(&self, depth: u8) -> Option<&Level> {
        self.levels
            .binary_search_by_key(&depth, |l| l.level())
            .ok()
            .map(|i| &self.levels[i])
    }

    /// Get a mutable reference to the level at `depth`, if present.
    pub fn level_mut(&mut self, depth: u8) -> Option<&mut Level> {
        self.levels
            .binary_search_by_key(&depth, |l| l.level())
            .ok()
            .map(move |i| &mut self.levels[i])
    }

    /// Insert a level, maintaining depth order.
    ///
    /// Fails if a level at the same depth already exists.
    pub fn add_level(&mut self, level: Level) -> Result<()> {
        match self.levels.binary_search_by_key(&level.level(), |l| l.level()) {
            Ok(_) => Err(DomError::Validation(format!(
                "template {} already has a level at depth {}",
                self.id,
                level.level()
            ))),
            Err(pos) => {
                self.levels.insert(pos, level);
                Ok(())
            },
        }
    }
}

/// Canned template skeletons for the two built-in list formats.
///
/// `Bullet` yields a hybrid template cycling bullet glyphs per depth;
/// `Decimal` yields the standard numbered skeleton cycling decimal, letter,
/// and roman counters. Any other format is unsupported.
pub fn built_in_template(format: NumberFormat, id: u32) -> Result<StyleTemplate> {
    match format {
        NumberFormat::Bullet => Ok(bulleted_template(id)),
        NumberFormat::Decimal => Ok(numbered_template(id)),
        other => Err(DomError::Validation(format!(
            "unsupported list format: {}",
            other.as_str()
        ))),
    }
}

/// The built-in bulleted skeleton.
fn bulleted_template(id: u32) -> StyleTemplate {
    let mut template = StyleTemplate::new(id, LevelType::HybridMultilevel);
    for depth in 0..MAX_LEVELS {
        let mut level = Level::new(depth, NumberFormat::Bullet);
        level.set_font(Some(
            BULLET_FONTS[depth as usize % BULLET_FONTS.len()].to_string(),
        ));
        // Cannot fail: depths are distinct.
        let _ = template.add_level(level);
    }
    template
}

/// Counter formats cycled by depth in the built-in numbered skeleton.
const NUMBERED_FORMATS: [NumberFormat; 3] = [
    NumberFormat::Decimal,
    NumberFormat::LowerLetter,
    NumberFormat::LowerRoman,
];

/// The built-in numbered skeleton.
fn numbered_template(id: u32) -> StyleTemplate {
    let mut template = StyleTemplate::new(id, LevelType::HybridMultilevel);
    for depth in 0..MAX_LEVELS {
        let format = NUMBERED_FORMATS[depth as usize % NUMBERED_FORMATS.len()];
        let _ = template.add_level(Level::new(depth, format));
    }
    template
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_format_round_trip() {
        for format in [
            NumberFormat::Bullet,
            NumberFormat::Decimal,
            NumberFormat::DecimalZero,
            NumberFormat::LowerRoman,
            NumberFormat::UpperRoman,
            NumberFormat::LowerLetter,
            NumberFormat::UpperLetter,
            NumberFormat::None,
        ] {
            assert_eq!(NumberFormat::from_name(format.as_str()), Some(format));
        }
        assert_eq!(NumberFormat::from_name("cardinalText"), None);
    }

    #[test]
    fn test_default_level_text_bullets_differ_by_depth() {
        let depth0 = default_level_text(NumberFormat::Bullet, 0);
        let depth1 = default_level_text(NumberFormat::Bullet, 1);
        assert_eq!(depth0, "\u{2022}");
        assert_ne!(depth0, depth1);
    }

    #[test]
    fn test_default_level_text_counters_use_placeholders() {
        assert_eq!(default_level_text(NumberFormat::Decimal, 0), "%1.");
        assert_eq!(default_level_text(NumberFormat::Decimal, 3), "%4.");
        assert_eq!(default_level_text(NumberFormat::LowerLetter, 1), "%2)");
        assert_eq!(default_level_text(NumberFormat::None, 0), "");
    }

    #[test]
    fn test_levels_sorted_by_depth() {
        let mut template = StyleTemplate::new(0, LevelType::HybridMultilevel);
        template.add_level(Level::new(2, NumberFormat::Decimal)).unwrap();
        template.add_level(Level::new(0, NumberFormat::Decimal)).unwrap();
        template.add_level(Level::new(1, NumberFormat::Decimal)).unwrap();

        let depths: Vec<u8> = template.levels().iter().map(|l| l.level()).collect();
        assert_eq!(depths, vec![0, 1, 2]);
    }

    #[test]
    fn test_duplicate_level_depth_rejected() {
        let mut template = StyleTemplate::new(0, LevelType::HybridMultilevel);
        template.add_level(Level::new(0, NumberFormat::Decimal)).unwrap();
        assert!(template.add_level(Level::new(0, NumberFormat::Bullet)).is_err());
    }

    #[test]
    fn test_built_in_templates() {
        let bulleted = built_in_template(NumberFormat::Bullet, 0).unwrap();
        assert_eq!(bulleted.levels().len(), MAX_LEVELS as usize);
        assert_eq!(bulleted.levels()[0].format(), NumberFormat::Bullet);
        assert_eq!(bulleted.levels()[0].start(), 1);
        assert_eq!(bulleted.levels()[0].indent(), (720, 360));
        assert_eq!(bulleted.levels()[1].indent(), (1440, 360));

        let numbered = built_in_template(NumberFormat::Decimal, 3).unwrap();
        assert_eq!(numbered.id(), 3);
        assert_eq!(numbered.levels()[0].format(), NumberFormat::Decimal);
        assert_eq!(numbered.levels()[1].format(), NumberFormat::LowerLetter);
        assert_eq!(numbered.levels()[2].format(), NumberFormat::LowerRoman);

        assert!(built_in_template(NumberFormat::UpperRoman, 0).is_err());
    }
}
