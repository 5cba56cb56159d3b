/// Numbering definitions: concrete, document-referenceable numbering
/// instances (`w:num`).
use crate::error::{DomError, Result};
use crate::numbering::template::Level;

/// A per-level override on one definition (`w:lvlOverride`).
#[derive(Debug, Clone, PartialEq)]
pub struct LevelOverride {
    /// 0-based depth this override applies to
    level: u8,
    /// Starting-value override (`w:startOverride`)
    start: Option<u32>,
    /// Full level replacement
    level_info: Option<Level>,
}

impl LevelOverride {
    /// Create an empty override for `level`.
    pub fn new(level: u8) -> Self {
        Self {
            level,
            start: None,
            level_info: None,
        }
    }

    /// Create an override carrying only a starting value.
    pub fn with_start(level: u8, start: u32) -> Self {
        Self {
            level,
            start: Some(start),
            level_info: None,
        }
    }

    /// Get the depth this override applies to.
    #[inline]
    pub fn level(&self) -> u8 {
        self.level
    }

    /// Get the starting-value override, if set.
    #[inline]
    pub fn start(&self) -> Option<u32> {
        self.start
    }

    /// Set the starting-value override.
    pub fn set_start(&mut self, start: Option<u32>) {
        self.start = start;
    }

    /// Get the full level replacement, if set.
    #[inline]
    pub fn level_info(&self) -> Option<&Level> {
        self.level_info.as_ref()
    }

    /// Set the full level replacement.
    pub fn set_level_info(&mut self, level_info: Option<Level>) {
        self.level_info = level_info;
    }
}

/// A numbering definition binding one list usage to a style template.
///
/// Read-mostly after construction: the template reference is immutable and
/// the only supported mutation is adding level overrides.
#[derive(Debug, Clone, PartialEq)]
pub struct Definition {
    /// Definition id (`w:numId`), unique and greater than zero
    id: u32,
    /// Referenced style template (`w:abstractNumId`); must resolve
    style_id: u32,
    /// Per-level overrides, at most one per depth
    overrides: Vec<LevelOverride>,
}

impl Definition {
    /// Create a definition referencing `style_id`.
    pub fn new(id: u32, style_id: u32) -> Self {
        Self {
            id,
            style_id,
            overrides: Vec::new(),
        }
    }

    /// Get the definition id.
    #[inline]
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Get the referenced style template id.
    #[inline]
    pub fn style_id(&self) -> u32 {
        self.style_id
    }

    /// Get all level overrides.
    #[inline]
    pub fn overrides(&self) -> &[LevelOverride] {
        &self.overrides
    }

    /// Add an override for one depth.
    ///
    /// Fails if an override for that depth already exists: exactly one
    /// override per level.
    pub fn add_override_for_level(&mut self, level_override: LevelOverride) -> Result<()> {
        if self.override_for_level(level_override.level()).is_some() {
            return Err(DomError::Validation(format!(
                "definition {} already has an override for level {}",
                self.id,
                level_override.level()
            )));
        }
        self.overrides.push(level_override);
        Ok(())
    }

    /// Get the override for `level`, if present.
    pub fn override_for_level(&self, level: u8) -> Option<&LevelOverride> {
        self.overrides.iter().find(|o| o.level() == level)
    }
}
