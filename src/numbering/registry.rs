/// The document-scoped numbering registry.
///
/// Owns every style template and definition of one document, allocates
/// their ids, and persists the whole collection as one part. Entities are
/// stored in insertion order (which is also the persisted order) with id
/// directories for O(1) lookup.
use crate::error::{DomError, Result};
use crate::numbering::definition::{Definition, LevelOverride};
use crate::numbering::template::{NumberFormat, StyleTemplate, built_in_template};
use crate::numbering::xml;
use crate::package::PartStore;
use std::collections::HashMap;

/// A definition paired with its resolved style template.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedDefinition<'a> {
    pub definition: &'a Definition,
    pub template: &'a StyleTemplate,
}

/// Registry of numbering style templates and definitions for one document.
#[derive(Debug, Default)]
pub struct NumberingRegistry {
    /// Templates in persisted order
    templates: Vec<StyleTemplate>,
    /// Template id -> arena slot
    template_ids: HashMap<u32, usize>,
    /// Definitions in persisted order
    definitions: Vec<Definition>,
    /// Definition id -> arena slot
    definition_ids: HashMap<u32, usize>,
}

impl NumberingRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a registry from its backing part.
    ///
    /// A missing part yields an empty registry; a malformed one is an
    /// `InvalidFormat` error.
    pub fn load(store: &mut dyn PartStore) -> Result<Self> {
        match store.load()? {
            Some(blob) => xml::parse_numbering(&blob),
            None => Ok(Self::new()),
        }
    }

    /// Flush the registry to its backing part.
    ///
    /// Synchronous and non-atomic: on failure the error propagates
    /// unchanged, the store keeps its last successful state, and the
    /// in-memory registry keeps the unsaved changes.
    pub fn save(&self, store: &mut dyn PartStore) -> Result<()> {
        let xml = xml::write_numbering(self)?;
        store.save(xml.as_bytes())
    }

    /// All style templates, in persisted order.
    pub fn styles(&self) -> &[StyleTemplate] {
        &self.templates
    }

    /// All definitions with their style templates eagerly resolved.
    ///
    /// Fails with `InvalidFormat` if any definition references a template
    /// id that is not registered; a dangling reference signals document
    /// corruption and is never silently repaired.
    pub fn definitions(&self) -> Result<Vec<ResolvedDefinition<'_>>> {
        self.definitions
            .iter()
            .map(|definition| {
                let template = self.style(definition.style_id()).ok_or_else(|| {
                    DomError::InvalidFormat(format!(
                        "definition {} references unknown style template {}",
                        definition.id(),
                        definition.style_id()
                    ))
                })?;
                Ok(ResolvedDefinition {
                    definition,
                    template,
                })
            })
            .collect()
    }

    /// Definitions in persisted order, without resolving style references.
    pub(crate) fn definition_entries(&self) -> &[Definition] {
        &self.definitions
    }

    /// Get a style template by id.
    pub fn style(&self, id: u32) -> Option<&StyleTemplate> {
        self.template_ids.get(&id).map(|&i| &self.templates[i])
    }

    /// Get a definition by id.
    pub fn definition(&self, num_id: u32) -> Option<&Definition> {
        self.definition_ids
            .get(&num_id)
            .map(|&i| &self.definitions[i])
    }

    /// Number of registered style templates.
    pub fn style_count(&self) -> usize {
        self.templates.len()
    }

    /// Number of registered definitions.
    pub fn definition_count(&self) -> usize {
        self.definitions.len()
    }

    /// Create a new definition for a list usage.
    ///
    /// Allocates a fresh style template from the canned skeleton for
    /// `format` (template ids count up from 0, definition ids from 1) and
    /// appends both to the registry. Every call allocates its own template;
    /// identical skeletons are deliberately not deduplicated so that
    /// observable id sequences stay stable. When `start_number != 1`, a
    /// level-0 override carries the starting value.
    ///
    /// Fails for formats without a built-in skeleton (only `Bullet` and
    /// `Decimal` are supported).
    pub fn create(&mut self, format: NumberFormat, start_number: u32) -> Result<&Definition> {
        let template_id = self
            .templates
            .iter()
            .map(StyleTemplate::id)
            .max()
            .map_or(0, |max| max + 1);
        let num_id = self
            .definitions
            .iter()
            .map(Definition::id)
            .max()
            .map_or(1, |max| max + 1);

        let template = built_in_template(format, template_id)?;

        let mut definition = Definition::new(num_id, template_id);
        if start_number != 1 {
            definition.add_override_for_level(LevelOverride::with_start(0, start_number))?;
        }

        self.insert_template(template)?;
        self.insert_definition(definition)?;
        Ok(&self.definitions[self.definition_ids[&num_id]])
    }

    /// Resolve the effective starting value for `(num_id, level)`.
    ///
    /// An override's explicit start wins, then an override's full level
    /// replacement, then the template level's own start. Fails if `num_id`
    /// has no definition, the style reference dangles, or the depth does
    /// not exist on the template.
    pub fn get_starting_number(&self, num_id: u32, level: u8) -> Result<u32> {
        let definition = self.definition(num_id).ok_or_else(|| {
            DomError::InvalidFormat(format!("no numbering definition with numId {}", num_id))
        })?;

        if let Some(level_override) = definition.override_for_level(level) {
            if let Some(start) = level_override.start() {
                return Ok(start);
            }
            if let Some(info) = level_override.level_info() {
                return Ok(info.start());
            }
        }

        let template = self.style(definition.style_id()).ok_or_else(|| {
            DomError::InvalidFormat(format!(
                "definition {} references unknown style template {}",
                num_id,
                definition.style_id()
            ))
        })?;
        let template_level = template.level(level).ok_or_else(|| {
            DomError::InvalidFormat(format!(
                "style template {} has no level at depth {}",
                template.id(),
                level
            ))
        })?;
        Ok(template_level.start())
    }

    /// Add a level override to an existing definition.
    ///
    /// The one supported mutation path after a definition is created.
    pub fn add_override_for_level(
        &mut self,
        num_id: u32,
        level_override: LevelOverride,
    ) -> Result<()> {
        let slot = *self.definition_ids.get(&num_id).ok_or_else(|| {
            DomError::InvalidFormat(format!("no numbering definition with numId {}", num_id))
        })?;
        self.definitions[slot].add_override_for_level(level_override)
    }

    /// Insert a template, rejecting duplicate ids.
    pub(crate) fn insert_template(&mut self, template: StyleTemplate) -> Result<()> {
        if self.template_ids.contains_key(&template.id()) {
            return Err(DomError::InvalidFormat(format!(
                "duplicate style template id {}",
                template.id()
            )));
        }
        self.template_ids.insert(template.id(), self.templates.len());
        self.templates.push(template);
        Ok(())
    }

    /// Insert a definition, rejecting duplicate and zero ids.
    pub(crate) fn insert_definition(&mut self, definition: Definition) -> Result<()> {
        if definition.id() == 0 {
            return Err(DomError::InvalidFormat(
                "definition id 0 is reserved for unbound lists".to_string(),
            ));
        }
        if self.definition_ids.contains_key(&definition.id()) {
            return Err(DomError::InvalidFormat(format!(
                "duplicate definition id {}",
                definition.id()
            )));
        }
        self.definition_ids
            .insert(definition.id(), self.definitions.len());
        self.definitions.push(definition);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_create_on_empty_registry() {
        let mut registry = NumberingRegistry::new();
        let definition = registry.create(NumberFormat::Bullet, 1).unwrap();

        // Style ids start at 0, definition ids at 1.
        assert_eq!(definition.id(), 1);
        assert_eq!(definition.style_id(), 0);
        assert_eq!(registry.style_count(), 1);
        assert_eq!(registry.definition_count(), 1);
    }

    #[test]
    fn test_create_allocates_increasing_ids() {
        let mut registry = NumberingRegistry::new();
        let mut num_ids = Vec::new();
        let mut style_ids = Vec::new();
        for _ in 0..4 {
            let definition = registry.create(NumberFormat::Decimal, 1).unwrap();
            num_ids.push(definition.id());
            style_ids.push(definition.style_id());
        }
        assert_eq!(num_ids, vec![1, 2, 3, 4]);
        assert_eq!(style_ids, vec![0, 1, 2, 3]);
        assert_eq!(registry.style_count(), 4);
        assert_eq!(registry.definition_count(), 4);
    }

    #[test]
    fn test_create_rejects_unsupported_format() {
        let mut registry = NumberingRegistry::new();
        let err = registry.create(NumberFormat::UpperLetter, 1).unwrap_err();
        assert!(matches!(err, DomError::Validation(_)));
        assert_eq!(registry.style_count(), 0);
        assert_eq!(registry.definition_count(), 0);
    }

    #[test]
    fn test_start_number_one_adds_no_override() {
        let mut registry = NumberingRegistry::new();
        let definition = registry.create(NumberFormat::Decimal, 1).unwrap();
        assert!(definition.overrides().is_empty());
    }

    #[test]
    fn test_start_number_becomes_level_zero_override() {
        let mut registry = NumberingRegistry::new();
        let num_id = registry.create(NumberFormat::Decimal, 5).unwrap().id();

        let definition = registry.definition(num_id).unwrap();
        let level_override = definition.override_for_level(0).unwrap();
        assert_eq!(level_override.start(), Some(5));
        assert_eq!(registry.get_starting_number(num_id, 0).unwrap(), 5);
        // Deeper levels keep the template default.
        assert_eq!(registry.get_starting_number(num_id, 1).unwrap(), 1);
    }

    #[test]
    fn test_get_starting_number_unknown_num_id() {
        let registry = NumberingRegistry::new();
        let err = registry.get_starting_number(42, 0).unwrap_err();
        assert!(matches!(err, DomError::InvalidFormat(_)));
    }

    #[test]
    fn test_definitions_resolve_eagerly() {
        let mut registry = NumberingRegistry::new();
        registry.create(NumberFormat::Bullet, 1).unwrap();

        let resolved = registry.definitions().unwrap();
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].template.id(), resolved[0].definition.style_id());

        // A dangling style reference fails the whole enumeration.
        registry.insert_definition(Definition::new(99, 77)).unwrap();
        assert!(matches!(
            registry.definitions(),
            Err(DomError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_registry_override_path() {
        let mut registry = NumberingRegistry::new();
        let num_id = registry.create(NumberFormat::Decimal, 1).unwrap().id();

        registry
            .add_override_for_level(num_id, LevelOverride::with_start(2, 7))
            .unwrap();
        assert_eq!(registry.get_starting_number(num_id, 2).unwrap(), 7);

        let err = registry
            .add_override_for_level(num_id, LevelOverride::new(2))
            .unwrap_err();
        assert!(matches!(err, DomError::Validation(_)));
    }

    #[test]
    fn test_insert_definition_rejects_zero_id() {
        let mut registry = NumberingRegistry::new();
        assert!(registry.insert_definition(Definition::new(0, 0)).is_err());
    }

    proptest! {
        #[test]
        fn prop_create_round_trips_start_number(start in 0u32..10_000) {
            let mut registry = NumberingRegistry::new();
            let num_id = registry.create(NumberFormat::Decimal, start).unwrap().id();
            prop_assert_eq!(registry.get_starting_number(num_id, 0).unwrap(), start);
        }
    }
}
