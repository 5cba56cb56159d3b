//! End-to-end tests for list building, numbering resolution, and registry
//! persistence.

use quince::document::Document;
use quince::error::DomError;
use quince::numbering::{LevelOverride, List, NumberFormat, NumberingRegistry, queries};
use quince::package::{FilePartStore, MemoryPartStore, PartStore};

#[test]
fn build_bind_and_query_a_list() {
    let mut doc = Document::new();
    let mut registry = NumberingRegistry::new();

    let mut list = List::numbered(1);
    for text in ["alpha", "beta", "gamma"] {
        list.add_item(&mut doc, text, 0);
    }

    let bound = list.bind(&mut doc, &mut registry).unwrap();
    assert_eq!(bound.num_id(), 1);
    assert_eq!(registry.style_count(), 1);
    assert_eq!(registry.definition_count(), 1);

    // Every member paragraph reports the list's id and its own depth.
    for item in bound.items(&doc) {
        let para = doc.paragraph(item.body_index).unwrap();
        assert!(queries::is_list_item(para));
        assert_eq!(queries::list_level(para), Some(0));
        assert_eq!(queries::list_num_id(para), Some(bound.num_id()));
        assert_eq!(
            queries::numbering_format(para, &registry).unwrap(),
            NumberFormat::Decimal
        );
    }
}

#[test]
fn two_lists_share_nothing() {
    let mut doc = Document::new();
    let mut registry = NumberingRegistry::new();

    let first = List::bulleted().bind(&mut doc, &mut registry).unwrap();
    let second = List::numbered(3).bind(&mut doc, &mut registry).unwrap();

    // One template and one definition per list, ids strictly increasing.
    assert_eq!(first.num_id(), 1);
    assert_eq!(second.num_id(), 2);
    assert_eq!(registry.style_count(), 2);
    assert_eq!(registry.definition_count(), 2);

    assert_eq!(registry.get_starting_number(first.num_id(), 0).unwrap(), 1);
    assert_eq!(registry.get_starting_number(second.num_id(), 0).unwrap(), 3);
}

#[test]
fn start_number_survives_persistence() {
    let mut registry = NumberingRegistry::new();
    let mut doc = Document::new();

    let mut list = List::numbered(7);
    list.add_item(&mut doc, "seventh", 0);
    let bound = list.bind(&mut doc, &mut registry).unwrap();

    let mut store = MemoryPartStore::new();
    registry.save(&mut store).unwrap();

    let reloaded = NumberingRegistry::load(&mut store).unwrap();
    assert_eq!(
        reloaded.get_starting_number(bound.num_id(), 0).unwrap(),
        7
    );
    assert_eq!(reloaded.style_count(), registry.style_count());
    assert_eq!(reloaded.definition_count(), registry.definition_count());
}

#[test]
fn registry_round_trips_through_a_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = FilePartStore::new(dir.path().join("numbering.xml"));

    // A missing part loads as an empty registry.
    let empty = NumberingRegistry::load(&mut store).unwrap();
    assert_eq!(empty.definition_count(), 0);

    let mut registry = NumberingRegistry::new();
    registry.create(NumberFormat::Bullet, 1).unwrap();
    let num_id = registry.create(NumberFormat::Decimal, 10).unwrap().id();
    registry
        .add_override_for_level(num_id, LevelOverride::with_start(1, 4))
        .unwrap();
    registry.save(&mut store).unwrap();

    let reloaded = NumberingRegistry::load(&mut store).unwrap();
    assert_eq!(reloaded.style_count(), 2);
    assert_eq!(reloaded.definition_count(), 2);
    assert_eq!(reloaded.get_starting_number(num_id, 0).unwrap(), 10);
    assert_eq!(reloaded.get_starting_number(num_id, 1).unwrap(), 4);

    // Resolution still holds after the round trip.
    let resolved = reloaded.definitions().unwrap();
    assert_eq!(resolved.len(), 2);
}

#[test]
fn dangling_num_id_fails_loudly() {
    let mut doc = Document::new();
    let registry = NumberingRegistry::new();

    // A paragraph stamped with markers nothing in the registry backs.
    let para = doc.add_paragraph_with_text("stray");
    para.set_numbering(quince::document::NumberingMarkers { num_id: 9, level: 0 });

    let para = doc.paragraph(0).unwrap();
    let err = queries::numbering_format(para, &registry).unwrap_err();
    assert!(matches!(err, DomError::InvalidFormat(_)));
}

#[test]
fn adopting_across_lists_is_rejected() {
    let mut doc = Document::new();
    let mut registry = NumberingRegistry::new();

    let mut first = List::bulleted();
    let index = first.add_item(&mut doc, "mine", 0);
    let first = first.bind(&mut doc, &mut registry).unwrap();

    let mut second = List::bulleted().bind(&mut doc, &mut registry).unwrap();
    let err = second.adopt_item(&mut doc, index, 0).unwrap_err();
    assert!(matches!(err, DomError::Validation(_)));

    // The paragraph still belongs to the first list.
    assert_eq!(
        queries::list_num_id(doc.paragraph(index).unwrap()),
        Some(first.num_id())
    );
}

#[test]
fn document_xml_carries_list_markers() {
    let mut doc = Document::new();
    let mut registry = NumberingRegistry::new();

    let mut list = List::bulleted();
    list.add_item(&mut doc, "bullet point", 0);
    let bound = list.bind(&mut doc, &mut registry).unwrap();

    let xml = doc.to_xml().unwrap();
    assert!(xml.contains("<w:pStyle w:val=\"ListParagraph\"/>"));
    assert!(xml.contains(&format!("<w:numId w:val=\"{}\"/>", bound.num_id())));
    assert!(xml.contains("bullet point"));
}

#[test]
fn failed_save_keeps_memory_state() {
    struct FailingStore;
    impl PartStore for FailingStore {
        fn load(&mut self) -> quince::Result<Option<Vec<u8>>> {
            Ok(None)
        }
        fn save(&mut self, _blob: &[u8]) -> quince::Result<()> {
            Err(DomError::Io(std::io::Error::other("disk full")))
        }
    }

    let mut registry = NumberingRegistry::new();
    registry.create(NumberFormat::Decimal, 2).unwrap();

    let err = registry.save(&mut FailingStore).unwrap_err();
    assert!(matches!(err, DomError::Io(_)));

    // The in-memory registry keeps the unsaved changes.
    assert_eq!(registry.definition_count(), 1);
    assert_eq!(registry.get_starting_number(1, 0).unwrap(), 2);
}
