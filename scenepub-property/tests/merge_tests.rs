use pretty_assertions::assert_eq;
use scenepub_property::{Field, Item, Link, Links, MergedMetadata, Property, merge};
use scenepub_types::{
    DatasetFieldId, DatasetId, DatasetSchemaId, FieldId, LatLng, Value, ValueType,
};
use std::collections::HashMap;

fn marker_property(fields: Vec<Field>) -> Property {
    Property::new("reearth/marker").with_group("default", fields)
}

fn location(lat: f64, lng: f64) -> Value {
    Value::LatLng(LatLng { lat, lng })
}

// ── Field override law ───────────────────────────────────────────

#[test]
fn original_field_overrides_parent() {
    let original = marker_property(vec![Field::new("location", location(1.0, 2.0))]);
    let parent = marker_property(vec![Field::new("location", location(3.0, 4.0))]);

    let merged = merge(Some(&original), Some(&parent), None).unwrap();
    let field = merged.field(&FieldId::new("location")).unwrap();

    assert_eq!(field.value, Some(location(1.0, 2.0)));
    assert!(field.overridden);
    assert_eq!(merged.original, Some(original.id));
    assert_eq!(merged.parent, Some(parent.id));
}

#[test]
fn missing_original_field_inherits_parent() {
    let original = marker_property(vec![Field::new("height", Value::Number(10.0))]);
    let parent = marker_property(vec![
        Field::new("location", location(3.0, 4.0)),
        Field::new("height", Value::Number(99.0)),
    ]);

    let merged = merge(Some(&original), Some(&parent), None).unwrap();

    let loc = merged.field(&FieldId::new("location")).unwrap();
    assert_eq!(loc.value, Some(location(3.0, 4.0)));
    assert!(!loc.overridden);

    let height = merged.field(&FieldId::new("height")).unwrap();
    assert_eq!(height.value, Some(Value::Number(10.0)));
    assert!(height.overridden);
}

#[test]
fn field_order_is_original_then_inherited() {
    let original = marker_property(vec![Field::new("b", Value::Number(1.0))]);
    let parent = marker_property(vec![
        Field::new("a", Value::Number(2.0)),
        Field::new("b", Value::Number(3.0)),
    ]);
    let merged = merge(Some(&original), Some(&parent), None).unwrap();
    let ids: Vec<&str> = merged.groups[0].fields.iter().map(|f| f.id.as_str()).collect();
    assert_eq!(ids, vec!["b", "a"]);
}

#[test]
fn type_mismatch_is_not_merged() {
    let original = marker_property(vec![Field::new("size", Value::String("big".into()))]);
    let parent = marker_property(vec![Field::new("size", Value::Number(3.0))]);

    let merged = merge(Some(&original), Some(&parent), None).unwrap();
    let fields = &merged.groups[0].fields;
    assert_eq!(fields.len(), 1);
    assert_eq!(fields[0].value, Some(Value::String("big".into())));
}

#[test]
fn original_only_field_is_overridden() {
    let original = marker_property(vec![Field::new("height", Value::Number(1.0))]);
    let merged = merge(Some(&original), None, None).unwrap();
    assert!(merged.field(&FieldId::new("height")).unwrap().overridden);
}

// ── Property level ───────────────────────────────────────────────

#[test]
fn both_absent_yields_none() {
    assert!(merge(None, None, None).is_none());
}

#[test]
fn parent_only_is_fully_inherited() {
    let parent = marker_property(vec![Field::new("height", Value::Number(5.0))]);
    let merged = merge(None, Some(&parent), None).unwrap();
    assert_eq!(merged.original, None);
    assert_eq!(merged.parent, Some(parent.id));
    let field = merged.field(&FieldId::new("height")).unwrap();
    assert!(!field.overridden);
}

#[test]
fn parent_with_other_schema_is_ignored() {
    let original = marker_property(vec![]);
    let parent = Property::new("reearth/polygon")
        .with_group("default", vec![Field::new("fill", Value::Bool(true))]);

    let merged = merge(Some(&original), Some(&parent), None).unwrap();
    assert_eq!(merged.parent, None);
    assert!(merged.field(&FieldId::new("fill")).is_none());
}

#[test]
fn linked_dataset_is_carried_to_groups() {
    let ds = DatasetId::new();
    let original = marker_property(vec![]);
    let merged = merge(Some(&original), None, Some(ds)).unwrap();
    assert_eq!(merged.linked_dataset, Some(ds));
    assert_eq!(merged.groups[0].linked_dataset, Some(ds));
}

#[test]
fn links_come_from_the_winning_side() {
    let links = Links::new(vec![Link::new(DatasetSchemaId::new(), DatasetFieldId::new())]);
    let original = marker_property(vec![]);
    let parent = marker_property(vec![Field::linked("location", ValueType::LatLng, links.clone())]);

    let merged = merge(Some(&original), Some(&parent), None).unwrap();
    let field = merged.field(&FieldId::new("location")).unwrap();
    assert_eq!(field.links, links);
    assert_eq!(field.value, None);
}

// ── Group lists ──────────────────────────────────────────────────

#[test]
fn non_empty_original_list_replaces_parent_list() {
    let original = Property::new("reearth/tileset")
        .with_group_list("tiles", vec![vec![Field::new("type", Value::String("osm".into()))]]);
    let parent = Property::new("reearth/tileset").with_group_list(
        "tiles",
        vec![
            vec![Field::new("type", Value::String("bing".into()))],
            vec![Field::new("type", Value::String("esri".into()))],
        ],
    );

    let merged = merge(Some(&original), Some(&parent), None).unwrap();
    let list = &merged.groups[0];
    assert!(list.list);
    assert_eq!(list.groups.len(), 1);
    assert_eq!(list.groups[0].fields[0].value, Some(Value::String("osm".into())));
    assert!(list.groups[0].fields[0].overridden);
}

#[test]
fn empty_original_list_inherits_parent_entries() {
    let original = Property::new("reearth/tileset").with_group_list("tiles", vec![]);
    let parent = Property::new("reearth/tileset")
        .with_group_list("tiles", vec![vec![Field::new("type", Value::String("bing".into()))]]);

    let merged = merge(Some(&original), Some(&parent), None).unwrap();
    let list = &merged.groups[0];
    assert_eq!(list.groups.len(), 1);
    assert!(!list.groups[0].fields[0].overridden);
    let Item::GroupList(parent_list) = &parent.items[0] else {
        panic!("expected group list");
    };
    assert_eq!(list.groups[0].parent, Some(parent_list.groups[0].id));
}

// ── MergedMetadata ───────────────────────────────────────────────

#[test]
fn metadata_merges_from_loaded_set() {
    let original = marker_property(vec![Field::new("height", Value::Number(1.0))]);
    let parent = marker_property(vec![Field::new("location", location(0.0, 0.0))]);
    let meta = MergedMetadata {
        original: Some(original.id),
        parent: Some(parent.id),
        linked_dataset: None,
    };
    assert_eq!(meta.property_ids().collect::<Vec<_>>(), vec![original.id, parent.id]);

    let loaded: HashMap<_, _> = [original.clone(), parent.clone()]
        .into_iter()
        .map(|p| (p.id, p))
        .collect();
    let merged = meta.merge(&loaded).unwrap();
    assert_eq!(merged, merge(Some(&original), Some(&parent), None).unwrap());
}

#[test]
fn metadata_with_unloaded_ids_merges_nothing() {
    let meta = MergedMetadata {
        original: Some(scenepub_types::PropertyId::new()),
        parent: None,
        linked_dataset: None,
    };
    assert!(meta.merge(&HashMap::new()).is_none());
}
