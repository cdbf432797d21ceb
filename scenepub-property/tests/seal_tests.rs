use async_trait::async_trait;
use pretty_assertions::assert_eq;
use scenepub_dataset::memory::MemoryDatasetLoader;
use scenepub_dataset::{Dataset, DatasetField, DatasetGraph, GraphHop, GraphLoader, GraphWalker};
use scenepub_property::{Field, Link, Links, Property, SealedProperty, merge, seal};
use scenepub_types::{
    DatasetFieldId, DatasetId, DatasetSchemaId, Error, LatLng, Result, Value, ValueType,
};
use serde_json::json;

struct Fixture {
    schema: DatasetSchemaId,
    name_field: DatasetFieldId,
    city_field: DatasetFieldId,
    tokyo: DatasetId,
    office: DatasetId,
    loader: MemoryDatasetLoader,
}

/// Two rows: an office that references a city; the city has a name.
fn fixture() -> Fixture {
    let schema = DatasetSchemaId::new();
    let name_field = DatasetFieldId::new();
    let city_field = DatasetFieldId::new();
    let tokyo = DatasetId::new();
    let office = DatasetId::new();
    let row = |id, fields: Vec<(DatasetFieldId, Value)>| Dataset {
        id,
        schema,
        source: String::new(),
        fields: fields
            .into_iter()
            .map(|(field, value)| DatasetField {
                field,
                value: Some(value),
                source: String::new(),
            })
            .collect(),
    };
    let loader = [
        row(tokyo, vec![(name_field, Value::String("Tokyo".into()))]),
        row(
            office,
            vec![
                (name_field, Value::String("HQ".into())),
                (city_field, Value::Ref(tokyo)),
            ],
        ),
    ]
    .into_iter()
    .collect();
    Fixture {
        schema,
        name_field,
        city_field,
        tokyo,
        office,
        loader,
    }
}

fn single(field: Field) -> Property {
    Property::new("reearth/marker").with_group("default", vec![field])
}

struct BrokenGraph;

#[async_trait]
impl GraphLoader for BrokenGraph {
    async fn load_graph(&self, _root: DatasetId, _hops: &[GraphHop]) -> Result<DatasetGraph> {
        Err(Error::Internal("dataset store unavailable".into()))
    }
}

// ── Literal values ───────────────────────────────────────────────

#[tokio::test]
async fn unlinked_field_is_sealed_literally() {
    let f = fixture();
    let p = single(Field::new("height", Value::Number(12.0)));
    let merged = merge(Some(&p), None, None).unwrap();

    let sealed = seal(&merged, &GraphWalker::new(&f.loader)).await.unwrap();
    assert_eq!(sealed.value("height"), Some(&Value::Number(12.0)));
}

#[tokio::test]
async fn explicit_override_ignores_links() {
    let f = fixture();
    let links = Links::new(vec![Link::new(f.schema, f.name_field).with_dataset(f.tokyo)]);
    let mut field = Field::new("name", Value::String("Literal".into()));
    field.links = links;
    let merged = merge(Some(&single(field)), None, None).unwrap();

    let sealed = seal(&merged, &GraphWalker::new(&f.loader)).await.unwrap();
    assert_eq!(sealed.value("name"), Some(&Value::String("Literal".into())));
}

// ── Dataset links ────────────────────────────────────────────────

#[tokio::test]
async fn inherited_link_uses_linked_dataset() {
    let f = fixture();
    let template = single(Field::linked(
        "name",
        ValueType::String,
        Links::new(vec![Link::new(f.schema, f.name_field)]),
    ));
    let item = Property::new("reearth/marker");

    let merged = merge(Some(&item), Some(&template), Some(f.tokyo)).unwrap();
    let sealed = seal(&merged, &GraphWalker::new(&f.loader)).await.unwrap();

    assert_eq!(sealed.value("name"), Some(&Value::String("Tokyo".into())));
}

#[tokio::test]
async fn direct_link_loads_last_dataset() {
    let f = fixture();
    let field = Field::linked(
        "name",
        ValueType::String,
        Links::new(vec![Link::new(f.schema, f.name_field).with_dataset(f.office)]),
    );
    let merged = merge(Some(&single(field)), None, Some(f.tokyo)).unwrap();

    let sealed = seal(&merged, &GraphWalker::new(&f.loader)).await.unwrap();
    assert_eq!(sealed.value("name"), Some(&Value::String("HQ".into())));
}

#[tokio::test]
async fn chained_link_follows_reference() {
    let f = fixture();
    let field = Field::linked(
        "city",
        ValueType::String,
        Links::new(vec![
            Link::new(f.schema, f.city_field).with_dataset(f.office),
            Link::new(f.schema, f.name_field),
        ]),
    );
    let merged = merge(Some(&single(field)), None, None).unwrap();

    let sealed = seal(&merged, &GraphWalker::new(&f.loader)).await.unwrap();
    assert_eq!(sealed.value("city"), Some(&Value::String("Tokyo".into())));
}

#[tokio::test]
async fn unresolvable_link_seals_to_nil() {
    let f = fixture();
    let field = Field::linked(
        "name",
        ValueType::String,
        Links::new(vec![Link::new(f.schema, f.name_field).with_dataset(DatasetId::new())]),
    );
    let merged = merge(Some(&single(field)), None, None).unwrap();

    let sealed = seal(&merged, &GraphWalker::new(&f.loader)).await.unwrap();
    let sealed_field = sealed.field("name").unwrap();
    assert_eq!(sealed_field.value, None);
    assert_eq!(sealed_field.value_type, ValueType::String);
}

#[tokio::test]
async fn link_to_row_of_another_schema_seals_to_nil() {
    let f = fixture();
    let field = Field::linked(
        "name",
        ValueType::String,
        Links::new(vec![Link::new(DatasetSchemaId::new(), f.name_field).with_dataset(f.tokyo)]),
    );
    let merged = merge(Some(&single(field)), None, None).unwrap();

    let sealed = seal(&merged, &GraphWalker::new(&f.loader)).await.unwrap();
    assert_eq!(sealed.value("name"), None);
}

#[tokio::test]
async fn link_without_any_dataset_seals_to_nil() {
    let f = fixture();
    let field = Field::linked(
        "name",
        ValueType::String,
        Links::new(vec![Link::new(f.schema, f.name_field)]),
    );
    let merged = merge(Some(&single(field)), None, None).unwrap();
    let sealed = seal(&merged, &GraphWalker::new(&f.loader)).await.unwrap();
    assert_eq!(sealed.value("name"), None);
}

#[tokio::test]
async fn internal_loader_error_propagates() {
    let f = fixture();
    let field = Field::linked(
        "name",
        ValueType::String,
        Links::new(vec![Link::new(f.schema, f.name_field).with_dataset(f.tokyo)]),
    );
    let merged = merge(Some(&single(field)), None, None).unwrap();
    let err = seal(&merged, &BrokenGraph).await.unwrap_err();
    assert!(matches!(err, Error::Internal(_)));
}

#[tokio::test]
async fn sealing_is_deterministic() {
    let f = fixture();
    let template = single(Field::linked(
        "name",
        ValueType::String,
        Links::new(vec![Link::new(f.schema, f.name_field)]),
    ));
    let merged = merge(None, Some(&template), Some(f.office)).unwrap();
    let graph = GraphWalker::new(&f.loader);

    let a = seal(&merged, &graph).await.unwrap();
    let b = seal(&merged, &graph).await.unwrap();
    assert_eq!(a, b);
    assert_eq!(
        serde_json::to_string(&a.interface()).unwrap(),
        serde_json::to_string(&b.interface()).unwrap()
    );
}

// ── Literal sealing and JSON interface ───────────────────────────

#[test]
fn from_property_ignores_links() {
    let links = Links::new(vec![
        Link::new(DatasetSchemaId::new(), DatasetFieldId::new()).with_dataset(DatasetId::new()),
    ]);
    let p = single(Field::linked("name", ValueType::String, links));
    let sealed = SealedProperty::from_property(&p);
    assert_eq!(sealed.original, Some(p.id));
    assert_eq!(sealed.value("name"), None);
}

#[test]
fn interface_renders_groups_and_lists() {
    let p = Property::new("reearth/scene")
        .with_group(
            "default",
            vec![
                Field::new("camera", Value::LatLng(LatLng { lat: 1.0, lng: 2.0 })),
                Field::linked("empty", ValueType::String, Links::default()),
            ],
        )
        .with_group_list(
            "tiles",
            vec![vec![Field::new("tile_type", Value::String("default".into()))]],
        )
        .with_group("atmosphere", vec![]);

    let sealed = SealedProperty::from_property(&p);
    let interface = serde_json::Value::Object(sealed.interface());

    assert_eq!(interface["default"], json!({ "camera": { "lat": 1.0, "lng": 2.0 } }));
    let tiles = interface["tiles"].as_array().unwrap();
    assert_eq!(tiles.len(), 1);
    assert_eq!(tiles[0]["tile_type"], json!("default"));
    assert!(tiles[0]["id"].is_string());
    assert!(interface.get("atmosphere").is_none());
}
