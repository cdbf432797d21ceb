//! Sealing: resolving every dataset link of a merged property into a value.

use crate::{MergedField, MergedGroup, MergedProperty, Property, merge};
use scenepub_dataset::GraphLoader;
use scenepub_types::{
    DatasetId, FieldId, ItemId, PropertyId, PropertySchemaId, Result, SchemaGroupId, Value,
    ValueType,
};
use serde_json::{Map, Value as JsonValue};
use tracing::debug;

/// A property with no unresolved links. Every field holds a concrete value or
/// nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct SealedProperty {
    pub original: Option<PropertyId>,
    pub parent: Option<PropertyId>,
    pub schema: PropertySchemaId,
    pub linked_dataset: Option<DatasetId>,
    pub items: Vec<SealedItem>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SealedItem {
    pub original: Option<ItemId>,
    pub parent: Option<ItemId>,
    pub schema_group: SchemaGroupId,
    pub linked_dataset: Option<DatasetId>,
    pub list: bool,
    pub fields: Vec<SealedField>,
    pub groups: Vec<SealedItem>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SealedField {
    pub id: FieldId,
    pub value_type: ValueType,
    pub value: Option<Value>,
}

/// Seals a merged property, resolving dataset links through `loader`.
///
/// A link that cannot be resolved (missing dataset or field, broken reference
/// chain) seals to `None`. Only loader failures other than `NotFound` are
/// returned as errors.
pub async fn seal(merged: &MergedProperty, loader: &dyn GraphLoader) -> Result<SealedProperty> {
    let mut items = Vec::with_capacity(merged.groups.len());
    for group in &merged.groups {
        let mut entries = Vec::with_capacity(group.groups.len());
        for entry in &group.groups {
            let fields = seal_fields(&entry.fields, entry.linked_dataset, loader).await?;
            entries.push(sealed_item(entry, fields, Vec::new()));
        }
        let fields = seal_fields(&group.fields, group.linked_dataset, loader).await?;
        items.push(sealed_item(group, fields, entries));
    }

    Ok(SealedProperty {
        original: merged.original,
        parent: merged.parent,
        schema: merged.schema.clone(),
        linked_dataset: merged.linked_dataset,
        items,
    })
}

async fn seal_fields(
    fields: &[MergedField],
    linked_dataset: Option<DatasetId>,
    loader: &dyn GraphLoader,
) -> Result<Vec<SealedField>> {
    let mut sealed = Vec::with_capacity(fields.len());
    for field in fields {
        sealed.push(SealedField {
            id: field.id.clone(),
            value_type: field.value_type,
            value: seal_value(field, linked_dataset, loader).await?,
        });
    }
    Ok(sealed)
}

async fn seal_value(
    field: &MergedField,
    linked_dataset: Option<DatasetId>,
    loader: &dyn GraphLoader,
) -> Result<Option<Value>> {
    // An explicit override is taken literally even when it carries links.
    if field.links.is_empty() || (field.overridden && field.value.is_some()) {
        return Ok(field.value.clone());
    }

    let links = field.links.apply_dataset(linked_dataset);
    let (Some(first), Some(last)) = (links.first(), links.last()) else {
        return Ok(None);
    };

    let graph = if let Some(dataset) = last.dataset {
        loader.load_graph(dataset, &[last.hop()]).await?
    } else if let Some(dataset) = first.dataset {
        loader.load_graph(dataset, &links.hops()).await?
    } else {
        debug!(field_id = %field.id, "Dataset link has no dataset to start from");
        return Ok(None);
    };

    let value = graph.field.and_then(|f| f.value);
    if value.is_none() {
        debug!(field_id = %field.id, hops = links.len(), "Dataset link resolved to nothing");
    }
    Ok(value)
}

fn sealed_item(group: &MergedGroup, fields: Vec<SealedField>, groups: Vec<SealedItem>) -> SealedItem {
    SealedItem {
        original: group.original,
        parent: group.parent,
        schema_group: group.schema_group.clone(),
        linked_dataset: group.linked_dataset,
        list: group.list,
        fields,
        groups,
    }
}

fn literal_fields(fields: &[MergedField]) -> Vec<SealedField> {
    fields
        .iter()
        .map(|f| SealedField {
            id: f.id.clone(),
            value_type: f.value_type,
            value: f.value.clone(),
        })
        .collect()
}

impl SealedProperty {
    /// Seals a merged property using literal values only; links are ignored.
    pub fn literal(merged: &MergedProperty) -> Self {
        Self {
            original: merged.original,
            parent: merged.parent,
            schema: merged.schema.clone(),
            linked_dataset: merged.linked_dataset,
            items: merged
                .groups
                .iter()
                .map(|g| {
                    let entries = g
                        .groups
                        .iter()
                        .map(|e| sealed_item(e, literal_fields(&e.fields), Vec::new()))
                        .collect();
                    sealed_item(g, literal_fields(&g.fields), entries)
                })
                .collect(),
        }
    }

    /// Seals a standalone property (no parent, no dataset resolution).
    pub fn from_property(property: &Property) -> Self {
        match merge(Some(property), None, None) {
            Some(merged) => Self::literal(&merged),
            None => Self {
                original: Some(property.id),
                parent: None,
                schema: property.schema.clone(),
                linked_dataset: None,
                items: Vec::new(),
            },
        }
    }

    /// Finds a field by id across all plain groups.
    pub fn field(&self, id: &str) -> Option<&SealedField> {
        self.items
            .iter()
            .filter(|i| !i.list)
            .find_map(|i| i.fields.iter().find(|f| f.id.as_str() == id))
    }

    /// Value of a field by id; `None` when missing or nil.
    pub fn value(&self, id: &str) -> Option<&Value> {
        self.field(id).and_then(|f| f.value.as_ref())
    }

    /// Renders the property as `{schemaGroup: {field: value}}`. Group lists
    /// render as `{schemaGroup: [{id, field: value, ...}]}`. Nil values and
    /// empty items are omitted.
    pub fn interface(&self) -> Map<String, JsonValue> {
        let mut map = Map::new();
        for item in &self.items {
            let rendered = if item.list {
                let entries: Vec<JsonValue> = item
                    .groups
                    .iter()
                    .map(|g| {
                        let mut fields = fields_interface(&g.fields);
                        if let Some(id) = g.original.or(g.parent) {
                            fields.insert("id".to_string(), JsonValue::String(id.to_string()));
                        }
                        JsonValue::Object(fields)
                    })
                    .collect();
                if entries.is_empty() {
                    continue;
                }
                JsonValue::Array(entries)
            } else {
                let fields = fields_interface(&item.fields);
                if fields.is_empty() {
                    continue;
                }
                JsonValue::Object(fields)
            };
            map.insert(item.schema_group.to_string(), rendered);
        }
        map
    }
}

fn fields_interface(fields: &[SealedField]) -> Map<String, JsonValue> {
    fields
        .iter()
        .filter_map(|f| f.value.as_ref().map(|v| (f.id.to_string(), v.to_json())))
        .collect()
}
