//! Merging an original property over its parent's.

use crate::{Field, Group, Item, Links, Overridden, Property};
use scenepub_types::{
    DatasetId, FieldId, ItemId, PropertyId, PropertySchemaId, SchemaGroupId, Value, ValueType,
};
use std::collections::HashMap;

/// Which properties a merge combines, before they are loaded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergedMetadata {
    pub original: Option<PropertyId>,
    pub parent: Option<PropertyId>,
    pub linked_dataset: Option<DatasetId>,
}

impl MergedMetadata {
    /// Property ids to load for this merge (original first).
    pub fn property_ids(&self) -> impl Iterator<Item = PropertyId> + '_ {
        self.original.into_iter().chain(self.parent)
    }

    /// Merges the referenced properties from an already loaded set.
    pub fn merge(&self, properties: &HashMap<PropertyId, Property>) -> Option<MergedProperty> {
        let original = self.original.and_then(|id| properties.get(&id));
        let parent = self.parent.and_then(|id| properties.get(&id));
        merge(original, parent, self.linked_dataset)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MergedProperty {
    pub original: Option<PropertyId>,
    pub parent: Option<PropertyId>,
    pub schema: PropertySchemaId,
    pub linked_dataset: Option<DatasetId>,
    pub groups: Vec<MergedGroup>,
}

/// A merged group or group list. For a list, `groups` holds the merged
/// entries and `fields` is empty.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedGroup {
    pub original: Option<ItemId>,
    pub parent: Option<ItemId>,
    pub schema_group: SchemaGroupId,
    pub linked_dataset: Option<DatasetId>,
    pub list: bool,
    pub groups: Vec<MergedGroup>,
    pub fields: Vec<MergedField>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MergedField {
    pub id: FieldId,
    pub value_type: ValueType,
    pub value: Option<Value>,
    /// Links of the side that supplied the value.
    pub links: Links,
    pub overridden: bool,
}

impl MergedProperty {
    pub fn field(&self, id: &FieldId) -> Option<&MergedField> {
        self.groups
            .iter()
            .filter(|g| !g.list)
            .find_map(|g| g.fields.iter().find(|f| &f.id == id))
    }
}

/// Merges `original` over `parent`.
///
/// A parent with a different schema than the original is ignored. Items are
/// matched by schema group, fields by id and value type. Returns `None` when
/// both sides are absent.
pub fn merge(
    original: Option<&Property>,
    parent: Option<&Property>,
    linked_dataset: Option<DatasetId>,
) -> Option<MergedProperty> {
    let parent = match (original, parent) {
        (Some(o), Some(p)) if o.schema != p.schema => None,
        (_, p) => p,
    };
    let base = original.or(parent)?;

    let mut groups = Vec::new();
    if let Some(o) = original {
        for item in &o.items {
            let p = parent.and_then(|p| p.item(item.schema_group()));
            groups.extend(merge_item(Some(item), p, linked_dataset));
        }
    }
    if let Some(p) = parent {
        for item in &p.items {
            let shadowed = original.is_some_and(|o| o.item(item.schema_group()).is_some());
            if !shadowed {
                groups.extend(merge_item(None, Some(item), linked_dataset));
            }
        }
    }

    Some(MergedProperty {
        original: original.map(|p| p.id),
        parent: parent.map(|p| p.id),
        schema: base.schema.clone(),
        linked_dataset,
        groups,
    })
}

fn merge_item(
    original: Option<&Item>,
    parent: Option<&Item>,
    linked_dataset: Option<DatasetId>,
) -> Option<MergedGroup> {
    let parent = match (original, parent) {
        (Some(o), Some(p)) if o.is_list() != p.is_list() => None,
        (_, p) => p,
    };
    let base = original.or(parent)?;

    if base.is_list() {
        let ol = original.and_then(Item::as_list);
        let pl = parent.and_then(Item::as_list);
        // A non-empty original list replaces the parent's entries wholesale.
        let groups = match (ol, pl) {
            (Some(ol), Some(pl)) if ol.groups.is_empty() => pl
                .groups
                .iter()
                .map(|g| list_entry(g, false, linked_dataset))
                .collect(),
            (Some(ol), _) => ol
                .groups
                .iter()
                .map(|g| list_entry(g, true, linked_dataset))
                .collect(),
            (None, Some(pl)) => pl
                .groups
                .iter()
                .map(|g| list_entry(g, false, linked_dataset))
                .collect(),
            (None, None) => Vec::new(),
        };
        return Some(MergedGroup {
            original: original.map(Item::id),
            parent: parent.map(Item::id),
            schema_group: base.schema_group().clone(),
            linked_dataset,
            list: true,
            groups,
            fields: Vec::new(),
        });
    }

    let og = original.and_then(Item::as_group);
    let pg = parent.and_then(Item::as_group);
    Some(MergedGroup {
        original: og.map(|g| g.id),
        parent: pg.map(|g| g.id),
        schema_group: base.schema_group().clone(),
        linked_dataset,
        list: false,
        groups: Vec::new(),
        fields: merge_fields(og, pg),
    })
}

fn list_entry(group: &Group, from_original: bool, linked_dataset: Option<DatasetId>) -> MergedGroup {
    let (original, parent) = if from_original {
        (Some(group), None)
    } else {
        (None, Some(group))
    };
    MergedGroup {
        original: original.map(|g| g.id),
        parent: parent.map(|g| g.id),
        schema_group: group.schema_group.clone(),
        linked_dataset,
        list: false,
        groups: Vec::new(),
        fields: merge_fields(original, parent),
    }
}

fn merge_fields(original: Option<&Group>, parent: Option<&Group>) -> Vec<MergedField> {
    let mut fields = Vec::new();

    if let Some(o) = original {
        for field in &o.fields {
            let inherited = parent
                .and_then(|p| p.field(&field.field))
                .filter(|pf| pf.value_type == field.value_type);
            fields.extend(Overridden::merge(Some(field), inherited).map(merged_field));
        }
    }
    if let Some(p) = parent {
        for field in &p.fields {
            if original.is_some_and(|o| o.field(&field.field).is_some()) {
                continue;
            }
            fields.extend(Overridden::merge(None, Some(field)).map(merged_field));
        }
    }

    fields
}

fn merged_field(winner: Overridden<&Field>) -> MergedField {
    let field = winner.value;
    MergedField {
        id: field.field.clone(),
        value_type: field.value_type,
        value: field.value.clone(),
        links: field.links.clone(),
        overridden: winner.overridden,
    }
}
