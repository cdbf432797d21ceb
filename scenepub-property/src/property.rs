use crate::Links;
use scenepub_types::{FieldId, ItemId, PropertyId, PropertySchemaId, SchemaGroupId, Value, ValueType};
use serde::{Deserialize, Serialize};

/// A typed property document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub id: PropertyId,
    pub schema: PropertySchemaId,
    #[serde(default)]
    pub items: Vec<Item>,
}

/// A top-level entry of a property: a single group or an ordered list of groups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Item {
    Group(Group),
    GroupList(GroupList),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: ItemId,
    pub schema_group: SchemaGroupId,
    #[serde(default)]
    pub fields: Vec<Field>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupList {
    pub id: ItemId,
    pub schema_group: SchemaGroupId,
    #[serde(default)]
    pub groups: Vec<Group>,
}

/// A field of a group. `value` is the literal value; `links` optionally bind
/// the field to a dataset field instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub field: FieldId,
    #[serde(rename = "type")]
    pub value_type: ValueType,
    #[serde(default)]
    pub value: Option<Value>,
    #[serde(default, skip_serializing_if = "Links::is_empty")]
    pub links: Links,
}

impl Property {
    pub fn new(schema: impl Into<PropertySchemaId>) -> Self {
        Self {
            id: PropertyId::new(),
            schema: schema.into(),
            items: Vec::new(),
        }
    }

    /// Appends a group item built from `fields`.
    #[must_use]
    pub fn with_group(mut self, schema_group: impl Into<SchemaGroupId>, fields: Vec<Field>) -> Self {
        self.items.push(Item::Group(Group {
            id: ItemId::new(),
            schema_group: schema_group.into(),
            fields,
        }));
        self
    }

    /// Appends a group list item; each entry becomes one group of the list.
    #[must_use]
    pub fn with_group_list(
        mut self,
        schema_group: impl Into<SchemaGroupId>,
        groups: Vec<Vec<Field>>,
    ) -> Self {
        let schema_group = schema_group.into();
        self.items.push(Item::GroupList(GroupList {
            id: ItemId::new(),
            schema_group: schema_group.clone(),
            groups: groups
                .into_iter()
                .map(|fields| Group {
                    id: ItemId::new(),
                    schema_group: schema_group.clone(),
                    fields,
                })
                .collect(),
        }));
        self
    }

    /// Finds the item instantiating a schema group.
    pub fn item(&self, schema_group: &SchemaGroupId) -> Option<&Item> {
        self.items.iter().find(|i| i.schema_group() == schema_group)
    }

    /// Finds a field by id across all plain groups.
    pub fn field(&self, id: &FieldId) -> Option<&Field> {
        self.items.iter().find_map(|i| match i {
            Item::Group(g) => g.field(id),
            Item::GroupList(_) => None,
        })
    }
}

impl Item {
    pub fn id(&self) -> ItemId {
        match self {
            Self::Group(g) => g.id,
            Self::GroupList(l) => l.id,
        }
    }

    pub fn schema_group(&self) -> &SchemaGroupId {
        match self {
            Self::Group(g) => &g.schema_group,
            Self::GroupList(l) => &l.schema_group,
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Self::GroupList(_))
    }

    pub fn as_group(&self) -> Option<&Group> {
        match self {
            Self::Group(g) => Some(g),
            Self::GroupList(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&GroupList> {
        match self {
            Self::GroupList(l) => Some(l),
            Self::Group(_) => None,
        }
    }
}

impl Group {
    pub fn field(&self, id: &FieldId) -> Option<&Field> {
        self.fields.iter().find(|f| &f.field == id)
    }
}

impl Field {
    /// A field holding a literal value.
    pub fn new(id: impl Into<FieldId>, value: Value) -> Self {
        Self {
            field: id.into(),
            value_type: value.value_type(),
            value: Some(value),
            links: Links::default(),
        }
    }

    /// A field with no literal value, bound to a dataset field.
    pub fn linked(id: impl Into<FieldId>, value_type: ValueType, links: Links) -> Self {
        Self {
            field: id.into(),
            value_type,
            value: None,
            links,
        }
    }
}
