use scenepub_types::{DatasetFieldId, DatasetId, DatasetSchemaId, Value};
use serde::{Deserialize, Serialize};

/// A single dataset row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub id: DatasetId,
    pub schema: DatasetSchemaId,
    /// Where the row was imported from (file URL, sheet id, ...).
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub fields: Vec<DatasetField>,
}

/// A typed cell of a dataset row, keyed by the schema field it instantiates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetField {
    pub field: DatasetFieldId,
    #[serde(default)]
    pub value: Option<Value>,
    #[serde(default)]
    pub source: String,
}

impl Dataset {
    /// Looks up the cell for a schema field.
    pub fn field(&self, id: DatasetFieldId) -> Option<&DatasetField> {
        self.fields.iter().find(|f| f.field == id)
    }

    /// Looks up the cell for a schema field and returns its value.
    pub fn value(&self, id: DatasetFieldId) -> Option<&Value> {
        self.field(id).and_then(|f| f.value.as_ref())
    }
}
