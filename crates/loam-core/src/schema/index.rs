use serde::{Deserialize, Serialize};

/// A named, ordered index over fields of a schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Index {
    /// Index name. Empty when the name should be generated by the database.
    #[serde(default)]
    pub name: String,

    /// Indexed field names, in index order.
    pub fields: Vec<String>,

    #[serde(default)]
    pub unique: bool,
}

impl Index {
    pub fn new<I>(name: impl Into<String>, fields: I) -> Index
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Index {
            name: name.into(),
            fields: fields.into_iter().map(Into::into).collect(),
            unique: false,
        }
    }

    pub fn unique(mut self) -> Index {
        self.unique = true;
        self
    }
}
