//! Relations between schemas, their validation, and join predicates.

use super::Schema;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std_util::str::{model_name_to_table_name, snake_case};

/// A named, directed edge from an owner schema to a target model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relation {
    pub ty: RelationType,

    /// Name of the target model.
    pub model: String,

    /// Field holding the foreign key. Which side holds it depends on `ty`.
    #[serde(default)]
    pub foreign_key: Option<String>,

    /// Field referenced by the foreign key.
    #[serde(default)]
    pub references: Option<String>,

    #[serde(default)]
    pub on_delete: Option<String>,

    #[serde(default)]
    pub on_update: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RelationType {
    OneToOne,
    OneToMany,
    ManyToOne,
    ManyToMany,
}

/// Derived information about how a relation is stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelationMetadata {
    /// Junction table for many-to-many relations.
    pub through_table: Option<String>,

    /// Junction table columns pointing at the owner and the target, in that
    /// order.
    pub through_fields: Vec<String>,

    pub on_delete: Option<String>,
    pub on_update: Option<String>,
}

impl Relation {
    pub fn new(ty: RelationType, model: impl Into<String>) -> Relation {
        Relation {
            ty,
            model: model.into(),
            foreign_key: None,
            references: None,
            on_delete: None,
            on_update: None,
        }
    }

    /// A relation whose foreign key lives on the owner.
    pub fn many_to_one(
        model: impl Into<String>,
        foreign_key: impl Into<String>,
        references: impl Into<String>,
    ) -> Relation {
        Relation::new(RelationType::ManyToOne, model).keys(foreign_key, references)
    }

    /// A relation whose foreign key lives on the target.
    pub fn one_to_many(
        model: impl Into<String>,
        foreign_key: impl Into<String>,
        references: impl Into<String>,
    ) -> Relation {
        Relation::new(RelationType::OneToMany, model).keys(foreign_key, references)
    }

    pub fn one_to_one(
        model: impl Into<String>,
        foreign_key: impl Into<String>,
        references: impl Into<String>,
    ) -> Relation {
        Relation::new(RelationType::OneToOne, model).keys(foreign_key, references)
    }

    pub fn many_to_many(model: impl Into<String>) -> Relation {
        Relation::new(RelationType::ManyToMany, model)
    }

    fn keys(mut self, foreign_key: impl Into<String>, references: impl Into<String>) -> Relation {
        self.foreign_key = Some(foreign_key.into());
        self.references = Some(references.into());
        self
    }

    pub fn on_delete(mut self, action: impl Into<String>) -> Relation {
        self.on_delete = Some(action.into());
        self
    }

    pub fn on_update(mut self, action: impl Into<String>) -> Relation {
        self.on_update = Some(action.into());
        self
    }

    /// True if the relation resolves to at most one target record.
    pub fn is_single(&self) -> bool {
        matches!(self.ty, RelationType::ManyToOne | RelationType::OneToOne)
    }

    /// Returns storage metadata for this relation as seen from `owner`.
    pub fn metadata(&self, owner: &Schema) -> RelationMetadata {
        let mut metadata = RelationMetadata {
            on_delete: self.on_delete.clone(),
            on_update: self.on_update.clone(),
            ..RelationMetadata::default()
        };

        if self.ty == RelationType::ManyToMany {
            metadata.through_table = Some(junction_table_name(&owner.name, &self.model));
            metadata.through_fields = vec![
                format!("{}Id", owner.name.to_lowercase()),
                format!("{}Id", self.model.to_lowercase()),
            ];
        }

        metadata
    }
}

impl fmt::Display for RelationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RelationType::OneToOne => "oneToOne",
            RelationType::OneToMany => "oneToMany",
            RelationType::ManyToOne => "manyToOne",
            RelationType::ManyToMany => "manyToMany",
        })
    }
}

/// Which schema of a relation holds the foreign key field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Owner,
    Target,
}

/// Locates the foreign key side of `relation`.
///
/// Returns `None` for many-to-many relations and for one-to-one relations
/// where neither schema has the field.
fn foreign_key_side(
    relation: &Relation,
    foreign_key: &str,
    owner: &Schema,
    target: &Schema,
) -> Option<Side> {
    match relation.ty {
        RelationType::ManyToOne => Some(Side::Owner),
        RelationType::OneToMany => Some(Side::Target),
        RelationType::OneToOne if owner.field(foreign_key).is_ok() => Some(Side::Owner),
        RelationType::OneToOne if target.field(foreign_key).is_ok() => Some(Side::Target),
        RelationType::OneToOne | RelationType::ManyToMany => None,
    }
}

/// Checks that `relation`, declared on `owner`, lines up with `target`.
///
/// `target` is `None` when the relation's model could not be resolved.
pub fn validate_relation(
    relation: &Relation,
    owner: &Schema,
    target: Option<&Schema>,
) -> Result<()> {
    let Some(target) = target else {
        return Err(Error::invalid_relation(format!(
            "related model {} not found",
            relation.model
        )));
    };

    if relation.ty == RelationType::ManyToMany {
        return Ok(());
    }

    let Some(foreign_key) = relation.foreign_key.as_deref() else {
        if let Some(references) = relation.references.as_deref() {
            check_field(target, references, "references")?;
        }
        return Ok(());
    };

    let Some(side) = foreign_key_side(relation, foreign_key, owner, target) else {
        return Err(Error::invalid_relation(format!(
            "foreign key field {foreign_key} not found in either model"
        )));
    };

    let (fk_schema, ref_schema) = match side {
        Side::Owner => (owner, target),
        Side::Target => (target, owner),
    };

    check_field(fk_schema, foreign_key, "foreign key")?;

    if let Some(references) = relation.references.as_deref() {
        check_field(ref_schema, references, "references")?;
    }

    Ok(())
}

fn check_field(schema: &Schema, name: &str, role: &str) -> Result<()> {
    match schema.field(name) {
        Ok(_) => Ok(()),
        Err(_) => Err(Error::invalid_relation(format!(
            "{role} field {name} not found in model {}",
            schema.name
        ))),
    }
}

/// Builds the SQL join predicate for a relation.
///
/// The predicate always reads `<fk table>.<fk column> = <pk table>.<pk
/// column>`, so the many-to-one and one-to-many views of the same foreign key
/// produce identical text. Columns are resolved through each field's column
/// name. The referenced field defaults to `id`.
pub fn build_join_condition(
    relation: &Relation,
    owner_table: &str,
    target_table: &str,
    owner: &Schema,
    target: &Schema,
) -> Result<String> {
    if relation.ty == RelationType::ManyToMany {
        return Err(Error::unsupported_feature(format!(
            "join condition for many-to-many relation to {}; join through table {} instead",
            relation.model,
            junction_table_name(&owner.name, &relation.model)
        )));
    }

    let Some(foreign_key) = relation.foreign_key.as_deref() else {
        return Err(Error::invalid_relation(format!(
            "relation to {} has no foreign key",
            relation.model
        )));
    };
    let references = relation.references.as_deref().unwrap_or("id");

    let side = foreign_key_side(relation, foreign_key, owner, target).ok_or_else(|| {
        Error::invalid_relation(format!(
            "foreign key field {foreign_key} not found in either model"
        ))
    })?;

    let (fk_table, fk_schema, pk_table, pk_schema) = match side {
        Side::Owner => (owner_table, owner, target_table, target),
        Side::Target => (target_table, target, owner_table, owner),
    };

    let fk_column = fk_schema.column_name_for_field(foreign_key)?;
    let pk_column = pk_schema.column_name_for_field(references)?;

    Ok(format!("{fk_table}.{fk_column} = {pk_table}.{pk_column}"))
}

/// Returns the junction table name for a many-to-many relation between two
/// models.
///
/// The result does not depend on argument order: the names are ordered
/// case-insensitively, then the first model's snake_case name is joined to the
/// second model's table name.
///
/// ```
/// # use loam_core::schema::junction_table_name;
/// assert_eq!(junction_table_name("User", "Post"), "post_users");
/// assert_eq!(junction_table_name("Post", "User"), "post_users");
/// ```
pub fn junction_table_name(model_a: &str, model_b: &str) -> String {
    let key_a = (model_a.to_lowercase(), model_a);
    let key_b = (model_b.to_lowercase(), model_b);

    let (first, second) = if key_a <= key_b {
        (model_a, model_b)
    } else {
        (model_b, model_a)
    };

    format!("{}_{}", snake_case(first), model_name_to_table_name(second))
}
