mod builder;
pub use builder::FieldBuilder;

mod field;
pub use field::{DefaultValue, Field, FieldType, ScalarType};

mod index;
pub use index::Index;

mod model;
pub use model::Schema;

pub mod relation;
pub use relation::{
    build_join_condition, junction_table_name, validate_relation, Relation, RelationMetadata,
    RelationType,
};
