use loam_core::{
    schema::{DefaultValue, FieldType, ScalarType},
    Migrator,
};

/// A migrator with MySQL-flavoured defaults and a small type table.
#[derive(Debug, Default, Clone, Copy)]
pub struct MockMigrator;

impl Migrator for MockMigrator {
    fn map_database_type(&self, db_type: &str) -> FieldType {
        let lower = db_type.to_lowercase();
        let base = lower.split('(').next().unwrap_or_default().trim();

        let scalar = match base {
            "integer" | "int" | "serial" => ScalarType::Int,
            "bigint" => ScalarType::Int64,
            "real" | "float" | "double" => ScalarType::Float,
            "boolean" | "bool" => ScalarType::Bool,
            "timestamp" | "datetime" => ScalarType::DateTime,
            "json" | "jsonb" => ScalarType::Json,
            "decimal" | "numeric" => ScalarType::Decimal,
            _ => ScalarType::String,
        };

        FieldType::Scalar(scalar)
    }

    fn parse_default_value(&self, value: &DefaultValue, _ty: FieldType) -> DefaultValue {
        match value {
            DefaultValue::String(s)
                if s.eq_ignore_ascii_case("CURRENT_TIMESTAMP") || s.eq_ignore_ascii_case("NOW()") =>
            {
                DefaultValue::String("CURRENT_TIMESTAMP".to_string())
            }
            other => other.clone(),
        }
    }

    fn default_function_name(&self, value: &DefaultValue, _ty: FieldType) -> Option<String> {
        match value {
            DefaultValue::String(s) if s == "CURRENT_TIMESTAMP" => Some("now".to_string()),
            _ => None,
        }
    }

    fn is_primary_key_index(&self, index_name: &str) -> bool {
        index_name.to_lowercase().contains("primary")
    }
}
