use crate::{schemas_from_tables_with_relations, Introspector, Result, SchemaPersistence};
use loam_core::err;
use std::collections::HashSet;
use tracing::{debug, info};

/// Outcome of [`pull`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PullReport {
    /// Models written to schema files.
    pub generated: Vec<String>,

    /// Models skipped because the schema files already define them.
    pub skipped: Vec<String>,
}

/// Reverse engineers the database behind `introspector` into schema files.
///
/// Existing schema files are loaded first. A table whose model name or table
/// name is already defined is left alone, so hand edits are never
/// overwritten.
pub fn pull(
    introspector: &dyn Introspector,
    persistence: &mut SchemaPersistence,
) -> Result<PullReport> {
    let span = persistence.config().span.clone();

    let existing = persistence
        .load_schemas()
        .map_err(|e| e.context(err!("failed to load existing schemas")))?;

    let known: HashSet<String> = existing
        .iter()
        .flat_map(|schema| [schema.name.clone(), schema.table_name.clone()])
        .collect();

    let mut report = PullReport::default();

    for schema in schemas_from_tables_with_relations(introspector)? {
        if known.contains(&schema.name) || known.contains(&schema.table_name) {
            debug!(
                parent: &span,
                model = %schema.name,
                table = %schema.table_name,
                "schema already exists"
            );
            report.skipped.push(schema.name);
            continue;
        }

        persistence
            .save_schema(&schema)
            .map_err(|e| e.context(err!("failed to save schema for model {}", schema.name)))?;

        info!(
            parent: &span,
            model = %schema.name,
            table = %schema.table_name,
            relations = schema.relations.len(),
            "generated schema"
        );
        report.generated.push(schema.name);
    }

    Ok(report)
}
