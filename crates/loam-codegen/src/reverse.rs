use indexmap::IndexMap;
use loam_core::{
    driver::TableInfo,
    err,
    schema::{Field, Index, Relation},
    Introspector, Migrator, Result, Schema,
};
use std_util::str::{camel_case, pascal_case, pluralize, singularize, snake_case};
use tracing::debug;

/// Derives a schema from one table's metadata.
///
/// Column names become camelCase field names. A field keeps an explicit
/// column mapping only when the naming convention cannot regenerate the
/// column name from the field name. The comparison ignores case, so a column
/// such as `USER_ID` gets no mapping and its field's column name reads back
/// lowercased as `user_id`. Tables with more than one primary key column get
/// a composite key.
pub fn schema_from_table(table: &TableInfo, migrator: &dyn Migrator) -> Schema {
    let mut schema = Schema::new(singularize(&pascal_case(&table.name)));
    schema.set_table_name(&table.name);

    let mut primary_key = vec![];

    for column in &table.columns {
        let ty = migrator.map_database_type(&column.ty);
        let mut field = Field::new(camel_case(&column.name), ty);
        field.nullable = column.nullable && !column.primary_key;
        field.primary_key = column.primary_key;
        field.auto_increment = column.auto_increment;
        field.unique = column.unique;
        field.default = column
            .default
            .as_ref()
            .map(|value| migrator.parse_default_value(value, field.ty));

        if !snake_case(&field.name).eq_ignore_ascii_case(&column.name) {
            field.map = Some(column.name.clone());
        }

        if column.primary_key {
            primary_key.push(field.name.clone());
        }

        schema.add_field(field);
    }

    if primary_key.len() > 1 {
        for field in &mut schema.fields {
            field.primary_key = false;
        }
        schema.set_composite_key(primary_key);
    }

    for index in &table.indexes {
        if migrator.is_primary_key_index(&index.name) {
            continue;
        }

        let fields = index.columns.iter().map(|column| camel_case(column));
        let mut dst = Index::new(&index.name, fields);
        dst.unique = index.unique;
        schema.add_index(dst);
    }

    schema
}

/// Derives schemas for every user table, inferring relations from foreign
/// keys.
///
/// Each foreign key yields a many-to-one relation on the owning model and a
/// one-to-many relation back from the referenced model. Foreign keys pointing
/// at tables that were not introspected are ignored. The result is sorted by
/// model name.
pub fn schemas_from_tables_with_relations(introspector: &dyn Introspector) -> Result<Vec<Schema>> {
    let migrator = introspector.migrator();

    let tables = introspector
        .tables()
        .map_err(|e| e.context(err!("failed to list tables")))?;

    let mut infos = IndexMap::new();
    let mut schemas = IndexMap::new();

    for table in tables {
        if introspector.is_system_table(&table) {
            debug!(table = %table, "skipping system table");
            continue;
        }

        let info = introspector
            .table_info(&table)
            .map_err(|e| e.context(err!("failed to get info for table {table}")))?;

        schemas.insert(table.clone(), schema_from_table(&info, migrator));
        infos.insert(table, info);
    }

    for (table, info) in &infos {
        for fk in &info.foreign_keys {
            let Some(target) = schemas.get(&fk.referenced_table) else {
                debug!(
                    table = %table,
                    column = %fk.column,
                    referenced_table = %fk.referenced_table,
                    "skipping foreign key to table that was not introspected"
                );
                continue;
            };
            let target_name = target.name.clone();

            let foreign_key = camel_case(&fk.column);
            let references = camel_case(&fk.referenced_column);

            let stem = fk.column.strip_suffix("_id").unwrap_or(&fk.column);
            let mut relation_name = camel_case(stem);
            if relation_name == foreign_key {
                relation_name = camel_case(&singularize(&fk.referenced_table));
            }

            let Some(owner) = schemas.get_mut(table) else {
                continue;
            };
            let owner_name = owner.name.clone();

            let mut relation = Relation::many_to_one(&target_name, &foreign_key, &references);
            relation.on_delete = fk.on_delete.clone();
            relation.on_update = fk.on_update.clone();
            owner.add_relation(relation_name, relation);

            if let Some(target) = schemas.get_mut(&fk.referenced_table) {
                target.add_relation(
                    pluralize(&owner_name.to_lowercase()),
                    Relation::one_to_many(&owner_name, &foreign_key, &references),
                );
            }
        }
    }

    let mut schemas: Vec<_> = schemas.into_values().collect();
    schemas.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(schemas)
}
