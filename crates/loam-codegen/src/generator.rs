use loam_core::{
    schema::{DefaultValue, Field, Index, Relation, ScalarType},
    Migrator, Schema,
};
use loam_psl::{self as psl, Attribute, BlockAttribute, Datasource, Expr, SchemaFile};
use std_util::str::model_name_to_table_name;

/// Generator `provider` marking a file produced by reverse engineering.
pub const AUTO_GENERATOR_PROVIDER: &str = "Loam Auto Generator";

const AUTO_GENERATED_BANNER: &str =
    "// This schema was auto-generated by Loam from existing database tables\n\n";

/// Renders schemas as schema text.
///
/// Default values are interpreted through the database-specific [`Migrator`]
/// the generator is created with.
#[derive(Debug, Clone, Copy)]
pub struct Generator<'a> {
    migrator: &'a dyn Migrator,
}

impl<'a> Generator<'a> {
    pub fn new(migrator: &'a dyn Migrator) -> Generator<'a> {
        Generator { migrator }
    }

    /// Renders a single model block.
    pub fn generate(&self, schema: &Schema) -> String {
        self.to_model(schema).to_string()
    }

    /// Builds the document model for `schema`.
    pub fn to_model(&self, schema: &Schema) -> psl::Model {
        let mut model = psl::Model::new(&schema.name);

        if !schema.table_name.is_empty()
            && schema.table_name != model_name_to_table_name(&schema.name)
        {
            model.attributes.push(BlockAttribute::new(
                "map",
                vec![Expr::string(&schema.table_name)],
            ));
        }

        for field in &schema.fields {
            model.fields.push(self.to_field(field));
        }

        let mut relations: Vec<_> = schema.relations.iter().collect();
        relations.sort_by(|(a, _), (b, _)| a.cmp(b));

        for (name, relation) in relations {
            model.fields.push(relation_field(name, relation));
        }

        if !schema.composite_key.is_empty() {
            model.attributes.push(BlockAttribute::new(
                "id",
                vec![Expr::idents(schema.composite_key.iter().cloned())],
            ));
        }

        for index in &schema.indexes {
            model.attributes.push(index_attribute(index));
        }

        model
    }

    /// Renders a whole schema file.
    ///
    /// Models are emitted sorted by name. The datasource and generator blocks
    /// are emitted only when given. A banner comment is prepended when the
    /// generator block marks the file as reverse engineered.
    pub fn generate_full_file(
        &self,
        schemas: &[Schema],
        datasource: Option<&Datasource>,
        generator: Option<&psl::Generator>,
    ) -> String {
        let mut sorted: Vec<&Schema> = schemas.iter().collect();
        sorted.sort_by(|a, b| a.name.cmp(&b.name));

        let file = SchemaFile {
            datasource: datasource.cloned(),
            generator: generator.cloned(),
            models: sorted.into_iter().map(|schema| self.to_model(schema)).collect(),
        };

        let auto_generated =
            generator.and_then(psl::Generator::provider) == Some(AUTO_GENERATOR_PROVIDER);

        if auto_generated {
            format!("{AUTO_GENERATED_BANNER}{file}")
        } else {
            file.to_string()
        }
    }

    fn to_field(&self, field: &Field) -> psl::Field {
        let mut dst = psl::Field::new(&field.name, type_token(field.ty.scalar()));
        dst.optional = field.nullable;
        dst.list = field.ty.is_array();

        if field.primary_key {
            dst.attributes.push(Attribute::new("id"));
        }

        if field.unique {
            dst.attributes.push(Attribute::new("unique"));
        }

        if let Some(default) = self.default_expr(field) {
            dst.attributes
                .push(Attribute::with_args("default", vec![default]));
        }

        if let Some(map) = &field.map {
            dst.attributes
                .push(Attribute::with_args("map", vec![Expr::string(map)]));
        }

        let db_attributes = field
            .db_type
            .iter()
            .chain(&field.db_attributes)
            .filter_map(|raw| db_attribute(raw));
        dst.attributes.extend(db_attributes);

        dst
    }

    fn default_expr(&self, field: &Field) -> Option<Expr> {
        if field.auto_increment {
            return Some(Expr::call("autoincrement", vec![]));
        }

        let value = field.default.as_ref()?;

        if let DefaultValue::Function(name) = value {
            return Some(Expr::call(name, vec![]));
        }

        let normalized = self.migrator.parse_default_value(value, field.ty);

        if let Some(name) = self.migrator.default_function_name(&normalized, field.ty) {
            return Some(Expr::call(name, vec![]));
        }

        match normalized {
            DefaultValue::String(value) => Some(Expr::Str(value)),
            DefaultValue::Int(value) => Some(Expr::number(value)),
            DefaultValue::Float(value) => Some(float_literal(value)),
            DefaultValue::Bool(value) => Some(Expr::ident(value.to_string())),
            DefaultValue::Function(name) => Some(Expr::call(name, vec![])),
            DefaultValue::Null => None,
        }
    }
}

/// Renders a float as a plain decimal literal. NaN and the infinities have
/// no literal form and become strings.
fn float_literal(value: f64) -> Expr {
    if !value.is_finite() {
        return Expr::Str(value.to_string());
    }

    let mut text = value.to_string();
    if !text.contains('.') {
        text.push_str(".0");
    }
    Expr::Number(text)
}

fn type_token(ty: ScalarType) -> &'static str {
    match ty {
        ScalarType::String => "String",
        ScalarType::Int => "Int",
        ScalarType::Int64 => "BigInt",
        ScalarType::Float => "Float",
        ScalarType::Bool => "Boolean",
        ScalarType::DateTime => "DateTime",
        ScalarType::Json => "Json",
        ScalarType::Decimal => "Decimal",
    }
}

fn relation_field(name: &str, relation: &Relation) -> psl::Field {
    let mut field = psl::Field::new(name, &relation.model);
    field.optional = relation.is_single();
    field.list = !relation.is_single();

    let mut args = vec![];

    if let Some(foreign_key) = &relation.foreign_key {
        args.push(Expr::named("fields", Expr::idents([foreign_key.as_str()])));
    }

    if let Some(references) = &relation.references {
        args.push(Expr::named("references", Expr::idents([references.as_str()])));
    }

    if !args.is_empty() {
        field.attributes.push(Attribute::with_args("relation", args));
    }

    field
}

fn index_attribute(index: &Index) -> BlockAttribute {
    let mut args = vec![Expr::idents(index.fields.iter().cloned())];

    if !index.name.is_empty() {
        args.push(Expr::named("map", Expr::string(&index.name)));
    }

    let name = if index.unique { "unique" } else { "index" };
    BlockAttribute::new(name, args)
}

/// Converts a raw annotation such as `@db.VarChar(255)` into an attribute.
///
/// Annotations not starting with `@` are not schema text and are dropped.
fn db_attribute(raw: &str) -> Option<Attribute> {
    let raw = raw.strip_prefix('@')?;

    let Some((name, rest)) = raw.split_once('(') else {
        return Some(Attribute::new(raw));
    };

    let params = rest.strip_suffix(')').unwrap_or(rest);
    Some(Attribute::with_args(name, db_type_args(params)))
}

fn db_type_args(params: &str) -> Vec<Expr> {
    if params.trim().is_empty() {
        return vec![];
    }

    params
        .split(',')
        .map(str::trim)
        .map(|param| {
            if is_numeric(param) {
                Expr::Number(param.to_string())
            } else {
                Expr::string(param.trim_matches(|ch| ch == '"' || ch == '\''))
            }
        })
        .collect()
}

fn is_numeric(param: &str) -> bool {
    param.parse::<i64>().is_ok() || param.parse::<f64>().is_ok_and(f64::is_finite)
}
