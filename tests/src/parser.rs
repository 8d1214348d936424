use loam_core::schema::{DefaultValue, Field, FieldType, Index, Relation, RelationType, ScalarType};
use loam_core::Schema;
use loam_psl::{Datasource, Expr, Generator, ParseErrors, ParsedFile, Parser, Property};

/// A line-oriented parser for the schema text the generator emits.
///
/// Every field, property and block attribute must sit on its own line. This
/// is enough to read back generated files and small hand-written fixtures.
#[derive(Debug, Default, Clone, Copy)]
pub struct LineParser;

#[derive(Debug)]
enum Block {
    Datasource(Datasource),
    Generator(Generator),
    Model(Schema),
}

impl Parser for LineParser {
    fn parse(&self, source: &str) -> Result<ParsedFile, ParseErrors> {
        let mut file = ParsedFile::default();
        let mut errors = vec![];
        let mut current: Option<(usize, Block)> = None;

        for (i, line) in source.lines().enumerate() {
            let lineno = i + 1;
            let line = line.trim();

            if line.is_empty() || line.starts_with("//") {
                continue;
            }

            let Some((_, block)) = &mut current else {
                match open_block(line) {
                    Ok(block) => current = Some((lineno, block)),
                    Err(message) => errors.push(format!("line {lineno}: {message}")),
                }
                continue;
            };

            if line == "}" {
                if let Some((_, block)) = current.take() {
                    match block {
                        Block::Datasource(datasource) => file.datasource = Some(datasource),
                        Block::Generator(generator) => file.generator = Some(generator),
                        Block::Model(schema) => file.schemas.push(schema),
                    }
                }
                continue;
            }

            let res = match block {
                Block::Datasource(datasource) => {
                    parse_property(line).map(|property| datasource.properties.push(property))
                }
                Block::Generator(generator) => {
                    parse_property(line).map(|property| generator.properties.push(property))
                }
                Block::Model(schema) => parse_model_line(schema, line),
            };

            if let Err(message) = res {
                errors.push(format!("line {lineno}: {message}"));
            }
        }

        if let Some((lineno, _)) = current {
            errors.push(format!("line {lineno}: unterminated block"));
        }

        if errors.is_empty() {
            Ok(file)
        } else {
            Err(ParseErrors(errors))
        }
    }
}

fn open_block(line: &str) -> Result<Block, String> {
    let Some(header) = line.strip_suffix('{') else {
        return Err(format!("unexpected `{line}`"));
    };

    match header.split_whitespace().collect::<Vec<_>>()[..] {
        ["datasource", name] => Ok(Block::Datasource(Datasource::new(name))),
        ["generator", name] => Ok(Block::Generator(Generator::new(name))),
        ["model", name] => Ok(Block::Model(Schema::new(name))),
        _ => Err(format!("unexpected `{line}`")),
    }
}

fn parse_property(line: &str) -> Result<Property, String> {
    let (name, value) = line
        .split_once('=')
        .ok_or_else(|| format!("expected `name = value`, found `{line}`"))?;

    Ok(Property::new(name.trim(), parse_expr(value.trim())?))
}

fn parse_model_line(schema: &mut Schema, line: &str) -> Result<(), String> {
    if let Some(attribute) = line.strip_prefix("@@") {
        return parse_block_attribute(schema, attribute);
    }

    let tokens = split_top_level(line, char::is_whitespace);
    let [name, ty, attributes @ ..] = &tokens[..] else {
        return Err(format!("expected `name Type`, found `{line}`"));
    };

    let attributes = attributes
        .iter()
        .map(|token| parse_attribute(token))
        .collect::<Result<Vec<_>, _>>()?;

    let optional = ty.ends_with('?');
    let ty = ty.trim_end_matches('?');
    let list = ty.ends_with("[]");
    let ty = ty.trim_end_matches("[]");

    let Some(scalar) = scalar_type(ty) else {
        let relation = relation_from(ty, list, &attributes);
        schema.add_relation(name, relation);
        return Ok(());
    };

    let mut field = Field::new(
        name.as_str(),
        if list {
            FieldType::Array(scalar)
        } else {
            FieldType::Scalar(scalar)
        },
    );
    field.nullable = optional;

    for (attribute, args) in attributes {
        match (attribute.as_str(), &args[..]) {
            ("id", []) => {
                field.primary_key = true;
                field.nullable = false;
            }
            ("unique", []) => field.unique = true,
            ("default", [Expr::Call(name, _)]) if name == "autoincrement" => {
                field.auto_increment = true;
            }
            ("default", [value]) => field.default = Some(default_value(value)?),
            ("map", [Expr::Str(column)]) => field.map = Some(column.clone()),
            (db, _) if db.starts_with("db.") => {
                let raw = if args.is_empty() {
                    format!("@{db}")
                } else {
                    let args: Vec<_> = args.iter().map(ToString::to_string).collect();
                    format!("@{db}({})", args.join(", "))
                };

                if field.db_type.is_none() {
                    field.db_type = Some(raw);
                } else {
                    field.db_attributes.push(raw);
                }
            }
            (other, _) => return Err(format!("unsupported attribute `@{other}`")),
        }
    }

    schema.add_field(field);
    Ok(())
}

fn parse_block_attribute(schema: &mut Schema, attribute: &str) -> Result<(), String> {
    let (name, args) = parse_attribute(&format!("@{attribute}"))?;

    match (name.as_str(), &args[..]) {
        ("map", [Expr::Str(table)]) => {
            schema.set_table_name(table);
        }
        ("id", [Expr::Array(fields)]) => {
            schema.set_composite_key(idents(fields)?);
        }
        ("index" | "unique", [Expr::Array(fields), rest @ ..]) => {
            let index_name = rest
                .iter()
                .find_map(|arg| match arg {
                    Expr::Named(key, value) if key == "map" => value.as_str(),
                    _ => None,
                })
                .unwrap_or_default();

            let mut index = Index::new(index_name, idents(fields)?);
            index.unique = name == "unique";
            schema.add_index(index);
        }
        _ => return Err(format!("unsupported block attribute `@@{attribute}`")),
    }

    Ok(())
}

fn relation_from(model: &str, list: bool, attributes: &[(String, Vec<Expr>)]) -> Relation {
    let mut foreign_key = None;
    let mut references = None;

    for (name, args) in attributes {
        if name != "relation" {
            continue;
        }

        for arg in args {
            let Expr::Named(key, value) = arg else {
                continue;
            };
            let Expr::Array(items) = &**value else {
                continue;
            };
            let first = items.first().map(ToString::to_string);

            match key.as_str() {
                "fields" => foreign_key = first,
                "references" => references = first,
                _ => {}
            }
        }
    }

    let ty = match (list, foreign_key.is_some()) {
        (true, true) => RelationType::OneToMany,
        (true, false) => RelationType::ManyToMany,
        (false, true) => RelationType::ManyToOne,
        (false, false) => RelationType::OneToOne,
    };

    let mut relation = Relation::new(ty, model);
    relation.foreign_key = foreign_key;
    relation.references = references;
    relation
}

fn scalar_type(token: &str) -> Option<ScalarType> {
    Some(match token {
        "String" => ScalarType::String,
        "Int" => ScalarType::Int,
        "BigInt" => ScalarType::Int64,
        "Float" => ScalarType::Float,
        "Boolean" => ScalarType::Bool,
        "DateTime" => ScalarType::DateTime,
        "Json" => ScalarType::Json,
        "Decimal" => ScalarType::Decimal,
        _ => return None,
    })
}

fn default_value(expr: &Expr) -> Result<DefaultValue, String> {
    Ok(match expr {
        Expr::Str(value) => DefaultValue::String(value.clone()),
        Expr::Number(value) => match value.parse::<i64>() {
            Ok(value) => DefaultValue::Int(value),
            Err(_) => value
                .parse::<f64>()
                .map(DefaultValue::Float)
                .map_err(|_| format!("invalid number `{value}`"))?,
        },
        Expr::Ident(value) if value == "true" => DefaultValue::Bool(true),
        Expr::Ident(value) if value == "false" => DefaultValue::Bool(false),
        Expr::Ident(value) if value == "null" => DefaultValue::Null,
        Expr::Call(name, _) => DefaultValue::Function(name.clone()),
        other => return Err(format!("unsupported default `{other}`")),
    })
}

fn idents(items: &[Expr]) -> Result<Vec<String>, String> {
    items
        .iter()
        .map(|item| match item {
            Expr::Ident(name) => Ok(name.clone()),
            other => Err(format!("expected a field name, found `{other}`")),
        })
        .collect()
}

/// Parses `@name` or `@name(args)`.
fn parse_attribute(token: &str) -> Result<(String, Vec<Expr>), String> {
    let Some(token) = token.strip_prefix('@') else {
        return Err(format!("expected an attribute, found `{token}`"));
    };

    let Some((name, rest)) = token.split_once('(') else {
        return Ok((token.to_string(), vec![]));
    };

    let inner = rest
        .strip_suffix(')')
        .ok_or_else(|| format!("unbalanced parentheses in `@{token}`"))?;

    Ok((name.to_string(), parse_args(inner)?))
}

fn parse_args(src: &str) -> Result<Vec<Expr>, String> {
    if src.trim().is_empty() {
        return Ok(vec![]);
    }

    split_top_level(src, |ch| ch == ',')
        .iter()
        .map(|arg| parse_expr(arg.trim()))
        .collect()
}

fn parse_expr(src: &str) -> Result<Expr, String> {
    if let Some(inner) = src.strip_prefix('"') {
        let inner = inner
            .strip_suffix('"')
            .ok_or_else(|| format!("unterminated string `{src}`"))?;
        return Ok(Expr::Str(unescape(inner)));
    }

    if let Some(inner) = src.strip_prefix('[') {
        let inner = inner
            .strip_suffix(']')
            .ok_or_else(|| format!("unbalanced brackets in `{src}`"))?;
        return Ok(Expr::Array(parse_args(inner)?));
    }

    if let Some((key, value)) = split_named(src) {
        return Ok(Expr::named(key, parse_expr(value.trim())?));
    }

    if let Some((name, rest)) = src.split_once('(') {
        let inner = rest
            .strip_suffix(')')
            .ok_or_else(|| format!("unbalanced parentheses in `{src}`"))?;
        return Ok(Expr::call(name.trim(), parse_args(inner)?));
    }

    if src.parse::<f64>().is_ok() {
        return Ok(Expr::Number(src.to_string()));
    }

    if src.is_empty() {
        return Err("expected a value".to_string());
    }

    Ok(Expr::ident(src))
}

/// Splits `key: value` when the key is a plain identifier.
fn split_named(src: &str) -> Option<(&str, &str)> {
    let (key, value) = src.split_once(':')?;
    let key = key.trim();

    let is_ident = !key.is_empty() && key.chars().all(|ch| ch.is_alphanumeric() || ch == '_');
    is_ident.then_some((key, value))
}

fn unescape(src: &str) -> String {
    let mut dst = String::with_capacity(src.len());
    let mut chars = src.chars();

    while let Some(ch) = chars.next() {
        if ch == '\\' {
            if let Some(next) = chars.next() {
                dst.push(next);
            }
        } else {
            dst.push(ch);
        }
    }

    dst
}

/// Splits `src` on `is_sep`, ignoring separators inside quotes, parentheses
/// and brackets. Empty pieces are dropped.
fn split_top_level(src: &str, is_sep: impl Fn(char) -> bool) -> Vec<String> {
    let mut pieces = vec![];
    let mut current = String::new();
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for ch in src.chars() {
        if in_string {
            current.push(ch);
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '(' | '[' => depth += 1,
            ')' | ']' => depth = depth.saturating_sub(1),
            _ if depth == 0 && is_sep(ch) => {
                if !current.trim().is_empty() {
                    pieces.push(std::mem::take(&mut current));
                } else {
                    current.clear();
                }
                continue;
            }
            _ => {}
        }

        current.push(ch);
    }

    if !current.trim().is_empty() {
        pieces.push(current);
    }

    pieces
}
