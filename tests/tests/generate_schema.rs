use loam::{
    psl::{self, Expr, Parser},
    schema::{DefaultValue, FieldBuilder, Relation, RelationType},
    schemas_from_tables_with_relations, Generator, Schema, AUTO_GENERATOR_PROVIDER,
};
use pretty_assertions::assert_eq;
use tests::{LineParser, MockIntrospector, MockMigrator};

const BLOG: &str = r#"// This schema was auto-generated by Loam from existing database tables

generator client {
  provider = "Loam Auto Generator"
}

model Post {
  id Int @id @default(autoincrement())
  title String
  content String?
  userId Int
  createdAt DateTime @default(now())
  user User? @relation(fields: [userId], references: [id])
}

model User {
  id Int @id @default(autoincrement())
  name String
  email String @unique
  createdAt DateTime @default(now())
  posts Post[] @relation(fields: [userId], references: [id])
  @@unique([email], map: "idx_users_email")
}
"#;

fn marker() -> psl::Generator {
    psl::Generator::new("client").property("provider", Expr::string(AUTO_GENERATOR_PROVIDER))
}

#[test]
fn reverse_engineered_blog() {
    let schemas = schemas_from_tables_with_relations(&MockIntrospector::blog()).unwrap();

    let text = Generator::new(&MockMigrator).generate_full_file(&schemas, None, Some(&marker()));

    assert_eq!(text, BLOG);
}

#[test]
fn generated_text_parses_back_to_the_same_text() {
    let parsed = LineParser.parse(BLOG).unwrap();

    let provider = parsed.generator.as_ref().and_then(psl::Generator::provider);
    assert_eq!(provider, Some(AUTO_GENERATOR_PROVIDER));
    assert!(parsed.datasource.is_none());
    assert_eq!(parsed.schemas.len(), 2);

    let user = &parsed.schemas[1];
    assert_eq!(user.name, "User");
    assert_eq!(user.relation("posts").unwrap().ty, RelationType::OneToMany);
    assert_eq!(
        user.field("createdAt").unwrap().default,
        Some(DefaultValue::Function("now".to_string()))
    );

    let text = Generator::new(&MockMigrator).generate_full_file(
        &parsed.schemas,
        parsed.datasource.as_ref(),
        parsed.generator.as_ref(),
    );

    assert_eq!(text, BLOG);
}

#[test]
fn hand_written_model() {
    let mut schema = Schema::new("Person");
    schema
        .set_table_name("people")
        .add_field(FieldBuilder::new("id").int().primary_key().auto_increment().build())
        .add_field(
            FieldBuilder::new("nickname")
                .nullable()
                .db_type("@db.VarChar(32)")
                .map("nick")
                .build(),
        )
        .add_field(FieldBuilder::new("score").float().default(0.5).build())
        .add_field(FieldBuilder::new("tags").array().build())
        .add_relation("groups", Relation::many_to_many("Group"));

    assert_eq!(
        Generator::new(&MockMigrator).generate(&schema),
        "model Person {\n  \
           id Int @id @default(autoincrement())\n  \
           nickname String? @map(\"nick\") @db.VarChar(32)\n  \
           score Float @default(0.5)\n  \
           tags String[]\n  \
           groups Group[]\n  \
           @@map(\"people\")\n\
         }"
    );
}

#[test]
fn datasource_block_is_kept() {
    let datasource = psl::Datasource::new("db")
        .property("provider", Expr::string("mysql"))
        .property("url", Expr::call("env", vec![Expr::string("DATABASE_URL")]));

    let mut schema = Schema::new("Tag");
    schema.add_field(FieldBuilder::new("id").int().primary_key().build());

    let text = Generator::new(&MockMigrator).generate_full_file(&[schema], Some(&datasource), None);

    assert_eq!(
        text,
        "datasource db {\n  provider = \"mysql\"\n  url = env(\"DATABASE_URL\")\n}\n\n\
         model Tag {\n  id Int @id\n}\n"
    );

    let parsed = LineParser.parse(&text).unwrap();
    assert_eq!(parsed.datasource, Some(datasource));
    assert!(parsed.generator.is_none());
}

#[test]
fn parse_errors_carry_line_numbers() {
    let errors = LineParser
        .parse("model User {\n  id Int @id\n  name String @fancy\n}\nenum Role {\n")
        .unwrap_err();

    assert_eq!(
        errors.0,
        [
            "line 3: unsupported attribute `@fancy`",
            "line 5: unexpected `enum Role {`",
        ]
    );

    let err = loam::Error::from(errors);
    assert!(err.is_parse());
}
