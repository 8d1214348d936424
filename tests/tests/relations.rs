use loam::schema::{
    build_join_condition, junction_table_name, validate_relation, FieldBuilder, Relation,
};
use loam::Schema;
use pretty_assertions::assert_eq;

fn author() -> Schema {
    let mut schema = Schema::new("Author");
    schema
        .add_field(FieldBuilder::new("id").int().primary_key().map("author_pk").build())
        .add_field(FieldBuilder::new("name").build())
        .add_relation("profile", Relation::one_to_one("Profile", "authorId", "id"))
        .add_relation("books", Relation::many_to_many("Book"));
    schema
}

fn profile() -> Schema {
    let mut schema = Schema::new("Profile");
    schema
        .add_field(FieldBuilder::new("id").int().primary_key().build())
        .add_field(FieldBuilder::new("authorId").int().unique().map("AUTHOR").build());
    schema
}

fn book() -> Schema {
    let mut schema = Schema::new("Book");
    schema.add_field(FieldBuilder::new("id").int().primary_key().build());
    schema
}

#[test]
fn junction_table_is_shared_by_both_sides() {
    let author = author();
    let book = book();
    let mut inverse = book.clone();
    inverse.add_relation("authors", Relation::many_to_many("Author"));

    let forward = author.relation("books").unwrap().metadata(&author);
    let backward = inverse.relation("authors").unwrap().metadata(&inverse);

    assert_eq!(forward.through_table.as_deref(), Some("author_books"));
    assert_eq!(forward.through_table, backward.through_table);
    assert_eq!(forward.through_fields, ["authorId", "bookId"]);
    assert_eq!(backward.through_fields, ["bookId", "authorId"]);
    assert_eq!(junction_table_name("Book", "Author"), "author_books");
}

#[test]
fn one_to_one_with_key_on_target() {
    let author = author();
    let profile = profile();
    let relation = author.relation("profile").unwrap();

    validate_relation(relation, &author, Some(&profile)).unwrap();

    let join = build_join_condition(relation, "authors", "profiles", &author, &profile).unwrap();
    assert_eq!(join, "profiles.AUTHOR = authors.author_pk");
}

#[test]
fn many_to_many_has_no_join_condition() {
    let author = author();
    let book = book();
    let relation = author.relation("books").unwrap();

    validate_relation(relation, &author, Some(&book)).unwrap();

    let err = build_join_condition(relation, "authors", "books", &author, &book).unwrap_err();
    assert!(err.is_unsupported_feature());
    assert!(err.to_string().contains("author_books"));
}

#[test]
fn invalid_relations() {
    let author = author();
    let profile = profile();

    let err = validate_relation(author.relation("books").unwrap(), &author, None).unwrap_err();
    assert!(err.is_invalid_relation());
    assert_eq!(err.to_string(), "invalid relation: related model Book not found");

    let dangling = Relation::one_to_one("Profile", "ownerId", "id");
    let err = validate_relation(&dangling, &author, Some(&profile)).unwrap_err();
    assert_eq!(
        err.to_string(),
        "invalid relation: foreign key field ownerId not found in either model"
    );

    let bad_reference = Relation::one_to_many("Profile", "authorId", "uuid");
    let err = validate_relation(&bad_reference, &author, Some(&profile)).unwrap_err();
    assert_eq!(
        err.to_string(),
        "invalid relation: references field uuid not found in model Author"
    );
}
