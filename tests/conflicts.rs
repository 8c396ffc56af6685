use coffee_storefront::db::{ConflictField, unique_conflict};
use sea_orm::{DbErr, RuntimeErr};

#[test]
fn primary_key_constraint_means_id_conflict() {
    let field = ConflictField::from_constraint("products_pkey");
    assert_eq!(field, ConflictField::Id);
    assert!(field.message().contains("id already exists"));
}

#[test]
fn name_constraint_means_name_conflict() {
    let field = ConflictField::from_constraint("products_name_key");
    assert_eq!(field, ConflictField::Name);
    assert!(field.message().contains("name already exists"));
}

#[test]
fn other_constraints_get_the_generic_message() {
    let field = ConflictField::from_constraint("products_slug_key");
    assert_eq!(field, ConflictField::Other);
    assert!(!field.message().contains("id already exists"));
    assert!(!field.message().contains("name already exists"));
}

#[test]
fn raw_error_message_is_classified_when_no_constraint_is_reported() {
    let message = r#"duplicate key value violates unique constraint "products_name_key""#;
    assert_eq!(ConflictField::from_constraint(message), ConflictField::Name);
}

#[test]
fn non_unique_errors_are_not_conflicts() {
    assert_eq!(unique_conflict(&DbErr::RecordNotFound("x".into())), None);
    assert_eq!(
        unique_conflict(&DbErr::Query(RuntimeErr::Internal("timeout".into()))),
        None
    );
}
