use super::*;
use crate::{
    function::{ConventionDbFunction, ReadDbFunction},
    model::annotation::QUERYABLE_FUNCTION_RESULT_TYPE,
};

fn method(name: &str) -> MethodDescriptor {
    MethodDescriptor::new_static(
        TypeDescriptor::value("Shop.Functions"),
        name,
        TypeDescriptor::value("System.Int32"),
    )
    .with_parameter("id", TypeDescriptor::value("System.Int32"))
}

#[test]
fn add_then_remove_round_trips() {
    let mut model = Model::new();
    let name = method("Rank").model_name();
    model
        .add_db_function_from_method(method("Rank"), ConfigurationSource::Explicit)
        .expect("add");
    assert!(model.find_db_function(&name).is_some());

    let mut removed = model.remove_db_function(&name).expect("was registered");

    assert!(model.find_db_function(&name).is_none());
    assert!(!removed.is_in_model());
    assert!(removed.builder().is_none());
}

#[test]
fn removing_missing_function_finds_nothing() {
    let mut model = Model::new();

    assert!(model.remove_db_function("Shop.Functions.Nope()").is_none());
    assert!(model.remove_db_function_by_method(&method("Nope")).is_none());
}

#[test]
fn duplicate_model_name_is_rejected() {
    let mut model = Model::new();
    model
        .add_db_function_from_method(method("Rank"), ConfigurationSource::Explicit)
        .expect("first add");

    let err = model
        .add_db_function_from_method(method("Rank"), ConfigurationSource::Convention)
        .expect_err("same composite name");

    assert!(matches!(
        err,
        Error::ModelError(ModelError::DuplicateFunction { ref name })
            if name == "Shop.Functions.Rank(System.Int32)"
    ));
    assert_eq!(model.db_functions().count(), 1);
}

#[test]
fn duplicate_prebuilt_function_is_rejected() {
    let mut model = Model::new();
    let first = DbFunction::from_method(&mut model, method("Rank"), ConfigurationSource::Explicit)
        .expect("valid");
    let second = first.clone();

    model.add_db_function(first).expect("first add");
    let err = model.add_db_function(second).expect_err("duplicate");

    assert_eq!(
        err,
        ModelError::DuplicateFunction {
            name: "Shop.Functions.Rank(System.Int32)".to_string()
        }
    );
}

#[test]
fn copy_of_registered_function_starts_outside_model() {
    let mut model = Model::new();
    let name = method("Rank").model_name();
    model
        .add_db_function_from_method(method("Rank"), ConfigurationSource::Explicit)
        .expect("add");

    let mut copy = model.find_db_function_mut(&name).expect("registered").clone();
    model.remove_db_function(&name).expect("registered");

    assert!(!copy.is_in_model());
    assert!(copy.builder().is_none());

    let readded = model.add_db_function(copy).expect("copy joins the model");
    assert!(readded.builder().is_some());
}

#[test]
fn duplicate_named_add_registers_no_result_type() {
    let mut model = Model::new();
    model
        .add_db_function_from_name(
            "orders",
            TypeDescriptor::queryable(TypeDescriptor::value("Shop.Order")),
            &[],
            ConfigurationSource::Explicit,
        )
        .expect("add");

    model
        .add_db_function_from_name(
            "orders",
            TypeDescriptor::queryable(TypeDescriptor::value("Shop.Invoice")),
            &[],
            ConfigurationSource::Explicit,
        )
        .expect_err("duplicate");

    assert!(model.find_entity_type("Shop.Order").is_some());
    assert!(model.find_entity_type("Shop.Invoice").is_none());
}

#[test]
fn standalone_construction_registers_result_type_before_add() {
    let mut model = Model::new();
    model
        .add_db_function_from_name(
            "orders",
            TypeDescriptor::queryable(TypeDescriptor::value("Shop.Order")),
            &[],
            ConfigurationSource::Explicit,
        )
        .expect("add");

    let duplicate = DbFunction::from_name(
        &mut model,
        "orders",
        TypeDescriptor::queryable(TypeDescriptor::value("Shop.Invoice")),
        &[],
        ConfigurationSource::Explicit,
    )
    .expect("valid");
    assert!(model.find_entity_type("Shop.Invoice").is_some());

    model.add_db_function(duplicate).expect_err("duplicate");

    assert_eq!(model.db_functions().count(), 1);
    assert_eq!(
        model.find_db_function("orders").map(|f| f.return_type().full_name.clone()),
        Some("IQueryable<Shop.Order>".to_string())
    );
}

#[test]
fn overloads_are_distinct_entries() {
    let mut model = Model::new();
    let by_name = method("Rank").with_parameter("region", TypeDescriptor::value("System.String"));

    model
        .add_db_function_from_method(method("Rank"), ConfigurationSource::Explicit)
        .expect("add");
    model
        .add_db_function_from_method(by_name, ConfigurationSource::Explicit)
        .expect("overload add");

    assert_eq!(model.db_functions().count(), 2);
}

#[test]
fn functions_iterate_in_model_name_order() {
    let mut model = Model::new();
    for name in ["Zeta", "Alpha", "Mid"] {
        model
            .add_db_function_from_method(method(name), ConfigurationSource::Explicit)
            .expect("add");
    }

    let names = model
        .db_functions()
        .map(|f| f.name().to_string())
        .collect::<Vec<_>>();

    assert_eq!(names, vec!["Alpha", "Mid", "Zeta"]);
}

#[test]
fn find_by_method_uses_composite_name() {
    let mut model = Model::new();
    model
        .add_db_function_from_method(method("Rank"), ConfigurationSource::Explicit)
        .expect("add");

    let found = model
        .find_db_function_by_method(&method("Rank"))
        .expect("registered");

    assert_eq!(found.model_name(), "Shop.Functions.Rank(System.Int32)");
    assert!(found.method().is_some());
    assert!(
        model
            .find_db_function_by_method(
                &method("Rank").with_parameter("x", TypeDescriptor::value("System.Int64"))
            )
            .is_none()
    );
}

#[test]
fn readding_removed_function_restores_builder() {
    let mut model = Model::new();
    let name = method("Rank").model_name();
    model
        .add_db_function_from_method(method("Rank"), ConfigurationSource::Explicit)
        .expect("add");

    let removed = model.remove_db_function(&name).expect("registered");
    let readded = model.add_db_function(removed).expect("re-add");

    assert!(readded.is_in_model());
    assert!(readded.builder().is_some());
}

#[test]
fn failed_construction_inserts_nothing() {
    let mut model = Model::new();
    let generic = method("Rank").with_generic_argument("T");

    let err = model
        .add_db_function_from_method(generic, ConfigurationSource::Explicit)
        .expect_err("generic");

    assert!(matches!(err, Error::DbFunctionError(_)));
    assert_eq!(model.db_functions().count(), 0);
}

#[test]
fn named_function_registers_and_rejects_duplicates() {
    let mut model = Model::new();
    model
        .add_db_function_from_name(
            "len",
            TypeDescriptor::value("System.Int32"),
            &[],
            ConfigurationSource::Explicit,
        )
        .expect("add");

    let err = model
        .add_db_function_from_name(
            "len",
            TypeDescriptor::value("System.Int64"),
            &[],
            ConfigurationSource::Explicit,
        )
        .expect_err("duplicate");

    assert!(matches!(err, Error::ModelError(ModelError::DuplicateFunction { .. })));
}

#[test]
fn default_schema_is_an_annotation() {
    let mut model = Model::with_options(ModelOptions::default().with_default_schema("sales"));
    assert_eq!(model.default_schema(), Some("sales"));
    assert!(model.annotations().contains(DEFAULT_SCHEMA));

    model.set_default_schema(None);
    assert_eq!(model.default_schema(), None);
    assert!(model.annotations().is_empty());
}

#[test]
fn queryable_name_registration_is_idempotent() {
    let mut model = Model::new();
    model
        .add_entity_type("Shop.Order")
        .annotations_mut()
        .set("Custom", Value::Bool(true));

    model.add_queryable_result_type("Shop.Order");
    model.add_queryable_result_type("Shop.Order");

    let entity = model.find_entity_type("Shop.Order").expect("entity");
    assert_eq!(model.entity_types().count(), 1);
    assert_eq!(entity.annotations().len(), 2);
    assert!(entity.annotations().contains(QUERYABLE_FUNCTION_RESULT_TYPE));
}
