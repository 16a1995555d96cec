use dtogen_sheet::dtogen_core::{
    ClassDefinition, DEFAULT_MAX_DEPTH, DefinitionGroup, FieldDefinition, ReconstructError,
};
use dtogen_sheet::*;
use std::path::Path;

fn names(group: &DefinitionGroup) -> Vec<&str> {
    group.iter().map(ClassDefinition::name).collect()
}

fn field_names(definition: &ClassDefinition) -> Vec<&str> {
    definition
        .fields()
        .iter()
        .map(FieldDefinition::variable_name)
        .collect()
}

fn check_user(document: &DtoDocument) {
    assert_eq!(
        document.meta,
        DtoMeta {
            version: "1.0".to_owned(),
            project_name: "Shop".to_owned(),
            package_name: "com.example.shop".to_owned(),
            physical_name: "UserDto".to_owned(),
            logical_name: "User data".to_owned(),
            description: "objects of the shop users".to_owned(),
            creator: "Jane Doe".to_owned(),
            creation_date: "2020/06/13".to_owned(),
            update_date: "2020/06/15".to_owned(),
        }
    );

    let definitions = &document.definitions;
    assert_eq!(names(definitions), ["User", "Order"]);
    assert_eq!(definitions.depth(), 3);

    let user = &definitions[0];
    assert_eq!(user.description(), "a user");
    assert_eq!(field_names(user), ["id", "address", "age"]);
    assert!(user.fields()[0].is_invariant());
    assert_eq!(user.fields()[2].initial_value(), "0");

    let address = user.fields()[1].nested().expect("address owns Address");
    assert_eq!(names(address), ["Address"]);
    assert_eq!(field_names(&address[0]), ["city", "geo", "zip"]);
    assert_eq!(address[0].fields()[0].initial_value(), "\"Tokyo\"");

    let geo = address[0].fields()[1].nested().expect("geo owns Geo");
    assert_eq!(names(geo), ["Geo"]);
    assert_eq!(field_names(&geo[0]), ["lat", "lng"]);
    assert!(geo[0].fields().iter().all(|field| field.nested().is_none()));

    let order = &definitions[1];
    assert_eq!(field_names(order), ["orderId"]);
    assert_eq!(order.fields()[0].data_type(), "long");
}

#[test]
fn user() {
    let document = load(
        Path::new("./tests/user.csv"),
        &SheetLayout::default(),
        DEFAULT_MAX_DEPTH,
    )
    .expect("valid sheet");
    check_user(&document);
}

#[test]
fn compressed() {
    let document = load(
        Path::new("./tests/user.csv.gz"),
        &SheetLayout::default(),
        DEFAULT_MAX_DEPTH,
    )
    .expect("valid sheet");
    check_user(&document);
}

#[test]
fn custom_layout() {
    let layout = SheetLayout::from_path(Path::new("./tests/layout.json")).expect("valid layout");
    assert_eq!(layout.meta.label(MetaItem::PackageName), "Package");
    assert_eq!(layout.meta.label(MetaItem::Creator), "Creator");

    let document =
        load(Path::new("./tests/custom.csv"), &layout, DEFAULT_MAX_DEPTH).expect("valid sheet");
    assert_eq!(document.meta.package_name, "org.sample");
    assert_eq!(names(&document.definitions), ["Point"]);
    assert_eq!(field_names(&document.definitions[0]), ["x", "y"]);
    assert_eq!(document.definitions[0].fields()[1].description(), "ordinate");
}

#[test]
fn too_deep() {
    let err = load(
        Path::new("./tests/user.csv"),
        &SheetLayout::default(),
        2,
    )
    .expect_err("three levels of nesting");
    assert!(matches!(
        err.downcast_ref::<ReconstructError>(),
        Some(ReconstructError::HierarchyTooDeep { limit: 2, .. })
    ));
}

#[test]
fn malformed() {
    let err = load(
        Path::new("./tests/malformed.csv"),
        &SheetLayout::default(),
        DEFAULT_MAX_DEPTH,
    )
    .expect_err("non-numeric layer");
    assert_eq!(
        err.downcast_ref::<ReconstructError>(),
        Some(&ReconstructError::MalformedRecord {
            row: 1,
            value: "one".to_owned()
        })
    );
}

#[test]
fn missing_file() {
    assert!(
        load(
            Path::new("./tests/nope.csv"),
            &SheetLayout::default(),
            DEFAULT_MAX_DEPTH
        )
        .is_err()
    );
}
