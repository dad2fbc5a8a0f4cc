use std::sync::Arc;

use pretty_assertions::assert_eq;

use super::*;
use crate::descriptor::{
    ClassBuilder, ClassKind, Classifier, Declaration, Modality, ModuleDescriptor, Variance,
};
use crate::error;
use crate::name::{FqName, Name};

fn class(name: &str, parameters: &[&str]) -> Arc<ClassDescriptor> {
    let module = Arc::new(ModuleDescriptor::declared(
        Name::identifier("app"),
        vec![FqName::parse("app")],
    ));
    parameters
        .iter()
        .fold(
            ClassBuilder::new(Declaration::Module(module), Name::identifier(name), ClassKind::Class),
            |builder, parameter| builder.type_parameter(Name::identifier(parameter), Variance::Invariant),
        )
        .build()
}

fn of(class: &Arc<ClassDescriptor>, arguments: Vec<Type>) -> Type {
    Type::of_class(
        class,
        arguments.into_iter().map(TypeProjection::invariant).collect(),
        false,
    )
}

#[test]
fn simple_type_display() {
    let int = class("Int", &[]);
    let map = class("Map", &["K", "V"]);
    let ty = of(&map, vec![of(&int, vec![]), of(&int, vec![]).with_nullability(true)]);

    assert_eq!(ty.to_string(), "Map<Int, Int?>");
    assert!(!ty.is_error());
    assert!(!ty.is_marked_nullable());
}

#[test]
fn error_type_display() {
    assert_eq!(error::create_error_type("no Foo").to_string(), "[ERROR : no Foo]");

    let int = class("Int", &[]);
    let ty = error::create_error_type_with_arguments(
        "x",
        vec![
            TypeProjection::invariant(of(&int, vec![])),
            TypeProjection::new(Variance::Out, of(&int, vec![])),
            TypeProjection::star(of(&int, vec![])),
        ],
    );
    assert_eq!(ty.to_string(), "[ERROR : x]<Int, out Int, *>");
}

#[test]
fn error_type_is_never_nullable() {
    let ty = error::create_error_type("x");
    let nullable = ty.with_nullability(true);

    assert!(!nullable.is_marked_nullable());
    assert!(nullable.ptr_eq(&ty));
    assert!(!ty.flags().contains(TypeFlags::IS_NULLABLE));
}

#[test]
fn with_nullability_keeps_identity_when_unchanged() {
    let int = class("Int", &[]);
    let ty = of(&int, vec![]);

    assert!(ty.with_nullability(false).ptr_eq(&ty));
    let nullable = ty.with_nullability(true);
    assert!(nullable.is_marked_nullable());
    assert!(nullable.constructor().ptr_eq(ty.constructor()));
}

#[test]
fn error_flags_propagate_from_arguments() {
    let list = class("List", &["T"]);
    let inner = of(&list, vec![error::create_error_type("x")]);
    let outer = of(&list, vec![inner.clone()]);

    assert!(inner.flags().has_errors());
    assert!(outer.flags().has_errors());
    assert!(!outer.flags().contains(TypeFlags::IS_ERROR));
}

#[test]
fn star_projections_do_not_propagate() {
    let list = class("List", &["T"]);
    let ty = Type::of_class(
        &list,
        vec![TypeProjection::star(error::create_error_type("bound"))],
        false,
    );

    assert!(!ty.flags().has_errors());
    assert!(!contains(&ty, &Type::is_error));
}

#[test]
fn contains_walks_arguments() {
    let int = class("Int", &[]);
    let list = class("List", &["T"]);
    let ty = of(&list, vec![of(&list, vec![of(&int, vec![]).with_nullability(true)])]);

    assert!(contains(&ty, &Type::is_marked_nullable));
    assert!(!contains(&ty, &Type::is_error));
}

#[test]
fn deeply_nested_types_render_and_drop() {
    const DEPTH: usize = 50_000;

    let list = class("List", &["T"]);
    let mut ty = error::create_error_type("leaf");
    for _ in 0..DEPTH {
        ty = of(&list, vec![ty]);
    }
    assert!(error::contains_error_type(&ty));
    assert!(contains(&ty, &Type::is_error));

    let rendered = ty.to_string();
    assert_eq!(rendered.matches("List<").count(), DEPTH);
    assert!(rendered.starts_with("List<List<"));
    assert!(rendered.contains("[ERROR : leaf]"));
    assert!(format!("{ty:?}").starts_with("Type(List<"));

    // Error classes render their arguments into the scope label.
    let wrapped = of(&error::create_error_class("deep"), vec![ty.clone()]);
    assert!(wrapped.is_error());
    let label = wrapped.member_scope().debug_message().unwrap_or_default();
    assert!(label.starts_with("Error scope for class <ERROR CLASS: deep> with arguments: [List<List<"));
    assert!(label.ends_with("[ERROR : leaf]>>]"));

    drop(ty);
    drop(wrapped);
}

#[test]
fn shared_arguments_survive_dropping_the_outer_type() {
    let list = class("List", &["T"]);
    let inner = of(&list, vec![error::create_error_type("kept")]);
    let outer = of(&list, vec![inner.clone(), inner.clone()]);

    drop(outer);
    assert_eq!(inner.to_string(), "List<[ERROR : kept]>");
    assert!(inner.arguments()[0].ty().is_error());
}

#[test]
fn error_class_instantiates_to_error_type() {
    let class = error::create_error_class("Unresolved");
    let ty = Type::of_class(
        &class,
        vec![TypeProjection::invariant(error::create_error_type("arg"))],
        true,
    );

    assert!(ty.is_error());
    assert!(error::contains_error_type(&ty));
    assert!(!ty.is_marked_nullable());
    assert_eq!(ty.to_string(), "<ERROR CLASS: Unresolved><[ERROR : arg]>");
    assert_eq!(
        ty.member_scope().debug_message(),
        Some("Error scope for class <ERROR CLASS: Unresolved> with arguments: [[ERROR : arg]]")
    );

    let clean = Type::of_class(&class, Vec::new(), false);
    assert!(clean.is_error());
}

#[test]
fn error_type_surface() {
    let ty = error::create_error_type("x");

    assert!(ty.is_error());
    assert!(ty.arguments().is_empty());
    assert!(ty.annotations().is_empty());
    assert_eq!(ty.capabilities(), TypeCapabilities::NONE);
    assert_eq!(ty.member_scope().debug_message(), Some("x"));
    assert!(ty.substitution().is_empty());
}

#[test]
fn error_constructor_surface() {
    let constructor = error::create_error_type_constructor("x");

    assert!(constructor.is_error());
    assert!(constructor.parameters().is_empty());
    assert!(constructor.supertypes().is_empty());
    assert!(!constructor.is_final());
    assert!(!constructor.is_denotable());
    assert!(constructor.annotations().is_empty());
    assert_eq!(constructor.to_string(), "[ERROR : x]");

    let owner = constructor
        .declaration_descriptor()
        .and_then(|classifier| classifier.as_class().cloned());
    assert!(owner.is_some_and(|owner| Arc::ptr_eq(&owner, error::ErrorSentinels::global().error_class())));
}

#[test]
fn class_constructor_surface() {
    let list = class("List", &["T"]);
    let constructor = TypeConstructor::class(Arc::clone(&list));

    assert!(!constructor.is_error());
    assert!(constructor.is_denotable());
    assert!(constructor.is_final());
    assert_eq!(constructor.parameters().len(), 1);
    assert!(matches!(
        constructor.declaration_descriptor(),
        Some(Classifier::Class(found)) if Arc::ptr_eq(&found, &list)
    ));

    let open = ClassBuilder::new(
        Declaration::Class(Arc::clone(&list)),
        Name::identifier("Base"),
        ClassKind::Class,
    )
    .modality(Modality::Open)
    .build();
    assert!(!TypeConstructor::class(open).is_final());
}

#[test]
fn type_parameter_constructor() {
    let list = class("List", &["T"]);
    let parameter = &list.type_parameters()[0];
    let constructor = parameter.type_constructor();

    assert!(!constructor.is_final());
    assert!(constructor.is_denotable());
    assert_eq!(constructor.to_string(), "T");
    // Default bound: `Any?`.
    assert_eq!(constructor.supertypes().len(), 1);
    assert_eq!(constructor.supertypes()[0].to_string(), "Any?");
}

#[test]
fn substitution_pairs_parameters_with_arguments() {
    let int = class("Int", &[]);
    let list = class("List", &["T"]);
    let ty = of(&list, vec![of(&int, vec![])]);
    let substitution = ty.substitution();
    let parameter = &list.type_parameters()[0];

    let found = substitution.get(&parameter.type_constructor());
    assert_eq!(found.map(ToString::to_string), Some("Int".to_owned()));
    assert_eq!(substitution.to_string(), "{T -> Int}");
}

#[test]
fn substitutor_replaces_parameters() {
    let int = class("Int", &[]);
    let list = class("List", &["T"]);
    let parameter = Arc::clone(&list.type_parameters()[0]);
    let substitutor = TypeSubstitutor::new(TypeSubstitution::new(
        vec![Arc::clone(&parameter)],
        vec![TypeProjection::invariant(of(&int, vec![]))],
    ));

    let list_of_t = Type::of_class(
        &list,
        vec![TypeProjection::invariant(parameter.default_type())],
        false,
    );
    assert_eq!(substitutor.substitute(&list_of_t).to_string(), "List<Int>");

    let nullable_t = parameter.default_type().with_nullability(true);
    assert_eq!(substitutor.substitute(&nullable_t).to_string(), "Int?");
}

#[test]
fn substitutor_passes_error_types_through() {
    let int = class("Int", &[]);
    let list = class("List", &["T"]);
    let substitutor = TypeSubstitutor::new(TypeSubstitution::new(
        list.type_parameters().to_vec(),
        vec![TypeProjection::invariant(of(&int, vec![]))],
    ));
    let ty = error::create_error_type("x");

    assert!(substitutor.substitute(&ty).ptr_eq(&ty));
    assert!(TypeSubstitutor::empty().is_empty());
}

#[test]
fn uninferred_constructor_delegates() {
    let list = class("List", &["T"]);
    let parameter = &list.type_parameters()[0];
    let ty = error::create_uninferred_parameter_type(parameter);
    let constructor = ty.constructor();

    assert!(constructor.is_error());
    assert!(!constructor.is_denotable());
    assert!(constructor.parameters().is_empty());
    assert_eq!(constructor.to_string(), "CANT_INFER_TYPE_PARAMETER: T");
    assert!(ty.flags().contains(TypeFlags::IS_UNINFERRED | TypeFlags::IS_ERROR));

    let wrapped = constructor
        .as_uninferred_parameter()
        .map(|constructor| Arc::clone(constructor.type_parameter()));
    assert!(wrapped.is_some_and(|wrapped| Arc::ptr_eq(&wrapped, parameter)));
}
