//! Property-based tests for sentinel detection.
//!
//! Random type trees check that the O(1) flag answers agree with the
//! depth-first walk and with a model computed from the tree's shape.
//! Random labels check that every factory output is recognised.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]
#![allow(
    clippy::needless_pass_by_value,
    reason = "Proptest macros generate code with these patterns"
)]

mod common;

use std::sync::Arc;

use ori_sema::error::{
    contains_error_type, contains_uninferred_parameter, create_error_class, create_error_scope,
    create_error_type, create_error_type_parameter, create_uninferred_parameter_type, is_error,
    is_uninferred_parameter,
};
use ori_sema::{
    contains, BuiltIns, ClassDescriptor, Declaration, Type, TypeParameterDescriptor,
    TypeProjection,
};
use proptest::prelude::*;

use common::{class, init_tracing};

// -- Type Tree Strategies --

#[derive(Clone, Debug)]
enum Shape {
    Clean,
    Error,
    Uninferred,
    /// Arguments, each flagged `true` when star-projected.
    Generic(Vec<(bool, Shape)>),
}

fn shape_strategy() -> impl Strategy<Value = Shape> {
    let leaf = prop_oneof![
        Just(Shape::Clean),
        Just(Shape::Error),
        Just(Shape::Uninferred),
    ];
    leaf.prop_recursive(6, 64, 3, |inner| {
        prop::collection::vec((any::<bool>(), inner), 0..4).prop_map(Shape::Generic)
    })
}

struct Fixture {
    node: Arc<ClassDescriptor>,
    parameter: Arc<TypeParameterDescriptor>,
}

impl Fixture {
    fn new() -> Self {
        let node = class("Node", &["T"]);
        let parameter = Arc::clone(&node.type_parameters()[0]);
        Fixture { node, parameter }
    }

    fn build(&self, shape: &Shape) -> Type {
        match shape {
            Shape::Clean => BuiltIns::default_instance().any_type(),
            Shape::Error => create_error_type("leaf"),
            Shape::Uninferred => create_uninferred_parameter_type(&self.parameter),
            Shape::Generic(arguments) => {
                let arguments = arguments
                    .iter()
                    .map(|(star, argument)| {
                        let ty = self.build(argument);
                        if *star {
                            TypeProjection::star(ty)
                        } else {
                            TypeProjection::invariant(ty)
                        }
                    })
                    .collect();
                Type::of_class(&self.node, arguments, false)
            }
        }
    }
}

/// Whether a leaf matching `leaf` is reachable without crossing a star.
fn model(shape: &Shape, leaf: &impl Fn(&Shape) -> bool) -> bool {
    match shape {
        Shape::Generic(arguments) => arguments
            .iter()
            .any(|(star, argument)| !star && model(argument, leaf)),
        _ => leaf(shape),
    }
}

// -- Label Strategies --

fn label_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[ -~]{0,40}").expect("valid regex")
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    })]

    #[test]
    fn error_flag_matches_walk(shape in shape_strategy()) {
        init_tracing();
        let fixture = Fixture::new();
        let ty = fixture.build(&shape);

        let expected = model(&shape, &|leaf: &Shape| matches!(leaf, Shape::Error | Shape::Uninferred));
        prop_assert_eq!(contains_error_type(&ty), expected);
        prop_assert_eq!(contains(&ty, &Type::is_error), expected);
    }

    #[test]
    fn uninferred_flag_matches_walk(shape in shape_strategy()) {
        let fixture = Fixture::new();
        let ty = fixture.build(&shape);

        let expected = model(&shape, &|leaf: &Shape| matches!(leaf, Shape::Uninferred));
        prop_assert_eq!(contains_uninferred_parameter(&ty), expected);
        prop_assert_eq!(contains(&ty, &is_uninferred_parameter), expected);
    }

    #[test]
    fn any_label_yields_error_type(label in label_strategy()) {
        let ty = create_error_type(&label);

        prop_assert!(ty.is_error());
        prop_assert!(contains_error_type(&ty));
        prop_assert!(!ty.is_marked_nullable());
        prop_assert!(!is_uninferred_parameter(&ty));
        prop_assert_eq!(ty.to_string(), format!("[ERROR : {label}]"));
        prop_assert_eq!(ty.member_scope().debug_message(), Some(label.as_str()));
    }

    #[test]
    fn any_label_yields_error_class(label in label_strategy()) {
        let class = create_error_class(&label);

        prop_assert!(class.is_error());
        prop_assert!(is_error(&Declaration::Class(Arc::clone(&class))));
        prop_assert_eq!(class.name().as_str(), format!("<ERROR CLASS: {label}>"));
    }

    #[test]
    fn any_label_yields_error_type_parameter(index in 0usize..16, label in label_strategy()) {
        let parameter = create_error_type_parameter(index, &label);

        prop_assert_eq!(parameter.index(), index);
        prop_assert!(is_error(&Declaration::TypeParameter(parameter)));
    }

    #[test]
    fn any_label_yields_error_scope(label in label_strategy()) {
        let scope = create_error_scope(&label);

        prop_assert!(scope.is_error());
        prop_assert_eq!(scope.to_string(), format!("ErrorScope{{{label}}}"));
    }
}
