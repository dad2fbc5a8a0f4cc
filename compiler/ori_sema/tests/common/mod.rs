//! Shared fixtures for `ori_sema` integration tests.

#![allow(dead_code, reason = "each test binary uses a different subset")]

use std::sync::{Arc, Once};

use ori_sema::{
    BuiltIns, ClassBuilder, ClassDescriptor, ClassKind, Declaration, FqName, ModuleDescriptor,
    Name, Type, TypeProjection, Variance,
};

static TRACING_INIT: Once = Once::new();

/// Install a subscriber when `RUST_LOG` is set.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_test_writer().with_target(true))
                .with(filter)
                .init();
        }
    });
}

/// A real module, `app`, with a single package.
pub fn app_module() -> Arc<ModuleDescriptor> {
    Arc::new(ModuleDescriptor::declared(
        Name::identifier("app"),
        vec![FqName::parse("app")],
    ))
}

/// A final class in `app` with invariant type parameters.
pub fn class(name: &str, parameters: &[&str]) -> Arc<ClassDescriptor> {
    let mut builder = ClassBuilder::new(
        Declaration::Module(app_module()),
        Name::identifier(name),
        ClassKind::Class,
    );
    for parameter in parameters {
        builder = builder.type_parameter(Name::identifier(parameter), Variance::Invariant);
    }
    builder.build()
}

/// `class<arguments>` with invariant projections.
pub fn apply(class: &Arc<ClassDescriptor>, arguments: Vec<Type>) -> Type {
    Type::of_class(
        class,
        arguments.into_iter().map(TypeProjection::invariant).collect(),
        false,
    )
}

pub fn any() -> Type {
    BuiltIns::default_instance().any_type()
}
