use pretty_assertions::assert_eq;

use super::*;
use crate::error;
use crate::name::FqName;
use crate::types::TypeSubstitutor;

fn app() -> Arc<ModuleDescriptor> {
    Arc::new(ModuleDescriptor::declared(
        Name::identifier("app"),
        vec![
            FqName::parse("app"),
            FqName::parse("app.io"),
            FqName::parse("app.net"),
            FqName::parse("app.net.http"),
        ],
    ))
}

const ANSWER: ModuleCapability<u32> = ModuleCapability::new("answer");

/// Records which visit method ran.
struct KindVisitor;

impl DeclarationVisitor<&'static str> for KindVisitor {
    type Output = String;

    fn visit_module(&mut self, module: &Arc<ModuleDescriptor>, data: &'static str) -> String {
        format!("{data}module {}", module.name())
    }

    fn visit_class(&mut self, class: &Arc<ClassDescriptor>, data: &'static str) -> String {
        format!("{data}class {}", class.name())
    }

    fn visit_constructor(
        &mut self,
        _constructor: &Arc<ConstructorDescriptor>,
        data: &'static str,
    ) -> String {
        format!("{data}constructor")
    }

    fn visit_function(&mut self, function: &Arc<FunctionDescriptor>, data: &'static str) -> String {
        format!("{data}function {}", function.name())
    }

    fn visit_property(&mut self, property: &Arc<PropertyDescriptor>, data: &'static str) -> String {
        format!("{data}property {}", property.name())
    }

    fn visit_type_parameter(
        &mut self,
        parameter: &Arc<TypeParameterDescriptor>,
        data: &'static str,
    ) -> String {
        format!("{data}type parameter {}", parameter.name())
    }
}

#[test]
fn visitor_dispatch() {
    let module = app();
    let class = ClassBuilder::new(
        Declaration::Module(Arc::clone(&module)),
        Name::identifier("Box"),
        ClassKind::Class,
    )
    .type_parameter(Name::identifier("T"), Variance::Out)
    .build();

    let mut visitor = KindVisitor;
    assert_eq!(
        Declaration::Module(module).accept(&mut visitor, "> "),
        Some("> module app".to_owned())
    );
    assert_eq!(
        Declaration::TypeParameter(Arc::clone(&class.type_parameters()[0]))
            .accept(&mut visitor, ""),
        Some("type parameter T".to_owned())
    );
    assert_eq!(
        Declaration::Class(class).accept(&mut visitor, ""),
        Some("class Box".to_owned())
    );
}

#[test]
fn error_module_is_not_visited() {
    let mut visitor = KindVisitor;
    let module = Declaration::Module(Arc::clone(error::error_module()));

    assert_eq!(module.accept(&mut visitor, ""), None);
}

#[test]
fn error_class_is_visited() {
    let mut visitor = KindVisitor;
    let class = Declaration::Class(error::create_error_class("v"));

    assert_eq!(
        class.accept(&mut visitor, ""),
        Some("class <ERROR CLASS: v>".to_owned())
    );
}

#[test]
fn containment_chain() {
    let module = app();
    let class = ClassBuilder::new(
        Declaration::Module(Arc::clone(&module)),
        Name::identifier("Box"),
        ClassKind::Class,
    )
    .type_parameter(Name::identifier("T"), Variance::Invariant)
    .build();
    let parameter = Declaration::TypeParameter(Arc::clone(&class.type_parameters()[0]));

    let container = parameter.containing_declaration();
    assert!(container.is_some_and(|container| container.ptr_eq(&Declaration::Class(Arc::clone(&class)))));
    assert!(parameter
        .module()
        .is_some_and(|found| Arc::ptr_eq(&found, &module)));
    assert!(parameter.original().ptr_eq(&parameter));
    assert!(Declaration::Module(module).containing_declaration().is_none());
}

#[test]
fn type_parameter_outlived_by_owner_has_no_container() {
    let class = ClassBuilder::new(
        Declaration::Module(app()),
        Name::identifier("Box"),
        ClassKind::Class,
    )
    .type_parameter(Name::identifier("T"), Variance::Invariant)
    .build();
    let parameter = Arc::clone(&class.type_parameters()[0]);
    drop(class);

    assert!(parameter.containing_declaration().is_none());
}

#[test]
fn declaration_names_and_debug() {
    let class = error::create_error_class("d");
    let constructor = class.primary_constructor().cloned();

    assert!(constructor.is_some_and(|constructor| {
        Declaration::Constructor(constructor).name().as_str() == "<init>"
    }));
    assert_eq!(
        format!("{:?}", Declaration::Class(Arc::clone(&class))),
        "Class(<ERROR CLASS: d>)"
    );
    assert_eq!(Declaration::from(class).to_string(), "<ERROR CLASS: d>");
}

#[test]
fn error_module_surface() {
    let module = error::error_module();

    assert_eq!(module.name().as_str(), "<ERROR MODULE>");
    assert!(module.default_imports().is_empty());
    assert!(module.annotations().is_empty());
    assert!(module.sub_packages_of(&FqName::root(), |_| true).is_empty());
    assert!(!module.is_friend(module));
    assert!(Arc::ptr_eq(&module.substitute(&TypeSubstitutor::empty()), module));
    assert!(std::ptr::eq(module.builtins(), BuiltIns::default_instance()));
    assert_eq!(module.capability(&ANSWER), None);
}

#[test]
#[should_panic(expected = "error module was queried (platform_class_map)")]
fn error_module_platform_class_map() {
    let _ = error::error_module().platform_class_map();
}

#[test]
fn declared_module_surface() {
    let module = ModuleDescriptor::declared(Name::identifier("app"), vec![FqName::parse("app")])
        .with_capability(&ANSWER, 42)
        .with_default_imports(vec![ImportPath::new(FqName::parse("ori.io"), true)]);

    assert_eq!(module.capability(&ANSWER).as_deref(), Some(&42));
    assert_eq!(module.default_imports()[0].to_string(), "ori.io.*");
    assert_eq!(module.platform_class_map(), PlatformClassMap::EMPTY);
    assert!(module.is_friend(&module));

    let view = module.package(&FqName::parse("app"));
    assert_eq!(view.module_name().as_str(), "app");
    assert_eq!(view.fq_name(), &FqName::parse("app"));
}

#[test]
fn sub_packages_are_direct_children() {
    let module = app();
    let children = module.sub_packages_of(&FqName::parse("app"), |_| true);

    assert_eq!(children, vec![FqName::parse("app.io"), FqName::parse("app.net")]);

    let filtered = module.sub_packages_of(&FqName::parse("app"), |name| name.as_str() == "net");
    assert_eq!(filtered, vec![FqName::parse("app.net")]);
}

#[test]
fn declared_class_substitutes_to_itself() {
    let class = ClassBuilder::new(
        Declaration::Module(app()),
        Name::identifier("Box"),
        ClassKind::Interface,
    )
    .modality(Modality::Abstract)
    .build();

    assert!(Arc::ptr_eq(&class.substitute(&TypeSubstitutor::empty()), &class));
    assert!(!class.is_error());
    assert_eq!(class.kind(), ClassKind::Interface);
    assert!(class.constructors().is_empty());
}

#[test]
fn variance_labels() {
    assert_eq!(Variance::Invariant.label(), "");
    assert_eq!(Variance::In.label(), "in");
    assert_eq!(Variance::Out.label(), "out");
}
