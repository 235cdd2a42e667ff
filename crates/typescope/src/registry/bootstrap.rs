//! Builtin types
//!
//! Registers the root class, primitives, boxed types, `String`, the
//! annotation root interface and the collection hierarchy. Registration
//! order must match the ids in [`typescope_types::builtin`].

use typescope_types::{builtin, Primitive, TypeId, TypeKind, TypeRef};

use super::descriptor::TypeDescriptor;
use super::TypeRegistry;

const LANG: &str = "lang";
const LANG_ANNOTATION: &str = "lang.annotation";
const UTIL: &str = "util";

pub(super) fn register_builtins(registry: &mut TypeRegistry) {
    let object = builtin_type(registry, LANG, "Object", TypeKind::Class, None, &[]);
    debug_assert_eq!(object, builtin::OBJECT);

    for primitive in Primitive::ALL {
        let id = next_id(registry);
        let mut desc = TypeDescriptor::new(id, "", primitive.name(), TypeKind::Primitive);
        desc.modifiers.is_final = true;
        desc.open = false;
        registry.insert(desc);
        debug_assert_eq!(id, primitive.type_id());
    }

    let number = next_id(registry);
    let mut desc = TypeDescriptor::new(number, LANG, "Number", TypeKind::Class);
    desc.modifiers.is_abstract = true;
    desc.open = false;
    desc.superclass = Some(TypeRef::class(builtin::OBJECT));
    registry.insert(desc);
    debug_assert_eq!(number, builtin::NUMBER);

    let wrappers = [
        ("Boolean", builtin::OBJECT, builtin::BOOLEAN_WRAPPER),
        ("Byte", builtin::NUMBER, builtin::BYTE_WRAPPER),
        ("Character", builtin::OBJECT, builtin::CHARACTER),
        ("Short", builtin::NUMBER, builtin::SHORT_WRAPPER),
        ("Integer", builtin::NUMBER, builtin::INTEGER),
        ("Long", builtin::NUMBER, builtin::LONG_WRAPPER),
        ("Float", builtin::NUMBER, builtin::FLOAT_WRAPPER),
        ("Double", builtin::NUMBER, builtin::DOUBLE_WRAPPER),
        ("Void", builtin::OBJECT, builtin::VOID_WRAPPER),
    ];
    for (name, superclass, expected) in wrappers {
        let id = builtin_type(
            registry,
            LANG,
            name,
            TypeKind::Class,
            Some(TypeRef::class(superclass)),
            &[],
        );
        registry.types[id.index()].modifiers.is_final = true;
        debug_assert_eq!(id, expected);
    }

    let string = builtin_type(
        registry,
        LANG,
        "String",
        TypeKind::Class,
        Some(TypeRef::class(builtin::OBJECT)),
        &[],
    );
    registry.types[string.index()].modifiers.is_final = true;
    debug_assert_eq!(string, builtin::STRING);

    let annotation = builtin_type(
        registry,
        LANG_ANNOTATION,
        "Annotation",
        TypeKind::Interface,
        None,
        &[],
    );
    debug_assert_eq!(annotation, builtin::ANNOTATION);

    let iterable = generic_type(registry, "Iterable", "T", TypeKind::Interface, None, None);
    debug_assert_eq!(iterable, builtin::ITERABLE);
    let collection = generic_type(
        registry,
        "Collection",
        "E",
        TypeKind::Interface,
        None,
        Some(builtin::ITERABLE),
    );
    debug_assert_eq!(collection, builtin::COLLECTION);
    let list = generic_type(
        registry,
        "List",
        "E",
        TypeKind::Interface,
        None,
        Some(builtin::COLLECTION),
    );
    debug_assert_eq!(list, builtin::LIST);
    let set = generic_type(
        registry,
        "Set",
        "E",
        TypeKind::Interface,
        None,
        Some(builtin::COLLECTION),
    );
    debug_assert_eq!(set, builtin::SET);
    let array_list = generic_type(
        registry,
        "ArrayList",
        "E",
        TypeKind::Class,
        Some(builtin::OBJECT),
        Some(builtin::LIST),
    );
    debug_assert_eq!(array_list, builtin::ARRAY_LIST);
    let hash_set = generic_type(
        registry,
        "HashSet",
        "E",
        TypeKind::Class,
        Some(builtin::OBJECT),
        Some(builtin::SET),
    );
    debug_assert_eq!(hash_set, builtin::HASH_SET);
}

fn next_id(registry: &TypeRegistry) -> TypeId {
    TypeId::new(registry.len() as u32)
}

fn builtin_type(
    registry: &mut TypeRegistry,
    package: &str,
    name: &str,
    kind: TypeKind,
    superclass: Option<TypeRef>,
    interfaces: &[TypeRef],
) -> TypeId {
    let mut desc = TypeDescriptor::new(next_id(registry), package, name, kind);
    desc.open = false;
    desc.superclass = superclass;
    desc.interfaces = interfaces.to_vec();
    registry.insert(desc)
}

/// One-parameter collection type whose supertypes are applied to that parameter
fn generic_type(
    registry: &mut TypeRegistry,
    name: &str,
    param: &str,
    kind: TypeKind,
    superclass: Option<TypeId>,
    interface: Option<TypeId>,
) -> TypeId {
    let var = TypeRef::variable(param);
    let interfaces: Vec<TypeRef> = interface
        .map(|iface| TypeRef::parameterized(iface, [var.clone()]))
        .into_iter()
        .collect();
    let id = builtin_type(
        registry,
        UTIL,
        name,
        kind,
        superclass.map(TypeRef::class),
        &interfaces,
    );
    registry.types[id.index()].type_params = vec![param.to_string()];
    id
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_wrappers_extend_number() {
        let registry = TypeRegistry::new();
        for id in [builtin::INTEGER, builtin::LONG_WRAPPER, builtin::DOUBLE_WRAPPER] {
            assert_eq!(registry.get(id).unwrap().superclass(), Some(builtin::NUMBER));
        }
        assert_eq!(
            registry.get(builtin::BOOLEAN_WRAPPER).unwrap().superclass(),
            Some(builtin::OBJECT)
        );
    }

    #[test]
    fn test_collection_supertypes_carry_type_argument() {
        let registry = TypeRegistry::new();
        let array_list = registry.get(builtin::ARRAY_LIST).unwrap();
        assert_eq!(array_list.type_parameters(), &["E".to_string()]);
        let list = &array_list.generic_interfaces()[0];
        assert_eq!(list.erasure(), builtin::LIST);
        assert_eq!(list.type_arguments(), &[TypeRef::variable("E")]);
    }

    #[test]
    fn test_builtins_are_sealed() {
        let registry = TypeRegistry::new();
        assert!(registry.iter().all(|desc| !desc.is_open()));
        assert_eq!(registry.get(builtin::INT).unwrap().superclass(), None);
        assert!(registry.get(builtin::ANNOTATION).unwrap().is_interface());
    }
}
