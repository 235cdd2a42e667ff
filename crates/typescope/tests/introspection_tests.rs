//! Integration tests for the introspection engine
//!
//! Scenario tests that go through the public API only: member discovery,
//! guarded access, dotted paths, annotations, coercion and nested types.

use rustc_hash::FxHashSet;
use typescope::{
    ancestors_of, annotations_of, find_annotation, find_member, find_nested_types_extending, get,
    is_annotated_with_any, is_annotated_with_set, member_name_set_of, members_of, resolve_path,
    set, value_at_path, wrapper_type_of, FieldDefinition, FieldDescriptor, TypeDescriptor,
    TypeRegistry,
};
use typescope_types::{builtin, Annotation, PathError, Primitive, ReflectError, TypeId, Value};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

// ============================================================================
// Members (Parent / Child)
// ============================================================================

mod members {
    use super::*;

    fn parent_child() -> (TypeRegistry, TypeId, TypeId) {
        let mut registry = TypeRegistry::new();
        let parent = registry
            .define_class("scenario", "Parent")
            .field(FieldDefinition::new("x", builtin::INT))
            .build()
            .unwrap();
        let child = registry
            .define_class("scenario", "Child")
            .extends(parent)
            .field(FieldDefinition::new("y", builtin::STRING))
            .build()
            .unwrap();
        (registry, parent, child)
    }

    #[test]
    fn test_members_declared_first_then_inherited() {
        let (registry, _, child) = parent_child();
        let names: Vec<&str> = members_of(&registry, child)
            .into_iter()
            .map(FieldDescriptor::name)
            .collect();
        assert_eq!(names, vec!["y", "x"]);

        let expected: FxHashSet<&str> = ["y", "x"].into_iter().collect();
        assert_eq!(member_name_set_of(&registry, child), expected);
    }

    #[test]
    fn test_ancestors_start_with_type_and_end_at_root() {
        let (registry, parent, child) = parent_child();
        let ancestors = ancestors_of(&registry, child);
        assert_eq!(ancestors, vec![child, parent, builtin::OBJECT]);

        for desc in registry.iter() {
            let ancestors = ancestors_of(&registry, desc.id());
            assert_eq!(ancestors.first(), Some(&desc.id()));
            let last = registry.get(*ancestors.last().unwrap()).unwrap();
            assert_eq!(last.superclass(), None);
        }
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let (registry, parent, child) = parent_child();
        let upper = find_member(&registry, "X", child).unwrap();
        let lower = find_member(&registry, "x", child).unwrap();
        assert_eq!(upper.id(), lower.id());
        assert_eq!(upper.owner(), parent);
    }

    #[test]
    fn test_absent_inputs_are_empty() {
        let (registry, _, child) = parent_child();
        assert!(members_of(&registry, None).is_empty());
        assert!(ancestors_of(&registry, None).is_empty());
        assert!(find_member(&registry, None, child).is_none());
        assert!(find_member(&registry, "y", None).is_none());
        assert!(get(&registry, None, find_member(&registry, "y", child)).is_none());
        assert!(!set(&registry, None, "y", "value"));
        assert!(value_at_path(&registry, None, "y").is_none());
        assert!(find_nested_types_extending(&registry, [child], None).is_empty());
    }

    #[test]
    fn test_set_then_get_round_trips() {
        init_logging();
        let (registry, _, child) = parent_child();
        let obj = registry.instantiate(child).unwrap();

        assert!(set(&registry, &obj, "X", 41i32));
        assert!(set(&registry, &obj, "y", "forty-one"));

        let x = find_member(&registry, "x", obj.class());
        let y = find_member(&registry, "y", obj.class());
        assert_eq!(get(&registry, &obj, x), Some(Value::Int(41)));
        assert_eq!(get(&registry, &obj, y), Some(Value::from("forty-one")));
    }
}

// ============================================================================
// Dotted Paths
// ============================================================================

mod paths {
    use super::*;

    fn family() -> (TypeRegistry, typescope_types::ObjectRef) {
        let mut registry = TypeRegistry::new();
        let father = registry
            .define_class("scenario", "Father")
            .field(FieldDefinition::new("child", builtin::STRING))
            .build()
            .unwrap();
        let family = registry
            .define_class("scenario", "Family")
            .field(FieldDefinition::new("father", father))
            .build()
            .unwrap();

        let dad = registry.instantiate(father).unwrap();
        assert!(set(&registry, &dad, "child", "Hello world"));
        let root = registry.instantiate(family).unwrap();
        assert!(set(&registry, &root, "father", dad));
        (registry, root)
    }

    #[test]
    fn test_father_child() {
        let (registry, root) = family();
        assert_eq!(
            value_at_path(&registry, &root, "father.child"),
            Some(Value::from("Hello world"))
        );
        assert_eq!(value_at_path(&registry, &root, "father.missing"), None);
    }

    #[test]
    fn test_positional_failure() {
        let (registry, root) = family();
        assert_eq!(
            resolve_path(&registry, &root, "father.missing"),
            Err(PathError::MissingMember {
                segment: "missing".to_string(),
                position: 1,
            })
        );
    }
}

// ============================================================================
// Nested Types
// ============================================================================

mod nested {
    use super::*;

    #[test]
    fn test_wrapper_circle_label() {
        let mut registry = TypeRegistry::new();
        let shape = registry
            .define_class("scenario", "Shape")
            .as_abstract()
            .build()
            .unwrap();
        let wrapper = registry.define_class("scenario", "Wrapper").build().unwrap();
        let circle = registry
            .define_class("scenario", "Circle")
            .extends(shape)
            .nested_in(wrapper)
            .as_static()
            .build()
            .unwrap();
        let label = registry
            .define_class("scenario", "Label")
            .nested_in(wrapper)
            .as_static()
            .build()
            .unwrap();

        let found: Vec<TypeId> = find_nested_types_extending(&registry, [wrapper], shape)
            .into_iter()
            .map(TypeId::from)
            .collect();
        assert_eq!(found, vec![circle]);
        assert!(!found.contains(&label));
    }
}

// ============================================================================
// Annotations
// ============================================================================

mod annotations {
    use super::*;

    #[test]
    fn test_annotation_set_intersection() {
        let mut registry = TypeRegistry::new();
        let a = registry.define_annotation("scenario", "A").build().unwrap();
        let b = registry.define_annotation("scenario", "B").build().unwrap();
        let c = registry.define_annotation("scenario", "C").build().unwrap();
        let target = registry
            .define_class("scenario", "Target")
            .annotate(Annotation::new(b))
            .build()
            .unwrap();
        let desc: &TypeDescriptor = registry.get(target).unwrap();

        let ab: FxHashSet<TypeId> = [a, b].into_iter().collect();
        let ac: FxHashSet<TypeId> = [a, c].into_iter().collect();
        assert!(is_annotated_with_set(desc, Some(&ab)));
        assert!(!is_annotated_with_set(desc, Some(&ac)));
        assert!(!is_annotated_with_set(desc, Some(&FxHashSet::default())));
        assert!(!is_annotated_with_set(desc, None));
        assert!(is_annotated_with_any(desc, &[a, b]));
        assert!(!is_annotated_with_any(desc, &[]));
    }

    #[test]
    fn test_inherited_annotations_are_visible_on_types() {
        let mut registry = TypeRegistry::new();
        let marker = registry.define_annotation("scenario", "Marker").build().unwrap();
        let base = registry
            .define_class("scenario", "Base")
            .annotate(Annotation::new(marker).with("level", 3i32))
            .build()
            .unwrap();
        let derived = registry
            .define_class("scenario", "Derived")
            .extends(base)
            .build()
            .unwrap();

        assert_eq!(annotations_of(&registry, derived).len(), 1);
        let found = find_annotation(&registry, marker, registry.get(derived)).unwrap();
        assert_eq!(found.element("level"), Some(&Value::Int(3)));
    }

    #[test]
    fn test_requesting_a_subtype_finds_the_declared_supertype() {
        let mut registry = TypeRegistry::new();
        let entity = registry.define_annotation("scenario", "Entity").build().unwrap();
        let table = registry
            .define_annotation("scenario", "Table")
            .extends(entity)
            .build()
            .unwrap();
        let with_entity = registry
            .define_class("scenario", "WithEntity")
            .annotate(Annotation::new(entity))
            .build()
            .unwrap();
        let with_table = registry
            .define_class("scenario", "WithTable")
            .annotate(Annotation::new(table))
            .build()
            .unwrap();

        let found = find_annotation(&registry, table, registry.get(with_entity)).unwrap();
        assert_eq!(found.annotation_type(), entity);
        assert!(find_annotation(&registry, entity, registry.get(with_table)).is_none());
    }
}

// ============================================================================
// Coercion
// ============================================================================

mod coercion {
    use super::*;

    #[test]
    fn test_wrapper_type_of() {
        let mut registry = TypeRegistry::new();
        assert_eq!(wrapper_type_of(&registry, builtin::INT), Ok(builtin::INTEGER));
        assert_eq!(wrapper_type_of(&registry, builtin::STRING), Ok(builtin::STRING));
        assert_eq!(wrapper_type_of(&registry, None), Err(ReflectError::AbsentType));

        for primitive in Primitive::ALL {
            assert!(wrapper_type_of(&registry, primitive.type_id()).is_ok());
        }

        let half = registry.define_primitive("half").unwrap();
        assert_eq!(
            wrapper_type_of(&registry, half),
            Err(ReflectError::WrapperNotFound {
                name: "half".to_string()
            })
        );
    }
}

// ============================================================================
// Access Control
// ============================================================================

mod access {
    use super::*;

    #[test]
    fn test_sealed_type_read_yields_none() {
        init_logging();
        let mut registry = TypeRegistry::new();
        let secret = registry
            .define_class("scenario", "Secret")
            .field(FieldDefinition::new("token", builtin::STRING).initial_value("s3cr3t"))
            .field(FieldDefinition::new("label", builtin::STRING).public())
            .sealed()
            .build()
            .unwrap();
        let obj = registry.instantiate(secret).unwrap();

        let token = find_member(&registry, "token", secret).unwrap();
        assert_eq!(get(&registry, &obj, token), None);
        assert!(!token.is_accessible());

        assert!(set(&registry, &obj, "label", "public"));
        let label = find_member(&registry, "label", secret);
        assert_eq!(get(&registry, &obj, label), Some(Value::from("public")));
    }

    #[test]
    fn test_registry_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TypeRegistry>();
        assert_send_sync::<typescope_types::ObjectRef>();
    }
}
