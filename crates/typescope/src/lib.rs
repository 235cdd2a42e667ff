//! typescope
//!
//! Runtime type introspection over an explicit metadata registry:
//! - **Registry**: type, field and method descriptors, builders and the
//!   builtin types (`registry` module)
//! - **Hierarchy**: ancestor lists and assignability (`hierarchy` module)
//! - **Members**: field and method discovery, case-insensitive lookup
//!   (`catalog` module)
//! - **Access**: guarded reads and writes of field values (`accessor`
//!   module) and dotted paths through nested objects (`path` module)
//! - **Annotations**: annotation lookup on types, fields and methods
//!   (`annotations` module)
//! - **Coercion**: casts, generic type arguments and primitive wrappers
//!   (`coercion` module)
//! - **Nested types**: nested types extending a parent (`nested` module)
//!
//! Queries treat missing input as empty: they return `None`, `false` or an
//! empty list rather than failing. Only [`wrapper_type_of`] and the raw
//! access functions return errors.
//!
//! # Example
//!
//! ```
//! use typescope::{value_at_path, set, FieldDefinition, TypeRegistry};
//! use typescope_types::{builtin, Value};
//!
//! let mut registry = TypeRegistry::new();
//! let person = registry
//!     .define_class("app", "Person")
//!     .field(FieldDefinition::new("name", builtin::STRING))
//!     .build()
//!     .unwrap();
//! let home = registry
//!     .define_class("app", "Home")
//!     .field(FieldDefinition::new("owner", person))
//!     .build()
//!     .unwrap();
//!
//! let owner = registry.instantiate(person).unwrap();
//! assert!(set(&registry, &owner, "name", "Ada"));
//! let house = registry.instantiate(home).unwrap();
//! assert!(set(&registry, &house, "owner", owner));
//!
//! assert_eq!(
//!     value_at_path(&registry, &house, "Owner.Name"),
//!     Some(Value::from("Ada"))
//! );
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod accessor;
pub mod annotations;
pub mod catalog;
pub mod coercion;
pub mod collections;
pub mod hierarchy;
pub mod nested;
pub mod path;
pub mod registry;

pub use accessor::{get, read_field, set, write_field, AccessGuard};
pub use annotations::{
    annotations_of, field_annotations, field_annotations_by_name, find_annotation,
    is_annotated_on, is_annotated_with_any, is_annotated_with_set, is_of_package, Annotated,
};
pub use catalog::{
    find_member, find_method, has_member, instance_members_of, is_static_member,
    is_static_method, member_name_set_of, member_names_of, members_of, methods_of,
    static_members_of,
};
pub use coercion::{
    cast_to, cast_to_class, generic_type_argument, generic_type_of, is_abstract_or_interface,
    is_collection_typed, is_primitive_or_wrapper, is_static_type, superclass_type_argument,
    type_of, wrapper_type_of, BoundedType,
};
pub use hierarchy::{ancestors_of, distinct_ancestors_of, is_assignable_from, is_descendant_of};
pub use nested::find_nested_types_extending;
pub use path::{resolve_path, value_at_path};
pub use registry::{
    FieldDefinition, FieldDescriptor, MethodDefinition, MethodDescriptor, TypeBuilder,
    TypeDescriptor, TypeRegistry,
};
