//! typescope type model
//!
//! Identifiers, primitive kinds, generic type references, annotations and
//! dynamic values shared by the typescope registry and introspection engine.

#![warn(missing_docs)]

pub mod annotation;
pub mod error;
pub mod primitive;
pub mod ty;
pub mod value;

pub use annotation::Annotation;
pub use error::{AccessError, PathError, ReflectError, RegistryError};
pub use primitive::{is_wrapper, wrapper_for, Primitive};
pub use ty::{builtin, FieldId, Modifiers, TypeId, TypeKind, TypeRef, Visibility};
pub use value::{Object, ObjectRef, Value};
