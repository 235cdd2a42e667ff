//! Casting, generic arguments and primitive normalization

use typescope_types::{
    builtin, is_wrapper, wrapper_for, Primitive, ReflectError, TypeId, TypeRef, Value,
};

use crate::hierarchy::is_assignable_from;
use crate::registry::{FieldDescriptor, TypeRegistry};

/// A type known to be assignable to `bound`
///
/// Produced by [`cast_to_class`]; holding one is proof that the check
/// succeeded against the registry it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoundedType {
    ty: TypeId,
    bound: TypeId,
}

impl BoundedType {
    /// The narrowed type
    pub fn ty(&self) -> TypeId {
        self.ty
    }

    /// The type it was narrowed to
    pub fn bound(&self) -> TypeId {
        self.bound
    }
}

impl From<BoundedType> for TypeId {
    fn from(bounded: BoundedType) -> Self {
        bounded.ty
    }
}

/// The value, if its runtime type is assignable to `ty`
///
/// Absent inputs and `Null` yield `None`.
pub fn cast_to<'v>(
    registry: &TypeRegistry,
    ty: impl Into<Option<TypeId>>,
    value: impl Into<Option<&'v Value>>,
) -> Option<&'v Value> {
    let ty = ty.into()?;
    let value = value.into()?;
    let runtime = value.runtime_type()?;
    is_assignable_from(registry, ty, runtime).then_some(value)
}

/// Narrow `candidate` to a subtype of `parent`
pub fn cast_to_class(
    registry: &TypeRegistry,
    parent: impl Into<Option<TypeId>>,
    candidate: impl Into<Option<TypeId>>,
) -> Option<BoundedType> {
    let bound = parent.into()?;
    let ty = candidate.into()?;
    is_assignable_from(registry, bound, ty).then_some(BoundedType { ty, bound })
}

/// The `index`-th type argument of a parameterized reference
///
/// Only concrete class arguments are returned; variables, wildcards and
/// nested parameterizations yield `None`, as do raw references and an out
/// of range index.
pub fn generic_type_argument<'t>(
    ty: impl Into<Option<&'t TypeRef>>,
    index: usize,
) -> Option<TypeId> {
    ty.into()?.type_arguments().get(index)?.as_class()
}

/// First type argument of a parameterized reference
pub fn generic_type_of<'t>(ty: impl Into<Option<&'t TypeRef>>) -> Option<TypeId> {
    generic_type_argument(ty, 0)
}

/// The `index`-th type argument given to a type's superclass
///
/// For `class IntBox extends Box<Integer>` index 0 is `Integer`.
pub fn superclass_type_argument(
    registry: &TypeRegistry,
    ty: impl Into<Option<TypeId>>,
    index: usize,
) -> Option<TypeId> {
    let desc = registry.get(ty.into()?)?;
    generic_type_argument(desc.generic_superclass(), index)
}

/// Boxed counterpart of a primitive type; other types are returned as is
pub fn wrapper_type_of(
    registry: &TypeRegistry,
    ty: impl Into<Option<TypeId>>,
) -> Result<TypeId, ReflectError> {
    let ty = ty.into().ok_or(ReflectError::AbsentType)?;
    let desc = registry.get(ty).ok_or(ReflectError::UnknownType { id: ty })?;
    if !desc.is_primitive() {
        return Ok(ty);
    }
    wrapper_for(desc.name()).ok_or_else(|| ReflectError::WrapperNotFound {
        name: desc.name().to_string(),
    })
}

/// Element type of a collection-typed field, otherwise its declared type
pub fn type_of<'f>(
    registry: &TypeRegistry,
    field: impl Into<Option<&'f FieldDescriptor>>,
) -> Option<TypeId> {
    let field = field.into()?;
    if is_collection_typed(registry, field) {
        generic_type_of(field.generic_type())
    } else {
        Some(field.raw_type())
    }
}

/// Check if the field is declared with a primitive or boxed type
pub fn is_primitive_or_wrapper<'f>(
    registry: &TypeRegistry,
    field: impl Into<Option<&'f FieldDescriptor>>,
) -> bool {
    let Some(field) = field.into() else {
        return false;
    };
    let raw = field.raw_type();
    is_wrapper(raw) || registry.get(raw).is_some_and(|desc| desc.is_primitive())
}

/// Check if the field is declared with a collection type
pub fn is_collection_typed<'f>(
    registry: &TypeRegistry,
    field: impl Into<Option<&'f FieldDescriptor>>,
) -> bool {
    field.into().is_some_and(|field| {
        is_assignable_from(registry, builtin::COLLECTION, field.raw_type())
    })
}

/// Check if the type is a static nested type
pub fn is_static_type(registry: &TypeRegistry, ty: impl Into<Option<TypeId>>) -> bool {
    ty.into()
        .and_then(|id| registry.get(id))
        .is_some_and(|desc| desc.is_static())
}

/// Check if the type is an interface or an abstract class
pub fn is_abstract_or_interface(registry: &TypeRegistry, ty: impl Into<Option<TypeId>>) -> bool {
    ty.into()
        .and_then(|id| registry.get(id))
        .is_some_and(|desc| desc.is_interface() || desc.is_abstract())
}

/// Check if a value may be stored in a slot of the declared type
///
/// Primitive slots take exactly their own primitive kind and never `Null`.
/// Reference slots take `Null` and any value whose runtime type is
/// assignable to the erased declared type.
pub fn value_fits(registry: &TypeRegistry, declared: &TypeRef, value: &Value) -> bool {
    let erased = declared.erasure();
    let declared_primitive = registry
        .get(erased)
        .is_some_and(|desc| desc.is_primitive());
    if declared_primitive {
        return value
            .primitive()
            .is_some_and(|primitive| Some(primitive) == Primitive::from_type_id(erased));
    }
    match value.runtime_type() {
        None => true,
        Some(runtime) => is_assignable_from(registry, erased, runtime),
    }
}
