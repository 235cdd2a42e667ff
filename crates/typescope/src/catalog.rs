//! Member discovery
//!
//! Members are the fields declared on a type and on each of its ancestors,
//! listed in ancestor order (see [`ancestors_of`]). Lookups by name ignore
//! case and return the first match; two members whose names differ only in
//! case are not disambiguated.

use rustc_hash::FxHashSet;
use typescope_types::TypeId;

use crate::hierarchy::ancestors_of;
use crate::registry::{FieldDescriptor, MethodDescriptor, TypeRegistry};

/// All fields of a type and its ancestors
pub fn members_of(registry: &TypeRegistry, ty: impl Into<Option<TypeId>>) -> Vec<&FieldDescriptor> {
    ancestors_of(registry, ty)
        .into_iter()
        .filter_map(|id| registry.get(id))
        .flat_map(|desc| desc.declared_fields())
        .collect()
}

/// Static fields of a type and its ancestors
pub fn static_members_of(
    registry: &TypeRegistry,
    ty: impl Into<Option<TypeId>>,
) -> Vec<&FieldDescriptor> {
    members_of(registry, ty)
        .into_iter()
        .filter(|field| field.is_static())
        .collect()
}

/// Instance fields of a type and its ancestors
pub fn instance_members_of(
    registry: &TypeRegistry,
    ty: impl Into<Option<TypeId>>,
) -> Vec<&FieldDescriptor> {
    members_of(registry, ty)
        .into_iter()
        .filter(|field| !field.is_static())
        .collect()
}

/// Names of the instance fields, in member order
pub fn member_names_of(registry: &TypeRegistry, ty: impl Into<Option<TypeId>>) -> Vec<&str> {
    instance_members_of(registry, ty)
        .into_iter()
        .map(FieldDescriptor::name)
        .collect()
}

/// Distinct names of the instance fields
pub fn member_name_set_of(
    registry: &TypeRegistry,
    ty: impl Into<Option<TypeId>>,
) -> FxHashSet<&str> {
    member_names_of(registry, ty).into_iter().collect()
}

/// First field whose name matches, ignoring case
pub fn find_member<'r, 'n>(
    registry: &'r TypeRegistry,
    name: impl Into<Option<&'n str>>,
    ty: impl Into<Option<TypeId>>,
) -> Option<&'r FieldDescriptor> {
    let name = name.into()?;
    let ty = ty.into()?;
    members_of(registry, ty)
        .into_iter()
        .find(|field| eq_ignore_case(field.name(), name))
}

/// Check if an instance field with this name exists, ignoring case
pub fn has_member<'n>(
    registry: &TypeRegistry,
    name: impl Into<Option<&'n str>>,
    ty: impl Into<Option<TypeId>>,
) -> bool {
    let Some(name) = name.into() else {
        return false;
    };
    member_names_of(registry, ty)
        .into_iter()
        .any(|member| eq_ignore_case(member, name))
}

/// Check if the field is static; absent fields are not
pub fn is_static_member<'f>(field: impl Into<Option<&'f FieldDescriptor>>) -> bool {
    field.into().is_some_and(FieldDescriptor::is_static)
}

/// All methods of a type and its ancestors
pub fn methods_of(
    registry: &TypeRegistry,
    ty: impl Into<Option<TypeId>>,
) -> Vec<&MethodDescriptor> {
    ancestors_of(registry, ty)
        .into_iter()
        .filter_map(|id| registry.get(id))
        .flat_map(|desc| desc.declared_methods())
        .collect()
}

/// First method with exactly this name
pub fn find_method<'r, 'n>(
    registry: &'r TypeRegistry,
    name: impl Into<Option<&'n str>>,
    ty: impl Into<Option<TypeId>>,
) -> Option<&'r MethodDescriptor> {
    let name = name.into()?;
    methods_of(registry, ty)
        .into_iter()
        .find(|method| method.name() == name)
}

/// Check if the method is static; absent methods are not
pub fn is_static_method<'m>(method: impl Into<Option<&'m MethodDescriptor>>) -> bool {
    method.into().is_some_and(MethodDescriptor::is_static)
}

fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}
