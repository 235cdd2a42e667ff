//! Nested type scanning

use typescope_types::TypeId;

use crate::coercion::{cast_to_class, BoundedType};
use crate::hierarchy::is_descendant_of;
use crate::registry::TypeRegistry;

/// Nested types declared directly inside `containers` that extend `parent`
///
/// Results follow container order, then declaration order within each
/// container. An absent parent yields nothing.
pub fn find_nested_types_extending(
    registry: &TypeRegistry,
    containers: impl IntoIterator<Item = TypeId>,
    parent: impl Into<Option<TypeId>>,
) -> Vec<BoundedType> {
    let Some(parent) = parent.into() else {
        return Vec::new();
    };
    containers
        .into_iter()
        .filter_map(|container| registry.get(container))
        .flat_map(|desc| desc.declared_types().iter().copied())
        .filter(|nested| is_descendant_of(registry, parent, *nested))
        .filter_map(|nested| cast_to_class(registry, parent, nested))
        .collect()
}
