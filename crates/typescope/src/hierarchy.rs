//! Type hierarchy traversal
//!
//! The ancestor list of a type walks the superclass backbone and fans out
//! each step's directly declared interfaces:
//!
//! ```text
//! [T, T's interfaces..., super(T), super(T)'s interfaces..., ..., root]
//! ```
//!
//! Interfaces reachable along several paths appear once per path, and the
//! super-interfaces of an interface are not expanded. Use
//! [`distinct_ancestors_of`] for a deduplicated list and
//! [`is_assignable_from`] for full transitive subtyping.

use rustc_hash::FxHashSet;
use typescope_types::{builtin, TypeId};

use crate::registry::TypeRegistry;

/// Ordered ancestor list of a type, starting with the type itself
///
/// An absent or unknown type yields an empty list.
pub fn ancestors_of(registry: &TypeRegistry, ty: impl Into<Option<TypeId>>) -> Vec<TypeId> {
    let mut ancestors = Vec::new();
    let mut current = ty.into();
    while let Some(id) = current {
        let Some(desc) = registry.get(id) else {
            break;
        };
        ancestors.push(id);
        ancestors.extend(desc.interfaces());
        current = desc.superclass();
    }
    ancestors
}

/// Ancestor list with repeated entries removed, keeping first occurrences
pub fn distinct_ancestors_of(
    registry: &TypeRegistry,
    ty: impl Into<Option<TypeId>>,
) -> Vec<TypeId> {
    let mut seen = FxHashSet::default();
    ancestors_of(registry, ty)
        .into_iter()
        .filter(|id| seen.insert(*id))
        .collect()
}

/// Check if `parent` occurs in the ancestor list of `ty`
///
/// A type is its own descendant. Absent inputs yield `false`.
pub fn is_descendant_of(
    registry: &TypeRegistry,
    parent: impl Into<Option<TypeId>>,
    ty: impl Into<Option<TypeId>>,
) -> bool {
    match parent.into() {
        Some(parent) => ancestors_of(registry, ty).contains(&parent),
        None => false,
    }
}

/// Check if a value of type `source` can be used where `target` is expected
///
/// Follows the superclass chain and every super-interface transitively.
/// Reflexive for registered types.
pub fn is_assignable_from(registry: &TypeRegistry, target: TypeId, source: TypeId) -> bool {
    if registry.get(target).is_none() {
        return false;
    }
    // Interfaces have no superclass but still convert to the root class.
    if target == builtin::OBJECT {
        return registry
            .get(source)
            .is_some_and(|desc| !desc.is_primitive());
    }
    let mut visited = FxHashSet::default();
    let mut stack = vec![source];
    while let Some(id) = stack.pop() {
        if id == target {
            return true;
        }
        if !visited.insert(id) {
            continue;
        }
        let Some(desc) = registry.get(id) else {
            continue;
        };
        stack.extend(desc.superclass());
        stack.extend(desc.interfaces());
    }
    false
}
