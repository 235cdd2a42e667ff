//! Dotted member paths
//!
//! A path such as `"father.child"` names a member of the starting instance,
//! then a member of that member's value, and so on. Each segment is looked
//! up on the runtime class of the current value, ignoring case.
//!
//! Trailing empty segments (`"father.child."`) are ignored, so a path of
//! dots only resolves to the starting instance. The empty path and any other
//! empty segment fail to resolve.

use typescope_types::{ObjectRef, PathError, Value};

use crate::accessor::get;
use crate::catalog::find_member;
use crate::registry::TypeRegistry;

/// Value at the end of the path, or `None` if any step fails
pub fn value_at_path<'i, 'p>(
    registry: &TypeRegistry,
    instance: impl Into<Option<&'i ObjectRef>>,
    path: impl Into<Option<&'p str>>,
) -> Option<Value> {
    let instance = instance.into()?;
    let path = path.into()?;
    resolve_path(registry, instance, path).ok()
}

/// Value at the end of the path, or the segment where resolution stopped
pub fn resolve_path(
    registry: &TypeRegistry,
    instance: &ObjectRef,
    path: &str,
) -> Result<Value, PathError> {
    let mut segments: Vec<&str> = path.split('.').collect();
    if !path.is_empty() {
        while segments.last() == Some(&"") {
            segments.pop();
        }
    }

    let mut current = Value::Object(instance.clone());
    for (position, segment) in segments.into_iter().enumerate() {
        let missing = || PathError::MissingMember {
            segment: segment.to_string(),
            position,
        };
        let object = current.as_object().ok_or_else(missing)?;
        let field = find_member(registry, segment, object.class()).ok_or_else(missing)?;
        log::trace!(
            "Path segment {position} '{segment}' resolved to {}.{}",
            field.owner_name(),
            field.name()
        );

        current = get(registry, object, field).ok_or_else(|| PathError::AbsentValue {
            segment: segment.to_string(),
            position,
        })?;
    }
    Ok(current)
}
