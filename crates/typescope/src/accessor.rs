//! Reading and writing field values
//!
//! [`read_field`] and [`write_field`] are the raw operations: they fail with
//! an [`AccessError`] when the field's accessibility flag is clear or the
//! instance or value does not fit. [`get`] and [`set`] wrap them in an
//! [`AccessGuard`] and report failure as an absent value or `false`.

use typescope_types::{AccessError, ObjectRef, Value};

use crate::catalog::find_member;
use crate::coercion::value_fits;
use crate::hierarchy::is_assignable_from;
use crate::registry::{FieldDescriptor, TypeRegistry};

/// Scoped accessibility override for one field
///
/// Acquiring records the field's current flag and sets it; dropping the
/// guard puts the recorded flag back, whichever way the access went.
#[must_use = "the override ends when the guard is dropped"]
#[derive(Debug)]
pub struct AccessGuard<'f> {
    field: &'f FieldDescriptor,
    prior: bool,
}

impl<'f> AccessGuard<'f> {
    /// Force the field accessible until the guard is dropped
    pub fn acquire(field: &'f FieldDescriptor) -> Result<Self, AccessError> {
        let prior = field.is_accessible();
        field.set_accessible(true)?;
        Ok(Self { field, prior })
    }

    /// Flag in effect before the guard was acquired
    pub fn prior(&self) -> bool {
        self.prior
    }
}

impl Drop for AccessGuard<'_> {
    fn drop(&mut self) {
        self.field.restore_accessible(self.prior);
    }
}

/// Read a field's current value
///
/// Static fields are read from the registry and ignore the instance. An
/// instance field that was never written reads as its type's default.
pub fn read_field(
    registry: &TypeRegistry,
    instance: &ObjectRef,
    field: &FieldDescriptor,
) -> Result<Value, AccessError> {
    if !field.is_accessible() {
        return Err(AccessError::IllegalAccess {
            owner: field.owner_name().to_string(),
            field: field.name().to_string(),
        });
    }
    if field.is_static() {
        return Ok(registry.static_value(field));
    }
    check_declared_on(registry, instance, field)?;

    let object = instance.read();
    Ok(object
        .get(field.id())
        .cloned()
        .unwrap_or_else(|| registry.default_value(field.generic_type())))
}

/// Store a value into a field
///
/// Instance fields declared final can be written once accessible; static
/// final fields never can.
pub fn write_field(
    registry: &TypeRegistry,
    instance: &ObjectRef,
    field: &FieldDescriptor,
    value: Value,
) -> Result<(), AccessError> {
    if !field.is_accessible() {
        return Err(AccessError::IllegalAccess {
            owner: field.owner_name().to_string(),
            field: field.name().to_string(),
        });
    }
    if field.is_static() && field.is_final() {
        return Err(AccessError::StaticFinal {
            owner: field.owner_name().to_string(),
            field: field.name().to_string(),
        });
    }
    if !field.is_static() {
        check_declared_on(registry, instance, field)?;
    }
    if !value_fits(registry, field.generic_type(), &value) {
        return Err(AccessError::TypeMismatch {
            field: field.name().to_string(),
            expected: registry.name_of(field.raw_type()),
            actual: value
                .runtime_type()
                .map(|ty| registry.name_of(ty))
                .unwrap_or_else(|| "null".to_string()),
        });
    }

    if field.is_static() {
        registry.store_static(field, value);
    } else {
        instance.write().put(field.id(), value);
    }
    Ok(())
}

fn check_declared_on(
    registry: &TypeRegistry,
    instance: &ObjectRef,
    field: &FieldDescriptor,
) -> Result<(), AccessError> {
    let class = instance.class();
    if is_assignable_from(registry, field.owner(), class) {
        Ok(())
    } else {
        Err(AccessError::NotDeclaredOn {
            owner: field.owner_name().to_string(),
            field: field.name().to_string(),
            class: registry.name_of(class),
        })
    }
}

/// Read a field, overriding its accessibility for the duration
///
/// Returns `None` for absent inputs, for a `Null` value and when the read
/// fails.
pub fn get<'i, 'f>(
    registry: &TypeRegistry,
    instance: impl Into<Option<&'i ObjectRef>>,
    field: impl Into<Option<&'f FieldDescriptor>>,
) -> Option<Value> {
    let instance = instance.into()?;
    let field = field.into()?;

    let _guard = acquire_logged(field);
    match read_field(registry, instance, field) {
        Ok(Value::Null) => None,
        Ok(value) => Some(value),
        Err(err) => {
            log::warn!("Failed to read field {}.{}: {err}", field.owner_name(), field.name());
            None
        }
    }
}

/// Write the field named `name` (ignoring case) on the instance's class
///
/// Returns whether the value was stored. `Value::Null` may be stored in any
/// reference-typed field.
pub fn set<'i, 'n>(
    registry: &TypeRegistry,
    instance: impl Into<Option<&'i ObjectRef>>,
    name: impl Into<Option<&'n str>>,
    value: impl Into<Value>,
) -> bool {
    let Some(instance) = instance.into() else {
        return false;
    };
    let Some(field) = find_member(registry, name, instance.class()) else {
        return false;
    };

    let _guard = acquire_logged(field);
    match write_field(registry, instance, field, value.into()) {
        Ok(()) => true,
        Err(err) => {
            log::debug!("Failed to write field {}.{}: {err}", field.owner_name(), field.name());
            false
        }
    }
}

fn acquire_logged(field: &FieldDescriptor) -> Option<AccessGuard<'_>> {
    match AccessGuard::acquire(field) {
        Ok(guard) => Some(guard),
        Err(err) => {
            log::debug!("Accessibility override refused: {err}");
            None
        }
    }
}
