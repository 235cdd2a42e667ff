//! Type registry
//!
//! The registry stands in for a runtime's own type system: it owns one
//! [`TypeDescriptor`] per registered type, resolves qualified names to ids
//! and stores the values of static fields. Every registry starts out with the
//! builtin types listed in [`typescope_types::builtin`].
//!
//! ```
//! use typescope::{FieldDefinition, TypeRegistry};
//! use typescope_types::builtin;
//!
//! let mut registry = TypeRegistry::new();
//! let point = registry
//!     .define_class("geo", "Point")
//!     .field(FieldDefinition::new("x", builtin::INT))
//!     .field(FieldDefinition::new("y", builtin::INT))
//!     .build()
//!     .unwrap();
//! assert_eq!(registry.get(point).unwrap().qualified_name(), "geo.Point");
//! ```

mod bootstrap;
mod builder;
mod descriptor;

pub use builder::{FieldDefinition, MethodDefinition, TypeBuilder};
pub use descriptor::{FieldDescriptor, MethodDescriptor, TypeDescriptor};

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use typescope_types::{
    FieldId, Object, ObjectRef, Primitive, RegistryError, TypeId, TypeKind, TypeRef, Value,
};

use crate::catalog::instance_members_of;

/// Registry of type metadata
#[derive(Debug)]
pub struct TypeRegistry {
    /// Descriptors indexed by type id
    types: Vec<TypeDescriptor>,
    /// Qualified name to id mapping
    name_to_id: FxHashMap<String, TypeId>,
    /// Current values of static fields that have been written or initialized
    statics: RwLock<FxHashMap<FieldId, Value>>,
}

impl TypeRegistry {
    /// Create a registry holding the builtin types
    pub fn new() -> Self {
        let mut registry = Self {
            types: Vec::new(),
            name_to_id: FxHashMap::default(),
            statics: RwLock::new(FxHashMap::default()),
        };
        bootstrap::register_builtins(&mut registry);
        registry
    }

    /// Start defining a class
    pub fn define_class(&mut self, package: &str, name: &str) -> TypeBuilder<'_> {
        TypeBuilder::new(self, package, name, TypeKind::Class)
    }

    /// Start defining an interface
    pub fn define_interface(&mut self, package: &str, name: &str) -> TypeBuilder<'_> {
        TypeBuilder::new(self, package, name, TypeKind::Interface)
    }

    /// Start defining an annotation type
    pub fn define_annotation(&mut self, package: &str, name: &str) -> TypeBuilder<'_> {
        TypeBuilder::new(self, package, name, TypeKind::Annotation)
    }

    /// Register an additional primitive type
    ///
    /// Host-specific primitives have no boxed counterpart, so asking for
    /// their wrapper type fails.
    pub fn define_primitive(&mut self, name: &str) -> Result<TypeId, RegistryError> {
        if self.name_to_id.contains_key(name) {
            return Err(RegistryError::DuplicateType {
                name: name.to_string(),
            });
        }
        let id = TypeId::new(self.types.len() as u32);
        let mut descriptor = TypeDescriptor::new(id, "", name, TypeKind::Primitive);
        descriptor.modifiers.is_final = true;
        descriptor.open = false;
        self.insert(descriptor);
        Ok(id)
    }

    pub(crate) fn insert(&mut self, descriptor: TypeDescriptor) -> TypeId {
        let id = descriptor.id();
        self.name_to_id
            .insert(descriptor.qualified_name().to_string(), id);
        self.types.push(descriptor);
        id
    }

    /// Get a type by id
    pub fn get(&self, id: TypeId) -> Option<&TypeDescriptor> {
        self.types.get(id.index())
    }

    /// Get a type by qualified name
    pub fn get_by_name(&self, qualified_name: &str) -> Option<&TypeDescriptor> {
        self.name_to_id
            .get(qualified_name)
            .and_then(|id| self.get(*id))
    }

    /// Resolve a qualified name to an id
    pub fn id_of(&self, qualified_name: &str) -> Option<TypeId> {
        self.name_to_id.get(qualified_name).copied()
    }

    /// Simple name of a type, for messages
    pub fn name_of(&self, id: TypeId) -> String {
        self.get(id)
            .map(|desc| desc.name().to_string())
            .unwrap_or_else(|| id.to_string())
    }

    /// Get a field by id
    pub fn field(&self, id: FieldId) -> Option<&FieldDescriptor> {
        self.get(id.owner)
            .and_then(|desc| desc.declared_fields().get(id.slot as usize))
    }

    /// Iterate over all types in registration order
    pub fn iter(&self) -> impl Iterator<Item = &TypeDescriptor> {
        self.types.iter()
    }

    /// Number of registered types, builtins included
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Check if the registry is empty (never true once bootstrapped)
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Value a field of the given declared type holds before any write
    pub fn default_value(&self, ty: &TypeRef) -> Value {
        match Primitive::from_type_id(ty.erasure()) {
            Some(primitive) => Value::default_for(primitive),
            None => Value::Null,
        }
    }

    /// Create an instance with every instance field at its initial value
    pub fn instantiate(&self, ty: TypeId) -> Result<ObjectRef, RegistryError> {
        let desc = self.get(ty).ok_or(RegistryError::UnknownType { id: ty })?;
        if desc.kind() != TypeKind::Class || desc.is_abstract() {
            return Err(RegistryError::NotInstantiable {
                name: desc.name().to_string(),
            });
        }

        let mut object = Object::new(ty);
        for field in instance_members_of(self, ty) {
            let value = field
                .initial_value()
                .cloned()
                .unwrap_or_else(|| self.default_value(field.generic_type()));
            object.put(field.id(), value);
        }
        Ok(ObjectRef::new(object))
    }

    pub(crate) fn static_value(&self, field: &FieldDescriptor) -> Value {
        self.statics
            .read()
            .get(&field.id())
            .cloned()
            .unwrap_or_else(|| self.default_value(field.generic_type()))
    }

    pub(crate) fn store_static(&self, field: &FieldDescriptor, value: Value) {
        self.statics.write().insert(field.id(), value);
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use typescope_types::{builtin, Visibility};

    #[test]
    fn test_builtins_are_registered_at_their_ids() {
        let registry = TypeRegistry::new();
        assert_eq!(registry.len(), builtin::COUNT as usize);
        assert_eq!(registry.get(builtin::OBJECT).unwrap().name(), "Object");
        assert_eq!(registry.get(builtin::INT).unwrap().name(), "int");
        assert_eq!(registry.get(builtin::INTEGER).unwrap().name(), "Integer");
        assert_eq!(registry.get(builtin::ARRAY_LIST).unwrap().name(), "ArrayList");
        assert_eq!(registry.id_of("lang.String"), Some(builtin::STRING));
        assert_eq!(registry.get(builtin::OBJECT).unwrap().superclass(), None);
    }

    #[test]
    fn test_define_class_defaults_to_root_superclass() {
        let mut registry = TypeRegistry::new();
        let point = registry.define_class("geo", "Point").build().unwrap();

        let desc = registry.get(point).unwrap();
        assert_eq!(desc.superclass(), Some(builtin::OBJECT));
        assert_eq!(desc.qualified_name(), "geo.Point");
        assert_eq!(registry.get_by_name("geo.Point").unwrap().id(), point);
    }

    #[test]
    fn test_duplicate_type_rejected() {
        let mut registry = TypeRegistry::new();
        registry.define_class("geo", "Point").build().unwrap();
        let err = registry.define_class("geo", "Point").build().unwrap_err();
        assert_eq!(
            err,
            RegistryError::DuplicateType {
                name: "geo.Point".to_string()
            }
        );
    }

    #[test]
    fn test_superclass_must_be_a_class() {
        let mut registry = TypeRegistry::new();
        let shape = registry.define_interface("geo", "Shape").build().unwrap();
        let err = registry
            .define_class("geo", "Circle")
            .extends(shape)
            .build()
            .unwrap_err();
        assert!(matches!(err, RegistryError::NotAClass { .. }));

        let base = registry.define_class("geo", "Base").build().unwrap();
        let err = registry
            .define_class("geo", "Square")
            .implements(base)
            .build()
            .unwrap_err();
        assert!(matches!(err, RegistryError::NotAnInterface { .. }));
    }

    #[test]
    fn test_unknown_reference_rejected() {
        let mut registry = TypeRegistry::new();
        let err = registry
            .define_class("geo", "Point")
            .field(FieldDefinition::new("x", TypeId::new(999)))
            .build()
            .unwrap_err();
        assert_eq!(err, RegistryError::UnknownType { id: TypeId::new(999) });
    }

    #[test]
    fn test_duplicate_field_rejected() {
        let mut registry = TypeRegistry::new();
        let err = registry
            .define_class("geo", "Point")
            .field(FieldDefinition::new("x", builtin::INT))
            .field(FieldDefinition::new("x", builtin::LONG))
            .build()
            .unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateField { .. }));
    }

    #[test]
    fn test_self_referencing_field() {
        let mut registry = TypeRegistry::new();
        let node = registry
            .define_class("ds", "Node")
            .field(FieldDefinition::new("next", TypeId::new(builtin::COUNT)))
            .build()
            .unwrap();
        assert_eq!(node, TypeId::new(builtin::COUNT));
        assert_eq!(
            registry.get(node).unwrap().declared_fields()[0].raw_type(),
            node
        );
    }

    #[test]
    fn test_invalid_initial_value_rolls_back() {
        let mut registry = TypeRegistry::new();
        let before = registry.len();
        let err = registry
            .define_class("geo", "Point")
            .field(FieldDefinition::new("x", builtin::INT).initial_value("zero"))
            .build()
            .unwrap_err();
        assert!(matches!(err, RegistryError::InvalidInitialValue { .. }));
        assert_eq!(registry.len(), before);
        assert!(registry.id_of("geo.Point").is_none());
    }

    #[test]
    fn test_nested_type_naming() {
        let mut registry = TypeRegistry::new();
        let outer = registry.define_class("ui", "Wrapper").build().unwrap();
        let inner = registry
            .define_class("ui", "Label")
            .nested_in(outer)
            .as_static()
            .build()
            .unwrap();

        assert_eq!(registry.get(inner).unwrap().qualified_name(), "ui.Wrapper$Label");
        assert_eq!(registry.get(inner).unwrap().enclosing_type(), Some(outer));
        assert_eq!(registry.get(outer).unwrap().declared_types(), &[inner]);
    }

    #[test]
    fn test_instantiate_sets_defaults() {
        let mut registry = TypeRegistry::new();
        let point = registry
            .define_class("geo", "Point")
            .field(FieldDefinition::new("x", builtin::INT))
            .field(FieldDefinition::new("label", builtin::STRING).initial_value("origin"))
            .field(FieldDefinition::new("count", builtin::INT).as_static())
            .build()
            .unwrap();

        let obj = registry.instantiate(point).unwrap();
        let desc = registry.get(point).unwrap();
        let fields = desc.declared_fields();
        assert_eq!(obj.read().get(fields[0].id()), Some(&Value::Int(0)));
        assert_eq!(obj.read().get(fields[1].id()), Some(&Value::from("origin")));
        assert!(!obj.read().has_slot(fields[2].id()));
    }

    #[test]
    fn test_instantiate_rejects_abstract_and_interfaces() {
        let mut registry = TypeRegistry::new();
        let shape = registry.define_class("geo", "Shape").as_abstract().build().unwrap();
        assert!(registry.instantiate(shape).is_err());
        assert!(registry.instantiate(builtin::LIST).is_err());
        assert!(registry.instantiate(builtin::INT).is_err());
    }

    #[test]
    fn test_field_accessibility_flag() {
        let mut registry = TypeRegistry::new();
        let account = registry
            .define_class("bank", "Account")
            .field(FieldDefinition::new("balance", builtin::LONG))
            .field(FieldDefinition::new("owner", builtin::STRING).public())
            .build()
            .unwrap();
        let vault = registry
            .define_class("bank", "Vault")
            .field(FieldDefinition::new("code", builtin::STRING))
            .sealed()
            .build()
            .unwrap();

        let balance = &registry.get(account).unwrap().declared_fields()[0];
        let owner = &registry.get(account).unwrap().declared_fields()[1];
        assert!(!balance.is_accessible());
        assert!(owner.is_accessible());
        assert_eq!(owner.visibility(), Visibility::Public);

        balance.set_accessible(true).unwrap();
        assert!(balance.is_accessible());
        balance.set_accessible(false).unwrap();

        let code = &registry.get(vault).unwrap().declared_fields()[0];
        assert!(code.set_accessible(true).is_err());
        assert!(!code.is_accessible());
    }

    #[test]
    fn test_define_primitive() {
        let mut registry = TypeRegistry::new();
        let decimal = registry.define_primitive("decimal").unwrap();
        assert!(registry.get(decimal).unwrap().is_primitive());
        assert!(registry.define_primitive("int").is_err());
    }
}
