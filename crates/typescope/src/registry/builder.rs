//! Builders for registering types
//!
//! A type is described with a [`TypeBuilder`] obtained from one of the
//! `define_*` methods on [`TypeRegistry`] and validated on [`TypeBuilder::build`].
//! Referenced types must already be registered, except that a type may
//! mention itself (e.g. a linked-list node's `next` field).

use std::sync::atomic::AtomicBool;

use typescope_types::{
    builtin, Annotation, FieldId, Modifiers, RegistryError, TypeId, TypeKind, TypeRef, Value,
    Visibility,
};

use super::descriptor::{FieldDescriptor, MethodDescriptor, TypeDescriptor};
use super::TypeRegistry;
use crate::coercion::value_fits;

/// Definition for a field to be declared on a type
#[derive(Debug, Clone)]
pub struct FieldDefinition {
    /// Field name
    pub name: String,
    /// Declared type
    pub ty: TypeRef,
    /// Declared visibility (private unless changed)
    pub visibility: Visibility,
    /// Static / final flags
    pub modifiers: Modifiers,
    /// Declared annotations
    pub annotations: Vec<Annotation>,
    /// Initial value (if any)
    pub initial_value: Option<Value>,
}

impl FieldDefinition {
    /// Create a private instance field definition
    pub fn new(name: impl Into<String>, ty: impl Into<TypeRef>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            visibility: Visibility::Private,
            modifiers: Modifiers::default(),
            annotations: Vec::new(),
            initial_value: None,
        }
    }

    /// Set the visibility
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Mark as public
    pub fn public(self) -> Self {
        self.with_visibility(Visibility::Public)
    }

    /// Mark as static field
    pub fn as_static(mut self) -> Self {
        self.modifiers.is_static = true;
        self
    }

    /// Mark as final
    pub fn as_final(mut self) -> Self {
        self.modifiers.is_final = true;
        self
    }

    /// Attach an annotation
    pub fn annotated(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    /// Set the initial value
    pub fn initial_value(mut self, value: impl Into<Value>) -> Self {
        self.initial_value = Some(value.into());
        self
    }
}

/// Definition for a method to be declared on a type
#[derive(Debug, Clone)]
pub struct MethodDefinition {
    /// Method name
    pub name: String,
    /// Return type
    pub return_type: TypeRef,
    /// Parameter types
    pub parameters: Vec<TypeRef>,
    /// Static / abstract flags
    pub modifiers: Modifiers,
    /// Declared annotations
    pub annotations: Vec<Annotation>,
}

impl MethodDefinition {
    /// Create a new method definition returning `void`
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            return_type: TypeRef::class(builtin::VOID),
            parameters: Vec::new(),
            modifiers: Modifiers::default(),
            annotations: Vec::new(),
        }
    }

    /// Set return type
    pub fn returns(mut self, ty: impl Into<TypeRef>) -> Self {
        self.return_type = ty.into();
        self
    }

    /// Add a parameter
    pub fn with_param(mut self, ty: impl Into<TypeRef>) -> Self {
        self.parameters.push(ty.into());
        self
    }

    /// Mark as static method
    pub fn as_static(mut self) -> Self {
        self.modifiers.is_static = true;
        self
    }

    /// Mark as abstract method
    pub fn as_abstract(mut self) -> Self {
        self.modifiers.is_abstract = true;
        self
    }

    /// Attach an annotation
    pub fn annotated(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }
}

/// Builder for a class, interface or annotation type
#[must_use = "a type is only registered by calling build()"]
pub struct TypeBuilder<'r> {
    registry: &'r mut TypeRegistry,
    package: String,
    name: String,
    kind: TypeKind,
    modifiers: Modifiers,
    open: bool,
    type_params: Vec<String>,
    superclass: Option<TypeRef>,
    interfaces: Vec<TypeRef>,
    fields: Vec<FieldDefinition>,
    methods: Vec<MethodDefinition>,
    enclosing: Option<TypeId>,
    annotations: Vec<Annotation>,
}

impl<'r> TypeBuilder<'r> {
    pub(crate) fn new(
        registry: &'r mut TypeRegistry,
        package: &str,
        name: &str,
        kind: TypeKind,
    ) -> Self {
        Self {
            registry,
            package: package.to_string(),
            name: name.to_string(),
            kind,
            modifiers: Modifiers::default(),
            open: true,
            type_params: Vec::new(),
            superclass: None,
            interfaces: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            enclosing: None,
            annotations: Vec::new(),
        }
    }

    /// Declare the supertype
    ///
    /// For a class this sets the superclass (the root class otherwise). For
    /// interfaces and annotation types it adds a super-interface.
    pub fn extends(mut self, ty: impl Into<TypeRef>) -> Self {
        match self.kind {
            TypeKind::Class => self.superclass = Some(ty.into()),
            _ => self.interfaces.push(ty.into()),
        }
        self
    }

    /// Add a directly implemented interface
    pub fn implements(mut self, ty: impl Into<TypeRef>) -> Self {
        self.interfaces.push(ty.into());
        self
    }

    /// Add a type parameter
    pub fn type_param(mut self, name: impl Into<String>) -> Self {
        self.type_params.push(name.into());
        self
    }

    /// Declare this type inside another one
    pub fn nested_in(mut self, enclosing: TypeId) -> Self {
        self.enclosing = Some(enclosing);
        self
    }

    /// Declare a field
    pub fn field(mut self, field: FieldDefinition) -> Self {
        self.fields.push(field);
        self
    }

    /// Declare a method
    pub fn method(mut self, method: MethodDefinition) -> Self {
        self.methods.push(method);
        self
    }

    /// Attach an annotation to the type
    pub fn annotate(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    /// Mark as abstract
    pub fn as_abstract(mut self) -> Self {
        self.modifiers.is_abstract = true;
        self
    }

    /// Mark as a static nested type
    pub fn as_static(mut self) -> Self {
        self.modifiers.is_static = true;
        self
    }

    /// Mark as final
    pub fn as_final(mut self) -> Self {
        self.modifiers.is_final = true;
        self
    }

    /// Refuse reflective access to non-public members
    pub fn sealed(mut self) -> Self {
        self.open = false;
        self
    }

    /// Validate and register the type
    pub fn build(self) -> Result<TypeId, RegistryError> {
        let TypeBuilder {
            registry,
            package,
            name,
            kind,
            modifiers,
            open,
            type_params,
            superclass,
            mut interfaces,
            fields,
            methods,
            enclosing,
            annotations,
        } = self;

        let id = TypeId::new(registry.types.len() as u32);

        let qualified_name = match enclosing {
            Some(outer) => {
                let outer = registry
                    .get(outer)
                    .ok_or(RegistryError::UnknownType { id: outer })?;
                format!("{}${}", outer.qualified_name(), name)
            }
            None if package.is_empty() => name.clone(),
            None => format!("{}.{}", package, name),
        };
        if registry.name_to_id.contains_key(&qualified_name) {
            return Err(RegistryError::DuplicateType {
                name: qualified_name,
            });
        }

        let superclass = match kind {
            TypeKind::Class => Some(superclass.unwrap_or(TypeRef::class(builtin::OBJECT))),
            _ => None,
        };
        if let Some(sup) = &superclass {
            registry.check_ref(sup, id)?;
            let sup_kind = registry.get(sup.erasure()).map(TypeDescriptor::kind);
            if sup_kind != Some(TypeKind::Class) {
                return Err(RegistryError::NotAClass {
                    name: registry.name_of(sup.erasure()),
                });
            }
        }
        for iface in &interfaces {
            registry.check_ref(iface, id)?;
            let iface_kind = registry.get(iface.erasure()).map(TypeDescriptor::kind);
            if !matches!(
                iface_kind,
                Some(TypeKind::Interface) | Some(TypeKind::Annotation)
            ) {
                return Err(RegistryError::NotAnInterface {
                    name: registry.name_of(iface.erasure()),
                });
            }
        }
        if kind == TypeKind::Annotation {
            interfaces.push(TypeRef::class(builtin::ANNOTATION));
        }
        registry.check_annotations(&annotations)?;

        let mut field_descriptors: Vec<FieldDescriptor> = Vec::with_capacity(fields.len());
        for (slot, def) in fields.into_iter().enumerate() {
            if field_descriptors.iter().any(|f| f.name == def.name) {
                return Err(RegistryError::DuplicateField {
                    owner: name,
                    field: def.name,
                });
            }
            registry.check_ref(&def.ty, id)?;
            registry.check_annotations(&def.annotations)?;
            let accessible = def.visibility == Visibility::Public;
            field_descriptors.push(FieldDescriptor {
                id: FieldId::new(id, slot as u32),
                name: def.name,
                owner_name: name.clone(),
                ty: def.ty,
                visibility: def.visibility,
                modifiers: def.modifiers,
                annotations: def.annotations,
                initial_value: def.initial_value,
                owner_open: open,
                accessible: AtomicBool::new(accessible),
            });
        }

        let mut method_descriptors = Vec::with_capacity(methods.len());
        for def in methods {
            registry.check_ref(&def.return_type, id)?;
            for param in &def.parameters {
                registry.check_ref(param, id)?;
            }
            registry.check_annotations(&def.annotations)?;
            method_descriptors.push(MethodDescriptor {
                owner: id,
                name: def.name,
                return_type: def.return_type,
                parameters: def.parameters,
                modifiers: def.modifiers,
                annotations: def.annotations,
            });
        }

        let mut descriptor = TypeDescriptor::new(id, &package, &name, kind);
        descriptor.qualified_name = qualified_name.clone();
        descriptor.modifiers = modifiers;
        descriptor.open = open;
        descriptor.type_params = type_params;
        descriptor.superclass = superclass;
        descriptor.interfaces = interfaces;
        descriptor.fields = field_descriptors;
        descriptor.methods = method_descriptors;
        descriptor.enclosing = enclosing;
        descriptor.annotations = annotations;
        registry.types.push(descriptor);

        // Initial values are checked once the type exists, so that a field
        // may hold a value of its own declaring type.
        if let Err(err) = registry.check_initial_values(id) {
            registry.types.pop();
            return Err(err);
        }

        registry.name_to_id.insert(qualified_name, id);
        if let Some(outer) = enclosing {
            registry.types[outer.index()].nested.push(id);
        }
        registry.seed_statics(id);
        Ok(id)
    }
}

impl TypeRegistry {
    fn check_ref(&self, ty: &TypeRef, building: TypeId) -> Result<(), RegistryError> {
        let erased = ty.erasure();
        if erased != building && self.get(erased).is_none() {
            return Err(RegistryError::UnknownType { id: erased });
        }
        for arg in ty.type_arguments() {
            self.check_ref(arg, building)?;
        }
        Ok(())
    }

    fn check_annotations(&self, annotations: &[Annotation]) -> Result<(), RegistryError> {
        for annotation in annotations {
            let ty = annotation.annotation_type();
            match self.get(ty) {
                None => return Err(RegistryError::UnknownType { id: ty }),
                Some(desc) if !desc.is_annotation() => {
                    return Err(RegistryError::NotAnAnnotation {
                        name: desc.name().to_string(),
                    })
                }
                Some(_) => {}
            }
        }
        Ok(())
    }

    fn check_initial_values(&self, id: TypeId) -> Result<(), RegistryError> {
        let Some(desc) = self.get(id) else {
            return Err(RegistryError::UnknownType { id });
        };
        for field in desc.declared_fields() {
            if let Some(value) = field.initial_value() {
                if !value_fits(self, field.generic_type(), value) {
                    return Err(RegistryError::InvalidInitialValue {
                        owner: desc.name().to_string(),
                        field: field.name().to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    fn seed_statics(&self, id: TypeId) {
        let Some(desc) = self.get(id) else {
            return;
        };
        let mut statics = self.statics.write();
        for field in desc.declared_fields().iter().filter(|f| f.is_static()) {
            if let Some(value) = field.initial_value() {
                statics.insert(field.id(), value.clone());
            }
        }
    }
}
