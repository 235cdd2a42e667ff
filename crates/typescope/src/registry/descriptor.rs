//! Type, field and method descriptors
//!
//! Descriptors are owned by the [`TypeRegistry`](super::TypeRegistry) and
//! handed out by reference. Apart from a field's accessibility flag they are
//! immutable once registered.

use std::sync::atomic::{AtomicBool, Ordering};

use typescope_types::{
    AccessError, Annotation, FieldId, Modifiers, TypeId, TypeKind, TypeRef, Value, Visibility,
};

/// Metadata for a registered type
#[derive(Debug)]
pub struct TypeDescriptor {
    pub(crate) id: TypeId,
    pub(crate) name: String,
    pub(crate) package: String,
    pub(crate) qualified_name: String,
    pub(crate) kind: TypeKind,
    pub(crate) modifiers: Modifiers,
    pub(crate) open: bool,
    pub(crate) type_params: Vec<String>,
    pub(crate) superclass: Option<TypeRef>,
    pub(crate) interfaces: Vec<TypeRef>,
    pub(crate) fields: Vec<FieldDescriptor>,
    pub(crate) methods: Vec<MethodDescriptor>,
    pub(crate) nested: Vec<TypeId>,
    pub(crate) enclosing: Option<TypeId>,
    pub(crate) annotations: Vec<Annotation>,
}

impl TypeDescriptor {
    pub(crate) fn new(id: TypeId, package: &str, name: &str, kind: TypeKind) -> Self {
        let qualified_name = if package.is_empty() {
            name.to_string()
        } else {
            format!("{}.{}", package, name)
        };
        Self {
            id,
            name: name.to_string(),
            package: package.to_string(),
            qualified_name,
            kind,
            modifiers: Modifiers::default(),
            open: true,
            type_params: Vec::new(),
            superclass: None,
            interfaces: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            nested: Vec::new(),
            enclosing: None,
            annotations: Vec::new(),
        }
    }

    /// Id of this type
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Simple name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declaring package
    pub fn package(&self) -> &str {
        &self.package
    }

    /// Name unique within the registry (`pkg.Outer$Inner` for nested types)
    pub fn qualified_name(&self) -> &str {
        &self.qualified_name
    }

    /// Kind of type
    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    /// Modifier flags
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Check if this is an interface
    pub fn is_interface(&self) -> bool {
        self.kind == TypeKind::Interface
    }

    /// Check if this is an annotation type
    pub fn is_annotation(&self) -> bool {
        self.kind == TypeKind::Annotation
    }

    /// Check if this is a primitive type
    pub fn is_primitive(&self) -> bool {
        self.kind == TypeKind::Primitive
    }

    /// Check if this type is declared abstract
    pub fn is_abstract(&self) -> bool {
        self.modifiers.is_abstract
    }

    /// Check if this is a static nested type
    pub fn is_static(&self) -> bool {
        self.modifiers.is_static
    }

    /// Whether non-public members may be made accessible reflectively
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Declared type parameter names
    pub fn type_parameters(&self) -> &[String] {
        &self.type_params
    }

    /// Erased superclass; `None` for the root, interfaces and primitives
    pub fn superclass(&self) -> Option<TypeId> {
        self.superclass.as_ref().map(TypeRef::erasure)
    }

    /// Superclass as declared, with its type arguments
    pub fn generic_superclass(&self) -> Option<&TypeRef> {
        self.superclass.as_ref()
    }

    /// Erased directly declared interfaces, in declaration order
    pub fn interfaces(&self) -> impl Iterator<Item = TypeId> + '_ {
        self.interfaces.iter().map(TypeRef::erasure)
    }

    /// Directly declared interfaces as declared, with their type arguments
    pub fn generic_interfaces(&self) -> &[TypeRef] {
        &self.interfaces
    }

    /// Fields declared directly on this type
    pub fn declared_fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Methods declared directly on this type
    pub fn declared_methods(&self) -> &[MethodDescriptor] {
        &self.methods
    }

    /// Types declared directly inside this type
    pub fn declared_types(&self) -> &[TypeId] {
        &self.nested
    }

    /// Type this one is nested in
    pub fn enclosing_type(&self) -> Option<TypeId> {
        self.enclosing
    }

    /// Annotations declared directly on this type
    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }
}

/// Metadata for a declared field
///
/// The accessibility flag starts out set for public fields only. It can be
/// forced on for any field of an open type; see
/// [`AccessGuard`](crate::accessor::AccessGuard).
#[derive(Debug)]
pub struct FieldDescriptor {
    pub(crate) id: FieldId,
    pub(crate) name: String,
    pub(crate) owner_name: String,
    pub(crate) ty: TypeRef,
    pub(crate) visibility: Visibility,
    pub(crate) modifiers: Modifiers,
    pub(crate) annotations: Vec<Annotation>,
    pub(crate) initial_value: Option<Value>,
    pub(crate) owner_open: bool,
    pub(crate) accessible: AtomicBool,
}

impl FieldDescriptor {
    /// Id of this field
    pub fn id(&self) -> FieldId {
        self.id
    }

    /// Declaring type
    pub fn owner(&self) -> TypeId {
        self.id.owner
    }

    /// Simple name of the declaring type
    pub fn owner_name(&self) -> &str {
        &self.owner_name
    }

    /// Declared name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared type, with its type arguments
    pub fn generic_type(&self) -> &TypeRef {
        &self.ty
    }

    /// Erased declared type
    pub fn raw_type(&self) -> TypeId {
        self.ty.erasure()
    }

    /// Declared visibility
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Modifier flags
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Check if this is a static field
    pub fn is_static(&self) -> bool {
        self.modifiers.is_static
    }

    /// Check if this is a final field
    pub fn is_final(&self) -> bool {
        self.modifiers.is_final
    }

    /// Value the field holds before anything is written to it
    pub fn initial_value(&self) -> Option<&Value> {
        self.initial_value.as_ref()
    }

    /// Annotations declared on this field
    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    /// Current accessibility flag
    pub fn is_accessible(&self) -> bool {
        self.accessible.load(Ordering::Acquire)
    }

    /// Set the accessibility flag
    ///
    /// Clearing always succeeds. Setting fails for a non-public field whose
    /// declaring type is not open.
    pub fn set_accessible(&self, flag: bool) -> Result<(), AccessError> {
        if flag && self.visibility != Visibility::Public && !self.owner_open {
            return Err(AccessError::Inaccessible {
                owner: self.owner_name.clone(),
                field: self.name.clone(),
            });
        }
        self.accessible.store(flag, Ordering::Release);
        Ok(())
    }

    pub(crate) fn restore_accessible(&self, prior: bool) {
        self.accessible.store(prior, Ordering::Release);
    }
}

/// Metadata for a declared method
#[derive(Debug, Clone)]
pub struct MethodDescriptor {
    pub(crate) owner: TypeId,
    pub(crate) name: String,
    pub(crate) return_type: TypeRef,
    pub(crate) parameters: Vec<TypeRef>,
    pub(crate) modifiers: Modifiers,
    pub(crate) annotations: Vec<Annotation>,
}

impl MethodDescriptor {
    /// Declaring type
    pub fn owner(&self) -> TypeId {
        self.owner
    }

    /// Declared name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared return type
    pub fn return_type(&self) -> &TypeRef {
        &self.return_type
    }

    /// Declared parameter types
    pub fn parameters(&self) -> &[TypeRef] {
        &self.parameters
    }

    /// Check if this is a static method
    pub fn is_static(&self) -> bool {
        self.modifiers.is_static
    }

    /// Annotations declared on this method
    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }
}
