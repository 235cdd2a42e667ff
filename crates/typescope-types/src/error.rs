//! Introspection errors

use thiserror::Error;

use crate::ty::TypeId;

/// Errors raised by fail-fast introspection operations
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ReflectError {
    /// A type was required but none was given
    #[error("Type should not be absent.")]
    AbsentType,

    /// A primitive type has no entry in the wrapper table
    #[error("Can not find the wrapper class of {name}.")]
    WrapperNotFound {
        /// Canonical name of the primitive
        name: String,
    },

    /// The id does not belong to the registry
    #[error("Unknown type: {id}")]
    UnknownType {
        /// Offending id
        id: TypeId,
    },
}

/// Errors raised by raw field reads and writes
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AccessError {
    /// The field is not accessible and no override is in effect
    #[error("Cannot access field {owner}.{field}")]
    IllegalAccess {
        /// Declaring type name
        owner: String,
        /// Field name
        field: String,
    },

    /// The declaring type does not allow its members to be made accessible
    #[error("Unable to make field {owner}.{field} accessible: {owner} is not open")]
    Inaccessible {
        /// Declaring type name
        owner: String,
        /// Field name
        field: String,
    },

    /// The instance is not of the field's declaring type
    #[error("Field {owner}.{field} is not declared on instances of {class}")]
    NotDeclaredOn {
        /// Declaring type name
        owner: String,
        /// Field name
        field: String,
        /// Class of the instance
        class: String,
    },

    /// Static final fields are never writable
    #[error("Cannot set static final field {owner}.{field}")]
    StaticFinal {
        /// Declaring type name
        owner: String,
        /// Field name
        field: String,
    },

    /// The value does not fit the declared type of the field
    #[error("Cannot set field {field} of type {expected} to a value of type {actual}")]
    TypeMismatch {
        /// Field name
        field: String,
        /// Declared type name
        expected: String,
        /// Runtime type name of the value
        actual: String,
    },
}

/// Errors raised while building a registry or instantiating its types
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RegistryError {
    /// A type with the same qualified name already exists
    #[error("Duplicate type: {name}")]
    DuplicateType {
        /// Qualified name
        name: String,
    },

    /// A referenced id does not belong to the registry
    #[error("Unknown type: {id}")]
    UnknownType {
        /// Offending id
        id: TypeId,
    },

    /// A superclass reference does not name a class
    #[error("{name} cannot be extended: not a class")]
    NotAClass {
        /// Name of the referenced type
        name: String,
    },

    /// An implemented type does not name an interface
    #[error("{name} cannot be implemented: not an interface")]
    NotAnInterface {
        /// Name of the referenced type
        name: String,
    },

    /// An attached annotation's type is not an annotation type
    #[error("{name} is not an annotation type")]
    NotAnAnnotation {
        /// Name of the referenced type
        name: String,
    },

    /// Two fields of one type share a name
    #[error("Duplicate field {field} in {owner}")]
    DuplicateField {
        /// Declaring type name
        owner: String,
        /// Field name
        field: String,
    },

    /// A field's initial value does not fit its declared type
    #[error("Invalid initial value for field {field} in {owner}")]
    InvalidInitialValue {
        /// Declaring type name
        owner: String,
        /// Field name
        field: String,
    },

    /// Interfaces, annotations, primitives and abstract classes have no instances
    #[error("Cannot instantiate {name}")]
    NotInstantiable {
        /// Type name
        name: String,
    },
}

/// Failure of a dotted path resolution, naming where it stopped
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PathError {
    /// No member matches the segment on the current value's type
    #[error("No member '{segment}' at position {position}")]
    MissingMember {
        /// Segment text
        segment: String,
        /// Zero-based segment index
        position: usize,
    },

    /// The member exists but its value is absent or unreadable
    #[error("Member '{segment}' at position {position} has no value")]
    AbsentValue {
        /// Segment text
        segment: String,
        /// Zero-based segment index
        position: usize,
    },
}
