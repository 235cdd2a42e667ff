//! Core type handles for the typescope registry

use std::fmt;

/// Unique identifier for a type in a registry
///
/// Identity of a type is identity of its id: two ids are the same type iff
/// they are equal. Ids are only meaningful for the registry that issued them,
/// except for the well-known ids in [`builtin`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(pub(crate) u32);

impl TypeId {
    /// Create a type id from a raw registry index
    pub const fn new(index: u32) -> Self {
        TypeId(index)
    }

    /// Registry index of this id
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeId({})", self.0)
    }
}

/// Identifier of a field: its declaring type and declaration slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldId {
    /// Declaring type
    pub owner: TypeId,
    /// Position among the owner's declared fields
    pub slot: u32,
}

impl FieldId {
    /// Create a field id
    pub const fn new(owner: TypeId, slot: u32) -> Self {
        FieldId { owner, slot }
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.owner, self.slot)
    }
}

/// Well-known type ids registered by every registry on bootstrap
///
/// These must match the registration order in the registry bootstrap.
pub mod builtin {
    use super::TypeId;

    /// Root class; the only class without a superclass
    pub const OBJECT: TypeId = TypeId(0);

    /// `boolean`
    pub const BOOLEAN: TypeId = TypeId(1);
    /// `byte`
    pub const BYTE: TypeId = TypeId(2);
    /// `char`
    pub const CHAR: TypeId = TypeId(3);
    /// `short`
    pub const SHORT: TypeId = TypeId(4);
    /// `int`
    pub const INT: TypeId = TypeId(5);
    /// `long`
    pub const LONG: TypeId = TypeId(6);
    /// `float`
    pub const FLOAT: TypeId = TypeId(7);
    /// `double`
    pub const DOUBLE: TypeId = TypeId(8);
    /// `void`
    pub const VOID: TypeId = TypeId(9);

    /// Abstract superclass of the numeric wrappers
    pub const NUMBER: TypeId = TypeId(10);

    /// Boxed `boolean`
    pub const BOOLEAN_WRAPPER: TypeId = TypeId(11);
    /// Boxed `byte`
    pub const BYTE_WRAPPER: TypeId = TypeId(12);
    /// Boxed `char`
    pub const CHARACTER: TypeId = TypeId(13);
    /// Boxed `short`
    pub const SHORT_WRAPPER: TypeId = TypeId(14);
    /// Boxed `int`
    pub const INTEGER: TypeId = TypeId(15);
    /// Boxed `long`
    pub const LONG_WRAPPER: TypeId = TypeId(16);
    /// Boxed `float`
    pub const FLOAT_WRAPPER: TypeId = TypeId(17);
    /// Boxed `double`
    pub const DOUBLE_WRAPPER: TypeId = TypeId(18);
    /// Boxed `void`
    pub const VOID_WRAPPER: TypeId = TypeId(19);

    /// `String`
    pub const STRING: TypeId = TypeId(20);
    /// Root interface implemented by every annotation type
    pub const ANNOTATION: TypeId = TypeId(21);
    /// `Iterable<T>`
    pub const ITERABLE: TypeId = TypeId(22);
    /// `Collection<E> extends Iterable<E>`
    pub const COLLECTION: TypeId = TypeId(23);
    /// `List<E> extends Collection<E>`
    pub const LIST: TypeId = TypeId(24);
    /// `Set<E> extends Collection<E>`
    pub const SET: TypeId = TypeId(25);
    /// `ArrayList<E> implements List<E>`
    pub const ARRAY_LIST: TypeId = TypeId(26);
    /// `HashSet<E> implements Set<E>`
    pub const HASH_SET: TypeId = TypeId(27);

    /// Number of builtin types; user types start at this index
    pub const COUNT: u32 = 28;
}

/// Kind of a registered type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// Class (has a superclass unless it is the root)
    Class,
    /// Interface (never has a superclass)
    Interface,
    /// Annotation type; implements the builtin annotation interface
    Annotation,
    /// Primitive value type
    Primitive,
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeKind::Class => write!(f, "class"),
            TypeKind::Interface => write!(f, "interface"),
            TypeKind::Annotation => write!(f, "annotation"),
            TypeKind::Primitive => write!(f, "primitive"),
        }
    }
}

/// Member visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Visibility {
    /// Accessible from anywhere
    Public,
    /// Accessible from subclasses
    Protected,
    /// Accessible from the declaring package
    #[default]
    Package,
    /// Accessible from the declaring type only
    Private,
}

/// Modifier flags for types and members
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    /// Static member or static nested type
    pub is_static: bool,
    /// Final member or type
    pub is_final: bool,
    /// Abstract type or method
    pub is_abstract: bool,
}

/// A possibly parameterized reference to a type
///
/// This is what a declaration mentions (`List<String>`, `T`, `?`), as opposed
/// to the bare [`TypeId`] of a declared type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    /// A plain, non-generic reference
    Class(TypeId),
    /// A generic instantiation: `raw<args...>`
    Parameterized {
        /// The generic type being instantiated
        raw: TypeId,
        /// Actual type arguments in declaration order
        args: Vec<TypeRef>,
    },
    /// A type variable such as `T`
    Variable(String),
    /// A wildcard argument `?`
    Wildcard,
}

impl TypeRef {
    /// Reference to a non-generic type
    pub fn class(id: TypeId) -> Self {
        TypeRef::Class(id)
    }

    /// Generic instantiation of `raw` with the given arguments
    pub fn parameterized(raw: TypeId, args: impl IntoIterator<Item = TypeRef>) -> Self {
        TypeRef::Parameterized {
            raw,
            args: args.into_iter().collect(),
        }
    }

    /// Type variable reference
    pub fn variable(name: impl Into<String>) -> Self {
        TypeRef::Variable(name.into())
    }

    /// Erased type: the raw type, or the root class for variables and wildcards
    pub fn erasure(&self) -> TypeId {
        match self {
            TypeRef::Class(id) => *id,
            TypeRef::Parameterized { raw, .. } => *raw,
            TypeRef::Variable(_) | TypeRef::Wildcard => builtin::OBJECT,
        }
    }

    /// Actual type arguments; empty unless parameterized
    pub fn type_arguments(&self) -> &[TypeRef] {
        match self {
            TypeRef::Parameterized { args, .. } => args,
            _ => &[],
        }
    }

    /// Check if this reference is a generic instantiation
    pub fn is_parameterized(&self) -> bool {
        matches!(self, TypeRef::Parameterized { .. })
    }

    /// The referenced type if this is a plain class reference
    pub fn as_class(&self) -> Option<TypeId> {
        match self {
            TypeRef::Class(id) => Some(*id),
            _ => None,
        }
    }
}

impl From<TypeId> for TypeRef {
    fn from(id: TypeId) -> Self {
        TypeRef::Class(id)
    }
}
