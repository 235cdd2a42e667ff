//! Primitive value types and the primitive-to-wrapper table

use std::fmt;

use once_cell::sync::Lazy;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::ty::{builtin, TypeId};

/// Builtin primitive types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    /// `boolean`
    Boolean,
    /// `byte`
    Byte,
    /// `char`
    Char,
    /// `short`
    Short,
    /// `int`
    Int,
    /// `long`
    Long,
    /// `float`
    Float,
    /// `double`
    Double,
    /// `void`
    Void,
}

impl Primitive {
    /// Every builtin primitive, in builtin id order
    pub const ALL: [Primitive; 9] = [
        Primitive::Boolean,
        Primitive::Byte,
        Primitive::Char,
        Primitive::Short,
        Primitive::Int,
        Primitive::Long,
        Primitive::Float,
        Primitive::Double,
        Primitive::Void,
    ];

    /// Canonical name, as used for wrapper lookup
    pub fn name(self) -> &'static str {
        match self {
            Primitive::Boolean => "boolean",
            Primitive::Byte => "byte",
            Primitive::Char => "char",
            Primitive::Short => "short",
            Primitive::Int => "int",
            Primitive::Long => "long",
            Primitive::Float => "float",
            Primitive::Double => "double",
            Primitive::Void => "void",
        }
    }

    /// Builtin id of this primitive type
    pub fn type_id(self) -> TypeId {
        match self {
            Primitive::Boolean => builtin::BOOLEAN,
            Primitive::Byte => builtin::BYTE,
            Primitive::Char => builtin::CHAR,
            Primitive::Short => builtin::SHORT,
            Primitive::Int => builtin::INT,
            Primitive::Long => builtin::LONG,
            Primitive::Float => builtin::FLOAT,
            Primitive::Double => builtin::DOUBLE,
            Primitive::Void => builtin::VOID,
        }
    }

    /// Builtin primitive for an id, if the id is one
    pub fn from_type_id(id: TypeId) -> Option<Self> {
        Primitive::ALL.into_iter().find(|p| p.type_id() == id)
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Primitive canonical name -> boxed type
static PRIMITIVE_WRAPPERS: Lazy<FxHashMap<&'static str, TypeId>> = Lazy::new(|| {
    [
        ("boolean", builtin::BOOLEAN_WRAPPER),
        ("byte", builtin::BYTE_WRAPPER),
        ("char", builtin::CHARACTER),
        ("short", builtin::SHORT_WRAPPER),
        ("int", builtin::INTEGER),
        ("long", builtin::LONG_WRAPPER),
        ("double", builtin::DOUBLE_WRAPPER),
        ("float", builtin::FLOAT_WRAPPER),
        ("void", builtin::VOID_WRAPPER),
    ]
    .into_iter()
    .collect()
});

static WRAPPER_TYPES: Lazy<FxHashSet<TypeId>> =
    Lazy::new(|| PRIMITIVE_WRAPPERS.values().copied().collect());

/// Boxed type for a primitive canonical name
pub fn wrapper_for(primitive_name: &str) -> Option<TypeId> {
    PRIMITIVE_WRAPPERS.get(primitive_name).copied()
}

/// Check if a type is one of the boxed primitive types
pub fn is_wrapper(id: TypeId) -> bool {
    WRAPPER_TYPES.contains(&id)
}
