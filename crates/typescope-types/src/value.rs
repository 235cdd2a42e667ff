//! Dynamic values and instances
//!
//! Instances are shared behind a lock so that member values can be written
//! through a shared reference, as reflective field access requires.

use std::fmt;
use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use rustc_hash::FxHashMap;

use crate::primitive::Primitive;
use crate::ty::{builtin, FieldId, TypeId};

/// A runtime value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Absence of a value
    Null,
    /// `boolean`
    Bool(bool),
    /// `byte`
    Byte(i8),
    /// `char`
    Char(char),
    /// `short`
    Short(i16),
    /// `int`
    Int(i32),
    /// `long`
    Long(i64),
    /// `float`
    Float(f32),
    /// `double`
    Double(f64),
    /// `String`
    Str(String),
    /// `ArrayList` of values
    List(Vec<Value>),
    /// Instance of a registered class
    Object(ObjectRef),
}

impl Value {
    /// Default value of a field declared with the given primitive type
    pub fn default_for(primitive: Primitive) -> Self {
        match primitive {
            Primitive::Boolean => Value::Bool(false),
            Primitive::Byte => Value::Byte(0),
            Primitive::Char => Value::Char('\0'),
            Primitive::Short => Value::Short(0),
            Primitive::Int => Value::Int(0),
            Primitive::Long => Value::Long(0),
            Primitive::Float => Value::Float(0.0),
            Primitive::Double => Value::Double(0.0),
            Primitive::Void => Value::Null,
        }
    }

    /// Check if this is `Null`
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Primitive kind of a primitive value
    pub fn primitive(&self) -> Option<Primitive> {
        match self {
            Value::Bool(_) => Some(Primitive::Boolean),
            Value::Byte(_) => Some(Primitive::Byte),
            Value::Char(_) => Some(Primitive::Char),
            Value::Short(_) => Some(Primitive::Short),
            Value::Int(_) => Some(Primitive::Int),
            Value::Long(_) => Some(Primitive::Long),
            Value::Float(_) => Some(Primitive::Float),
            Value::Double(_) => Some(Primitive::Double),
            _ => None,
        }
    }

    /// Runtime type of the value
    ///
    /// Primitive values report their boxed type, the way a boxed value does
    /// when asked for its class. `Null` has no runtime type.
    pub fn runtime_type(&self) -> Option<TypeId> {
        match self {
            Value::Null => None,
            Value::Bool(_) => Some(builtin::BOOLEAN_WRAPPER),
            Value::Byte(_) => Some(builtin::BYTE_WRAPPER),
            Value::Char(_) => Some(builtin::CHARACTER),
            Value::Short(_) => Some(builtin::SHORT_WRAPPER),
            Value::Int(_) => Some(builtin::INTEGER),
            Value::Long(_) => Some(builtin::LONG_WRAPPER),
            Value::Float(_) => Some(builtin::FLOAT_WRAPPER),
            Value::Double(_) => Some(builtin::DOUBLE_WRAPPER),
            Value::Str(_) => Some(builtin::STRING),
            Value::List(_) => Some(builtin::ARRAY_LIST),
            Value::Object(obj) => Some(obj.class()),
        }
    }

    /// The instance, if this is an object
    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// The string, if this is a `Str`
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// The integer, if this is an `Int`
    pub fn as_int(&self) -> Option<i32> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// The elements, if this is a `List`
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i8> for Value {
    fn from(v: i8) -> Self {
        Value::Byte(v)
    }
}

impl From<char> for Value {
    fn from(v: char) -> Self {
        Value::Char(v)
    }
}

impl From<i16> for Value {
    fn from(v: i16) -> Self {
        Value::Short(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Long(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Double(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::List(v)
    }
}

impl From<ObjectRef> for Value {
    fn from(v: ObjectRef) -> Self {
        Value::Object(v)
    }
}

/// Field storage of a single instance
#[derive(Debug, Clone)]
pub struct Object {
    class: TypeId,
    slots: FxHashMap<FieldId, Value>,
}

impl Object {
    /// Create an instance with no slots
    pub fn new(class: TypeId) -> Self {
        Self {
            class,
            slots: FxHashMap::default(),
        }
    }

    /// Class of the instance
    pub fn class(&self) -> TypeId {
        self.class
    }

    /// Current value of a slot
    pub fn get(&self, field: FieldId) -> Option<&Value> {
        self.slots.get(&field)
    }

    /// Store a value into a slot, returning the previous one
    pub fn put(&mut self, field: FieldId, value: Value) -> Option<Value> {
        self.slots.insert(field, value)
    }

    /// Check if the instance carries a slot for the field
    pub fn has_slot(&self, field: FieldId) -> bool {
        self.slots.contains_key(&field)
    }

    /// Number of slots
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }
}

/// Shared handle to an instance
///
/// Equality is identity: two handles are equal iff they point to the same
/// instance.
#[derive(Clone)]
pub struct ObjectRef(Arc<RwLock<Object>>);

impl ObjectRef {
    /// Wrap an instance
    pub fn new(object: Object) -> Self {
        ObjectRef(Arc::new(RwLock::new(object)))
    }

    /// Class of the instance
    pub fn class(&self) -> TypeId {
        self.0.read().class
    }

    /// Lock the instance for reading
    pub fn read(&self) -> RwLockReadGuard<'_, Object> {
        self.0.read()
    }

    /// Lock the instance for writing
    pub fn write(&self) -> RwLockWriteGuard<'_, Object> {
        self.0.write()
    }

    /// Check if both handles point to the same instance
    pub fn ptr_eq(&self, other: &ObjectRef) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for ObjectRef {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

// Slots are not printed: instances may reference themselves.
impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectRef({} @ {:p})", self.class(), Arc::as_ptr(&self.0))
    }
}
