//! Annotation instances

use crate::ty::TypeId;
use crate::value::Value;

/// An annotation attached to a type, field or method
///
/// Carries its annotation type and named element values. Immutable once
/// attached to a declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    annotation_type: TypeId,
    elements: Vec<(String, Value)>,
}

impl Annotation {
    /// Create a marker annotation of the given annotation type
    pub fn new(annotation_type: TypeId) -> Self {
        Self {
            annotation_type,
            elements: Vec::new(),
        }
    }

    /// Add an element value
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.elements.push((name.into(), value.into()));
        self
    }

    /// Type of this annotation
    pub fn annotation_type(&self) -> TypeId {
        self.annotation_type
    }

    /// Value of an element by name
    pub fn element(&self, name: &str) -> Option<&Value> {
        self.elements
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    /// All element values in declaration order
    pub fn elements(&self) -> &[(String, Value)] {
        &self.elements
    }
}
