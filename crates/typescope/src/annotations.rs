//! Annotation queries on types, fields and methods
//!
//! A type's visible annotations are the ones declared on every entry of its
//! ancestor list; a field or method only shows its own. The `with_any` and
//! `with_set` predicates always look at the target's own annotations.

use rustc_hash::FxHashSet;
use typescope_types::{Annotation, TypeId};

use crate::catalog::find_member;
use crate::collections::{has_any_of, is_empty};
use crate::hierarchy::{ancestors_of, is_assignable_from};
use crate::registry::{FieldDescriptor, MethodDescriptor, TypeDescriptor, TypeRegistry};

/// Something annotations can be declared on
pub trait Annotated {
    /// Annotations declared directly on this target
    fn declared_annotations(&self) -> &[Annotation];

    /// Annotations that queries on this target see
    fn visible_annotations<'r>(&'r self, _registry: &'r TypeRegistry) -> Vec<&'r Annotation> {
        self.declared_annotations().iter().collect()
    }
}

impl Annotated for TypeDescriptor {
    fn declared_annotations(&self) -> &[Annotation] {
        self.annotations()
    }

    fn visible_annotations<'r>(&'r self, registry: &'r TypeRegistry) -> Vec<&'r Annotation> {
        annotations_of(registry, self.id())
    }
}

impl Annotated for FieldDescriptor {
    fn declared_annotations(&self) -> &[Annotation] {
        self.annotations()
    }
}

impl Annotated for MethodDescriptor {
    fn declared_annotations(&self) -> &[Annotation] {
        self.annotations()
    }
}

/// Annotations declared on a type and all of its ancestors
pub fn annotations_of(registry: &TypeRegistry, ty: impl Into<Option<TypeId>>) -> Vec<&Annotation> {
    ancestors_of(registry, ty)
        .into_iter()
        .filter_map(|id| registry.get(id))
        .flat_map(|desc| desc.annotations())
        .collect()
}

/// Annotations declared on a field
pub fn field_annotations<'f>(field: impl Into<Option<&'f FieldDescriptor>>) -> &'f [Annotation] {
    field
        .into()
        .map(FieldDescriptor::annotations)
        .unwrap_or_default()
}

/// Annotations of the field named `name` (ignoring case) on a type
pub fn field_annotations_by_name<'r, 'n>(
    registry: &'r TypeRegistry,
    name: impl Into<Option<&'n str>>,
    ty: impl Into<Option<TypeId>>,
) -> &'r [Annotation] {
    field_annotations(find_member(registry, name, ty))
}

/// First visible annotation whose type is `annotation_type` or one of its
/// supertypes
pub fn find_annotation<'r, A>(
    registry: &'r TypeRegistry,
    annotation_type: impl Into<Option<TypeId>>,
    target: impl Into<Option<&'r A>>,
) -> Option<&'r Annotation>
where
    A: Annotated + ?Sized + 'r,
{
    let annotation_type = annotation_type.into()?;
    target
        .into()?
        .visible_annotations(registry)
        .into_iter()
        .find(|ann| is_assignable_from(registry, ann.annotation_type(), annotation_type))
}

/// Check if an annotation of exactly this type is visible on the target
pub fn is_annotated_on<'r, A>(
    registry: &'r TypeRegistry,
    target: impl Into<Option<&'r A>>,
    annotation_type: impl Into<Option<TypeId>>,
) -> bool
where
    A: Annotated + ?Sized + 'r,
{
    let (Some(target), Some(annotation_type)) = (target.into(), annotation_type.into()) else {
        return false;
    };
    target
        .visible_annotations(registry)
        .into_iter()
        .any(|ann| ann.annotation_type() == annotation_type)
}

/// Check if the target declares an annotation of any of the given types
pub fn is_annotated_with_any<'t, A>(target: impl Into<Option<&'t A>>, types: &[TypeId]) -> bool
where
    A: Annotated + ?Sized + 't,
{
    let Some(target) = target.into() else {
        return false;
    };
    match types {
        [] => false,
        [single] => target
            .declared_annotations()
            .iter()
            .any(|ann| ann.annotation_type() == *single),
        _ => has_any_of(types.iter().copied(), own_annotation_types(target)),
    }
}

/// Check if the target declares an annotation whose type is in the set
pub fn is_annotated_with_set<'t, A>(
    target: impl Into<Option<&'t A>>,
    types: Option<&FxHashSet<TypeId>>,
) -> bool
where
    A: Annotated + ?Sized + 't,
{
    let Some(target) = target.into() else {
        return false;
    };
    if is_empty(types) {
        return false;
    }
    types.is_some_and(|types| {
        own_annotation_types(target)
            .into_iter()
            .any(|ty| types.contains(&ty))
    })
}

/// Check if the annotation's type is declared in `package`
pub fn is_of_package<'a, 'p>(
    registry: &TypeRegistry,
    annotation: impl Into<Option<&'a Annotation>>,
    package: impl Into<Option<&'p str>>,
) -> bool {
    let (Some(annotation), Some(package)) = (annotation.into(), package.into()) else {
        return false;
    };
    registry
        .get(annotation.annotation_type())
        .is_some_and(|desc| desc.package() == package)
}

fn own_annotation_types<A>(target: &A) -> FxHashSet<TypeId>
where
    A: Annotated + ?Sized,
{
    target
        .declared_annotations()
        .iter()
        .map(Annotation::annotation_type)
        .collect()
}
