use crate::device::PrimitiveKind;

use super::SceneObject;

/// Ordered scene description, drawn front to back in insertion order.
///
/// Order is significant: under the persistent state policy a draw that
/// skips a uniform sees the previous draw's value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompositionList {
    objects: Vec<SceneObject>,
}

impl CompositionList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &SceneObject> {
        self.objects.iter()
    }

    #[inline]
    pub fn push(&mut self, object: SceneObject) {
        self.objects.push(object);
    }

    /// Number of objects drawn with `kind`.
    pub fn count_kind(&self, kind: PrimitiveKind) -> usize {
        self.objects.iter().filter(|o| o.kind == kind).count()
    }
}

impl FromIterator<SceneObject> for CompositionList {
    fn from_iter<I: IntoIterator<Item = SceneObject>>(iter: I) -> Self {
        Self {
            objects: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a CompositionList {
    type Item = &'a SceneObject;
    type IntoIter = std::slice::Iter<'a, SceneObject>;

    fn into_iter(self) -> Self::IntoIter {
        self.objects.iter()
    }
}
