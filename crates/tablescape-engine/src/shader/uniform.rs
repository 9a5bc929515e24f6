use std::collections::HashMap;

use glam::{Mat4, Vec2, Vec3, Vec4};

/// A value accepted by the shading stage.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum UniformValue {
    Mat4(Mat4),
    Vec2(Vec2),
    Vec3(Vec3),
    Vec4(Vec4),
    Float(f32),
    Int(i32),
    Bool(bool),
}

macro_rules! impl_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(impl From<$ty> for UniformValue {
            #[inline]
            fn from(v: $ty) -> Self {
                UniformValue::$variant(v)
            }
        })*
    };
}

impl_from!(
    Mat4 => Mat4,
    Vec2 => Vec2,
    Vec3 => Vec3,
    Vec4 => Vec4,
    f32 => Float,
    i32 => Int,
    bool => Bool,
);

/// Destination for named uniform writes.
///
/// Writes are last-write-wins per name. Nothing is reset between draws.
pub trait UniformSink {
    fn set_named(&mut self, name: &str, value: UniformValue);
}

/// Hash-map backed uniform sink.
///
/// This is the resident uniform state handed to
/// [`GraphicsBackend::draw_primitive`](crate::device::GraphicsBackend::draw_primitive).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UniformTable {
    values: HashMap<String, UniformValue>,
    writes: u64,
}

impl UniformTable {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<&UniformValue> {
        self.values.get(name)
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Number of distinct names written so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Total writes, counting overwrites.
    #[inline]
    pub fn writes(&self) -> u64 {
        self.writes
    }

    pub fn mat4(&self, name: &str) -> Option<Mat4> {
        match self.get(name)? {
            UniformValue::Mat4(m) => Some(*m),
            _ => None,
        }
    }

    pub fn vec2(&self, name: &str) -> Option<Vec2> {
        match self.get(name)? {
            UniformValue::Vec2(v) => Some(*v),
            _ => None,
        }
    }

    pub fn vec3(&self, name: &str) -> Option<Vec3> {
        match self.get(name)? {
            UniformValue::Vec3(v) => Some(*v),
            _ => None,
        }
    }

    pub fn vec4(&self, name: &str) -> Option<Vec4> {
        match self.get(name)? {
            UniformValue::Vec4(v) => Some(*v),
            _ => None,
        }
    }

    pub fn float(&self, name: &str) -> Option<f32> {
        match self.get(name)? {
            UniformValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn int(&self, name: &str) -> Option<i32> {
        match self.get(name)? {
            UniformValue::Int(v) => Some(*v),
            UniformValue::Bool(b) => Some(*b as i32),
            _ => None,
        }
    }

    /// Reads a flag. Integer uniforms count as set when non-zero.
    pub fn flag(&self, name: &str) -> Option<bool> {
        match self.get(name)? {
            UniformValue::Bool(b) => Some(*b),
            UniformValue::Int(v) => Some(*v != 0),
            _ => None,
        }
    }
}

impl UniformSink for UniformTable {
    fn set_named(&mut self, name: &str, value: UniformValue) {
        self.writes += 1;
        match self.values.get_mut(name) {
            Some(slot) => *slot = value,
            None => {
                self.values.insert(name.to_owned(), value);
            }
        }
    }
}
