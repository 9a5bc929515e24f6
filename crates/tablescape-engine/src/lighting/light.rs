use glam::Vec3;

use crate::shader::names;
use crate::shader::{UniformSink, UniformValue};

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DirectionalLight {
    pub direction: Vec3,
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
    pub active: bool,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
    pub active: bool,
}

/// One directional light plus any number of point lights.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LightRig {
    pub directional: Option<DirectionalLight>,
    pub points: Vec<PointLight>,
}

impl LightRig {
    /// Writes every light and enables lighting.
    ///
    /// Point lights are written to `pointLights[i]` in order.
    pub fn upload<S: UniformSink + ?Sized>(&self, sink: &mut S) {
        if let Some(light) = &self.directional {
            sink.set_named(names::DIRECTIONAL_DIRECTION, UniformValue::Vec3(light.direction));
            sink.set_named(names::DIRECTIONAL_AMBIENT, UniformValue::Vec3(light.ambient));
            sink.set_named(names::DIRECTIONAL_DIFFUSE, UniformValue::Vec3(light.diffuse));
            sink.set_named(names::DIRECTIONAL_SPECULAR, UniformValue::Vec3(light.specular));
            sink.set_named(names::DIRECTIONAL_ACTIVE, UniformValue::Bool(light.active));
        }

        for (i, light) in self.points.iter().enumerate() {
            sink.set_named(&names::point_light(i, "position"), UniformValue::Vec3(light.position));
            sink.set_named(&names::point_light(i, "ambient"), UniformValue::Vec3(light.ambient));
            sink.set_named(&names::point_light(i, "diffuse"), UniformValue::Vec3(light.diffuse));
            sink.set_named(&names::point_light(i, "specular"), UniformValue::Vec3(light.specular));
            sink.set_named(&names::point_light(i, "bActive"), UniformValue::Bool(light.active));
        }

        sink.set_named(names::USE_LIGHTING, UniformValue::Bool(true));
        log::debug!(
            "uploaded {} directional and {} point lights",
            self.directional.is_some() as usize,
            self.points.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shader::UniformTable;

    #[test]
    fn uploads_all_lights() {
        let rig = LightRig {
            directional: Some(DirectionalLight {
                direction: Vec3::new(-6.0, 5.0, 5.0),
                ambient: Vec3::splat(0.4),
                diffuse: Vec3::splat(0.6),
                specular: Vec3::ZERO,
                active: true,
            }),
            points: vec![PointLight {
                position: Vec3::new(0.0, 15.0, -8.0),
                ambient: Vec3::new(0.03, 0.03, 0.0),
                diffuse: Vec3::new(0.4, 0.4, 0.0),
                specular: Vec3::new(1.0, 1.0, 0.0),
                active: true,
            }],
        };

        let mut sink = UniformTable::new();
        rig.upload(&mut sink);

        assert_eq!(sink.vec3(names::DIRECTIONAL_DIRECTION), Some(Vec3::new(-6.0, 5.0, 5.0)));
        assert_eq!(sink.vec3("pointLights[0].position"), Some(Vec3::new(0.0, 15.0, -8.0)));
        assert_eq!(sink.flag("pointLights[0].bActive"), Some(true));
        assert!(!sink.contains("pointLights[1].position"));
        assert_eq!(sink.flag(names::USE_LIGHTING), Some(true));
    }

    #[test]
    fn empty_rig_only_enables_lighting() {
        let mut sink = UniformTable::new();
        LightRig::default().upload(&mut sink);
        assert_eq!(sink.len(), 1);
    }
}
