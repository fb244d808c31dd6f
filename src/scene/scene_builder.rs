//! SceneBuilder - Declarative scene construction
//!
//! Provides a fluent API for building the demo scene: a static floor and
//! cubes that fall under gravity.

use phys3d_math::{mat4, Mat4, Vec3};
use phys3d_physics::{BoundingBox, RigidBody};
use phys3d_render::Mesh;
use crate::config::SceneConfig;

/// A renderable mesh, optionally driven by a rigid body
#[derive(Debug, Clone)]
pub struct SceneObject {
    pub name: String,
    pub mesh: Mesh,
    /// Initial model transform
    pub transform: Mat4,
    /// Dynamic objects move with their body; static ones keep `transform`
    pub body: Option<RigidBody>,
}

impl SceneObject {
    pub fn is_dynamic(&self) -> bool {
        self.body.is_some()
    }
}

/// The objects making up a scene, in insertion order
#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub objects: Vec<SceneObject>,
}

impl Scene {
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn get_by_name(&self, name: &str) -> Option<&SceneObject> {
        self.objects.iter().find(|o| o.name == name)
    }

    /// Number of objects with a rigid body
    pub fn body_count(&self) -> usize {
        self.objects.iter().filter(|o| o.is_dynamic()).count()
    }
}

/// Builder for constructing scenes
///
/// # Example
/// ```ignore
/// let scene = SceneBuilder::new()
///     .add_floor(0.0, 20.0, [0.35, 0.35, 0.4, 1.0])
///     .add_cube(Vec3::new(0.0, 4.0, 0.0), 1.0, [0.9, 0.4, 0.1, 1.0], "cube")
///     .build();
/// ```
pub struct SceneBuilder {
    scene: Scene,
}

impl SceneBuilder {
    /// Create a new scene builder
    pub fn new() -> Self {
        Self {
            scene: Scene::default(),
        }
    }

    /// Build the scene described by config
    pub fn from_config(config: &SceneConfig) -> Self {
        let mut builder = Self::new().add_floor(config.floor_y, config.floor_size, config.floor_color);

        for (i, position) in config.cubes.iter().enumerate() {
            builder = builder.add_cube(
                Vec3::from_array(*position),
                config.cube_size,
                config.cube_color,
                &format!("cube_{}", i),
            );
        }

        builder
    }

    /// Add a static floor at the given Y position
    pub fn add_floor(mut self, y: f32, size: f32, color: [f32; 4]) -> Self {
        self.scene.objects.push(SceneObject {
            name: "floor".to_string(),
            mesh: Mesh::plane(size, color),
            transform: mat4::translation(Vec3::new(0.0, y, 0.0)),
            body: None,
        });
        self
    }

    /// Add a cube that falls from `position`
    ///
    /// The body's bounding box is computed from the cube's vertices.
    pub fn add_cube(mut self, position: Vec3, size: f32, color: [f32; 4], name: &str) -> Self {
        let mesh = Mesh::cube(size, color);
        let bounding_box = BoundingBox::from_points(mesh.positions());
        let body = RigidBody::new(position).with_bounding_box(bounding_box);

        self.scene.objects.push(SceneObject {
            name: name.to_string(),
            mesh,
            transform: mat4::translation(position),
            body: Some(body),
        });
        self
    }

    /// Add a custom object to the scene
    pub fn add_object(mut self, object: SceneObject) -> Self {
        self.scene.objects.push(object);
        self
    }

    /// Build the scene
    pub fn build(self) -> Scene {
        self.scene
    }
}

impl Default for SceneBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_scene() {
        let scene = SceneBuilder::new().build();
        assert_eq!(scene.object_count(), 0);
        assert_eq!(scene.body_count(), 0);
    }

    #[test]
    fn test_scene_with_floor() {
        let scene = SceneBuilder::new()
            .add_floor(-1.0, 10.0, [0.5; 4])
            .build();

        assert_eq!(scene.object_count(), 1);

        let floor = scene.get_by_name("floor").unwrap();
        assert!(!floor.is_dynamic());
        assert_eq!(floor.transform[3][1], -1.0);
        assert_eq!(floor.mesh.triangle_count(), 2);
    }

    #[test]
    fn test_cube_has_body_with_bounds() {
        let scene = SceneBuilder::new()
            .add_cube(Vec3::new(1.0, 4.0, 0.0), 2.0, [1.0; 4], "box")
            .build();

        let cube = scene.get_by_name("box").unwrap();
        let body = cube.body.as_ref().unwrap();
        assert_eq!(body.position, Vec3::new(1.0, 4.0, 0.0));
        assert_eq!(body.velocity, Vec3::ZERO);
        assert_eq!(body.bounding_box.min, Vec3::new(-1.0, -1.0, -1.0));
        assert_eq!(body.bounding_box.max, Vec3::new(1.0, 1.0, 1.0));
        assert_eq!(cube.transform[3][0], 1.0);
        assert_eq!(cube.transform[3][1], 4.0);
    }

    #[test]
    fn test_from_default_config() {
        let scene = SceneBuilder::from_config(&SceneConfig::default()).build();

        // Floor plus one cube
        assert_eq!(scene.object_count(), 2);
        assert_eq!(scene.body_count(), 1);
        assert!(scene.get_by_name("floor").is_some());
        assert!(scene.get_by_name("cube_0").is_some());
    }

    #[test]
    fn test_from_config_multiple_cubes() {
        let config = SceneConfig {
            cubes: vec![[0.0, 4.0, 0.0], [2.0, 6.0, 0.0], [-2.0, 8.0, 1.0]],
            ..SceneConfig::default()
        };
        let scene = SceneBuilder::from_config(&config).build();

        assert_eq!(scene.body_count(), 3);
        let last = scene.get_by_name("cube_2").unwrap();
        assert_eq!(last.body.as_ref().unwrap().position, Vec3::new(-2.0, 8.0, 1.0));
    }
}
