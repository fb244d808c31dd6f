//! Rigid body types

use phys3d_math::Vec3;

/// Axis-aligned bounding box in the body's local space
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BoundingBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl BoundingBox {
    /// Create a box from explicit corners
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Fold a set of points into a bounding box
    ///
    /// The fold is seeded with the origin, so the result always contains it.
    /// An empty set gives a zero-size box at the origin.
    pub fn from_points<I>(points: I) -> Self
    where
        I: IntoIterator<Item = Vec3>,
    {
        points.into_iter().fold(Self::default(), |bb, p| Self {
            min: bb.min.min_components(p),
            max: bb.max.max_components(p),
        })
    }

    /// Size along each axis
    pub fn extents(&self) -> Vec3 {
        self.max - self.min
    }

    /// Center point of the box
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Check whether a point lies inside (inclusive)
    pub fn contains(&self, p: Vec3) -> bool {
        p.x >= self.min.x
            && p.x <= self.max.x
            && p.y >= self.min.y
            && p.y <= self.max.y
            && p.z >= self.min.z
            && p.z <= self.max.z
    }
}

/// A rigid body with position and velocity
///
/// The bounding box is carried along for debugging and display; the
/// simulation does not resolve collisions with it.
#[derive(Clone, Debug, PartialEq)]
pub struct RigidBody {
    /// Position in world space
    pub position: Vec3,
    /// Velocity in units per second
    pub velocity: Vec3,
    /// Local-space bounding box of the body's mesh
    pub bounding_box: BoundingBox,
}

impl RigidBody {
    /// Create a body at rest
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            bounding_box: BoundingBox::default(),
        }
    }

    /// Set the initial velocity
    pub fn with_velocity(mut self, velocity: Vec3) -> Self {
        self.velocity = velocity;
        self
    }

    /// Set the bounding box
    pub fn with_bounding_box(mut self, bounding_box: BoundingBox) -> Self {
        self.bounding_box = bounding_box;
        self
    }

    /// Bounding box translated to the body's current position
    pub fn world_bounds(&self) -> BoundingBox {
        BoundingBox::new(
            self.bounding_box.min + self.position,
            self.bounding_box.max + self.position,
        )
    }
}
