pub mod camera;
pub mod primitives;
pub mod transform;
