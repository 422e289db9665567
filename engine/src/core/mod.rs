pub mod camera;
pub mod coordinates;
pub mod entity;
pub mod geometry;
