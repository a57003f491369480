//! 场景：相机与静态场景搭建

pub mod camera;
pub mod setup;

pub use camera::Camera;
pub use setup::{build_static_particles, Ground};
