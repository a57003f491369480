//! # Particle Engine
//!
//! A small real-time 3D particle simulation core: spheres fall under gravity, bounce off
//! fixed spheres and each other, and can be picked off the screen with a mouse ray.
//!
//! ## Features
//!
//! - **Bounding spheres**: overlap, contact normal, penetration depth and ray queries
//! - **Collision response**: dynamic-static reflection and equal-mass dynamic-dynamic impulses
//! - **Picking**: screen point to world ray through an abstract camera
//! - **Frame driver**: spawn/pick events, integration, ordering, resolution and draw requests
//! - **Configuration**: TOML/JSON files with environment overrides
//!
//! ## Architecture Design
//!
//! The crate keeps the engine's layering:
//! - **Domain**: rich entities (`Particle`, `BoundingBody`) that guard their own invariants
//! - **Service**: stateless logic with associated functions (`CollisionService`, `PickingService`)
//! - **Context**: `SimulationContext` owns every piece of mutable state; there are no globals
//!
//! ### Example
//!
//! ```rust
//! use particle_engine::config::SimulationConfig;
//! use particle_engine::simulation::{FrameInput, SimulationContext};
//!
//! let mut config = SimulationConfig::default();
//! config.seed = Some(7);
//! let mut context = SimulationContext::new(config)?;
//!
//! let report = context.step(&FrameInput::new().spawn())?;
//! assert_eq!(report.spawned, 3);
//! assert_eq!(context.draw_list().len(), report.draw_calls);
//! # Ok::<(), particle_engine::core::EngineError>(())
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Errors, logging, fixed timestep and the headless host loop
//! - [`config`]: Simulation configuration
//! - [`math`]: Vector/matrix helpers on top of `glam`
//! - [`domain`]: Particles and bounding volumes
//! - [`physics`]: Collision response and picking
//! - [`render`]: Draw requests handed to an external renderer
//! - [`scene`]: Camera and static scene setup
//! - [`simulation`]: Per-frame driver

/// Core functionality: errors, logging, timestep and the host loop
pub mod core;
/// Configuration system
pub mod config;
/// Math helpers
pub mod math;
/// Domain entities and errors
pub mod domain;
/// Collision response and ray picking
pub mod physics;
/// Renderer-facing draw data
pub mod render;
/// Camera and scene setup
pub mod scene;
/// Simulation context and frame driver
pub mod simulation;
