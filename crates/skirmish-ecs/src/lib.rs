//! Skirmish ECS - Game objects with stable IDs and transform nodes
//!
//! This crate wraps hecs with stable entity identifiers and binds every
//! game object to one node of the shared `TransformGraph`.

mod world;

pub use world::{ObjectWorld, SceneNode};
