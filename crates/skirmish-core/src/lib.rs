//! Skirmish Core - Foundational types for the Skirmish simulation
//!
//! This crate provides the core types that all other Skirmish crates depend on:
//! - `EntityId` - Stable game object identifiers
//! - `TransformGraph`, `NodeId` - Hierarchical transform arena
//! - XZ-plane math helpers over `glam`
//! - Error types and Result alias

mod error;
mod id;
pub mod math;
mod transform;

pub use error::{Result, SkirmishError};
pub use glam::{Mat4, Quat, Vec2, Vec3, Vec4};
pub use id::EntityId;
pub use transform::{NodeId, Rotation, TransformGraph, TransformNode};
