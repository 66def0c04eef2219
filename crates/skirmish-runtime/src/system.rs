//! Runtime system trait

use skirmish_core::Result;

/// A system that can be ticked by the game loop
///
/// Systems are updated in registration order, once per frame, with the
/// clamped frame delta.
pub trait RuntimeSystem<W> {
    /// Called once when the system is first registered
    fn initialize(&mut self, world: &mut W) -> Result<()>;

    /// Called once per frame
    fn update(&mut self, world: &mut W, dt: f64) -> Result<()>;

    /// Called when the system is being shut down
    fn shutdown(&mut self) -> Result<()>;

    /// Human-readable name for this system
    fn name(&self) -> &str;
}
