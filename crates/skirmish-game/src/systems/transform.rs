use crate::world::GameWorld;
use skirmish_core::Result;
use skirmish_runtime::RuntimeSystem;

/// Recomputes world matrices once everything has moved for the frame
pub struct TransformSystem;

impl TransformSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TransformSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl RuntimeSystem<GameWorld> for TransformSystem {
    fn initialize(&mut self, world: &mut GameWorld) -> Result<()> {
        world.objects.graph_mut().update_all();
        Ok(())
    }

    fn update(&mut self, world: &mut GameWorld, _dt: f64) -> Result<()> {
        world.objects.graph_mut().update_all();
        Ok(())
    }

    fn shutdown(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "transform"
    }
}
