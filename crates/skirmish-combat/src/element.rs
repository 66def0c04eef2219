use glam::Vec4;
use serde::{Deserialize, Serialize};

/// Elemental tag carried by skills and projectiles
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Element {
    #[default]
    None,
    Fire,
    Water,
    Wind,
    Earth,
}

impl Element {
    /// Display colour (RGBA)
    pub fn color(self) -> Vec4 {
        match self {
            Element::Fire => Vec4::new(1.0, 0.3, 0.1, 1.0),
            Element::Water => Vec4::new(0.2, 0.5, 1.0, 1.0),
            Element::Wind => Vec4::new(0.7, 1.0, 0.7, 1.0),
            Element::Earth => Vec4::new(0.6, 0.4, 0.2, 1.0),
            Element::None => Vec4::ONE,
        }
    }
}
