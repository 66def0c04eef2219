use serde::{Deserialize, Serialize};
use std::fmt;

/// Skill slot, one per input binding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkillSlot {
    Q,
    E,
    R,
    RightClick,
}

impl SkillSlot {
    pub const COUNT: usize = 4;
    pub const ALL: [SkillSlot; Self::COUNT] =
        [SkillSlot::Q, SkillSlot::E, SkillSlot::R, SkillSlot::RightClick];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Next slot in Q, E, R, RightClick order, wrapping
    pub fn next(self) -> SkillSlot {
        Self::ALL[(self.index() + 1) % Self::COUNT]
    }
}

impl fmt::Display for SkillSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SkillSlot::Q => "Q",
            SkillSlot::E => "E",
            SkillSlot::R => "R",
            SkillSlot::RightClick => "RMB",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SkillState {
    #[default]
    Ready,
    Casting,
    Cooldown,
    Disabled,
}

/// Rune equipped on a skill that changes how it is cast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivationRune {
    Instant,
    Charge,
    Channel,
    Place,
    Enhance,
}

impl ActivationRune {
    pub const ALL: [ActivationRune; 5] = [
        ActivationRune::Instant,
        ActivationRune::Charge,
        ActivationRune::Channel,
        ActivationRune::Place,
        ActivationRune::Enhance,
    ];
}

impl fmt::Display for ActivationRune {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_cycle_wraps() {
        assert_eq!(SkillSlot::Q.next(), SkillSlot::E);
        assert_eq!(SkillSlot::RightClick.next(), SkillSlot::Q);
        assert_eq!(SkillSlot::R.index(), 2);
    }
}
