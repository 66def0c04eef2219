//! Player skills: slots, activation runes and skill behaviours

mod behavior;
mod component;
mod data;
mod fireball;
mod types;

pub use behavior::{SkillBehavior, SkillContext};
pub use component::{RuneCombo, SkillComponent, SkillInput, SkillSettings, RUNES_PER_SKILL};
pub use data::SkillData;
pub use fireball::FireballBehavior;
pub use types::{ActivationRune, SkillSlot, SkillState};
