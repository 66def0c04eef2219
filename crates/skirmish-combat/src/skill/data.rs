use crate::element::Element;
use serde::{Deserialize, Serialize};

/// Static tuning for a skill
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillData {
    pub name: String,
    pub element: Element,
    pub damage: f32,
    /// Seconds
    pub cooldown: f32,
    /// Zero for instant casts
    pub cast_time: f32,
    pub range: f32,
    /// Area radius
    pub radius: f32,
    pub mana_cost: f32,
}

impl Default for SkillData {
    fn default() -> Self {
        Self {
            name: String::new(),
            element: Element::None,
            damage: 0.0,
            cooldown: 1.0,
            cast_time: 0.0,
            range: 10.0,
            radius: 0.0,
            mana_cost: 0.0,
        }
    }
}

impl SkillData {
    pub fn fireball() -> Self {
        Self {
            name: "Fireball".into(),
            element: Element::Fire,
            damage: 30.0,
            cooldown: 2.0,
            cast_time: 0.0,
            range: 50.0,
            radius: 3.0,
            mana_cost: 10.0,
        }
    }

    pub fn flame_wave() -> Self {
        Self {
            name: "Flame Wave".into(),
            element: Element::Fire,
            damage: 20.0,
            cooldown: 5.0,
            cast_time: 0.0,
            range: 15.0,
            radius: 8.0,
            mana_cost: 25.0,
        }
    }

    pub fn meteor() -> Self {
        Self {
            name: "Meteor".into(),
            element: Element::Fire,
            damage: 100.0,
            cooldown: 30.0,
            cast_time: 1.5,
            range: 40.0,
            radius: 10.0,
            mana_cost: 50.0,
        }
    }
}
