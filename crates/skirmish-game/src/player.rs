use crate::config::PlayerConfig;
use skirmish_combat::SkillSlot;

/// Player character state, stored as a component on the player object
#[derive(Debug, Clone)]
pub struct Player {
    pub hp: f32,
    pub max_hp: f32,
    pub move_speed: f32,
    pub interaction_distance: f32,
    /// Slot that picked-up runes are equipped into
    pub selected_slot: SkillSlot,
}

impl Player {
    pub fn new(config: &PlayerConfig) -> Self {
        Self {
            hp: config.max_hp,
            max_hp: config.max_hp,
            move_speed: config.move_speed,
            interaction_distance: config.interaction_distance,
            selected_slot: SkillSlot::Q,
        }
    }

    pub fn take_damage(&mut self, amount: f32) {
        self.hp = (self.hp - amount).clamp(0.0, self.max_hp);
        tracing::debug!(damage = amount, hp = self.hp, "player took damage");
    }

    pub fn heal(&mut self, amount: f32) {
        self.hp = (self.hp + amount).clamp(0.0, self.max_hp);
    }

    pub fn is_dead(&self) -> bool {
        self.hp <= 0.0
    }

    pub fn hp_ratio(&self) -> f32 {
        if self.max_hp <= 0.0 {
            0.0
        } else {
            self.hp / self.max_hp
        }
    }

    pub fn cycle_slot(&mut self) -> SkillSlot {
        self.selected_slot = self.selected_slot.next();
        tracing::info!(slot = %self.selected_slot, "selected skill slot");
        self.selected_slot
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new(&PlayerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn damage_and_heal_are_clamped() {
        let mut player = Player::default();
        player.take_damage(30.0);
        assert!((player.hp - 70.0).abs() < 1e-6);
        player.heal(500.0);
        assert!((player.hp - 100.0).abs() < 1e-6);
        player.take_damage(250.0);
        assert_eq!(player.hp, 0.0);
        assert!(player.is_dead());
        assert_eq!(player.hp_ratio(), 0.0);
    }

    #[test]
    fn slot_selection_cycles() {
        let mut player = Player::default();
        assert_eq!(player.cycle_slot(), SkillSlot::E);
        assert_eq!(player.cycle_slot(), SkillSlot::R);
        assert_eq!(player.cycle_slot(), SkillSlot::RightClick);
        assert_eq!(player.cycle_slot(), SkillSlot::Q);
    }
}
