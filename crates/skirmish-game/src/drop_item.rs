//! Rune rewards left behind by cleared rooms

use glam::Vec3;
use rand::seq::SliceRandom;
use rand::Rng;
use skirmish_combat::ActivationRune;

pub const RUNE_CHOICES: usize = 3;
pub const BOB_SPEED: f32 = 2.0;
pub const BOB_AMPLITUDE: f32 = 0.3;
pub const INTERACT_PROMPT: &str = "[F] Interact";

/// Something the player can use by standing close and pressing interact
#[derive(Debug, Clone)]
pub struct Interactable {
    pub distance: f32,
    pub prompt: String,
    pub active: bool,
}

impl Interactable {
    pub fn new(distance: f32) -> Self {
        Self {
            distance,
            prompt: INTERACT_PROMPT.to_string(),
            active: true,
        }
    }

    /// Straight-line distance check, height included
    pub fn in_range(&self, own_position: Vec3, player_position: Vec3) -> bool {
        self.active && own_position.distance(player_position) <= self.distance
    }
}

/// A floating pickup offering three distinct activation runes
#[derive(Debug, Clone)]
pub struct DropItem {
    pub room: usize,
    options: [ActivationRune; RUNE_CHOICES],
    base_y: f32,
    time: f32,
    active: bool,
}

impl DropItem {
    pub fn new<R: Rng + ?Sized>(rng: &mut R, room: usize, base_y: f32) -> Self {
        let mut runes = ActivationRune::ALL;
        runes.shuffle(rng);
        let options = [runes[0], runes[1], runes[2]];
        tracing::debug!(room, ?options, "rolled drop options");
        Self {
            room,
            options,
            base_y,
            time: 0.0,
            active: true,
        }
    }

    pub fn options(&self) -> &[ActivationRune; RUNE_CHOICES] {
        &self.options
    }

    pub fn option(&self, index: usize) -> Option<ActivationRune> {
        self.options.get(index).copied()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Advance the bob animation and return the new height
    pub fn bob(&mut self, dt: f32) -> f32 {
        self.time += dt;
        self.base_y + (self.time * BOB_SPEED).sin() * BOB_AMPLITUDE
    }

    /// Claim one option. The drop deactivates, so a second call yields nothing.
    pub fn take(&mut self, index: usize) -> Option<ActivationRune> {
        if !self.active {
            return None;
        }
        let rune = self.option(index)?;
        self.active = false;
        Some(rune)
    }
}
