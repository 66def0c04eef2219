use super::behavior::{SkillBehavior, SkillContext};
use super::types::{ActivationRune, SkillSlot, SkillState};
use glam::Vec3;
use serde::{Deserialize, Serialize};

pub const RUNES_PER_SKILL: usize = 3;

/// Tuning for charge, channel and enhance activation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillSettings {
    /// Seconds to reach full charge
    pub max_charge_time: f32,
    pub channel_duration: f32,
    /// Seconds between channel ticks
    pub channel_tick_rate: f32,
    pub enhance_duration: f32,
    pub enhance_multiplier: f32,
}

impl Default for SkillSettings {
    fn default() -> Self {
        Self {
            max_charge_time: 1.5,
            channel_duration: 2.0,
            channel_tick_rate: 0.2,
            enhance_duration: 5.0,
            enhance_multiplier: 2.0,
        }
    }
}

/// Held state of each slot's binding this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SkillInput {
    pub held: [bool; SkillSlot::COUNT],
}

impl SkillInput {
    pub fn holding(slots: &[SkillSlot]) -> Self {
        let mut input = Self::default();
        for slot in slots {
            input.held[slot.index()] = true;
        }
        input
    }

    pub fn is_held(&self, slot: SkillSlot) -> bool {
        self.held[slot.index()]
    }
}

/// Which runes are present on a skill
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RuneCombo {
    pub instant: bool,
    pub charge: bool,
    pub channel: bool,
    pub place: bool,
    pub enhance: bool,
    pub count: usize,
}

impl RuneCombo {
    /// Enhance with no other rune acts as a self buff
    pub fn is_enhance_only(&self) -> bool {
        self.enhance && !self.instant && !self.charge && !self.channel && !self.place
    }

    /// A Place rune turns a multiplier into a trap multiplier
    fn shape(&self, multiplier: f32) -> f32 {
        if self.place {
            -(multiplier * 1.5)
        } else {
            multiplier
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Charge {
    slot: SkillSlot,
    time: f32,
    target: Vec3,
}

#[derive(Debug, Clone, Copy)]
struct Channel {
    time: f32,
    tick_accum: f32,
    target: Vec3,
}

/// The player's four skill slots with their cooldowns and runes.
///
/// At most one slot is ever casting. While a charge or channel is held,
/// presses on other slots are ignored.
pub struct SkillComponent {
    settings: SkillSettings,
    skills: [Option<Box<dyn SkillBehavior>>; SkillSlot::COUNT],
    cooldowns: [f32; SkillSlot::COUNT],
    states: [SkillState; SkillSlot::COUNT],
    runes: [[Option<ActivationRune>; RUNES_PER_SKILL]; SkillSlot::COUNT],
    active: Option<SkillSlot>,
    charging: Option<Charge>,
    channel: Option<Channel>,
    enhance_timer: f32,
}

impl Default for SkillComponent {
    fn default() -> Self {
        Self::new(SkillSettings::default())
    }
}

impl SkillComponent {
    pub fn new(settings: SkillSettings) -> Self {
        Self {
            settings,
            skills: Default::default(),
            cooldowns: [0.0; SkillSlot::COUNT],
            states: [SkillState::Ready; SkillSlot::COUNT],
            runes: [[None; RUNES_PER_SKILL]; SkillSlot::COUNT],
            active: None,
            charging: None,
            channel: None,
            enhance_timer: 0.0,
        }
    }

    pub fn settings(&self) -> &SkillSettings {
        &self.settings
    }

    pub fn equip(&mut self, slot: SkillSlot, skill: Box<dyn SkillBehavior>) {
        let i = slot.index();
        tracing::debug!(%slot, skill = %skill.data().name, "skill equipped");
        self.skills[i] = Some(skill);
        self.cooldowns[i] = 0.0;
        self.states[i] = SkillState::Ready;
    }

    pub fn unequip(&mut self, slot: SkillSlot) -> Option<Box<dyn SkillBehavior>> {
        let i = slot.index();
        self.cooldowns[i] = 0.0;
        self.states[i] = SkillState::Ready;
        self.skills[i].take()
    }

    pub fn skill(&self, slot: SkillSlot) -> Option<&dyn SkillBehavior> {
        self.skills[slot.index()].as_deref()
    }

    pub fn is_ready(&self, slot: SkillSlot) -> bool {
        self.skills[slot.index()].is_some() && self.states[slot.index()] == SkillState::Ready
    }

    pub fn state(&self, slot: SkillSlot) -> SkillState {
        self.states[slot.index()]
    }

    pub fn cooldown_remaining(&self, slot: SkillSlot) -> f32 {
        self.cooldowns[slot.index()]
    }

    /// 0 right after use, 1 when ready or when the slot is empty
    pub fn cooldown_progress(&self, slot: SkillSlot) -> f32 {
        let Some(skill) = self.skill(slot) else {
            return 1.0;
        };
        let cooldown = skill.data().cooldown;
        if cooldown <= 0.0 {
            return 1.0;
        }
        1.0 - self.cooldowns[slot.index()] / cooldown
    }

    // --- Runes ---

    /// Out-of-range rune indices are ignored
    pub fn set_rune(&mut self, slot: SkillSlot, index: usize, rune: Option<ActivationRune>) {
        if index >= RUNES_PER_SKILL {
            return;
        }
        self.runes[slot.index()][index] = rune;
        tracing::info!(%slot, rune_slot = index + 1, ?rune, "rune set");
    }

    pub fn rune(&self, slot: SkillSlot, index: usize) -> Option<ActivationRune> {
        self.runes[slot.index()].get(index).copied().flatten()
    }

    pub fn clear_rune(&mut self, slot: SkillSlot, index: usize) {
        self.set_rune(slot, index, None);
    }

    pub fn equipped_rune_count(&self, slot: SkillSlot) -> usize {
        self.runes[slot.index()].iter().flatten().count()
    }

    pub fn first_empty_rune_slot(&self, slot: SkillSlot) -> Option<usize> {
        self.runes[slot.index()].iter().position(Option::is_none)
    }

    pub fn rune_combo(&self, slot: SkillSlot) -> RuneCombo {
        let mut combo = RuneCombo::default();
        for rune in self.runes[slot.index()].iter().flatten() {
            match rune {
                ActivationRune::Instant => combo.instant = true,
                ActivationRune::Charge => combo.charge = true,
                ActivationRune::Channel => combo.channel = true,
                ActivationRune::Place => combo.place = true,
                ActivationRune::Enhance => combo.enhance = true,
            }
            combo.count += 1;
        }
        combo
    }

    /// Dominant activation: Charge > Channel > Place > Enhance > Instant
    pub fn activation_type(&self, slot: SkillSlot) -> ActivationRune {
        let combo = self.rune_combo(slot);
        if combo.charge {
            ActivationRune::Charge
        } else if combo.channel {
            ActivationRune::Channel
        } else if combo.place {
            ActivationRune::Place
        } else if combo.enhance {
            ActivationRune::Enhance
        } else {
            ActivationRune::Instant
        }
    }

    // --- Casting state ---

    pub fn is_charging(&self) -> bool {
        self.charging.is_some()
    }

    pub fn charge_progress(&self) -> f32 {
        match &self.charging {
            Some(charge) => (charge.time / self.settings.max_charge_time).min(1.0),
            None => 0.0,
        }
    }

    pub fn is_channeling(&self) -> bool {
        self.channel.is_some()
    }

    pub fn is_enhanced(&self) -> bool {
        self.enhance_timer > 0.0
    }

    pub fn enhance_remaining(&self) -> f32 {
        self.enhance_timer
    }

    pub fn active_slot(&self) -> Option<SkillSlot> {
        self.active
    }

    /// Multiply by the enhance buff if it is up, consuming it
    fn consume_enhance(&mut self, multiplier: f32) -> f32 {
        if self.is_enhanced() {
            self.enhance_timer = 0.0;
            tracing::debug!("enhancement consumed");
            multiplier * self.settings.enhance_multiplier
        } else {
            multiplier
        }
    }

    fn start_cooldown(&mut self, slot: SkillSlot, scale: f32) {
        let i = slot.index();
        if let Some(skill) = self.skills[i].as_mut() {
            self.cooldowns[i] = skill.data().cooldown * scale;
            self.states[i] = SkillState::Cooldown;
            skill.reset();
        }
    }

    fn execute(&mut self, slot: SkillSlot, ctx: &mut SkillContext<'_>, target: Vec3, multiplier: f32) {
        if let Some(skill) = self.skills[slot.index()].as_mut() {
            skill.execute(ctx, target, multiplier);
        }
    }

    /// Handle this frame's held keys. `target` is the aimed ground point.
    pub fn process_input(&mut self, input: &SkillInput, target: Vec3, ctx: &mut SkillContext<'_>) {
        if let Some(charge) = self.charging {
            if !input.is_held(charge.slot) {
                self.release_charge(charge, ctx);
            }
            return;
        }

        if self.channel.is_some() {
            if let Some(slot) = self.active {
                if !input.is_held(slot) {
                    tracing::info!(%slot, "channel interrupted");
                    self.channel = None;
                    self.start_cooldown(slot, 0.5);
                    self.active = None;
                }
            }
            return;
        }

        if self.active.is_some() {
            return;
        }

        // One skill per frame, first held slot wins
        if let Some(slot) = SkillSlot::ALL.into_iter().find(|&s| input.is_held(s)) {
            self.activate(slot, target, ctx);
        }
    }

    fn release_charge(&mut self, charge: Charge, ctx: &mut SkillContext<'_>) {
        self.charging = None;
        let slot = charge.slot;
        let i = slot.index();
        if self.skills[i].is_none() {
            return;
        }

        let combo = self.rune_combo(slot);
        let ratio = (charge.time / self.settings.max_charge_time).min(1.0);
        let mut multiplier = 1.0 + ratio * 2.0;
        if combo.enhance {
            multiplier *= 2.0;
        }
        multiplier = self.consume_enhance(multiplier);
        tracing::info!(%slot, charge = ratio, multiplier, "charge released");

        self.execute(slot, ctx, charge.target, combo.shape(multiplier));
        self.states[i] = SkillState::Casting;
        self.active = Some(slot);
        if let Some(skill) = &self.skills[i] {
            self.cooldowns[i] = skill.data().cooldown;
        }
    }

    fn activate(&mut self, slot: SkillSlot, target: Vec3, ctx: &mut SkillContext<'_>) {
        let i = slot.index();
        if self.skills[i].is_none() || self.states[i] != SkillState::Ready {
            return;
        }

        let combo = self.rune_combo(slot);
        if combo.charge {
            self.charging = Some(Charge {
                slot,
                time: 0.0,
                target,
            });
            self.states[i] = SkillState::Casting;
            tracing::debug!(%slot, "charging");
        } else if combo.channel {
            self.channel = Some(Channel {
                time: 0.0,
                tick_accum: 0.0,
                target,
            });
            self.active = Some(slot);
            self.states[i] = SkillState::Casting;
            tracing::debug!(%slot, "channeling");

            // First tick fires immediately and may use the buff
            let mut tick = self.channel_tick_multiplier(&combo);
            tick = self.consume_enhance(tick);
            self.execute(slot, ctx, target, combo.shape(tick));
        } else if combo.is_enhance_only() {
            self.enhance_timer = self.settings.enhance_duration;
            self.states[i] = SkillState::Casting;
            self.active = Some(slot);
            tracing::info!(%slot, seconds = self.settings.enhance_duration, "enhanced");
            let position = ctx.caster_position;
            self.execute(slot, ctx, position, 0.0);
        } else {
            let mut multiplier = if combo.enhance { 2.0 } else { 1.0 };
            multiplier = self.consume_enhance(multiplier);
            self.execute(slot, ctx, target, combo.shape(multiplier));
            self.states[i] = SkillState::Casting;
            self.active = Some(slot);
        }
    }

    fn channel_tick_multiplier(&self, combo: &RuneCombo) -> f32 {
        if combo.enhance {
            0.6
        } else {
            0.3
        }
    }

    /// Advance cooldowns, charge, channel ticks and the enhance buff
    pub fn update(&mut self, dt: f32, ctx: &mut SkillContext<'_>) {
        for i in 0..SkillSlot::COUNT {
            if self.cooldowns[i] > 0.0 {
                self.cooldowns[i] -= dt;
                if self.cooldowns[i] <= 0.0 {
                    self.cooldowns[i] = 0.0;
                    if self.states[i] == SkillState::Cooldown {
                        self.states[i] = SkillState::Ready;
                    }
                }
            }
        }

        if let Some(charge) = self.charging.as_mut() {
            charge.time += dt;
        }

        self.update_channel(dt, ctx);

        if self.enhance_timer > 0.0 {
            self.enhance_timer -= dt;
            if self.enhance_timer <= 0.0 {
                self.enhance_timer = 0.0;
                tracing::debug!("enhancement expired");
            }
        }

        if self.charging.is_some() || self.channel.is_some() {
            return;
        }
        if let Some(slot) = self.active {
            let finished = match self.skills[slot.index()].as_mut() {
                Some(skill) => {
                    skill.update(dt);
                    skill.is_finished()
                }
                None => true,
            };
            if finished {
                self.start_cooldown(slot, 1.0);
                self.active = None;
            }
        }
    }

    fn update_channel(&mut self, dt: f32, ctx: &mut SkillContext<'_>) {
        let (Some(mut channel), Some(slot)) = (self.channel, self.active) else {
            return;
        };
        channel.time += dt;
        channel.tick_accum += dt;

        if channel.tick_accum >= self.settings.channel_tick_rate {
            channel.tick_accum -= self.settings.channel_tick_rate;
            let combo = self.rune_combo(slot);
            let tick = self.channel_tick_multiplier(&combo);
            self.execute(slot, ctx, channel.target, combo.shape(tick));
        }

        if channel.time >= self.settings.channel_duration {
            tracing::info!(%slot, "channel complete");
            self.channel = None;
            self.start_cooldown(slot, 1.0);
            self.active = None;
        } else {
            self.channel = Some(channel);
        }
    }
}

impl std::fmt::Debug for SkillComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SkillComponent")
            .field("states", &self.states)
            .field("cooldowns", &self.cooldowns)
            .field("runes", &self.runes)
            .field("active", &self.active)
            .field("enhance_timer", &self.enhance_timer)
            .finish_non_exhaustive()
    }
}
