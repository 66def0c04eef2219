use crate::drop_item::{DropItem, Interactable};
use crate::player::Player;
use crate::world::GameWorld;
use glam::Vec3;
use skirmish_combat::{SkillComponent, SkillContext, SkillInput, SkillSlot};
use skirmish_core::math::yaw_towards;
use skirmish_core::{EntityId, Result};
use skirmish_runtime::RuntimeSystem;

/// Longest aim distance when the cursor misses the ground
pub const AIM_RANGE: f32 = 50.0;

const RUNE_ACTIONS: [&str; 3] = ["rune_option_1", "rune_option_2", "rune_option_3"];

/// Movement, facing, skill casting and drop interaction for the player
pub struct PlayerSystem;

impl PlayerSystem {
    pub fn new() -> Self {
        Self
    }

    fn skill_input(world: &GameWorld) -> SkillInput {
        let mut input = SkillInput::default();
        for (slot, action) in [
            (SkillSlot::Q, "skill_q"),
            (SkillSlot::E, "skill_e"),
            (SkillSlot::R, "skill_r"),
            (SkillSlot::RightClick, "skill_right_click"),
        ] {
            input.held[slot.index()] = world.input.is_action_pressed(action);
        }
        input
    }

    /// Camera-relative WASD movement; returns the new position
    fn move_player(world: &mut GameWorld, dt: f32) -> Vec3 {
        let position = world.player_position();
        let forward = world.camera.forward_flat();
        let right = world.camera.right_flat();

        let mut direction = Vec3::ZERO;
        if world.input.is_action_pressed("move_forward") {
            direction += forward;
        }
        if world.input.is_action_pressed("move_backward") {
            direction -= forward;
        }
        if world.input.is_action_pressed("move_right") {
            direction += right;
        }
        if world.input.is_action_pressed("move_left") {
            direction -= right;
        }

        let speed = world
            .objects
            .get::<Player>(world.player)
            .map_or(0.0, |p| p.move_speed);
        let direction = direction.normalize_or_zero();
        if direction == Vec3::ZERO {
            return position;
        }
        let position = position + direction * speed * dt;
        world.objects.set_position(world.player, position);
        position
    }

    fn face_cursor(world: &mut GameWorld, position: Vec3) -> Vec3 {
        let aim = world
            .camera_view()
            .ground_target(world.input.mouse_position, position, AIM_RANGE);
        if let (Some(node), Some(yaw)) = (world.objects.node(world.player), yaw_towards(position, aim)) {
            world.objects.graph_mut().set_yaw(node, yaw);
        }
        aim
    }

    fn cast_skills(world: &mut GameWorld, dt: f32, position: Vec3, aim: Vec3) {
        let input = Self::skill_input(world);
        let Some(mut skills) = world.objects.get_mut::<SkillComponent>(world.player) else {
            return;
        };
        let mut ctx = SkillContext {
            caster: Some(world.player),
            caster_position: position,
            projectiles: &mut world.projectiles,
            events: &mut world.events,
        };
        skills.update(dt, &mut ctx);
        skills.process_input(&input, aim, &mut ctx);
    }

    fn nearest_drop(world: &GameWorld, position: Vec3) -> Option<EntityId> {
        let candidates: Vec<(EntityId, f32)> = world
            .objects
            .ecs()
            .query::<(&EntityId, &Interactable)>()
            .iter()
            .filter_map(|(_, (id, interactable))| {
                let at = world.objects.position(*id)?;
                interactable
                    .in_range(at, position)
                    .then(|| (*id, at.distance(position)))
            })
            .collect();
        candidates
            .into_iter()
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(id, _)| id)
    }

    fn interact(world: &mut GameWorld, position: Vec3) {
        let nearby = Self::nearest_drop(world, position);
        if nearby != world.interaction.nearby {
            if let Some(drop) = nearby {
                if let Some(interactable) = world.objects.get::<Interactable>(drop) {
                    tracing::debug!(drop = %drop, prompt = %interactable.prompt, "interaction available");
                }
            }
            world.interaction.nearby = nearby;
        }
        if world.interaction.open.is_some() && world.interaction.open != nearby {
            world.interaction.open = None;
        }

        if world.input.is_action_just_pressed("next_skill_slot") {
            if let Some(mut player) = world.objects.get_mut::<Player>(world.player) {
                player.cycle_slot();
            }
        }

        if world.input.is_action_just_pressed("interact") {
            if let Some(drop) = nearby {
                if let Some(item) = world.objects.get::<DropItem>(drop) {
                    tracing::info!(drop = %drop, options = ?item.options(), "choose a rune");
                }
                world.interaction.open = Some(drop);
            }
        }

        let Some(open) = world.interaction.open else {
            return;
        };
        let Some(choice) = RUNE_ACTIONS
            .iter()
            .position(|action| world.input.is_action_just_pressed(action))
        else {
            return;
        };

        let rune = world
            .objects
            .get_mut::<DropItem>(open)
            .and_then(|mut item| item.take(choice));
        let Some(rune) = rune else {
            return;
        };
        if let Some(mut interactable) = world.objects.get_mut::<Interactable>(open) {
            interactable.active = false;
        }

        let slot = world
            .objects
            .get::<Player>(world.player)
            .map_or(SkillSlot::Q, |p| p.selected_slot);
        if let Some(mut skills) = world.objects.get_mut::<SkillComponent>(world.player) {
            let index = skills.first_empty_rune_slot(slot).unwrap_or(0);
            skills.set_rune(slot, index, Some(rune));
        }
        world.stats.drops_collected += 1;
        world.interaction = Default::default();
        tracing::info!(%rune, %slot, "picked up rune");
    }
}

impl Default for PlayerSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl RuntimeSystem<GameWorld> for PlayerSystem {
    fn initialize(&mut self, world: &mut GameWorld) -> Result<()> {
        let position = world.player_position();
        world.camera.follow(position);
        Ok(())
    }

    fn update(&mut self, world: &mut GameWorld, dt: f64) -> Result<()> {
        if !world.is_player_alive() {
            return Ok(());
        }
        let dt = dt as f32;

        let wheel = world.input.wheel_delta();
        if wheel != 0.0 {
            world.camera.zoom(wheel as f32);
        }

        let position = Self::move_player(world, dt);
        let aim = Self::face_cursor(world, position);
        Self::cast_skills(world, dt, position, aim);
        Self::interact(world, position);
        world.camera.follow(position);
        Ok(())
    }

    fn shutdown(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "player"
    }
}
