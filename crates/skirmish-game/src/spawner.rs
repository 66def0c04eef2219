//! Enemy presets and the spawn procedure

use glam::Vec3;
use serde::{Deserialize, Serialize};
use skirmish_ai::{Enemy, EnemyAnimationConfig, EnemyStats};
use skirmish_animation::{AnimationPlayer, ClipLibrary};
use skirmish_combat::{
    AttackBehavior, IndicatorConfig, IndicatorKind, MeleeAttack, RangedAttack, RushAoEAttack,
    RushFrontAttack,
};
use skirmish_core::{EntityId, Result, SkirmishError};
use skirmish_ecs::ObjectWorld;
use skirmish_physics::{Collider, ColliderScope, CollisionLayer, CollisionManager};
use std::collections::{BTreeMap, HashSet};
use std::path::PathBuf;

/// Preset used when a spawn names one that does not exist
pub const FALLBACK_PRESET: &str = "TestEnemy";

const AIR_ELEMENTAL_CLIPS: &str = "Assets/Enemies/AirElemental/Animations/AirElemental_Bl_Anim.bin";

/// Room an enemy was spawned for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoomMember(pub usize);

fn default_hit_range() -> f32 {
    3.0
}

/// Attack behaviour description, built fresh for every spawned enemy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AttackSpec {
    Melee {
        damage: f32,
        windup: f32,
        hit_time: f32,
        recovery: f32,
        #[serde(default = "default_hit_range")]
        hit_range: f32,
    },
    Ranged {
        damage: f32,
        projectile_speed: f32,
        windup: f32,
        shoot_time: f32,
        recovery: f32,
    },
    RushAoe {
        damage: f32,
        rush_speed: f32,
        rush_duration: f32,
        windup: f32,
        hit_time: f32,
        recovery: f32,
        radius: f32,
    },
    RushFront {
        damage: f32,
        rush_speed: f32,
        rush_duration: f32,
        windup: f32,
        hit_time: f32,
        recovery: f32,
        hit_range: f32,
        /// Full cone angle in degrees
        cone_angle: f32,
    },
}

impl Default for AttackSpec {
    fn default() -> Self {
        AttackSpec::Melee {
            damage: 10.0,
            windup: 0.3,
            hit_time: 0.5,
            recovery: 0.2,
            hit_range: default_hit_range(),
        }
    }
}

impl AttackSpec {
    pub fn build(&self) -> Box<dyn AttackBehavior> {
        match *self {
            AttackSpec::Melee {
                damage,
                windup,
                hit_time,
                recovery,
                hit_range,
            } => Box::new(MeleeAttack::new(damage, windup, hit_time, recovery).with_hit_range(hit_range)),
            AttackSpec::Ranged {
                damage,
                projectile_speed,
                windup,
                shoot_time,
                recovery,
            } => Box::new(RangedAttack::new(
                damage,
                projectile_speed,
                windup,
                shoot_time,
                recovery,
            )),
            AttackSpec::RushAoe {
                damage,
                rush_speed,
                rush_duration,
                windup,
                hit_time,
                recovery,
                radius,
            } => Box::new(RushAoEAttack::new(
                damage,
                rush_speed,
                rush_duration,
                windup,
                hit_time,
                recovery,
                radius,
            )),
            AttackSpec::RushFront {
                damage,
                rush_speed,
                rush_duration,
                windup,
                hit_time,
                recovery,
                hit_range,
                cone_angle,
            } => Box::new(RushFrontAttack::new(
                damage,
                rush_speed,
                rush_duration,
                windup,
                hit_time,
                recovery,
                hit_range,
                cone_angle,
            )),
        }
    }
}

/// Everything needed to spawn one kind of enemy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemySpawnData {
    pub name: String,
    /// Binary clip file; the enemy is unanimated without one
    pub animation: Option<PathBuf>,
    pub scale: Vec3,
    pub stats: EnemyStats,
    /// Melee with default timings when absent
    pub attack: Option<AttackSpec>,
    pub clips: EnemyAnimationConfig,
    /// Telegraph drawn instead of the attack's own
    pub indicator: Option<IndicatorConfig>,
}

impl Default for EnemySpawnData {
    fn default() -> Self {
        Self {
            name: String::new(),
            animation: None,
            scale: Vec3::ONE,
            stats: EnemyStats::default(),
            attack: None,
            clips: EnemyAnimationConfig::default(),
            indicator: None,
        }
    }
}

fn air_elemental_clips() -> EnemyAnimationConfig {
    EnemyAnimationConfig {
        idle_clip: "idle".into(),
        chase_clip: "Run_Forward".into(),
        attack_clip: "Combat_Unarmed_Attack".into(),
        stagger_clip: "Combat_Stun".into(),
        death_clip: "Death".into(),
        ..EnemyAnimationConfig::default()
    }
}

fn stats(max_hp: f32, move_speed: f32, attack_range: f32, attack_cooldown: f32) -> EnemyStats {
    EnemyStats {
        move_speed,
        attack_range,
        attack_cooldown,
        ..EnemyStats::default()
    }
    .with_max_hp(max_hp)
}

/// The presets every spawner starts with
pub fn builtin_presets() -> Vec<EnemySpawnData> {
    let animated = |name: &str| EnemySpawnData {
        name: name.into(),
        animation: Some(PathBuf::from(AIR_ELEMENTAL_CLIPS)),
        scale: Vec3::splat(3.0),
        clips: air_elemental_clips(),
        ..EnemySpawnData::default()
    };

    vec![
        EnemySpawnData {
            name: FALLBACK_PRESET.into(),
            scale: Vec3::new(1.0, 2.0, 1.0),
            stats: stats(50.0, 4.0, 3.0, 1.5),
            attack: Some(AttackSpec::Melee {
                damage: 10.0,
                windup: 0.3,
                hit_time: 0.2,
                recovery: 0.3,
                hit_range: default_hit_range(),
            }),
            indicator: Some(IndicatorConfig::circle(3.0)),
            ..EnemySpawnData::default()
        },
        EnemySpawnData {
            stats: stats(80.0, 5.0, 4.0, 2.0),
            attack: Some(AttackSpec::Melee {
                damage: 15.0,
                windup: 0.4,
                hit_time: 0.2,
                recovery: 0.4,
                hit_range: default_hit_range(),
            }),
            indicator: Some(IndicatorConfig::circle(4.0)),
            ..animated("AirElemental")
        },
        EnemySpawnData {
            stats: stats(100.0, 5.0, 20.0, 3.0),
            attack: Some(AttackSpec::RushAoe {
                damage: 15.0,
                rush_speed: 15.0,
                rush_duration: 1.2,
                windup: 0.3,
                hit_time: 0.2,
                recovery: 0.3,
                radius: 5.0,
            }),
            indicator: Some(IndicatorConfig {
                kind: IndicatorKind::RushCircle,
                hit_radius: 5.0,
                rush_distance: 18.0,
                cone_angle: 0.0,
            }),
            ..animated("RushAoEEnemy")
        },
        EnemySpawnData {
            stats: stats(80.0, 5.0, 18.0, 2.5),
            attack: Some(AttackSpec::RushFront {
                damage: 20.0,
                rush_speed: 18.0,
                rush_duration: 1.0,
                windup: 0.2,
                hit_time: 0.2,
                recovery: 0.3,
                hit_range: 4.0,
                cone_angle: 90.0,
            }),
            indicator: Some(IndicatorConfig {
                kind: IndicatorKind::RushCone,
                hit_radius: 4.0,
                rush_distance: 18.0,
                cone_angle: 90.0,
            }),
            ..animated("RushFrontEnemy")
        },
        EnemySpawnData {
            stats: stats(60.0, 3.0, 30.0, 2.0),
            attack: Some(AttackSpec::Ranged {
                damage: 10.0,
                projectile_speed: 20.0,
                windup: 0.5,
                shoot_time: 0.1,
                recovery: 0.5,
            }),
            ..animated("RangedEnemy")
        },
    ]
}

/// World pieces the spawner writes into
pub struct SpawnContext<'a> {
    pub objects: &'a mut ObjectWorld,
    pub collisions: &'a mut CollisionManager,
    pub clips: &'a mut ClipLibrary,
}

/// Named enemy presets plus the procedure that turns one into a game object
#[derive(Debug)]
pub struct EnemySpawner {
    presets: BTreeMap<String, EnemySpawnData>,
    spawned: u64,
    /// Clip files that failed to load, warned about once
    missing_clips: HashSet<PathBuf>,
}

impl Default for EnemySpawner {
    fn default() -> Self {
        Self::new()
    }
}

impl EnemySpawner {
    /// Spawner loaded with the built-in presets
    pub fn new() -> Self {
        let mut spawner = Self {
            presets: BTreeMap::new(),
            spawned: 0,
            missing_clips: HashSet::new(),
        };
        for preset in builtin_presets() {
            spawner.register(preset);
        }
        spawner
    }

    /// Add a preset, replacing any with the same name
    pub fn register(&mut self, data: EnemySpawnData) {
        if data.name.is_empty() {
            tracing::warn!("ignoring enemy preset without a name");
            return;
        }
        tracing::debug!(preset = %data.name, "registered enemy preset");
        self.presets.insert(data.name.clone(), data);
    }

    pub fn has_preset(&self, name: &str) -> bool {
        self.presets.contains_key(name)
    }

    pub fn preset(&self, name: &str) -> Option<&EnemySpawnData> {
        self.presets.get(name)
    }

    pub fn preset_names(&self) -> impl Iterator<Item = &str> {
        self.presets.keys().map(String::as_str)
    }

    pub fn presets(&self) -> impl Iterator<Item = &EnemySpawnData> {
        self.presets.values()
    }

    /// Total enemies this spawner has created
    pub fn spawned_count(&self) -> u64 {
        self.spawned
    }

    /// Create an enemy game object for `room`.
    ///
    /// Unknown presets fall back to [`FALLBACK_PRESET`]. A clip file that
    /// cannot be loaded leaves the enemy unanimated.
    pub fn spawn(
        &mut self,
        ctx: &mut SpawnContext<'_>,
        room: usize,
        preset: &str,
        position: Vec3,
        target: Option<EntityId>,
    ) -> Result<EntityId> {
        let data = match self.presets.get(preset) {
            Some(data) => data,
            None => {
                tracing::warn!(preset, fallback = FALLBACK_PRESET, "unknown enemy preset");
                self.presets.get(FALLBACK_PRESET).ok_or_else(|| {
                    SkirmishError::SpawnError(format!(
                        "unknown preset {preset} and no {FALLBACK_PRESET} fallback"
                    ))
                })?
            }
        };

        self.spawned += 1;
        let id = ctx.objects.spawn(format!("{}_{}", data.name, self.spawned))?;
        let node = ctx
            .objects
            .node(id)
            .ok_or_else(|| SkirmishError::SpawnError(format!("{id} has no transform node")))?;
        let graph = ctx.objects.graph_mut();
        graph.set_position(node, position);
        graph.set_scale(node, data.scale);

        // Unit box standing on the origin; the transform's scale sizes it
        let collider = Collider::new(id, CollisionLayer::ENEMY)
            .with_box(Vec3::Y, Vec3::new(0.5, 1.0, 0.5));
        ctx.collisions.register(collider, ColliderScope::Room);

        let mut stats = data.stats.clone();
        stats.current_hp = stats.max_hp;
        let attack = data.attack.clone().unwrap_or_default().build();
        let mut enemy = Enemy::new(stats)
            .with_attack(attack)
            .with_animation(data.clips.clone());
        if let Some(indicator) = data.indicator {
            enemy = enemy.with_indicator(indicator);
        }
        enemy.set_target(target);
        ctx.objects.insert(id, enemy)?;
        ctx.objects.insert(id, RoomMember(room))?;

        if let Some(path) = data.animation.as_ref() {
            if !self.missing_clips.contains(path) {
                match ctx.clips.load(path) {
                    Ok(set) => {
                        let mut player = AnimationPlayer::with_set(set);
                        player.play(&data.clips.idle_clip, data.clips.loop_idle);
                        ctx.objects.insert(id, player)?;
                    }
                    Err(err) => {
                        tracing::warn!(
                            path = %path.display(),
                            error = %err,
                            "enemy animations unavailable"
                        );
                        self.missing_clips.insert(path.clone());
                    }
                }
            }
        }

        tracing::info!(enemy = %id, preset = %data.name, room, ?position, "spawned enemy");
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skirmish_ai::EnemyState;
    use skirmish_animation::{AnimationClip, AnimationSet};

    struct Fixture {
        objects: ObjectWorld,
        collisions: CollisionManager,
        clips: ClipLibrary,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                objects: ObjectWorld::new(),
                collisions: CollisionManager::new(),
                clips: ClipLibrary::new(),
            }
        }

        fn ctx(&mut self) -> SpawnContext<'_> {
            SpawnContext {
                objects: &mut self.objects,
                collisions: &mut self.collisions,
                clips: &mut self.clips,
            }
        }
    }

    #[test]
    fn builtin_presets_are_registered() {
        let spawner = EnemySpawner::new();
        let names: Vec<&str> = spawner.preset_names().collect();
        assert_eq!(
            names,
            vec![
                "AirElemental",
                "RangedEnemy",
                "RushAoEEnemy",
                "RushFrontEnemy",
                "TestEnemy"
            ]
        );
        let ranged = spawner.preset("RangedEnemy").unwrap();
        assert!((ranged.stats.attack_range - 30.0).abs() < 1e-6);
        assert!(ranged.indicator.is_none());
    }

    #[test]
    fn spawn_builds_a_complete_enemy() {
        let mut fixture = Fixture::new();
        let mut spawner = EnemySpawner::new();
        let position = Vec3::new(4.0, 0.0, -8.0);

        let id = spawner
            .spawn(&mut fixture.ctx(), 2, "TestEnemy", position, None)
            .unwrap();

        assert_eq!(fixture.objects.position(id), Some(position));
        assert_eq!(*fixture.objects.get::<RoomMember>(id).unwrap(), RoomMember(2));
        let enemy = fixture.objects.get::<Enemy>(id).unwrap();
        assert_eq!(enemy.state(), EnemyState::Idle);
        assert!((enemy.stats().current_hp - 50.0).abs() < 1e-6);
        assert!(enemy.attack().is_some());

        let collider = fixture.collisions.get(id).unwrap();
        assert_eq!(collider.layer, CollisionLayer::ENEMY);
        assert!(!fixture.objects.has::<AnimationPlayer>(id));
    }

    #[test]
    fn unknown_preset_falls_back() {
        let mut fixture = Fixture::new();
        let mut spawner = EnemySpawner::new();
        let id = spawner
            .spawn(&mut fixture.ctx(), 0, "Dragon", Vec3::ZERO, None)
            .unwrap();
        let name = fixture.objects.get_name(id).unwrap();
        assert!(name.starts_with(FALLBACK_PRESET), "name = {name}");
    }

    #[test]
    fn hp_is_reset_to_max_on_spawn() {
        let mut fixture = Fixture::new();
        let mut spawner = EnemySpawner::new();
        let mut wounded = EnemySpawnData {
            name: "Wounded".into(),
            ..EnemySpawnData::default()
        };
        wounded.stats.max_hp = 40.0;
        wounded.stats.current_hp = 5.0;
        spawner.register(wounded);

        let id = spawner
            .spawn(&mut fixture.ctx(), 0, "Wounded", Vec3::ZERO, None)
            .unwrap();
        let enemy = fixture.objects.get::<Enemy>(id).unwrap();
        assert!((enemy.stats().current_hp - 40.0).abs() < 1e-6);
    }

    #[test]
    fn missing_clip_file_leaves_enemy_unanimated() {
        let mut fixture = Fixture::new();
        let mut spawner = EnemySpawner::new();
        let a = spawner
            .spawn(&mut fixture.ctx(), 0, "AirElemental", Vec3::ZERO, None)
            .unwrap();
        let b = spawner
            .spawn(&mut fixture.ctx(), 0, "AirElemental", Vec3::X * 5.0, None)
            .unwrap();
        assert_ne!(a, b);
        assert!(!fixture.objects.has::<AnimationPlayer>(a));
        assert!(!fixture.objects.has::<AnimationPlayer>(b));
        assert_eq!(spawner.missing_clips.len(), 1);
    }

    #[test]
    fn cached_clip_set_starts_idle() {
        let mut fixture = Fixture::new();
        let idle = AnimationClip::new("idle", 1.0, 30.0, 30, Vec::new());
        fixture
            .clips
            .insert(AIR_ELEMENTAL_CLIPS, AnimationSet::from_clips(vec![idle]));

        let mut spawner = EnemySpawner::new();
        let id = spawner
            .spawn(&mut fixture.ctx(), 0, "AirElemental", Vec3::ZERO, None)
            .unwrap();
        let player = fixture.objects.get::<AnimationPlayer>(id).unwrap();
        assert_eq!(player.current_clip_name(), Some("idle"));
        assert!(player.is_playing());
    }

    #[test]
    fn attack_spec_parses_from_toml() {
        #[derive(Deserialize)]
        struct Holder {
            attack: AttackSpec,
        }
        let holder: Holder = toml::from_str(
            "attack = { kind = \"rush_front\", damage = 20.0, rush_speed = 18.0, rush_duration = 1.0, windup = 0.2, hit_time = 0.2, recovery = 0.3, hit_range = 4.0, cone_angle = 90.0 }",
        )
        .unwrap();
        assert!(matches!(holder.attack, AttackSpec::RushFront { .. }));

        let melee: Holder = toml::from_str(
            "attack = { kind = \"melee\", damage = 5.0, windup = 0.1, hit_time = 0.1, recovery = 0.1 }",
        )
        .unwrap();
        assert_eq!(
            melee.attack,
            AttackSpec::Melee {
                damage: 5.0,
                windup: 0.1,
                hit_time: 0.1,
                recovery: 0.1,
                hit_range: 3.0
            }
        );
    }
}
