//! Bounded projectile pool with deferred compaction

use crate::element::Element;
use crate::projectile::Projectile;
use glam::{Vec3, Vec4};
use serde::{Deserialize, Serialize};
use skirmish_core::EntityId;
use skirmish_physics::BoundingSphere;

/// Radius of the sphere a projectile must touch to hit a character
pub const HIT_SPHERE_RADIUS: f32 = 1.5;
/// Height of that sphere's centre above the character's root
pub const HIT_SPHERE_HEIGHT: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileConfig {
    /// Maximum stored projectiles, active or not
    pub capacity: usize,
    /// Maximum projectiles returned by `render_list`
    pub render_cap: usize,
    /// Inactive count that triggers compaction at the end of an update
    pub cleanup_threshold: usize,
}

impl Default for ProjectileConfig {
    fn default() -> Self {
        Self {
            capacity: 256,
            render_cap: 64,
            cleanup_threshold: 32,
        }
    }
}

/// Position and liveness of something a projectile can hit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetInfo {
    pub position: Vec3,
    pub alive: bool,
}

/// A side of the fight that projectiles can hit, addressed by index
pub trait ProjectileTargets {
    fn target_count(&self) -> usize;
    fn target(&self, index: usize) -> Option<TargetInfo>;
    fn apply_damage(&mut self, index: usize, amount: f32, element: Element);
}

/// No targets at all
impl ProjectileTargets for () {
    fn target_count(&self) -> usize {
        0
    }
    fn target(&self, _index: usize) -> Option<TargetInfo> {
        None
    }
    fn apply_damage(&mut self, _index: usize, _amount: f32, _element: Element) {}
}

/// A projectile that connected this update
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectileImpact {
    pub position: Vec3,
    pub owner: Option<EntityId>,
    pub element: Element,
    pub is_player_projectile: bool,
    /// Number of targets damaged (more than one only for area hits)
    pub targets_hit: usize,
    pub total_damage: f32,
}

/// What the renderer needs per visible projectile
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderInstance {
    pub position: Vec3,
    pub scale: f32,
    pub color: Vec4,
}

/// Area damage multiplier: full at the impact point, falling linearly to
/// half at the explosion edge and never below half
pub fn aoe_falloff(distance: f32, radius: f32) -> f32 {
    if radius <= 0.0 {
        return 1.0;
    }
    (1.0 - (distance / radius) * 0.5).max(0.5)
}

fn hit_sphere(position: Vec3) -> BoundingSphere {
    BoundingSphere::new(position + Vec3::Y * HIT_SPHERE_HEIGHT, HIT_SPHERE_RADIUS)
}

#[derive(Debug, Default)]
pub struct ProjectileManager {
    projectiles: Vec<Projectile>,
    config: ProjectileConfig,
}

impl ProjectileManager {
    pub fn new(config: ProjectileConfig) -> Self {
        Self {
            projectiles: Vec::with_capacity(config.capacity),
            config,
        }
    }

    pub fn config(&self) -> &ProjectileConfig {
        &self.config
    }

    /// Add a projectile. When the pool is full, inactive entries are
    /// compacted first; if it is still full the request is dropped.
    pub fn spawn(&mut self, projectile: Projectile) -> bool {
        if self.projectiles.len() >= self.config.capacity {
            self.cleanup();
            if self.projectiles.len() >= self.config.capacity {
                tracing::warn!(capacity = self.config.capacity, "projectile pool full");
                return false;
            }
        }
        tracing::trace!(
            pos = ?projectile.position,
            dir = ?projectile.direction,
            player = projectile.is_player_projectile,
            "spawned projectile"
        );
        self.projectiles.push(projectile);
        true
    }

    /// Move every active projectile and resolve hits. Player projectiles
    /// test `enemies`, enemy projectiles test `player`. Each projectile hits
    /// at most once and is then deactivated.
    pub fn update(
        &mut self,
        dt: f32,
        enemies: &mut dyn ProjectileTargets,
        player: &mut dyn ProjectileTargets,
    ) -> Vec<ProjectileImpact> {
        let mut impacts = Vec::new();
        let mut inactive = 0;

        for projectile in self.projectiles.iter_mut() {
            if !projectile.active {
                inactive += 1;
                continue;
            }

            projectile.advance(dt);

            if projectile.active {
                let targets: &mut dyn ProjectileTargets = if projectile.is_player_projectile {
                    &mut *enemies
                } else {
                    &mut *player
                };
                if let Some(impact) = resolve_hit(projectile, targets) {
                    projectile.active = false;
                    impacts.push(impact);
                }
            }

            if !projectile.active {
                inactive += 1;
            }
        }

        if inactive >= self.config.cleanup_threshold {
            self.cleanup();
        }
        impacts
    }

    /// Remove inactive entries in one pass, keeping storage order
    pub fn cleanup(&mut self) -> usize {
        let before = self.projectiles.len();
        self.projectiles.retain(|p| p.active);
        let removed = before - self.projectiles.len();
        if removed > 0 {
            tracing::debug!(removed, "compacted projectile pool");
        }
        removed
    }

    pub fn clear(&mut self) {
        self.projectiles.clear();
    }

    pub fn active_count(&self) -> usize {
        self.projectiles.iter().filter(|p| p.active).count()
    }

    /// Stored entries, including inactive ones awaiting compaction
    pub fn len(&self) -> usize {
        self.projectiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projectiles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Projectile> {
        self.projectiles.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Projectile> {
        self.projectiles.iter_mut()
    }

    /// The first `render_cap` active projectiles in storage order, so the
    /// oldest live projectiles always win the render budget
    pub fn render_list(&self) -> Vec<RenderInstance> {
        self.projectiles
            .iter()
            .filter(|p| p.active)
            .take(self.config.render_cap)
            .map(|p| RenderInstance {
                position: p.position,
                scale: p.scale,
                color: p.element.color(),
            })
            .collect()
    }
}

/// First live target touching the projectile gets hit; area projectiles
/// then damage every live target inside the explosion.
fn resolve_hit(
    projectile: &Projectile,
    targets: &mut dyn ProjectileTargets,
) -> Option<ProjectileImpact> {
    let sphere = projectile.bounding_sphere();
    let hit = (0..targets.target_count()).find(|&i| {
        targets
            .target(i)
            .is_some_and(|t| t.alive && sphere.intersects(&hit_sphere(t.position)))
    })?;

    let mut impact = ProjectileImpact {
        position: projectile.position,
        owner: projectile.owner,
        element: projectile.element,
        is_player_projectile: projectile.is_player_projectile,
        targets_hit: 0,
        total_damage: 0.0,
    };

    if projectile.explosion_radius > 0.0 {
        let blast = BoundingSphere::new(projectile.position, projectile.explosion_radius);
        for i in 0..targets.target_count() {
            let Some(t) = targets.target(i) else { continue };
            if !t.alive || !blast.intersects(&hit_sphere(t.position)) {
                continue;
            }
            let distance = t.position.distance(projectile.position);
            let amount = projectile.damage * aoe_falloff(distance, projectile.explosion_radius);
            targets.apply_damage(i, amount, projectile.element);
            impact.targets_hit += 1;
            impact.total_damage += amount;
        }
        tracing::debug!(
            targets = impact.targets_hit,
            damage = impact.total_damage,
            "projectile exploded"
        );
    } else {
        targets.apply_damage(hit, projectile.damage, projectile.element);
        impact.targets_hit = 1;
        impact.total_damage = projectile.damage;
        tracing::debug!(damage = projectile.damage, "projectile hit");
    }

    Some(impact)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Dummies {
        list: Vec<(Vec3, f32)>,
    }

    impl ProjectileTargets for Dummies {
        fn target_count(&self) -> usize {
            self.list.len()
        }
        fn target(&self, index: usize) -> Option<TargetInfo> {
            self.list.get(index).map(|&(position, hp)| TargetInfo {
                position,
                alive: hp > 0.0,
            })
        }
        fn apply_damage(&mut self, index: usize, amount: f32, _element: Element) {
            if let Some(t) = self.list.get_mut(index) {
                t.1 -= amount;
            }
        }
    }

    fn manager() -> ProjectileManager {
        ProjectileManager::new(ProjectileConfig::default())
    }

    #[test]
    fn position_follows_straight_line() {
        let mut mgr = manager();
        let start = Vec3::new(1.0, 1.5, 2.0);
        let target = Vec3::new(4.0, 1.5, 6.0);
        mgr.spawn(Projectile::aimed(start, target).with_speed(10.0));

        let dt = 1.0 / 60.0;
        for _ in 0..30 {
            mgr.update(dt, &mut (), &mut ());
        }
        let expected = start + (target - start).normalize() * 10.0 * 0.5;
        let p = mgr.iter().next().unwrap();
        assert!(p.active);
        assert!((p.position - expected).length() < 1e-3);
    }

    #[test]
    fn pool_rejects_spawn_past_capacity() {
        let mut mgr = manager();
        for _ in 0..256 {
            assert!(mgr.spawn(Projectile::aimed(Vec3::ZERO, Vec3::X)));
        }
        assert!(!mgr.spawn(Projectile::aimed(Vec3::ZERO, Vec3::X)));
        assert_eq!(mgr.active_count(), 256);
        assert_eq!(mgr.len(), 256);

        // Expire a handful; the next spawn compacts and succeeds
        for p in mgr.iter_mut().take(10) {
            p.active = false;
        }
        assert!(mgr.spawn(Projectile::aimed(Vec3::ZERO, Vec3::X)));
        assert_eq!(mgr.len(), 247);
    }

    #[test]
    fn single_target_hits_first_enemy_once() {
        let mut mgr = manager();
        let mut enemies = Dummies {
            list: vec![(Vec3::new(0.0, 0.0, 3.0), 50.0), (Vec3::new(0.0, 0.0, 3.5), 50.0)],
        };
        mgr.spawn(
            Projectile::aimed(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, 1.0, 10.0))
                .with_damage(20.0),
        );
        let mut impacts = Vec::new();
        for _ in 0..10 {
            impacts.extend(mgr.update(0.02, &mut enemies, &mut ()));
        }
        assert_eq!(impacts.len(), 1);
        assert_eq!(enemies.list[0].1, 30.0);
        assert_eq!(enemies.list[1].1, 50.0);
        assert_eq!(mgr.active_count(), 0);
    }

    #[test]
    fn aoe_edge_takes_half_damage() {
        let mut mgr = manager();
        // Stationary projectile sitting on the first enemy's hit sphere centre
        let impact = Vec3::new(0.0, 1.0, 0.0);
        let mut enemies = Dummies {
            list: vec![(Vec3::ZERO, 100.0), (Vec3::new(0.0, 1.0, 5.0), 100.0)],
        };
        mgr.spawn(
            Projectile::aimed(impact, impact)
                .with_speed(0.0)
                .with_damage(30.0)
                .with_explosion(5.0),
        );
        let impacts = mgr.update(0.016, &mut enemies, &mut ());

        assert_eq!(impacts.len(), 1);
        assert_eq!(impacts[0].targets_hit, 2);
        // Root of the second enemy sits exactly on the explosion edge
        assert!((100.0 - enemies.list[1].1 - 15.0).abs() < 1e-4);
        assert!((100.0 - enemies.list[0].1 - 27.0).abs() < 1e-4);
    }

    #[test]
    fn enemy_projectiles_only_hit_player() {
        let mut mgr = manager();
        let mut enemies = Dummies {
            list: vec![(Vec3::new(0.0, 0.0, 2.0), 50.0)],
        };
        let mut player = Dummies {
            list: vec![(Vec3::new(0.0, 0.0, 6.0), 100.0)],
        };
        mgr.spawn(
            Projectile::aimed(Vec3::new(0.0, 2.0, 0.0), Vec3::new(0.0, 1.0, 6.0))
                .with_speed(20.0)
                .with_owner(None, false),
        );
        for _ in 0..30 {
            mgr.update(0.02, &mut enemies, &mut player);
        }
        assert_eq!(enemies.list[0].1, 50.0);
        assert_eq!(player.list[0].1, 90.0);
    }

    #[test]
    fn dead_targets_are_ignored() {
        let mut mgr = manager();
        let mut enemies = Dummies {
            list: vec![(Vec3::ZERO, 0.0)],
        };
        mgr.spawn(Projectile::aimed(Vec3::Y, Vec3::Y).with_speed(0.0));
        assert!(mgr.update(0.1, &mut enemies, &mut ()).is_empty());
        assert_eq!(mgr.active_count(), 1);
    }

    #[test]
    fn cleanup_runs_at_threshold() {
        let mut mgr = manager();
        for _ in 0..40 {
            let mut p = Projectile::aimed(Vec3::ZERO, Vec3::X);
            p.max_distance = 0.1;
            mgr.spawn(p);
        }
        mgr.spawn(Projectile::aimed(Vec3::ZERO, Vec3::X));
        mgr.update(0.1, &mut (), &mut ());
        assert_eq!(mgr.len(), 1);
    }

    #[test]
    fn render_list_caps_in_storage_order() {
        let mut mgr = manager();
        for i in 0..70 {
            let mut p = Projectile::aimed(Vec3::new(i as f32, 0.0, 0.0), Vec3::X)
                .with_element(Element::Fire);
            if i == 0 {
                p.active = false;
            }
            mgr.spawn(p);
        }
        let list = mgr.render_list();
        assert_eq!(list.len(), 64);
        assert_eq!(list[0].position.x, 1.0);
        assert_eq!(list[63].position.x, 64.0);
        assert_eq!(list[0].color, Element::Fire.color());
    }

    #[test]
    fn falloff_floor() {
        assert_eq!(aoe_falloff(0.0, 5.0), 1.0);
        assert!((aoe_falloff(2.5, 5.0) - 0.75).abs() < 1e-6);
        assert_eq!(aoe_falloff(9.0, 5.0), 0.5);
    }
}
