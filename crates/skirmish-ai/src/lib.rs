//! Skirmish AI
//!
//! Enemy behaviour is a five-state machine (Idle, Chase, Attack, Stagger,
//! Dead) that moves its root node, delegates attacks to an
//! [`AttackBehavior`](skirmish_combat::AttackBehavior), and asks for
//! animation cross-fades on every state entry.

mod enemy;
mod stats;

pub use enemy::{AnimationRequest, DamageOutcome, Enemy, EnemyState, IndicatorPlacement};
pub use stats::{EnemyAnimationConfig, EnemyStats, DEAD_LINGER_TIME, STAGGER_DURATION};
