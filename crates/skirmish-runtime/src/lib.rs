//! Skirmish Runtime - Game loop infrastructure
//!
//! Provides the core game loop building blocks:
//! - `GameClock` - clamped frame delta
//! - `InputState` - keyboard and mouse input tracking with action bindings
//! - `CameraView` - cursor unprojection onto the ground plane
//! - `GameEvent` / `EventBus` - typed event queue for inter-system communication
//! - `RuntimeSystem` - trait for systems ticked by the game loop
//! - `init_tracing` - structured log output

mod aim;
mod clock;
mod event;
mod event_bus;
mod input;
pub mod logging;
mod system;

pub use aim::CameraView;
pub use clock::{ClockConfig, GameClock};
pub use event::GameEvent;
pub use event_bus::EventBus;
pub use input::{InputState, MOUSE_LEFT, MOUSE_MIDDLE, MOUSE_RIGHT};
pub use logging::{init_tracing, LoggingConfig};
pub use system::RuntimeSystem;
