//! Game-state engine for an incremental cookie clicker.
//!
//! The playable surface is three operations deep: click for currency, spend
//! currency on upgrades, and let auto-production tick along at 10 ticks/sec.
//! Everything with an actual invariant lives here — upgrade cost scaling,
//! offline-progress recovery, snapshot persistence, and the rewarded-ad
//! cooldown. Rendering is somebody else's problem: a frontend reads the
//! [`Engine`] query surface and dispatches its commands.
//!
//! Layout:
//! - [`catalog`] — the fixed set of purchasable upgrade kinds
//! - [`state`] — owned game state and derived production rates
//! - [`engine`] — the command surface (click/purchase/tick/reward/reset)
//! - [`save`] — versioned snapshot format and offline-delta math
//! - [`store`] — durable key-value backends (file or in-memory)
//! - [`cooldown`] — rewarded-ad cooldown with cross-session decay
//! - [`driver`] — cancellable periodic tasks (production, autosave, cooldown)
//! - [`clock`] — fixed-timestep accumulator for frame-driven embedders

pub mod catalog;
pub mod clock;
pub mod cooldown;
pub mod driver;
pub mod engine;
pub mod save;
pub mod state;
pub mod store;

#[cfg(test)]
mod simulator;

pub use catalog::{UpgradeClass, UpgradeDef, UpgradeId};
pub use engine::{Engine, PurchaseOutcome, Tuning};
pub use state::GameState;
pub use store::{FileStore, MemoryStore, SnapshotStore, StoreError};
