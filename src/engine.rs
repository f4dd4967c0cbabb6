//! The game-state engine: owns the live [`GameState`] and the ad cooldown,
//! and is the only thing allowed to mutate either.
//!
//! Every command is a single `&mut self` method, so an affordability check
//! and its deduction always see the same currency value. Declined actions
//! (insufficient funds, unknown upgrade id) are ordinary result values.
//! Persistence failures are logged and swallowed; no gameplay operation can
//! fail because storage did.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::catalog::UpgradeId;
use crate::cooldown::{self, AdCooldown};
use crate::save;
use crate::state::GameState;
use crate::store::SnapshotStore;

/// Engine timing and persistence knobs. Defaults match the shipped game.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Click triggers an immediate flush once per-click gain reaches this,
    /// bounding write frequency while keeping high-value sessions crash-safe.
    pub click_flush_threshold: f64,
    /// Period of the periodic snapshot driver, in seconds.
    pub autosave_interval_secs: u64,
    /// Production tick rate for smooth visible accrual.
    pub ticks_per_sec: u32,
    /// Cooldown armed after each completed rewarded-ad viewing, in seconds.
    pub ad_cooldown_secs: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            click_flush_threshold: 10.0,
            autosave_interval_secs: 5,
            ticks_per_sec: 10,
            ad_cooldown_secs: 300,
        }
    }
}

/// Result of a purchase attempt. The declined variants are normal outcomes,
/// not errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PurchaseOutcome {
    Purchased,
    InsufficientFunds,
    UnknownUpgrade,
}

pub struct Engine {
    state: GameState,
    cooldown: AdCooldown,
    store: Box<dyn SnapshotStore>,
    tuning: Tuning,
}

impl Engine {
    /// Engine over a fresh game.
    pub fn new(store: Box<dyn SnapshotStore>, tuning: Tuning) -> Self {
        Self {
            state: GameState::fresh(),
            cooldown: AdCooldown::idle(),
            store,
            tuning,
        }
    }

    /// Reconstruct the engine from persisted snapshots, crediting offline
    /// production for the wall-clock time since the last save. Missing or
    /// malformed snapshots fall back to a fresh game; this never fails.
    pub fn bootstrap(store: Box<dyn SnapshotStore>, tuning: Tuning, now_ms: i64) -> Self {
        let mut engine = Self::new(store, tuning);

        match engine.store.get(save::GAME_KEY) {
            Ok(Some(json)) => {
                if let Some(snapshot) = save::decode(&json) {
                    save::apply(&mut engine.state, &snapshot);
                    let delta = save::offline_delta_seconds(engine.state.last_saved_ms, now_ms);
                    if delta > 0.0 {
                        let credited = engine.state.currency_per_second() * delta;
                        engine.tick(delta);
                        info!(seconds = delta, credited, "credited offline production");
                    }
                }
            }
            Ok(None) => debug!("no game snapshot; starting fresh"),
            Err(e) => warn!(error = %e, "game snapshot unreadable; starting fresh"),
        }

        match engine.store.get(save::COOLDOWN_KEY) {
            Ok(Some(json)) => engine.cooldown = cooldown::decode(&json, now_ms),
            Ok(None) => {}
            Err(e) => warn!(error = %e, "cooldown snapshot unreadable; treating as idle"),
        }

        engine
    }

    // ── Commands ────────────────────────────────────────────────

    /// Manual interaction: credit one click's worth of currency.
    pub fn click(&mut self, now_ms: i64) {
        let gain = self.state.currency_per_click();
        self.state.currency += gain;
        self.state.total_earned += gain;
        if gain >= self.tuning.click_flush_threshold {
            self.save(now_ms);
        }
    }

    /// Attempt to buy the next level of an upgrade. The check and the
    /// deduction run against the same currency snapshot.
    pub fn purchase(&mut self, id: UpgradeId, now_ms: i64) -> PurchaseOutcome {
        let cost = match self.state.cost_of(id) {
            Some(c) => c,
            None => return PurchaseOutcome::UnknownUpgrade,
        };
        if self.state.currency < cost {
            return PurchaseOutcome::InsufficientFunds;
        }
        self.state.currency -= cost;
        if let Some(u) = self.state.upgrades.get_mut(&id) {
            u.level += 1;
        }
        self.save(now_ms);
        PurchaseOutcome::Purchased
    }

    /// Pure affordability query; false for unknown ids.
    pub fn can_afford(&self, id: UpgradeId) -> bool {
        self.state
            .cost_of(id)
            .is_some_and(|cost| self.state.currency >= cost)
    }

    /// Credit a rewarded-ad payout. The caller computes `amount` via
    /// [`cooldown::ad_reward_amount`] from the current production rates.
    pub fn grant_reward(&mut self, amount: f64, now_ms: i64) {
        self.state.currency += amount;
        self.state.total_earned += amount;
        self.state.ad_reward_count += 1;
        self.save(now_ms);
    }

    /// Advance passive production by `delta_seconds`. Tolerates arbitrarily
    /// large deltas (offline gaps); never flushes on its own.
    pub fn tick(&mut self, delta_seconds: f64) {
        if delta_seconds <= 0.0 {
            return;
        }
        let produced = self.state.currency_per_second() * delta_seconds;
        self.state.currency += produced;
        self.state.total_earned += produced;
    }

    /// Restore fresh-game values and delete both persisted snapshots.
    pub fn reset(&mut self) {
        self.state = GameState::fresh();
        self.cooldown = AdCooldown::idle();
        for key in [save::GAME_KEY, save::COOLDOWN_KEY] {
            if let Err(e) = self.store.remove(key) {
                warn!(key, error = %e, "failed to delete snapshot during reset");
            }
        }
    }

    /// Flush a snapshot tagged with `now_ms`. Write failures are swallowed
    /// with a diagnostic; the next periodic save retries.
    pub fn save(&mut self, now_ms: i64) {
        let json = match save::encode(&self.state, now_ms) {
            Ok(j) => j,
            Err(e) => {
                warn!(error = %e, "failed to serialize game snapshot");
                return;
            }
        };
        match self.store.put(save::GAME_KEY, &json) {
            Ok(()) => self.state.last_saved_ms = now_ms,
            Err(e) => warn!(error = %e, "snapshot write failed; gameplay continues"),
        }
    }

    // ── Ad cooldown ─────────────────────────────────────────────

    /// Arm the ad cooldown after a completed viewing and persist it.
    pub fn start_ad_cooldown(&mut self, now_ms: i64) {
        self.cooldown.start(self.tuning.ad_cooldown_secs);
        self.persist_cooldown(now_ms);
    }

    /// Decay the cooldown by elapsed real seconds, keeping the persisted
    /// record in step (removed once the cooldown expires).
    pub fn tick_ad_cooldown(&mut self, elapsed_seconds: u32, now_ms: i64) {
        if !self.cooldown.is_active() {
            return;
        }
        self.cooldown.tick(elapsed_seconds);
        self.persist_cooldown(now_ms);
    }

    pub fn ad_cooldown_remaining(&self) -> u32 {
        self.cooldown.remaining_seconds()
    }

    fn persist_cooldown(&mut self, now_ms: i64) {
        if self.cooldown.is_active() {
            match cooldown::encode(&self.cooldown, now_ms) {
                Ok(json) => {
                    if let Err(e) = self.store.put(save::COOLDOWN_KEY, &json) {
                        warn!(error = %e, "cooldown write failed");
                    }
                }
                Err(e) => warn!(error = %e, "failed to serialize cooldown"),
            }
        } else if let Err(e) = self.store.remove(save::COOLDOWN_KEY) {
            warn!(error = %e, "failed to delete expired cooldown");
        }
    }

    // ── Query surface ───────────────────────────────────────────

    pub fn currency(&self) -> f64 {
        self.state.currency
    }

    pub fn total_earned(&self) -> f64 {
        self.state.total_earned
    }

    pub fn ad_reward_count(&self) -> u32 {
        self.state.ad_reward_count
    }

    pub fn currency_per_click(&self) -> f64 {
        self.state.currency_per_click()
    }

    pub fn currency_per_second(&self) -> f64 {
        self.state.currency_per_second()
    }

    pub fn last_saved_ms(&self) -> i64 {
        self.state.last_saved_ms
    }

    /// Read-only view of the live state for presentation.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }
}
