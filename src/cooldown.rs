//! Rewarded-ad cooldown, tracked alongside (not inside) the game state.
//!
//! The cooldown decays with elapsed real time rather than game ticks, so a
//! closed-and-reopened session still observes the correct remainder. It is
//! persisted under its own key with its own timestamp.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Seconds remaining until the next rewarded ad may be watched.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AdCooldown {
    remaining_seconds: u32,
}

impl AdCooldown {
    /// No cooldown pending.
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    pub fn is_active(&self) -> bool {
        self.remaining_seconds > 0
    }

    /// Arm the cooldown after a completed ad viewing.
    pub fn start(&mut self, seconds: u32) {
        self.remaining_seconds = seconds;
    }

    /// Decay by elapsed real seconds, clamped at zero.
    pub fn tick(&mut self, elapsed_seconds: u32) {
        self.remaining_seconds = self.remaining_seconds.saturating_sub(elapsed_seconds);
    }
}

/// Persisted cooldown record.
#[derive(Serialize, Deserialize, Default, Debug)]
#[serde(default)]
struct CooldownSave {
    remaining_seconds: u32,
    timestamp_ms: i64,
}

/// Serialize the cooldown tagged with `now_ms`.
pub fn encode(cooldown: &AdCooldown, now_ms: i64) -> Result<String, serde_json::Error> {
    serde_json::to_string(&CooldownSave {
        remaining_seconds: cooldown.remaining_seconds,
        timestamp_ms: now_ms,
    })
}

/// Parse a persisted cooldown and decay it by the real time elapsed since it
/// was written. Malformed data or clock skew both land on a safe value.
pub fn decode(json: &str, now_ms: i64) -> AdCooldown {
    let save: CooldownSave = match serde_json::from_str(json) {
        Ok(s) => s,
        Err(e) => {
            warn!(error = %e, "discarding malformed cooldown snapshot");
            return AdCooldown::idle();
        }
    };
    let elapsed_seconds = ((now_ms - save.timestamp_ms) / 1000).max(0) as u64;
    let remaining = u64::from(save.remaining_seconds).saturating_sub(elapsed_seconds);
    AdCooldown {
        remaining_seconds: remaining as u32,
    }
}

/// Reward for a completed ad viewing: `ceil(max(per_click × 20, per_second ×
/// 30))`. Scaling with current production keeps the reward meaningful at any
/// progression stage.
pub fn ad_reward_amount(per_click: f64, per_second: f64) -> f64 {
    (per_click * 20.0).max(per_second * 30.0).ceil()
}
