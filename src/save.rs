//! Snapshot format for game state, plus offline-delta math.
//!
//! ## Versioning policy
//!
//! - `SAVE_VERSION`: current snapshot format version. Increment when adding
//!   fields.
//! - `MIN_COMPATIBLE_VERSION`: oldest version that can still be read. Leave
//!   it alone for additive changes (missing fields fill with defaults);
//!   increment only for breaking changes to existing field meanings.
//!
//! Derived values (per-click/per-second rates, upgrade costs) are excluded
//! and recomputed on load, as is anything presentation-only.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::catalog::UpgradeId;
use crate::state::{GameState, UpgradeState};

/// Current snapshot format version.
pub const SAVE_VERSION: u32 = 1;

/// Oldest snapshot version still readable.
const MIN_COMPATIBLE_VERSION: u32 = 1;

/// Store key for the game snapshot.
pub const GAME_KEY: &str = "cookie_game";

/// Store key for the ad-cooldown snapshot. Independently keyed so the two
/// lifecycles never interfere.
pub const COOLDOWN_KEY: &str = "ad_cooldown";

#[derive(Serialize, Deserialize)]
struct SaveData {
    version: u32,
    game: GameSave,
}

/// Persisted game fields. `#[serde(default)]` lets older snapshots that
/// predate a field (e.g. `ad_reward_count`) load with a sane zero value.
#[derive(Serialize, Deserialize, Default, Debug)]
#[serde(default)]
pub struct GameSave {
    pub currency: f64,
    pub total_earned: f64,
    pub upgrades: Vec<UpgradeSave>,
    pub last_saved_ms: i64,
    pub ad_reward_count: u32,
}

/// Per-upgrade snapshot entry. `cost` and `value` are catalog-derivable and
/// written for wire-format fidelity only; load recomputes both.
#[derive(Serialize, Deserialize, Default, Debug)]
#[serde(default)]
pub struct UpgradeSave {
    pub id: u32,
    pub level: u32,
    pub cost: f64,
    pub value: f64,
}

/// Serialize a snapshot tagged with `now_ms`.
pub fn encode(state: &GameState, now_ms: i64) -> Result<String, serde_json::Error> {
    let game = GameSave {
        currency: state.currency,
        total_earned: state.total_earned,
        upgrades: state
            .upgrades
            .iter()
            .map(|(id, u)| UpgradeSave {
                id: id.0,
                level: u.level,
                cost: state.cost_of(*id).unwrap_or(0.0),
                value: crate::catalog::lookup(*id).map_or(0.0, |d| d.base_value),
            })
            .collect(),
        last_saved_ms: now_ms,
        ad_reward_count: state.ad_reward_count,
    };
    serde_json::to_string(&SaveData {
        version: SAVE_VERSION,
        game,
    })
}

/// Parse a snapshot. Malformed JSON or an incompatible version yields `None`;
/// the caller falls back to a fresh game rather than propagating an error.
pub fn decode(json: &str) -> Option<GameSave> {
    let data: SaveData = match serde_json::from_str(json) {
        Ok(d) => d,
        Err(e) => {
            warn!(error = %e, "discarding malformed game snapshot");
            return None;
        }
    };
    if data.version < MIN_COMPATIBLE_VERSION || data.version > SAVE_VERSION {
        warn!(
            saved = data.version,
            current = SAVE_VERSION,
            "discarding snapshot with incompatible version"
        );
        return None;
    }
    Some(data.game)
}

/// Restore persisted fields into `state`. Entries whose id is not in the
/// catalog are ignored; catalog kinds missing from the snapshot keep their
/// fresh-state level.
pub fn apply(state: &mut GameState, save: &GameSave) {
    state.currency = save.currency;
    state.total_earned = save.total_earned;
    state.ad_reward_count = save.ad_reward_count;
    state.last_saved_ms = save.last_saved_ms;
    for entry in &save.upgrades {
        let id = UpgradeId(entry.id);
        if let Some(u) = state.upgrades.get_mut(&id) {
            *u = UpgradeState { level: entry.level };
        }
    }
}

/// Wall-clock seconds since the snapshot was written, clamped to zero so a
/// stored timestamp in the future (clock skew) credits nothing.
pub fn offline_delta_seconds(last_saved_ms: i64, now_ms: i64) -> f64 {
    ((now_ms - last_saved_ms) as f64 / 1000.0).max(0.0)
}
