//! Owned game state and the derived production rates.

use std::collections::BTreeMap;

use crate::catalog::{self, UpgradeClass, UpgradeDef, UpgradeId};

/// Cost multiplier base: each purchased level raises the next cost by 15%.
const COST_GROWTH: f64 = 1.15;

/// Mutable per-kind progress. Cost is never stored here — it is recomputed
/// from `(base_cost, level)` so it cannot drift.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UpgradeState {
    pub level: u32,
}

/// Current cost of the next level: `floor(base_cost * 1.15^level)`.
pub fn upgrade_cost(def: &UpgradeDef, level: u32) -> f64 {
    (def.base_cost * COST_GROWTH.powi(level as i32)).floor()
}

/// The single live game state. Mutated only through [`crate::engine::Engine`]
/// commands; presentation reads the derived queries.
#[derive(Clone, Debug)]
pub struct GameState {
    /// Spendable currency. Fractional: auto-production accrues in sub-second
    /// increments.
    pub currency: f64,
    /// All-time earnings. Never reduced by spending.
    pub total_earned: f64,
    /// Number of rewarded-ad grants received.
    pub ad_reward_count: u32,
    /// One entry per catalog kind, fixed cardinality.
    pub upgrades: BTreeMap<UpgradeId, UpgradeState>,
    /// Epoch milliseconds of the last successful snapshot.
    pub last_saved_ms: i64,
}

impl GameState {
    /// Fresh state: zero currency, the starter upgrade at level 1, everything
    /// else at level 0.
    pub fn fresh() -> Self {
        let upgrades = catalog::catalog()
            .iter()
            .map(|def| (def.id, UpgradeState { level: def.initial_level }))
            .collect();
        Self {
            currency: 0.0,
            total_earned: 0.0,
            ad_reward_count: 0,
            upgrades,
            last_saved_ms: 0,
        }
    }

    /// Currency gained per manual click: `1 + Σ(level × value)` over
    /// click-bonus upgrades.
    pub fn currency_per_click(&self) -> f64 {
        1.0 + self.sum_levels(UpgradeClass::ClickBonus)
    }

    /// Passive currency gained per second: `Σ(level × value)` over
    /// auto-production upgrades.
    pub fn currency_per_second(&self) -> f64 {
        self.sum_levels(UpgradeClass::AutoProduction)
    }

    fn sum_levels(&self, class: UpgradeClass) -> f64 {
        catalog::catalog()
            .iter()
            .filter(|def| def.class == class)
            .map(|def| f64::from(self.level(def.id)) * def.base_value)
            .sum()
    }

    /// Current level of an upgrade. Unknown ids read as level 0.
    pub fn level(&self, id: UpgradeId) -> u32 {
        self.upgrades.get(&id).map_or(0, |u| u.level)
    }

    /// Current cost of the next level, or `None` for unknown ids.
    pub fn cost_of(&self, id: UpgradeId) -> Option<f64> {
        let def = catalog::lookup(id)?;
        Some(upgrade_cost(def, self.level(id)))
    }
}

/// Compact display formatting for large currency amounts.
pub fn format_number(n: f64) -> String {
    if n >= 1_000_000_000.0 {
        format!("{:.1}B", n / 1_000_000_000.0)
    } else if n >= 1_000_000.0 {
        format!("{:.1}M", n / 1_000_000.0)
    } else if n >= 1_000.0 {
        format!("{:.1}K", n / 1_000.0)
    } else {
        format!("{}", n.floor() as i64)
    }
}
