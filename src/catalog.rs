//! Static upgrade catalog: the fixed set of purchasable upgrade kinds and
//! their base economics. Immutable for the process lifetime; queried by id.

use serde::{Deserialize, Serialize};

/// Stable identifier for an upgrade kind. Persisted snapshots reference
/// upgrades by this id, never by position or name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UpgradeId(pub u32);

/// What an upgrade contributes to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpgradeClass {
    /// Adds to per-interaction currency gain.
    ClickBonus,
    /// Adds to passive per-second currency gain.
    AutoProduction,
}

/// One catalog entry. `base_value` is the per-level contribution; it does not
/// scale with level beyond the linear multiplier applied at aggregation time.
#[derive(Clone, Copy, Debug)]
pub struct UpgradeDef {
    pub id: UpgradeId,
    pub name: &'static str,
    pub description: &'static str,
    pub base_cost: f64,
    pub base_value: f64,
    pub class: UpgradeClass,
    /// Level a fresh game starts with. Exactly one entry (the starter) is 1.
    pub initial_level: u32,
}

const CATALOG: &[UpgradeDef] = &[
    UpgradeDef {
        id: UpgradeId(0),
        name: "Better Clicking",
        description: "Increases cookies per click",
        base_cost: 10.0,
        base_value: 1.0,
        class: UpgradeClass::ClickBonus,
        initial_level: 1,
    },
    UpgradeDef {
        id: UpgradeId(1),
        name: "Auto Clicker",
        description: "Automatically clicks for you",
        base_cost: 50.0,
        base_value: 0.5,
        class: UpgradeClass::AutoProduction,
        initial_level: 0,
    },
    UpgradeDef {
        id: UpgradeId(2),
        name: "Bakery",
        description: "Produces cookies automatically",
        base_cost: 200.0,
        base_value: 2.0,
        class: UpgradeClass::AutoProduction,
        initial_level: 0,
    },
    UpgradeDef {
        id: UpgradeId(3),
        name: "Cookie Factory",
        description: "Mass produces cookies",
        base_cost: 1000.0,
        base_value: 10.0,
        class: UpgradeClass::AutoProduction,
        initial_level: 0,
    },
];

/// All upgrade kinds in display order.
pub fn catalog() -> &'static [UpgradeDef] {
    CATALOG
}

/// Look up a catalog entry by id. Unknown ids are a normal miss, not an error.
pub fn lookup(id: UpgradeId) -> Option<&'static UpgradeDef> {
    CATALOG.iter().find(|def| def.id == id)
}
