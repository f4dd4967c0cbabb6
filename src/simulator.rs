//! Balance simulator: plays the game greedily and prints progression
//! reports, so economy tweaks can be eyeballed without a frontend.
//! Run with: cargo test simulate_ -- --nocapture

use crate::catalog::{self, UpgradeClass, UpgradeId};
use crate::engine::{Engine, PurchaseOutcome, Tuning};
use crate::state::format_number;
use crate::store::MemoryStore;

/// Assumed sustained click rate for valuing the click upgrade.
const CLICKS_PER_SEC: u32 = 5;

/// Pick the affordable upgrade with the best payback time, if any.
fn best_purchase(engine: &Engine) -> Option<UpgradeId> {
    let mut best: Option<(f64, UpgradeId)> = None;
    for def in catalog::catalog() {
        if !engine.can_afford(def.id) {
            continue;
        }
        let cost = engine.state().cost_of(def.id).unwrap_or(f64::INFINITY);
        // Gain per second from one more level.
        let gain = match def.class {
            UpgradeClass::AutoProduction => def.base_value,
            UpgradeClass::ClickBonus => def.base_value * f64::from(CLICKS_PER_SEC),
        };
        let payback = cost / gain;
        let dominated = best.as_ref().is_some_and(|(bp, _)| *bp <= payback);
        if !dominated {
            best = Some((payback, def.id));
        }
    }
    best.map(|(_, id)| id)
}

fn report(engine: &Engine, seconds: u32, purchases: u32) {
    eprintln!("┌─── {}m{:02}s ───────────────────", seconds / 60, seconds % 60);
    eprintln!(
        "│ cookies: {}  /click: {}  /sec: {}",
        format_number(engine.currency()),
        format_number(engine.currency_per_click()),
        format_number(engine.currency_per_second()),
    );
    eprintln!(
        "│ all-time: {}  purchases: {}",
        format_number(engine.total_earned()),
        purchases
    );
    let levels: Vec<String> = catalog::catalog()
        .iter()
        .map(|d| format!("{}:{}", d.name, engine.state().level(d.id)))
        .collect();
    eprintln!("│ levels: {}", levels.join("  "));
    eprintln!("└──────────────────────────────");
}

/// Simulate `total_seconds` of greedy play, checking engine invariants along
/// the way.
fn simulate(total_seconds: u32) {
    let mut engine = Engine::new(Box::new(MemoryStore::new()), Tuning::default());
    let report_times = [30, 60, 120, 300, 600, 900, 1800];
    let mut next_report = 0;
    let mut purchases = 0u32;
    let mut prev_total = 0.0;

    for second in 1..=total_seconds {
        for _ in 0..CLICKS_PER_SEC {
            engine.click(0);
        }
        engine.tick(1.0);

        while let Some(id) = best_purchase(&engine) {
            match engine.purchase(id, 0) {
                PurchaseOutcome::Purchased => purchases += 1,
                _ => break,
            }
        }

        assert!(engine.currency() >= 0.0);
        assert!(engine.total_earned() >= engine.currency());
        assert!(engine.total_earned() >= prev_total);
        prev_total = engine.total_earned();

        if next_report < report_times.len() && second >= report_times[next_report] {
            report(&engine, second, purchases);
            next_report += 1;
        }
    }

    report(&engine, total_seconds, purchases);
    assert!(purchases > 0, "greedy player never bought anything");
    assert!(
        engine.currency_per_second() > 0.0,
        "no auto production after {total_seconds}s of optimal play"
    );
}

#[test]
fn simulate_greedy_10min() {
    simulate(600);
}

#[test]
fn simulate_greedy_30min() {
    simulate(1800);
}
