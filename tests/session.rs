//! Full-session flow against the on-disk store: play, restart with offline
//! credit, reset.

use std::path::PathBuf;

use cookie_clicker_core::catalog::UpgradeId;
use cookie_clicker_core::cooldown;
use cookie_clicker_core::engine::PurchaseOutcome;
use cookie_clicker_core::save;
use cookie_clicker_core::{Engine, FileStore, SnapshotStore, Tuning};

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "cookie_session_{}_{}",
        name,
        std::process::id()
    ));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

#[test]
fn play_restart_and_resume_with_offline_credit() {
    let dir = scratch_dir("resume");

    // First session: earn, buy a bakery (2.0/s), save at t=1_000_000.
    {
        let store = FileStore::open(&dir).unwrap();
        let mut engine = Engine::new(Box::new(store), Tuning::default());
        engine.grant_reward(250.0, 0);
        assert_eq!(
            engine.purchase(UpgradeId(2), 0),
            PurchaseOutcome::Purchased
        );
        engine.save(1_000_000);
    }

    // Second session, 45 seconds later: state restored plus 2.0/s × 45 s.
    {
        let store = FileStore::open(&dir).unwrap();
        let engine = Engine::bootstrap(Box::new(store), Tuning::default(), 1_045_000);
        assert_eq!(engine.state().level(UpgradeId(2)), 1);
        assert!((engine.currency() - (50.0 + 90.0)).abs() < 1e-6);
        assert!((engine.total_earned() - (250.0 + 90.0)).abs() < 1e-6);
    }

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn cooldown_persists_and_decays_across_restart() {
    let dir = scratch_dir("cooldown");

    {
        let store = FileStore::open(&dir).unwrap();
        let mut engine = Engine::new(Box::new(store), Tuning::default());
        engine.start_ad_cooldown(5_000_000);
    }

    // Reopen two minutes later.
    {
        let store = FileStore::open(&dir).unwrap();
        let engine = Engine::bootstrap(Box::new(store), Tuning::default(), 5_120_000);
        assert_eq!(engine.ad_cooldown_remaining(), 180);
    }

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn reset_deletes_both_snapshots_on_disk() {
    let dir = scratch_dir("reset");

    {
        let store = FileStore::open(&dir).unwrap();
        let mut engine = Engine::new(Box::new(store), Tuning::default());
        engine.grant_reward(100.0, 0);
        engine.start_ad_cooldown(0);
        engine.save(42);
        engine.reset();
    }

    let store = FileStore::open(&dir).unwrap();
    assert!(store.get(save::GAME_KEY).unwrap().is_none());
    assert!(store.get(save::COOLDOWN_KEY).unwrap().is_none());
    // A fresh bootstrap over the wiped store starts from scratch.
    let engine = Engine::bootstrap(Box::new(store), Tuning::default(), 0);
    assert_eq!(engine.currency(), 0.0);
    assert_eq!(engine.state().level(UpgradeId(0)), 1);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn reward_flow_end_to_end() {
    let dir = scratch_dir("reward");

    let store = FileStore::open(&dir).unwrap();
    let mut engine = Engine::new(Box::new(store), Tuning::default());
    assert_eq!(engine.ad_cooldown_remaining(), 0);

    let amount =
        cooldown::ad_reward_amount(engine.currency_per_click(), engine.currency_per_second());
    // Fresh game: per-click 2, no production → ceil(max(40, 0)).
    assert_eq!(amount, 40.0);
    engine.grant_reward(amount, 100);
    engine.start_ad_cooldown(100);

    assert_eq!(engine.currency(), 40.0);
    assert_eq!(engine.ad_reward_count(), 1);
    assert_eq!(engine.ad_cooldown_remaining(), 300);

    let _ = std::fs::remove_dir_all(&dir);
}
