//! Save-directory layout contract with the full game registry.

use voidharvest::components::{snapshot_registry, PlayerStats, Position};
use voidharvest::{Controller, SimOptions};
use voidharvest_persistence::{Migrations, SaveSlotManager, SLOT_COUNT};

fn manager(dir: &std::path::Path) -> SaveSlotManager {
    SaveSlotManager::new(dir, snapshot_registry(), Migrations::new())
}

#[test]
fn autosave_and_slots_round_trip_game_state() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let mgr = manager(tmp.path());

    let mut controller = Controller::new(SimOptions {
        seed: 11,
        width: 20,
        height: 10,
    });
    controller.inject_key("right");
    controller.tick(4, 1.0);

    mgr.save_autosave(controller.world()).expect("autosave");
    mgr.save_slot(controller.world(), 1).expect("slot 1");

    assert!(tmp.path().join("autosave.gz").exists());
    assert!(tmp.path().join("slot1.gz").exists());
    assert!(!tmp.path().join("slot2.gz").exists());

    let player = controller.player();
    let saved_pos = controller.world().get::<Position>(player).expect("pos");
    let saved_stats = controller
        .world()
        .get::<PlayerStats>(player)
        .expect("stats");

    // Diverge, then continue from the autosave.
    controller.inject_key("down");
    controller.tick(6, 1.0);
    assert!(mgr.load_autosave_or_new(controller.world()));

    assert_eq!(
        controller.world().get::<Position>(player),
        Some(saved_pos)
    );
    assert_eq!(
        controller.world().get::<PlayerStats>(player),
        Some(saved_stats)
    );
}

#[test]
fn missing_autosave_reports_new_game() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let mgr = manager(tmp.path());
    let controller = Controller::new(SimOptions::default());
    assert!(!mgr.has_autosave());
    assert!(!mgr.load_autosave_or_new(controller.world()));
}

#[test]
fn slot_scan_covers_all_slots() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let mgr = manager(tmp.path());
    let controller = Controller::new(SimOptions::default());
    mgr.save_slot(controller.world(), 3).expect("slot 3");

    let slots = mgr.slots();
    assert_eq!(slots.len(), SLOT_COUNT as usize);
    assert!(slots.iter().any(|s| s.slot == 3 && s.exists));
    assert!(slots.iter().any(|s| s.slot == 1 && !s.exists));
}
