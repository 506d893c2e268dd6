//! Integration tests for loading, reloading and resolving drop tables.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use oredrops_core::rng::seeded;
use oredrops_loot::{
    ConfigDocument, ConfigValidationError, Diagnostics, DropMethod, DropService, ItemCatalog, ItemId,
    KnownItems, LoadError, StaticSource,
};

const BASE_CONFIG: &str = r#"
    debug-mode = false

    [drop-mechanics]
    method = "BONUS_ROLLS"

    [block-drops.diamond_ore.ruby]
    oraxen-item = "ruby"
    chance = 50
    min-amount = 1
    max-amount = 1

    [block-drops.diamond_ore.sapphire]
    oraxen-item = "sapphire"
    chance = 100
    min-amount = 2
    max-amount = 2

    [block-drops.emerald_ore.jade]
    oraxen-item = "jade"
    chance = 5
"#;

fn catalog() -> KnownItems {
    KnownItems::new(["ruby", "sapphire", "jade", "opal"])
}

fn loaded_service() -> DropService<KnownItems> {
    let service = DropService::new(catalog(), Diagnostics::default());
    service.install(&ConfigDocument::parse(BASE_CONFIG).unwrap());
    service
}

#[test]
fn test_reload_replaces_tables() {
    let service = loaded_service();
    let summary = service
        .reload(&StaticSource::new(
            r#"
            [block-drops.gold_ore.opal]
            oraxen-item = "opal"
            chance = 10
            "#,
        ))
        .unwrap();

    assert_eq!(summary.version, 2);
    assert_eq!(summary.materials, 1);
    assert_eq!(service.method(), DropMethod::Hybrid);
    assert!(service.snapshot().entries("diamond_ore").is_empty());
    assert_eq!(service.snapshot().entries("GOLD_ORE").len(), 1);
}

#[test]
fn test_unparseable_reload_keeps_previous_tables() {
    let service = loaded_service();
    let before = service.snapshot();

    let error = service
        .reload(&StaticSource::new("[block-drops.diamond_ore\nchance = 5"))
        .unwrap_err();
    assert!(matches!(error, LoadError::Syntax(_)));

    let after = service.snapshot();
    assert_eq!(after.version(), before.version());
    assert_eq!(after.entry_count(), 3);
    assert_eq!(after.method(), DropMethod::BonusRolls);
}

#[test]
fn test_malformed_method_falls_back_without_touching_entries() {
    let service = loaded_service();
    let patched = BASE_CONFIG.replace("BONUS_ROLLS", "MEGA_ROLLS");
    let summary = service.reload(&StaticSource::new(patched)).unwrap();

    assert_eq!(service.method(), DropMethod::Hybrid);
    assert_eq!(
        summary.rejected,
        vec![ConfigValidationError::UnknownMethod("MEGA_ROLLS".to_owned())]
    );
    assert_eq!(summary.entries, 3);
    assert_eq!(service.snapshot().entries("emerald_ore").len(), 1);
}

#[test]
fn test_bad_entry_leaves_other_materials_intact() {
    let service = DropService::new(catalog(), Diagnostics::default());
    let summary = service.install(
        &ConfigDocument::parse(
            r#"
            [block-drops.stone.broken]
            oraxen-item = "ruby"
            chance = 0
            [block-drops.iron_ore.ok]
            oraxen-item = "ruby"
            chance = 25
            "#,
        )
        .unwrap(),
    );
    assert_eq!(summary.rejected.len(), 1);
    assert_eq!(summary.materials, 1);
    assert!(service.get_drops("stone", 5).is_empty());
}

#[test]
fn test_seeded_runs_are_identical() {
    let service = loaded_service();
    let run = |seed| {
        let mut rng = seeded(seed);
        (0..500)
            .map(|_| service.resolve_ids_with("diamond_ore", 4, &mut rng))
            .collect::<Vec<_>>()
    };
    assert_eq!(run(2024), run(2024));
}

#[test]
fn test_bonus_rolls_empirical_rate() {
    // 50% per roll, Uncommon tier, level 3 -> 2 rolls -> 75% cumulative
    let service = loaded_service();
    let mut rng = seeded(77);
    let trials = 100_000;
    let hits = (0..trials)
        .filter(|_| {
            service
                .resolve_ids_with("diamond_ore", 3, &mut rng)
                .iter()
                .any(|drop| drop.item_id.as_str() == "ruby")
        })
        .count();
    let rate = hits as f64 / f64::from(trials) * 100.0;
    assert!((rate - 75.0).abs() < 1.0, "ruby rate {rate:.2}%");
}

/// Knows every id but refuses to build one of them.
struct FlakyCatalog {
    broken: &'static str,
}

impl ItemCatalog for FlakyCatalog {
    type Item = ItemId;

    fn exists(&self, _id: &str) -> bool {
        true
    }

    fn build(&self, id: &str) -> Option<ItemId> {
        (id != self.broken).then(|| ItemId::from(id))
    }
}

#[test]
fn test_build_failure_only_skips_that_item() {
    let service = DropService::new(FlakyCatalog { broken: "ruby" }, Diagnostics::default());
    service.install(
        &ConfigDocument::parse(
            r#"
            [block-drops.stone.ruby]
            oraxen-item = "ruby"
            chance = 100
            [block-drops.stone.jade]
            oraxen-item = "jade"
            chance = 100
            "#,
        )
        .unwrap(),
    );

    let ids = service.resolve_ids_with("stone", 0, &mut seeded(1));
    assert_eq!(ids.len(), 2);

    let items = service.get_drops_with("stone", 0, &mut seeded(1));
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].item.as_str(), "jade");
}

#[test]
fn test_readers_only_see_whole_snapshots() {
    // Config A has 3 entries over 2 materials, config B has 1 entry over 1.
    const CONFIG_B: &str = r#"
        [drop-mechanics]
        method = "DIMINISHING"
        [block-drops.gold_ore.opal]
        oraxen-item = "opal"
        chance = 10
    "#;

    let service = Arc::new(loaded_service());
    let stop = Arc::new(AtomicBool::new(false));

    let readers: Vec<_> = (0..4)
        .map(|i| {
            let service = Arc::clone(&service);
            let stop = Arc::clone(&stop);
            thread::spawn(move || {
                let mut rng = seeded(i);
                let mut observed = 0u64;
                loop {
                    let snapshot = service.snapshot();
                    let shape = (snapshot.method(), snapshot.material_count(), snapshot.entry_count());
                    assert!(
                        shape == (DropMethod::BonusRolls, 2, 3) || shape == (DropMethod::Diminishing, 1, 1),
                        "torn snapshot {shape:?}"
                    );
                    let drops = service.resolve_ids_with("diamond_ore", 3, &mut rng);
                    assert!(drops.iter().all(|drop| drop.quantity > 0));
                    observed += 1;
                    if stop.load(Ordering::Relaxed) {
                        break observed;
                    }
                }
            })
        })
        .collect();

    let mut last_version = service.snapshot().version();
    for round in 0..200 {
        let text = if round % 2 == 0 { CONFIG_B } else { BASE_CONFIG };
        let summary = service.reload(&StaticSource::new(text)).unwrap();
        assert!(summary.version > last_version);
        last_version = summary.version;
    }
    stop.store(true, Ordering::Relaxed);

    for reader in readers {
        assert!(reader.join().unwrap() > 0);
    }
}
