//! Catalog loading, validation and headless runs.

use std::io::Write;
use std::path::Path;

use battle_core::battle::{BattleConfig, BattleOutcome};
use battle_core::grid::Side;
use battle_test_utils::fixtures::STANDARD_CATALOG_RON;
use battle_tools::catalog_loader::{load_catalog, CatalogLoadError};
use battle_tools::simulate::{compose_army, run_simulation, SimulationRequest};
use battle_tools::validate::{validate_catalog_file, ValidationError};

fn write_catalog(text: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(text.as_bytes()).unwrap();
    file
}

#[test]
fn test_shipped_catalog_is_valid() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../assets/data/units.ron");
    let count = validate_catalog_file(&path).unwrap();
    assert_eq!(count, 5);
}

#[test]
fn test_load_catalog_from_file() {
    let file = write_catalog(STANDARD_CATALOG_RON);
    let catalog = load_catalog(file.path()).unwrap();
    assert_eq!(catalog.units.len(), 4);
}

#[test]
fn test_parse_error_names_file() {
    let file = write_catalog("UnitCatalog(units: [");
    let err = load_catalog(file.path()).unwrap_err();
    assert!(matches!(err, CatalogLoadError::Parse { ref path, .. } if path.contains(&*file.path().to_string_lossy())));
}

#[test]
fn test_invalid_archetypes_fail_validation() {
    let file = write_catalog(
        r#"UnitCatalog(units: [
            UnitArchetype(name: "Ghost", unit_type: "Ghost", health: 0, base_attack: 5, cost: 0, attack_type: "melee"),
        ])"#,
    );
    match validate_catalog_file(file.path()) {
        Err(ValidationError::Invalid(problems)) => assert_eq!(problems.len(), 2),
        other => panic!("expected validation failure, got {other:?}"),
    }
}

#[test]
fn test_compose_from_loaded_catalog() {
    let file = write_catalog(STANDARD_CATALOG_RON);
    let catalog = load_catalog(file.path()).unwrap();

    let army = compose_army(&catalog, 120, Side::Right, Some(9)).unwrap();
    assert!(army.points() <= 120);
    assert!(army
        .units()
        .iter()
        .all(|u| u.position().is_some_and(|p| p.x >= 24)));
}

#[test]
fn test_seeded_simulation_is_reproducible() {
    let file = write_catalog(STANDARD_CATALOG_RON);
    let catalog = load_catalog(file.path()).unwrap();
    let request = SimulationRequest {
        player_points: 150,
        computer_points: 150,
        seed: Some(17),
        config: BattleConfig::default().with_max_rounds(1_000),
    };

    let (a, strikes_a) = run_simulation(&catalog, &request).unwrap();
    let (b, strikes_b) = run_simulation(&catalog, &request).unwrap();

    assert_eq!(a.player, b.player);
    assert_eq!(a.computer, b.computer);
    assert_eq!(a.report, b.report);
    assert_eq!(strikes_a.strikes, strikes_b.strikes);
    assert!(!strikes_a.strikes.is_empty());
    assert_ne!(a.report.outcome, BattleOutcome::Ongoing);
}

#[test]
fn test_simulation_report_serializes() {
    let file = write_catalog(STANDARD_CATALOG_RON);
    let catalog = load_catalog(file.path()).unwrap();
    let request = SimulationRequest {
        player_points: 30,
        computer_points: 0,
        seed: Some(1),
        config: BattleConfig::default(),
    };

    let (result, _) = run_simulation(&catalog, &request).unwrap();
    assert_eq!(result.report.outcome, BattleOutcome::ComputerLost);
    assert_eq!(result.report.rounds, 0);

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["report"]["outcome"], "ComputerLost");
}
