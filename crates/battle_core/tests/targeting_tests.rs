//! Front-line eligibility through the public API.

use battle_core::prelude::*;
use battle_test_utils::fixtures::{army_of, soldier};

#[test]
fn test_row_scan_direction() {
    let a = soldier("A", 10, 1, 1, 0);
    let b = soldier("B", 10, 1, 3, 0);
    let rows = vec![vec![None, Some(&a), None, Some(&b)]];

    let names = |flag| {
        find_eligible(&rows, flag)
            .into_iter()
            .map(Unit::name)
            .collect::<Vec<_>>()
    };

    assert_eq!(names(true), vec!["B"]);
    assert_eq!(names(false), vec!["A"]);
}

#[test]
fn test_army_rows_feed_eligibility() {
    let army = army_of(
        Side::Left,
        [
            soldier("back", 10, 1, 0, 4),
            soldier("front", 10, 1, 2, 4),
            soldier("alone", 10, 1, 1, 7),
        ],
    );

    let rows = army.rows();
    assert_eq!(rows.len(), HEIGHT as usize);
    assert!(rows.iter().all(|row| row.len() == WIDTH as usize));

    let eligible: Vec<_> = find_eligible(&rows, true).into_iter().map(Unit::name).collect();
    assert_eq!(eligible, vec!["front", "alone"]);
}

#[test]
fn test_empty_rows_yield_nothing() {
    let army = Army::new(Side::Right);
    assert!(find_eligible(&army.rows(), false).is_empty());
}
