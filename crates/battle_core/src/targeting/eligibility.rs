//! Front-line target eligibility.
//!
//! Only the unit closest to the enemy in each row can be struck directly.

use crate::unit::Unit;

/// Find the units exposed to direct attack, row by row.
///
/// A unit is eligible when it is alive and no living unit stands beyond it in
/// its row on the scanned end. With `target_is_left_army` the rows belong to
/// the army on the left, whose front faces right: the rightmost living unit of
/// each row is eligible. Otherwise the leftmost one is.
///
/// Results are ordered by row, then by slot within the row.
#[must_use]
pub fn find_eligible<'a>(rows: &[Vec<Option<&'a Unit>>], target_is_left_army: bool) -> Vec<&'a Unit> {
    let mut eligible = Vec::new();

    for (row_index, row) in rows.iter().enumerate() {
        let before = eligible.len();
        for (slot, &unit) in row.iter().enumerate() {
            let Some(unit) = unit.filter(|u| u.is_alive()) else {
                continue;
            };
            let exposed = if target_is_left_army {
                !has_living(&row[slot + 1..])
            } else {
                !has_living(&row[..slot])
            };
            if exposed {
                eligible.push(unit);
            }
        }
        if eligible.len() > before {
            tracing::trace!(row = row_index, found = eligible.len() - before, "Eligible units in row");
        }
    }

    tracing::debug!(count = eligible.len(), "Eligible targets found");
    eligible
}

fn has_living(slots: &[Option<&Unit>]) -> bool {
    slots.iter().flatten().any(|u| u.is_alive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unit::UnitArchetype;

    fn soldier(name: &str) -> Unit {
        UnitArchetype::new("Soldier", 10, 5, 1).instantiate(name)
    }

    fn corpse(name: &str) -> Unit {
        UnitArchetype::new("Soldier", 0, 5, 1).instantiate(name)
    }

    fn names(units: &[&Unit]) -> Vec<String> {
        units.iter().map(|u| u.name().to_string()).collect()
    }

    #[test]
    fn test_rightmost_unit_when_left_army_targeted() {
        let a = soldier("A");
        let b = soldier("B");
        let rows = vec![vec![None, Some(&a), None, Some(&b)]];

        assert_eq!(names(&find_eligible(&rows, true)), vec!["B"]);
    }

    #[test]
    fn test_leftmost_unit_when_right_army_targeted() {
        let a = soldier("A");
        let b = soldier("B");
        let rows = vec![vec![None, Some(&a), None, Some(&b)]];

        assert_eq!(names(&find_eligible(&rows, false)), vec!["A"]);
    }

    #[test]
    fn test_dead_units_neither_eligible_nor_blocking() {
        let a = soldier("A");
        let dead = corpse("dead");
        let rows = vec![vec![Some(&a), None, Some(&dead)]];

        assert_eq!(names(&find_eligible(&rows, true)), vec!["A"]);
    }

    #[test]
    fn test_rows_are_independent_and_ordered() {
        let a = soldier("A");
        let b = soldier("B");
        let c = soldier("C");
        let d = soldier("D");
        let rows = vec![
            vec![Some(&a), Some(&b), None],
            vec![None, None, None],
            vec![None, Some(&c), Some(&d)],
        ];

        assert_eq!(names(&find_eligible(&rows, true)), vec!["B", "D"]);
        assert_eq!(names(&find_eligible(&rows, false)), vec!["A", "C"]);
    }

    #[test]
    fn test_single_unit_row_eligible_both_ways() {
        let a = soldier("A");
        let rows = vec![vec![None, Some(&a), None]];

        assert_eq!(find_eligible(&rows, true).len(), 1);
        assert_eq!(find_eligible(&rows, false).len(), 1);
    }

    #[test]
    fn test_empty_rows() {
        let rows: Vec<Vec<Option<&Unit>>> = vec![vec![None; 3]; 4];
        assert!(find_eligible(&rows, true).is_empty());
        assert!(find_eligible(&[], false).is_empty());
    }
}
