//! Property tests for generated tickets

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use tambola::core::{validate_grid, validate_ticket, Ticket, TicketGenerator};
use tambola::types::{column_range, Cell, NUMBERS_PER_ROW, TICKET_COLS, TICKET_ROWS};

fn check_structure(ticket: &Ticket) -> Result<(), TestCaseError> {
    prop_assert!(validate_ticket(ticket), "invalid ticket:\n{}", ticket);

    for row in ticket.rows().iter() {
        let filled = row.iter().filter(|c| c.is_some()).count();
        prop_assert_eq!(filled, NUMBERS_PER_ROW);
        prop_assert_eq!(TICKET_COLS - filled, 4);
    }

    let mut seen = [false; 91];
    for row in ticket.rows().iter() {
        for (col, cell) in row.iter().enumerate() {
            if let Some(n) = *cell {
                let (min, max) = column_range(col);
                prop_assert!(n >= min && n <= max, "{} outside column {}", n, col);
                prop_assert!(!seen[n as usize], "{} repeated", n);
                seen[n as usize] = true;
            }
        }
    }

    for col in 0..TICKET_COLS {
        let values: Vec<u8> = (0..TICKET_ROWS)
            .filter_map(|row| ticket.rows()[row][col])
            .collect();
        prop_assert!(values.windows(2).all(|w| w[0] < w[1]), "column {} unsorted", col);
    }
    Ok(())
}

proptest! {
    /// Property: every ticket from the seeded generator is structurally valid
    #[test]
    fn prop_seeded_tickets_are_valid(seed in any::<u32>()) {
        let mut gen = TicketGenerator::with_seed(seed);
        for ticket in gen.generate_multiple_tickets(4) {
            check_structure(&ticket)?;
        }
    }

    /// Property: the generator holds its guarantees for an injected RNG too
    #[test]
    fn prop_chacha_tickets_are_valid(seed in any::<u64>()) {
        let mut gen = TicketGenerator::new(ChaCha8Rng::seed_from_u64(seed));
        check_structure(&gen.generate_single_ticket())?;
    }

    /// Property: validation never panics on arbitrary grids
    #[test]
    fn prop_validate_grid_is_total(
        rows in prop::collection::vec(
            prop::collection::vec(prop::option::of(0u8..=100), 0..12),
            0..5,
        )
    ) {
        let ok = validate_grid(&rows);
        if ok {
            prop_assert!(Ticket::from_rows(rows).is_ok());
        }
    }
}

#[test]
fn generator_is_reproducible() {
    let a = TicketGenerator::with_seed(2024).generate_ticket_sheets(12, 6);
    let b = TicketGenerator::with_seed(2024).generate_ticket_sheets(12, 6);
    assert_eq!(a, b);
    assert_eq!(a.len(), 2);
}

#[test]
fn hand_built_grid_round_trips_through_json() {
    let rows: Vec<Vec<Cell>> = vec![
        vec![Some(1), Some(11), Some(21), Some(31), Some(41), None, None, None, None],
        vec![None, None, None, None, Some(42), Some(51), Some(61), Some(71), Some(81)],
        vec![Some(2), Some(12), None, None, None, Some(52), Some(62), None, Some(90)],
    ];
    let ticket = Ticket::from_rows(rows).unwrap();
    let json = serde_json::to_value(&ticket).unwrap();
    assert_eq!(json["rows"][0][0], 1);
    assert!(json["rows"][0][8].is_null());
    let back: Ticket = serde_json::from_value(json).unwrap();
    assert_eq!(back, ticket);
}
