use super::*;

#[test]
fn my_turn_requires_a_known_identity() {
    let mut turn = TurnState::new();
    assert!(!turn.is_my_turn(None));
    assert!(!turn.is_my_turn(Some(0)));

    turn.observe_turn(0);
    assert!(turn.is_my_turn(Some(0)));
    assert!(!turn.is_my_turn(Some(1)));
    assert!(!turn.is_my_turn(None));
}

#[test]
fn turn_change_resets_rotation_and_bite() {
    let mut turn = TurnState::new();
    turn.observe_turn(0);
    turn.advance_rotation(4);
    turn.advance_rotation(4);
    turn.toggle_bite(Bite::Small, 4);

    assert!(turn.observe_turn(1));
    assert_eq!(turn.rotation(), 0);
    assert_eq!(turn.bite(), Bite::None);
}

#[test]
fn unchanged_turn_preserves_selections() {
    let mut turn = TurnState::new();
    turn.observe_turn(1);
    turn.advance_rotation(4);
    turn.toggle_bite(Bite::Large, 4);

    assert!(!turn.observe_turn(1));
    assert_eq!(turn.rotation(), 1);
    assert_eq!(turn.bite(), Bite::Large);
}

#[test]
fn rotation_wraps_over_the_mask_count() {
    let mut turn = TurnState::new();
    assert_eq!(turn.advance_rotation(4), 1);
    assert_eq!(turn.advance_rotation(4), 2);
    assert_eq!(turn.advance_rotation(4), 3);
    assert_eq!(turn.advance_rotation(4), 0);
    // A short rotation list still wraps safely.
    assert_eq!(turn.advance_rotation(1), 0);
}

#[test]
fn bite_cycle_visits_both_kinds_and_returns_to_none() {
    let mut turn = TurnState::new();
    assert_eq!(turn.cycle_bite(4), Bite::Small);
    assert_eq!(turn.cycle_bite(4), Bite::Large);
    assert_eq!(turn.cycle_bite(4), Bite::None);
}

#[test]
fn bite_cycle_skips_unaffordable_kinds() {
    // Balance 1 affords a small bite (cost 1) but not a large one (cost 3).
    let mut turn = TurnState::new();
    assert_eq!(turn.cycle_bite(1), Bite::Small);
    assert_eq!(turn.cycle_bite(1), Bite::None);

    // Broke players stay on none.
    let mut turn = TurnState::new();
    assert_eq!(turn.cycle_bite(0), Bite::None);
}

#[test]
fn toggling_the_active_bite_turns_it_off() {
    let mut turn = TurnState::new();
    assert_eq!(turn.toggle_bite(Bite::Small, 4), Bite::Small);
    assert_eq!(turn.toggle_bite(Bite::Small, 4), Bite::None);
}

#[test]
fn toggling_an_unaffordable_bite_is_ignored() {
    let mut turn = TurnState::new();
    assert_eq!(turn.toggle_bite(Bite::Large, 2), Bite::None);
    turn.toggle_bite(Bite::Small, 2);
    assert_eq!(turn.toggle_bite(Bite::Large, 2), Bite::Small);
}

#[test]
fn reset_bite_keeps_rotation() {
    let mut turn = TurnState::new();
    turn.advance_rotation(4);
    turn.toggle_bite(Bite::Small, 4);
    turn.reset_bite();
    assert_eq!(turn.bite(), Bite::None);
    assert_eq!(turn.rotation(), 1);
}
