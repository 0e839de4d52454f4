#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use skirmish::battle::{
    check_invariants, AiStyle, BattleConfig, BattleInput, BattleSession, Coord, Direction,
    GridSize, Phase, Scenario, Side, Unit,
};
use std::time::Duration;

/// One fuzzed input event.
#[derive(Arbitrary, Debug, Clone, Copy)]
enum FuzzInput {
    Up,
    Down,
    Left,
    Right,
    Confirm,
    Cancel,
    Skip,
    Forfeit,
    /// Let time pass so a pending enemy phase may fire.
    Wait(u16),
}

/// Structured input for session fuzzing.
#[derive(Arbitrary, Debug)]
struct SessionInput {
    /// Hero hit points (clamped to 1..=20).
    hero_hp: u8,
    /// Fight the dragon instead of the goblin.
    dragon: bool,
    /// Use the party roster.
    party: bool,
    /// Use the axis-first AI.
    axis: bool,
    /// Event sequence.
    events: Vec<FuzzInput>,
}

fuzz_target!(|input: SessionInput| {
    let hero = Unit::new("Hero", Side::Friendly, Coord::new(5, 5), 20, 5, 4)
        .with_hp(u32::from(input.hero_hp).clamp(1, 20));
    let foe = if input.dragon {
        Unit::new("Dragon", Side::Enemy, Coord::new(15, 10), 18, 7, 3)
    } else {
        Unit::new("Goblin", Side::Enemy, Coord::new(10, 8), 10, 3, 3)
    };
    let config = BattleConfig {
        enemy_phase_delay: Duration::from_millis(400),
        ai_style: if input.axis { AiStyle::Axis } else { AiStyle::Diagonal },
        scenario: if input.party { Scenario::Party } else { Scenario::Duel },
    };

    let mut session = match BattleSession::new(&hero, &foe, config) {
        Ok(s) => s,
        Err(e) => panic!("Standard rosters rejected: {e}"),
    };

    // Cap inputs to keep runs short
    for event in input.events.into_iter().take(2000) {
        let battle_input = match event {
            FuzzInput::Up => BattleInput::Cursor(Direction::Up),
            FuzzInput::Down => BattleInput::Cursor(Direction::Down),
            FuzzInput::Left => BattleInput::Cursor(Direction::Left),
            FuzzInput::Right => BattleInput::Cursor(Direction::Right),
            FuzzInput::Confirm => BattleInput::Confirm,
            FuzzInput::Cancel => BattleInput::Cancel,
            FuzzInput::Skip => BattleInput::Skip,
            FuzzInput::Forfeit => BattleInput::Forfeit,
            FuzzInput::Wait(ms) => {
                session.update(Duration::from_millis(u64::from(ms)));
                continue;
            }
        };

        let terminal = session.phase().is_terminal();
        let closed = session.handle_input(battle_input);

        let violations = check_invariants(&session);
        assert!(violations.is_empty(), "Invariants violated: {:?}", violations);

        for unit in session.friendly().iter().chain(session.enemies()) {
            assert!(GridSize::BATTLE.contains(unit.pos), "{} left the grid", unit.name);
            assert!(unit.hp() <= unit.max_hp());
        }

        if let Some(result) = closed {
            assert!(terminal, "Result returned from a running battle");
            assert_eq!(result.outcome == skirmish::battle::Outcome::Victory, session.phase() == Phase::Victory);
            break;
        }
    }
});
