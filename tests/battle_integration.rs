//! Scenario tests for full battles and the overworld round trip.
//!
//! Run with: cargo test --release battle_integration

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use std::collections::BTreeSet;
use std::time::Duration;

use skirmish::battle::{
    legal_targets, parse_script, reachable, resolve_attack, step_candidates, AiStyle,
    BattleConfig, BattleInput, BattleSession, Board, Coord, Direction, GridSize, Outcome, Phase,
    Scenario, Side, Unit,
};
use skirmish::overworld::{Overworld, StepOutcome};
use skirmish::render::render_battle_ascii;
use skirmish::{Game, GameConfig, GameInput, Scene};

fn hero() -> Unit {
    Unit::new("Hero", Side::Friendly, Coord::new(1, 3), 20, 5, 4)
}

fn goblin() -> Unit {
    Unit::new("Goblin", Side::Enemy, Coord::new(6, 3), 10, 3, 3)
}

fn duel_session() -> BattleSession {
    BattleSession::from_rosters(
        GridSize::BATTLE,
        vec![hero()],
        vec![goblin()],
        BattleConfig::default(),
    )
    .unwrap()
}

#[test]
fn test_open_field_reachability_is_manhattan_ball() {
    let friendly = vec![hero()];
    let enemies = vec![goblin()];
    let board = Board::new(GridSize::BATTLE, &friendly, &enemies);

    let tiles = reachable(&board, &friendly[0]);
    let expected: BTreeSet<Coord> = GridSize::BATTLE
        .coords()
        .filter(|c| c.distance(Coord::new(1, 3)) <= 4)
        .collect();

    assert_eq!(tiles, expected);
    assert!(!tiles.contains(&Coord::new(6, 3)));
}

#[test]
fn test_lethal_attack_reports_defeat() {
    let attacker = hero();
    let mut defender = goblin().with_hp(3);

    let report = resolve_attack(&attacker, &mut defender);

    assert_eq!(defender.hp(), 0);
    assert!(!defender.is_alive());
    assert!(report.message().ends_with("Goblin defeated!"));
}

#[test]
fn test_ranged_unit_cannot_strike_adjacent() {
    let archer = Unit::new("Archer", Side::Friendly, Coord::new(2, 2), 12, 4, 3).with_range(2, 3);
    for (x, expected) in [(3, false), (4, true), (5, true), (6, false)] {
        let enemies = vec![Unit::new("Goblin", Side::Enemy, Coord::new(x, 2), 10, 3, 3)];
        assert_eq!(
            legal_targets(&archer, &enemies).contains(&Coord::new(x, 2)),
            expected,
            "enemy at distance {}",
            x - 2
        );
    }
}

#[test]
fn test_blocked_ai_takes_fallback_step() {
    let friendly = vec![Unit::new("Hero", Side::Friendly, Coord::new(2, 3), 20, 5, 4)];
    let enemies = vec![
        Unit::new("Goblin", Side::Enemy, Coord::new(5, 3), 10, 3, 3),
        Unit::new("Wall", Side::Enemy, Coord::new(4, 3), 10, 3, 3),
    ];
    let config = BattleConfig {
        ai_style: AiStyle::Axis,
        ..BattleConfig::default()
    };
    let mut session = BattleSession::from_rosters(GridSize::BATTLE, friendly, enemies, config).unwrap();

    // Hero stays put and waits.
    session.play_through([BattleInput::Confirm, BattleInput::Confirm, BattleInput::Skip]);

    assert_eq!(session.phase(), Phase::FriendlySelect);
    assert_ne!(session.enemies()[0].pos, Coord::new(5, 3), "goblin should not stall");
    assert_eq!(
        step_candidates(AiStyle::Axis, Coord::new(5, 3), Coord::new(2, 3), GridSize::BATTLE)[0],
        Coord::new(4, 3)
    );
}

#[test]
fn test_scripted_duel_victory() {
    let script = "
        # bind the hero and walk next to the goblin
        confirm
        right right right right confirm
        # the goblin is adjacent now
        right confirm
    ";
    let friendly = vec![hero()];
    let enemies = vec![goblin().with_hp(5)];
    let mut session =
        BattleSession::from_rosters(GridSize::BATTLE, friendly, enemies, BattleConfig::default()).unwrap();

    let inputs = parse_script(script).unwrap();
    assert!(session.play_through(inputs).is_none());
    assert_eq!(session.phase(), Phase::Victory);

    let result = session.play_through([BattleInput::Confirm]).unwrap();
    assert_eq!(result.outcome, Outcome::Victory);
    assert_eq!(result.hero_hp, 20);
}

#[test]
fn test_war_of_attrition_until_defeat() {
    let friendly = vec![Unit::new("Hero", Side::Friendly, Coord::new(1, 3), 6, 1, 4)];
    let enemies = vec![Unit::new("Dragon", Side::Enemy, Coord::new(6, 3), 18, 7, 3)];
    let mut session =
        BattleSession::from_rosters(GridSize::BATTLE, friendly, enemies, BattleConfig::default()).unwrap();

    // Keep waiting in place until the dragon arrives and wins.
    for _ in 0..10 {
        session.play_through([BattleInput::Confirm, BattleInput::Confirm, BattleInput::Skip]);
        if session.phase().is_terminal() {
            break;
        }
    }

    assert_eq!(session.phase(), Phase::Defeat);
    assert!(!session.friendly()[0].is_alive());
    assert!(session.log().any(|m| m.contains("Hero defeated!")));
}

#[test]
fn test_party_battle_turn_cycle() {
    let overworld_hero = Unit::new("Hero", Side::Friendly, Coord::new(5, 5), 20, 5, 4);
    let foe = Unit::new("Goblin", Side::Enemy, Coord::new(10, 8), 10, 3, 3);
    let mut session = BattleSession::new(&overworld_hero, &foe, BattleConfig::default()).unwrap();

    assert_eq!(session.friendly().len(), 3);
    assert_eq!(session.enemies().len(), 3);

    // Each friendly unit waits in place; the enemy phase follows the third.
    for expected_acted in 1..=3 {
        session.handle_input(BattleInput::Confirm);
        session.handle_input(BattleInput::Confirm);
        session.handle_input(BattleInput::Skip);
        let acted = session.friendly().iter().filter(|u| u.has_acted).count();
        if expected_acted < 3 {
            assert_eq!(acted, expected_acted);
            assert_eq!(session.phase(), Phase::FriendlySelect);
        }
    }
    assert_eq!(session.phase(), Phase::EnemyPhase);

    session.update(Duration::from_millis(399));
    assert_eq!(session.phase(), Phase::EnemyPhase);
    session.update(Duration::from_millis(1));
    assert_eq!(session.phase(), Phase::FriendlySelect);
    assert_eq!(session.round(), 2);
    assert!(session.friendly().iter().all(|u| !u.has_acted));
}

#[test]
fn test_overworld_round_trip() {
    let config = GameConfig {
        scenario: Scenario::Duel,
        tree_density: 0.0,
        ..GameConfig::default()
    };
    let mut game = Game::new(config);

    // Walk from (5,5) to the goblin at (10,8), east first to clear the wall.
    for _ in 0..4 {
        game.handle_input(GameInput::Move(Direction::Right));
    }
    for _ in 0..3 {
        game.handle_input(GameInput::Move(Direction::Down));
    }
    assert_eq!(game.overworld().hero().pos, Coord::new(9, 8));
    game.handle_input(GameInput::Move(Direction::Right));
    assert_eq!(game.scene(), Scene::Battle);

    let frame = render_battle_ascii(game.battle().unwrap());
    assert!(frame.contains("Goblin"));

    game.handle_input(GameInput::Forfeit);
    let result = game.handle_input(GameInput::Confirm).unwrap();
    assert_eq!(result.outcome, Outcome::Defeat);
    assert_eq!(game.scene(), Scene::Overworld);
    assert_eq!(game.overworld().hero().hp(), 20);
    assert!(game.overworld().enemies()[0].is_alive());
}

#[test]
fn test_overworld_wall_blocks() {
    let mut world = Overworld::new(1, 0.0);
    // Hero at (5,5); the wall spans row 7 from x=3 to x=7.
    assert_eq!(world.step(Direction::Down), StepOutcome::Moved(Coord::new(5, 6)));
    assert_eq!(world.step(Direction::Down), StepOutcome::Blocked);
    assert_eq!(world.hero().pos, Coord::new(5, 6));
}

#[test]
fn test_illegal_confirm_is_advisory() {
    let mut session = duel_session();
    session.handle_input(BattleInput::Cursor(Direction::Up));
    session.handle_input(BattleInput::Confirm);

    assert_eq!(session.phase(), Phase::FriendlySelect);
    assert_eq!(session.friendly()[0].pos, Coord::new(1, 3));
    assert_eq!(session.message(), "No unit there.");
}
