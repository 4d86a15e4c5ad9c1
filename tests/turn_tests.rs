//! End-of-turn integration tests.
//!
//! A scripted stand-in opponent keeps most scenarios deterministic; the
//! persistence tests run the real `ScriptedAi` with randomization.

use ccg_arena::ai::{OpponentPolicy, ScriptedAi};
use ccg_arena::cards::{CardData, CardInstance, StatusFlags};
use ccg_arena::core::{MatchConfig, MatchMode, MatchState, Side, SideMap, SIDE_POISON};
use ccg_arena::effects::{EffectRegistry, EffectResolver, SpellTarget};
use ccg_arena::rules::{play_card, MatchOutcome, PlayRequest, TurnController};

/// Opponent that never plays anything.
struct Passive;

impl OpponentPolicy for Passive {
    fn take_turn(&self, _state: &mut MatchState, _side: Side, _resolver: &EffectResolver<'_>) -> Vec<String> {
        Vec::new()
    }
}

/// Opponent that plays its first hand card, if it can.
struct PlaysFirst;

impl OpponentPolicy for PlaysFirst {
    fn take_turn(&self, state: &mut MatchState, side: Side, resolver: &EffectResolver<'_>) -> Vec<String> {
        if state.side(side).hand.is_empty() {
            return Vec::new();
        }
        play_card(state, resolver, side, PlayRequest::new(0))
            .map(|message| vec![message])
            .unwrap_or_default()
    }
}

fn monster(name: &str, cost: u32, attack: i32, hp: i32) -> CardInstance {
    CardInstance::from_data(&CardData::monster(name, cost, attack, hp)).unwrap()
}

fn placed(name: &str, attack: i32, hp: i32) -> CardInstance {
    let mut card = monster(name, 1, attack, hp);
    card.prepare_for_field();
    card
}

fn solo(level: u8, pool: usize) -> MatchState {
    let pool = |prefix: &str| -> Vec<CardInstance> {
        (0..pool)
            .map(|i| monster(&format!("{}{}", prefix, i), 1 + (i as u32 % 3), 100 + 50 * i as i32, 150))
            .collect()
    };
    MatchState::new(
        MatchConfig::default(),
        MatchMode::Solo { ai_level: level },
        SideMap::from_pair(pool("P"), pool("A")),
        2024,
    )
}

/// A full round advances the turn counter and refreshes both sides.
#[test]
fn test_round_refreshes_and_draws() {
    let registry = EffectRegistry::new();
    let controller = TurnController::new(EffectResolver::new(&registry), &Passive);
    let mut state = solo(1, 10);

    let report = controller.end_turn(&mut state, Side::First).unwrap();

    assert_eq!(report.winner, None);
    assert_eq!(state.turn, Side::First);
    assert_eq!(state.turn_count, 2);
    assert_eq!(state.cards_played_this_turn, 0);
    for side in Side::BOTH {
        assert_eq!(state.side(side).max_mana, 2);
        assert_eq!(state.side(side).mana, 2);
    }
    // Player drew at the end of the round, the AI at the start of its turn.
    assert_eq!(state.side(Side::First).hand.len(), 5);
    assert_eq!(state.side(Side::Second).hand.len(), 5);
}

/// Max mana grows by one per round up to the cap.
#[test]
fn test_max_mana_caps() {
    let registry = EffectRegistry::new();
    let controller = TurnController::new(EffectResolver::new(&registry), &Passive);
    let mut state = solo(1, 0);

    for _ in 0..15 {
        controller.end_turn(&mut state, Side::First).unwrap();
    }

    assert_eq!(state.side(Side::First).max_mana, 10);
    assert_eq!(state.side(Side::Second).mana, 10);
}

/// Overload is paid from the next refresh and then cleared.
#[test]
fn test_overload_reduces_next_refresh() {
    let registry = EffectRegistry::new();
    let resolver = EffectResolver::new(&registry);
    let controller = TurnController::new(resolver, &Passive);
    let mut state = solo(1, 0);
    state.side_mut(Side::First).hand = vec![CardInstance::from_data(
        &CardData::monster("Storm", 1, 100, 100).with_overload(2),
    )
    .unwrap()];

    play_card(&mut state, &resolver, Side::First, PlayRequest::new(0)).unwrap();
    controller.end_turn(&mut state, Side::First).unwrap();

    let player = state.side(Side::First);
    assert_eq!(player.max_mana, 2);
    assert_eq!(player.mana, 0);
    assert_eq!(player.overload, 0);
}

/// The opponent's turn is skipped entirely when it is already beaten.
#[test]
fn test_defeated_opponent_skips_its_turn() {
    let registry = EffectRegistry::new();
    let controller = TurnController::new(EffectResolver::new(&registry), &ScriptedAi);
    let mut state = solo(5, 10);
    state.side_mut(Side::First).field = vec![placed("Breaker", 500, 500), placed("Finisher", 500, 500)];
    state.side_mut(Side::Second).hp = 300;
    state.side_mut(Side::Second).field = vec![placed("Biter", 200, 100)];
    let ai_hand = state.side(Side::Second).hand.clone();

    let report = controller.end_turn(&mut state, Side::First).unwrap();

    assert!(report.opponent_actions.is_empty());
    assert_eq!(report.winner, Some(MatchOutcome::Victory(Side::First)));
    assert_eq!(state.outcome, Some(MatchOutcome::Victory(Side::First)));
    assert_eq!(state.side(Side::Second).hand, ai_hand, "no AI draw or play");
    assert_eq!(state.side(Side::First).hp, 2000, "no AI attack");
    assert_eq!(state.side(Side::First).field[0].hp(), 300);
}

/// An opponent already at 0 before the call is treated the same way.
#[test]
fn test_opponent_at_zero_before_end_turn() {
    let registry = EffectRegistry::new();
    let controller = TurnController::new(EffectResolver::new(&registry), &ScriptedAi);
    let mut state = solo(5, 10);
    state.side_mut(Side::Second).hp = 0;

    let report = controller.end_turn(&mut state, Side::First).unwrap();

    assert!(report.opponent_actions.is_empty());
    assert_eq!(report.winner, Some(MatchOutcome::Victory(Side::First)));
}

/// Both heroes falling in the same round is a draw.
#[test]
fn test_simultaneous_defeat_is_draw() {
    let registry = EffectRegistry::new();
    let controller = TurnController::new(EffectResolver::new(&registry), &Passive);
    let mut state = solo(1, 0);
    state.side_mut(Side::First).hp = 50;
    state.side_mut(Side::First).status_effects.insert(SIDE_POISON.to_string(), 1);
    state.side_mut(Side::First).field = vec![placed("Finisher", 500, 500)];
    state.side_mut(Side::Second).hp = 100;

    let report = controller.end_turn(&mut state, Side::First).unwrap();

    assert_eq!(report.winner, Some(MatchOutcome::Draw));
}

/// A one-turn stun costs the stunned monster exactly one attack.
#[test]
fn test_stun_skips_one_attack_then_clears() {
    let registry = EffectRegistry::new();
    let resolver = EffectResolver::new(&registry);
    let controller = TurnController::new(resolver, &Passive);
    let mut state = solo(1, 0);
    state.side_mut(Side::Second).field = vec![placed("Ogre", 300, 1000)];
    state.side_mut(Side::First).hand = vec![CardInstance::from_data(&CardData::spell("Daze", 1, "stun:1")).unwrap()];

    play_card(&mut state, &resolver, Side::First, PlayRequest::new(0)).unwrap();
    assert!(state.side(Side::Second).field[0].has_status(StatusFlags::STUNNED));

    let report = controller.end_turn(&mut state, Side::First).unwrap();
    assert_eq!(state.side(Side::First).hp, 2000);
    assert!(report.battle_log.iter().any(|l| l.contains("stunned")));
    assert!(!state.side(Side::Second).field[0].has_status(StatusFlags::STUNNED));

    controller.end_turn(&mut state, Side::First).unwrap();
    assert_eq!(state.side(Side::First).hp, 1700);
}

/// A one-turn stun cast by the AI wears off in the round's refresh, before
/// the stunned player monster ever misses an attack.
#[test]
fn test_ai_stun_expires_before_player_attacks() {
    let registry = EffectRegistry::new();
    let controller = TurnController::new(EffectResolver::new(&registry), &PlaysFirst);
    let mut state = solo(1, 0);
    state.side_mut(Side::First).field = vec![placed("Ogre", 300, 1000)];
    state.side_mut(Side::Second).hand = vec![CardInstance::from_data(&CardData::spell("Daze", 1, "stun:1")).unwrap()];

    let first = controller.end_turn(&mut state, Side::First).unwrap();
    assert_eq!(first.opponent_actions.len(), 1);
    assert!(first.opponent_actions[0].contains("Daze"));
    assert_eq!(state.side(Side::Second).hp, 1700);
    assert!(!state.side(Side::First).field[0].has_status(StatusFlags::STUNNED));
    assert_eq!(state.side(Side::First).field[0].stun_duration, 0);

    let second = controller.end_turn(&mut state, Side::First).unwrap();
    assert!(second.opponent_actions.is_empty());
    assert_eq!(state.side(Side::Second).hp, 1400);
    assert!(!second.battle_log.iter().any(|l| l.contains("stunned")));
}

/// Side poison drains the opponent on its own turn.
#[test]
fn test_side_poison_ticks_on_opponent_turn() {
    let registry = EffectRegistry::new();
    let resolver = EffectResolver::new(&registry);
    let controller = TurnController::new(resolver, &Passive);
    let mut state = solo(1, 0);
    state.side_mut(Side::First).hand = vec![CardInstance::from_data(&CardData::spell("Venom", 1, "poison:2")).unwrap()];

    play_card(&mut state, &resolver, Side::First, PlayRequest::new(0).with_target(SpellTarget::Opponent)).unwrap();
    controller.end_turn(&mut state, Side::First).unwrap();
    assert_eq!(state.side(Side::Second).hp, 1950);

    controller.end_turn(&mut state, Side::First).unwrap();
    assert_eq!(state.side(Side::Second).hp, 1900);

    controller.end_turn(&mut state, Side::First).unwrap();
    assert_eq!(state.side(Side::Second).hp, 1900);
    assert_eq!(state.side(Side::Second).status_turns(SIDE_POISON), 0);
}

/// No field keeps a dead monster once `end_turn` returns.
#[test]
fn test_no_dead_monsters_after_round() {
    let registry = EffectRegistry::new();
    let controller = TurnController::new(EffectResolver::new(&registry), &Passive);
    let mut state = solo(1, 0);
    state.side_mut(Side::First).field = vec![placed("A", 300, 100), placed("B", 50, 60)];
    state.side_mut(Side::Second).field = vec![placed("C", 200, 250), placed("D", 100, 50)];

    controller.end_turn(&mut state, Side::First).unwrap();

    for side in Side::BOTH {
        assert!(state.side(side).field.iter().all(|m| m.hp() > 0));
    }
}

/// A restored match continues exactly like the in-memory one.
#[test]
fn test_round_trip_then_end_turn_matches() {
    let registry = EffectRegistry::new();
    let resolver = EffectResolver::new(&registry);
    let controller = TurnController::new(resolver, &ScriptedAi);

    let mut live = solo(1, 20);
    play_card(&mut live, &resolver, Side::First, PlayRequest::new(0)).unwrap_or_default();
    controller.end_turn(&mut live, Side::First).unwrap();

    let mut restored = MatchState::from_bytes(&live.to_bytes().unwrap()).unwrap();
    assert_eq!(restored, live);

    for _ in 0..3 {
        let a = controller.end_turn(&mut live, Side::First).unwrap();
        let b = controller.end_turn(&mut restored, Side::First).unwrap();
        assert_eq!(a, b);
        assert_eq!(live, restored);
    }
}

/// Ending the turn twice in versus play without the other side acting fails.
#[test]
fn test_versus_requires_alternation() {
    let registry = EffectRegistry::new();
    let controller = TurnController::new(EffectResolver::new(&registry), &Passive);
    let mut state = MatchState::new(
        MatchConfig::default(),
        MatchMode::Versus,
        SideMap::from_pair(Vec::new(), Vec::new()),
        1,
    );

    controller.end_turn(&mut state, Side::First).unwrap();
    assert!(controller.end_turn(&mut state, Side::First).is_err());
    controller.end_turn(&mut state, Side::Second).unwrap();
    assert_eq!(state.turn_count, 2);
}
