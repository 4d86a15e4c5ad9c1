//! Attack phase resolution.
//!
//! Every monster on the attacking field swings once (twice with windfury)
//! in field order. Damage between monsters is simultaneous: the defender
//! takes the attacker's attack and the attacker takes the defender's attack
//! as counter-damage in the same step. Destroyed monsters are swept from
//! both fields once the whole phase has resolved.

use smallvec::SmallVec;
use tracing::debug;

use crate::cards::{CardInstance, Keywords};
use crate::core::{MatchState, Side, SideState};

use super::events::{BattleEvent, BattleReport};

/// Per-phase constants read from the match before fields are borrowed.
struct PhaseContext {
    attacker: Side,
    defender: Side,
    attacker_label: &'static str,
    defender_label: &'static str,
    max_hp: i32,
    poison_damage: i32,
}

/// Resolves attack phases.
pub struct CombatResolver;

impl CombatResolver {
    /// Run `attacker`'s attack phase, then sweep both fields.
    pub fn resolve_attack_phase(state: &mut MatchState, attacker: Side) -> BattleReport {
        let ctx = PhaseContext {
            attacker,
            defender: attacker.opponent(),
            attacker_label: state.label(attacker),
            defender_label: state.label(attacker.opponent()),
            max_hp: state.config.max_hp,
            poison_damage: state.config.poison_keyword_damage,
        };
        let mut report = BattleReport::new();

        // Attackers act in field order; the order is fixed for the phase.
        let attacker_count = state.side(attacker).field.len();
        let (own, foe) = state.sides.pair_mut(attacker);

        for index in 0..attacker_count {
            let monster = &own.field[index];
            if !monster.can_attack() {
                report.line(format!("{}'s {} is stunned and cannot attack", ctx.attacker_label, monster.name));
                continue;
            }

            let swings = if monster.has_keyword(Keywords::WINDFURY) { 2 } else { 1 };
            for _ in 0..swings {
                if own.field[index].is_destroyed() {
                    break;
                }
                Self::strike(own, foe, index, &ctx, &mut report);
            }
        }

        Self::sweep_destroyed(state, ctx.defender, &mut report);
        Self::sweep_destroyed(state, ctx.attacker, &mut report);
        report
    }

    /// Pick the monster an attack must hit.
    ///
    /// The first living taunt wins; otherwise the first living monster.
    /// `None` means the attack goes to the hero.
    #[must_use]
    pub fn select_target(field: &[CardInstance]) -> Option<usize> {
        field
            .iter()
            .position(|m| !m.is_destroyed() && m.has_keyword(Keywords::TAUNT))
            .or_else(|| field.iter().position(|m| !m.is_destroyed()))
    }

    /// One swing by `own.field[index]`.
    fn strike(own: &mut SideState, foe: &mut SideState, index: usize, ctx: &PhaseContext, report: &mut BattleReport) {
        let attacker = &own.field[index];
        let name = attacker.name.clone();
        let attack = attacker.attack;
        let lifesteal = attacker.has_keyword(Keywords::LIFESTEAL);
        let poisonous = attacker.has_keyword(Keywords::POISON);

        let dealt = match Self::select_target(&foe.field) {
            None => {
                foe.hp = foe.hp.saturating_sub(attack);
                report.line(format!(
                    "{}'s {} attacks {} directly for {} damage",
                    ctx.attacker_label, name, ctx.defender_label, attack
                ));
                report.event(BattleEvent::damage(&name, ctx.defender_label, ctx.defender, None, attack));
                debug!(attacker = %name, target = ctx.defender_label, damage = attack, "direct hit");
                attack
            }
            Some(target_index) => {
                let target = &mut foe.field[target_index];
                let counter = target.attack;

                let landed = if target.consume_divine_shield() {
                    report.line(format!("{}'s divine shield absorbs the attack from {}", target.name, name));
                    0
                } else {
                    target.take_damage(attack);
                    report.line(format!(
                        "{}'s {} attacks {} for {} damage",
                        ctx.attacker_label, name, target.name, attack
                    ));
                    report.event(BattleEvent::damage(&name, &target.name, ctx.defender, Some(target_index), attack));
                    attack
                };

                if poisonous && landed > 0 && !target.is_destroyed() {
                    target.poison(ctx.poison_damage);
                    report.line(format!("{} is poisoned", target.name));
                }

                // Counter-damage always lands, shield or not.
                let target_name = target.name.clone();
                own.field[index].take_damage(counter);
                report.line(format!("{} strikes back at {} for {} damage", target_name, name, counter));
                report.event(BattleEvent::damage(&target_name, &name, ctx.attacker, Some(index), counter));
                debug!(
                    attacker = %name,
                    target = %target_name,
                    damage = landed,
                    counter,
                    "monster exchange"
                );
                landed
            }
        };

        if lifesteal && dealt > 0 {
            let healed = own.heal(dealt, ctx.max_hp);
            report.line(format!("{} restores {} hp to {} (lifesteal)", name, healed, ctx.attacker_label));
        }
    }

    /// Remove every monster at or below 0 health from `side`'s field.
    ///
    /// Removal runs from the back of the field, and each `Destroyed` event
    /// is emitted as its monster is removed. Applying the events in order
    /// therefore reproduces the field: every index is valid at its removal.
    pub fn sweep_destroyed(state: &mut MatchState, side: Side, report: &mut BattleReport) {
        let label = state.label(side);
        let field = &mut state.side_mut(side).field;

        let destroyed: SmallVec<[usize; 4]> = field
            .iter()
            .enumerate()
            .filter(|(_, m)| m.is_destroyed())
            .map(|(i, _)| i)
            .collect();

        for &index in destroyed.iter().rev() {
            let name = field.remove(index).name;
            report.line(format!("{}'s {} is destroyed", label, name));
            report.event(BattleEvent::Destroyed {
                target: name,
                side,
                index,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardData, StatusFlags};
    use crate::core::{MatchConfig, MatchMode, SideMap};

    fn empty_match() -> MatchState {
        MatchState::new(
            MatchConfig::default(),
            MatchMode::Solo { ai_level: 1 },
            SideMap::from_pair(Vec::new(), Vec::new()),
            1,
        )
    }

    fn monster(name: &str, attack: i32, hp: i32, keywords: &str) -> CardInstance {
        let data = CardData::monster(name, 1, attack, hp).with_keywords(keywords);
        let mut card = CardInstance::from_data(&data).unwrap();
        card.prepare_for_field();
        card
    }

    #[test]
    fn test_select_target_prefers_first_taunt() {
        let field = vec![
            monster("A", 1, 10, ""),
            monster("B", 1, 10, "taunt"),
            monster("C", 1, 10, "taunt"),
        ];
        assert_eq!(CombatResolver::select_target(&field), Some(1));
    }

    #[test]
    fn test_select_target_skips_dead() {
        let mut field = vec![monster("A", 1, 10, "taunt"), monster("B", 1, 10, "")];
        field[0].take_damage(10);
        assert_eq!(CombatResolver::select_target(&field), Some(1));
        field[1].take_damage(20);
        assert_eq!(CombatResolver::select_target(&field), None);
    }

    #[test]
    fn test_direct_hit_on_empty_field() {
        let mut state = empty_match();
        state.side_mut(Side::First).field = vec![monster("Ogre", 300, 200, "")];

        let report = CombatResolver::resolve_attack_phase(&mut state, Side::First);

        assert_eq!(state.side(Side::Second).hp, 1700);
        assert_eq!(
            report.events,
            vec![BattleEvent::damage("Ogre", "ai", Side::Second, None, 300)]
        );
    }

    #[test]
    fn test_stunned_attacker_skips() {
        let mut state = empty_match();
        let mut ogre = monster("Ogre", 300, 200, "");
        ogre.stun(1);
        state.side_mut(Side::First).field = vec![ogre];

        let report = CombatResolver::resolve_attack_phase(&mut state, Side::First);

        assert_eq!(state.side(Side::Second).hp, 2000);
        assert!(report.events.is_empty());
        assert!(report.log[0].contains("stunned"));
    }

    #[test]
    fn test_lifesteal_heals_damage_dealt() {
        let mut state = empty_match();
        state.side_mut(Side::First).hp = 1000;
        state.side_mut(Side::First).field = vec![monster("Leech", 200, 500, "lifesteal")];
        state.side_mut(Side::Second).field = vec![monster("Wall", 50, 1000, "")];

        CombatResolver::resolve_attack_phase(&mut state, Side::First);

        // Heals the 200 dealt, not the 50 taken.
        assert_eq!(state.side(Side::First).hp, 1200);
        assert_eq!(state.side(Side::First).field[0].hp(), 450);
    }

    #[test]
    fn test_lifesteal_direct_hit_clamped() {
        let mut state = empty_match();
        state.side_mut(Side::First).hp = 1950;
        state.side_mut(Side::First).field = vec![monster("Leech", 200, 500, "lifesteal")];

        CombatResolver::resolve_attack_phase(&mut state, Side::First);

        assert_eq!(state.side(Side::First).hp, 2000);
        assert_eq!(state.side(Side::Second).hp, 1800);
    }

    #[test]
    fn test_poison_keyword_marks_defender() {
        let mut state = empty_match();
        state.side_mut(Side::First).field = vec![monster("Asp", 10, 500, "poison")];
        state.side_mut(Side::Second).field = vec![monster("Wall", 10, 1000, "")];

        CombatResolver::resolve_attack_phase(&mut state, Side::First);

        let wall = &state.side(Side::Second).field[0];
        assert!(wall.has_status(StatusFlags::POISONED));
        assert_eq!(wall.poison_damage, 50);
    }

    #[test]
    fn test_poison_keyword_not_on_direct_hit() {
        let mut state = empty_match();
        state.side_mut(Side::First).field = vec![monster("Asp", 10, 500, "poison")];

        CombatResolver::resolve_attack_phase(&mut state, Side::First);

        assert_eq!(state.side(Side::Second).hp, 1990);
        assert!(state.side(Side::Second).status_effects.is_empty());
    }

    #[test]
    fn test_poison_blocked_by_divine_shield() {
        let mut state = empty_match();
        state.side_mut(Side::First).field = vec![monster("Asp", 10, 500, "poison")];
        state.side_mut(Side::Second).field = vec![monster("Knight", 10, 100, "divine_shield")];

        CombatResolver::resolve_attack_phase(&mut state, Side::First);

        assert!(!state.side(Side::Second).field[0].has_status(StatusFlags::POISONED));
    }

    #[test]
    fn test_sweep_removes_both_sides() {
        let mut state = empty_match();
        state.side_mut(Side::First).field = vec![monster("Glass", 500, 100, "")];
        state.side_mut(Side::Second).field = vec![monster("Brittle", 300, 200, "")];

        let report = CombatResolver::resolve_attack_phase(&mut state, Side::First);

        assert!(state.side(Side::First).field.is_empty());
        assert!(state.side(Side::Second).field.is_empty());
        let destroyed: Vec<_> = report.events.iter().filter(|e| e.is_destroyed()).collect();
        assert_eq!(destroyed.len(), 2);
    }

    #[test]
    fn test_sweep_event_indices() {
        let mut state = empty_match();
        let mut field = vec![
            monster("A", 1, 1, ""),
            monster("B", 1, 1, ""),
            monster("C", 1, 1, ""),
            monster("D", 1, 1, ""),
        ];
        field[0].take_damage(5);
        field[2].take_damage(5);
        state.side_mut(Side::Second).field = field.clone();

        let mut report = BattleReport::new();
        CombatResolver::sweep_destroyed(&mut state, Side::Second, &mut report);

        let removed: Vec<_> = report
            .events
            .iter()
            .map(|e| match e {
                BattleEvent::Destroyed { target, index, .. } => (target.as_str(), *index),
                other => panic!("unexpected event {:?}", other),
            })
            .collect();
        assert_eq!(removed, vec![("C", 2), ("A", 0)]);

        // Replaying the removals in event order lands on the swept field.
        for (name, index) in removed {
            assert_eq!(field.remove(index).name, name);
        }
        let survivors: Vec<_> = state.side(Side::Second).field.iter().map(|m| m.name.clone()).collect();
        assert_eq!(survivors, vec!["B", "D"]);
        assert_eq!(field.iter().map(|m| m.name.clone()).collect::<Vec<_>>(), survivors);
    }

    #[test]
    fn test_huge_attack_saturates_hero_hp() {
        let mut state = empty_match();
        state.side_mut(Side::Second).hp = -10;
        state.side_mut(Side::First).field = vec![monster("Titan", i32::MAX, 100, "")];

        CombatResolver::resolve_attack_phase(&mut state, Side::First);
        assert_eq!(state.side(Side::Second).hp, i32::MIN);

        let mut wall = monster("Wall", 0, 1, "");
        wall.take_damage(i32::MAX);
        wall.take_damage(i32::MAX);
        assert_eq!(wall.hp(), i32::MIN);
        assert!(wall.is_destroyed());
    }

    #[test]
    fn test_windfury_attacker_dead_after_first_swing_stops() {
        let mut state = empty_match();
        state.side_mut(Side::First).field = vec![monster("Gust", 100, 100, "windfury")];
        state.side_mut(Side::Second).field = vec![monster("Spiker", 200, 1000, "")];

        let report = CombatResolver::resolve_attack_phase(&mut state, Side::First);

        assert_eq!(report.hits_by("Gust"), 1);
        assert!(state.side(Side::First).field.is_empty());
    }
}
