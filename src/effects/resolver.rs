//! Effect resolution - applying a spell's effect to the match.
//!
//! The resolver only reads and writes the `MatchState` it is given. It
//! performs no I/O and emits nothing outside the returned log line.

use tracing::debug;

use crate::cards::CardInstance;
use crate::core::{MatchState, Side, SIDE_POISON};

use super::{Effect, EffectContext, EffectRegistry, SpellTarget};

/// Log line for effects that do nothing.
pub const NO_EFFECT: &str = "No effect";

/// Signed form of an effect magnitude, saturating at `i32::MAX`.
fn magnitude(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

/// Resolves spell effects against a match.
#[derive(Clone, Copy, Debug)]
pub struct EffectResolver<'r> {
    registry: &'r EffectRegistry,
}

impl<'r> EffectResolver<'r> {
    /// Create a resolver that looks up custom effects in `registry`.
    #[must_use]
    pub fn new(registry: &'r EffectRegistry) -> Self {
        Self { registry }
    }

    /// Apply `card`'s effect cast by `caster` at `target`.
    ///
    /// Returns the log line describing what happened.
    pub fn apply(&self, state: &mut MatchState, card: &CardInstance, caster: Side, target: SpellTarget) -> String {
        let opponent = caster.opponent();
        let max_hp = state.config.max_hp;
        let name = card.name.as_str();

        let message = match &card.effect {
            Effect::None => NO_EFFECT.to_string(),

            Effect::Damage(value) => {
                if target == SpellTarget::Opponent {
                    let foe = state.side_mut(opponent);
                    foe.hp = foe.hp.saturating_sub(magnitude(*value));
                    format!("{} deals {} damage to {}", name, value, state.label(opponent))
                } else {
                    format!("{} has no valid target", name)
                }
            }

            Effect::Heal(value) => {
                if target == SpellTarget::Own {
                    let healed = state.side_mut(caster).heal(magnitude(*value), max_hp);
                    format!("{} restores {} hp to {}", name, healed, state.label(caster))
                } else {
                    format!("{} has no valid target", name)
                }
            }

            Effect::Boost(value) => {
                let field = &mut state.side_mut(caster).field;
                for monster in field.iter_mut() {
                    monster.attack = monster.attack.saturating_add(magnitude(*value));
                }
                format!("{} gives +{} attack to {} monsters", name, value, field.len())
            }

            // Recorded only. The shield has no mechanical effect.
            Effect::Shield(_) => format!("{} raises a shield for {}", name, state.label(caster)),

            Effect::Stun(turns) => {
                let field = &mut state.side_mut(opponent).field;
                for monster in field.iter_mut() {
                    monster.stun(*turns);
                }
                format!("{} stuns {} enemy monsters for {} turns", name, field.len(), turns)
            }

            Effect::Poison(turns) => {
                state
                    .side_mut(opponent)
                    .status_effects
                    .insert(SIDE_POISON.to_string(), *turns);
                format!("{} poisons {} for {} turns", name, state.label(opponent), turns)
            }

            Effect::ComboBoost(value) => {
                let combo = state.cards_played_this_turn;
                let bonus = magnitude(value.saturating_mul(combo));
                match state.side_mut(caster).field.last_mut() {
                    Some(monster) => {
                        monster.attack = monster.attack.saturating_add(bonus);
                        format!("{} gives +{} attack to {} (combo x{})", name, bonus, monster.name, combo)
                    }
                    None => format!("{} fizzles: no monster on the field", name),
                }
            }

            Effect::Custom { name: effect_name, value } => match self.registry.get(effect_name) {
                Some(handler) => {
                    let handler = handler.clone();
                    let ctx = EffectContext {
                        card_name: card.name.clone(),
                        value: *value,
                        caster,
                        target,
                    };
                    handler(state, &ctx)
                }
                None => NO_EFFECT.to_string(),
            },
        };

        debug!(card = name, effect = card.effect.name(), caster = %caster, "{}", message);
        message
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

    fn spell(effect: &str) -> CardInstance {
        CardInstance::from_data(&CardData::spell("Test Spell", 1, effect)).unwrap()
    }

    fn monster(attack: i32, hp: i32) -> CardInstance {
        let mut card = CardInstance::from_data(&CardData::monster("Minion", 1, attack, hp)).unwrap();
        card.prepare_for_field();
        card
    }

    #[test]
    fn test_damage_opponent() {
        let registry = EffectRegistry::new();
        let resolver = EffectResolver::new(&registry);
        let mut state = empty_match();

        let msg = resolver.apply(&mut state, &spell("damage:300"), Side::First, SpellTarget::Opponent);

        assert_eq!(state.side(Side::Second).hp, 1700);
        assert_eq!(state.side(Side::First).hp, 2000);
        assert_eq!(msg, "Test Spell deals 300 damage to ai");
    }

    #[test]
    fn test_huge_damage_never_heals() {
        let registry = EffectRegistry::new();
        let resolver = EffectResolver::new(&registry);
        let mut state = empty_match();
        state.side_mut(Side::Second).hp = 1000;

        resolver.apply(&mut state, &spell("damage:4294967295"), Side::First, SpellTarget::Opponent);
        assert!(state.side(Side::Second).hp <= 0);

        let mut raw = spell("damage:1");
        raw.effect = Effect::Damage(u32::MAX);
        resolver.apply(&mut state, &raw, Side::First, SpellTarget::Opponent);
        assert_eq!(state.side(Side::Second).hp, i32::MIN);
        assert!(state.side(Side::Second).is_defeated());
    }

    #[test]
    fn test_damage_self_target_does_nothing() {
        let registry = EffectRegistry::new();
        let resolver = EffectResolver::new(&registry);
        let mut state = empty_match();

        resolver.apply(&mut state, &spell("damage:300"), Side::First, SpellTarget::Own);
        assert_eq!(state.side(Side::First).hp, 2000);
        assert_eq!(state.side(Side::Second).hp, 2000);
    }

    #[test]
    fn test_heal_clamped() {
        let registry = EffectRegistry::new();
        let resolver = EffectResolver::new(&registry);
        let mut state = empty_match();
        state.side_mut(Side::Second).hp = 1800;

        let msg = resolver.apply(&mut state, &spell("heal:500"), Side::Second, SpellTarget::Own);
        assert_eq!(state.side(Side::Second).hp, 2000);
        assert_eq!(msg, "Test Spell restores 200 hp to ai");
    }

    #[test]
    fn test_boost_all_own_monsters() {
        let registry = EffectRegistry::new();
        let resolver = EffectResolver::new(&registry);
        let mut state = empty_match();
        state.side_mut(Side::First).field = vec![monster(100, 100), monster(200, 100)];
        state.side_mut(Side::Second).field = vec![monster(100, 100)];

        resolver.apply(&mut state, &spell("boost:50"), Side::First, SpellTarget::Own);

        let own: Vec<_> = state.side(Side::First).field.iter().map(|m| m.attack).collect();
        assert_eq!(own, vec![150, 250]);
        assert_eq!(state.side(Side::Second).field[0].attack, 100);
    }

    #[test]
    fn test_shield_is_log_only() {
        let registry = EffectRegistry::new();
        let resolver = EffectResolver::new(&registry);
        let mut state = empty_match();
        let before = state.clone();

        let msg = resolver.apply(&mut state, &spell("shield:200"), Side::First, SpellTarget::Own);

        assert_eq!(state, before);
        assert!(msg.contains("shield"));
    }

    #[test]
    fn test_stun_opposing_field() {
        let registry = EffectRegistry::new();
        let resolver = EffectResolver::new(&registry);
        let mut state = empty_match();
        state.side_mut(Side::Second).field = vec![monster(100, 100), monster(100, 100)];

        resolver.apply(&mut state, &spell("stun:2"), Side::First, SpellTarget::Opponent);

        for m in &state.side(Side::Second).field {
            assert!(m.has_status(StatusFlags::STUNNED));
            assert_eq!(m.stun_duration, 2);
        }
    }

    #[test]
    fn test_poison_overwrites_duration() {
        let registry = EffectRegistry::new();
        let resolver = EffectResolver::new(&registry);
        let mut state = empty_match();

        resolver.apply(&mut state, &spell("poison:3"), Side::First, SpellTarget::Opponent);
        assert_eq!(state.side(Side::Second).status_turns(SIDE_POISON), 3);

        resolver.apply(&mut state, &spell("poison:1"), Side::First, SpellTarget::Opponent);
        assert_eq!(state.side(Side::Second).status_turns(SIDE_POISON), 1);
        assert_eq!(state.side(Side::First).status_turns(SIDE_POISON), 0);
    }

    #[test]
    fn test_combo_boost_scales_with_cards_played() {
        let registry = EffectRegistry::new();
        let resolver = EffectResolver::new(&registry);
        let mut state = empty_match();
        state.side_mut(Side::First).field = vec![monster(100, 100), monster(100, 100)];
        state.cards_played_this_turn = 3;

        resolver.apply(&mut state, &spell("combo_boost:20"), Side::First, SpellTarget::Own);

        assert_eq!(state.side(Side::First).field[0].attack, 100);
        assert_eq!(state.side(Side::First).field[1].attack, 160);
    }

    #[test]
    fn test_huge_boosts_saturate() {
        let registry = EffectRegistry::new();
        let resolver = EffectResolver::new(&registry);
        let mut state = empty_match();
        state.side_mut(Side::First).field = vec![monster(100, 100)];
        state.cards_played_this_turn = 2;

        resolver.apply(&mut state, &spell("combo_boost:3000000000"), Side::First, SpellTarget::Own);
        assert_eq!(state.side(Side::First).field[0].attack, i32::MAX);

        let mut raw = spell("boost:1");
        raw.effect = Effect::Boost(u32::MAX);
        resolver.apply(&mut state, &raw, Side::First, SpellTarget::Own);
        assert_eq!(state.side(Side::First).field[0].attack, i32::MAX);

        raw.effect = Effect::Heal(u32::MAX);
        state.side_mut(Side::First).hp = 10;
        resolver.apply(&mut state, &raw, Side::First, SpellTarget::Own);
        assert_eq!(state.side(Side::First).hp, 2000);
    }

    #[test]
    fn test_combo_boost_empty_field() {
        let registry = EffectRegistry::new();
        let resolver = EffectResolver::new(&registry);
        let mut state = empty_match();
        state.cards_played_this_turn = 2;

        let msg = resolver.apply(&mut state, &spell("combo_boost:20"), Side::First, SpellTarget::Own);
        assert!(msg.contains("fizzles"));
    }

    #[test]
    fn test_unknown_effect_logs_no_effect() {
        let registry = EffectRegistry::new();
        let resolver = EffectResolver::new(&registry);
        let mut state = empty_match();
        let before = state.clone();

        assert_eq!(resolver.apply(&mut state, &spell("teleport:3"), Side::First, SpellTarget::Own), NO_EFFECT);
        assert_eq!(resolver.apply(&mut state, &spell(""), Side::First, SpellTarget::Own), NO_EFFECT);
        assert_eq!(state, before);
    }

    #[test]
    fn test_custom_effect_through_registry() {
        let registry = EffectRegistry::new().with("drain", |state, ctx| {
            let foe = ctx.caster.opponent();
            state.side_mut(foe).hp -= ctx.value as i32;
            state.side_mut(ctx.caster).hp += ctx.value as i32;
            format!("{} drains {}", ctx.card_name, ctx.value)
        });
        let resolver = EffectResolver::new(&registry);
        let mut state = empty_match();
        state.side_mut(Side::First).hp = 1000;

        let msg = resolver.apply(&mut state, &spell("drain:100"), Side::First, SpellTarget::Opponent);

        assert_eq!(msg, "Test Spell drains 100");
        assert_eq!(state.side(Side::First).hp, 1100);
        assert_eq!(state.side(Side::Second).hp, 1900);
    }
}
