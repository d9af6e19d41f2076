//! Predicate evaluation and turn resolution benchmarks.

use std::hint::black_box;
use std::sync::Arc;

use criterion::{criterion_group, criterion_main, Criterion};
use cyoa_engine::{
    Action, ActionCondition, Effect, GameEvent, GameState, Location, MemoryLookup, Predicate,
    RunState, Story, StoryId, TriggerAction, TriggerEngine,
};

fn bench_eval(c: &mut Criterion) {
    let lookup = MemoryLookup::new()
        .with_int("Strength", 5)
        .with_str("class", "fighter")
        .with_str_arr("inventory", ["rope", "lamp", "sword"])
        .with_scope("npc", Arc::new(MemoryLookup::new().with_int("mood", 2)));

    let pred = Predicate::all([
        Predicate::gt("Strength", "3"),
        Predicate::str_in("'sword", "inventory"),
        Predicate::none_of([Predicate::lt("npc.mood", "0")]),
        Predicate::str_in("class", "['fighter, 'paladin]"),
    ]);

    c.bench_function("eval_nested_predicate", |b| {
        b.iter(|| black_box(&pred).eval(black_box(&lookup)))
    });
}

fn bench_turn(c: &mut Criterion) {
    let attack = Action::new("attack", "Attack!")
        .with_trigger(
            TriggerAction::new()
                .with_condition(Predicate::gt("Strength", "3"))
                .with_effect(Effect::tweak("ogre_defeated", 1))
                .as_final(),
        )
        .with_trigger(TriggerAction::new().with_effect(Effect::tweak("player_killed", 1)));
    let lair = Location::new("lair", "Ogre Encounter").offering(ActionCondition::new("attack"));
    let story = Story::new(StoryId::new(1), "Ogres").with_trigger(
        TriggerAction::new()
            .with_condition(Predicate::gt("ogre_defeated", "0"))
            .with_effect(Effect::set_state(RunState::Complete)),
    );

    let mut state = GameState::new("lair").with_value("Strength", 5);
    for i in 0..256 {
        state = state.with_value(format!("flag_{i}"), i);
    }

    let engine = TriggerEngine::new();
    let event = GameEvent::new(&lair, &story, &state).with_action(&attack);

    c.bench_function("resolve_turn", |b| {
        b.iter(|| engine.resolve(black_box(&event)))
    });
}

criterion_group!(benches, bench_eval, bench_turn);
criterion_main!(benches);
