//! Room-level flow: submissions, resolution, events, visibility.

use raid_core::{
    AbilityKind, ActorId, BalanceParams, ClassKind, GameConfig, PartyMemberSpec, RaceKind,
    Target, Winner,
};
use raid_runtime::{Room, RoomError, RoomEvent, RoomOptions, Topic};

fn party() -> Vec<PartyMemberSpec> {
    let member = |id: u32, name: &str, class, race, saboteur| PartyMemberSpec {
        id: ActorId(id),
        name: name.to_string(),
        class,
        race,
        saboteur,
    };
    vec![
        member(1, "Brakka", ClassKind::Warrior, RaceKind::Orc, false),
        member(2, "Liriel", ClassKind::Mage, RaceKind::Elf, false),
        member(3, "Thobrun", ClassKind::Cleric, RaceKind::Dwarf, false),
        member(4, "Vex", ClassKind::Rogue, RaceKind::Human, true),
    ]
}

fn seeded(seed: u64) -> RoomOptions {
    RoomOptions {
        seed: Some(seed),
        ..RoomOptions::default()
    }
}

#[tokio::test]
async fn a_full_round_reaches_subscribers() {
    let mut room = Room::create("room-1", &party(), seeded(7)).unwrap();
    let mut rounds = room.subscribe(Topic::Round);

    room.submit_action(ActorId(1), AbilityKind::Strike, Target::Monster)
        .unwrap();
    room.submit_action(ActorId(2), AbilityKind::FrostLance, Target::Monster)
        .unwrap();
    room.submit_action(ActorId(3), AbilityKind::Mend, Target::Player(ActorId(1)))
        .unwrap();
    room.submit_action(ActorId(4), AbilityKind::Backstab, Target::Monster)
        .unwrap();
    room.submit_racial_action(ActorId(1), Target::Player(ActorId(1)))
        .unwrap();
    assert!(room.all_actions_submitted());

    let monster_hp_before = room.state().monster.hp;
    let outcome = room.resolve_round().unwrap();

    assert_eq!(outcome.round, 1);
    assert!(outcome.log.len() > 4, "a full round narrates itself");
    assert!(room.state().monster.hp < monster_hp_before);

    let event = rounds.try_recv().expect("round event");
    let RoomEvent::Round(resolved) = event else {
        panic!("expected a round event");
    };
    assert_eq!(resolved.round, 1);
    assert_eq!(resolved.room, "room-1");
    assert!(!resolved.log.is_empty());
    // Events serialize for text-frame transports.
    assert!(RoomEvent::Round(resolved).to_json().is_ok());
}

#[tokio::test]
async fn private_corruption_entries_stay_private() {
    let mut room = Room::create("room-2", &party(), seeded(11)).unwrap();
    let mut rounds = room.subscribe(Topic::Round);

    // The hidden saboteur attacks the monster; the discount is logged only
    // for them.
    room.submit_action(ActorId(4), AbilityKind::Backstab, Target::Monster)
        .unwrap();
    room.resolve_round().unwrap();

    let RoomEvent::Round(resolved) = rounds.try_recv().unwrap() else {
        panic!("expected a round event");
    };
    let saboteur_view = resolved.visible_log(ActorId(4));
    let loyal_view = resolved.visible_log(ActorId(1));
    assert!(
        saboteur_view.iter().any(|e| e.message.contains("pulls the blow")),
        "the saboteur sees their own corruption note"
    );
    assert!(
        loyal_view.iter().all(|e| !e.message.contains("pulls the blow")),
        "loyal players never see it"
    );
}

#[tokio::test]
async fn finished_rooms_refuse_further_rounds() {
    let mut balance = BalanceParams::default();
    balance.monster.base_hp = 1;
    let options = RoomOptions {
        seed: Some(3),
        config: GameConfig::with_level_cap(1),
        balance: Some(balance),
    };
    let mut room = Room::create("room-3", &party(), options).unwrap();
    let mut outcomes = room.subscribe(Topic::Outcome);

    room.submit_action(ActorId(1), AbilityKind::Strike, Target::Monster)
        .unwrap();
    let outcome = room.resolve_round().unwrap();
    assert_eq!(outcome.winner, Some(Winner::Party));
    assert!(room.finished());

    let RoomEvent::Outcome(decided) = outcomes.try_recv().unwrap() else {
        panic!("expected an outcome event");
    };
    assert_eq!(decided.winner, Winner::Party);

    assert!(matches!(room.resolve_round(), Err(RoomError::Finished)));
    assert!(matches!(
        room.submit_action(ActorId(1), AbilityKind::Strike, Target::Monster),
        Err(raid_core::SubmitError::RoundClosed)
    ));
}

#[tokio::test]
async fn act_capability_tracks_liveness() {
    let room = Room::create("room-4", &party(), seeded(5)).unwrap();
    assert!(room.can_act(ActorId(1)));
    assert!(!room.can_act(ActorId(99)));
    assert_eq!(room.alive_actors().count(), 4);
}
