//! End-to-end round resolution tests against a minimal test catalog.

use std::collections::HashMap;

use raid_core::status::{StatusKind, StatusParams};
use raid_core::{
    AbilityCategory, AbilityKind, AbilityOracle, AbilityParams, AbilitySpec, ActorId,
    BalanceParams, ClassBaseline, ClassKind, DispatchRegistry, Env, GameConfig, GameState,
    LogKind, PartyMemberSpec, PassiveGrant, PcgRng, RaceKind, RacialRegistry, RacialSpec,
    RoundResolver, SubmitError, TablesOracle, Target, TargetShape, Winner, submit_action,
    submit_racial_action,
};

// ============================================================================
// Test fixtures
// ============================================================================

/// Catalog with a handful of abilities and explicit numbers, so every test
/// controls exactly what its actors can do.
struct TestCatalog {
    specs: HashMap<AbilityKind, AbilitySpec>,
    kit: Vec<AbilityKind>,
    racials: HashMap<RaceKind, RacialSpec>,
}

impl TestCatalog {
    fn new(specs: Vec<AbilitySpec>) -> Self {
        let kit = specs.iter().map(|s| s.kind).collect();
        Self {
            specs: specs.into_iter().map(|s| (s.kind, s)).collect(),
            kit,
            racials: HashMap::new(),
        }
    }

    fn with_racial(mut self, spec: RacialSpec) -> Self {
        self.racials.insert(spec.race, spec);
        self
    }

    fn with_undying_revenants(self) -> Self {
        self.with_racial(RacialSpec {
            race: RaceKind::Revenant,
            name: "Undying",
            passive: Some(PassiveGrant {
                effect: StatusKind::Undying,
                params: StatusParams::marker(StatusParams::PERMANENT),
            }),
            action: None,
        })
    }

    fn with_human_rally(self) -> Self {
        self.with_racial(RacialSpec {
            race: RaceKind::Human,
            name: "Rally",
            passive: None,
            action: Some(raid_core::RacialActionSpec {
                shape: TargetShape::AllAllies,
                params: AbilityParams::status(8, 0.0, 0),
                uses: 1,
            }),
        })
    }
}

impl AbilityOracle for TestCatalog {
    fn ability_spec(&self, kind: AbilityKind) -> Option<&AbilitySpec> {
        self.specs.get(&kind)
    }

    fn class_abilities(&self, _class: ClassKind) -> &[AbilityKind] {
        &self.kit
    }

    fn racial_spec(&self, race: RaceKind) -> Option<&RacialSpec> {
        self.racials.get(&race)
    }

    fn class_baseline(&self, _class: ClassKind) -> ClassBaseline {
        ClassBaseline {
            max_hp: 100,
            armor: 0,
            luck: 0,
        }
    }
}

struct TestTables(BalanceParams);

impl TablesOracle for TestTables {
    fn balance(&self) -> &BalanceParams {
        &self.0
    }
}

/// Deterministic balance: no crits, no detection, harmless level scaling.
fn quiet_balance() -> BalanceParams {
    let mut params = BalanceParams::default();
    params.crit.base_chance = 0.0;
    params.crit.luck_scale = 0.0;
    params.detection_probability = 0.0;
    params.monster.base_damage = 0;
    params.monster.sweep_interval = 0;
    params
}

fn attack_spec(kind: AbilityKind, power: u32, priority: i8, cooldown: u8) -> AbilitySpec {
    AbilitySpec {
        kind,
        category: AbilityCategory::Attack,
        shape: TargetShape::Single,
        params: AbilityParams::damage(power),
        priority,
        cooldown,
        unlock_level: 1,
        passive: None,
    }
}

fn heal_spec(kind: AbilityKind, power: u32) -> AbilitySpec {
    AbilitySpec {
        kind,
        category: AbilityCategory::Heal,
        shape: TargetShape::Single,
        params: AbilityParams::damage(power),
        priority: 6,
        cooldown: 0,
        unlock_level: 1,
        passive: None,
    }
}

fn member(id: u32, race: RaceKind, saboteur: bool) -> PartyMemberSpec {
    PartyMemberSpec {
        id: ActorId(id),
        name: format!("p{id}"),
        class: ClassKind::Warrior,
        race,
        saboteur,
    }
}

struct Fixture {
    catalog: TestCatalog,
    tables: TestTables,
    rng: PcgRng,
    config: GameConfig,
    registry: DispatchRegistry,
    racials: RacialRegistry,
}

impl Fixture {
    fn new(catalog: TestCatalog, balance: BalanceParams) -> Self {
        Self {
            catalog,
            tables: TestTables(balance),
            rng: PcgRng,
            config: GameConfig::default(),
            registry: DispatchRegistry::standard(),
            racials: RacialRegistry::standard(),
        }
    }

    fn env(&self) -> raid_core::SystemsEnv<'_> {
        Env::with_all(&self.catalog, &self.tables, &self.rng).as_systems_env()
    }

    fn state(&self, party: &[PartyMemberSpec]) -> GameState {
        GameState::create(party, 42, &self.env()).expect("state")
    }

    fn resolve(&self, state: &mut GameState) -> raid_core::RoundOutcome {
        RoundResolver::new(state, &self.config, &self.registry, &self.racials)
            .resolve(&self.env())
    }
}

// ============================================================================
// Submission rules
// ============================================================================

#[test]
fn one_class_and_one_racial_action_per_round() {
    let fixture = Fixture::new(
        TestCatalog::new(vec![attack_spec(AbilityKind::Strike, 10, 5, 0)]).with_human_rally(),
        quiet_balance(),
    );
    let mut state = fixture.state(&[member(1, RaceKind::Human, false)]);

    submit_action(
        &mut state,
        &fixture.env(),
        &fixture.registry,
        ActorId(1),
        AbilityKind::Strike,
        Target::Monster,
    )
    .expect("first submission");

    let second = submit_action(
        &mut state,
        &fixture.env(),
        &fixture.registry,
        ActorId(1),
        AbilityKind::Strike,
        Target::Monster,
    );
    assert_eq!(second, Err(SubmitError::AlreadySubmitted(ActorId(1))));

    // The racial queue is parallel and still open.
    submit_racial_action(
        &mut state,
        &fixture.env(),
        &fixture.racials,
        ActorId(1),
        Target::AllAllies,
    )
    .expect("racial submission");
    let racial_again = submit_racial_action(
        &mut state,
        &fixture.env(),
        &fixture.racials,
        ActorId(1),
        Target::AllAllies,
    );
    assert_eq!(racial_again, Err(SubmitError::AlreadySubmitted(ActorId(1))));

    assert!(state.all_actions_submitted());
}

#[test]
fn cooldown_blocks_resubmission_until_it_runs_out() {
    let fixture = Fixture::new(
        TestCatalog::new(vec![attack_spec(AbilityKind::Fireball, 10, 5, 1)]),
        quiet_balance(),
    );
    let mut state = fixture.state(&[member(1, RaceKind::Human, false)]);

    submit_action(
        &mut state,
        &fixture.env(),
        &fixture.registry,
        ActorId(1),
        AbilityKind::Fireball,
        Target::Monster,
    )
    .expect("submit");
    fixture.resolve(&mut state);

    // One round of cooldown: the next window rejects it.
    let blocked = submit_action(
        &mut state,
        &fixture.env(),
        &fixture.registry,
        ActorId(1),
        AbilityKind::Fireball,
        Target::Monster,
    );
    assert_eq!(blocked, Err(SubmitError::OnCooldown(AbilityKind::Fireball)));

    fixture.resolve(&mut state);
    submit_action(
        &mut state,
        &fixture.env(),
        &fixture.registry,
        ActorId(1),
        AbilityKind::Fireball,
        Target::Monster,
    )
    .expect("usable again after the cooldown");
}

#[test]
fn invisible_target_redirects_and_fails_without_candidates() {
    let fixture = Fixture::new(
        TestCatalog::new(vec![attack_spec(AbilityKind::Strike, 10, 5, 0)]),
        quiet_balance(),
    );
    let mut state = fixture.state(&[
        member(1, RaceKind::Human, false),
        member(2, RaceKind::Human, false),
        member(3, RaceKind::Human, false),
    ]);
    state
        .actor_mut(ActorId(2))
        .unwrap()
        .effects
        .apply(StatusKind::Invisible, StatusParams::marker(2), ActorId(2));

    submit_action(
        &mut state,
        &fixture.env(),
        &fixture.registry,
        ActorId(1),
        AbilityKind::Strike,
        Target::Player(ActorId(2)),
    )
    .expect("redirected submission");
    let queued = state.round.pending.last().unwrap();
    assert_ne!(queued.target, Target::Player(ActorId(2)));

    // Two invisible actors and a dead monster leave nowhere to redirect.
    let mut cornered = fixture.state(&[
        member(1, RaceKind::Human, false),
        member(2, RaceKind::Human, false),
    ]);
    for id in [1, 2] {
        cornered
            .actor_mut(ActorId(id))
            .unwrap()
            .effects
            .apply(StatusKind::Invisible, StatusParams::marker(2), ActorId(id));
    }
    cornered.monster.hp = 0;
    let result = submit_action(
        &mut cornered,
        &fixture.env(),
        &fixture.registry,
        ActorId(1),
        AbilityKind::Strike,
        Target::Player(ActorId(2)),
    );
    assert_eq!(result, Err(SubmitError::NoVisibleTarget));
}

// ============================================================================
// Round phases
// ============================================================================

#[test]
fn actions_resolve_by_priority_then_submission_order() {
    let fixture = Fixture::new(
        TestCatalog::new(vec![
            attack_spec(AbilityKind::Strike, 5, 2, 0),
            attack_spec(AbilityKind::Fireball, 5, 9, 0),
            attack_spec(AbilityKind::Backstab, 5, 2, 0),
        ]),
        quiet_balance(),
    );
    let mut state = fixture.state(&[
        member(1, RaceKind::Human, false),
        member(2, RaceKind::Human, false),
        member(3, RaceKind::Human, false),
    ]);

    // Submitted low-priority first; the fireball must still resolve first,
    // and the two priority-2 attacks keep submission order.
    let env = fixture.env();
    submit_action(&mut state, &env, &fixture.registry, ActorId(1), AbilityKind::Strike, Target::Monster).unwrap();
    submit_action(&mut state, &env, &fixture.registry, ActorId(2), AbilityKind::Fireball, Target::Monster).unwrap();
    submit_action(&mut state, &env, &fixture.registry, ActorId(3), AbilityKind::Backstab, Target::Monster).unwrap();

    let outcome = fixture.resolve(&mut state);
    let damage_sources: Vec<_> = outcome
        .log
        .entries()
        .iter()
        .filter(|e| e.kind == LogKind::Damage)
        .filter_map(|e| e.source)
        .collect();
    assert_eq!(
        damage_sources,
        vec![ActorId(2), ActorId(1), ActorId(3)],
        "priority desc, then submission order asc"
    );
}

#[test]
fn coordinated_healing_is_amplified() {
    let fixture = Fixture::new(
        TestCatalog::new(vec![heal_spec(AbilityKind::Mend, 10)]),
        quiet_balance(),
    );
    let mut state = fixture.state(&[
        member(1, RaceKind::Human, false),
        member(2, RaceKind::Human, false),
        member(3, RaceKind::Human, false),
    ]);
    state.actor_mut(ActorId(3)).unwrap().hp = 50;

    let env = fixture.env();
    submit_action(&mut state, &env, &fixture.registry, ActorId(1), AbilityKind::Mend, Target::Player(ActorId(3))).unwrap();
    submit_action(&mut state, &env, &fixture.registry, ActorId(2), AbilityKind::Mend, Target::Player(ActorId(3))).unwrap();
    fixture.resolve(&mut state);

    // Two healing contributors: 10 * 1.15 = 11 each, floored.
    assert_eq!(state.actor(ActorId(3)).unwrap().hp, 72);
}

#[test]
fn a_failing_handler_never_blocks_the_rest_of_the_round() {
    fn broken(_ctx: &mut raid_core::EffectContext<'_>) -> Result<(), raid_core::HandlerError> {
        Err(raid_core::HandlerError::EffectRejected("test explosion"))
    }

    let mut fixture = Fixture::new(
        TestCatalog::new(vec![
            attack_spec(AbilityKind::Fireball, 10, 9, 0),
            attack_spec(AbilityKind::Strike, 10, 1, 0),
        ]),
        quiet_balance(),
    );
    fixture.registry.register(AbilityKind::Fireball, broken);

    let mut state = fixture.state(&[
        member(1, RaceKind::Human, false),
        member(2, RaceKind::Human, false),
    ]);
    let monster_hp = state.monster.hp;

    let env = fixture.env();
    submit_action(&mut state, &env, &fixture.registry, ActorId(1), AbilityKind::Fireball, Target::Monster).unwrap();
    submit_action(&mut state, &env, &fixture.registry, ActorId(2), AbilityKind::Strike, Target::Monster).unwrap();

    let outcome = fixture.resolve(&mut state);

    assert!(
        outcome
            .log
            .entries()
            .iter()
            .any(|e| e.kind == LogKind::Error && e.message.contains("test explosion")),
        "failure is logged"
    );
    assert!(state.monster.hp < monster_hp, "later action still landed");
    assert_eq!(state.round.number, outcome.round + 1, "round completed");
}

#[test]
fn stunned_at_resolution_is_skipped_with_a_log_entry() {
    // The mage freezes the victim (priority 9, 100% proc) before the
    // victim's own strike (priority 1) comes up.
    let frost = AbilitySpec {
        kind: AbilityKind::FrostLance,
        category: AbilityCategory::Attack,
        shape: TargetShape::Single,
        params: AbilityParams::status(5, 1.0, 1),
        priority: 9,
        cooldown: 0,
        unlock_level: 1,
        passive: None,
    };
    let fixture = Fixture::new(
        TestCatalog::new(vec![frost, attack_spec(AbilityKind::Strike, 10, 1, 0)]),
        quiet_balance(),
    );
    let mut state = fixture.state(&[
        member(1, RaceKind::Human, false),
        member(2, RaceKind::Human, false),
    ]);
    let monster_hp = state.monster.hp;

    let env = fixture.env();
    submit_action(&mut state, &env, &fixture.registry, ActorId(2), AbilityKind::Strike, Target::Monster).unwrap();
    submit_action(&mut state, &env, &fixture.registry, ActorId(1), AbilityKind::FrostLance, Target::Player(ActorId(2))).unwrap();

    let outcome = fixture.resolve(&mut state);
    assert!(
        outcome
            .log
            .entries()
            .iter()
            .any(|e| e.message.contains("stunned and cannot use")),
        "skip is logged, not an error"
    );
    assert_eq!(state.monster.hp, monster_hp, "the stunned strike never landed");
}

// ============================================================================
// Status tick
// ============================================================================

#[test]
fn poison_ticks_each_round_and_expires() {
    let fixture = Fixture::new(TestCatalog::new(vec![]), quiet_balance());
    let mut state = fixture.state(&[member(1, RaceKind::Human, false)]);
    state
        .actor_mut(ActorId(1))
        .unwrap()
        .effects
        .apply(StatusKind::Poisoned, StatusParams::flat(10, 2), ActorId(1));

    fixture.resolve(&mut state);
    {
        let actor = state.actor(ActorId(1)).unwrap();
        assert_eq!(actor.hp, 90);
        assert_eq!(actor.effects.get(StatusKind::Poisoned).unwrap().turns, 1);
    }

    fixture.resolve(&mut state);
    {
        let actor = state.actor(ActorId(1)).unwrap();
        assert_eq!(actor.hp, 80);
        assert!(!actor.effects.has(StatusKind::Poisoned), "expired after two ticks");
    }
}

#[test]
fn regeneration_reveals_a_saboteur_healer_when_detection_hits() {
    let mut balance = quiet_balance();
    balance.detection_probability = 1.0;
    let fixture = Fixture::new(TestCatalog::new(vec![]), balance);
    let mut state = fixture.state(&[
        member(1, RaceKind::Human, true),
        member(2, RaceKind::Human, false),
    ]);
    let target = state.actor_mut(ActorId(2)).unwrap();
    target.hp = 50;
    target
        .effects
        .apply(StatusKind::Regenerating, StatusParams::flat(8, 2), ActorId(1));

    let outcome = fixture.resolve(&mut state);

    assert_eq!(state.actor(ActorId(2)).unwrap().hp, 58);
    assert!(state.actor(ActorId(1)).unwrap().revealed);
    let entries = outcome.log.entries();
    let reveal_pos = entries
        .iter()
        .position(|e| e.kind == LogKind::Reveal)
        .expect("reveal entry");
    // Reveal entries are partitioned after everything else.
    assert!(entries[reveal_pos..].iter().all(|e| e.kind.partitions_to_tail() || e.kind == LogKind::Reveal));
}

// ============================================================================
// Death, resurrection, win conditions
// ============================================================================

#[test]
fn undying_saves_exactly_once() {
    let mut balance = quiet_balance();
    balance.monster.base_damage = 500;
    let fixture = Fixture::new(
        TestCatalog::new(vec![]).with_undying_revenants(),
        balance,
    );
    let mut state = fixture.state(&[member(1, RaceKind::Revenant, false)]);
    assert!(state.actor(ActorId(1)).unwrap().effects.has(StatusKind::Undying));

    let outcome = fixture.resolve(&mut state);
    {
        let actor = state.actor(ActorId(1)).unwrap();
        assert!(actor.alive, "survived the first lethal hit");
        assert_eq!(actor.hp, 1);
        assert!(!actor.effects.has(StatusKind::Undying), "consumed");
    }
    assert!(
        outcome
            .log
            .entries()
            .iter()
            .any(|e| e.kind == LogKind::Resurrection)
    );

    let outcome = fixture.resolve(&mut state);
    assert!(!state.actor(ActorId(1)).unwrap().alive, "the second death sticks");
    assert_eq!(outcome.winner, Some(Winner::Saboteurs));
}

#[test]
fn monster_death_is_a_party_victory_and_levels_the_room() {
    let fixture = Fixture::new(
        TestCatalog::new(vec![attack_spec(AbilityKind::Strike, 10, 5, 0)]),
        quiet_balance(),
    );
    let mut state = fixture.state(&[
        member(1, RaceKind::Human, false),
        member(2, RaceKind::Human, true),
    ]);
    state.monster.hp = 1;
    state.actor_mut(ActorId(1)).unwrap().hp = 40;

    let env = fixture.env();
    submit_action(&mut state, &env, &fixture.registry, ActorId(1), AbilityKind::Strike, Target::Monster).unwrap();
    let outcome = fixture.resolve(&mut state);

    assert_eq!(outcome.winner, Some(Winner::Party));
    assert!(outcome.level_up);
    assert_eq!(state.level, 2);
    // Loyal survivors are healed to full; the hidden saboteur is not.
    assert_eq!(state.actor(ActorId(1)).unwrap().hp, 100);
    // A scaled encounter is back at full health.
    assert!(state.monster.is_alive());
    assert!(state.monster.max_hp > 100);
    assert!(state.round.accepting, "the raid continues");
}

#[test]
fn monster_death_at_the_level_cap_ends_the_game() {
    let mut fixture = Fixture::new(
        TestCatalog::new(vec![attack_spec(AbilityKind::Strike, 10, 5, 0)]),
        quiet_balance(),
    );
    fixture.config = GameConfig::with_level_cap(1);
    let mut state = fixture.state(&[member(1, RaceKind::Human, false)]);
    state.monster.hp = 1;

    let env = fixture.env();
    submit_action(&mut state, &env, &fixture.registry, ActorId(1), AbilityKind::Strike, Target::Monster).unwrap();
    let outcome = fixture.resolve(&mut state);

    assert_eq!(outcome.winner, Some(Winner::Party));
    assert!(!outcome.level_up);
    assert!(!state.monster.is_alive(), "no respawn past the cap");
    assert!(!state.round.accepting, "room closed");
}

// ============================================================================
// Hidden roles
// ============================================================================

#[test]
fn saboteur_damage_is_corrupted_and_logged_privately() {
    let fixture = Fixture::new(
        TestCatalog::new(vec![attack_spec(AbilityKind::Strike, 20, 5, 0)]),
        quiet_balance(),
    );
    let mut state = fixture.state(&[
        member(1, RaceKind::Human, true),
        member(2, RaceKind::Human, false),
    ]);
    let monster_hp = state.monster.hp;

    let env = fixture.env();
    submit_action(&mut state, &env, &fixture.registry, ActorId(1), AbilityKind::Strike, Target::Monster).unwrap();
    let outcome = fixture.resolve(&mut state);

    // 20 halved by corruption to 10, then the monster's armor 2 blocks 2.
    let dealt = monster_hp - state.monster.hp;
    assert_eq!(dealt, 8, "corruption discounted the hit");

    let corruption = outcome
        .log
        .entries()
        .iter()
        .find(|e| e.kind == LogKind::Corruption)
        .expect("corruption entry");
    assert!(corruption.visible_to(ActorId(1)));
    assert!(!corruption.visible_to(ActorId(2)), "other players never see it");
    // Partitioned to the tail of the round.
    assert_eq!(outcome.log.entries().last().unwrap().kind, LogKind::Corruption);
}

// ============================================================================
// Corruption gate
// ============================================================================

#[test]
fn corrupt_state_aborts_the_round_with_one_error_entry() {
    let fixture = Fixture::new(TestCatalog::new(vec![]), quiet_balance());
    let mut state = fixture.state(&[member(1, RaceKind::Human, false)]);
    state.actor_mut(ActorId(1)).unwrap().hp = 9999;

    let round_before = state.round.number;
    let outcome = fixture.resolve(&mut state);

    let errors: Vec<_> = outcome
        .log
        .entries()
        .iter()
        .filter(|e| e.kind == LogKind::Error)
        .collect();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].message.contains("corruption"));
    assert_eq!(state.round.number, round_before, "round did not advance");

    // The room stays usable once the corruption is repaired.
    state.actor_mut(ActorId(1)).unwrap().hp = 100;
    let outcome = fixture.resolve(&mut state);
    assert!(outcome.log.entries().iter().all(|e| e.kind != LogKind::Error));
}
