//! One room, one simulation.

use chrono::Utc;
use raid_content::{BalanceTables, Catalog};
use raid_core::{
    AbilityKind, ActorId, ActorState, BalanceParams, DispatchRegistry, Env, GameConfig,
    GameError, GameState, PartyMemberSpec, PcgRng, RacialRegistry, RoundOutcome, RoundResolver,
    SubmitError, Target, submit_action, submit_racial_action,
};
use tracing::{debug, info, info_span};

use crate::error::RoomError;
use crate::events::{EventBus, GameDecided, RoomEvent, RoundResolved, Topic};

/// Creation-time knobs for a room.
#[derive(Clone, Debug, Default)]
pub struct RoomOptions {
    /// Fixed seed for replayable games; defaults to fresh entropy.
    pub seed: Option<u64>,
    pub config: GameConfig,
    /// Balance override; defaults to the shipped tuning.
    pub balance: Option<BalanceParams>,
}

/// An independent, single-threaded room simulation.
///
/// Submissions only enqueue; [`Room::resolve_round`] runs one round to
/// completion synchronously and publishes the result on the bus. Nothing
/// here is shared between rooms.
pub struct Room {
    id: String,
    state: GameState,
    config: GameConfig,
    catalog: Catalog,
    tables: BalanceTables,
    rng: PcgRng,
    registry: DispatchRegistry,
    racials: RacialRegistry,
    bus: EventBus,
}

impl Room {
    /// Creates a room and its starting state for the given party.
    pub fn create(
        id: impl Into<String>,
        party: &[PartyMemberSpec],
        options: RoomOptions,
    ) -> Result<Self, RoomError> {
        let id = id.into();
        let seed = options.seed.unwrap_or_else(rand::random);
        let catalog = Catalog::standard();
        let tables = options
            .balance
            .map(BalanceTables::with_params)
            .unwrap_or_default();
        let rng = PcgRng;

        let state = {
            let env = Env::with_all(&catalog, &tables, &rng).as_systems_env();
            GameState::create(party, seed, &env)?
        };
        info!(room = %id, players = party.len(), seed, "room created");

        Ok(Self {
            id,
            state,
            config: options.config,
            catalog,
            tables,
            rng,
            registry: DispatchRegistry::standard(),
            racials: RacialRegistry::standard(),
            bus: EventBus::new(),
        })
    }

    // ========================================================================
    // Submission surface
    // ========================================================================

    /// Queues a class action. Failures are synchronous and leave no trace.
    pub fn submit_action(
        &mut self,
        actor: ActorId,
        ability: AbilityKind,
        target: Target,
    ) -> Result<(), SubmitError> {
        let env = Env::with_all(&self.catalog, &self.tables, &self.rng).as_systems_env();
        let result = submit_action(&mut self.state, &env, &self.registry, actor, ability, target);
        if let Err(error) = &result {
            debug!(room = %self.id, %actor, %ability, %error, code = error.error_code(), "action rejected");
        }
        result
    }

    /// Queues the once-per-round racial action.
    pub fn submit_racial_action(
        &mut self,
        actor: ActorId,
        target: Target,
    ) -> Result<(), SubmitError> {
        let env = Env::with_all(&self.catalog, &self.tables, &self.rng).as_systems_env();
        let result = submit_racial_action(&mut self.state, &env, &self.racials, actor, target);
        if let Err(error) = &result {
            debug!(room = %self.id, %actor, %error, code = error.error_code(), "racial action rejected");
        }
        result
    }

    // ========================================================================
    // Resolution
    // ========================================================================

    /// Resolves the current round synchronously and broadcasts the outcome.
    ///
    /// # Errors
    ///
    /// Returns [`RoomError::Finished`] once the game has been decided.
    pub fn resolve_round(&mut self) -> Result<RoundOutcome, RoomError> {
        if self.finished() {
            return Err(RoomError::Finished);
        }

        let span = info_span!("round", room = %self.id, round = self.state.round.number);
        let _guard = span.enter();

        let env = Env::with_all(&self.catalog, &self.tables, &self.rng).as_systems_env();
        let outcome =
            RoundResolver::new(&mut self.state, &self.config, &self.registry, &self.racials)
                .resolve(&env);

        info!(
            entries = outcome.log.len(),
            level = outcome.level,
            winner = ?outcome.winner,
            "round resolved"
        );

        self.bus.publish(RoomEvent::Round(RoundResolved {
            room: self.id.clone(),
            round: outcome.round,
            level: outcome.level,
            winner: outcome.winner,
            timestamp: Utc::now(),
            log: outcome.log.entries().to_vec(),
        }));
        if let Some(winner) = outcome.winner
            && self.finished()
        {
            self.bus.publish(RoomEvent::Outcome(GameDecided {
                room: self.id.clone(),
                winner,
                timestamp: Utc::now(),
            }));
        }

        Ok(outcome)
    }

    // ========================================================================
    // Read-only queries
    // ========================================================================

    pub fn id(&self) -> &str {
        &self.id
    }

    /// True once a final winner has been decided.
    pub fn finished(&self) -> bool {
        !self.state.round.accepting
    }

    /// Living party members in roster order.
    pub fn alive_actors(&self) -> impl Iterator<Item = &ActorState> {
        self.state.alive_actors()
    }

    /// True once every living actor able to act has queued a class action.
    pub fn all_actions_submitted(&self) -> bool {
        self.state.all_actions_submitted()
    }

    /// Whether an actor may act this round.
    pub fn can_act(&self, actor: ActorId) -> bool {
        self.state.actor(actor).is_some_and(|a| a.can_act())
    }

    /// Full state access for host-side inspection and tests.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Subscribes to the room's event stream.
    pub fn subscribe(&self, topic: Topic) -> tokio::sync::broadcast::Receiver<RoomEvent> {
        self.bus.subscribe(topic)
    }
}
