//! Room state owned by the round resolver.
//!
//! [`GameState`] is the single source of truth for one room: the party
//! roster, the monster, the current encounter level, and the round-scoped
//! submission queues. All mutation flows through the resolver and the ability
//! handlers it dispatches; nothing in this module reaches for oracles or I/O.

mod actor;
mod monster;
mod round;

pub use actor::{AbilitySlot, ActorState, RoundFlags};
pub use monster::MonsterState;
pub use round::RoundState;

use crate::ability::{ClassKind, RaceKind};
use crate::config::GameConfig;
use crate::env::{SystemsEnv, compute_seed};
use crate::error::{ErrorSeverity, GameError};

/// Identifier of a player actor within one room.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorId(pub u32);

impl core::fmt::Display for ActorId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "actor#{}", self.0)
    }
}

/// Entity id used when seeding rolls made on the monster's behalf.
pub(crate) const MONSTER_SEED_ID: u32 = u32::MAX;

/// Sentinel source id for effects the monster applies. Never matches a real
/// roster member, so name lookups and detection checks fall through cleanly.
pub(crate) const MONSTER_ACTOR: ActorId = ActorId(MONSTER_SEED_ID);

/// Resolved target of a submitted action.
///
/// Replaces the string sentinels of older designs with a closed set the
/// validator and handlers can match on exhaustively.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Target {
    Player(ActorId),
    Monster,
    AllAllies,
}

/// What killed (or is about to kill) an actor. Carried through the
/// pending-death window for log attribution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DeathCause {
    Monster,
    Poison(ActorId),
    Player(ActorId),
}

/// Party member description handed in at room creation.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PartyMemberSpec {
    pub id: ActorId,
    pub name: String,
    pub class: ClassKind,
    pub race: RaceKind,
    /// Hidden role. Never broadcast until a reveal mechanic fires.
    pub saboteur: bool,
}

/// Errors raised while assembling the initial room state.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SetupError {
    #[error("party is empty")]
    EmptyParty,

    #[error("party exceeds {max} members", max = GameConfig::MAX_PARTY_SIZE)]
    PartyTooLarge,

    #[error("duplicate actor id {0}")]
    DuplicateActor(ActorId),

    #[error("catalog is missing a spec for an ability in a class kit")]
    MissingAbilitySpec,

    #[error(transparent)]
    Oracle(#[from] crate::env::OracleError),
}

impl GameError for SetupError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::EmptyParty | Self::PartyTooLarge | Self::DuplicateActor(_) => {
                ErrorSeverity::Validation
            }
            Self::MissingAbilitySpec => ErrorSeverity::Internal,
            Self::Oracle(_) => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyParty => "SETUP_EMPTY_PARTY",
            Self::PartyTooLarge => "SETUP_PARTY_TOO_LARGE",
            Self::DuplicateActor(_) => "SETUP_DUPLICATE_ACTOR",
            Self::MissingAbilitySpec => "SETUP_MISSING_ABILITY_SPEC",
            Self::Oracle(_) => "SETUP_ORACLE",
        }
    }
}

/// Raised by the pre-round corruption check; aborts the round.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StateError {
    #[error("{0} has hp above maximum")]
    HealthAboveMax(ActorId),

    #[error("{0} is flagged alive at zero hp with no pending death")]
    AliveAtZeroHealth(ActorId),

    #[error("{0} is flagged dead with positive hp")]
    DeadWithHealth(ActorId),

    #[error("monster hp above maximum")]
    MonsterHealthAboveMax,
}

impl GameError for StateError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::HealthAboveMax(_) => "STATE_HEALTH_ABOVE_MAX",
            Self::AliveAtZeroHealth(_) => "STATE_ALIVE_AT_ZERO_HEALTH",
            Self::DeadWithHealth(_) => "STATE_DEAD_WITH_HEALTH",
            Self::MonsterHealthAboveMax => "STATE_MONSTER_HEALTH_ABOVE_MAX",
        }
    }
}

/// Complete state of one room's simulation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    pub actors: Vec<ActorState>,
    pub monster: MonsterState,
    /// Party level; drives monster scaling and ability unlocks.
    pub level: u32,
    pub round: RoundState,
    /// Recomputed at round start from the non-saboteur health fraction.
    pub comeback_active: bool,
    /// Base seed fixed at room creation; with `nonce` it makes every roll
    /// reproducible.
    pub game_seed: u64,
    /// Bumped once per submission and per resolved action.
    pub nonce: u64,
}

impl GameState {
    /// Builds the starting state for a party.
    ///
    /// Baseline stats and level-1 kits come from the ability oracle; racial
    /// passives (e.g. the Revenant's one-use resurrection) are applied here,
    /// which is the only status application outside ability handlers and the
    /// tick.
    pub fn create(
        party: &[PartyMemberSpec],
        game_seed: u64,
        env: &SystemsEnv<'_>,
    ) -> Result<Self, SetupError> {
        if party.is_empty() {
            return Err(SetupError::EmptyParty);
        }
        if party.len() > GameConfig::MAX_PARTY_SIZE {
            return Err(SetupError::PartyTooLarge);
        }

        let abilities = env.abilities()?;
        let balance = env.balance()?;

        let mut actors: Vec<ActorState> = Vec::with_capacity(party.len());
        for member in party {
            if actors.iter().any(|a| a.id == member.id) {
                return Err(SetupError::DuplicateActor(member.id));
            }

            let baseline = abilities.class_baseline(member.class);
            let mut actor = ActorState::new(member, baseline);

            for &kind in abilities.class_abilities(member.class) {
                let spec = abilities
                    .ability_spec(kind)
                    .ok_or(SetupError::MissingAbilitySpec)?;
                if spec.unlock_level <= 1 {
                    actor.learn(spec);
                }
            }

            if let Some(racial) = abilities.racial_spec(member.race)
                && let Some(grant) = &racial.passive
            {
                actor.effects.apply(grant.effect, grant.params, actor.id);
            }

            actors.push(actor);
        }

        let monster = MonsterState::spawn(&balance.monster, actors.len() as u32);

        Ok(Self {
            actors,
            monster,
            level: 1,
            round: RoundState::new(),
            comeback_active: false,
            game_seed,
            nonce: 0,
        })
    }

    // ========================================================================
    // Roster access
    // ========================================================================

    pub fn actor(&self, id: ActorId) -> Option<&ActorState> {
        self.actors.iter().find(|a| a.id == id)
    }

    pub fn actor_mut(&mut self, id: ActorId) -> Option<&mut ActorState> {
        self.actors.iter_mut().find(|a| a.id == id)
    }

    /// Living party members in roster order.
    pub fn alive_actors(&self) -> impl Iterator<Item = &ActorState> {
        self.actors.iter().filter(|a| a.alive)
    }

    pub fn living_player_count(&self) -> u32 {
        self.alive_actors().count() as u32
    }

    /// True once every living actor able to act has queued a class action.
    pub fn all_actions_submitted(&self) -> bool {
        self.actors
            .iter()
            .filter(|a| a.can_act())
            .all(|a| a.flags.contains(RoundFlags::SUBMITTED_ACTION))
    }

    /// Aggregate health fraction of the non-saboteur team. Dead members
    /// contribute zero health but keep their maximum in the denominator.
    pub fn loyal_health_fraction(&self) -> f64 {
        let (hp, max_hp) = self
            .actors
            .iter()
            .filter(|a| !a.saboteur)
            .fold((0u64, 0u64), |(hp, max), a| {
                (hp + a.hp as u64, max + a.max_hp as u64)
            });
        if max_hp == 0 {
            return 1.0;
        }
        hp as f64 / max_hp as f64
    }

    // ========================================================================
    // Determinism
    // ========================================================================

    /// Seed for a roll made on behalf of `actor_id` at the current nonce.
    pub fn roll_seed(&self, actor_id: u32, context: u32) -> u64 {
        compute_seed(self.game_seed, self.nonce, actor_id, context)
    }

    pub fn bump_nonce(&mut self) {
        self.nonce += 1;
    }

    // ========================================================================
    // Invariants
    // ========================================================================

    /// Pre-round corruption check. A failure here is fatal for the round.
    pub fn validate(&self) -> Result<(), StateError> {
        for actor in &self.actors {
            if actor.hp > actor.max_hp {
                return Err(StateError::HealthAboveMax(actor.id));
            }
            if actor.alive && actor.hp == 0 && actor.pending_death.is_none() {
                return Err(StateError::AliveAtZeroHealth(actor.id));
            }
            if !actor.alive && actor.hp > 0 {
                return Err(StateError::DeadWithHealth(actor.id));
            }
        }
        if self.monster.hp > self.monster.max_hp {
            return Err(StateError::MonsterHealthAboveMax);
        }
        Ok(())
    }
}
