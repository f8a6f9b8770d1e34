/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    /// Party level at which a monster kill ends the game instead of
    /// respawning a stronger encounter.
    pub level_cap: u32,
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum party size for one room.
    pub const MAX_PARTY_SIZE: usize = 8;
    /// Maximum simultaneous status effects per entity.
    pub const MAX_STATUS_EFFECTS: usize = 16;
    /// Maximum unlocked ability slots per actor.
    pub const MAX_ABILITY_SLOTS: usize = 8;
    /// Maximum stack count for a stackable status effect.
    pub const MAX_EFFECT_STACKS: u8 = 5;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_LEVEL_CAP: u32 = 5;

    pub fn new() -> Self {
        Self {
            level_cap: Self::DEFAULT_LEVEL_CAP,
        }
    }

    pub fn with_level_cap(level_cap: u32) -> Self {
        Self { level_cap }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
