//! Guild configuration snapshot: role and channel ids, the emoji reply table
//! and the privileged curator set. Loaded once at startup; a reload replaces
//! the whole snapshot atomically, so readers always see a complete one.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::PathBuf;
use std::sync::Arc;

use serde::Deserialize;
use serenity::model::id::{ChannelId, GuildId, RoleId, UserId};
use tokio::sync::RwLock;

use crate::error::ConfigError;

/// One entry of the emoji reply table. Premium entries require the emoji role.
#[derive(Debug, Clone, Deserialize)]
pub struct EmojiEntry {
    pub content: String,
    #[serde(default)]
    pub premium: bool,
}

/// Raw on-disk shape of the config file, validated into [`GuildConstants`].
#[derive(Debug, Deserialize)]
struct ConstantsFile {
    guild: u64,
    #[serde(default)]
    role: HashMap<String, u64>,
    #[serde(default)]
    channel: HashMap<String, u64>,
    #[serde(default)]
    emoji: BTreeMap<String, EmojiEntry>,
    #[serde(default)]
    curators: Vec<u64>,
}

/// Validated configuration snapshot. Immutable once built; swapping in a new
/// one is the only way it changes.
#[derive(Debug, Clone)]
pub struct GuildConstants {
    pub guild: GuildId,
    pub verified_role: RoleId,
    pub introductions_channel: ChannelId,
    /// Role unlocking premium emoji interactions. Premium entries resolve as
    /// unknown while this is unset.
    pub emoji_role: Option<RoleId>,
    /// Emoji reply table, keyed by lowercase name (slash command names are
    /// lowercase on the wire).
    pub emoji: BTreeMap<String, EmojiEntry>,
    /// Privileged identities: their embed messages are toggle targets, and
    /// only they may run admin prefix commands.
    pub curators: HashSet<UserId>,
}

impl GuildConstants {
    pub fn is_curator(&self, user: UserId) -> bool {
        self.curators.contains(&user)
    }
}

fn require_id(value: Option<u64>, key: &'static str) -> Result<u64, ConfigError> {
    match value {
        None => Err(ConfigError::MissingKey(key)),
        Some(0) => Err(ConfigError::InvalidId(key)),
        Some(id) => Ok(id),
    }
}

impl TryFrom<ConstantsFile> for GuildConstants {
    type Error = ConfigError;

    fn try_from(raw: ConstantsFile) -> Result<Self, ConfigError> {
        let guild = require_id(Some(raw.guild), "guild")?;
        let verified = require_id(raw.role.get("verified").copied(), "role.verified")?;
        let introductions =
            require_id(raw.channel.get("introductions").copied(), "channel.introductions")?;
        Ok(Self {
            guild: GuildId::new(guild),
            verified_role: RoleId::new(verified),
            introductions_channel: ChannelId::new(introductions),
            emoji_role: raw.role.get("emoji").copied().filter(|id| *id != 0).map(RoleId::new),
            emoji: raw
                .emoji
                .into_iter()
                .map(|(name, entry)| (name.to_lowercase(), entry))
                .collect(),
            curators: raw.curators.into_iter().filter(|id| *id != 0).map(UserId::new).collect(),
        })
    }
}

/// Process-wide store for the constants snapshot. Single writer (`load`),
/// any number of readers; `get` hands out the last loaded `Arc`.
#[derive(Debug)]
pub struct ConstantsStore {
    path: PathBuf,
    snapshot: RwLock<Option<Arc<GuildConstants>>>,
}

impl ConstantsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            snapshot: RwLock::new(None),
        }
    }

    /// Load (or reload) the config file and atomically replace the snapshot.
    /// On failure any previous snapshot stays in place.
    pub async fn load(&self) -> Result<Arc<GuildConstants>, ConfigError> {
        let text = std::fs::read_to_string(&self.path).map_err(|source| ConfigError::Read {
            path: self.path.clone(),
            source,
        })?;
        let raw: ConstantsFile = serde_json::from_str(&text)?;
        let constants = Arc::new(GuildConstants::try_from(raw)?);
        *self.snapshot.write().await = Some(constants.clone());
        Ok(constants)
    }

    /// The last successfully loaded snapshot.
    pub async fn get(&self) -> Result<Arc<GuildConstants>, ConfigError> {
        self.snapshot.read().await.clone().ok_or(ConfigError::NotInitialized)
    }
}
