//! Directorio comunidad → canal de moderación.
//!
//! Se arma una sola vez, con la foto de comunidades y canales que entrega el
//! gateway al conectarse, y después es sólo lectura. Comunidades o canales
//! creados más tarde no se descubren.
use indexmap::IndexMap;
use log::{info, warn};
use modflow_core::{ChannelId, CommunityId};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Nombres de canal derivados de la identidad del bot.
///
/// Con el patrón por defecto `[gG]roup (\d+) [bB]ot`, el bot `Group 13 Bot`
/// modera `group-13-mod` y monitorea `group-13`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelNaming {
    pub group: String,
    pub moderation: String,
    pub monitored: String,
}

impl ChannelNaming {
    /// Falla si el nombre del bot no contiene el patrón de identidad.
    pub fn from_identity(bot_name: &str,
                         pattern: &Regex,
                         moderation_template: &str,
                         monitored_template: &str)
                         -> Result<Self, ConfigError> {
        let group = pattern.captures(bot_name)
                           .and_then(|caps| caps.get(1))
                           .map(|m| m.as_str().to_string())
                           .ok_or_else(|| ConfigError::IdentityMismatch { name: bot_name.to_string(),
                                                                          pattern: pattern.as_str().to_string() })?;
        Ok(Self { moderation: moderation_template.replace("{group}", &group),
                  monitored: monitored_template.replace("{group}", &group),
                  group })
    }

    pub fn is_moderation(&self, channel_name: &str) -> bool {
        channel_name == self.moderation
    }

    pub fn is_monitored(&self, channel_name: &str) -> bool {
        channel_name == self.monitored
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelSnapshot {
    pub id: ChannelId,
    pub name: String,
}

/// Comunidad tal como la ve el bot al conectarse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuildSnapshot {
    pub id: CommunityId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub channels: Vec<ChannelSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModerationChannel {
    pub community: CommunityId,
    pub channel_id: ChannelId,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct Directory {
    naming: ChannelNaming,
    channels: IndexMap<CommunityId, ModerationChannel>,
}

impl Directory {
    pub fn build(naming: ChannelNaming, guilds: &[GuildSnapshot]) -> Self {
        let mut channels = IndexMap::new();
        for guild in guilds {
            match guild.channels.iter().find(|c| naming.is_moderation(&c.name)) {
                Some(c) => {
                    info!("directory:found community={} channel={} name={}", guild.id, c.id, c.name);
                    channels.insert(guild.id,
                                    ModerationChannel { community: guild.id,
                                                        channel_id: c.id,
                                                        name: c.name.clone() });
                }
                None => warn!("directory:missing community={} expected={}", guild.id, naming.moderation),
            }
        }
        info!("directory:ready communities={} moderated={}", guilds.len(), channels.len());
        Self { naming, channels }
    }

    pub fn resolve(&self, community: CommunityId) -> Option<&ModerationChannel> {
        self.channels.get(&community)
    }

    pub fn naming(&self) -> &ChannelNaming {
        &self.naming
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}
