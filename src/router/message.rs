use modflow_core::{ChannelId, CommunityId, UserId};
use serde::{Deserialize, Serialize};

/// Mensaje entrante tal como lo entrega el gateway.
///
/// `community == None` es un mensaje directo; en ese caso `channel` viene
/// vacío.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundMessage {
    pub author: UserId,
    #[serde(default)]
    pub author_name: String,
    #[serde(default)]
    pub community: Option<CommunityId>,
    #[serde(default)]
    pub channel: String,
    pub content: String,
}

impl InboundMessage {
    pub fn direct(author: UserId, content: impl Into<String>) -> Self {
        Self { author,
               author_name: String::new(),
               community: None,
               channel: String::new(),
               content: content.into() }
    }

    pub fn in_channel(author: UserId, community: CommunityId, channel: impl Into<String>, content: impl Into<String>) -> Self {
        Self { author,
               author_name: String::new(),
               community: Some(community),
               channel: channel.into(),
               content: content.into() }
    }

    pub fn with_author_name(mut self, name: impl Into<String>) -> Self {
        self.author_name = name.into();
        self
    }

    pub fn is_direct(&self) -> bool {
        self.community.is_none()
    }

    /// Nombre para mostrar en los reenvíos; cae al ID si el gateway no lo mandó.
    pub fn display_author(&self) -> String {
        if self.author_name.is_empty() {
            self.author.to_string()
        } else {
            self.author_name.clone()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Destination {
    User(UserId),
    Channel(ChannelId),
}

/// Envío saliente, sin confirmación de entrega.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outbound {
    pub destination: Destination,
    pub content: String,
}

impl Outbound {
    pub fn to_user(user: UserId, content: impl Into<String>) -> Self {
        Self { destination: Destination::User(user),
               content: content.into() }
    }

    pub fn to_channel(channel: ChannelId, content: impl Into<String>) -> Self {
        Self { destination: Destination::Channel(channel),
               content: content.into() }
    }
}
