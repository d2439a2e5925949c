//! Puente con el conector de la plataforma: JSON delimitado por líneas.
//!
//! Entrada (stdin):
//! - `{"type":"ready","bot":{"id":1,"name":"Group 13 Bot"},"guilds":[...]}` una vez;
//! - `{"type":"message","author":5,"community":10,"channel":"group-13","content":"..."}`.
//!
//! Salida (stdout): `{"type":"send","destination":{"channel":11},"content":"..."}`.
use modflow_core::UserId;
use serde::{Deserialize, Serialize};

use crate::directory::GuildSnapshot;
use crate::errors::BotError;
use crate::router::{Destination, InboundMessage, Outbound};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotIdentity {
    pub id: UserId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GatewayEvent {
    Ready {
        #[serde(default)]
        bot: Option<BotIdentity>,
        #[serde(default)]
        guilds: Vec<GuildSnapshot>,
    },
    Message(InboundMessage),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GatewayCommand {
    Send { destination: Destination, content: String },
}

impl From<Outbound> for GatewayCommand {
    fn from(out: Outbound) -> Self {
        GatewayCommand::Send { destination: out.destination,
                               content: out.content }
    }
}

/// Parsea una línea de entrada. Las líneas en blanco no son eventos.
pub fn parse_event(line: &str) -> Result<Option<GatewayEvent>, BotError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    Ok(Some(serde_json::from_str(line)?))
}

pub fn encode_command(out: Outbound) -> Result<String, BotError> {
    Ok(serde_json::to_string(&GatewayCommand::from(out))?)
}
