//! modflow: bot de flujos de moderación.
//!
//! Este crate arma la aplicación sobre los crates del workspace:
//! - `config`: variables de entorno (.env) → `AppConfig`.
//! - `directory`: comunidad → canal de moderación, armado al conectar.
//! - `router`: `DispatchRouter`, único punto de entrada de mensajes.
//! - `gateway` / `bot`: puente JSON por líneas con el conector de la plataforma.
//! - `providers`: servicios HTTP de traducción y clasificación.
//! - `errors`: errores de configuración (fatales) y de ruteo (recuperables).

pub mod bot;
pub mod config;
pub mod directory;
pub mod errors;
pub mod gateway;
pub mod providers;
pub mod router;

pub use config::AppConfig;
pub use directory::{ChannelNaming, Directory, GuildSnapshot, ModerationChannel};
pub use errors::{BotError, ConfigError, RoutingError};
pub use router::{Destination, DispatchRouter, InboundMessage, Outbound};
