//! Errores de la aplicación.
//!
//! - `ConfigError`: fatal, corta el arranque.
//! - `RoutingError`: recuperable; su texto se le responde al autor.
//! - `BotError`: lo que `main` puede recibir del loop del gateway.

pub mod bot_error;
pub mod config_error;
pub mod routing_error;

pub use bot_error::BotError;
pub use config_error::ConfigError;
pub use routing_error::RoutingError;
