//! Palabras clave del protocolo con el usuario.
//!
//! Los keywords de inicio de cada flujo viven en `WorkflowKind::start_keyword`;
//! aquí quedan los que son comunes a todos los tipos.

/// Mensaje directo que devuelve el texto de ayuda.
pub const HELP_KEYWORD: &str = "help";

/// Cancela el flujo en curso (en cualquier estado no terminal).
pub const CANCEL_KEYWORD: &str = "cancel";
