//! Protocolo de correlación del canal de moderación: `"<id>:<resto>"`.
use modflow_core::CorrelationId;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::RoutingError;

static PREFIX_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+):").expect("static prefix regex"));

/// Separa el ID de correlación del resto del mensaje.
///
/// El resto se entrega sin espacios alrededor; puede quedar vacío.
pub fn parse_correlation_prefix(content: &str) -> Result<(CorrelationId, &str), RoutingError> {
    let caps = PREFIX_RE.captures(content).ok_or(RoutingError::MalformedPrefix)?;
    let whole = caps.get(0).ok_or(RoutingError::MalformedPrefix)?;
    let digits = caps.get(1).ok_or(RoutingError::MalformedPrefix)?;
    // Más dígitos de los que entran en u64 no pueden ser un ID emitido.
    let id = digits.as_str().parse::<u64>().map_err(|_| RoutingError::MalformedPrefix)?;
    Ok((CorrelationId(id), content[whole.end()..].trim()))
}
