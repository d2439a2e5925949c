//! Configuración central de la aplicación.
//! Carga variables de entorno (.env) una sola vez y arma un `AppConfig`
//! inmutable. Cualquier error acá es fatal: el bot no arranca.
use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use dotenvy::dotenv;
use modflow_core::{UserId, WorkflowKind};
use modflow_policies::{Denylist, EvaluationConfig, DEFAULT_TOXICITY_THRESHOLD};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::directory::ChannelNaming;
use crate::errors::ConfigError;

pub const DEFAULT_IDENTITY_PATTERN: &str = r"[gG]roup (\d+) [bB]ot";
pub const DEFAULT_MOD_CHANNEL: &str = "group-{group}-mod";
pub const DEFAULT_MONITORED_CHANNEL: &str = "group-{group}";
pub const DEFAULT_DENYLIST_PATH: &str = "colloquialisms.txt";
pub const DEFAULT_TRANSLATE_ENDPOINT: &str = "https://translation.googleapis.com/language/translate/v2";
pub const DEFAULT_PERSPECTIVE_ENDPOINT: &str = "https://commentanalyzer.googleapis.com/v1alpha1/comments:analyze";

// Carga perezosa del archivo .env una sola vez.
static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenv(); // ignora error si no existe .env
});

/// Credenciales y endpoints de los servicios de evaluación. Sin credencial el
/// servicio queda deshabilitado.
#[derive(Debug, Clone, Default)]
pub struct ServiceConfig {
    pub translate_api_key: Option<String>,
    pub translate_endpoint: String,
    pub perspective_api_key: Option<String>,
    pub perspective_endpoint: String,
    pub propaganda_endpoint: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bot_name: String,
    pub bot_id: UserId,
    pub naming: ChannelNaming,
    pub denylist_path: PathBuf,
    /// Tipos habilitados, en el orden en que el router los recorre.
    pub workflows: Vec<WorkflowKind>,
    pub evaluation: EvaluationConfig,
    pub services: ServiceConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        // asegura que .env se haya cargado
        Lazy::force(&DOTENV_LOADED);
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Igual que `from_env` pero leyendo de cualquier fuente clave → valor.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
        where F: Fn(&str) -> Option<String>
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let bot_name = get("MODFLOW_BOT_NAME").ok_or(ConfigError::Missing("MODFLOW_BOT_NAME"))?;
        let bot_id = UserId(parse_required(&get, "MODFLOW_BOT_ID")?);

        let pattern = Regex::new(&get("MODFLOW_IDENTITY_PATTERN").unwrap_or_else(|| DEFAULT_IDENTITY_PATTERN.into()))?;
        let naming = ChannelNaming::from_identity(&bot_name,
                                                  &pattern,
                                                  &get("MODFLOW_MOD_CHANNEL").unwrap_or_else(|| DEFAULT_MOD_CHANNEL.into()),
                                                  &get("MODFLOW_MONITORED_CHANNEL").unwrap_or_else(|| DEFAULT_MONITORED_CHANNEL.into()))?;

        let workflows = match get("MODFLOW_WORKFLOWS") {
            Some(list) => parse_workflows(&list)?,
            None => WorkflowKind::ALL.to_vec(),
        };

        let toxicity_threshold = parse_or(&get, "MODFLOW_TOXICITY_THRESHOLD", DEFAULT_TOXICITY_THRESHOLD)?;
        if !(0.0..=1.0).contains(&toxicity_threshold) {
            return Err(ConfigError::InvalidValue { key: "MODFLOW_TOXICITY_THRESHOLD",
                                                   value: toxicity_threshold.to_string() });
        }
        let defaults = EvaluationConfig::default();
        let timeout_ms = parse_or(&get, "MODFLOW_SERVICE_TIMEOUT_MS", defaults.service_timeout.as_millis() as u64)?;
        let evaluation = EvaluationConfig { toxicity_threshold,
                                            service_timeout: Duration::from_millis(timeout_ms),
                                            target_language: get("MODFLOW_TARGET_LANGUAGE").unwrap_or(defaults.target_language) };

        let services = ServiceConfig { translate_api_key: get("TRANSLATE_API_KEY"),
                                       translate_endpoint: get("TRANSLATE_ENDPOINT").unwrap_or_else(|| DEFAULT_TRANSLATE_ENDPOINT.into()),
                                       perspective_api_key: get("PERSPECTIVE_API_KEY"),
                                       perspective_endpoint: get("PERSPECTIVE_ENDPOINT").unwrap_or_else(|| DEFAULT_PERSPECTIVE_ENDPOINT.into()),
                                       propaganda_endpoint: get("PROPAGANDA_ENDPOINT") };

        Ok(Self { bot_name,
                  bot_id,
                  naming,
                  denylist_path: get("MODFLOW_DENYLIST_PATH").map(PathBuf::from)
                                                             .unwrap_or_else(|| PathBuf::from(DEFAULT_DENYLIST_PATH)),
                  workflows,
                  evaluation,
                  services })
    }
}

/// Lee la lista de bloqueo. El archivo es obligatorio.
pub fn load_denylist(path: &Path) -> Result<Denylist, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
    Ok(Denylist::parse(&contents))
}

fn parse_required<T, G>(get: &G, key: &'static str) -> Result<T, ConfigError>
    where T: FromStr,
          G: Fn(&str) -> Option<String>
{
    let raw = get(key).ok_or(ConfigError::Missing(key))?;
    raw.parse().map_err(|_| ConfigError::InvalidValue { key, value: raw })
}

fn parse_or<T, G>(get: &G, key: &'static str, default: T) -> Result<T, ConfigError>
    where T: FromStr,
          G: Fn(&str) -> Option<String>
{
    match get(key) {
        Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue { key, value: raw }),
        None => Ok(default),
    }
}

fn parse_workflows(list: &str) -> Result<Vec<WorkflowKind>, ConfigError> {
    let mut kinds = Vec::new();
    for name in list.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let kind: WorkflowKind = name.parse().map_err(|_| ConfigError::InvalidValue { key: "MODFLOW_WORKFLOWS",
                                                                                       value: name.to_string() })?;
        if !kinds.contains(&kind) {
            kinds.push(kind);
        }
    }
    if kinds.is_empty() {
        return Err(ConfigError::InvalidValue { key: "MODFLOW_WORKFLOWS",
                                               value: list.to_string() });
    }
    Ok(kinds)
}
