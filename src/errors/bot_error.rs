use thiserror::Error;

use super::ConfigError;

#[derive(Debug, Error)]
pub enum BotError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("gateway IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed gateway line: {0}")]
    Protocol(#[from] serde_json::Error),
    #[error("message received before the ready event")]
    NotReady,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_is_transparent() {
        let err: BotError = ConfigError::Missing("MODFLOW_BOT_ID").into();
        assert_eq!(err.to_string(), "missing required setting MODFLOW_BOT_ID");
    }
}
