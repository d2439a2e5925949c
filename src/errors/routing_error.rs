use modflow_core::{CommunityId, CorrelationId};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RoutingError {
    #[error("Message must start with report id or inform id (ex: 3:1)")]
    MalformedPrefix,
    #[error("Could not find a report or inform with id {0}")]
    UnknownCorrelation(CorrelationId),
    #[error("No moderation channel is configured for community {0}")]
    NoModerationChannel(CommunityId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_visible_texts() {
        assert_eq!(RoutingError::MalformedPrefix.to_string(), "Message must start with report id or inform id (ex: 3:1)");
        assert_eq!(RoutingError::UnknownCorrelation(CorrelationId(7)).to_string(),
                   "Could not find a report or inform with id 7");
    }
}
