use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Tipos de flujo soportados. El orden de `ALL` es el orden por defecto en que
/// el router ofrece un mismo mensaje directo a cada tipo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkflowKind {
    /// Reporte de un mensaje concreto.
    Report,
    /// Aviso de un coloquialismo/término codificado.
    Inform,
}

impl WorkflowKind {
    pub const ALL: [WorkflowKind; 2] = [WorkflowKind::Report, WorkflowKind::Inform];

    /// Prefijo que abre un flujo nuevo desde un mensaje directo.
    pub fn start_keyword(self) -> &'static str {
        match self {
            WorkflowKind::Report => "report",
            WorkflowKind::Inform => "inform",
        }
    }

    pub fn as_str(self) -> &'static str {
        self.start_keyword()
    }

    /// Línea del texto de ayuda.
    pub fn usage(self) -> &'static str {
        match self {
            WorkflowKind::Report => "Use the `report` command to begin the reporting process.",
            WorkflowKind::Inform => "Use the `inform` command to tell the moderators about a colloquialism.",
        }
    }

    pub fn matches_start(self, content: &str) -> bool {
        content.starts_with(self.start_keyword())
    }
}

impl fmt::Display for WorkflowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkflowKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "report" => Ok(WorkflowKind::Report),
            "inform" => Ok(WorkflowKind::Inform),
            other => Err(CoreError::UnknownKind(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_kind_names() {
        assert_eq!("Report".parse::<WorkflowKind>(), Ok(WorkflowKind::Report));
        assert_eq!(" inform ".parse::<WorkflowKind>(), Ok(WorkflowKind::Inform));
        assert_eq!("appeal".parse::<WorkflowKind>(), Err(CoreError::UnknownKind("appeal".into())));
    }

    #[test]
    fn start_keyword_is_a_prefix_match() {
        assert!(WorkflowKind::Report.matches_start("report"));
        assert!(WorkflowKind::Report.matches_start("report this please"));
        assert!(!WorkflowKind::Report.matches_start("please report"));
        assert!(!WorkflowKind::Inform.matches_start("report"));
    }
}
