//! Identificadores tipados y asignador de IDs de correlación.
//!
//! Los IDs de la plataforma (usuarios, comunidades, canales) son opacos: sólo
//! se comparan y se imprimen. El `CorrelationId` lo asigna el propio motor y es
//! el que los moderadores escriben como prefijo (`"3:confirm"`).
use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(v: u64) -> Self {
                Self(v)
            }
        }
    };
}

id_type!(
    /// Autor de un mensaje (usuario final, moderador o el propio bot).
    UserId
);
id_type!(
    /// Servidor/guild de la plataforma.
    CommunityId
);
id_type!(
    /// Canal de texto dentro de una comunidad.
    ChannelId
);
id_type!(
    /// ID global de un flujo, compartido entre todos los `WorkflowKind`.
    CorrelationId
);

/// Contador monotónico de IDs de correlación.
///
/// Un único asignador por proceso: los IDs son únicos sin importar el tipo de
/// flujo. El procesamiento es de un mensaje a la vez, por eso basta `&mut self`;
/// un modelo concurrente necesitaría un `AtomicU64`.
#[derive(Debug)]
pub struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Devuelve un ID estrictamente mayor que cualquiera devuelto antes.
    pub fn next(&mut self) -> CorrelationId {
        let id = CorrelationId(self.next);
        self.next += 1;
        id
    }

    /// Cantidad de IDs entregados hasta ahora.
    pub fn issued(&self) -> u64 {
        self.next - 1
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}
