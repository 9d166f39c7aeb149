use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque identity of a caller. The ledger never mints principals itself;
/// whoever submits an operation supplies one (a wallet, a signer, a shell
/// session) and the ledger trusts it as already authenticated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Principal(Uuid);

impl Principal {
    /// Generate a fresh random principal.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for Principal {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Principal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Principal {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}
