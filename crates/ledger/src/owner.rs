//! Owner identity supplied by the external authentication context.

use crate::{LedgerError, ResultLedger};

/// Identity every ledger operation is scoped to.
///
/// The authentication collaborator resolves the current login into an
/// `OwnerContext` once per session and passes it into each call; no
/// operation runs without one, and no operation can reach another owner's
/// rows through one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OwnerContext {
    owner_id: String,
}

impl OwnerContext {
    /// Context for a known signed-in owner.
    #[must_use]
    pub fn signed_in(owner_id: impl Into<String>) -> Self {
        Self {
            owner_id: owner_id.into(),
        }
    }

    /// Resolve the current login into an owner context.
    ///
    /// An absent or blank identity fails `Unauthorized`; callers surface
    /// that as a redirect to authentication and suspend all operations.
    pub fn from_login(owner_id: Option<&str>) -> ResultLedger<Self> {
        match owner_id.map(str::trim) {
            Some(id) if !id.is_empty() => Ok(Self::signed_in(id)),
            _ => Err(LedgerError::Unauthorized),
        }
    }

    #[must_use]
    pub fn owner_id(&self) -> &str {
        &self.owner_id
    }
}
