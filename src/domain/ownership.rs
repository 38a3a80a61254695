//! Caller identity and the ownership rules that gate mutating operations.

use crate::domain::entities::{AccountId, Link};

/// Who is making a request.
///
/// Inserted into request extensions by the auth middleware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Caller {
    Anonymous,
    Account(AccountId),
}

impl Caller {
    /// Returns the account id for authenticated callers.
    pub fn account_id(&self) -> Option<AccountId> {
        match self {
            Caller::Anonymous => None,
            Caller::Account(id) => Some(*id),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Caller::Account(_))
    }
}

/// Only authenticated callers may pick their own slug.
pub fn can_create_custom_slug(caller: &Caller) -> bool {
    caller.is_authenticated()
}

/// A link may be deleted only by the account that owns it.
///
/// Unowned links are never deletable, whoever asks.
pub fn can_delete(caller: &Caller, link: &Link) -> bool {
    match (caller.account_id(), link.owner_id) {
        (Some(caller_id), Some(owner_id)) => caller_id == owner_id,
        _ => false,
    }
}
