//! In-process implementation of account repository.

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use serde_json::json;
use std::collections::HashMap;

use crate::domain::entities::{Account, AccountId, NewAccount};
use crate::domain::repositories::AccountRepository;
use crate::error::AppError;

/// Accounts keyed by id, with email uniqueness checked under the write lock.
#[derive(Default)]
pub struct MemoryAccountRepository {
    accounts: RwLock<HashMap<AccountId, Account>>,
}

impl MemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountRepository for MemoryAccountRepository {
    async fn create(&self, new_account: NewAccount) -> Result<Account, AppError> {
        let mut accounts = self.accounts.write();

        if accounts.values().any(|a| a.email == new_account.email) {
            return Err(AppError::conflict(
                "User already exists",
                json!({ "email": new_account.email }),
            ));
        }

        let id = accounts.keys().max().map_or(1, |max| max + 1);
        let account = Account {
            id,
            email: new_account.email,
            password_hash: new_account.password_hash,
            created_at: Utc::now(),
        };
        accounts.insert(id, account.clone());

        Ok(account)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AppError> {
        Ok(self
            .accounts
            .read()
            .values()
            .find(|a| a.email == email)
            .cloned())
    }

    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, AppError> {
        Ok(self.accounts.read().get(&id).cloned())
    }
}
