//! Account registration, login and bearer-token authentication.

use std::sync::Arc;

use crate::domain::credentials::{CredentialVerifier, TokenIssuer};
use crate::domain::entities::{Account, NewAccount, normalize_email};
use crate::domain::ownership::Caller;
use crate::domain::repositories::AccountRepository;
use crate::error::AppError;
use crate::infrastructure::auth::{hash_password, verify_password};
use serde_json::json;

/// A freshly issued token together with the account it belongs to.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub account: Account,
}

/// Service for accounts and bearer-token authentication.
///
/// Tokens are verified first (signature and expiry), then the account they
/// name must still exist.
pub struct AuthService<A: AccountRepository + ?Sized> {
    repository: Arc<A>,
    verifier: Arc<dyn CredentialVerifier>,
    issuer: Arc<dyn TokenIssuer>,
}

impl<A: AccountRepository + ?Sized> AuthService<A> {
    pub fn new(
        repository: Arc<A>,
        verifier: Arc<dyn CredentialVerifier>,
        issuer: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self {
            repository,
            verifier,
            issuer,
        }
    }

    /// Registers an account and logs it in.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the email is already registered.
    pub async fn register(&self, email: &str, password: String) -> Result<Session, AppError> {
        let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
            .await
            .map_err(|e| AppError::internal("Password hashing failed", json!({ "reason": e.to_string() })))?
            .map_err(|e| AppError::internal("Password hashing failed", json!({ "reason": e.to_string() })))?;

        let account = self
            .repository
            .create(NewAccount::new(email, password_hash))
            .await?;

        tracing::info!(account_id = account.id, "Account registered");

        let token = self.issuer.issue(account.id)?;
        Ok(Session { token, account })
    }

    /// Checks credentials and issues a token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] for an unknown email or wrong password.
    pub async fn login(&self, email: &str, password: String) -> Result<Session, AppError> {
        let invalid = || AppError::unauthorized("Invalid credentials", json!({}));

        let account = self
            .repository
            .find_by_email(&normalize_email(email))
            .await?
            .ok_or_else(invalid)?;

        let stored_hash = account.password_hash.clone();
        let matches = tokio::task::spawn_blocking(move || verify_password(&password, &stored_hash))
            .await
            .map_err(|e| AppError::internal("Password check failed", json!({ "reason": e.to_string() })))?
            .map_err(|e| AppError::internal("Password check failed", json!({ "reason": e.to_string() })))?;

        if !matches {
            tracing::debug!(account_id = account.id, "Login with wrong password");
            return Err(invalid());
        }

        let token = self.issuer.issue(account.id)?;
        Ok(Session { token, account })
    }

    /// Resolves a bearer token to a caller.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the token is invalid, expired, or
    /// names an account that no longer exists.
    pub async fn authenticate(&self, token: &str) -> Result<Caller, AppError> {
        let unauthorized =
            || AppError::unauthorized("Not authorized to access this route", json!({}));

        let account_id = self.verifier.verify(token).ok_or_else(unauthorized)?;

        match self.repository.find_by_id(account_id).await? {
            Some(account) => Ok(Caller::Account(account.id)),
            None => Err(unauthorized()),
        }
    }

    /// Returns the caller's account.
    pub async fn me(&self, caller: Caller) -> Result<Account, AppError> {
        let unauthorized =
            || AppError::unauthorized("Not authorized to access this route", json!({}));

        let account_id = caller.account_id().ok_or_else(unauthorized)?;

        self.repository
            .find_by_id(account_id)
            .await?
            .ok_or_else(unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockAccountRepository;
    use crate::infrastructure::auth::JwtAuthority;
    use chrono::Utc;

    const SECRET: &str = "auth-service-test-secret";

    fn service(repo: MockAccountRepository) -> (AuthService<MockAccountRepository>, Arc<JwtAuthority>) {
        let authority = Arc::new(JwtAuthority::new(SECRET, 1));
        let service = AuthService::new(Arc::new(repo), authority.clone(), authority.clone());
        (service, authority)
    }

    fn account(id: i64, email: &str, password: &str) -> Account {
        Account {
            id,
            email: email.to_string(),
            password_hash: hash_password(password).unwrap(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_register_issues_token_for_new_account() {
        let mut repo = MockAccountRepository::new();
        repo.expect_create()
            .withf(|new_account| {
                new_account.email == "alice@example.com"
                    && new_account.password_hash.starts_with("$argon2id$")
            })
            .times(1)
            .returning(|new_account| {
                Ok(Account {
                    id: 5,
                    email: new_account.email,
                    password_hash: new_account.password_hash,
                    created_at: Utc::now(),
                })
            });

        let (service, authority) = service(repo);
        let session = service
            .register("Alice@Example.com", "secret1".to_string())
            .await
            .unwrap();

        assert_eq!(session.account.id, 5);
        assert_eq!(authority.verify(&session.token), Some(5));
    }

    #[tokio::test]
    async fn test_register_duplicate_propagates_conflict() {
        let mut repo = MockAccountRepository::new();
        repo.expect_create()
            .times(1)
            .returning(|_| Err(AppError::conflict("User already exists", json!({}))));

        let (service, _) = service(repo);
        let result = service.register("a@b.io", "secret1".to_string()).await;

        assert!(matches!(result, Err(AppError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_login_success() {
        let stored = account(3, "bob@example.com", "hunter22");
        let mut repo = MockAccountRepository::new();
        repo.expect_find_by_email()
            .withf(|email| email == "bob@example.com")
            .times(1)
            .returning(move |_| Ok(Some(stored.clone())));

        let (service, authority) = service(repo);
        let session = service
            .login(" BOB@example.com", "hunter22".to_string())
            .await
            .unwrap();

        assert_eq!(authority.verify(&session.token), Some(3));
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let stored = account(3, "bob@example.com", "hunter22");
        let mut repo = MockAccountRepository::new();
        repo.expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(stored.clone())));

        let (service, _) = service(repo);
        let result = service.login("bob@example.com", "wrong".to_string()).await;

        assert!(matches!(result, Err(AppError::Unauthorized { .. })));
    }

    #[tokio::test]
    async fn test_login_unknown_email() {
        let mut repo = MockAccountRepository::new();
        repo.expect_find_by_email().times(1).returning(|_| Ok(None));

        let (service, _) = service(repo);
        let result = service.login("nobody@example.com", "x".to_string()).await;

        assert!(matches!(result, Err(AppError::Unauthorized { .. })));
    }

    #[tokio::test]
    async fn test_authenticate_valid_token() {
        let mut repo = MockAccountRepository::new();
        repo.expect_find_by_id()
            .withf(|id| *id == 9)
            .times(1)
            .returning(|id| Ok(Some(account(id, "c@d.io", "pw1234"))));

        let (service, authority) = service(repo);
        let token = authority.issue(9).unwrap();

        assert_eq!(service.authenticate(&token).await.unwrap(), Caller::Account(9));
    }

    #[tokio::test]
    async fn test_authenticate_invalid_token() {
        let mut repo = MockAccountRepository::new();
        repo.expect_find_by_id().times(0);

        let (service, _) = service(repo);
        let result = service.authenticate("not-a-jwt").await;

        assert!(matches!(result, Err(AppError::Unauthorized { .. })));
    }

    #[tokio::test]
    async fn test_authenticate_deleted_account() {
        let mut repo = MockAccountRepository::new();
        repo.expect_find_by_id().times(1).returning(|_| Ok(None));

        let (service, authority) = service(repo);
        let token = authority.issue(9).unwrap();

        assert!(matches!(
            service.authenticate(&token).await,
            Err(AppError::Unauthorized { .. })
        ));
    }

    #[tokio::test]
    async fn test_me_requires_account() {
        let (service, _) = service(MockAccountRepository::new());
        assert!(matches!(
            service.me(Caller::Anonymous).await,
            Err(AppError::Unauthorized { .. })
        ));
    }
}
