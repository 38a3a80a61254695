//! Helpers for classifying database errors.

/// Name of the unique constraint on `accounts.email`.
pub const ACCOUNTS_EMAIL_KEY: &str = "accounts_email_key";

/// Returns true if the error is a unique violation of the named constraint.
pub fn is_unique_violation_on(e: &sqlx::Error, constraint: &str) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    if !db_err.is_unique_violation() {
        return false;
    }

    db_err.constraint() == Some(constraint)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_database_errors_are_not_violations() {
        assert!(!is_unique_violation_on(&sqlx::Error::RowNotFound, ACCOUNTS_EMAIL_KEY));
        assert!(!is_unique_violation_on(&sqlx::Error::PoolTimedOut, ACCOUNTS_EMAIL_KEY));
    }
}
