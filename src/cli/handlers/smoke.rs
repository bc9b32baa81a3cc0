//! Smoke command handler
//!
//! Opens a pool, reads a few facts through the regular services and prints
//! them, one `key value` pair per line.

use std::fmt;

use crate::config::Settings;
use crate::db::establish_async_connection_pool;
use crate::error::AppResult;
use crate::models::User;
use crate::state::AppState;

/// Number of password characters echoed by the smoke report
const PASSWORD_PREFIX_LEN: usize = 4;

/// What `median smoke` prints
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmokeReport {
    pub users: i64,
    pub articles: i64,
    pub first_user_email: String,
    pub first_user_password_prefix: String,
}

impl SmokeReport {
    /// `first_user` is the user with the lowest id, if any.
    pub fn new(users: i64, articles: i64, first_user: Option<&User>) -> Self {
        let (first_user_email, first_user_password_prefix) = match first_user {
            Some(user) => (
                user.email.clone(),
                user.password.chars().take(PASSWORD_PREFIX_LEN).collect(),
            ),
            None => (String::new(), String::new()),
        };

        Self {
            users,
            articles,
            first_user_email,
            first_user_password_prefix,
        }
    }
}

impl fmt::Display for SmokeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "users {} articles {}", self.users, self.articles)?;
        writeln!(f, "firstUserEmail {}", self.first_user_email)?;
        write!(f, "firstUserPasswordPrefix {}", self.first_user_password_prefix)
    }
}

/// Handler for the smoke command
pub struct SmokeCommandHandler {
    config: Settings,
}

impl SmokeCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// Collects and prints the report.
    ///
    /// # Errors
    /// Any configuration, connection or query failure; the process then
    /// exits with status 1.
    pub async fn execute(&self) -> AppResult<SmokeReport> {
        self.config.database.validate()?;

        let pool = establish_async_connection_pool(&self.config.database).await?;
        let state = AppState::new(pool);

        let users = state.services.users.count().await?;
        let articles = state.services.articles.count().await?;
        let first = state.services.users.first().await?;

        let report = SmokeReport::new(users, articles, first.as_ref());
        tracing::debug!(users, articles, "Smoke check finished");
        println!("{}", report);

        // Pool is dropped here, closing every connection
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use jiff_diesel::ToDiesel;

    fn user(email: &str, password: &str) -> User {
        let now = jiff::Timestamp::now();
        User {
            id: 1,
            email: email.to_string(),
            name: None,
            password: password.to_string(),
            created_at: now.to_diesel(),
            updated_at: now.to_diesel(),
        }
    }

    #[test]
    fn test_report_with_first_user() {
        let first = user("a@x.com", "secret1");
        let report = SmokeReport::new(3, 7, Some(&first));

        assert_eq!(
            report.to_string(),
            "users 3 articles 7\nfirstUserEmail a@x.com\nfirstUserPasswordPrefix secr"
        );
    }

    #[test]
    fn test_report_without_users() {
        let report = SmokeReport::new(0, 0, None);
        assert_eq!(
            report.to_string(),
            "users 0 articles 0\nfirstUserEmail \nfirstUserPasswordPrefix "
        );
    }

    #[test]
    fn test_prefix_counts_characters_not_bytes() {
        let first = user("b@x.com", "ñañaña");
        assert_eq!(SmokeReport::new(1, 0, Some(&first)).first_user_password_prefix, "ñaña");

        let short = user("c@x.com", "ab");
        assert_eq!(SmokeReport::new(1, 0, Some(&short)).first_user_password_prefix, "ab");
    }

    #[tokio::test]
    async fn test_smoke_requires_database_url() {
        let handler = SmokeCommandHandler::new(Settings::default());
        assert!(matches!(
            handler.execute().await,
            Err(AppError::Configuration { .. })
        ));
    }
}
