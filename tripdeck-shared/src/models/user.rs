/// User model and database operations
///
/// Users arrive two ways: local registration (username + email + password)
/// and federated login, where an external identity provider has already
/// authenticated them and supplies the identifier. Federated rows store no
/// password hash, which is why `password_hash` is nullable; the
/// [`UserIdentity`] view makes the two kinds explicit so callers never
/// have to reason about a bare `Option<String>`.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id TEXT PRIMARY KEY,
///     username TEXT NOT NULL UNIQUE,
///     email TEXT NOT NULL UNIQUE,
///     password_hash TEXT,
///     is_active BOOLEAN NOT NULL DEFAULT TRUE
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use tripdeck_shared::models::user::{User, CreateUser, UserIdentity};
/// # use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), sqlx::Error> {
/// let user = User::create(
///     &pool,
///     CreateUser {
///         username: "jdoe".to_string(),
///         email: "jdoe@example.com".to_string(),
///         password_hash: "$argon2id$...".to_string(),
///     },
/// )
/// .await?;
///
/// match user.identity() {
///     UserIdentity::Local { .. } => println!("local account"),
///     UserIdentity::Federated => println!("external identity"),
/// }
/// # Ok(())
/// # }
/// ```

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// User account row
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique identifier; UUIDv4 string for local accounts, the
    /// provider-issued id for federated ones
    pub id: String,

    /// Unique username
    pub username: String,

    /// Unique email address
    pub email: String,

    /// Argon2id hash; None for federated accounts
    #[serde(skip_serializing, default)]
    pub password_hash: Option<String>,

    /// Whether the account is active
    pub is_active: bool,
}

/// How a user authenticates, derived from the stored row
#[derive(Debug, PartialEq, Eq)]
pub enum UserIdentity<'a> {
    /// Locally-registered account with stored credentials
    Local {
        /// PHC-format Argon2id hash
        password_hash: &'a str,
    },

    /// Account created through an external identity provider; no local
    /// credentials exist
    Federated,
}

/// Input for creating a locally-registered user
///
/// The id is generated server-side; the password must already be hashed.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    /// Unique username
    pub username: String,

    /// Unique email address
    pub email: String,

    /// Argon2id password hash (NOT a plaintext password)
    pub password_hash: String,
}

/// Input for a federated login
///
/// The identity provider supplies the id; the display name becomes the
/// username on first login.
#[derive(Debug, Clone, Deserialize)]
pub struct FederatedUser {
    /// Provider-issued identifier
    pub id: String,

    /// Email address reported by the provider
    pub email: String,

    /// Display name reported by the provider
    pub name: String,
}

impl User {
    /// Returns the identity kind for this row.
    pub fn identity(&self) -> UserIdentity<'_> {
        match self.password_hash.as_deref() {
            Some(password_hash) => UserIdentity::Local { password_hash },
            None => UserIdentity::Federated,
        }
    }

    /// Creates a locally-registered user with a generated UUIDv4 id.
    ///
    /// # Errors
    ///
    /// Returns an error on duplicate username/email (unique constraint
    /// violation) or database failure.
    pub async fn create(pool: &PgPool, data: CreateUser) -> Result<Self, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, username, email, password_hash, is_active)
            VALUES ($1, $2, $3, $4, TRUE)
            RETURNING id, username, email, password_hash, is_active
            "#,
        )
        .bind(Uuid::new_v4().to_string())
        .bind(data.username)
        .bind(data.email)
        .bind(data.password_hash)
        .fetch_one(pool)
        .await?;

        Ok(user)
    }

    /// Resolves a federated login, creating the account on first sight.
    ///
    /// Looks the user up by the provider-issued id; when absent, inserts a
    /// new row with that id, the provider display name as username, and no
    /// password hash. Subsequent logins return the stored row unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if the email or display name collides with an
    /// existing account, or on database failure.
    pub async fn federated_login(pool: &PgPool, data: FederatedUser) -> Result<Self, sqlx::Error> {
        if let Some(existing) = Self::find_by_id(pool, &data.id).await? {
            return Ok(existing);
        }

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, username, email, password_hash, is_active)
            VALUES ($1, $2, $3, NULL, TRUE)
            RETURNING id, username, email, password_hash, is_active
            "#,
        )
        .bind(data.id)
        .bind(data.name)
        .bind(data.email)
        .fetch_one(pool)
        .await?;

        Ok(user)
    }

    /// Finds a user by id.
    pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, is_active
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Finds a user by email address.
    ///
    /// This is the credential-login lookup path.
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, is_active
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_identity() {
        let user = User {
            id: "u-1".to_string(),
            username: "jdoe".to_string(),
            email: "jdoe@example.com".to_string(),
            password_hash: Some("$argon2id$hash".to_string()),
            is_active: true,
        };

        assert_eq!(
            user.identity(),
            UserIdentity::Local {
                password_hash: "$argon2id$hash"
            }
        );
    }

    #[test]
    fn test_federated_identity() {
        let user = User {
            id: "google-12345".to_string(),
            username: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            password_hash: None,
            is_active: true,
        };

        assert_eq!(user.identity(), UserIdentity::Federated);
    }

    #[test]
    fn test_password_hash_never_serialized() {
        let user = User {
            id: "u-1".to_string(),
            username: "jdoe".to_string(),
            email: "jdoe@example.com".to_string(),
            password_hash: Some("$argon2id$hash".to_string()),
            is_active: true,
        };

        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("argon2id"));
        assert!(!json.contains("password_hash"));
    }

    // Integration tests for database operations are in tripdeck-api/tests/
}
