//! User repository functions for domain layer (generic over ConnectionTrait).

use sea_orm::ConnectionTrait;
use time::OffsetDateTime;

use crate::adapters::users_sea::{self as users_adapter, UserCreate};
use crate::errors::domain::DomainError;

/// User domain model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: OffsetDateTime,
}

pub async fn count_by_email<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    email: &str,
) -> Result<u64, DomainError> {
    Ok(users_adapter::count_by_email(conn, email).await?)
}

pub async fn find_by_email<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    email: &str,
) -> Result<Option<User>, DomainError> {
    let user = users_adapter::find_by_email(conn, email).await?;
    Ok(user.map(User::from))
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: &str,
) -> Result<Option<User>, DomainError> {
    let user = users_adapter::find_by_id(conn, id).await?;
    Ok(user.map(User::from))
}

/// Insert a user. A concurrent duplicate email becomes `Conflict(UniqueEmail)`.
pub async fn create_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name: &str,
    email: &str,
    password_hash: &str,
) -> Result<User, DomainError> {
    let user = users_adapter::create_user(conn, UserCreate::new(name, email, password_hash)).await?;
    Ok(User::from(user))
}

impl From<crate::entities::users::Model> for User {
    fn from(model: crate::entities::users::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            email: model.email,
            password_hash: model.password_hash,
            created_at: model.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::db::DbKind;
    use crate::errors::domain::ConflictKind;
    use crate::infra::db::connect_db;

    #[tokio::test]
    async fn create_then_find() {
        let db = connect_db(DbKind::SqliteMemory).await.unwrap();

        let user = create_user(&db, "Ada", "ada@example.com", "$argon2id$stub")
            .await
            .unwrap();
        assert_eq!(user.id.len(), 36);

        let by_email = find_by_email(&db, "ada@example.com").await.unwrap().unwrap();
        assert_eq!(by_email, user);
        let by_id = find_by_id(&db, &user.id).await.unwrap().unwrap();
        assert_eq!(by_id.email, "ada@example.com");
        assert_eq!(count_by_email(&db, "ada@example.com").await.unwrap(), 1);
        assert_eq!(count_by_email(&db, "bob@example.com").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn duplicate_email_is_unique_email_conflict() {
        let db = connect_db(DbKind::SqliteMemory).await.unwrap();

        create_user(&db, "Ada", "ada@example.com", "h1").await.unwrap();
        let err = create_user(&db, "Imposter", "ada@example.com", "h2")
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            DomainError::Conflict(ConflictKind::UniqueEmail, _)
        ));
    }
}
