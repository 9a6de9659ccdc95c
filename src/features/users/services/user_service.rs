use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::users::dtos::UserResponseDto;
use crate::features::users::models::{
    CreateUser, UpdateProfile, UserAccount, UserProfile, UserWithProfile,
};

const USER_WITH_PROFILE_COLUMNS: &str = "u.id, u.username, u.email, \
     p.phone_number, p.address, u.created_at";

/// Service for local accounts and their profiles
pub struct UserService {
    pool: PgPool,
}

impl UserService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create an account together with its profile; neither exists without the other
    pub async fn create_user_with_profile(&self, data: CreateUser) -> Result<UserResponseDto> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            tracing::error!("Failed to begin user transaction: {:?}", e);
            AppError::Database(e)
        })?;

        let account = sqlx::query_as::<_, UserAccount>(
            r#"
            INSERT INTO users (subject, username, email)
            VALUES ($1, $2, $3)
            RETURNING id, subject, username, email, created_at
            "#,
        )
        .bind(&data.subject)
        .bind(&data.username)
        .bind(&data.email)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            AppError::from_unique_violation(
                e,
                &format!(
                    "Account already exists or username '{}' is taken",
                    data.username
                ),
            )
        })?;

        let profile = sqlx::query_as::<_, UserProfile>(
            r#"
            INSERT INTO user_profiles (user_id, phone_number, address)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, phone_number, address, created_at
            "#,
        )
        .bind(account.id)
        .bind(&data.phone_number)
        .bind(&data.address)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create profile for user {}: {:?}", account.id, e);
            AppError::Database(e)
        })?;

        tx.commit().await.map_err(|e| {
            tracing::error!("Failed to commit user creation: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!(
            "User created: id={}, username={}, profile_id={}",
            account.id,
            account.username,
            profile.id
        );

        Ok(UserWithProfile {
            id: account.id,
            username: account.username,
            email: account.email,
            phone_number: profile.phone_number,
            address: profile.address,
            created_at: account.created_at,
        }
        .into())
    }

    /// Account and profile for an identity-provider subject
    pub async fn get_by_subject(&self, subject: &str) -> Result<UserResponseDto> {
        let sql = format!(
            "SELECT {USER_WITH_PROFILE_COLUMNS} \
             FROM users u \
             JOIN user_profiles p ON p.user_id = u.id \
             WHERE u.subject = $1"
        );

        sqlx::query_as::<_, UserWithProfile>(&sql)
            .bind(subject)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get user by subject: {:?}", e);
                AppError::Database(e)
            })?
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound("User account not found".to_string()))
    }

    /// Overwrite the given profile fields of the subject's account
    pub async fn update_profile(
        &self,
        subject: &str,
        data: UpdateProfile,
    ) -> Result<UserResponseDto> {
        let updated = sqlx::query(
            r#"
            UPDATE user_profiles p
            SET phone_number = COALESCE($2, p.phone_number),
                address = COALESCE($3, p.address)
            FROM users u
            WHERE p.user_id = u.id AND u.subject = $1
            "#,
        )
        .bind(subject)
        .bind(&data.phone_number)
        .bind(&data.address)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update profile: {:?}", e);
            AppError::Database(e)
        })?;

        if updated.rows_affected() == 0 {
            return Err(AppError::NotFound("User account not found".to_string()));
        }

        self.get_by_subject(subject).await
    }

    /// Accounts with profiles, newest first
    pub async fn list_paginated(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<UserResponseDto>, i64)> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to count users: {:?}", e);
                AppError::Database(e)
            })?;

        let sql = format!(
            "SELECT {USER_WITH_PROFILE_COLUMNS} \
             FROM users u \
             LEFT JOIN user_profiles p ON p.user_id = u.id \
             ORDER BY u.created_at DESC, u.id \
             OFFSET $1 LIMIT $2"
        );

        let users = sqlx::query_as::<_, UserWithProfile>(&sql)
            .bind(offset)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list users: {:?}", e);
                AppError::Database(e)
            })?;

        Ok((users.into_iter().map(Into::into).collect(), total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::AppError;

    fn new_user(subject: &str, username: &str) -> CreateUser {
        CreateUser {
            subject: subject.to_string(),
            username: username.to_string(),
            email: Some(format!("{}@example.com", username)),
            phone_number: Some("+62 812 0000".to_string()),
            address: None,
        }
    }

    async fn count(pool: &PgPool, table: &str) -> i64 {
        sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
            .fetch_one(pool)
            .await
            .unwrap()
    }

    #[sqlx::test]
    #[ignore = "requires a Postgres DATABASE_URL"]
    async fn test_every_account_gets_exactly_one_profile(pool: PgPool) {
        let service = UserService::new(pool.clone());

        let created = service
            .create_user_with_profile(new_user("sub-1", "rider"))
            .await
            .unwrap();
        assert_eq!(created.profile.phone_number.as_deref(), Some("+62 812 0000"));

        let profiles: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM user_profiles WHERE user_id = $1")
                .bind(created.id)
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(profiles, 1);

        let fetched = service.get_by_subject("sub-1").await.unwrap();
        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched.username, "rider");
    }

    #[sqlx::test]
    #[ignore = "requires a Postgres DATABASE_URL"]
    async fn test_duplicates_conflict_without_partial_rows(pool: PgPool) {
        let service = UserService::new(pool.clone());
        service
            .create_user_with_profile(new_user("sub-1", "rider"))
            .await
            .unwrap();

        let same_subject = service
            .create_user_with_profile(new_user("sub-1", "other"))
            .await;
        assert!(matches!(same_subject, Err(AppError::Conflict(_))));

        let same_username = service
            .create_user_with_profile(new_user("sub-2", "rider"))
            .await;
        assert!(matches!(same_username, Err(AppError::Conflict(_))));

        assert_eq!(count(&pool, "users").await, 1);
        assert_eq!(count(&pool, "user_profiles").await, 1);
    }

    #[sqlx::test]
    #[ignore = "requires a Postgres DATABASE_URL"]
    async fn test_update_profile_keeps_omitted_fields(pool: PgPool) {
        let service = UserService::new(pool.clone());
        service
            .create_user_with_profile(new_user("sub-1", "rider"))
            .await
            .unwrap();

        let updated = service
            .update_profile(
                "sub-1",
                UpdateProfile {
                    address: Some("Jl. Sudirman 1".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.profile.address.as_deref(), Some("Jl. Sudirman 1"));
        assert_eq!(updated.profile.phone_number.as_deref(), Some("+62 812 0000"));

        let missing = service
            .update_profile("nobody", UpdateProfile::default())
            .await;
        assert!(matches!(missing, Err(AppError::NotFound(_))));
    }

    #[sqlx::test]
    #[ignore = "requires a Postgres DATABASE_URL"]
    async fn test_list_paginated_reports_total(pool: PgPool) {
        let service = UserService::new(pool.clone());
        for i in 0..3 {
            service
                .create_user_with_profile(new_user(&format!("sub-{}", i), &format!("rider_{}", i)))
                .await
                .unwrap();
        }

        let (page, total) = service.list_paginated(2, 2).await.unwrap();
        assert_eq!(total, 3);
        assert_eq!(page.len(), 1);

        let (page, _) = service.list_paginated(i64::MAX, 10).await.unwrap();
        assert!(page.is_empty());
    }
}
