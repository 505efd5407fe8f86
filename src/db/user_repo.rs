// src/db/user_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{common::error::AppError, models::auth::UserWithRoles};

// Usuário + nomes dos papéis agregados num TEXT[]
const USER_WITH_ROLES_SELECT: &str = r#"
    SELECT
        u.id, u.email, u.full_name, u.phone, u.created_at,
        COALESCE(
            array_agg(r.name ORDER BY r.name) FILTER (WHERE r.name IS NOT NULL),
            '{}'::text[]
        ) AS user_roles
    FROM users u
    LEFT JOIN user_roles ur ON ur.user_id = u.id
    LEFT JOIN roles r       ON r.id = ur.role_id
"#;

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_with_roles(&self, id: Uuid) -> Result<Option<UserWithRoles>, AppError>;

    /// Usuários com ao menos um dos papéis.
    async fn list_with_roles(&self, role_names: &[&str]) -> Result<Vec<UserWithRoles>, AppError>;

    async fn list_all(&self) -> Result<Vec<UserWithRoles>, AppError>;
}

// O repositório de usuários, responsável pelas tabelas 'users' e 'user_roles'
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for UserRepository {
    // Busca um usuário pelo seu ID, já com os papéis
    async fn find_with_roles(&self, id: Uuid) -> Result<Option<UserWithRoles>, AppError> {
        let sql = format!("{USER_WITH_ROLES_SELECT} WHERE u.id = $1 GROUP BY u.id");

        let maybe_user = sqlx::query_as::<_, UserWithRoles>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(maybe_user)
    }

    // Usuários que possuem ao menos um dos papéis (função SQL get_users_with_roles)
    async fn list_with_roles(&self, role_names: &[&str]) -> Result<Vec<UserWithRoles>, AppError> {
        let names: Vec<String> = role_names.iter().map(|r| r.to_string()).collect();

        let users = sqlx::query_as::<_, UserWithRoles>(
            r#"
            SELECT id, email, full_name, phone, created_at, user_roles
            FROM get_users_with_roles($1)
            ORDER BY full_name NULLS LAST, email
            "#,
        )
        .bind(names)
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    async fn list_all(&self) -> Result<Vec<UserWithRoles>, AppError> {
        let sql = format!(
            "{USER_WITH_ROLES_SELECT} GROUP BY u.id ORDER BY u.full_name NULLS LAST, u.email"
        );

        let users = sqlx::query_as::<_, UserWithRoles>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(users)
    }
}
