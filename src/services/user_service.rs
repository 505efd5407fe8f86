// src/services/user_service.rs

use std::sync::Arc;

use crate::{
    common::error::AppError,
    db::UserStore,
    models::auth::{Role, UserWithRoles},
};

// Papéis que podem receber aulas
pub const ASSIGNABLE_ROLES: [Role; 2] = [Role::Instructor, Role::YogaAcharya];

#[derive(Clone)]
pub struct UserService {
    repo: Arc<dyn UserStore>,
}

impl UserService {
    pub fn new(repo: Arc<dyn UserStore>) -> Self {
        Self { repo }
    }

    /// Instrutores e yoga acharyas. Se a função SQL falhar, cai para a
    /// lista completa de usuários.
    pub async fn list_assignees(&self, role: Option<Role>) -> Result<Vec<UserWithRoles>, AppError> {
        let names: Vec<&str> = ASSIGNABLE_ROLES.iter().map(Role::as_str).collect();

        let users = match self.repo.list_with_roles(&names).await {
            Ok(users) => users,
            Err(e) => {
                tracing::warn!("⚠️ get_users_with_roles falhou, listando todos os usuários: {:?}", e);
                self.repo.list_all().await?
            }
        };

        Ok(filter_by_role(users, role))
    }
}

pub fn filter_by_role(users: Vec<UserWithRoles>, role: Option<Role>) -> Vec<UserWithRoles> {
    match role {
        Some(role) => users.into_iter().filter(|u| u.has_role(role)).collect(),
        None => users,
    }
}
