// src/models/auth.rs

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// Papéis conhecidos (tabela `roles`, coluna `name`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Instructor,
    YogaAcharya,
    Admin,
    SuperAdmin,
    MantraCurator,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Instructor => "instructor",
            Role::YogaAcharya => "yoga_acharya",
            Role::Admin => "admin",
            Role::SuperAdmin => "super_admin",
            Role::MantraCurator => "mantra_curator",
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "instructor" => Ok(Role::Instructor),
            "yoga_acharya" => Ok(Role::YogaAcharya),
            "admin" => Ok(Role::Admin),
            "super_admin" => Ok(Role::SuperAdmin),
            "mantra_curator" => Ok(Role::MantraCurator),
            other => Err(format!("papel desconhecido: {other}")),
        }
    }
}

/// Converte nomes vindos do banco, ignorando papéis que não conhecemos.
pub fn parse_roles(names: &[String]) -> Vec<Role> {
    names.iter().filter_map(|n| n.parse().ok()).collect()
}

// Linha da tabela `users` + papéis agregados
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserWithRoles {
    pub id: Uuid,
    #[schema(example = "ananda@studio.com")]
    pub email: String,
    #[schema(example = "Ananda Rao")]
    pub full_name: Option<String>,
    pub phone: Option<String>,
    #[schema(example = json!(["instructor"]))]
    pub user_roles: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl UserWithRoles {
    pub fn has_role(&self, role: Role) -> bool {
        self.user_roles.iter().any(|r| r == role.as_str())
    }
}

// A sessão explícita que cada handler recebe (usuário + papéis)
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user_id: Uuid,
    pub email: String,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub roles: Vec<Role>,
}

impl Session {
    pub fn has_any_role(&self, allowed: &[Role]) -> bool {
        self.roles.iter().any(|r| allowed.contains(r))
    }

    /// "Maria da Silva Souza" -> ("Maria", "da Silva Souza")
    pub fn split_name(&self) -> (String, String) {
        let full = self.full_name.as_deref().unwrap_or("");
        let mut parts = full.split_whitespace();
        let first = parts.next().unwrap_or("").to_string();
        let last = parts.collect::<Vec<_>>().join(" ");
        (first, last)
    }
}

impl From<UserWithRoles> for Session {
    fn from(user: UserWithRoles) -> Self {
        Self {
            roles: parse_roles(&user.user_roles),
            user_id: user.id,
            email: user.email,
            full_name: user.full_name,
            phone: user.phone,
        }
    }
}

// Estrutura de dados ("claims") dentro do JWT do provedor de autenticação
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,  // Subject (ID do usuário)
    pub exp: usize, // Expiration time (quando o token expira)
    pub iat: usize, // Issued At (quando o token foi criado)
}
