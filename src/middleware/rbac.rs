// src/middleware/rbac.rs

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use std::marker::PhantomData;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::i18n::Locale,
    models::auth::{Role, Session},
};

/// 1. O Trait que define um conjunto de papéis aceitos
pub trait RoleRequirement: Send + Sync + 'static {
    fn allowed() -> &'static [Role];
}

/// 2. O Extractor (Guardião). Devolve a sessão já verificada.
pub struct RequireRole<T>(pub Session, pub PhantomData<T>);

impl<T> RequireRole<T> {
    pub fn session(&self) -> &Session {
        &self.0
    }
}

// 3. Implementação do FromRequestParts
impl<T, S> FromRequestParts<S> for RequireRole<T>
where
    T: RoleRequirement,
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        let locale = Locale::from_headers(&parts.headers);

        // A. Sessão colocada pelo auth_guard
        let session = parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or_else(|| AppError::InvalidToken.to_api_error(&locale, &app_state.i18n_store))?;

        // B. Confere os papéis
        if !session.has_any_role(T::allowed()) {
            tracing::warn!(
                "🚫 {} tentou acessar {} sem papel adequado",
                session.email,
                parts.uri.path()
            );
            return Err(AppError::Forbidden.to_api_error(&locale, &app_state.i18n_store));
        }

        Ok(RequireRole(session, PhantomData))
    }
}

// ---
// DEFINIÇÃO DOS CONJUNTOS DE PAPÉIS (TIPOS)
// ---

pub struct AssignmentManagers;
impl RoleRequirement for AssignmentManagers {
    fn allowed() -> &'static [Role] { &[Role::Admin, Role::SuperAdmin, Role::YogaAcharya] }
}

pub struct PaymentAdmins;
impl RoleRequirement for PaymentAdmins {
    fn allowed() -> &'static [Role] { &[Role::Admin, Role::SuperAdmin] }
}

pub struct Teaching;
impl RoleRequirement for Teaching {
    fn allowed() -> &'static [Role] { &[Role::Instructor, Role::YogaAcharya] }
}
