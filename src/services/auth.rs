// src/services/auth.rs

use std::sync::Arc;

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};

use crate::{
    common::error::AppError,
    db::UserStore,
    models::auth::{Claims, Session},
};

// Só valida tokens; quem emite é o provedor de autenticação.
// E-mail, nome e papéis da sessão vêm sempre da tabela users, nunca do token.
#[derive(Clone)]
pub struct AuthService {
    user_repo: Arc<dyn UserStore>,
    jwt_secret: String,
    jwt_audience: String,
}

impl AuthService {
    pub fn new(user_repo: Arc<dyn UserStore>, jwt_secret: String, jwt_audience: String) -> Self {
        Self { user_repo, jwt_secret, jwt_audience }
    }

    pub async fn session_from_token(&self, token: &str) -> Result<Session, AppError> {
        let claims = decode_claims(token, &self.jwt_secret, &self.jwt_audience)?;

        let user = self
            .user_repo
            .find_with_roles(claims.sub)
            .await?
            .ok_or(AppError::UserNotFound)?;

        Ok(Session::from(user))
    }
}

pub fn decode_claims(token: &str, secret: &str, audience: &str) -> Result<Claims, AppError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_audience(&[audience]);

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &validation,
    )
    .map_err(|e| {
        tracing::debug!("Token rejeitado: {}", e);
        AppError::InvalidToken
    })?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::auth::{Role, UserWithRoles};
    use async_trait::async_trait;
    use chrono::Utc;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde::Serialize;
    use uuid::Uuid;

    // Um único usuário cadastrado
    struct OneUser(UserWithRoles);

    #[async_trait]
    impl UserStore for OneUser {
        async fn find_with_roles(&self, id: Uuid) -> Result<Option<UserWithRoles>, AppError> {
            Ok((self.0.id == id).then(|| self.0.clone()))
        }

        async fn list_with_roles(&self, _role_names: &[&str]) -> Result<Vec<UserWithRoles>, AppError> {
            Ok(vec![self.0.clone()])
        }

        async fn list_all(&self) -> Result<Vec<UserWithRoles>, AppError> {
            Ok(vec![self.0.clone()])
        }
    }

    fn registered(id: Uuid) -> UserWithRoles {
        UserWithRoles {
            id,
            email: "maria.silva@studio.com".into(),
            full_name: Some("Maria Silva".into()),
            phone: None,
            user_roles: vec!["instructor".into()],
            created_at: Utc::now(),
        }
    }

    fn auth_service(user: UserWithRoles) -> AuthService {
        AuthService::new(Arc::new(OneUser(user)), "segredo".into(), "authenticated".into())
    }

    #[derive(Serialize)]
    struct TestClaims {
        sub: Uuid,
        exp: usize,
        iat: usize,
        aud: String,
        email: String,
    }

    fn token(secret: &str, aud: &str, exp_offset_secs: i64) -> (Uuid, String) {
        let now = Utc::now().timestamp();
        let sub = Uuid::new_v4();
        let claims = TestClaims {
            sub,
            exp: (now + exp_offset_secs) as usize,
            iat: now as usize,
            aud: aud.to_string(),
            email: "maria@email.com".into(),
        };
        let jwt = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_ref()),
        )
        .unwrap();
        (sub, jwt)
    }

    #[test]
    fn valid_token_yields_subject() {
        let (sub, jwt) = token("segredo", "authenticated", 3600);

        let claims = decode_claims(&jwt, "segredo", "authenticated").unwrap();
        assert_eq!(claims.sub, sub);
    }

    #[tokio::test]
    async fn session_profile_comes_from_the_users_table() {
        let (sub, jwt) = token("segredo", "authenticated", 3600);
        let service = auth_service(registered(sub));

        let session = service.session_from_token(&jwt).await.unwrap();

        assert_eq!(session.user_id, sub);
        // O token traz outro e-mail; vale o cadastrado
        assert_eq!(session.email, "maria.silva@studio.com");
        assert_eq!(session.roles, vec![Role::Instructor]);
    }

    #[tokio::test]
    async fn valid_token_without_user_row_is_user_not_found() {
        let (_, jwt) = token("segredo", "authenticated", 3600);
        let service = auth_service(registered(Uuid::new_v4()));

        let err = service.session_from_token(&jwt).await.unwrap_err();
        assert!(matches!(err, AppError::UserNotFound));
    }

    #[test]
    fn wrong_secret_or_audience_is_rejected() {
        let (_, jwt) = token("segredo", "authenticated", 3600);

        assert!(matches!(decode_claims(&jwt, "outro", "authenticated"), Err(AppError::InvalidToken)));
        assert!(matches!(decode_claims(&jwt, "segredo", "service_role"), Err(AppError::InvalidToken)));
    }

    #[test]
    fn expired_token_is_rejected() {
        let (_, jwt) = token("segredo", "authenticated", -3600);
        assert!(matches!(decode_claims(&jwt, "segredo", "authenticated"), Err(AppError::InvalidToken)));
    }
}
