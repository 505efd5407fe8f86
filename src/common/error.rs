// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

use crate::common::i18n::I18nStore;
use crate::middleware::i18n::Locale;
use crate::models::assignment::{AssignmentFormError, PaymentStatus};

// Erros de domínio e infraestrutura. Os handlers convertem para ApiError
// com `to_api_error`, já no idioma do cliente.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    // Falhas do formulário de atribuição (conjunto fechado, um por campo)
    #[error("Formulário de atribuição inválido")]
    AssignmentFormError(Vec<AssignmentFormError>),

    #[error("Dia da semana inválido: {0}")]
    InvalidDayOfWeek(i16),

    #[error("Reserva duplicada")]
    DuplicateBooking,

    #[error("Transição de pagamento inválida: {from} -> {to}")]
    InvalidPaymentTransition {
        from: PaymentStatus,
        to: PaymentStatus,
    },

    #[error("Recurso não encontrado: {0}")]
    ResourceNotFound(String),

    #[error("Token inválido")]
    InvalidToken,

    #[error("Usuário não encontrado")]
    UserNotFound,

    #[error("Acesso negado")]
    Forbidden,

    // Variante para erros de banco de dados
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

// O formato que sai pela API
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub error: String,
    pub details: Option<Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.details {
            Some(details) => json!({ "error": self.error, "details": details }),
            None => json!({ "error": self.error }),
        };
        (self.status, Json(body)).into_response()
    }
}

impl AppError {
    /// Código estável usado como chave no catálogo de mensagens.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) | AppError::AssignmentFormError(_) => "validation_failed",
            AppError::InvalidDayOfWeek(_) => "invalid_day_of_week",
            AppError::DuplicateBooking => "duplicate_booking",
            AppError::InvalidPaymentTransition { .. } => "invalid_payment_transition",
            AppError::ResourceNotFound(_) => "resource_not_found",
            AppError::InvalidToken | AppError::JwtError(_) => "invalid_token",
            AppError::UserNotFound => "user_not_found",
            AppError::Forbidden => "forbidden",
            AppError::DatabaseError(_) | AppError::InternalServerError(_) => "unexpected_error",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_)
            | AppError::AssignmentFormError(_)
            | AppError::InvalidDayOfWeek(_) => StatusCode::BAD_REQUEST,
            AppError::DuplicateBooking | AppError::InvalidPaymentTransition { .. } => StatusCode::CONFLICT,
            AppError::ResourceNotFound(_) | AppError::UserNotFound => StatusCode::NOT_FOUND,
            AppError::InvalidToken | AppError::JwtError(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::DatabaseError(_) | AppError::InternalServerError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn to_api_error(&self, locale: &Locale, store: &I18nStore) -> ApiError {
        let status = self.status();
        let error = store.translate(&locale.0, self.code());

        let details = match self {
            // Detalhes por campo vindos do `validator`
            AppError::ValidationError(errors) => {
                let mut details = serde_json::Map::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .map(|e| {
                            let key = e.message.as_deref().unwrap_or(e.code.as_ref());
                            store.translate(&locale.0, key)
                        })
                        .collect();
                    details.insert(field.to_string(), json!(messages));
                }
                Some(Value::Object(details))
            }
            AppError::AssignmentFormError(errors) => {
                let mut details = serde_json::Map::new();
                for err in errors {
                    details.insert(
                        err.field().to_string(),
                        json!(store.translate(&locale.0, err.code())),
                    );
                }
                Some(Value::Object(details))
            }
            AppError::InvalidPaymentTransition { from, to } => {
                Some(json!({ "from": from, "to": to }))
            }
            AppError::ResourceNotFound(what) => Some(json!({ "resource": what })),
            _ => None,
        };

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            // O `tracing` loga a mensagem detalhada; o cliente só vê a genérica.
            tracing::error!("Erro Interno do Servidor: {:?}", self);
        }

        ApiError { status, error, details }
    }
}

// Para rejeições de extractors que não têm acesso ao Locale.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.to_api_error(&Locale::default(), &I18nStore::default())
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn en() -> Locale {
        Locale("en".to_string())
    }

    #[test]
    fn duplicate_booking_is_a_conflict_with_friendly_message() {
        let api = AppError::DuplicateBooking.to_api_error(&en(), &I18nStore::default());
        assert_eq!(api.status, StatusCode::CONFLICT);
        assert_eq!(api.error, "You already have a booking for this class on this date.");
        assert!(api.details.is_none());
    }

    #[test]
    fn assignment_form_errors_are_reported_per_field() {
        let err = AppError::AssignmentFormError(vec![
            AssignmentFormError::MissingScheduledClass,
            AssignmentFormError::NegativePaymentAmount,
        ]);
        let api = err.to_api_error(&en(), &I18nStore::default());

        assert_eq!(api.status, StatusCode::BAD_REQUEST);
        let details = api.details.expect("details");
        assert_eq!(details["scheduledClassId"], "Please select a class");
        assert_eq!(details["paymentAmount"], "Payment amount cannot be negative");
        assert!(details.get("instructorId").is_none());
    }

    #[test]
    fn database_errors_do_not_leak_details() {
        let api = AppError::DatabaseError(sqlx::Error::RowNotFound)
            .to_api_error(&en(), &I18nStore::default());
        assert_eq!(api.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api.error, "An unexpected error occurred.");
        assert!(api.details.is_none());
    }

    #[test]
    fn invalid_transition_carries_both_states() {
        let api = AppError::InvalidPaymentTransition {
            from: PaymentStatus::Cancelled,
            to: PaymentStatus::Paid,
        }
        .to_api_error(&Locale("pt".to_string()), &I18nStore::default());

        assert_eq!(api.status, StatusCode::CONFLICT);
        let details = api.details.expect("details");
        assert_eq!(details["from"], "cancelled");
        assert_eq!(details["to"], "paid");
    }
}
