// src/models/assignment.rs

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::schedule::ClassStatus;

// --- Enums (Mapeando o Postgres) ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "payment_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Cancelled,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Cancelled => "cancelled",
        }
    }

    /// Destinos que o admin pode escolher a partir deste status.
    /// `Cancelled` é terminal.
    pub fn available_actions(&self) -> &'static [PaymentStatus] {
        match self {
            PaymentStatus::Pending => &[PaymentStatus::Paid, PaymentStatus::Cancelled],
            PaymentStatus::Paid => &[PaymentStatus::Pending, PaymentStatus::Cancelled],
            PaymentStatus::Cancelled => &[],
        }
    }

    /// Repetir o status atual é aceito (não muda nada).
    pub fn can_transition_to(&self, target: PaymentStatus) -> bool {
        *self == target || self.available_actions().contains(&target)
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// --- Structs ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClassAssignment {
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,

    pub scheduled_class_id: Uuid,

    // Quem vai dar a aula (instrutor ou yoga acharya)
    pub instructor_id: Uuid,

    // Quem fez a atribuição
    pub assigned_by: Uuid,

    #[schema(example = "50.00")]
    pub payment_amount: Decimal,

    pub payment_status: PaymentStatus,

    #[schema(example = "Cobrir a turma da manhã")]
    pub notes: String,

    pub assigned_at: DateTime<Utc>,
}

// Atribuição + dados da aula e das pessoas envolvidas (JOINs).
// Tudo que vem de LEFT JOIN é opcional.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentDetail {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub assignment: ClassAssignment,

    #[schema(example = "Hatha Yoga")]
    pub class_name: Option<String>,
    #[schema(example = "beginner")]
    pub difficulty_level: Option<String>,
    pub class_start_time: Option<DateTime<Utc>>,
    pub class_end_time: Option<DateTime<Utc>>,
    pub class_status: Option<ClassStatus>,

    #[schema(example = "Ananda Rao")]
    pub instructor_name: Option<String>,
    #[schema(example = "ananda@studio.com")]
    pub instructor_email: Option<String>,

    pub assigned_by_email: Option<String>,
}

impl AssignmentDetail {
    /// Nome exibido do instrutor: nome completo, senão e-mail, senão "Unknown".
    pub fn instructor_display_name(&self) -> &str {
        self.instructor_name
            .as_deref()
            .filter(|n| !n.is_empty())
            .or(self.instructor_email.as_deref())
            .unwrap_or("Unknown")
    }

    pub fn is_upcoming(&self, now: DateTime<Utc>) -> bool {
        self.class_start_time.is_some_and(|start| start > now)
    }

    pub fn is_completed(&self, now: DateTime<Utc>) -> bool {
        self.class_status == Some(ClassStatus::Completed)
            || self.class_end_time.is_some_and(|end| end < now)
    }
}

// --- Formulário de atribuição ---

// Campos opcionais de propósito: "não selecionado" é um erro do formulário,
// não um JSON malformado.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAssignmentPayload {
    pub scheduled_class_id: Option<Uuid>,
    pub instructor_id: Option<Uuid>,

    #[serde(default)]
    #[schema(example = "50.00")]
    pub payment_amount: Decimal,

    #[schema(example = "Substituição")]
    pub notes: Option<String>,
}

// Limites da coluna NUMERIC(10, 2)
pub const MAX_PAYMENT_AMOUNT: Decimal = Decimal::from_parts(1_410_065_407, 2, 0, false, 2); // 99999999.99
pub const PAYMENT_AMOUNT_SCALE: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentFormError {
    MissingScheduledClass,
    MissingInstructor,
    NegativePaymentAmount,
    PaymentAmountTooLarge,
    PaymentAmountTooPrecise,
    // Ids bem formados que não existem no banco
    UnknownScheduledClass,
    UnknownInstructor,
}

impl AssignmentFormError {
    // Nome do campo como o frontend conhece (camelCase)
    pub fn field(&self) -> &'static str {
        match self {
            AssignmentFormError::MissingScheduledClass
            | AssignmentFormError::UnknownScheduledClass => "scheduledClassId",
            AssignmentFormError::MissingInstructor | AssignmentFormError::UnknownInstructor => {
                "instructorId"
            }
            AssignmentFormError::NegativePaymentAmount
            | AssignmentFormError::PaymentAmountTooLarge
            | AssignmentFormError::PaymentAmountTooPrecise => "paymentAmount",
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AssignmentFormError::MissingScheduledClass => "select_class",
            AssignmentFormError::MissingInstructor => "select_instructor",
            AssignmentFormError::NegativePaymentAmount => "negative_amount",
            AssignmentFormError::PaymentAmountTooLarge => "amount_too_large",
            AssignmentFormError::PaymentAmountTooPrecise => "amount_too_precise",
            AssignmentFormError::UnknownScheduledClass => "unknown_class",
            AssignmentFormError::UnknownInstructor => "unknown_instructor",
        }
    }
}

// O que efetivamente vai para o banco
#[derive(Debug, Clone, PartialEq)]
pub struct NewAssignment {
    pub scheduled_class_id: Uuid,
    pub instructor_id: Uuid,
    pub assigned_by: Uuid,
    pub payment_amount: Decimal,
    pub notes: String,
}

impl CreateAssignmentPayload {
    /// Valida o formulário inteiro e devolve todos os erros de uma vez.
    pub fn into_new_assignment(self, assigned_by: Uuid) -> Result<NewAssignment, Vec<AssignmentFormError>> {
        let mut errors = Vec::new();

        if self.scheduled_class_id.is_none() {
            errors.push(AssignmentFormError::MissingScheduledClass);
        }
        if self.instructor_id.is_none() {
            errors.push(AssignmentFormError::MissingInstructor);
        }
        if self.payment_amount < Decimal::ZERO {
            errors.push(AssignmentFormError::NegativePaymentAmount);
        } else if self.payment_amount > MAX_PAYMENT_AMOUNT {
            errors.push(AssignmentFormError::PaymentAmountTooLarge);
        } else if self.payment_amount.normalize().scale() > PAYMENT_AMOUNT_SCALE {
            // "12.50" passa; "12.505" seria arredondado pelo banco
            errors.push(AssignmentFormError::PaymentAmountTooPrecise);
        }

        match (self.scheduled_class_id, self.instructor_id) {
            (Some(scheduled_class_id), Some(instructor_id)) if errors.is_empty() => Ok(NewAssignment {
                scheduled_class_id,
                instructor_id,
                assigned_by,
                payment_amount: self.payment_amount,
                notes: self.notes.unwrap_or_default(),
            }),
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePaymentStatusPayload {
    #[schema(example = "paid")]
    pub payment_status: PaymentStatus,
}
