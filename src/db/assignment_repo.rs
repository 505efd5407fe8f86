// src/db/assignment_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        assignment::{
            AssignmentDetail, AssignmentFormError, ClassAssignment, NewAssignment, PaymentStatus,
        },
        schedule::ScheduledClassDetail,
    },
};

// Tudo que o serviço de atribuições precisa do armazenamento.
// Em produção é o Postgres; nos testes, uma implementação em memória.
#[async_trait]
pub trait AssignmentStore: Send + Sync {
    async fn insert(&self, new: &NewAssignment) -> Result<ClassAssignment, AppError>;

    async fn find(&self, id: Uuid) -> Result<Option<ClassAssignment>, AppError>;

    async fn update_payment_status(
        &self,
        id: Uuid,
        status: PaymentStatus,
    ) -> Result<ClassAssignment, AppError>;

    /// Mais recentes primeiro. `instructor_id = None` lista todas.
    async fn list_details(&self, instructor_id: Option<Uuid>) -> Result<Vec<AssignmentDetail>, AppError>;

    async fn list_assignable_classes(&self) -> Result<Vec<ScheduledClassDetail>, AppError>;
}

const ASSIGNMENT_COLUMNS: &str = r#"
    id, scheduled_class_id, instructor_id, assigned_by,
    payment_amount, payment_status, notes, assigned_at
"#;

// Nomes das chaves estrangeiras definidos na migração
const FK_SCHEDULED_CLASS: &str = "fk_class_assignments_scheduled_class";
const FK_INSTRUCTOR: &str = "fk_class_assignments_instructor";
const FK_ASSIGNED_BY: &str = "fk_class_assignments_assigned_by";

/// Traduz uma violação de chave estrangeira no INSERT para o erro do formulário.
pub(crate) fn foreign_key_error(constraint: Option<&str>) -> Option<AppError> {
    match constraint? {
        FK_SCHEDULED_CLASS => Some(AppError::AssignmentFormError(vec![
            AssignmentFormError::UnknownScheduledClass,
        ])),
        FK_INSTRUCTOR => Some(AppError::AssignmentFormError(vec![
            AssignmentFormError::UnknownInstructor,
        ])),
        FK_ASSIGNED_BY => Some(AppError::UserNotFound),
        _ => None,
    }
}

/// O UPDATE protegido não tocou nenhuma linha: ou ela não existe,
/// ou já estava cancelada quando o comando chegou.
pub(crate) fn resolve_skipped_update(
    id: Uuid,
    target: PaymentStatus,
    current: Option<ClassAssignment>,
) -> Result<ClassAssignment, AppError> {
    match current {
        None => Err(AppError::ResourceNotFound(format!("assignment {id}"))),
        Some(row) if row.payment_status == target => Ok(row),
        Some(row) => Err(AppError::InvalidPaymentTransition {
            from: row.payment_status,
            to: target,
        }),
    }
}

#[derive(Clone)]
pub struct AssignmentRepository {
    pool: PgPool,
}

impl AssignmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AssignmentStore for AssignmentRepository {
    async fn insert(&self, new: &NewAssignment) -> Result<ClassAssignment, AppError> {
        let sql = format!(
            r#"
            INSERT INTO class_assignments (
                scheduled_class_id, instructor_id, assigned_by,
                payment_amount, payment_status, notes
            )
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {ASSIGNMENT_COLUMNS}
            "#
        );

        let result = sqlx::query_as::<_, ClassAssignment>(&sql)
            .bind(new.scheduled_class_id)
            .bind(new.instructor_id)
            .bind(new.assigned_by)
            .bind(new.payment_amount)
            .bind(PaymentStatus::Pending)
            .bind(&new.notes)
            .fetch_one(&self.pool)
            .await;

        match result {
            Ok(assignment) => Ok(assignment),
            Err(sqlx::Error::Database(db_err)) if db_err.is_foreign_key_violation() => {
                match foreign_key_error(db_err.constraint()) {
                    Some(err) => {
                        tracing::info!(
                            "Atribuição recusada, referência inexistente ({:?})",
                            db_err.constraint()
                        );
                        Err(err)
                    }
                    None => Err(sqlx::Error::Database(db_err).into()),
                }
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn find(&self, id: Uuid) -> Result<Option<ClassAssignment>, AppError> {
        let sql = format!("SELECT {ASSIGNMENT_COLUMNS} FROM class_assignments WHERE id = $1");

        let assignment = sqlx::query_as::<_, ClassAssignment>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(assignment)
    }

    async fn update_payment_status(
        &self,
        id: Uuid,
        status: PaymentStatus,
    ) -> Result<ClassAssignment, AppError> {
        // Só o status muda. Linha cancelada nunca é reaberta, mesmo
        // que outra requisição tenha cancelado depois da leitura do serviço.
        let sql = format!(
            r#"
            UPDATE class_assignments
            SET payment_status = $2
            WHERE id = $1 AND payment_status <> 'cancelled'
            RETURNING {ASSIGNMENT_COLUMNS}
            "#
        );

        let updated = sqlx::query_as::<_, ClassAssignment>(&sql)
            .bind(id)
            .bind(status)
            .fetch_optional(&self.pool)
            .await?;

        match updated {
            Some(row) => Ok(row),
            None => resolve_skipped_update(id, status, self.find(id).await?),
        }
    }

    async fn list_details(&self, instructor_id: Option<Uuid>) -> Result<Vec<AssignmentDetail>, AppError> {
        let details = sqlx::query_as::<_, AssignmentDetail>(
            r#"
            SELECT
                ca.id, ca.scheduled_class_id, ca.instructor_id, ca.assigned_by,
                ca.payment_amount, ca.payment_status, ca.notes, ca.assigned_at,
                ct.name              AS class_name,
                ct.difficulty_level  AS difficulty_level,
                sc.start_time        AS class_start_time,
                sc.end_time          AS class_end_time,
                sc.status            AS class_status,
                iu.full_name         AS instructor_name,
                iu.email             AS instructor_email,
                ab.email             AS assigned_by_email
            FROM class_assignments ca
            LEFT JOIN scheduled_classes sc ON sc.id = ca.scheduled_class_id
            LEFT JOIN class_types ct       ON ct.id = sc.class_type_id
            LEFT JOIN users iu             ON iu.id = ca.instructor_id
            LEFT JOIN users ab             ON ab.id = ca.assigned_by
            WHERE ($1::uuid IS NULL OR ca.instructor_id = $1)
            ORDER BY ca.assigned_at DESC
            "#,
        )
        .bind(instructor_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(details)
    }

    async fn list_assignable_classes(&self) -> Result<Vec<ScheduledClassDetail>, AppError> {
        let classes = sqlx::query_as::<_, ScheduledClassDetail>(
            r#"
            SELECT
                sc.id, sc.class_type_id, sc.instructor_id,
                sc.start_time, sc.end_time,
                sc.max_participants, sc.current_participants, sc.status,
                ct.name AS class_name,
                ct.difficulty_level,
                ct.price,
                u.full_name AS instructor_name,
                u.email     AS instructor_email
            FROM scheduled_classes sc
            JOIN class_types ct ON ct.id = sc.class_type_id
            LEFT JOIN users u   ON u.id = sc.instructor_id
            WHERE sc.status IN ('scheduled', 'in_progress')
            ORDER BY sc.start_time ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(classes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal::Decimal;

    fn cancelled_row() -> ClassAssignment {
        ClassAssignment {
            id: Uuid::new_v4(),
            scheduled_class_id: Uuid::new_v4(),
            instructor_id: Uuid::new_v4(),
            assigned_by: Uuid::new_v4(),
            payment_amount: Decimal::from(50),
            payment_status: PaymentStatus::Cancelled,
            notes: String::new(),
            assigned_at: Utc::now(),
        }
    }

    #[test]
    fn unknown_class_or_instructor_becomes_a_form_error() {
        match foreign_key_error(Some(FK_SCHEDULED_CLASS)) {
            Some(AppError::AssignmentFormError(errors)) => {
                assert_eq!(errors, vec![AssignmentFormError::UnknownScheduledClass])
            }
            other => panic!("erro inesperado: {other:?}"),
        }
        match foreign_key_error(Some(FK_INSTRUCTOR)) {
            Some(AppError::AssignmentFormError(errors)) => {
                assert_eq!(errors, vec![AssignmentFormError::UnknownInstructor])
            }
            other => panic!("erro inesperado: {other:?}"),
        }
        assert!(matches!(foreign_key_error(Some(FK_ASSIGNED_BY)), Some(AppError::UserNotFound)));
        assert!(foreign_key_error(Some("outra_fk")).is_none());
        assert!(foreign_key_error(None).is_none());
    }

    #[test]
    fn skipped_update_on_cancelled_row_is_an_invalid_transition() {
        let row = cancelled_row();

        let err = resolve_skipped_update(row.id, PaymentStatus::Paid, Some(row)).unwrap_err();

        assert!(matches!(
            err,
            AppError::InvalidPaymentTransition {
                from: PaymentStatus::Cancelled,
                to: PaymentStatus::Paid
            }
        ));
    }

    #[test]
    fn skipped_update_without_row_is_not_found() {
        let err = resolve_skipped_update(Uuid::new_v4(), PaymentStatus::Paid, None).unwrap_err();
        assert!(matches!(err, AppError::ResourceNotFound(_)));
    }

    #[test]
    fn cancelling_an_already_cancelled_row_returns_it() {
        let row = cancelled_row();
        let id = row.id;

        let same = resolve_skipped_update(id, PaymentStatus::Cancelled, Some(row)).unwrap();

        assert_eq!(same.id, id);
        assert_eq!(same.payment_status, PaymentStatus::Cancelled);
    }
}
