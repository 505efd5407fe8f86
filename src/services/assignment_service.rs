// src/services/assignment_service.rs

use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::AssignmentStore,
    models::{
        assignment::{AssignmentDetail, ClassAssignment, CreateAssignmentPayload, PaymentStatus},
        auth::Session,
        filter::AssignmentFilter,
        report::{InstructorOverview, InstructorStats},
        schedule::ScheduledClassDetail,
    },
};

#[derive(Clone)]
pub struct AssignmentService {
    store: Arc<dyn AssignmentStore>,
}

impl AssignmentService {
    pub fn new(store: Arc<dyn AssignmentStore>) -> Self {
        Self { store }
    }

    pub async fn assign_class(
        &self,
        session: &Session,
        form: CreateAssignmentPayload,
    ) -> Result<ClassAssignment, AppError> {
        // 1. Valida o formulário inteiro antes de tocar no banco
        let new = form
            .into_new_assignment(session.user_id)
            .map_err(AppError::AssignmentFormError)?;

        // 2. Insere com status 'pending'
        let assignment = self.store.insert(&new).await?;

        tracing::info!(
            "📋 Aula {} atribuída ao instrutor {} por {}",
            assignment.scheduled_class_id,
            assignment.instructor_id,
            session.email
        );

        Ok(assignment)
    }

    pub async fn update_payment_status(
        &self,
        assignment_id: Uuid,
        target: PaymentStatus,
    ) -> Result<ClassAssignment, AppError> {
        let current = self
            .store
            .find(assignment_id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound(format!("assignment {assignment_id}")))?;

        if !current.payment_status.can_transition_to(target) {
            return Err(AppError::InvalidPaymentTransition {
                from: current.payment_status,
                to: target,
            });
        }

        // Mesmo status: nada a gravar
        if current.payment_status == target {
            return Ok(current);
        }

        let updated = self.store.update_payment_status(assignment_id, target).await?;

        tracing::info!(
            "💰 Pagamento da atribuição {}: {} -> {}",
            assignment_id,
            current.payment_status,
            updated.payment_status
        );

        Ok(updated)
    }

    pub async fn list_assignable_classes(&self) -> Result<Vec<ScheduledClassDetail>, AppError> {
        self.store.list_assignable_classes().await
    }

    pub async fn list_assignments(
        &self,
        filter: &AssignmentFilter,
        now: DateTime<Utc>,
    ) -> Result<Vec<AssignmentDetail>, AppError> {
        let all = self.store.list_details(None).await?;
        Ok(filter.apply(all, now))
    }

    // Os cards do instrutor consideram todas as atribuições dele;
    // o filtro só afeta a lista.
    pub async fn instructor_overview(
        &self,
        instructor_id: Uuid,
        filter: &AssignmentFilter,
        now: DateTime<Utc>,
    ) -> Result<InstructorOverview, AppError> {
        let mine = self.store.list_details(Some(instructor_id)).await?;
        let stats = InstructorStats::from_records(&mine, now);

        Ok(InstructorOverview {
            assignments: filter.apply(mine, now),
            stats,
        })
    }
}
