use uuid::Uuid;

use super::quiz_service::rejected;
use super::{AppState, ServiceError};
use crate::engine::{InlineCheck, InlineCheckView, Reveal};
use crate::models::inline_check::{CreateInlineCheckRequest, InlineCheckResponse};

pub struct InlineCheckService<'a> {
    state: &'a AppState,
}

impl<'a> InlineCheckService<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    pub async fn create_check(
        &self,
        req: CreateInlineCheckRequest,
    ) -> Result<InlineCheckResponse, ServiceError> {
        let check = match (req.question_set_id, req.question_id, req.question) {
            (Some(set_id), Some(question_id), None) => {
                let set = self
                    .state
                    .content
                    .get(&set_id)
                    .ok_or_else(|| ServiceError::NotFound(format!("Question set {}", set_id)))?;
                let question = set.find(&question_id).ok_or_else(|| {
                    ServiceError::NotFound(format!("Question {} in set {}", question_id, set_id))
                })?;
                InlineCheck::new(question.clone())?
            }
            (None, None, Some(raw)) => InlineCheck::from_raw(raw)?,
            _ => {
                return Err(ServiceError::BadRequest(
                    "Supply either question_set_id with question_id, or question".to_string(),
                ))
            }
        };

        let view = check.view()?;
        let assessment_id = self.state.assessments.insert_inline_check(check).await?;
        tracing::info!(
            "Inline check started: id={}, question={}",
            assessment_id,
            view.question.question_id
        );

        Ok(InlineCheckResponse {
            assessment_id,
            check: view,
        })
    }

    pub async fn get_check(&self, id: Uuid) -> Result<InlineCheckView, ServiceError> {
        let check = self.state.assessments.inline_check(id).await?;
        let check = check.lock().await;
        Ok(check.view()?)
    }

    pub async fn select(&self, id: Uuid, option_index: usize) -> Result<InlineCheckView, ServiceError> {
        let check = self.state.assessments.inline_check(id).await?;
        let mut check = check.lock().await;
        check.select(option_index).map_err(rejected(id, "select"))
    }

    pub async fn commit(&self, id: Uuid) -> Result<Reveal, ServiceError> {
        let check = self.state.assessments.inline_check(id).await?;
        let mut check = check.lock().await;
        let reveal = check.commit().map_err(rejected(id, "commit"))?;
        tracing::debug!("Inline check {} committed: correct={}", id, reveal.is_correct);
        Ok(reveal)
    }

    pub async fn discard(&self, id: Uuid) -> Result<(), ServiceError> {
        self.state.assessments.remove_inline_check(id).await?;
        tracing::info!("Inline check discarded: id={}", id);
        Ok(())
    }
}
