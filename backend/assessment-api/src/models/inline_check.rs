use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::engine::{InlineCheckView, QuestionId, RawQuestion};

/// Either a reference into a loaded set or a question supplied inline.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateInlineCheckRequest {
    pub question_set_id: Option<String>,
    pub question_id: Option<QuestionId>,
    pub question: Option<RawQuestion>,
}

#[derive(Debug, Serialize)]
pub struct InlineCheckResponse {
    pub assessment_id: Uuid,
    pub check: InlineCheckView,
}
