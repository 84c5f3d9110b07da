pub mod inline_check;
pub mod question_set;
pub mod quiz;

use serde::Deserialize;

/// Body of every `.../selection` request.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SelectOptionRequest {
    pub option_index: usize,
}
