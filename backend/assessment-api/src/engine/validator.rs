use super::error::{AssessmentError, SelectionRejection};
use super::question::Question;

/// Rejects a selection that does not address one of the question's options.
pub fn check_selection(question: &Question, selected: usize) -> Result<(), AssessmentError> {
    if selected >= question.option_count() {
        return Err(AssessmentError::InvalidSelection {
            selected,
            reason: SelectionRejection::OutOfRange {
                option_count: question.option_count(),
            },
        });
    }
    Ok(())
}

/// Exact index comparison against the normalized answer. No partial credit.
pub fn evaluate(question: &Question, selected: usize) -> Result<bool, AssessmentError> {
    check_selection(question, selected)?;
    Ok(selected == question.correct_index())
}
