use crate::models::RecommendationResult;

/// Longest raw excerpt shown to the user when the model output is not valid JSON
const FALLBACK_SUMMARY_CHARS: usize = 500;

/// Parses extracted model output into a [`RecommendationResult`]
///
/// Never fails: text that does not parse becomes the summary of an otherwise
/// empty result, so the user still sees what the model said.
pub fn parse_recommendations(extracted: &str) -> RecommendationResult {
    match serde_json::from_str::<RecommendationResult>(extracted) {
        Ok(result) => result,
        Err(e) => {
            tracing::warn!(
                error = %e,
                length = extracted.len(),
                "Model output was not valid recommendation JSON, falling back to raw text"
            );
            RecommendationResult::message(truncate_summary(extracted))
        }
    }
}

fn truncate_summary(text: &str) -> String {
    match text.char_indices().nth(FALLBACK_SUMMARY_CHARS) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
