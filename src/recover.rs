//! Model response recovery.
//!
//! Generation output arrives as prose-wrapped, fence-wrapped, or bare JSON.
//! Strip the formatting noise, carve out the JSON span, decode it.

use crate::error::PipelineError;
use crate::util::truncate_chars;

const SNIPPET_MAX_CHARS: usize = 120;

/// Extract and decode the JSON payload of a raw model response.
///
/// Code-fence markers (with or without a language tag) are removed, then the
/// substring from the first `{` to the last `}` is decoded. The greedy span
/// tolerates commentary around a single object, but prose containing an
/// unrelated `}` after the real object mis-extracts — a known limitation;
/// callers lean on the fallback classifier for that case.
pub fn recover_json(raw: &str) -> Result<serde_json::Value, PipelineError> {
    if raw.trim().is_empty() {
        return Err(PipelineError::EmptyResponse);
    }

    let unfenced = raw.replace("```json", "").replace("```", "");
    let span = match (unfenced.find('{'), unfenced.rfind('}')) {
        (Some(start), Some(end)) if start < end => &unfenced[start..=end],
        _ => {
            return Err(PipelineError::MalformedResponse {
                snippet: snippet_of(&unfenced),
            })
        }
    };

    serde_json::from_str(span).map_err(|e| {
        log::debug!("response recovery: JSON decode failed: {e}");
        PipelineError::MalformedResponse {
            snippet: snippet_of(span),
        }
    })
}

/// Leading slice of the offending text, for diagnostics.
fn snippet_of(text: &str) -> String {
    truncate_chars(text.trim(), SNIPPET_MAX_CHARS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recovers_from_json_fence() {
        let raw = "```json\n{\"kind\": \"task\", \"title\": \"Buy milk\"}\n```";
        let value = recover_json(raw).unwrap();
        assert_eq!(value["kind"], "task");
        assert_eq!(value["title"], "Buy milk");
    }

    #[test]
    fn test_recovers_from_bare_fence() {
        let raw = "```\n{\"kind\": \"email\"}\n```";
        let value = recover_json(raw).unwrap();
        assert_eq!(value["kind"], "email");
    }

    #[test]
    fn test_recovers_with_leading_prose() {
        let raw = "Sure! Here is the structured action you asked for:\n{\"kind\": \"calendar\", \"date\": \"2026-03-01\"}";
        let value = recover_json(raw).unwrap();
        assert_eq!(value["kind"], "calendar");
    }

    #[test]
    fn test_nested_object_survives_greedy_span() {
        let raw = "{\"actions\": [{\"kind\": \"task\"}, {\"kind\": \"email\"}]}";
        let value = recover_json(raw).unwrap();
        assert_eq!(value["actions"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_empty_response() {
        assert!(matches!(
            recover_json("   \n"),
            Err(PipelineError::EmptyResponse)
        ));
    }

    #[test]
    fn test_non_json_text_fails_cleanly() {
        let err = recover_json("I could not understand that request.").unwrap_err();
        match err {
            PipelineError::MalformedResponse { snippet } => {
                assert!(snippet.starts_with("I could not"));
            }
            other => panic!("wrong error: {other:?}"),
        }
    }

    #[test]
    fn test_trailing_brace_in_prose_mis_extracts() {
        // Greedy span limitation: an unrelated `}` after the object drags
        // prose into the candidate and the decode fails (no panic, no
        // partial result).
        let raw = "{\"kind\": \"task\"} and that covers the set {a, b}";
        assert!(matches!(
            recover_json(raw),
            Err(PipelineError::MalformedResponse { .. })
        ));
    }
}
