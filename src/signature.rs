//! Email signature enforcement.
//!
//! The prompt tells the model to leave sign-offs out of drafted bodies, but
//! it hallucinates them anyway — often with an invented sender name. Strip
//! whatever it produced, then append the canonical block built from the
//! verified identity.

/// Recognized sign-off openers, matched case-insensitively.
const SIGN_OFF_PHRASES: &[&str] = &[
    "best regards,",
    "regards,",
    "sincerely,",
    "thanks,",
    "thank you,",
    "cheers,",
    "warm regards,",
    "kind regards,",
];

/// Cut the body at the earliest recognized sign-off phrase and trim
/// trailing whitespace. Bodies without one pass through (trailing
/// whitespace still trimmed, so enforcement stays idempotent).
pub fn strip_sign_off(body: &str) -> &str {
    let lowered = body.to_ascii_lowercase();
    let cut = SIGN_OFF_PHRASES
        .iter()
        .filter_map(|phrase| lowered.find(phrase))
        .min();
    match cut {
        Some(idx) => body[..idx].trim_end(),
        None => body.trim_end(),
    }
}

/// Append the canonical signature block for the verified sender.
///
/// The emitted body always ends with exactly one canonical block. Running
/// this on its own output strips the just-appended block (the canonical
/// opener is in the recognized set) and re-appends an identical one.
pub fn enforce_signature(body: &str, sender_name: &str) -> String {
    format!("{}\n\nBest regards,\n{}", strip_sign_off(body), sender_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hallucinated_signature_replaced_with_real_name() {
        let body = "Let's sync next week.\n\nBest regards,\nAI Assistant";
        assert_eq!(
            enforce_signature(body, "Priya Shah"),
            "Let's sync next week.\n\nBest regards,\nPriya Shah"
        );
    }

    #[test]
    fn test_body_without_sign_off_gets_signature_appended() {
        assert_eq!(
            enforce_signature("Budget numbers attached.", "Raj Patel"),
            "Budget numbers attached.\n\nBest regards,\nRaj Patel"
        );
    }

    #[test]
    fn test_enforcement_is_idempotent() {
        for body in [
            "Quick note on the launch.",
            "See you there.\n\nCheers,\nThe Bot",
            "Trailing whitespace here.\n\n",
        ] {
            let once = enforce_signature(body, "Priya Shah");
            let twice = enforce_signature(&once, "Priya Shah");
            assert_eq!(once, twice, "not idempotent for {body:?}");
        }
    }

    #[test]
    fn test_earliest_phrase_wins() {
        let body = "Thanks, will do.\n\nSincerely,\nBot";
        // "thanks," appears first; everything from there is stripped.
        assert_eq!(strip_sign_off(body), "");
    }

    #[test]
    fn test_strip_is_case_insensitive() {
        let body = "Done.\n\nKIND REGARDS,\nSomeone Else";
        assert_eq!(strip_sign_off(body), "Done.");
    }

    #[test]
    fn test_each_recognized_phrase_strips() {
        for phrase in SIGN_OFF_PHRASES {
            let body = format!("Content line.\n\n{phrase}\nInvented Name");
            assert_eq!(strip_sign_off(&body), "Content line.", "phrase {phrase}");
        }
    }
}
