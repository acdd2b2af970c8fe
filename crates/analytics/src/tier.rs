use serde::Serialize;

/// Status vocabulary recognized as GREEN. "ABOVE" also covers the
/// combined "TARGET ... ABOVE" phrasing seen upstream.
const GREEN_KEYWORDS: &[&str] = &["ABOVE", "EXCELLENT", "SUCCESS"];

/// Status vocabulary recognized as YELLOW.
const YELLOW_KEYWORDS: &[&str] = &["ON TARGET", "NORMAL"];

/// Status vocabulary recognized as RED.
const RED_KEYWORDS: &[&str] = &["BELOW", "POOR", "ERROR", "FAIL"];

/// Three-valued safety tier derived from free-text status strings.
/// Never persisted; always computed on read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SafetyTier {
    Green,
    Yellow,
    Red,
}

impl SafetyTier {
    /// Map a raw status string to a tier. Total over any input: rule
    /// order is a deliberate tie-break and unrecognized vocabulary
    /// defaults to the middle tier instead of failing, so scoring never
    /// errors on new upstream strings. That default is policy, not a
    /// fallback of convenience.
    pub fn normalize(raw: &str) -> Self {
        let text = raw.trim().to_uppercase();

        if GREEN_KEYWORDS.iter().any(|k| text.contains(k)) {
            return Self::Green;
        }
        if YELLOW_KEYWORDS.iter().any(|k| text.contains(k)) || text == "YELLOW" {
            return Self::Yellow;
        }
        if RED_KEYWORDS.iter().any(|k| text.contains(k)) || text == "RED" {
            return Self::Red;
        }
        if text == "GREEN" {
            return Self::Green;
        }

        Self::Yellow
    }

    /// Scoring weight: a green indicator counts full, yellow half, red
    /// nothing.
    pub fn weight(self) -> f64 {
        match self {
            Self::Green => 1.0,
            Self::Yellow => 0.5,
            Self::Red => 0.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Green => "GREEN",
            Self::Yellow => "YELLOW",
            Self::Red => "RED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn above_target_is_green() {
        assert_eq!(SafetyTier::normalize("ABOVE TARGET"), SafetyTier::Green);
        assert_eq!(SafetyTier::normalize("Target is above"), SafetyTier::Green);
        assert_eq!(SafetyTier::normalize("excellent"), SafetyTier::Green);
        assert_eq!(SafetyTier::normalize("Success"), SafetyTier::Green);
    }

    #[test]
    fn on_target_is_yellow() {
        assert_eq!(SafetyTier::normalize("on target"), SafetyTier::Yellow);
        assert_eq!(SafetyTier::normalize("Normal"), SafetyTier::Yellow);
        assert_eq!(SafetyTier::normalize("yellow"), SafetyTier::Yellow);
    }

    #[test]
    fn failure_vocabulary_is_red() {
        assert_eq!(SafetyTier::normalize("FAIL"), SafetyTier::Red);
        assert_eq!(SafetyTier::normalize("below target"), SafetyTier::Red);
        assert_eq!(SafetyTier::normalize("Poor"), SafetyTier::Red);
        assert_eq!(SafetyTier::normalize("error"), SafetyTier::Red);
        assert_eq!(SafetyTier::normalize("red"), SafetyTier::Red);
    }

    #[test]
    fn literal_green_is_green() {
        assert_eq!(SafetyTier::normalize("GREEN"), SafetyTier::Green);
        assert_eq!(SafetyTier::normalize("  green  "), SafetyTier::Green);
    }

    #[test]
    fn unknown_and_empty_default_to_yellow() {
        assert_eq!(SafetyTier::normalize(""), SafetyTier::Yellow);
        assert_eq!(SafetyTier::normalize("   "), SafetyTier::Yellow);
        assert_eq!(SafetyTier::normalize("lorem ipsum"), SafetyTier::Yellow);
        assert_eq!(SafetyTier::normalize("GREENISH?"), SafetyTier::Yellow);
    }

    #[test]
    fn rule_order_breaks_ambiguous_input_first_match_wins() {
        // Contains both ABOVE and BELOW: the green rule runs first
        assert_eq!(
            SafetyTier::normalize("above last month, below target"),
            SafetyTier::Green
        );
    }

    #[test]
    fn weights_are_full_half_zero() {
        assert!((SafetyTier::Green.weight() - 1.0).abs() < f64::EPSILON);
        assert!((SafetyTier::Yellow.weight() - 0.5).abs() < f64::EPSILON);
        assert!(SafetyTier::Red.weight().abs() < f64::EPSILON);
    }

    #[test]
    fn serializes_uppercase() {
        assert_eq!(
            serde_json::to_string(&SafetyTier::Green).unwrap(),
            "\"GREEN\""
        );
    }
}
