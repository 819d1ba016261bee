// File: src/recognizer.rs
use serde::{Deserialize, Serialize};

/// One detection returned by the remote sign classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub class: String,
    pub confidence: f64,
}

/// Body shape of the classifier's JSON response. The transport is owned by
/// the host; this side only consumes the decoded body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DetectionResponse {
    #[serde(default)]
    pub predictions: Vec<Prediction>,
}

impl DetectionResponse {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// The most confident detection, if any came back.
    /// A left-to-right fold with a strict comparison, so the earliest of
    /// several equally confident predictions wins.
    pub fn best(&self) -> Option<&Prediction> {
        self.predictions
            .iter()
            .reduce(|best, candidate| {
                if candidate.confidence > best.confidence {
                    candidate
                } else {
                    best
                }
            })
    }
}

/// Accumulates classifier output into a running transcript.
///
/// The camera polls faster than people sign, so one sign shows up in several
/// consecutive responses; consecutive duplicates collapse into one word.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Transcript {
    words: Vec<String>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one classifier response. Returns the accepted word when it
    /// extended the transcript, `None` for empty responses and repeats.
    pub fn push_response(&mut self, response: &DetectionResponse) -> Option<&str> {
        let best = response.best()?;
        if self.words.last().map(String::as_str) == Some(best.class.as_str()) {
            return None;
        }
        self.words.push(best.class.clone());
        self.words.last().map(String::as_str)
    }

    /// Removes the most recent word (the tap-to-undo affordance on the
    /// result panel).
    pub fn undo_last(&mut self) -> Option<String> {
        self.words.pop()
    }

    /// The most recently recognized word, empty before anything arrived.
    pub fn latest(&self) -> &str {
        self.words.last().map(String::as_str).unwrap_or("")
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// The display string: words joined with no separator, so letter-level
    /// detections read as continuous spelling.
    pub fn joined(&self) -> String {
        self.words.concat()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(pairs: &[(&str, f64)]) -> DetectionResponse {
        DetectionResponse {
            predictions: pairs
                .iter()
                .map(|&(class, confidence)| Prediction {
                    class: class.to_string(),
                    confidence,
                })
                .collect(),
        }
    }

    #[test]
    fn best_picks_highest_confidence() {
        let r = response(&[("A", 0.2), ("B", 0.9), ("C", 0.5)]);
        assert_eq!(r.best().unwrap().class, "B");
    }

    #[test]
    fn best_keeps_the_earlier_prediction_on_ties() {
        let r = response(&[("A", 0.5), ("B", 0.5)]);
        assert_eq!(r.best().unwrap().class, "A");
    }

    #[test]
    fn empty_response_has_no_best() {
        assert!(response(&[]).best().is_none());
    }

    #[test]
    fn response_parses_the_classifier_body() {
        let r = DetectionResponse::from_json(
            r#"{"predictions": [{"class": "HELLO", "confidence": 0.87}]}"#,
        )
        .unwrap();
        assert_eq!(r.predictions.len(), 1);
        assert_eq!(r.best().unwrap().class, "HELLO");
    }

    #[test]
    fn missing_predictions_field_reads_as_empty() {
        let r = DetectionResponse::from_json("{}").unwrap();
        assert!(r.predictions.is_empty());
        assert!(r.best().is_none());
    }

    #[test]
    fn transcript_collapses_consecutive_duplicates() {
        let mut transcript = Transcript::new();
        assert_eq!(transcript.push_response(&response(&[("A", 0.9)])), Some("A"));
        assert_eq!(transcript.push_response(&response(&[("A", 0.8)])), None);
        assert_eq!(transcript.push_response(&response(&[("B", 0.9)])), Some("B"));
        // A non-consecutive repeat is a new word again.
        assert_eq!(transcript.push_response(&response(&[("A", 0.9)])), Some("A"));
        assert_eq!(transcript.joined(), "ABA");
    }

    #[test]
    fn empty_responses_leave_the_transcript_alone() {
        let mut transcript = Transcript::new();
        assert_eq!(transcript.push_response(&response(&[])), None);
        assert!(transcript.is_empty());
        assert_eq!(transcript.latest(), "");
    }

    #[test]
    fn undo_removes_the_newest_word() {
        let mut transcript = Transcript::new();
        transcript.push_response(&response(&[("A", 0.9)]));
        transcript.push_response(&response(&[("B", 0.9)]));
        assert_eq!(transcript.undo_last(), Some("B".to_string()));
        assert_eq!(transcript.latest(), "A");
        assert_eq!(transcript.undo_last(), Some("A".to_string()));
        assert_eq!(transcript.undo_last(), None);
    }
}
