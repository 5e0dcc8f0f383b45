//! Vote model and the response returned for it.

use serde::{Deserialize, Serialize};

/// Form body of a vote submission
#[derive(Debug, Default)]
pub struct VoteForm {
    pub cute: Option<String>,
}

impl VoteForm {
    /// Build from decoded form pairs. When `cute` repeats, the first value wins.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let cute = pairs
            .into_iter()
            .find(|(key, _)| key == "cute")
            .map(|(_, value)| value);
        Self { cute }
    }
}

/// A single vote. Never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vote {
    pub image_filename: String,
    pub is_cute: bool,
}

impl Vote {
    /// Build a vote from the submitted form. Any non-empty `cute` value
    /// counts as "Cute"; an absent or empty one as "Very Cute".
    pub fn from_form(image_filename: String, form: &VoteForm) -> Self {
        let is_cute = form.cute.as_deref().is_some_and(|v| !v.is_empty());
        Self {
            image_filename,
            is_cute,
        }
    }

    pub fn verdict(&self) -> &'static str {
        if self.is_cute {
            "Cute"
        } else {
            "Very Cute"
        }
    }
}

/// Acknowledgment returned to the voting page
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct VoteResponse {
    pub success: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(cute: Option<&str>) -> VoteForm {
        VoteForm {
            cute: cute.map(str::to_string),
        }
    }

    #[test]
    fn test_verdict_from_form() {
        let vote = Vote::from_form("a.png".to_string(), &form(Some("1")));
        assert!(vote.is_cute);
        assert_eq!(vote.verdict(), "Cute");

        let vote = Vote::from_form("a.png".to_string(), &form(Some("")));
        assert_eq!(vote.verdict(), "Very Cute");

        let vote = Vote::from_form("a.png".to_string(), &form(None));
        assert_eq!(vote.verdict(), "Very Cute");
    }

    #[test]
    fn test_repeated_cute_first_value_wins() {
        let pairs = vec![
            ("cute".to_string(), "1".to_string()),
            ("cute".to_string(), "2".to_string()),
        ];
        let vote = Vote::from_form("a.png".to_string(), &VoteForm::from_pairs(pairs));
        assert_eq!(vote.verdict(), "Cute");

        let pairs = vec![
            ("other".to_string(), "x".to_string()),
            ("cute".to_string(), "".to_string()),
            ("cute".to_string(), "1".to_string()),
        ];
        let vote = Vote::from_form("a.png".to_string(), &VoteForm::from_pairs(pairs));
        assert_eq!(vote.verdict(), "Very Cute");

        assert!(VoteForm::from_pairs(Vec::new()).cute.is_none());
    }

    #[test]
    fn test_response_shape() {
        let json = serde_json::to_value(VoteResponse { success: true }).unwrap();
        assert_eq!(json, serde_json::json!({ "success": true }));
    }
}
