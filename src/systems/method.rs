use serde::{Deserialize, Serialize};

/// How a bout ended, reduced to the categories the rating systems care about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MethodCategory {
    KoTko,
    Submission,
    Other,
}

impl MethodCategory {
    /// Knockouts and submissions are early stoppages; decisions, DQs and
    /// everything else are not.
    pub fn is_finish(self) -> bool {
        matches!(self, Self::KoTko | Self::Submission)
    }
}

/// Whether method tokens must appear in upper case ("KO", "SUB") or may
/// appear in any case.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MethodMatching {
    #[default]
    Exact,
    IgnoreCase,
}

/// Substring classification: anything containing "KO" is a knockout, then
/// anything containing "SUB" is a submission. Missing or unrecognized text is
/// `Other`.
pub fn classify_method(method: Option<&str>, matching: MethodMatching) -> MethodCategory {
    let Some(method) = method else {
        return MethodCategory::Other;
    };
    let upper;
    let text = match matching {
        MethodMatching::Exact => method,
        MethodMatching::IgnoreCase => {
            upper = method.to_ascii_uppercase();
            upper.as_str()
        }
    };

    if text.contains("KO") {
        MethodCategory::KoTko
    } else if text.contains("SUB") {
        MethodCategory::Submission
    } else {
        MethodCategory::Other
    }
}
