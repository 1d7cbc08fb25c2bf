use std::fmt;

use serde::{Deserialize, Serialize};

/// Cognitive format requested from the model for a single question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Style {
    Conceptual,
    ScenarioBased,
    ProcessOrdering,
    ErrorDiagnosis,
    Matching,
    ExclusionLogic,
    SnippetEvaluation,
}

impl Style {
    /// The full catalog, in declaration order.
    pub const ALL: [Style; 7] = [
        Style::Conceptual,
        Style::ScenarioBased,
        Style::ProcessOrdering,
        Style::ErrorDiagnosis,
        Style::Matching,
        Style::ExclusionLogic,
        Style::SnippetEvaluation,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            Style::Conceptual => "conceptual",
            Style::ScenarioBased => "scenario-based",
            Style::ProcessOrdering => "process-ordering",
            Style::ErrorDiagnosis => "error-diagnosis",
            Style::Matching => "matching",
            Style::ExclusionLogic => "exclusion-logic",
            Style::SnippetEvaluation => "snippet-evaluation",
        }
    }

    /// Instruction sentence embedded in the prompt.
    pub fn hint(self) -> &'static str {
        match self {
            Style::Conceptual => {
                "Test understanding of an underlying principle rather than recall of a definition."
            }
            Style::ScenarioBased => {
                "Describe a short realistic team or project situation and ask what should happen next."
            }
            Style::ProcessOrdering => {
                "Ask which ordering of steps or phases is correct; each answer is a different sequence."
            }
            Style::ErrorDiagnosis => {
                "Describe something that went wrong in a process or pipeline and ask for the most likely cause."
            }
            Style::Matching => {
                "Ask which pairing of terms to descriptions is correct; each answer is a different set of pairs."
            }
            Style::ExclusionLogic => {
                "Ask which option does NOT belong or is NOT true, so three answers are valid statements."
            }
            Style::SnippetEvaluation => {
                "Quote a short configuration, workflow or ticket snippet inline in the question and ask what it does or what is wrong with it."
            }
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
