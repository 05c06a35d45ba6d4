//! Copyright-education quiz shown to creators before their first upload.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub id: u32,
    pub question: String,
    pub options: Vec<String>,
    pub correct_index: usize,
    #[serde(default)]
    pub explanation: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
    pub total: usize,
    pub correct: usize,
    pub passed: bool,
    /// Ids of the questions answered wrongly or left unanswered.
    pub missed: Vec<u32>,
}

/// Share of correct answers needed to pass.
pub const PASS_RATIO: f64 = 0.8;

fn q(id: u32, question: &str, options: &[&str], correct_index: usize, explanation: &str) -> QuizQuestion {
    QuizQuestion {
        id,
        question: question.to_string(),
        options: options.iter().map(|o| o.to_string()).collect(),
        correct_index,
        explanation: explanation.to_string(),
    }
}

pub fn default_questions() -> Vec<QuizQuestion> {
    vec![
        q(
            1,
            "You bought a song on a music store. Can you use it as background music in your upload?",
            &[
                "Yes, I paid for it",
                "Only with a licence that covers online video use",
                "Yes, if the clip is shorter than 30 seconds",
            ],
            1,
            "Buying a track grants a personal listening licence, not a synchronisation licence.",
        ),
        q(
            2,
            "Does crediting the original creator in the description make reuse legal?",
            &["Yes, credit is enough", "No, credit is not permission"],
            1,
            "Attribution does not replace permission from the rights holder.",
        ),
        q(
            3,
            "Which of these is most likely to count as fair use?",
            &[
                "Re-uploading a full film with a new title",
                "Short excerpts used in a critical review",
                "A compilation of other creators' highlights",
            ],
            1,
            "Commentary and criticism using limited excerpts is the classic fair-use case.",
        ),
        q(
            4,
            "Someone re-uploaded your video without permission. What should you do?",
            &[
                "Re-upload theirs in return",
                "File a copyright report through the report flow",
                "Nothing, it's free promotion",
            ],
            1,
            "Use the report flow with the 'Infringes my rights' reason.",
        ),
        q(
            5,
            "Are works in the public domain free to use?",
            &["Yes", "No, never", "Only for non-commercial videos"],
            0,
            "Public-domain works are no longer protected by copyright.",
        ),
    ]
}

/// Score a set of answers given as option indices in question order.
/// Missing trailing answers count as wrong.
pub fn score(questions: &[QuizQuestion], answers: &[Option<usize>]) -> QuizResult {
    let missed: Vec<u32> = questions
        .iter()
        .enumerate()
        .filter(|(i, q)| answers.get(*i).copied().flatten() != Some(q.correct_index))
        .map(|(_, q)| q.id)
        .collect();
    let total = questions.len();
    let correct = total - missed.len();
    let passed = total > 0 && (correct as f64 / total as f64) >= PASS_RATIO;
    QuizResult {
        total,
        correct,
        passed,
        missed,
    }
}
