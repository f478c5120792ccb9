//! The finalized technical question set for a session.
//!
//! Built once when the conversation enters the technical-question stage and
//! immutable afterwards, except for recording the candidate's answers in
//! order.

use serde::{Deserialize, Serialize};

/// Ordered technical questions with answers recorded as they arrive.
///
/// # Invariants
///
/// - The question list never changes after construction.
/// - Answers are recorded strictly in question order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuestionSet {
    questions: Vec<String>,
    answers: Vec<String>,
}

impl QuestionSet {
    /// Creates a question set from an ordered list of questions.
    pub fn new(questions: Vec<String>) -> Self {
        Self {
            questions,
            answers: Vec::new(),
        }
    }

    /// All questions in presentation order.
    pub fn questions(&self) -> &[String] {
        &self.questions
    }

    /// Number of questions in the set.
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Returns true if the set holds no questions.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// The next question awaiting an answer, if any.
    pub fn next_unanswered(&self) -> Option<&str> {
        self.questions.get(self.answers.len()).map(String::as_str)
    }

    /// One-based number of the next question, for "question 2 of 5" phrasing.
    pub fn next_number(&self) -> usize {
        self.answers.len() + 1
    }

    /// Records the answer to the current question.
    ///
    /// Answers are not graded; any text is accepted. Recording past the end
    /// of the set is ignored.
    pub fn record_answer(&mut self, answer: impl Into<String>) {
        if self.answers.len() < self.questions.len() {
            self.answers.push(answer.into());
        }
    }

    /// Returns true once every question has been answered.
    pub fn is_exhausted(&self) -> bool {
        self.answers.len() >= self.questions.len()
    }

    /// Question/answer pairs recorded so far, in order.
    pub fn answered(&self) -> impl Iterator<Item = (&str, &str)> {
        self.questions
            .iter()
            .zip(self.answers.iter())
            .map(|(q, a)| (q.as_str(), a.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_questions() -> QuestionSet {
        QuestionSet::new(vec!["q1".into(), "q2".into(), "q3".into()])
    }

    #[test]
    fn presents_questions_in_order() {
        let mut set = three_questions();
        assert_eq!(set.next_unanswered(), Some("q1"));
        assert_eq!(set.next_number(), 1);

        set.record_answer("a1");
        assert_eq!(set.next_unanswered(), Some("q2"));
        assert_eq!(set.next_number(), 2);
    }

    #[test]
    fn exhausted_after_all_answers() {
        let mut set = three_questions();
        assert!(!set.is_exhausted());
        for answer in ["a1", "a2", "a3"] {
            set.record_answer(answer);
        }
        assert!(set.is_exhausted());
        assert_eq!(set.next_unanswered(), None);
    }

    #[test]
    fn recording_past_the_end_is_ignored() {
        let mut set = QuestionSet::new(vec!["q1".into()]);
        set.record_answer("a1");
        set.record_answer("late");
        assert_eq!(set.answered().count(), 1);
    }

    #[test]
    fn answered_pairs_questions_with_answers() {
        let mut set = three_questions();
        set.record_answer("a1");
        set.record_answer("a2");
        let pairs: Vec<_> = set.answered().collect();
        assert_eq!(pairs, vec![("q1", "a1"), ("q2", "a2")]);
    }

    #[test]
    fn empty_set_is_immediately_exhausted() {
        let set = QuestionSet::new(Vec::new());
        assert!(set.is_empty());
        assert!(set.is_exhausted());
    }
}
