//! Conversation manager: the per-turn engine of the screening dialogue.
//!
//! Owns the stage machine, the candidate record, the transcript, and the
//! technical question set. Each user turn produces exactly one assistant
//! message; when the generation backend fails, a canned message from
//! [`prompts`] is substituted so the flow never stalls.

use rand::Rng;
use std::sync::Arc;

use crate::application::prompts;
use crate::config::InterviewConfig;
use crate::domain::screening::{
    question_bank, validate, CandidateRecord, Field, Message, QuestionSet, Role, Stage, Transcript,
};
use crate::ports::{ContextRole, GenerationRequest, TextGenerator};

/// Keywords that end the conversation from any stage.
///
/// Matched case-insensitively against whole tokens, so "weekend" or
/// "Backend Developer" never trigger an exit.
pub const EXIT_KEYWORDS: [&str; 7] = ["exit", "quit", "bye", "goodbye", "stop", "end", "cancel"];

/// Number words accepted by the experience parser, used here only to decide
/// whether an invalid answer still looks like an attempt at the question.
const NUMBER_WORDS: [&str; 24] = [
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
    "eleven", "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen", "eighteen",
    "nineteen", "twenty", "thirty", "forty", "fifty",
];

/// How many transcript messages accompany each generation request.
const CONTEXT_TAIL: usize = 6;

/// The result of one conversation turn.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnOutcome {
    /// The single assistant message produced this turn.
    pub assistant_text: String,
    /// Stage after the turn.
    pub stage: Stage,
    /// Fraction of the interview completed, in `[0, 1)`.
    pub progress: f32,
}

/// Drives one screening conversation from greeting to conclusion.
pub struct ConversationManager {
    stage: Stage,
    candidate: CandidateRecord,
    transcript: Transcript,
    question_set: Option<QuestionSet>,
    interview: InterviewConfig,
    generator: Arc<dyn TextGenerator>,
}

impl ConversationManager {
    /// Creates a manager at the greeting stage with an empty record.
    pub fn new(generator: Arc<dyn TextGenerator>, interview: InterviewConfig) -> Self {
        Self {
            stage: Stage::Greeting,
            candidate: CandidateRecord::new(),
            transcript: Transcript::new(),
            question_set: None,
            interview,
            generator,
        }
    }

    /// Current stage.
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Fraction of the interview completed.
    pub fn progress(&self) -> f32 {
        self.stage.progress_fraction()
    }

    /// The candidate record collected so far.
    pub fn candidate(&self) -> &CandidateRecord {
        &self.candidate
    }

    /// The full conversation transcript.
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// The technical question set, once built.
    pub fn question_set(&self) -> Option<&QuestionSet> {
        self.question_set.as_ref()
    }

    /// Returns the session to a fresh greeting state.
    pub fn reset(&mut self) {
        self.stage = Stage::Greeting;
        self.candidate.reset();
        self.transcript.clear();
        self.question_set = None;
    }

    /// Opens the conversation with the greeting message.
    ///
    /// Advances from `Greeting` to `CollectName` so the candidate's first
    /// reply is parsed as their name. Called after the greeting has already
    /// been delivered, this re-asks for the current need without changing
    /// state.
    pub async fn greet(&mut self) -> TurnOutcome {
        if self.stage != Stage::Greeting {
            let text = self.current_need_text();
            return self.finish(text);
        }

        let company = self.interview.company_name.clone();
        let text = self
            .generate_or(
                prompts::greeting_instruction(&company),
                prompts::canned_greeting(&company),
            )
            .await;
        self.stage = Stage::CollectName;
        self.finish(text)
    }

    /// Processes one user turn and returns the assistant's reply.
    pub async fn process_turn(&mut self, raw: &str) -> TurnOutcome {
        let input = raw.trim();

        if self.stage == Stage::Exited {
            let text = prompts::session_ended_notice();
            return self.finish(text);
        }

        if !input.is_empty() {
            self.push_user(input);
        }

        if contains_exit_keyword(input) {
            return self.exit_turn().await;
        }

        if input.is_empty() {
            return self.redirect_turn().await;
        }

        match self.stage {
            Stage::Greeting => self.greet().await,
            Stage::TechQuestions => self.question_turn(input).await,
            Stage::Conclusion => self.conclusion_turn().await,
            // Exited is handled above; everything else collects a field.
            Stage::Exited => {
                let text = prompts::session_ended_notice();
                self.finish(text)
            }
            _ => self.collection_turn(input).await,
        }
    }

    // ----- Turn handlers -----

    /// Ends the conversation with a farewell. The record is kept as-is.
    async fn exit_turn(&mut self) -> TurnOutcome {
        tracing::info!(stage = ?self.stage, "candidate ended the conversation");
        let company = self.interview.company_name.clone();
        let text = self
            .generate_or(
                prompts::farewell_instruction(&company),
                prompts::canned_farewell(&company),
            )
            .await;
        self.stage = Stage::Exited;
        self.finish(text)
    }

    /// Validates the answer for the current collection stage.
    async fn collection_turn(&mut self, input: &str) -> TurnOutcome {
        let stage = self.stage;
        let Some(field) = stage.field() else {
            // Only collection stages are routed here.
            let text = self.current_need_text();
            return self.finish(text);
        };

        match validate(stage, input) {
            Ok(value) => {
                tracing::debug!(?field, "field collected");
                self.candidate.store(field, value);
                self.advance_turn().await
            }
            Err(reason) if looks_off_topic(stage, input) => {
                tracing::debug!(?field, %reason, "answer looks off-topic, redirecting");
                self.redirect_turn().await
            }
            Err(reason) => {
                let text = format!("Sorry, that doesn't look quite right. {reason}");
                self.finish(text)
            }
        }
    }

    /// Moves to the successor stage after a field was stored.
    async fn advance_turn(&mut self) -> TurnOutcome {
        self.stage = self.stage.successor();

        match self.stage {
            Stage::TechQuestions => {
                let set = self.build_question_set().await;
                if set.is_empty() {
                    // Nothing to ask; close out directly.
                    self.stage = Stage::Conclusion;
                    return self.conclusion_turn().await;
                }
                let total = set.len();
                let first = set
                    .next_unanswered()
                    .unwrap_or_default()
                    .to_string();
                self.question_set = Some(set);
                let text = format!(
                    "Great, thanks! Based on your tech stack I've put together {total} \
                     technical questions. Take your time with each one.\n\n\
                     Question 1 of {total}: {first}"
                );
                self.finish(text)
            }
            stage => {
                let Some(next_field) = stage.field() else {
                    return self.conclusion_turn().await;
                };
                let text = self
                    .generate_or(
                        prompts::collect_instruction(next_field, &self.candidate.summary()),
                        prompts::canned_ask(next_field),
                    )
                    .await;
                self.finish(text)
            }
        }
    }

    /// Records the answer to the current technical question.
    async fn question_turn(&mut self, input: &str) -> TurnOutcome {
        let Some(set) = self.question_set.as_mut() else {
            // A tech-questions stage without a set means construction was
            // skipped; close out rather than loop forever.
            self.stage = Stage::Conclusion;
            return self.conclusion_turn().await;
        };

        set.record_answer(input);

        if set.is_exhausted() {
            self.stage = Stage::Conclusion;
            return self.conclusion_turn().await;
        }

        let total = set.len();
        let number = set.next_number();
        let question = set.next_unanswered().unwrap_or_default().to_string();
        let text = format!("Thanks! Question {number} of {total}: {question}");
        self.finish(text)
    }

    /// Emits the closing summary.
    async fn conclusion_turn(&mut self) -> TurnOutcome {
        let company = self.interview.company_name.clone();
        let summary = self.candidate.summary();
        let text = self
            .generate_or(
                prompts::conclusion_instruction(&company, &summary),
                prompts::canned_conclusion(&company, &summary),
            )
            .await;
        self.finish(text)
    }

    /// Steers an empty or off-topic answer back to the current need.
    async fn redirect_turn(&mut self) -> TurnOutcome {
        match self.stage.field() {
            Some(field) => {
                let text = self
                    .generate_or(
                        prompts::redirect_instruction(field),
                        prompts::canned_redirect(field),
                    )
                    .await;
                self.finish(text)
            }
            None => {
                let text = self.current_need_text();
                self.finish(text)
            }
        }
    }

    // ----- Helpers -----

    /// Canned restatement of whatever the conversation currently needs.
    ///
    /// After the interview has concluded this is the recorded summary, so the
    /// candidate can always see what was captured.
    fn current_need_text(&self) -> String {
        match self.stage {
            Stage::Greeting => prompts::canned_greeting(&self.interview.company_name),
            Stage::TechQuestions => match self
                .question_set
                .as_ref()
                .and_then(|set| set.next_unanswered().map(|q| (set.next_number(), set.len(), q)))
            {
                Some((number, total, question)) => {
                    format!("Take your time. Question {number} of {total}: {question}")
                }
                None => self.canned_summary(),
            },
            Stage::Conclusion => self.canned_summary(),
            Stage::Exited => prompts::session_ended_notice(),
            stage => match stage.field() {
                Some(field) => prompts::canned_ask(field),
                None => self.canned_summary(),
            },
        }
    }

    fn canned_summary(&self) -> String {
        prompts::canned_conclusion(&self.interview.company_name, &self.candidate.summary())
    }

    /// Sends a generation request with recent context, falling back to the
    /// canned text on any backend error.
    async fn generate_or(&self, instruction: String, canned: String) -> String {
        let mut request = GenerationRequest::new(instruction)
            .with_max_tokens(250)
            .with_temperature(0.7);

        for message in self.transcript.tail(CONTEXT_TAIL) {
            let role = match message.role() {
                Role::System => ContextRole::System,
                Role::User => ContextRole::User,
                Role::Assistant => ContextRole::Assistant,
            };
            request = request.with_context(role, message.content());
        }

        match self.generator.generate(request).await {
            Ok(text) => text.content,
            Err(error) => {
                tracing::warn!(%error, "generation unavailable, using canned reply");
                canned
            }
        }
    }

    /// Assembles the technical question set from the declared stack.
    ///
    /// Bank technologies contribute their first sampled questions; unknown
    /// technologies go through the generation backend, with fixed generic
    /// questions as the fallback. The final size lands within the configured
    /// bounds whenever enough material exists.
    async fn build_question_set(&self) -> QuestionSet {
        let per_tech = self.interview.per_tech_questions;
        let min = self.interview.min_questions;
        let max = self.interview.max_questions;
        let techs: Vec<String> = self.candidate.technologies().to_vec();

        let mut questions: Vec<String> = Vec::new();
        for tech in &techs {
            let pool = question_bank::lookup(tech);
            if !pool.is_empty() {
                for question in pool.iter().take(per_tech) {
                    push_unique(&mut questions, (*question).to_string());
                }
                continue;
            }

            let request = GenerationRequest::new(prompts::tech_questions_instruction(tech, per_tech))
                .with_max_tokens(300)
                .with_temperature(0.5);
            match self.generator.generate(request).await {
                Ok(text) => {
                    let generated = parse_question_lines(&text.content, per_tech);
                    if generated.is_empty() {
                        for question in question_bank::generic_questions(tech).into_iter().take(per_tech) {
                            push_unique(&mut questions, question);
                        }
                    } else {
                        for question in generated {
                            push_unique(&mut questions, question);
                        }
                    }
                }
                Err(error) => {
                    tracing::warn!(%error, tech, "question generation failed, using generic questions");
                    for question in question_bank::generic_questions(tech).into_iter().take(per_tech) {
                        push_unique(&mut questions, question);
                    }
                }
            }
        }

        // Session-to-session variety: the target count is drawn from the
        // configured bounds, then the list is trimmed or padded toward it.
        let target = rand::thread_rng().gen_range(min..=max);
        if questions.len() > target {
            questions.truncate(target);
        }
        if questions.len() < min {
            'pad: for tech in &techs {
                for question in question_bank::generic_questions(tech) {
                    if questions.len() >= min {
                        break 'pad;
                    }
                    push_unique(&mut questions, question);
                }
            }
        }

        tracing::debug!(count = questions.len(), techs = ?techs, "question set assembled");
        QuestionSet::new(questions)
    }

    /// Builds the outcome and appends the assistant message to the transcript.
    fn finish(&mut self, text: String) -> TurnOutcome {
        self.push_assistant(&text);
        TurnOutcome {
            assistant_text: text,
            stage: self.stage,
            progress: self.stage.progress_fraction(),
        }
    }

    fn push_user(&mut self, content: &str) {
        match Message::user(content) {
            Ok(message) => self.transcript.push(message),
            Err(error) => tracing::error!(%error, "dropped empty user message"),
        }
    }

    fn push_assistant(&mut self, content: &str) {
        match Message::assistant(content) {
            Ok(message) => self.transcript.push(message),
            Err(error) => tracing::error!(%error, "dropped empty assistant message"),
        }
    }
}

/// Whole-token, case-insensitive exit keyword check.
pub fn contains_exit_keyword(text: &str) -> bool {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .any(|token| {
            EXIT_KEYWORDS
                .iter()
                .any(|keyword| token.eq_ignore_ascii_case(keyword))
        })
}

/// Conservative off-topic check, consulted only after validation failed.
///
/// An answer counts as off-topic when it carries none of the tokens the
/// current field would plausibly contain. Fields without a cheap indicator
/// always re-ask with the validation reason instead.
fn looks_off_topic(stage: Stage, text: &str) -> bool {
    let lowered = text.to_lowercase();
    match stage.field() {
        Some(Field::Email) => !lowered.contains('@'),
        Some(Field::Phone) => !lowered.chars().any(|c| c.is_ascii_digit() || c == '+'),
        Some(Field::Experience) => {
            !lowered.chars().any(|c| c.is_ascii_digit())
                && !lowered
                    .split_whitespace()
                    .any(|token| NUMBER_WORDS.contains(&token))
        }
        _ => false,
    }
}

fn push_unique(list: &mut Vec<String>, question: String) {
    if !list.iter().any(|existing| existing == &question) {
        list.push(question);
    }
}

/// Splits generated text into clean question lines, stripping any numbering
/// the backend added despite instructions.
fn parse_question_lines(text: &str, limit: usize) -> Vec<String> {
    text.lines()
        .map(|line| {
            line.trim()
                .trim_start_matches(|c: char| {
                    c.is_ascii_digit() || c == '.' || c == ')' || c == '-' || c == '*'
                })
                .trim_start()
        })
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .take(limit)
        .collect()
}
