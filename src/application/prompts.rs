//! Instruction templates for the generation backend and their canned
//! degraded-mode counterparts.
//!
//! Every generated message has a fixed fallback here, so a backend failure
//! never leaves a turn without an assistant reply.

use crate::domain::screening::Field;

/// Instruction for the opening greeting.
pub fn greeting_instruction(company: &str) -> String {
    format!(
        "You are a friendly, professional hiring assistant for {company}, a recruitment \
         agency. Greet the candidate warmly, explain that you will walk them through a \
         short initial screening, and ask for their full name to begin. Keep it to 2-3 \
         sentences and ask for nothing else."
    )
}

/// Canned greeting used when generation is unavailable.
pub fn canned_greeting(company: &str) -> String {
    format!(
        "Hello! I'm the {company} hiring assistant. I'll walk you through a short \
         screening: a few details about you, then some technical questions. \
         To begin, could you share your full name?"
    )
}

/// Instruction for acknowledging a value and asking for the next field.
pub fn collect_instruction(next_field: Field, collected_summary: &str) -> String {
    format!(
        "You are a hiring assistant collecting candidate details one field at a time. \
         Information collected so far:\n{collected_summary}\n\
         Briefly acknowledge the candidate's last answer, then ask only for their \
         {}. One or two sentences, no other questions.",
        next_field.label()
    )
}

/// Canned acknowledgement + next-field question.
pub fn canned_ask(next_field: Field) -> String {
    let question = match next_field {
        Field::Name => "Could you share your full name?",
        Field::Email => "What email address can we reach you at?",
        Field::Phone => {
            "What's your phone number? Please include the country code (e.g., +1 234 567 8900)."
        }
        Field::Experience => "How many years of professional experience do you have?",
        Field::Position => "What position are you interested in?",
        Field::Location => "Where are you currently located?",
        Field::TechStack => {
            "Which technologies are you proficient in? Please list them comma-separated \
             (e.g., Python, React, Docker)."
        }
    };
    format!("Got it, thank you! {question}")
}

/// Instruction for redirecting an off-topic or empty answer.
pub fn redirect_instruction(needed_field: Field) -> String {
    format!(
        "You are a hiring assistant. The candidate's last message did not answer the \
         current question. Politely steer the conversation back and ask again for \
         their {}. Do not answer unrelated questions. Two sentences at most.",
        needed_field.label()
    )
}

/// Canned redirect when generation is unavailable.
pub fn canned_redirect(needed_field: Field) -> String {
    format!(
        "Let's stay on track with the screening. Right now I just need your {} — \
         could you share that?",
        needed_field.label()
    )
}

/// Instruction for generating technical questions for one technology.
pub fn tech_questions_instruction(tech: &str, count: usize) -> String {
    format!(
        "You are a technical interviewer. Write {count} concise screening questions \
         about {tech}, mixing fundamentals with one practical scenario. Output one \
         question per line with no numbering and no commentary."
    )
}

/// Instruction for the closing summary.
pub fn conclusion_instruction(company: &str, collected_summary: &str) -> String {
    format!(
        "You are a hiring assistant for {company}. The screening is complete. \
         Thank the candidate, recap the collected details below, and explain that \
         the team will follow up by email within a few business days.\n\
         {collected_summary}"
    )
}

/// Canned closing summary.
pub fn canned_conclusion(company: &str, collected_summary: &str) -> String {
    format!(
        "Thank you for completing the {company} screening! Here's what I've recorded:\n\
         {collected_summary}\n\
         Our recruitment team will review your answers and follow up by email within \
         a few business days."
    )
}

/// Instruction for the farewell after an exit keyword.
pub fn farewell_instruction(company: &str) -> String {
    format!(
        "You are a hiring assistant for {company}. The candidate chose to end the \
         conversation early. Thank them warmly for their time and invite them to \
         return whenever they're ready. Two sentences."
    )
}

/// Canned farewell.
pub fn canned_farewell(company: &str) -> String {
    format!(
        "Thanks for your time, and no problem at all — you can restart the {company} \
         screening whenever suits you. Have a great day!"
    )
}

/// Notice for turns arriving after the conversation has ended.
pub fn session_ended_notice() -> String {
    "This conversation has ended. Start a new session to begin another screening.".to_string()
}
