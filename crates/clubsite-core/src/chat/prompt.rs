//! Prompt assembly for the chat assistant.
//!
//! The upstream message list is always
//! `[system(instructions + context), ...history, user(message)]`, with the
//! history cut to the configured window.

use clubsite_types::chat::{Turn, TurnRole};
use clubsite_types::config::{ChatConfig, LlmConfig};
use clubsite_types::llm::{CompletionRequest, Message};

/// Fixed reply the model is told to give when the context has no answer.
pub const NO_ANSWER_REPLY: &str =
    "Üzgünüm, bu konuda bilgim yok. Lütfen kulüp yönetimi ile iletişime geçin.";

/// Builds [`CompletionRequest`]s from a user message, prior turns and a
/// rendered context snapshot.
#[derive(Debug, Clone)]
pub struct PromptAssembler {
    assistant_name: String,
    club_name: String,
    history_window: usize,
    model: String,
    temperature: f64,
    top_p: f64,
    max_tokens: u32,
}

impl PromptAssembler {
    pub fn new(chat: &ChatConfig, llm: &LlmConfig) -> Self {
        Self {
            assistant_name: chat.assistant_name.clone(),
            club_name: chat.club_name.clone(),
            history_window: chat.history_window,
            model: llm.model.clone(),
            temperature: llm.temperature,
            top_p: llm.top_p,
            max_tokens: llm.max_tokens,
        }
    }

    pub fn history_window(&self) -> usize {
        self.history_window
    }

    /// Persona, behaviour rules and directive syntax.
    pub fn instructions(&self) -> String {
        format!(
            r#"You are "{assistant}", the helpful AI assistant for the {club}.
Your goal is to assist visitors by answering their questions using ONLY the information provided in the context below.

RULES:
- You must speak in a polite, formal, and helpful tone (Turkish language).
- **Specific Questions**: If the user asks a specific question like "Who manages the projects?" or "Who is the president?", use the Team Members list to find the person with the matching Role or Bio and answer directly.
- **General Lists**: If the user asks for a GENERAL list of members (e.g., "Who are the members?", "List the team"), do NOT list everyone. Instead, give a very brief summary (e.g., mention the President), say "Web sitemizden tüm üyelerimizi inceleyebilirsiniz" AND append the tag `[ACTION:MEMBERS]` to the end of your message.
- **Projects & News**: If you mention a specific Project or News article, give a brief summary and then APPEND a button tag so the user can read more. Format: `[BUTTON:/projects/ID|Devamını Oku]` or `[BUTTON:/news/ID|Devamını Oku]`. (Use the ID provided in the context.)
- **Events**: If you mention an upcoming Event and it has a valid external link (not 'Yok'), APPEND a registration button using that EXACT external link. Format: `[BUTTON:LINK|Başvuru Yap]`. NEVER link to /events/ID. If the link is 'Yok', do not add a button.
- **Button Format**: Always use `[BUTTON:URL|LABEL]` for links. Do not use markdown links like [Link](url).
- If the answer is not in the context, say "{no_answer}"
- NEVER invent information.
- Keep answers concise."#,
            assistant = self.assistant_name,
            club = self.club_name,
            no_answer = NO_ANSWER_REPLY,
        )
    }

    /// The full system message: instructions followed by the context block.
    pub fn system_message(&self, context: &str) -> String {
        format!("{}\n\nCONTEXT:\n{}", self.instructions(), context)
    }

    /// Assemble the upstream request.
    ///
    /// Only the last `history_window` turns are kept. A trailing user turn
    /// identical to `message` is dropped so clients that already appended the
    /// new message to their history do not send it twice.
    pub fn assemble(&self, message: &str, history: &[Turn], context: &str) -> CompletionRequest {
        let mut prior = history;
        if let Some((last, rest)) = prior.split_last()
            && last.role == TurnRole::User
            && last.text.trim() == message.trim()
        {
            prior = rest;
        }
        let start = prior.len().saturating_sub(self.history_window);

        let mut messages = Vec::with_capacity(prior.len() - start + 2);
        messages.push(Message::system(self.system_message(context)));
        messages.extend(prior[start..].iter().map(Message::from));
        messages.push(Message::user(message));

        CompletionRequest {
            model: self.model.clone(),
            messages,
            max_tokens: self.max_tokens,
            temperature: Some(self.temperature),
            top_p: Some(self.top_p),
        }
    }
}

impl Default for PromptAssembler {
    fn default() -> Self {
        Self::new(&ChatConfig::default(), &LlmConfig::default())
    }
}
