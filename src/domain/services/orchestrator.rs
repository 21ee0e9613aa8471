#[cfg(test)]
#[path = "orchestrator_test.rs"]
mod tests;
use crate::domain::models::AssistantError;
use crate::domain::models::Author;
use crate::domain::models::Conversation;
use crate::domain::models::DatabaseBox;
use crate::domain::models::LlmBox;
use crate::domain::models::Message;
use crate::domain::models::MessageType;

use super::prompts;

/// Phases of one chat turn. A turn enters the machine only with an active
/// connection and a non-empty question, and always leaves it at `Idle`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum TurnPhase {
    Idle,
    GeneratingSql,
    Executing,
    Synthesizing,
}

/// Session-scoped context: conversation history, the model client, and the
/// optional database handle. One orchestrator per session, never shared.
pub struct Orchestrator {
    llm: LlmBox,
    database: Option<DatabaseBox>,
    conversation: Conversation,
    phase: TurnPhase,
}

impl Orchestrator {
    pub fn new(llm: LlmBox) -> Orchestrator {
        tracing::debug!(prompt_version = prompts::PROMPT_VERSION, "Session started");
        return Orchestrator {
            llm,
            database: None,
            conversation: Conversation::default(),
            phase: TurnPhase::Idle,
        };
    }

    pub fn attach_database(&mut self, database: DatabaseBox) {
        self.database = Some(database);
    }

    pub fn has_database(&self) -> bool {
        return self.database.is_some();
    }

    pub fn conversation(&self) -> &Conversation {
        return &self.conversation;
    }

    /// Returns the schema description of the attached database, recomputed
    /// from the live connection.
    pub async fn schema(&self) -> Result<String, AssistantError> {
        let database = self.database.as_ref().ok_or_else(|| {
            return AssistantError::Connection("no active database connection".to_string());
        })?;

        return database.describe().await;
    }

    /// Runs one question-to-answer cycle. Returns `None` when the turn is
    /// rejected at entry (no connection, or a blank question), in which case
    /// the conversation is left untouched. Otherwise exactly one Human and
    /// one Assistant message are appended, the Assistant one carrying either
    /// the synthesized answer or an error description.
    pub async fn take_turn(&mut self, question: &str) -> Option<Message> {
        let question = question.trim();
        if question.is_empty() || self.database.is_none() {
            tracing::debug!(question = question, "Rejecting turn at entry");
            return None;
        }

        self.conversation
            .append(Message::new(Author::Human, question));

        let reply = match self.run_chain(question).await {
            Ok(answer) => Message::new(Author::Assistant, &answer),
            Err(err) => {
                tracing::error!(error = %err, "Turn failed");
                Message::new_with_type(Author::Assistant, MessageType::Error, &err.to_string())
            }
        };
        self.phase = TurnPhase::Idle;

        self.conversation.append(reply.clone());
        return Some(reply);
    }

    async fn run_chain(&mut self, question: &str) -> Result<String, AssistantError> {
        // Checked at turn entry.
        let database = self.database.as_ref().ok_or_else(|| {
            return AssistantError::Connection("no active database connection".to_string());
        })?;

        self.phase = TurnPhase::GeneratingSql;
        tracing::debug!(phase = ?self.phase, "Turn phase");
        let schema = database.describe().await?;
        let sql_prompt = prompts::sql_generation(&schema, question);
        let sql = self.llm.complete(&sql_prompt, 0.0).await?;
        let sql = sql.trim().to_string();
        tracing::debug!(sql = %sql, "Generated SQL");

        // The generated text runs verbatim whether or not it is valid SQL.
        // Execution failures become result text rather than aborting, so the
        // model can narrate them.
        self.phase = TurnPhase::Executing;
        tracing::debug!(phase = ?self.phase, "Turn phase");
        let result = match database.execute(&sql).await {
            Ok(rows) => rows,
            Err(err @ AssistantError::Execution(_)) => err.to_string(),
            Err(err) => return Err(err),
        };

        self.phase = TurnPhase::Synthesizing;
        tracing::debug!(phase = ?self.phase, "Turn phase");
        let history = self.conversation.render();
        let answer_prompt = prompts::answer_synthesis(&schema, &history, &sql, &result, question);
        let answer = self.llm.complete(&answer_prompt, 0.0).await?;

        return Ok(answer.trim().to_string());
    }
}
