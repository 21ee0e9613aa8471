use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;

use super::Orchestrator;
use crate::domain::models::AssistantError;
use crate::domain::models::Author;
use crate::domain::models::Database;
use crate::domain::models::Llm;
use crate::domain::models::MessageType;

const SCHEMA: &str = "Table `freelancers`:\n  - name (varchar(255))\n  - skills (text)\n  - email (varchar(255))";

struct MockLlm {
    prompts: Arc<Mutex<Vec<String>>>,
    responses: Mutex<Vec<Result<String, AssistantError>>>,
}

impl MockLlm {
    fn new(responses: Vec<Result<String, AssistantError>>) -> MockLlm {
        let mut responses = responses;
        responses.reverse();
        return MockLlm {
            prompts: Arc::new(Mutex::new(vec![])),
            responses: Mutex::new(responses),
        };
    }
}

#[async_trait]
impl Llm for MockLlm {
    async fn health_check(&self) -> anyhow::Result<()> {
        return Ok(());
    }

    async fn complete(&self, prompt: &str, _temperature: f32) -> Result<String, AssistantError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        return self.responses.lock().unwrap().pop().unwrap();
    }
}

struct MockDatabase {
    execution: Result<String, AssistantError>,
}

#[async_trait]
impl Database for MockDatabase {
    async fn describe(&self) -> Result<String, AssistantError> {
        return Ok(SCHEMA.to_string());
    }

    async fn execute(&self, _sql: &str) -> Result<String, AssistantError> {
        match &self.execution {
            Ok(text) => return Ok(text.clone()),
            Err(AssistantError::Execution(text)) => {
                return Err(AssistantError::Execution(text.clone()))
            }
            Err(AssistantError::Connection(text)) => {
                return Err(AssistantError::Connection(text.clone()))
            }
            _ => unreachable!(),
        }
    }
}

#[tokio::test]
async fn it_completes_a_turn_and_appends_two_messages() {
    let llm = MockLlm::new(vec![
        Ok("SELECT name FROM freelancers WHERE skills LIKE '%Python%'".to_string()),
        Ok("Three freelancers know Python.".to_string()),
    ]);
    let prompts = llm.prompts.clone();

    let mut orchestrator = Orchestrator::new(Box::new(llm));
    orchestrator.attach_database(Box::new(MockDatabase {
        execution: Ok("name\nJohn Doe\nJane Roe\nSam Poe".to_string()),
    }));

    let reply = orchestrator
        .take_turn("List all freelancers with Python skills")
        .await
        .unwrap();

    assert_eq!(reply.author, Author::Assistant);
    assert_eq!(reply.text, "Three freelancers know Python.");
    assert_eq!(reply.message_type(), MessageType::Normal);

    // Seed greeting plus one Human and one Assistant message.
    let messages = orchestrator.conversation().messages();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[1].author, Author::Human);
    assert_eq!(messages[1].text, "List all freelancers with Python skills");
    assert_eq!(messages[2].author, Author::Assistant);

    let prompts = prompts.lock().unwrap();
    assert_eq!(prompts.len(), 2);
    assert!(prompts[0].contains("Write only the SQL query and nothing else."));
    assert!(prompts[0].contains(SCHEMA));
    assert!(prompts[1].contains("<SQL>SELECT name FROM freelancers WHERE skills LIKE '%Python%'</SQL>"));
    assert!(prompts[1].contains("SQL Response: name\nJohn Doe"));
    assert!(prompts[1].contains("Human: List all freelancers with Python skills"));
}

#[tokio::test]
async fn it_describes_the_schema_identically_across_calls() {
    let llm = MockLlm::new(vec![]);
    let mut orchestrator = Orchestrator::new(Box::new(llm));
    orchestrator.attach_database(Box::new(MockDatabase {
        execution: Ok("".to_string()),
    }));

    let first = orchestrator.schema().await.unwrap();
    let second = orchestrator.schema().await.unwrap();

    assert_eq!(first, second);
    assert!(first.contains("freelancers"));
}

#[tokio::test]
async fn it_rejects_turns_without_a_connection() {
    let llm = MockLlm::new(vec![]);
    let mut orchestrator = Orchestrator::new(Box::new(llm));

    let before = orchestrator.conversation().len();
    let reply = orchestrator.take_turn("List all freelancers").await;

    assert!(reply.is_none());
    assert_eq!(orchestrator.conversation().len(), before);
}

#[tokio::test]
async fn it_rejects_blank_questions() {
    let llm = MockLlm::new(vec![]);
    let mut orchestrator = Orchestrator::new(Box::new(llm));
    orchestrator.attach_database(Box::new(MockDatabase {
        execution: Ok("".to_string()),
    }));

    let reply = orchestrator.take_turn("   ").await;

    assert!(reply.is_none());
    assert_eq!(orchestrator.conversation().len(), 1);
}

#[tokio::test]
async fn it_narrates_execution_failures_instead_of_aborting() {
    let llm = MockLlm::new(vec![
        Ok("SELECT nope FROM freelancers".to_string()),
        Ok("That column does not exist in the freelancers table.".to_string()),
    ]);
    let prompts = llm.prompts.clone();

    let mut orchestrator = Orchestrator::new(Box::new(llm));
    orchestrator.attach_database(Box::new(MockDatabase {
        execution: Err(AssistantError::Execution(
            "Unknown column 'nope' in 'field list'".to_string(),
        )),
    }));

    let reply = orchestrator.take_turn("Show me the nope column").await.unwrap();

    assert!(!reply.text.is_empty());
    assert_eq!(reply.message_type(), MessageType::Normal);
    assert_eq!(orchestrator.conversation().len(), 3);

    let prompts = prompts.lock().unwrap();
    assert!(prompts[1].contains("SQL Response: SQL execution failed: Unknown column 'nope'"));
}

#[tokio::test]
async fn it_records_an_assistant_error_message_when_generation_fails() {
    let llm = MockLlm::new(vec![Err(AssistantError::Generation(
        "rate limit exceeded".to_string(),
    ))]);

    let mut orchestrator = Orchestrator::new(Box::new(llm));
    orchestrator.attach_database(Box::new(MockDatabase {
        execution: Ok("".to_string()),
    }));

    let reply = orchestrator.take_turn("List all freelancers").await.unwrap();

    assert_eq!(reply.message_type(), MessageType::Error);
    assert!(reply.text.contains("rate limit exceeded"));

    // The failed turn still leaves the history answered and alternating.
    let messages = orchestrator.conversation().messages();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[1].author, Author::Human);
    assert_eq!(messages[2].author, Author::Assistant);
}

#[tokio::test]
async fn it_records_an_error_when_the_connection_drops_mid_turn() {
    let llm = MockLlm::new(vec![Ok("SELECT 1".to_string())]);

    let mut orchestrator = Orchestrator::new(Box::new(llm));
    orchestrator.attach_database(Box::new(MockDatabase {
        execution: Err(AssistantError::Connection("connection reset".to_string())),
    }));

    let reply = orchestrator.take_turn("List all freelancers").await.unwrap();

    assert_eq!(reply.message_type(), MessageType::Error);
    assert!(reply.text.contains("connection reset"));
    assert_eq!(orchestrator.conversation().len(), 3);
}

#[tokio::test]
async fn it_grows_history_by_two_per_completed_turn() {
    let llm = MockLlm::new(vec![
        Ok("SELECT 1".to_string()),
        Ok("One.".to_string()),
        Ok("SELECT 2".to_string()),
        Ok("Two.".to_string()),
        Ok("SELECT 3".to_string()),
        Ok("Three.".to_string()),
    ]);

    let mut orchestrator = Orchestrator::new(Box::new(llm));
    orchestrator.attach_database(Box::new(MockDatabase {
        execution: Ok("ok".to_string()),
    }));

    for question in ["first", "second", "third"] {
        orchestrator.take_turn(question).await.unwrap();
    }

    let messages = orchestrator.conversation().messages();
    assert_eq!(messages.len(), 1 + 2 * 3);
    for pair in messages[1..].chunks(2) {
        assert_eq!(pair[0].author, Author::Human);
        assert_eq!(pair[1].author, Author::Assistant);
    }
}
