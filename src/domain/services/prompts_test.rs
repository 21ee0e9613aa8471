use super::answer_synthesis;
use super::sql_generation;

#[test]
fn it_embeds_schema_and_question_in_the_sql_prompt() {
    let prompt = sql_generation(
        "Table `freelancers`: name, skills, email",
        "List all freelancers with Python skills",
    );

    assert!(prompt.contains("<SCHEMA>Table `freelancers`: name, skills, email</SCHEMA>"));
    assert!(prompt.contains("Question: List all freelancers with Python skills"));
    assert!(prompt.contains("Write only the SQL query and nothing else."));
    assert!(prompt.trim_end().ends_with("SQL Query:"));
}

#[test]
fn it_embeds_the_full_turn_context_in_the_answer_prompt() {
    let prompt = answer_synthesis(
        "Table `freelancers`: name, skills, email",
        "Assistant: Hello!\nHuman: Who knows Python?",
        "SELECT name FROM freelancers WHERE skills LIKE '%Python%'",
        "name\nJohn Doe",
        "Who knows Python?",
    );

    assert!(prompt.contains("<SCHEMA>Table `freelancers`: name, skills, email</SCHEMA>"));
    assert!(prompt.contains("Conversation History: Assistant: Hello!\nHuman: Who knows Python?"));
    assert!(prompt.contains("<SQL>SELECT name FROM freelancers WHERE skills LIKE '%Python%'</SQL>"));
    assert!(prompt.contains("User question: Who knows Python?"));
    assert!(prompt.contains("SQL Response: name\nJohn Doe"));
}

#[test]
fn it_threads_error_text_through_the_answer_prompt() {
    let prompt = answer_synthesis(
        "schema",
        "history",
        "SELECT nope FROM freelancers",
        "SQL execution failed: Unknown column 'nope' in 'field list'",
        "Who knows Python?",
    );

    assert!(prompt.contains("SQL Response: SQL execution failed"));
}
