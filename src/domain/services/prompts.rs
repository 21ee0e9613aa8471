#[cfg(test)]
#[path = "prompts_test.rs"]
mod tests;

// The two fixed instruction templates for the chain. Each stage is a pure
// function over (template, structured context) -> prompt text, kept apart
// from the turn state machine so the wording can evolve on its own.

/// Bumped whenever either template changes in a way that alters model
/// behavior.
pub const PROMPT_VERSION: u32 = 1;

/// Renders the SQL generation instruction. The model is told to answer with
/// exactly one statement and nothing else; compliance is not verified here,
/// violations surface as execution errors downstream.
pub fn sql_generation(schema: &str, question: &str) -> String {
    return format!(
        r#"You are an HR Recruiter having two tables:
1. `freelancers` table with details about freelancers' skills and career information.
2. `linkedin_jobs` table with job postings and their details.

Your tasks include:
- Perform any SQL CRUD operation based on user input.
- Match freelancers with LinkedIn jobs using skills and requirements.
- Generate emails for matched freelancers and companies.

<SCHEMA>{schema}</SCHEMA>

SQL Queries Examples:
1. Retrieve data: `SELECT * FROM freelancers;`
2. Insert data: `INSERT INTO freelancers (name, skills, email) VALUES ('John Doe', 'Python, SQL', 'john@example.com');`
3. Update data: `UPDATE linkedin_jobs SET salary_range = '50k-70k' WHERE job_id = 1;`
4. Delete data: `DELETE FROM freelancers WHERE id = 10;`
5. Match freelancers: `SELECT f.name, j.title FROM freelancers f JOIN linkedin_jobs j ON f.skills LIKE CONCAT('%', j.requirements, '%');`

Write only the SQL query and nothing else. Do not wrap the SQL query in any other text, not even backticks.

Question: {question}
SQL Query:"#
    );
}

/// Renders the answer synthesis instruction from the full turn context:
/// schema, serialized history, the executed SQL and its raw result (or error
/// text), and the original question.
pub fn answer_synthesis(
    schema: &str,
    history: &str,
    sql: &str,
    result: &str,
    question: &str,
) -> String {
    return format!(
        r#"You are an HR assistant that retrieves and matches data from two tables (`freelancers` and `linkedin_jobs`) in a database. You also generate email content for matched freelancers and companies based on job matches.

<SCHEMA>{schema}</SCHEMA>
Conversation History: {history}
SQL Query: <SQL>{sql}</SQL>
User question: {question}
SQL Response: {result}"#
    );
}
