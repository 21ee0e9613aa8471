use async_trait::async_trait;

use super::AssistantError;

pub type DatabaseBox = Box<dyn Database + Send + Sync>;

/// Descriptor for a MySQL connection, collected from the CLI.
#[derive(Clone, Debug)]
pub struct ConnectionParams {
    pub user: String,
    pub password: String,
    pub host: String,
    pub port: u16,
    pub database: String,
}

impl ConnectionParams {
    pub fn url(&self) -> String {
        return format!(
            "mysql://{user}:{password}@{host}:{port}/{database}",
            user = self.user,
            password = self.password,
            host = self.host,
            port = self.port,
            database = self.database,
        );
    }
}

/// A live database handle. Statements run verbatim with whatever privileges
/// the connected credentials hold; there is no sandboxing by default.
#[async_trait]
pub trait Database {
    /// Returns a textual enumeration of tables and columns, recomputed from
    /// the live database on every call.
    async fn describe(&self) -> Result<String, AssistantError>;

    /// Executes one statement and returns its textual result. Row-returning
    /// statements render as a table, others as an affected-row count.
    async fn execute(&self, sql: &str) -> Result<String, AssistantError>;
}
