#[cfg(test)]
#[path = "mysql_test.rs"]
mod tests;

use async_trait::async_trait;
use chrono::DateTime;
use chrono::NaiveDate;
use chrono::NaiveDateTime;
use chrono::NaiveTime;
use chrono::Utc;
use sqlx::mysql::MySqlPool;
use sqlx::mysql::MySqlPoolOptions;
use sqlx::mysql::MySqlRow;
use sqlx::Column;
use sqlx::Row;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::AssistantError;
use crate::domain::models::ConnectionParams;
use crate::domain::models::Database;

/// Leading keyword of a statement, lowercased.
fn statement_verb(sql: &str) -> String {
    return sql
        .trim()
        .split_whitespace()
        .next()
        .unwrap_or("")
        .to_lowercase();
}

/// Statements whose results come back as rows rather than an affected count.
fn returns_rows(sql: &str) -> bool {
    return matches!(
        statement_verb(sql).as_str(),
        "select" | "show" | "describe" | "desc" | "explain" | "with"
    );
}

/// An empty allowlist permits everything; this preserves the unrestricted
/// CRUD behavior unless the operator opts in to a restriction.
fn allowlist_permits(allowlist: &str, sql: &str) -> bool {
    if allowlist.trim().is_empty() {
        return true;
    }

    let verb = statement_verb(sql);
    return allowlist
        .split(',')
        .any(|entry| return entry.trim().to_lowercase() == verb);
}

fn map_connect_err(err: sqlx::Error) -> AssistantError {
    return AssistantError::Connection(err.to_string());
}

fn map_execute_err(err: sqlx::Error) -> AssistantError {
    match err {
        sqlx::Error::Database(db_err) => {
            return AssistantError::Execution(db_err.message().to_string())
        }
        err @ (sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed) => {
            return AssistantError::Connection(err.to_string())
        }
        err => return AssistantError::Execution(err.to_string()),
    }
}

fn render_cell(row: &MySqlRow, index: usize) -> String {
    if let Ok(val) = row.try_get::<Option<String>, usize>(index) {
        return val.unwrap_or_else(|| return "NULL".to_string());
    }
    if let Ok(val) = row.try_get::<Option<i64>, usize>(index) {
        return val.map_or_else(|| return "NULL".to_string(), |v| return v.to_string());
    }
    if let Ok(val) = row.try_get::<Option<u64>, usize>(index) {
        return val.map_or_else(|| return "NULL".to_string(), |v| return v.to_string());
    }
    if let Ok(val) = row.try_get::<Option<f64>, usize>(index) {
        return val.map_or_else(|| return "NULL".to_string(), |v| return v.to_string());
    }
    if let Ok(val) = row.try_get::<Option<bool>, usize>(index) {
        return val.map_or_else(|| return "NULL".to_string(), |v| return v.to_string());
    }
    if let Ok(val) = row.try_get::<Option<NaiveDateTime>, usize>(index) {
        return val.map_or_else(|| return "NULL".to_string(), |v| return v.to_string());
    }
    if let Ok(val) = row.try_get::<Option<DateTime<Utc>>, usize>(index) {
        return val.map_or_else(|| return "NULL".to_string(), |v| return v.to_string());
    }
    if let Ok(val) = row.try_get::<Option<NaiveDate>, usize>(index) {
        return val.map_or_else(|| return "NULL".to_string(), |v| return v.to_string());
    }
    if let Ok(val) = row.try_get::<Option<NaiveTime>, usize>(index) {
        return val.map_or_else(|| return "NULL".to_string(), |v| return v.to_string());
    }
    if let Ok(val) = row.try_get::<Option<Vec<u8>>, usize>(index) {
        return val.map_or_else(
            || return "NULL".to_string(),
            |v| return String::from_utf8_lossy(&v).to_string(),
        );
    }

    return "<unsupported>".to_string();
}

fn render_rows(rows: &[MySqlRow]) -> String {
    if rows.is_empty() {
        return "0 rows returned.".to_string();
    }

    let headers = rows[0]
        .columns()
        .iter()
        .map(|col| return col.name().to_string())
        .collect::<Vec<String>>();

    let mut lines = vec![headers.join(" | ")];
    for row in rows {
        let cells = (0..row.columns().len())
            .map(|index| return render_cell(row, index))
            .collect::<Vec<String>>();
        lines.push(cells.join(" | "));
    }
    lines.push(format!("{count} row(s) returned.", count = rows.len()));

    return lines.join("\n");
}

pub struct MysqlDatabase {
    pool: MySqlPool,
}

impl MysqlDatabase {
    pub async fn connect(params: &ConnectionParams) -> Result<MysqlDatabase, AssistantError> {
        let pool = MySqlPoolOptions::new()
            .max_connections(1)
            .connect(&params.url())
            .await
            .map_err(map_connect_err)?;

        tracing::info!(
            host = %params.host,
            database = %params.database,
            "Connected to database"
        );

        return Ok(MysqlDatabase { pool });
    }
}

#[async_trait]
impl Database for MysqlDatabase {
    #[allow(clippy::implicit_return)]
    async fn describe(&self) -> Result<String, AssistantError> {
        let rows = sqlx::query(
            r#"
            SELECT table_name AS tbl, column_name AS col, column_type AS ctype
            FROM information_schema.columns
            WHERE table_schema = DATABASE()
            ORDER BY table_name, ordinal_position
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_connect_err)?;

        let mut description: Vec<String> = vec![];
        let mut current_table = String::new();
        for row in &rows {
            let table: String = row.try_get("tbl").map_err(map_connect_err)?;
            let column: String = row.try_get("col").map_err(map_connect_err)?;
            let ctype: String = row.try_get("ctype").map_err(map_connect_err)?;

            if table != current_table {
                if !current_table.is_empty() {
                    description.push(String::new());
                }
                description.push(format!("Table `{table}`:"));
                current_table = table;
            }
            description.push(format!("  - {column} ({ctype})"));
        }

        return Ok(description.join("\n"));
    }

    #[allow(clippy::implicit_return)]
    async fn execute(&self, sql: &str) -> Result<String, AssistantError> {
        let allowlist = Config::get(ConfigKey::StatementAllowlist);
        if !allowlist_permits(&allowlist, sql) {
            return Err(AssistantError::Execution(format!(
                "statement type `{verb}` is not permitted by the configured allowlist",
                verb = statement_verb(sql)
            )));
        }

        if returns_rows(sql) {
            let rows = sqlx::query(sql)
                .fetch_all(&self.pool)
                .await
                .map_err(map_execute_err)?;

            return Ok(render_rows(&rows));
        }

        let result = sqlx::query(sql)
            .execute(&self.pool)
            .await
            .map_err(map_execute_err)?;

        return Ok(format!(
            "{count} row(s) affected.",
            count = result.rows_affected()
        ));
    }
}
