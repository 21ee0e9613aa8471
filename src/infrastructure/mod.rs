pub mod databases;
pub mod llm;
pub mod mail;
