use super::Config;
use super::ConfigKey;

#[test]
fn it_returns_defaults_for_known_keys() {
    assert_eq!(Config::default(ConfigKey::DbPort), "3306");
    assert_eq!(Config::default(ConfigKey::Model), "mixtral-8x7b-32768");
    assert_eq!(Config::default(ConfigKey::SmtpSecurity), "starttls");
    assert_eq!(Config::default(ConfigKey::GroqURL), "https://api.groq.com/openai");
}

#[test]
fn it_round_trips_set_and_get() {
    Config::set(ConfigKey::Model, "llama-3.1-70b-versatile");
    assert_eq!(Config::get(ConfigKey::Model), "llama-3.1-70b-versatile");
}

#[test]
fn it_serializes_keys_as_kebab_case() {
    assert_eq!(ConfigKey::DbDatabase.to_string(), "db-database");
    assert_eq!(ConfigKey::StatementAllowlist.to_string(), "statement-allowlist");
    assert_eq!(ConfigKey::GroqURL.to_string(), "groq-url");
}
