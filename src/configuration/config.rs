#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use std::env;

use clap::ArgMatches;
use dashmap::DashMap;
use once_cell::sync::Lazy;
use strum::EnumIter;
use strum::IntoEnumIterator;

static CONFIG: Lazy<DashMap<String, String>> = Lazy::new(DashMap::new);

#[derive(Clone, Copy, Eq, PartialEq, EnumIter, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ConfigKey {
    BackendHealthCheckTimeout,
    DbDatabase,
    DbHost,
    DbPassword,
    DbPort,
    DbUser,
    GroqToken,
    GroqURL,
    Model,
    SmtpRelay,
    SmtpSecurity,
    StatementAllowlist,
    Username,
}

pub struct Config {}

impl Config {
    pub fn get(key: ConfigKey) -> String {
        if let Some(val) = CONFIG.get(&key.to_string()) {
            return val.to_string();
        }

        return "".to_string();
    }

    pub fn set(key: ConfigKey, value: &str) {
        CONFIG.insert(key.to_string(), value.to_string());
    }

    pub fn default(key: ConfigKey) -> String {
        if key == ConfigKey::Username {
            let mut user = env::var("USER").unwrap_or_else(|_| return "".to_string());
            if user.is_empty() {
                user = "User".to_string();
            }

            return user;
        }

        let res = match key {
            ConfigKey::BackendHealthCheckTimeout => "1000",
            ConfigKey::DbDatabase => "Chinook",
            ConfigKey::DbHost => "localhost",
            ConfigKey::DbPassword => "",
            ConfigKey::DbPort => "3306",
            ConfigKey::DbUser => "root",
            ConfigKey::GroqToken => "",
            ConfigKey::GroqURL => "https://api.groq.com/openai",
            ConfigKey::Model => "mixtral-8x7b-32768",
            ConfigKey::SmtpRelay => "smtp.gmail.com",
            ConfigKey::SmtpSecurity => "starttls",
            ConfigKey::StatementAllowlist => "",
            ConfigKey::Username => "",
        };

        return res.to_string();
    }

    /// Seeds every key with its default, then overlays values supplied on
    /// the command line (which clap may itself have sourced from env).
    pub fn load(matches: &ArgMatches) {
        for key in ConfigKey::iter() {
            Config::set(key, &Config::default(key));
        }

        for key in ConfigKey::iter() {
            if let Ok(Some(value)) = matches.try_get_one::<String>(&key.to_string()) {
                Config::set(key, value);
            }
        }
    }
}
