use anyhow::Result;
use clap::Arg;
use clap::Command;

use crate::configuration::Config;
use crate::configuration::ConfigKey;

pub fn build() -> Command {
    return Command::new("matchmaker")
        .about("Chat assistant that matches freelancers with job postings through natural-language SQL, with email notifications for matches.")
        .version(env!("CARGO_PKG_VERSION"))
        .arg_required_else_help(false)
        .arg(
            Arg::new(ConfigKey::DbUser.to_string())
                .long(ConfigKey::DbUser.to_string())
                .help(format!("Database user [default: {}]", Config::default(ConfigKey::DbUser)))
                .num_args(1),
        )
        .arg(
            Arg::new(ConfigKey::DbPassword.to_string())
                .long(ConfigKey::DbPassword.to_string())
                .env("MATCHMAKER_DB_PASSWORD")
                .help("Database password")
                .num_args(1),
        )
        .arg(
            Arg::new(ConfigKey::DbHost.to_string())
                .long(ConfigKey::DbHost.to_string())
                .help(format!("Database host [default: {}]", Config::default(ConfigKey::DbHost)))
                .num_args(1),
        )
        .arg(
            Arg::new(ConfigKey::DbPort.to_string())
                .long(ConfigKey::DbPort.to_string())
                .help(format!("Database port [default: {}]", Config::default(ConfigKey::DbPort)))
                .num_args(1),
        )
        .arg(
            Arg::new(ConfigKey::DbDatabase.to_string())
                .long(ConfigKey::DbDatabase.to_string())
                .help(format!("Database name [default: {}]", Config::default(ConfigKey::DbDatabase)))
                .num_args(1),
        )
        .arg(
            Arg::new(ConfigKey::Model.to_string())
                .long(ConfigKey::Model.to_string())
                .help(format!("Model to use for generation [default: {}]", Config::default(ConfigKey::Model)))
                .num_args(1),
        )
        .arg(
            Arg::new(ConfigKey::GroqURL.to_string())
                .long(ConfigKey::GroqURL.to_string())
                .help(format!("Groq API base URL [default: {}]", Config::default(ConfigKey::GroqURL)))
                .num_args(1),
        )
        .arg(
            Arg::new(ConfigKey::GroqToken.to_string())
                .long(ConfigKey::GroqToken.to_string())
                .env("GROQ_API_KEY")
                .help("Groq API token")
                .num_args(1),
        )
        .arg(
            Arg::new(ConfigKey::SmtpRelay.to_string())
                .long(ConfigKey::SmtpRelay.to_string())
                .help(format!("SMTP relay host [default: {}]", Config::default(ConfigKey::SmtpRelay)))
                .num_args(1),
        )
        .arg(
            Arg::new(ConfigKey::SmtpSecurity.to_string())
                .long(ConfigKey::SmtpSecurity.to_string())
                .help("SMTP session security, starttls or ssltls [default: starttls]")
                .num_args(1),
        )
        .arg(
            Arg::new(ConfigKey::StatementAllowlist.to_string())
                .long(ConfigKey::StatementAllowlist.to_string())
                .help("Comma separated statement types the assistant may run, e.g 'select,insert'. Empty permits everything.")
                .num_args(1),
        )
        .arg(
            Arg::new(ConfigKey::Username.to_string())
                .long(ConfigKey::Username.to_string())
                .help("Display name used for your side of the chat [default: $USER]")
                .num_args(1),
        );
}

pub fn parse() -> Result<()> {
    let matches = build().get_matches();
    Config::load(&matches);

    return Ok(());
}
