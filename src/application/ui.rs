use std::io::Write;
use std::str::FromStr;

use anyhow::Result;
use tokio::io::AsyncBufReadExt;
use tokio::io::BufReader;
use tokio::io::Lines;
use tokio::io::Stdin;
use yansi::Paint;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Author;
use crate::domain::models::ConnectionParams;
use crate::domain::models::Envelope;
use crate::domain::models::Llm;
use crate::domain::models::Mailer;
use crate::domain::models::Message;
use crate::domain::models::MessageType;
use crate::domain::models::TransportSecurity;
use crate::domain::services::Orchestrator;
use crate::infrastructure::databases::mysql::MysqlDatabase;
use crate::infrastructure::llm::groq::Groq;
use crate::infrastructure::mail::smtp;
use crate::infrastructure::mail::smtp::SmtpMailer;

fn help_text() -> String {
    let text = r#"
COMMANDS:
- /schema (/s) - Prints the current database schema description.
- /email (/e) - Opens the email form to notify a matched freelancer or company.
- /help (/h) - Provides this help menu.
- /quit /exit (/q) - Exit MatchMaker.

Anything else is sent to the assistant as a question about your database.
    "#;

    return text.trim().to_string();
}

fn print_message(message: &Message) {
    let author = message.author.to_string();
    match message.message_type() {
        MessageType::Normal => {
            if message.author == Author::Assistant {
                println!("{}: {}", Paint::green(author), message.text);
            } else {
                println!("{}: {}", Paint::blue(author), message.text);
            }
        }
        MessageType::Error => {
            println!("{}: {}", Paint::red(author), Paint::red(&message.text));
        }
    }
}

fn print_error(text: &str) {
    eprintln!("{}", Paint::red(text));
}

/// Returns `None` once stdin is closed.
async fn read_line(lines: &mut Lines<BufReader<Stdin>>, prompt: &str) -> Result<Option<String>> {
    print!("{prompt}");
    std::io::stdout().flush()?;

    return Ok(lines
        .next_line()
        .await?
        .map(|line| return line.trim().to_string()));
}

fn connection_params() -> Result<ConnectionParams> {
    return Ok(ConnectionParams {
        user: Config::get(ConfigKey::DbUser),
        password: Config::get(ConfigKey::DbPassword),
        host: Config::get(ConfigKey::DbHost),
        port: Config::get(ConfigKey::DbPort).parse::<u16>()?,
        database: Config::get(ConfigKey::DbDatabase),
    });
}

/// Interactive envelope form. Delivery failures are reported inline and
/// never touch the conversation. Leaving the sender blank uses the
/// environment-sourced notification credentials instead.
async fn email_form(lines: &mut Lines<BufReader<Stdin>>) -> Result<()> {
    let sender = read_line(lines, "Sender email (blank to use SENDER_EMAIL): ")
        .await?
        .unwrap_or_default();
    let password = if sender.is_empty() {
        String::new()
    } else {
        read_line(lines, "Sender password: ").await?.unwrap_or_default()
    };
    let recipient = read_line(lines, "Receiver email: ").await?.unwrap_or_default();
    let subject = read_line(lines, "Subject: ").await?.unwrap_or_default();

    println!("Message (end with a single `.` on its own line):");
    let mut body_lines: Vec<String> = vec![];
    while let Some(line) = lines.next_line().await? {
        if line.trim() == "." {
            break;
        }
        body_lines.push(line);
    }
    let body = body_lines.join("\n");

    let res = if sender.is_empty() {
        smtp::notify(&recipient, &subject, &body)
    } else {
        let security = TransportSecurity::from_str(&Config::get(ConfigKey::SmtpSecurity))
            .unwrap_or(TransportSecurity::StartTls);
        let mailer = SmtpMailer::with_credentials(&sender, &password, security);
        mailer.send(&Envelope {
            sender,
            recipient: recipient.clone(),
            subject,
            body,
        })
    };

    match res {
        Ok(()) => println!("{}", Paint::green(format!("Email successfully sent to {recipient}"))),
        Err(err) => print_error(&format!("Error sending email: {err}")),
    }

    return Ok(());
}

pub async fn start() -> Result<()> {
    let backend = Groq::default();
    backend.health_check().await?;

    let mut orchestrator = Orchestrator::new(Box::new(backend));

    match MysqlDatabase::connect(&connection_params()?).await {
        Ok(database) => {
            println!("{}", Paint::green("Connected to the database!"));
            orchestrator.attach_database(Box::new(database));
        }
        Err(err) => {
            // The session stays usable for /email; chat turns no-op until a
            // connection exists.
            print_error(&format!("Connection failed: {err}"));
        }
    }

    println!("{}", Paint::new("HR MatchMaker Assistance").bold());
    println!("Type /help for commands.\n");
    for message in orchestrator.conversation().messages() {
        print_message(message);
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match read_line(&mut lines, "> ").await? {
            Some(line) => line,
            None => break,
        };

        match line.as_str() {
            "" => continue,
            "/quit" | "/exit" | "/q" => break,
            "/help" | "/h" => {
                println!("{}", help_text());
                continue;
            }
            "/schema" | "/s" => {
                match orchestrator.schema().await {
                    Ok(schema) => println!("{schema}"),
                    Err(err) => print_error(&err.to_string()),
                }
                continue;
            }
            "/email" | "/e" => {
                email_form(&mut lines).await?;
                continue;
            }
            _ => {}
        }

        match orchestrator.take_turn(&line).await {
            Some(reply) => print_message(&reply),
            None => {
                if !orchestrator.has_database() {
                    print_error("No active database connection. Restart with valid --db-* options to chat.");
                }
            }
        }
    }

    return Ok(());
}
