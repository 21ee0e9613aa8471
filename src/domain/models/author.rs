use serde_derive::Deserialize;
use serde_derive::Serialize;

use crate::configuration::Config;
use crate::configuration::ConfigKey;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Author {
    Human,
    Assistant,
}

impl ToString for Author {
    fn to_string(&self) -> String {
        match self {
            Author::Human => {
                let username = Config::get(ConfigKey::Username);
                if username.is_empty() {
                    return String::from("Human");
                }
                return username;
            }
            Author::Assistant => return String::from("Assistant"),
        }
    }
}

impl Author {
    /// Fixed role name used when serializing conversation history in to
    /// prompts, independent of the configured display name.
    pub fn role(&self) -> &'static str {
        match self {
            Author::Human => return "Human",
            Author::Assistant => return "Assistant",
        }
    }
}
