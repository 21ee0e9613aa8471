use super::Author;
use super::Message;
use super::MessageType;

#[test]
fn it_creates_normal_messages() {
    let msg = Message::new(Author::Human, "List all freelancers");

    assert_eq!(msg.author, Author::Human);
    assert_eq!(msg.text, "List all freelancers");
    assert_eq!(msg.message_type(), MessageType::Normal);
}

#[test]
fn it_creates_error_messages() {
    let msg = Message::new_with_type(
        Author::Assistant,
        MessageType::Error,
        "model request failed",
    );

    assert_eq!(msg.author, Author::Assistant);
    assert_eq!(msg.message_type(), MessageType::Error);
}

#[test]
fn it_replaces_tabs() {
    let msg = Message::new(Author::Human, "a\tb");

    assert_eq!(msg.text, "a  b");
}
