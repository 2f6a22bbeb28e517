use std::time::Duration;

use client_core::{
    auth::{AuthForm, FormField},
    directory::{create_chat, default_chat_directory, open_chat},
    exit::{is_confirmation, ExitPrompt},
    ChatSession, Key, KeyOutcome, Modifiers, SessionConfig,
};
use shared::{
    domain::{AuthMode, ChatId, MessageId, Origin, Route, Screen},
    error::FormError,
    protocol::{NavigateTo, SessionEvent},
};

#[tokio::test(start_paused = true)]
async fn login_chat_and_exit_acceptance() {
    let mut form = AuthForm::new(AuthMode::Login);
    form.set_field(FormField::Email, "user@secure.net");
    form.set_field(FormField::Password, "correct horse");
    assert_eq!(form.submit().expect("login"), NavigateTo::Path(Route::Chat));

    let mut session = ChatSession::open(SessionConfig::new("User_1234")).expect("session");
    let mut events = session.subscribe_events();

    session.set_composer_text("hello");
    assert_eq!(
        session.consume_keystroke(Key::Enter, Modifiers::NONE),
        KeyOutcome::Submitted(Some(MessageId(2)))
    );

    let before_reply = session.view();
    assert_eq!(before_reply.len(), 2);
    assert_eq!(before_reply[1].origin, Origin::Local);

    tokio::time::sleep(Duration::from_millis(1001)).await;
    let after_reply = session.view();
    assert_eq!(after_reply.len(), 3);
    assert_eq!(&after_reply[..2], &before_reply[..]);
    assert_eq!(after_reply[2].text, "Message received and encrypted.");
    assert_eq!(after_reply[2].origin, Origin::Remote);
    assert_eq!(after_reply[2].timestamp.len(), 5);

    let mut appended = Vec::new();
    while let Ok(SessionEvent::MessageAppended(message)) = events.try_recv() {
        appended.push(message);
    }
    assert_eq!(appended, after_reply[1..].to_vec());

    let prompt = ExitPrompt;
    assert_eq!(prompt.resolve(is_confirmation("n")), None);
    assert_eq!(
        prompt.resolve(is_confirmation("Yes")),
        Some(NavigateTo::Path(Route::Home))
    );
    session.close();
}

#[tokio::test(start_paused = true)]
async fn session_reopened_after_close_starts_fresh() {
    let mut first = ChatSession::open(SessionConfig::new("User_1")).expect("first");
    first.submit("left behind").expect("appended");
    first.close();

    let second = ChatSession::open(SessionConfig::new("User_1")).expect("second");
    tokio::time::sleep(Duration::from_secs(2)).await;

    let view = second.view();
    assert_eq!(view.len(), 1);
    assert_eq!(view[0].id, MessageId(1));
}

#[test]
fn chat_directory_opens_known_chats_only() {
    let directory = default_chat_directory();
    let names: Vec<_> = directory.iter().map(|chat| chat.name.as_str()).collect();
    assert_eq!(names, vec!["General", "Private"]);

    assert_eq!(
        open_chat(&directory, ChatId(2)),
        Some(NavigateTo::Screen(Screen::Chat))
    );
    assert_eq!(open_chat(&directory, ChatId(9)), None);
}

#[test]
fn created_chat_gets_next_id_and_can_be_opened() {
    let mut directory = default_chat_directory();

    let created = create_chat(&mut directory, "  Ops  ").expect("create chat");
    assert_eq!(created.chat_id, ChatId(3));
    assert_eq!(created.name, "Ops");
    assert_eq!(directory.last(), Some(&created));
    assert_eq!(
        open_chat(&directory, ChatId(3)),
        Some(NavigateTo::Screen(Screen::Chat))
    );

    let next = create_chat(&mut directory, "Night shift").expect("create chat");
    assert_eq!(next.chat_id, ChatId(4));
}

#[test]
fn blank_chat_name_is_rejected() {
    let mut directory = default_chat_directory();

    assert_eq!(
        create_chat(&mut directory, "   "),
        Err(FormError::missing("chat name"))
    );
    assert_eq!(directory.len(), 2);

    let mut empty = Vec::new();
    let first = create_chat(&mut empty, "General").expect("create chat");
    assert_eq!(first.chat_id, ChatId(1));
}
