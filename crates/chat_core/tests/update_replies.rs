use chat_core::{
    update, ChatWidget, Effect, Msg, Role, WidgetConfig, APOLOGY_TEXT, SCROLL_DURATION,
};

fn submitted(config: WidgetConfig, input: &str) -> ChatWidget {
    let (state, _) = update(ChatWidget::new(config), Msg::InputChanged(input.to_string()));
    let (mut state, _) = update(state, Msg::SendClicked);
    state.consume_dirty();
    state
}

#[test]
fn reply_replaces_placeholder_with_formatted_message() {
    let state = submitted(WidgetConfig::default(), "hello");

    let (mut state, effects) = update(
        state,
        Msg::ReplyReceived {
            request_id: 1,
            reply: "Hi **there**!\n2. second item".to_string(),
        },
    );

    assert_eq!(
        effects,
        vec![Effect::ScrollToBottom {
            duration: SCROLL_DURATION
        }]
    );
    let messages = state.transcript().messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].role, Role::User);
    assert_eq!(messages[1].role, Role::Bot);
    assert!(!messages[1].is_placeholder);
    assert_eq!(
        messages[1].html,
        "Hi <strong>there</strong>!<br><br>• second item"
    );
    assert_eq!(state.transcript().placeholder(), None);
    assert!(!state.is_awaiting_reply());
    assert!(state.view().input_enabled);
    assert!(state.consume_dirty());
}

#[test]
fn failure_removes_placeholder_and_apologises() {
    let state = submitted(WidgetConfig::default(), "hello");

    let (state, effects) = update(
        state,
        Msg::ReplyFailed {
            request_id: 1,
            error: "connection refused".to_string(),
        },
    );

    assert_eq!(effects.len(), 1);
    let messages = state.transcript().messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[1].text, APOLOGY_TEXT);
    assert!(!messages[1].is_placeholder);
    assert!(!messages[1].markup.contains("connection refused"));
    assert!(messages.iter().all(|msg| !msg.is_placeholder));
    assert!(!state.is_awaiting_reply());
}

#[test]
fn failure_without_placeholder_still_apologises() {
    let mut state = ChatWidget::default();
    state.render_message(Role::User, "hi", false);

    let (state, _effects) = update(
        state,
        Msg::ReplyFailed {
            request_id: 9,
            error: "timeout".to_string(),
        },
    );

    let texts: Vec<_> = state
        .transcript()
        .messages()
        .iter()
        .map(|msg| msg.text.as_str())
        .collect();
    assert_eq!(texts, vec!["hi", APOLOGY_TEXT]);
}

#[test]
fn overlapping_replies_apply_in_arrival_order() {
    let config = WidgetConfig {
        single_flight: false,
        ..WidgetConfig::default()
    };
    let state = submitted(config, "first");
    let (state, _) = update(state, Msg::InputChanged("second".to_string()));
    let (state, _) = update(state, Msg::SendClicked);

    let (state, _) = update(
        state,
        Msg::ReplyReceived {
            request_id: 2,
            reply: "answer two".to_string(),
        },
    );
    assert_eq!(state.pending_requests(), &[1]);
    assert_eq!(state.transcript().placeholder(), None);

    let (state, _) = update(
        state,
        Msg::ReplyReceived {
            request_id: 1,
            reply: "answer one".to_string(),
        },
    );
    let texts: Vec<_> = state
        .transcript()
        .messages()
        .iter()
        .map(|msg| msg.text.as_str())
        .collect();
    assert_eq!(texts, vec!["first", "second", "answer two", "answer one"]);
    assert!(!state.is_awaiting_reply());
}

#[test]
fn render_message_keeps_at_most_one_placeholder() {
    let mut state = ChatWidget::default();
    state.render_message(Role::Bot, "thinking one", true);
    state.render_message(Role::Bot, "thinking two", true);

    let messages = state.transcript().messages();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].text, "thinking two");
    assert_eq!(state.transcript().placeholder(), Some(messages[0].id));

    state.render_message(Role::User, "hi", false);
    assert_eq!(state.transcript().len(), 1);
    assert_eq!(state.transcript().placeholder(), None);
}

#[test]
fn bot_wrapper_uses_configured_icon() {
    let mut state = ChatWidget::new(WidgetConfig {
        bot_icon_url: "/img/bot.svg".to_string(),
        ..WidgetConfig::default()
    });
    state.render_message(Role::Bot, "hi", false);

    let markup = &state.view().messages[0].markup;
    assert!(markup.contains(r#"<img src="/img/bot.svg" class="chat-icon">"#));
}
