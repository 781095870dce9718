use chat_core::{ChatWidget, Role};
use chat_engine::{FragmentRenderer, Speaker, Span};
use pretty_assertions::assert_eq;

fn render_bot(text: &str, placeholder: bool) -> chat_engine::DisplayMessage {
    let mut widget = ChatWidget::default();
    widget.render_message(Role::Bot, text, placeholder);
    let markup = widget.view().messages[0].markup.clone();
    FragmentRenderer::new().render(&markup)
}

#[test]
fn bot_reply_lines_and_bold_spans() {
    let message = render_bot("Hi **there**!\n2. second item", false);

    assert_eq!(message.speaker, Speaker::Bot);
    assert!(!message.thinking);
    assert_eq!(
        message.lines,
        vec![
            vec![
                Span {
                    text: "Hi ".to_string(),
                    bold: false
                },
                Span {
                    text: "there".to_string(),
                    bold: true
                },
                Span {
                    text: "!".to_string(),
                    bold: false
                },
            ],
            vec![],
            vec![Span {
                text: "• second item".to_string(),
                bold: false
            }],
        ]
    );
}

#[test]
fn placeholder_is_flagged_as_thinking() {
    let message = render_bot("Searching...", true);

    assert!(message.thinking);
    assert_eq!(message.plain_lines(), vec!["Searching...".to_string()]);
}

#[test]
fn user_message_keeps_typed_newlines_and_decodes_entities() {
    let mut widget = ChatWidget::default();
    widget.render_message(Role::User, "a < b\n**c**", false);
    let markup = widget.view().messages[0].markup.clone();

    let message = FragmentRenderer::new().render(&markup);

    assert_eq!(message.speaker, Speaker::User);
    assert_eq!(
        message.plain_lines(),
        vec!["a < b".to_string(), "**c**".to_string()]
    );
}

#[test]
fn bare_fragment_is_rendered_as_bot_text() {
    let message = FragmentRenderer::new().render("one<br><strong>two</strong>");

    assert_eq!(message.speaker, Speaker::Bot);
    assert_eq!(
        message.plain_lines(),
        vec!["one".to_string(), "two".to_string()]
    );
    assert!(message.lines[1][0].bold);
}
