use crate::{ChatWidget, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: ChatWidget, msg: Msg) -> (ChatWidget, Vec<Effect>) {
    let effects = match msg {
        Msg::InputChanged(text) => {
            state.set_input(text);
            Vec::new()
        }
        // The field inserts the line break itself.
        Msg::EnterPressed { shift: true } => Vec::new(),
        Msg::EnterPressed { shift: false } | Msg::SendClicked => state.submit_user_message(),
        Msg::ReplyReceived { request_id, reply } => state.apply_reply(request_id, &reply),
        Msg::ReplyFailed { request_id, .. } => state.apply_failure(request_id),
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
