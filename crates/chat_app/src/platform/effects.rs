use std::time::Duration;

use chat_core::{Effect, Msg, RequestId};
use chat_engine::{ChatError, EngineEvent, EngineHandle};
use chat_logging::{chat_info, chat_warn};

/// What the UI has to do after a batch of effects ran.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct EffectOutcome {
    /// Messages to feed straight back into `update`.
    pub follow_up: Vec<Msg>,
    /// Scroll the chat box to the bottom over this duration.
    pub scroll: Option<Duration>,
}

pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle) -> Self {
        Self { engine }
    }

    pub fn run(&self, effects: Vec<Effect>) -> EffectOutcome {
        let mut outcome = EffectOutcome::default();
        for effect in effects {
            match effect {
                Effect::PostChat {
                    request_id,
                    message,
                } => {
                    chat_info!(
                        "PostChat request_id={} message_len={}",
                        request_id,
                        message.len()
                    );
                    if let Err(err) = self.engine.enqueue(request_id, message) {
                        outcome.follow_up.push(failure_msg(request_id, &err));
                    }
                }
                Effect::ScrollToBottom { duration } => {
                    outcome.scroll = Some(duration);
                }
            }
        }
        outcome
    }

    /// Stops the engine. Requests still in flight are dropped.
    pub fn shutdown(&mut self) {
        self.engine.shutdown();
        chat_info!("Chat engine stopped");
    }

    /// Drains finished requests into widget messages.
    pub fn poll_events(&self) -> Vec<Msg> {
        let mut msgs = Vec::new();
        while let Some(event) = self.engine.try_recv() {
            msgs.push(event_to_msg(event));
        }
        msgs
    }
}

fn event_to_msg(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::ReplyCompleted {
            request_id,
            result: Ok(reply),
        } => {
            chat_info!(
                "Reply request_id={} reply_len={}",
                request_id,
                reply.len()
            );
            Msg::ReplyReceived { request_id, reply }
        }
        EngineEvent::ReplyCompleted {
            request_id,
            result: Err(err),
        } => failure_msg(request_id, &err),
    }
}

fn failure_msg(request_id: RequestId, err: &ChatError) -> Msg {
    chat_warn!("Chat request {} failed: {}", request_id, err);
    Msg::ReplyFailed {
        request_id,
        error: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use chat_core::{Effect, Msg, SCROLL_DURATION};
    use chat_engine::{ChatClient, ChatError, EngineHandle, FailureKind};

    use super::EffectRunner;

    struct FixedReply;

    #[async_trait::async_trait]
    impl ChatClient for FixedReply {
        async fn send(&self, message: &str) -> Result<String, ChatError> {
            Ok(format!("re: {message}"))
        }
    }

    struct Unavailable;

    #[async_trait::async_trait]
    impl ChatClient for Unavailable {
        async fn send(&self, _message: &str) -> Result<String, ChatError> {
            Err(ChatError {
                kind: FailureKind::HttpStatus(503),
                message: "service unavailable".to_string(),
            })
        }
    }

    fn runner() -> EffectRunner {
        EffectRunner::new(EngineHandle::with_client(Arc::new(FixedReply)).unwrap())
    }

    fn post(request_id: u64, message: &str) -> Vec<Effect> {
        vec![Effect::PostChat {
            request_id,
            message: message.to_string(),
        }]
    }

    fn poll_until_some(runner: &EffectRunner) -> Vec<Msg> {
        for _ in 0..200 {
            let msgs = runner.poll_events();
            if !msgs.is_empty() {
                return msgs;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        panic!("no engine events");
    }

    #[test]
    fn scroll_effect_is_reported_to_ui() {
        let outcome = runner().run(vec![Effect::ScrollToBottom {
            duration: SCROLL_DURATION,
        }]);
        assert_eq!(outcome.scroll, Some(SCROLL_DURATION));
        assert!(outcome.follow_up.is_empty());
    }

    #[test]
    fn post_chat_reply_comes_back_as_msg() {
        let runner = runner();
        let outcome = runner.run(vec![Effect::PostChat {
            request_id: 3,
            message: "hello".to_string(),
        }]);
        assert!(outcome.follow_up.is_empty());
        assert_eq!(outcome.scroll, None);

        assert_eq!(
            poll_until_some(&runner),
            vec![Msg::ReplyReceived {
                request_id: 3,
                reply: "re: hello".to_string(),
            }]
        );
    }

    #[test]
    fn failed_reply_comes_back_as_failure_for_same_request() {
        let runner = EffectRunner::new(EngineHandle::with_client(Arc::new(Unavailable)).unwrap());
        let outcome = runner.run(post(9, "hello"));
        assert!(outcome.follow_up.is_empty());

        let msgs = poll_until_some(&runner);
        assert_eq!(msgs.len(), 1);
        match &msgs[0] {
            Msg::ReplyFailed { request_id, error } => {
                assert_eq!(*request_id, 9);
                assert!(error.contains("503"), "error was {error:?}");
            }
            other => panic!("expected ReplyFailed, got {other:?}"),
        }
    }

    #[test]
    fn enqueue_on_stopped_engine_fails_immediately() {
        let mut runner = runner();
        runner.shutdown();

        let outcome = runner.run(post(4, "hello"));
        match outcome.follow_up.as_slice() {
            [Msg::ReplyFailed { request_id, error }] => {
                assert_eq!(*request_id, 4);
                assert!(error.contains("engine"), "error was {error:?}");
            }
            other => panic!("expected one ReplyFailed, got {other:?}"),
        }
        assert!(runner.poll_events().is_empty());
    }

    #[test]
    fn failure_follow_up_turns_placeholder_into_apology() {
        use chat_core::{update, ChatWidget, APOLOGY_TEXT};

        let mut runner = runner();
        runner.shutdown();
        let (widget, _) = update(ChatWidget::default(), Msg::InputChanged("hello".to_string()));
        let (mut widget, effects) = update(widget, Msg::SendClicked);

        for msg in runner.run(effects).follow_up {
            widget = update(widget, msg).0;
        }

        assert_eq!(widget.transcript().placeholder(), None);
        assert!(!widget.is_awaiting_reply());
        let last = widget.transcript().messages().last().map(|msg| msg.text.clone());
        assert_eq!(last.as_deref(), Some(APOLOGY_TEXT));
    }
}
