use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use chat_logging::{chat_debug, chat_info, chat_warn};
use thiserror::Error;

use crate::client::{ChatClient, ClientSettings, ReqwestChatClient};
use crate::{ChatError, EngineEvent, FailureKind, RequestId};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("chat client: {0}")]
    Client(#[from] ChatError),
    #[error("async runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

enum EngineCommand {
    Send { request_id: RequestId, message: String },
    Shutdown,
}

/// Runs chat requests on a background tokio runtime.
///
/// Commands go in through [`EngineHandle::enqueue`]; completions come back
/// as [`EngineEvent`]s in arrival order, one per request.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
    worker: Option<thread::JoinHandle<()>>,
}

impl EngineHandle {
    pub fn new(settings: &ClientSettings) -> Result<Self, EngineError> {
        let client = ReqwestChatClient::new(settings)?;
        chat_info!("Chat endpoint {}", client.endpoint());
        Self::with_client(Arc::new(client))
    }

    pub fn with_client(client: Arc<dyn ChatClient>) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()?;

        let worker = thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let EngineCommand::Send {
                    request_id,
                    message,
                } = command
                else {
                    break;
                };
                let client = Arc::clone(&client);
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_send(client.as_ref(), request_id, message, event_tx).await;
                });
            }
            chat_debug!("Engine command loop stopped");
        });

        Ok(Self {
            cmd_tx,
            event_rx,
            worker: Some(worker),
        })
    }

    pub fn enqueue(&self, request_id: RequestId, message: impl Into<String>) -> Result<(), ChatError> {
        self.cmd_tx
            .send(EngineCommand::Send {
                request_id,
                message: message.into(),
            })
            .map_err(|_| ChatError::new(FailureKind::EngineStopped, "engine thread is gone"))
    }

    /// Stops the command loop and cancels requests still in flight. Later
    /// enqueues fail with [`FailureKind::EngineStopped`].
    pub fn shutdown(&mut self) {
        let Some(worker) = self.worker.take() else {
            return;
        };
        let _ = self.cmd_tx.send(EngineCommand::Shutdown);
        if worker.join().is_err() {
            chat_warn!("Engine worker panicked");
        }
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn handle_send(
    client: &dyn ChatClient,
    request_id: RequestId,
    message: String,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let result = client.send(&message).await;
    let _ = event_tx.send(EngineEvent::ReplyCompleted { request_id, result });
}
