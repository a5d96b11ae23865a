use desk_core::toast::Toast;
use futures::{Stream, StreamExt};
use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;
use uuid::Uuid;

const CHANNEL_CAPACITY: usize = 64;

/// A toast addressed to one user.
#[derive(Debug, Clone)]
pub struct Notification {
    pub recipient: Uuid,
    pub toast: Toast,
}

/// Publish/subscribe channel carrying toasts from action handlers to the
/// browsers of the users they concern.
#[derive(Clone)]
pub struct Notifier {
    tx: broadcast::Sender<Notification>,
}

impl Notifier {
    pub fn new() -> Self {
        let (tx, _rx) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }

    /// Publishes a toast. Having no subscribers is not an error: the user
    /// simply has no page open to show it on.
    pub fn notify(&self, recipient: Uuid, toast: Toast) {
        tracing::trace!(
            recipient = recipient.to_string(),
            variant = toast.variant().as_str(),
            "publishing toast"
        );
        let _ = self.tx.send(Notification { recipient, toast });
    }

    pub fn success(&self, recipient: Uuid, message: impl Into<String>) {
        self.notify(recipient, Toast::success(message))
    }

    pub fn error(&self, recipient: Uuid, message: impl Into<String>) {
        self.notify(recipient, Toast::error(message))
    }

    /// Toasts published for `recipient` from now on. Lagged receivers skip
    /// the toasts they missed.
    pub fn subscribe(&self, recipient: Uuid) -> impl Stream<Item = Toast> {
        BroadcastStream::new(self.tx.subscribe()).filter_map(move |result| async move {
            match result {
                Ok(notification) if notification.recipient == recipient => {
                    Some(notification.toast)
                }
                Ok(_) => None,
                Err(e) => {
                    tracing::debug!("toast subscriber lagged: {}", e);
                    None
                }
            }
        })
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}
