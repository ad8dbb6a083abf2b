//! Process-wide shutdown token.

use std::sync::Arc;

use tokio::sync::watch;

/// Cloneable cancellation token shared by the refresh task and the HTTP layer.
///
/// Once triggered it stays triggered.
#[derive(Clone, Debug)]
pub struct ShutdownToken {
    sender: Arc<watch::Sender<bool>>,
    receiver: watch::Receiver<bool>,
}

impl ShutdownToken {
    pub fn new() -> Self {
        let (sender, receiver) = watch::channel(false);
        Self {
            sender: Arc::new(sender),
            receiver,
        }
    }

    /// Enter shutdown mode. Returns true only for the call that flipped the flag.
    pub fn trigger(&self) -> bool {
        self.sender.send_if_modified(|triggered| {
            if *triggered {
                false
            } else {
                *triggered = true;
                true
            }
        })
    }

    pub fn is_triggered(&self) -> bool {
        *self.receiver.borrow()
    }

    /// Resolves once the token has been triggered.
    pub async fn cancelled(&self) {
        let mut receiver = self.receiver.clone();
        // Errors only once the sender is dropped.
        let _ = receiver.wait_for(|triggered| *triggered).await;
    }
}

impl Default for ShutdownToken {
    fn default() -> Self {
        Self::new()
    }
}
