//! Notifications for the presentation layer.
//!
//! Delivery is fire-and-forget over a broadcast channel: a publisher never
//! waits on, or fails because of, a slow or absent subscriber.

use crate::model::{CartId, Order};
use tokio::sync::broadcast;
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// An item was added; the UI opens the cart drawer.
    CartOpened { cart_id: CartId, item_count: u32 },
    /// Checkout finished; the UI hands the order to its tracking view.
    OrderPlaced(Order),
}

#[derive(Debug, Clone)]
pub struct UiNotifier {
    sender: broadcast::Sender<UiEvent>,
}

impl UiNotifier {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<UiEvent> {
        self.sender.subscribe()
    }

    pub fn notify(&self, event: UiEvent) {
        if self.sender.send(event).is_err() {
            debug!("No UI subscribers; event dropped");
        }
    }
}

impl Default for UiNotifier {
    fn default() -> Self {
        Self::new(64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscribers_receive_events() {
        let notifier = UiNotifier::default();
        let mut rx = notifier.subscribe();
        notifier.notify(UiEvent::CartOpened {
            cart_id: CartId(1),
            item_count: 2,
        });
        assert_eq!(
            rx.recv().await.unwrap(),
            UiEvent::CartOpened {
                cart_id: CartId(1),
                item_count: 2
            }
        );
    }

    #[test]
    fn notify_without_subscribers_is_silent() {
        UiNotifier::new(4).notify(UiEvent::CartOpened {
            cart_id: CartId(1),
            item_count: 1,
        });
    }
}
