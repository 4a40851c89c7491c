use crate::models::SettingKey;
use tokio::sync::broadcast;

/// Typed change notifications the core publishes after each committed write.
/// Consumers subscribe instead of listening for string-named ambient events.
#[derive(Debug, Clone, PartialEq)]
pub enum ChangeEvent {
    ThemeChanged,
    BackgroundChanged,
    SettingChanged(SettingKey),
    SectionsChanged,
    PostsChanged,
    CardsChanged,
    CouponsChanged,
    UserUpdated(i64),
    MessageAppended { conversation_id: String },
}

#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<ChangeEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(256);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.tx.subscribe()
    }

    /// Publishing with no subscribers is a no-op.
    pub fn publish(&self, event: ChangeEvent) {
        let _ = self.tx.send(event);
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
