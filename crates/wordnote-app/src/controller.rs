use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use wordnote_types::AppEvent;

use crate::events::event_loop;
use crate::io::watcher_io;
use crate::state::AppState;
use crate::ui::ui_loop;

/// Centralized channel management
pub struct ChannelSet {
    pub app_to_ui: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
    pub ui_to_app: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
}

impl ChannelSet {
    pub fn new(capacity: usize) -> Self {
        Self {
            app_to_ui: kanal::bounded_async(capacity),
            ui_to_app: kanal::bounded_async(capacity),
        }
    }
}

/// Application controller for task spawning and lifecycle
pub struct AppController {
    channels: ChannelSet,
    state: Arc<AppState>,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new(state: Arc<AppState>, capacity: usize) -> Self {
        Self {
            channels: ChannelSet::new(capacity.max(1)),
            state,
            cancel_token: CancellationToken::new(),
        }
    }

    pub fn spawn_tasks(&self) -> JoinSet<anyhow::Result<()>> {
        let mut tasks = JoinSet::new();

        // Event loop
        tasks.spawn(event_loop(
            self.state.clone(),
            self.channels.ui_to_app.1.clone(),
            self.channels.app_to_ui.0.clone(),
        ));

        // UI loop
        tasks.spawn(ui_loop(
            self.channels.app_to_ui.1.clone(),
            self.state.config.clone(),
        ));

        // Stdin watcher
        tasks.spawn(watcher_io(
            self.cancel_token.child_token(),
            self.channels.ui_to_app.0.clone(),
        ));

        // Store updates
        tasks.spawn(store_relay(
            self.state.clone(),
            self.cancel_token.child_token(),
            self.channels.ui_to_app.0.clone(),
        ));

        tasks
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}

/// Forward store change notifications into the event loop
pub async fn store_relay(
    state: Arc<AppState>,
    cancel: CancellationToken,
    event_tx: AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let mut updates = state.calendar.subscribe();

    loop {
        let update = tokio::select! {
            update = updates.recv() => update,
            _ = cancel.cancelled() => return Ok(()),
        };

        match update {
            Ok(event) => {
                tracing::debug!("Store {:?} on {}", event.change, event.date_key);
                event_tx.send(AppEvent::VocabUpdated(event.date_key)).await?;
            }
            Err(RecvError::Lagged(missed)) => {
                tracing::warn!("Store relay lagged, {missed} updates dropped");
            }
            Err(RecvError::Closed) => return Ok(()),
        }
    }
}
