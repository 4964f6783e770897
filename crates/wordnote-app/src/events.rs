use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use wordnote_core::EntryPatch;
use wordnote_types::{AppEvent, UiEvent};

use crate::state::AppState;

pub mod manage;
pub mod text_input;

use manage::{
    handle_day_request, handle_hide_toggle, handle_month_request, handle_remove, handle_update,
    handle_vocab_updated,
};
use text_input::handle_text_input;

/// App's main loop
pub async fn event_loop(
    state: Arc<AppState>,
    ui_to_app_rx: AsyncReceiver<AppEvent>,
    app_to_ui_tx: AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    app_to_ui_tx.send(AppEvent::BackendReady).await?;

    tracing::info!("Event loop started, waiting for events");
    loop {
        let event = ui_to_app_rx.recv().await?;

        tracing::debug!("Event received: {:?}", std::mem::discriminant(&event));
        handle_events(&state, &app_to_ui_tx, event).await?;
    }
}

pub async fn handle_events(
    state: &AppState,
    app_to_ui_tx: &AsyncSender<AppEvent>,
    event: AppEvent,
) -> anyhow::Result<()> {
    match event {
        AppEvent::TextInput(text) => {
            tracing::debug!("TextInput received: {} chars", text.chars().count());
            handle_text_input(state, text, app_to_ui_tx).await?;
        }
        AppEvent::RequestDay(date_key) => {
            handle_day_request(state, date_key, app_to_ui_tx).await?;
        }
        AppEvent::RequestMonth { year, month } => {
            handle_month_request(state, year, month, app_to_ui_tx).await?;
        }
        AppEvent::UpdateEntry {
            id,
            date_key,
            source_text,
            translated_text,
        } => {
            let patch = EntryPatch {
                source_text,
                translated_text,
            };
            handle_update(state, &id, date_key, patch, app_to_ui_tx).await?;
        }
        AppEvent::RemoveEntry { id, date_key } => {
            handle_remove(state, &id, date_key, app_to_ui_tx).await?;
        }
        AppEvent::ToggleHideMode => {
            handle_hide_toggle(state, app_to_ui_tx).await?;
        }
        AppEvent::VocabUpdated(date_key) => {
            handle_vocab_updated(state, date_key, app_to_ui_tx).await?;
        }
        AppEvent::StatusUpdate(message) => {
            // Watcher messages (bad commands) go straight to the screen
            app_to_ui_tx.send(AppEvent::StatusUpdate(message)).await?;
        }
        AppEvent::UiEvent(UiEvent::Help) => {
            app_to_ui_tx.send(AppEvent::UiEvent(UiEvent::Help)).await?;
        }
        AppEvent::UiEvent(UiEvent::Close) => {
            tracing::info!("Close requested");
            app_to_ui_tx.send(AppEvent::UiEvent(UiEvent::Close)).await?;
        }
        AppEvent::ShowTranslation { .. }
        | AppEvent::SaveFailed { .. }
        | AppEvent::ShowDay { .. }
        | AppEvent::ShowMonth { .. }
        | AppEvent::HideModeChanged(_)
        | AppEvent::BackendReady => {
            // UI-only events, ignore in backend
        }
    }

    Ok(())
}
