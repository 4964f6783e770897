use kanal::AsyncSender;
use wordnote_core::{DateKey, EntryPatch};
use wordnote_store::UpdateOutcome;
use wordnote_types::{AppEvent, DisplayEntry, MonthCell};

use crate::profile;
use crate::state::AppState;

pub async fn handle_day_request(
    state: &AppState,
    date_key: DateKey,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    *state.current_day.write().await = Some(date_key);

    let event = match state.calendar.day(date_key).await {
        Ok(view) => AppEvent::ShowDay {
            date_key,
            entries: view.entries.iter().map(DisplayEntry::from).collect(),
        },
        Err(e) => {
            tracing::error!("Loading {date_key} failed: {e}");
            AppEvent::StatusUpdate(format!("Could not load {date_key}: {e}"))
        }
    };
    app_to_ui_tx.send(event).await?;
    Ok(())
}

pub async fn handle_month_request(
    state: &AppState,
    year: i32,
    month: u32,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let event = match state.calendar.month(year, month).await {
        Ok(view) => AppEvent::ShowMonth {
            label: view.month.to_string(),
            days: view
                .grid()
                .into_iter()
                .map(|(date_key, count)| MonthCell { date_key, count })
                .collect(),
        },
        Err(e) => AppEvent::StatusUpdate(format!("Could not load {year}-{month:02}: {e}")),
    };
    app_to_ui_tx.send(event).await?;
    Ok(())
}

pub async fn handle_update(
    state: &AppState,
    id: &str,
    date_key: DateKey,
    patch: EntryPatch,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    if patch.is_empty() {
        app_to_ui_tx
            .send(AppEvent::StatusUpdate("Nothing to change".to_string()))
            .await?;
        return Ok(());
    }

    let message = match state.calendar.update(id, date_key, &patch).await {
        Ok(outcome) => describe_update(&outcome, id, date_key),
        Err(e) => format!("Update failed: {e}"),
    };
    app_to_ui_tx.send(AppEvent::StatusUpdate(message)).await?;
    Ok(())
}

/// One status line per edit result
pub fn describe_update(outcome: &UpdateOutcome, id: &str, date_key: DateKey) -> String {
    match outcome {
        UpdateOutcome::Updated { entry, .. } => {
            format!("Updated entry on {date_key}, new id {}", entry.id)
        }
        UpdateOutcome::NotFound => format!("No entry {id} on {date_key}"),
        UpdateOutcome::Invalid => "Not changed: the edit is not a valid translation".to_string(),
        UpdateOutcome::DuplicatePair => {
            "Not changed: that pair is already in your vocabulary".to_string()
        }
        UpdateOutcome::SourceTaken => {
            format!("Not changed: {date_key} already has an entry with that source")
        }
    }
}

pub async fn handle_remove(
    state: &AppState,
    id: &str,
    date_key: DateKey,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let message = match state.calendar.remove(id, date_key).await {
        Ok(true) => format!("Removed entry from {date_key}"),
        Ok(false) => format!("No entry {id} on {date_key}"),
        Err(e) => format!("Remove failed: {e}"),
    };
    app_to_ui_tx.send(AppEvent::StatusUpdate(message)).await?;
    Ok(())
}

/// Cycle the hide mode and persist it into the active profile
pub async fn handle_hide_toggle(
    state: &AppState,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let mode = {
        let mut config = state.config.write().await;
        config.ui.hide_mode = config.ui.hide_mode.next();
        config.ui.hide_mode
    };

    // Re-read from disk so env overrides never land in the profile file
    match profile::load_user_profile(&state.profile_root, &state.profile) {
        Ok(mut stored) => {
            stored.ui.hide_mode = mode;
            if let Err(e) = profile::save_user_profile(&state.profile_root, &state.profile, &stored)
            {
                tracing::warn!("Could not persist hide mode: {e}");
            }
        }
        Err(e) => tracing::warn!("Could not persist hide mode: {e}"),
    }

    app_to_ui_tx
        .send(AppEvent::HideModeChanged(mode.label().to_string()))
        .await?;
    Ok(())
}

/// Re-send the day view when the shown day changed underneath
pub async fn handle_vocab_updated(
    state: &AppState,
    date_key: DateKey,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let current = *state.current_day.read().await;
    if current == Some(date_key) {
        handle_day_request(state, date_key, app_to_ui_tx).await?;
    } else {
        tracing::debug!("Vocabulary for {date_key} changed, not on screen");
    }
    Ok(())
}
