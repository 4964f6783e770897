use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;
use tokio_util::sync::CancellationToken;
use wordnote_config::ui::HideMode;
use wordnote_core::DateKey;
use wordnote_types::AppEvent;

use super::memory_state;
use crate::controller::store_relay;
use crate::events::handle_events;
use crate::profile;

async fn next(rx: &kanal::AsyncReceiver<AppEvent>) -> AppEvent {
    match timeout(Duration::from_secs(2), rx.recv()).await {
        Ok(Ok(event)) => event,
        Ok(Err(e)) => panic!("Channel error: {}", e),
        Err(_) => panic!("Timeout - event never arrived!"),
    }
}

#[tokio::test]
async fn text_input_shows_translation() {
    let dir = tempfile::tempdir().unwrap();
    let state = memory_state(dir.path());
    let (tx, rx) = kanal::unbounded_async::<AppEvent>();

    handle_events(&state, &tx, AppEvent::TextInput("the".to_string()))
        .await
        .unwrap();

    match next(&rx).await {
        AppEvent::ShowTranslation {
            source,
            text,
            from_lang,
            to_lang,
            ..
        } => {
            assert_eq!(source, "the");
            assert_eq!(text, "그");
            assert_eq!((from_lang.as_str(), to_lang.as_str()), ("en", "ko"));
        }
        other => panic!("Wrong event type: {other:?}"),
    }
    // Saved fine, so no SaveFailed follows
    assert!(timeout(Duration::from_millis(50), rx.recv()).await.is_err());
}

#[tokio::test]
async fn day_request_lists_entries() {
    let dir = tempfile::tempdir().unwrap();
    let state = memory_state(dir.path());
    let (tx, rx) = kanal::unbounded_async::<AppEvent>();
    let today = DateKey::today();

    handle_events(&state, &tx, AppEvent::TextInput("computer".to_string()))
        .await
        .unwrap();
    next(&rx).await;

    handle_events(&state, &tx, AppEvent::RequestDay(today))
        .await
        .unwrap();
    match next(&rx).await {
        AppEvent::ShowDay { date_key, entries } => {
            assert_eq!(date_key, today);
            assert_eq!(entries.len(), 1);
            assert_eq!(entries[0].translated_text, "컴퓨터");
        }
        other => panic!("Wrong event type: {other:?}"),
    }
    assert_eq!(*state.current_day.read().await, Some(today));
}

#[tokio::test]
async fn remove_reports_missing_entry() {
    let dir = tempfile::tempdir().unwrap();
    let state = memory_state(dir.path());
    let (tx, rx) = kanal::unbounded_async::<AppEvent>();

    let event = AppEvent::RemoveEntry {
        id: "missing".to_string(),
        date_key: DateKey::today(),
    };
    handle_events(&state, &tx, event).await.unwrap();

    match next(&rx).await {
        AppEvent::StatusUpdate(message) => assert!(message.starts_with("No entry missing")),
        other => panic!("Wrong event type: {other:?}"),
    }
}

#[tokio::test]
async fn edit_onto_a_stored_pair_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let state = memory_state(dir.path());
    let (tx, rx) = kanal::unbounded_async::<AppEvent>();
    let day = DateKey::from_ymd(2024, 6, 1).unwrap();
    state.calendar.add(day, "cat", "고양이").await.unwrap();
    state.calendar.add(day, "dog", "개").await.unwrap();
    let dog_id = state.calendar.day(day).await.unwrap().entries[1].id.clone();

    let event = AppEvent::UpdateEntry {
        id: dog_id,
        date_key: day,
        source_text: Some("CAT".to_string()),
        translated_text: Some("고양이".to_string()),
    };
    handle_events(&state, &tx, event).await.unwrap();

    match next(&rx).await {
        AppEvent::StatusUpdate(message) => assert!(message.contains("already in your vocabulary")),
        other => panic!("Wrong event type: {other:?}"),
    }
    let sources: Vec<_> = state
        .calendar
        .day(day)
        .await
        .unwrap()
        .entries
        .into_iter()
        .map(|e| e.source_text)
        .collect();
    assert_eq!(sources, vec!["cat", "dog"]);
}

#[tokio::test]
async fn invalid_month_becomes_status_message() {
    let dir = tempfile::tempdir().unwrap();
    let state = memory_state(dir.path());
    let (tx, rx) = kanal::unbounded_async::<AppEvent>();

    handle_events(&state, &tx, AppEvent::RequestMonth { year: 2024, month: 13 })
        .await
        .unwrap();
    assert!(matches!(next(&rx).await, AppEvent::StatusUpdate(_)));
}

#[tokio::test]
async fn hide_toggle_is_persisted() {
    let dir = tempfile::tempdir().unwrap();
    let state = memory_state(dir.path());
    let (tx, rx) = kanal::unbounded_async::<AppEvent>();
    profile::save_user_profile(dir.path(), "main", &wordnote_config::Config::default()).unwrap();

    handle_events(&state, &tx, AppEvent::ToggleHideMode).await.unwrap();

    assert!(matches!(next(&rx).await, AppEvent::HideModeChanged(_)));
    assert_eq!(state.config.read().await.ui.hide_mode, HideMode::Source);
    let stored = profile::load_user_profile(dir.path(), "main").unwrap();
    assert_eq!(stored.ui.hide_mode, HideMode::Source);
}

#[tokio::test]
async fn store_updates_are_relayed() {
    let dir = tempfile::tempdir().unwrap();
    let state = Arc::new(memory_state(dir.path()));
    let (tx, rx) = kanal::unbounded_async::<AppEvent>();
    let cancel = CancellationToken::new();

    let relay = tokio::spawn(store_relay(state.clone(), cancel.clone(), tx));
    // Let the relay subscribe before the first write
    tokio::task::yield_now().await;
    tokio::time::sleep(Duration::from_millis(20)).await;

    let day = DateKey::from_ymd(2024, 6, 1).unwrap();
    state.calendar.add(day, "cat", "고양이").await.unwrap();

    match next(&rx).await {
        AppEvent::VocabUpdated(date_key) => assert_eq!(date_key, day),
        other => panic!("Wrong event type: {other:?}"),
    }

    cancel.cancel();
    let result = timeout(Duration::from_secs(2), relay).await;
    assert!(matches!(result, Ok(Ok(Ok(())))));
}
