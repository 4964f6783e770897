use kanal::AsyncSender;
use wordnote_core::DateKey;
use wordnote_types::AppEvent;

use crate::capture::{SaveStatus, capture};
use crate::state::AppState;

pub async fn handle_text_input(
    state: &AppState,
    text: String,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let Some(captured) = capture(state, &text, DateKey::today()).await else {
        return Ok(());
    };

    let (from_lang, to_lang) = {
        let config = state.config.read().await;
        (
            config.translator.from_lang.clone(),
            config.translator.to_lang.clone(),
        )
    };

    // Show first, the save result is secondary
    app_to_ui_tx
        .send(AppEvent::ShowTranslation {
            source: captured.source.clone(),
            text: captured.text,
            from_lang,
            to_lang,
            provider: captured.provider,
        })
        .await?;

    if let SaveStatus::Failed(reason) = captured.save {
        app_to_ui_tx
            .send(AppEvent::SaveFailed {
                source: captured.source,
                reason,
            })
            .await?;
    }

    Ok(())
}
