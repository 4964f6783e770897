use std::fs;
use std::path::PathBuf;

use anyhow::{Context, bail};
use wordnote_core::{DateKey, EntryPatch, YearMonth};
use wordnote_store::ExportFormat;
use wordnote_types::{DisplayEntry, MonthCell};

use crate::capture::{SaveStatus, capture};
use crate::events::manage::describe_update;
use crate::profile;
use crate::state::AppState;
use crate::ui::{render_day, render_month, render_translation};

fn parse_day(date: Option<&str>) -> anyhow::Result<DateKey> {
    match date {
        Some(raw) => raw
            .parse()
            .with_context(|| format!("invalid date {raw}, expected YYYY-MM-DD")),
        None => Ok(DateKey::today()),
    }
}

pub async fn translate(state: &AppState, text: &str) -> anyhow::Result<()> {
    let Some(captured) = capture(state, text, DateKey::today()).await else {
        bail!("selection must be 1 to 200 characters");
    };

    println!("{}", render_translation(&captured.source, &captured.text));
    match captured.save {
        SaveStatus::Saved => println!("(saved for today)"),
        SaveStatus::Skipped => println!("(already in your vocabulary or not worth saving)"),
        SaveStatus::Failed(reason) => println!("(not saved: {reason})"),
        SaveStatus::NotAttempted => {}
    }
    Ok(())
}

pub async fn day(state: &AppState, date: Option<&str>) -> anyhow::Result<()> {
    let date_key = parse_day(date)?;
    let view = state.calendar.day(date_key).await?;
    let entries: Vec<DisplayEntry> = view.entries.iter().map(DisplayEntry::from).collect();
    let mode = state.config.read().await.ui.hide_mode;
    println!("{}", render_day(date_key, &entries, mode));
    Ok(())
}

pub async fn month(state: &AppState, year: Option<i32>, month: Option<u32>) -> anyhow::Result<()> {
    let current = YearMonth::current();
    let year = year.unwrap_or(current.year());
    let month = month.unwrap_or(current.month());

    let view = state.calendar.month(year, month).await?;
    let days: Vec<MonthCell> = view
        .grid()
        .into_iter()
        .map(|(date_key, count)| MonthCell { date_key, count })
        .collect();
    println!("{}", render_month(&view.month.to_string(), &days));
    Ok(())
}

pub async fn edit(
    state: &AppState,
    id: &str,
    date: &str,
    source: Option<String>,
    translation: Option<String>,
) -> anyhow::Result<()> {
    let date_key = parse_day(Some(date))?;
    let patch = EntryPatch {
        source_text: source,
        translated_text: translation,
    };
    if patch.is_empty() {
        bail!("nothing to change, pass --source and/or --translation");
    }

    let outcome = state.calendar.update(id, date_key, &patch).await?;
    println!("{}", describe_update(&outcome, id, date_key));
    Ok(())
}

pub async fn remove(state: &AppState, id: &str, date: &str) -> anyhow::Result<()> {
    let date_key = parse_day(Some(date))?;
    if state.calendar.remove(id, date_key).await? {
        println!("Removed entry from {date_key}");
    } else {
        println!("No entry {id} on {date_key}");
    }
    Ok(())
}

pub async fn export(
    state: &AppState,
    date: Option<&str>,
    format: ExportFormat,
    out: Option<PathBuf>,
) -> anyhow::Result<()> {
    let date_key = parse_day(date)?;
    let view = state.calendar.day(date_key).await?;
    let rendered = format.render(date_key, &view.entries);

    let path = out.unwrap_or_else(|| PathBuf::from(format.file_name(date_key)));
    fs::write(&path, rendered).with_context(|| format!("writing {}", path.display()))?;
    tracing::info!("Exported {} entries", view.entries.len());
    println!("Wrote {}", path.display());
    Ok(())
}

pub async fn hide_mode(state: &AppState) -> anyhow::Result<()> {
    let mut stored = profile::load_user_profile(&state.profile_root, &state.profile)?;
    stored.ui.hide_mode = stored.ui.hide_mode.next();
    profile::save_user_profile(&state.profile_root, &state.profile, &stored)?;
    state.config.write().await.ui.hide_mode = stored.ui.hide_mode;
    println!("Hide mode: {}", stored.ui.hide_mode.label());
    Ok(())
}
