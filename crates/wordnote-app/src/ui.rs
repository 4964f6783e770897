use std::sync::Arc;

use chrono::Datelike;
use kanal::AsyncReceiver;
use reqwest::Url;
use tokio::sync::RwLock;
use wordnote_config::Config;
use wordnote_config::ui::HideMode;
use wordnote_core::DateKey;
use wordnote_types::{AppEvent, DisplayEntry, MonthCell, UiEvent};

const MASK: &str = "••••••";
const WEEKDAYS: &str = "Su  Mo  Tu  We  Th  Fr  Sa";
const SEARCH_URL: &str = "https://www.google.com/search";
const SEARCH_SUFFIX: &str = "영어 번역";

pub const HELP: &str = "\
Type or paste text to translate and save it for today.
  :day [YYYY-MM-DD]                        show one day
  :month [year month]                      show the calendar
  :edit <id> <date> <source> => <target>   change an entry (empty side keeps it)
  :rm <id> <date>                          remove an entry
  :hide                                    cycle hide mode
  :q                                       quit";

/// Terminal stand-in for the popup and calendar views
pub async fn ui_loop(
    app_to_ui_rx: AsyncReceiver<AppEvent>,
    config: Arc<RwLock<Config>>,
) -> anyhow::Result<()> {
    // Last day shown, re-rendered when the hide mode changes
    let mut last_day: Option<(DateKey, Vec<DisplayEntry>)> = None;

    while let Ok(event) = app_to_ui_rx.recv().await {
        match event {
            AppEvent::BackendReady => {
                println!("wordnote ready. :help for commands");
            }
            AppEvent::ShowTranslation {
                source,
                text,
                from_lang,
                to_lang,
                provider,
            } => {
                tracing::debug!("Translation {} -> {} via {}", from_lang, to_lang, provider);
                println!("{}", render_translation(&source, &text));
            }
            AppEvent::SaveFailed { source, reason } => {
                println!("(not saved: '{source}', {reason})");
            }
            AppEvent::ShowDay { date_key, entries } => {
                let mode = config.read().await.ui.hide_mode;
                println!("{}", render_day(date_key, &entries, mode));
                last_day = Some((date_key, entries));
            }
            AppEvent::ShowMonth { label, days } => {
                println!("{}", render_month(&label, &days));
            }
            AppEvent::HideModeChanged(label) => {
                println!("Hide mode: {label}");
                if let Some((date_key, entries)) = &last_day {
                    let mode = config.read().await.ui.hide_mode;
                    println!("{}", render_day(*date_key, entries, mode));
                }
            }
            AppEvent::StatusUpdate(message) => {
                println!("{message}");
            }
            AppEvent::UiEvent(UiEvent::Help) => {
                println!("{HELP}");
            }
            AppEvent::UiEvent(UiEvent::Close) => {
                tracing::debug!("UI closing");
                break;
            }
            _ => {}
        }
    }

    Ok(())
}

pub fn render_translation(source: &str, text: &str) -> String {
    format!("{source}\n  => {text}")
}

pub fn render_day(date_key: DateKey, entries: &[DisplayEntry], mode: HideMode) -> String {
    let mut out = format!("== {date_key} ({} items) ==", entries.len());
    if entries.is_empty() {
        out.push_str("\nNo items");
        return out;
    }

    for entry in entries {
        let source = match mode {
            HideMode::Source => MASK,
            _ => entry.source_text.as_str(),
        };
        let translated = match mode {
            HideMode::Translation => MASK,
            _ => entry.translated_text.as_str(),
        };
        out.push_str(&format!("\n- {source} => {translated}\n    id: {}", entry.id));
        // The link would reveal a hidden source
        if let Some(url) = search_url(&entry.source_text).filter(|_| mode != HideMode::Source) {
            out.push_str(&format!("\n    search: {url}"));
        }
    }
    out
}

/// Web search for the source word, e.g. to hear it or see usage
pub fn search_url(source: &str) -> Option<String> {
    let query = format!("{} {SEARCH_SUFFIX}", source.trim());
    Url::parse_with_params(SEARCH_URL, &[("q", query)])
        .map(String::from)
        .ok()
}

/// Sunday-first grid; days with entries are starred
pub fn render_month(label: &str, days: &[MonthCell]) -> String {
    let mut out = format!("== {label} ==\n{WEEKDAYS}");
    let Some(first) = days.first() else {
        return out;
    };

    let lead = first.date_key.date().weekday().num_days_from_sunday() as usize;
    let mut cells: Vec<String> = vec!["   ".to_string(); lead];
    cells.extend(days.iter().map(|cell| {
        let mark = if cell.count > 0 { '*' } else { ' ' };
        format!("{:>2}{mark}", cell.date_key.date().day())
    }));

    for week in cells.chunks(7) {
        out.push('\n');
        out.push_str(week.join(" ").trim_end());
    }

    let total: usize = days.iter().map(|c| c.count).sum();
    let active = days.iter().filter(|c| c.count > 0).count();
    out.push_str(&format!("\n{total} entries on {active} days"));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries() -> Vec<DisplayEntry> {
        vec![DisplayEntry {
            id: "2024-06-01|cat|x".to_string(),
            source_text: "cat".to_string(),
            translated_text: "고양이".to_string(),
        }]
    }

    fn day(d: u32) -> DateKey {
        DateKey::from_ymd(2024, 6, d).unwrap()
    }

    #[test]
    fn day_view_masks_hidden_column() {
        let shown = render_day(day(1), &entries(), HideMode::Off);
        assert!(shown.contains("- cat => 고양이"));

        let no_source = render_day(day(1), &entries(), HideMode::Source);
        assert!(no_source.contains(&format!("- {MASK} => 고양이")));
        assert!(!no_source.contains("search:"));

        let no_translation = render_day(day(1), &entries(), HideMode::Translation);
        assert!(no_translation.contains(&format!("- cat => {MASK}")));
    }

    #[test]
    fn each_entry_links_a_web_search() {
        let shown = render_day(day(1), &entries(), HideMode::Off);
        assert!(shown.contains(
            "search: https://www.google.com/search?q=cat+%EC%98%81%EC%96%B4+%EB%B2%88%EC%97%AD"
        ));
        assert_eq!(
            search_url(" ice cream ").as_deref(),
            Some("https://www.google.com/search?q=ice+cream+%EC%98%81%EC%96%B4+%EB%B2%88%EC%97%AD")
        );
    }

    #[test]
    fn empty_day_says_no_items() {
        assert!(render_day(day(2), &[], HideMode::Off).ends_with("No items"));
    }

    #[test]
    fn month_grid_starts_on_the_right_weekday() {
        // June 2024 starts on a Saturday
        let days: Vec<MonthCell> = (1..=30)
            .map(|d| MonthCell {
                date_key: day(d),
                count: if d == 3 { 2 } else { 0 },
            })
            .collect();
        let out = render_month("2024-06", &days);
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines[0], "== 2024-06 ==");
        assert_eq!(lines[1], WEEKDAYS);
        assert_eq!(lines[2].trim(), "1");
        assert!(lines[3].starts_with(" 2   3*"));
        assert_eq!(lines.last().copied(), Some("2 entries on 1 days"));
    }
}
