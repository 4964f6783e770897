use std::io::BufRead;

use kanal::AsyncSender;
use tokio_util::sync::CancellationToken;
use wordnote_core::{DateKey, YearMonth};
use wordnote_types::{AppEvent, UiEvent};

const EDIT_SEPARATOR: &str = "=>";

/// Stdin watcher: plain lines are selections, `:` lines are commands
pub async fn watcher_io(
    cancel: CancellationToken,
    event_tx: AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    tracing::info!("Starting stdin watcher");

    let runtime = tokio::runtime::Handle::current();
    let stop = cancel.clone();
    // Blocking stdin reads cannot be cancelled, keep them off the runtime
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            if stop.is_cancelled() {
                return;
            }
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    tracing::error!("Reading stdin failed: {}", e);
                    break;
                }
            };

            let event = match parse_line(&line) {
                Ok(Some(event)) => event,
                Ok(None) => continue,
                Err(message) => AppEvent::StatusUpdate(message),
            };
            if runtime.block_on(event_tx.send(event)).is_err() {
                return;
            }
        }

        tracing::info!("Stdin closed");
        let _ = runtime.block_on(event_tx.send(AppEvent::UiEvent(UiEvent::Close)));
    });

    cancel.cancelled().await;
    tracing::info!("Stdin watcher stopping");
    Ok(())
}

/// Turn one input line into an event; blank lines yield `None`
pub fn parse_line(line: &str) -> Result<Option<AppEvent>, String> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    match trimmed.strip_prefix(':') {
        Some(command) => parse_command(command).map(Some),
        None => Ok(Some(AppEvent::TextInput(line.to_string()))),
    }
}

fn parse_date(raw: &str) -> Result<DateKey, String> {
    raw.parse()
        .map_err(|_| format!("Not a date (YYYY-MM-DD): {raw}"))
}

fn next_word(s: &str) -> Option<(&str, &str)> {
    s.trim_start()
        .split_once(char::is_whitespace)
        .map(|(word, rest)| (word, rest.trim_start()))
}

fn parse_command(command: &str) -> Result<AppEvent, String> {
    let command = command.trim();
    let (name, rest) = next_word(command).unwrap_or((command, ""));
    let rest = rest.trim();

    match name {
        "day" | "d" => {
            let date_key = if rest.is_empty() {
                DateKey::today()
            } else {
                parse_date(rest)?
            };
            Ok(AppEvent::RequestDay(date_key))
        }
        "month" | "m" => {
            let args: Vec<&str> = rest.split_whitespace().collect();
            let month = match args.as_slice() {
                [] => YearMonth::current(),
                [year, month] => {
                    let year = year.parse().map_err(|_| format!("Bad year: {year}"))?;
                    let month = month.parse().map_err(|_| format!("Bad month: {month}"))?;
                    YearMonth::new(year, month).map_err(|e| e.to_string())?
                }
                _ => return Err("Usage: :month [year month]".to_string()),
            };
            Ok(AppEvent::RequestMonth {
                year: month.year(),
                month: month.month(),
            })
        }
        "edit" | "e" => {
            let usage = "Usage: :edit <id> <date> <source> => <translation>";
            let Some((id, rest)) = next_word(rest) else {
                return Err(usage.to_string());
            };
            let Some((date, body)) = next_word(rest) else {
                return Err(usage.to_string());
            };
            let Some((source, translation)) = body.split_once(EDIT_SEPARATOR) else {
                return Err(usage.to_string());
            };

            let field = |s: &str| Some(s.trim()).filter(|s| !s.is_empty()).map(str::to_string);
            Ok(AppEvent::UpdateEntry {
                id: id.to_string(),
                date_key: parse_date(date)?,
                source_text: field(source),
                translated_text: field(translation),
            })
        }
        "rm" | "remove" => match rest.split_whitespace().collect::<Vec<_>>().as_slice() {
            [id, date] => Ok(AppEvent::RemoveEntry {
                id: id.to_string(),
                date_key: parse_date(date)?,
            }),
            _ => Err("Usage: :rm <id> <date>".to_string()),
        },
        "hide" => Ok(AppEvent::ToggleHideMode),
        "help" | "h" | "?" => Ok(AppEvent::UiEvent(UiEvent::Help)),
        "q" | "quit" => Ok(AppEvent::UiEvent(UiEvent::Close)),
        other => Err(format!("Unknown command :{other} (try :help)")),
    }
}
