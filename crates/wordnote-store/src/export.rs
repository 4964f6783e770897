use std::fmt;
use std::str::FromStr;

use wordnote_core::{DateKey, VocabEntry};

const CSV_HEADER: &str = "원문,번역";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Csv,
    Txt,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Txt => "txt",
        }
    }

    /// `vocab-<date>.<ext>`
    pub fn file_name(self, date_key: DateKey) -> String {
        format!("vocab-{date_key}.{}", self.extension())
    }

    pub fn render(self, date_key: DateKey, entries: &[VocabEntry]) -> String {
        match self {
            ExportFormat::Csv => to_csv(entries),
            ExportFormat::Txt => to_txt(date_key, entries),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "txt" | "text" => Ok(ExportFormat::Txt),
            other => Err(format!("unknown export format: {other}")),
        }
    }
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

pub fn to_csv(entries: &[VocabEntry]) -> String {
    let mut lines = Vec::with_capacity(entries.len() + 1);
    lines.push(CSV_HEADER.to_string());
    lines.extend(
        entries
            .iter()
            .map(|e| format!("{},{}", quote(&e.source_text), quote(&e.translated_text))),
    );
    lines.join("\n")
}

pub fn to_txt(date_key: DateKey, entries: &[VocabEntry]) -> String {
    let body = if entries.is_empty() {
        "No items".to_string()
    } else {
        entries
            .iter()
            .map(|e| format!("- {} => {}", e.source_text, e.translated_text))
            .collect::<Vec<_>>()
            .join("\n")
    };
    format!("Vocabulary {date_key}\n\n{body}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> DateKey {
        DateKey::from_ymd(2024, 6, 1).unwrap()
    }

    #[test]
    fn csv_quotes_every_field() {
        let entries = vec![
            VocabEntry::new(day(), "say \"hi\"", "안녕"),
            VocabEntry::new(day(), "a, b", "에이, 비"),
        ];
        assert_eq!(
            to_csv(&entries),
            "원문,번역\n\"say \"\"hi\"\"\",\"안녕\"\n\"a, b\",\"에이, 비\""
        );
    }

    #[test]
    fn csv_of_empty_day_is_header_only() {
        assert_eq!(to_csv(&[]), "원문,번역");
    }

    #[test]
    fn txt_lists_pairs() {
        let entries = vec![VocabEntry::new(day(), "cat", "고양이")];
        assert_eq!(
            to_txt(day(), &entries),
            "Vocabulary 2024-06-01\n\n- cat => 고양이"
        );
    }

    #[test]
    fn txt_of_empty_day_says_no_items() {
        assert_eq!(ExportFormat::Txt.render(day(), &[]), "Vocabulary 2024-06-01\n\nNo items");
    }

    #[test]
    fn file_names_carry_date_and_extension() {
        assert_eq!(ExportFormat::Csv.file_name(day()), "vocab-2024-06-01.csv");
        assert_eq!(ExportFormat::Txt.file_name(day()), "vocab-2024-06-01.txt");
        assert_eq!("TXT".parse::<ExportFormat>(), Ok(ExportFormat::Txt));
        assert!("pdf".parse::<ExportFormat>().is_err());
    }
}
