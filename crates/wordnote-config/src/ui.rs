use serde::{Deserialize, Serialize};

/// Which column the day view hides while studying
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum HideMode {
    #[default]
    Off,
    Source,
    Translation,
}

impl HideMode {
    /// Off -> Source -> Translation -> Off
    pub fn next(self) -> Self {
        match self {
            HideMode::Off => HideMode::Source,
            HideMode::Source => HideMode::Translation,
            HideMode::Translation => HideMode::Off,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            HideMode::Off => "showing everything",
            HideMode::Source => "hiding source text",
            HideMode::Translation => "hiding translations",
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(default)]
pub struct UiConfig {
    #[serde(default)]
    pub hide_mode: HideMode,
}
