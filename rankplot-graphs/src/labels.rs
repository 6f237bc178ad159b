//! Localized chart labels

use rankplot_common::RankplotError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::format_probability;

/// Supported label languages
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Locale {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "zh")]
    Chinese,
}

impl Locale {
    /// Get the short language code for this locale
    pub fn code(&self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Chinese => "zh",
        }
    }

    /// Parse a locale from a language code
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "en" | "en-us" | "en-gb" => Some(Self::English),
            "zh" | "zh-cn" | "zh-hans" => Some(Self::Chinese),
            _ => None,
        }
    }

    /// Get all supported locales
    pub fn all() -> [Self; 2] {
        [Self::English, Self::Chinese]
    }

    /// Label table for this locale
    pub fn labels(&self) -> &'static Labels {
        match self {
            Self::English => &ENGLISH,
            Self::Chinese => &CHINESE,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = RankplotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| {
            RankplotError::validation_field(format!("unsupported locale '{s}'"), "locale")
        })
    }
}

/// Every piece of text drawn on the report figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Labels {
    pub simulation_axis: &'static str,

    pub total_title: &'static str,
    pub total_axis: &'static str,
    pub total_series: &'static str,
    pub max_total_series: &'static str,
    pub min_total_series: &'static str,

    pub interview_title: &'static str,
    pub interview_axis: &'static str,
    pub interview_series: &'static str,

    pub rank_title: &'static str,
    pub top5_probability: &'static str,
    pub rank_axis: &'static str,
    pub rank_series: &'static str,
    pub threshold_series: &'static str,
}

impl Labels {
    /// Title of the rank panel, including the formatted top-5 probability.
    pub fn rank_title_with_probability(&self, probability: f64) -> String {
        format!(
            "{} ({}: {})",
            self.rank_title,
            self.top5_probability,
            format_probability(probability)
        )
    }
}

static ENGLISH: Labels = Labels {
    simulation_axis: "Simulation",

    total_title: "Total score across simulations",
    total_axis: "Total score",
    total_series: "Total score",
    max_total_series: "Highest total score",
    min_total_series: "Lowest total score",

    interview_title: "Interview score across simulations",
    interview_axis: "Interview score",
    interview_series: "Your interview score",

    rank_title: "Rank over simulations",
    top5_probability: "probability of reaching top 5",
    rank_axis: "Your rank",
    rank_series: "Your rank",
    threshold_series: "Top 5 threshold",
};

static CHINESE: Labels = Labels {
    simulation_axis: "模拟次数",

    total_title: "模拟中的总成绩变化",
    total_axis: "总成绩",
    total_series: "总成绩",
    max_total_series: "最高总成绩",
    min_total_series: "最低总成绩",

    interview_title: "模拟中的面试成绩变化",
    interview_axis: "面试成绩",
    interview_series: "你的面试成绩",

    rank_title: "模拟中的排名变化",
    top5_probability: "进入前五名的概率",
    rank_axis: "你的排名",
    rank_series: "你的排名",
    threshold_series: "前五名阈值",
};
