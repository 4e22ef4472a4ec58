//! Matrix - Sport × country medal matrix (`/api/sport-country-matrix`)

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Year window for the heatmap query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum YearRange {
    All,
    #[default]
    Recent,
    Nineties,
    Eighties,
    Seventies,
    Historical,
    /// Explicit inclusive span, sent as `YYYY-YYYY`
    Span { start: i32, end: i32 },
}

impl YearRange {
    /// Query parameter value
    pub fn as_param(&self) -> String {
        match self {
            YearRange::All => "all".into(),
            YearRange::Recent => "recent".into(),
            YearRange::Nineties => "1990s".into(),
            YearRange::Eighties => "1980s".into(),
            YearRange::Seventies => "1970s".into(),
            YearRange::Historical => "historical".into(),
            YearRange::Span { start, end } => format!("{start}-{end}"),
        }
    }

    /// Inclusive year bounds the backend applies for this range
    pub fn bounds(&self) -> (i32, i32) {
        match self {
            YearRange::All => (1896, 2022),
            YearRange::Recent => (2000, 2022),
            YearRange::Nineties => (1990, 1999),
            YearRange::Eighties => (1980, 1989),
            YearRange::Seventies => (1970, 1979),
            YearRange::Historical => (1896, 1969),
            YearRange::Span { start, end } => (*start, *end),
        }
    }

    /// Label for chart subtitles
    pub fn label(&self) -> String {
        match self {
            YearRange::All => "All Years".into(),
            YearRange::Recent => "Recent (2000+)".into(),
            YearRange::Nineties => "1990s".into(),
            YearRange::Eighties => "1980s".into(),
            YearRange::Seventies => "1970s".into(),
            YearRange::Historical => "Historical (pre-1970)".into(),
            YearRange::Span { start, end } => format!("{start}-{end}"),
        }
    }
}

impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_param())
    }
}

impl FromStr for YearRange {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let range = match s.trim() {
            "all" => YearRange::All,
            "recent" => YearRange::Recent,
            "1990s" => YearRange::Nineties,
            "1980s" => YearRange::Eighties,
            "1970s" => YearRange::Seventies,
            "historical" => YearRange::Historical,
            other => {
                let parsed = other
                    .split_once('-')
                    .and_then(|(a, b)| Some((a.trim().parse().ok()?, b.trim().parse().ok()?)));
                match parsed {
                    Some((start, end)) if start <= end => YearRange::Span { start, end },
                    _ => {
                        return Err(Error::Invalid {
                            message: format!("Unknown year range: {other}"),
                        });
                    }
                }
            }
        };
        Ok(range)
    }
}

impl TryFrom<String> for YearRange {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<YearRange> for String {
    fn from(value: YearRange) -> Self {
        value.as_param()
    }
}

/// One populated cell of the matrix
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatrixEntry {
    pub country: String,
    #[serde(default)]
    pub country_name: Option<String>,
    pub sport: String,
    pub value: u32,
    #[serde(default)]
    pub country_cluster: Option<u32>,
    #[serde(default)]
    pub sport_cluster: Option<u32>,
}

/// Full matrix response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatrixResponse {
    pub countries: Vec<String>,
    pub sports: Vec<String>,
    #[serde(default)]
    pub max_value: f64,
    #[serde(default)]
    pub year_min: Option<i32>,
    #[serde(default)]
    pub year_max: Option<i32>,
    pub data: Vec<MatrixEntry>,
}
