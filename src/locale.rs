use std::fmt;
use std::str::FromStr;
use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};

const EN_MONTHS: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];

// genitive case, as used after a day number
const RU_MONTHS: [&str; 12] = [
    "января", "февраля", "марта", "апреля", "мая", "июня",
    "июля", "августа", "сентября", "октября", "ноября", "декабря",
];

/// Locale used for the human-readable `date` stamped on articles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DisplayLocale {
    #[default]
    En,
    Ru,
}

impl DisplayLocale {
    /// "D Month YYYY", e.g. `19 October 2026`.
    pub fn format_date(&self, date: NaiveDate) -> String {
        let months = match self {
            DisplayLocale::En => &EN_MONTHS,
            DisplayLocale::Ru => &RU_MONTHS,
        };
        format!("{} {} {}", date.day(), months[date.month0() as usize], date.year())
    }
}

impl fmt::Display for DisplayLocale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayLocale::En => write!(f, "en"),
            DisplayLocale::Ru => write!(f, "ru"),
        }
    }
}

impl FromStr for DisplayLocale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" | "en-us" | "en-gb" => Ok(DisplayLocale::En),
            "ru" | "ru-ru" => Ok(DisplayLocale::Ru),
            _ => Err(format!("Unsupported locale: {}", s)),
        }
    }
}

pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}
