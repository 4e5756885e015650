//! Core types for fixrec-core.
//!
//! This module defines the data shared across all layers: the scraped
//! [`RawEventRecord`], its [`Odds`], the [`Outcome`] a price belongs to, the
//! [`Bookmaker`] that produced it, and the [`ReferenceClock`] every date
//! phrase is resolved against.

use chrono::NaiveDate;

/// One scraped listing row, exactly as the source adapter extracted it.
///
/// Blank strings mean "absent"; the reconciler reports them as
/// [`MissingField`](crate::error::RecordError::MissingField) instead of
/// guessing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawEventRecord {
    /// Date/time text as rendered by the bookmaker (`"astăzi, 15:30"`, `"03.05, 16:00"`, …).
    pub date_time_phrase: String,
    /// Home competitor as displayed.
    pub team1: String,
    /// Away competitor as displayed.
    pub team2: String,
    pub odds: Odds,
}

impl RawEventRecord {
    pub fn new(
        date_time_phrase: impl Into<String>,
        team1: impl Into<String>,
        team2: impl Into<String>,
    ) -> Self {
        Self {
            date_time_phrase: date_time_phrase.into(),
            team1: team1.into(),
            team2: team2.into(),
            odds: Odds::default(),
        }
    }

    pub fn with_odds(mut self, odds: Odds) -> Self {
        self.odds = odds;
        self
    }
}

/// The 1/X/2 prices of a fixture. Each price is kept as the scraped text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Odds {
    pub home: Option<String>,
    pub draw: Option<String>,
    pub away: Option<String>,
}

impl Odds {
    pub fn new(home: Option<String>, draw: Option<String>, away: Option<String>) -> Self {
        Self { home, draw, away }
    }

    pub fn get(&self, outcome: Outcome) -> Option<&str> {
        match outcome {
            Outcome::Home => self.home.as_deref(),
            Outcome::Draw => self.draw.as_deref(),
            Outcome::Away => self.away.as_deref(),
        }
    }

    /// Set the price for `outcome`. Blank values are stored as absent.
    pub fn set(&mut self, outcome: Outcome, value: impl Into<String>) {
        let value = value.into();
        let value = if value.trim().is_empty() { None } else { Some(value.trim().to_string()) };
        match outcome {
            Outcome::Home => self.home = value,
            Outcome::Draw => self.draw = value,
            Outcome::Away => self.away = value,
        }
    }

    /// Decimal price for `outcome`, accepting both `1.85` and `1,85`.
    pub fn price(&self, outcome: Outcome) -> Option<f64> {
        let text = self.get(outcome)?;
        let price: f64 = text.replace(',', ".").parse().ok()?;
        (price.is_finite() && price > 1.0).then_some(price)
    }
}

/// Result of a 1X2 market.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Outcome {
    Home,
    Draw,
    Away,
}

impl Outcome {
    pub const ALL: [Outcome; 3] = [Outcome::Home, Outcome::Draw, Outcome::Away];

    /// Parse the label bookmakers print on an odds button.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "1" => Some(Outcome::Home),
            "X" | "x" => Some(Outcome::Draw),
            "2" => Some(Outcome::Away),
            _ => None,
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Home => write!(f, "1"),
            Outcome::Draw => write!(f, "X"),
            Outcome::Away => write!(f, "2"),
        }
    }
}

/// Which bookmaker a feed or a store belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Bookmaker {
    Superbet,
    Maxbet,
    Spin,
}

impl Bookmaker {
    pub const ALL: [Bookmaker; 3] = [Bookmaker::Superbet, Bookmaker::Maxbet, Bookmaker::Spin];
}

impl std::fmt::Display for Bookmaker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Bookmaker::Superbet => write!(f, "superbet"),
            Bookmaker::Maxbet => write!(f, "maxbet"),
            Bookmaker::Spin => write!(f, "spin"),
        }
    }
}

impl std::str::FromStr for Bookmaker {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "superbet" => Ok(Bookmaker::Superbet),
            "maxbet" => Ok(Bookmaker::Maxbet),
            "spin" | "spin.ro" => Ok(Bookmaker::Spin),
            other => Err(format!("unknown bookmaker: {other}")),
        }
    }
}

/// The "today" that relative and partial date phrases resolve against.
///
/// Always passed in explicitly so that a scan is repeatable; nothing in the
/// core reads the system clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReferenceClock {
    pub today: NaiveDate,
}

impl ReferenceClock {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    /// Convenience for tests and fixtures. Returns `None` for an invalid date.
    pub fn ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self::new)
    }
}
