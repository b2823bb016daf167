use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A wall-clock time of day, stored as minutes since midnight.
/// Parsed from and rendered as `HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime(u16);

impl ClockTime {
    pub fn new(hour: u8, minute: u8) -> Option<Self> {
        if hour < 24 && minute < 60 {
            Some(Self(hour as u16 * 60 + minute as u16))
        } else {
            None
        }
    }

    pub fn minutes(self) -> u16 {
        self.0
    }

    pub fn hour(self) -> u8 {
        (self.0 / 60) as u8
    }

    pub fn minute(self) -> u8 {
        (self.0 % 60) as u8
    }
}

impl FromStr for ClockTime {
    type Err = CriteriaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CriteriaError::InvalidClockTime(s.to_string());

        let (hour, minute) = s.trim().split_once(':').ok_or_else(invalid)?;
        let digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if hour.is_empty() || hour.len() > 2 || minute.len() != 2 || !digits(hour) || !digits(minute) {
            return Err(invalid());
        }
        let hour: u8 = hour.parse().map_err(|_| invalid())?;
        let minute: u8 = minute.parse().map_err(|_| invalid())?;

        Self::new(hour, minute).ok_or_else(invalid)
    }
}

impl TryFrom<String> for ClockTime {
    type Error = CriteriaError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ClockTime> for String {
    fn from(value: ClockTime) -> Self {
        value.to_string()
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

/// Inclusive departure window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartureWindow {
    pub start: ClockTime,
    pub end: ClockTime,
}

impl DepartureWindow {
    pub fn new(start: ClockTime, end: ClockTime) -> Self {
        Self { start, end }
    }

    pub fn parse(start: &str, end: &str) -> Result<Self, CriteriaError> {
        Ok(Self::new(start.parse()?, end.parse()?))
    }

    pub fn contains(&self, minutes: u16) -> bool {
        self.start.minutes() <= minutes && minutes <= self.end.minutes()
    }
}

/// User-chosen constraints on the loaded flights. A `None` field places no
/// constraint on that axis; `FilterCriteria::default()` is fully unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_stops: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_airlines: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub departure_time_range: Option<DepartureWindow>,
}

impl FilterCriteria {
    pub fn is_unconstrained(&self) -> bool {
        self.max_price.is_none()
            && self.max_stops.is_none()
            && self.airline_filter().is_none()
            && self.departure_time_range.is_none()
    }

    /// The airline allow-list, `None` when absent or empty.
    pub fn airline_filter(&self) -> Option<&[String]> {
        self.preferred_airlines
            .as_deref()
            .filter(|airlines| !airlines.is_empty())
    }

    pub fn is_airline_selected(&self, airline: &str) -> bool {
        self.airline_filter()
            .map(|airlines| airlines.iter().any(|a| a == airline))
            .unwrap_or(false)
    }

    pub fn validate(&self) -> Result<(), CriteriaError> {
        if let Some(max_price) = self.max_price {
            if !max_price.is_finite() || max_price < 0.0 {
                return Err(CriteriaError::InvalidPrice(max_price));
            }
        }

        if let Some(window) = &self.departure_time_range {
            if window.start > window.end {
                return Err(CriteriaError::InvertedWindow {
                    start: window.start,
                    end: window.end,
                });
            }
        }

        Ok(())
    }

    pub fn with_max_price(mut self, max_price: Option<f64>) -> Self {
        self.max_price = max_price;
        self
    }

    pub fn with_max_stops(mut self, max_stops: Option<u32>) -> Self {
        self.max_stops = max_stops;
        self
    }

    pub fn with_departure_window(mut self, window: Option<DepartureWindow>) -> Self {
        self.departure_time_range = window;
        self
    }

    pub fn with_airlines<I, S>(mut self, airlines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let airlines: Vec<String> = airlines.into_iter().map(Into::into).collect();
        self.preferred_airlines = if airlines.is_empty() { None } else { Some(airlines) };
        self
    }

    /// Flips one carrier in the allow-list. Deselecting the last carrier
    /// removes the airline constraint altogether.
    pub fn with_airline_toggled(self, airline: &str) -> Self {
        let mut airlines: Vec<String> = self.airline_filter().map(<[String]>::to_vec).unwrap_or_default();

        if let Some(pos) = airlines.iter().position(|a| a == airline) {
            airlines.remove(pos);
        } else {
            airlines.push(airline.to_string());
        }

        self.with_airlines(airlines)
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CriteriaError {
    #[error("Departure window starts after it ends: {start} > {end}")]
    InvertedWindow { start: ClockTime, end: ClockTime },

    #[error("Invalid price bound: {0}")]
    InvalidPrice(f64),

    #[error("Invalid time of day (expected HH:MM): {0:?}")]
    InvalidClockTime(String),
}
