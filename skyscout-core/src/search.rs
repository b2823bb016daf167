use chrono::{DateTime, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// A route/date lookup as handed to a [`crate::source::FlightSource`].
///
/// All three fields are opaque here; normalization (upper-casing codes,
/// date checks) belongs to the form layer, see [`crate::view::QueryForm`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightQuery {
    pub origin: String,
    pub destination: String,
    pub date: String,
}

impl FlightQuery {
    pub fn new(origin: &str, destination: &str, date: &str) -> Self {
        Self {
            origin: origin.to_string(),
            destination: destination.to_string(),
            date: date.to_string(),
        }
    }
}

/// One bookable itinerary. Produced by a flight source and never mutated
/// afterwards; the controller only filters collections of these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flight {
    pub id: String,
    pub airline: String,
    pub origin: String,
    pub destination: String,
    pub departure_time: String, // ISO 8601, local wall clock
    pub arrival_time: String,
    pub duration: String,
    pub price: f64,
    pub currency: String,
    pub stops: u32,
    pub aircraft: String,
}

impl Flight {
    pub fn departure_local(&self) -> Option<NaiveDateTime> {
        parse_local_timestamp(&self.departure_time)
    }

    pub fn arrival_local(&self) -> Option<NaiveDateTime> {
        parse_local_timestamp(&self.arrival_time)
    }

    /// Departure hour:minute as minutes since midnight, `None` when the
    /// timestamp is missing or malformed.
    pub fn departure_minutes(&self) -> Option<u16> {
        self.departure_local()
            .map(|dt| (dt.hour() * 60 + dt.minute()) as u16)
    }
}

/// Parses a timezone-naive ISO 8601 timestamp. An RFC 3339 value with an
/// offset is accepted too, keeping its local wall-clock part.
pub fn parse_local_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }

    raw.parse::<NaiveDateTime>()
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::flight;

    #[test]
    fn test_flight_deserialization() {
        let json = r#"
            {
                "id": "FL001",
                "airline": "Sky Airlines",
                "origin": "JFK",
                "destination": "LAX",
                "departure_time": "2026-01-18T08:00:00",
                "arrival_time": "2026-01-18T11:30:00",
                "duration": "5h 30m",
                "price": 299,
                "currency": "USD",
                "stops": 0,
                "aircraft": "Boeing 737"
            }
        "#;
        let flight: Flight = serde_json::from_str(json).expect("Failed to deserialize");
        assert_eq!(flight.id, "FL001");
        assert_eq!(flight.price, 299.0);
        assert_eq!(flight.departure_minutes(), Some(8 * 60));
    }

    #[test]
    fn test_departure_minutes_accepts_common_forms() {
        assert_eq!(flight("A", "X", "2026-01-18T14:15", 1.0, 0).departure_minutes(), Some(855));
        assert_eq!(
            flight("B", "X", "2026-01-18T14:15:59.250", 1.0, 0).departure_minutes(),
            Some(855)
        );
        // Offset is ignored, the wall clock is what the traveller sees.
        assert_eq!(
            flight("C", "X", "2026-01-18T22:30:00+09:00", 1.0, 0).departure_minutes(),
            Some(22 * 60 + 30)
        );
    }

    #[test]
    fn test_malformed_departure_has_no_minutes() {
        assert_eq!(flight("A", "X", "", 1.0, 0).departure_minutes(), None);
        assert_eq!(flight("B", "X", "tomorrow morning", 1.0, 0).departure_minutes(), None);
        assert_eq!(flight("C", "X", "2026-13-40T25:00:00", 1.0, 0).departure_minutes(), None);
    }
}
