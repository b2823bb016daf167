//! Read models for the presentation layer.
//!
//! Everything here is computed from a [`SearchState`] on demand. Widget
//! state (checkboxes, facet selection) is reconstructed from the criteria the
//! controller owns instead of being kept alongside it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use crate::criteria::FilterCriteria;
use crate::search::{Flight, FlightQuery};
use crate::state::{QueryPhase, SearchState};

// ============================================================================
// Query form
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct QueryForm {
    #[serde(default)]
    pub origin: String,
    #[serde(default)]
    pub destination: String,
    #[serde(default)]
    pub date: String,
}

impl QueryForm {
    /// Checks that every field is filled and the date is a calendar date,
    /// then upper-cases the airport codes.
    pub fn validate(&self) -> Result<FlightQuery, FormError> {
        let origin = required("origin", &self.origin)?;
        let destination = required("destination", &self.destination)?;
        let date = required("date", &self.date)?;

        NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|_| FormError::InvalidDate(date.to_string()))?;

        Ok(FlightQuery::new(
            &origin.to_uppercase(),
            &destination.to_uppercase(),
            date,
        ))
    }
}

fn required<'a>(field: &'static str, value: &'a str) -> Result<&'a str, FormError> {
    let value = value.trim();
    if value.is_empty() {
        Err(FormError::MissingField(field))
    } else {
        Ok(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("Please fill all fields: {0} is missing")]
    MissingField(&'static str),
    #[error("Invalid travel date (expected YYYY-MM-DD): {0}")]
    InvalidDate(String),
}

// ============================================================================
// Flight list
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct FlightCard {
    pub id: String,
    pub airline: String,
    pub origin: String,
    pub destination: String,
    pub departure_date: String,
    pub departure: String,
    pub arrival: String,
    pub duration: String,
    pub stops: String,
    pub nonstop: bool,
    pub price: String,
    pub aircraft: String,
}

const UNKNOWN_TIME: &str = "--:--";

impl From<&Flight> for FlightCard {
    fn from(flight: &Flight) -> Self {
        let departure = flight.departure_local();
        let arrival = flight.arrival_local();

        Self {
            id: flight.id.clone(),
            airline: flight.airline.clone(),
            origin: flight.origin.clone(),
            destination: flight.destination.clone(),
            departure_date: departure
                .map(|dt| dt.format("%a, %b %-d").to_string())
                .unwrap_or_default(),
            departure: departure
                .map(|dt| dt.format("%H:%M").to_string())
                .unwrap_or_else(|| UNKNOWN_TIME.to_string()),
            arrival: arrival
                .map(|dt| dt.format("%H:%M").to_string())
                .unwrap_or_else(|| UNKNOWN_TIME.to_string()),
            duration: flight.duration.clone(),
            stops: stops_label(flight.stops),
            nonstop: flight.stops == 0,
            price: price_label(&flight.currency, flight.price),
            aircraft: flight.aircraft.clone(),
        }
    }
}

pub fn stops_label(stops: u32) -> String {
    match stops {
        0 => "Nonstop".to_string(),
        1 => "1 stop".to_string(),
        n => format!("{} stops", n),
    }
}

pub fn price_label(currency: &str, price: f64) -> String {
    if price.fract() == 0.0 {
        format!("{} {:.0}", currency, price)
    } else {
        format!("{} {:.2}", currency, price)
    }
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{} {}", count, noun)
    } else {
        format!("{} {}s", count, noun)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FlightListView {
    pub phase: QueryPhase,
    pub loading: bool,
    pub error: Option<String>,
    pub summary: String,
    pub empty_hint: Option<String>,
    pub cards: Vec<FlightCard>,
}

impl FlightListView {
    pub fn from_state(state: &SearchState) -> Self {
        let cards: Vec<FlightCard> = state.derived_flights().iter().map(FlightCard::from).collect();

        let summary = if state.loading() {
            "Searching for flights...".to_string()
        } else {
            format!("{} found", plural(cards.len(), "flight"))
        };

        let empty_hint = (!state.loading() && cards.is_empty())
            .then(|| "No flights found. Try adjusting your search criteria".to_string());

        Self {
            phase: state.phase(),
            loading: state.loading(),
            error: state.error().map(str::to_string),
            summary,
            empty_hint,
            cards,
        }
    }
}

// ============================================================================
// Price chart
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricePoint {
    pub index: usize,
    pub label: String,
    pub price: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PriceChart {
    pub currency: Option<String>,
    pub points: Vec<PricePoint>,
    pub caption: String,
}

impl PriceChart {
    /// One bar per flight in the derived view, `None` when there is nothing to plot.
    pub fn from_flights(flights: &[Flight]) -> Option<Self> {
        if flights.is_empty() {
            return None;
        }

        let points = flights
            .iter()
            .enumerate()
            .map(|(i, f)| PricePoint {
                index: i + 1,
                label: f.airline.clone(),
                price: f.price,
            })
            .collect();

        Some(Self {
            currency: flights.first().map(|f| f.currency.clone()),
            points,
            caption: format!("Showing prices for {}", plural(flights.len(), "flight")),
        })
    }
}

// ============================================================================
// Filter panel
// ============================================================================

/// The three stop checkboxes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StopSelection {
    #[serde(default)]
    pub nonstop: bool,
    #[serde(default)]
    pub one_stop: bool,
    #[serde(default)]
    pub two_plus: bool,
}

impl StopSelection {
    pub fn from_max_stops(max_stops: Option<u32>) -> Self {
        Self {
            nonstop: max_stops == Some(0),
            one_stop: max_stops == Some(1),
            two_plus: matches!(max_stops, Some(n) if n >= 2),
        }
    }

    pub fn max_stops(&self) -> Option<u32> {
        if self.two_plus {
            Some(2)
        } else if self.one_stop {
            Some(1)
        } else if self.nonstop {
            Some(0)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AirlineOption {
    pub name: String,
    pub selected: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct FilterPanel {
    pub available_airlines: Vec<AirlineOption>,
    pub stops: StopSelection,
    pub max_price: Option<f64>,
    pub criteria: FilterCriteria,
}

impl FilterPanel {
    pub fn from_state(state: &SearchState) -> Self {
        let criteria = state.criteria();

        let mut available_airlines: Vec<AirlineOption> = Vec::new();
        for flight in state.raw_flights() {
            if available_airlines.iter().any(|a| a.name == flight.airline) {
                continue;
            }
            available_airlines.push(AirlineOption {
                name: flight.airline.clone(),
                selected: criteria.is_airline_selected(&flight.airline),
            });
        }

        Self {
            available_airlines,
            stops: StopSelection::from_max_stops(criteria.max_stops),
            max_price: criteria.max_price,
            criteria: criteria.clone(),
        }
    }
}
