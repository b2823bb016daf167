//! Test-only flight builders shared by the unit tests in this crate.

use crate::search::Flight;

pub fn flight(id: &str, airline: &str, departure: &str, price: f64, stops: u32) -> Flight {
    Flight {
        id: id.to_string(),
        airline: airline.to_string(),
        origin: "JFK".to_string(),
        destination: "LAX".to_string(),
        departure_time: departure.to_string(),
        arrival_time: "2026-01-18T23:59:00".to_string(),
        duration: "5h 30m".to_string(),
        price,
        currency: "USD".to_string(),
        stops,
        aircraft: "Airbus A320".to_string(),
    }
}

/// The four JFK-LAX itineraries the demo source serves.
pub fn catalog() -> Vec<Flight> {
    vec![
        flight("FL001", "Sky Airlines", "2026-01-18T08:00:00", 299.0, 0),
        flight("FL002", "Ocean Airways", "2026-01-18T14:15:00", 249.0, 0),
        flight("FL003", "Global Connect", "2026-01-18T22:30:00", 199.0, 0),
        flight("FL004", "Budget Flyers", "2026-01-18T10:45:00", 159.0, 1),
    ]
}

pub fn ids(flights: &[Flight]) -> Vec<&str> {
    flights.iter().map(|f| f.id.as_str()).collect()
}
