use crate::criteria::FilterCriteria;
use crate::search::Flight;

/// Whether a single flight satisfies every present constraint.
///
/// Each axis is checked independently and skipped when its criterion is
/// absent. A flight whose departure cannot be read is rejected while a
/// departure window is active.
pub fn matches(flight: &Flight, criteria: &FilterCriteria) -> bool {
    if let Some(max_price) = criteria.max_price {
        if flight.price > max_price {
            return false;
        }
    }

    if let Some(max_stops) = criteria.max_stops {
        if flight.stops > max_stops {
            return false;
        }
    }

    if let Some(airlines) = criteria.airline_filter() {
        if !airlines.iter().any(|a| *a == flight.airline) {
            return false;
        }
    }

    if let Some(window) = &criteria.departure_time_range {
        match flight.departure_minutes() {
            Some(minutes) if window.contains(minutes) => {}
            _ => return false,
        }
    }

    true
}

/// Order-preserving projection of `flights` under `criteria`.
pub fn apply_filters(flights: &[Flight], criteria: &FilterCriteria) -> Vec<Flight> {
    if criteria.is_unconstrained() {
        return flights.to_vec();
    }

    flights
        .iter()
        .filter(|flight| matches(flight, criteria))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::criteria::{ClockTime, DepartureWindow};
    use crate::fixtures::{catalog, flight, ids};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_unconstrained_is_identity() {
        let flights = catalog();
        assert_eq!(apply_filters(&flights, &FilterCriteria::default()), flights);
    }

    #[test]
    fn test_catalog_scenarios() {
        let flights = catalog();

        let nonstop = FilterCriteria::default().with_max_stops(Some(0));
        assert_eq!(ids(&apply_filters(&flights, &nonstop)), ["FL001", "FL002", "FL003"]);

        let cheap_nonstop = nonstop.with_max_price(Some(250.0));
        assert_eq!(ids(&apply_filters(&flights, &cheap_nonstop)), ["FL002", "FL003"]);

        let budget = FilterCriteria::default().with_airlines(["Budget Flyers"]);
        assert_eq!(ids(&apply_filters(&flights, &budget)), ["FL004"]);

        let midday = FilterCriteria::default()
            .with_departure_window(Some(DepartureWindow::parse("09:00", "15:00").unwrap()));
        assert_eq!(ids(&apply_filters(&flights, &midday)), ["FL002", "FL004"]);
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let flights = vec![flight("A", "X", "2026-01-18T09:00:00", 100.0, 1)];

        let exact = FilterCriteria::default()
            .with_max_price(Some(100.0))
            .with_max_stops(Some(1))
            .with_departure_window(Some(DepartureWindow::parse("09:00", "09:00").unwrap()));
        assert_eq!(apply_filters(&flights, &exact).len(), 1);

        let below = exact.clone().with_max_price(Some(99.99));
        assert!(apply_filters(&flights, &below).is_empty());
    }

    #[test]
    fn test_malformed_departure_fails_closed() {
        let flights = vec![
            flight("A", "X", "not-a-time", 100.0, 0),
            flight("B", "X", "", 100.0, 0),
            flight("C", "X", "2026-01-18T12:00:00", 100.0, 0),
        ];

        let window = FilterCriteria::default()
            .with_departure_window(Some(DepartureWindow::parse("00:00", "23:59").unwrap()));
        assert_eq!(ids(&apply_filters(&flights, &window)), ["C"]);

        // Without a window the bad timestamps are irrelevant.
        let price_only = FilterCriteria::default().with_max_price(Some(500.0));
        assert_eq!(apply_filters(&flights, &price_only).len(), 3);
    }

    fn reference_matches(f: &Flight, c: &FilterCriteria) -> bool {
        let price_ok = c.max_price.map_or(true, |max| f.price <= max);
        let stops_ok = c.max_stops.map_or(true, |max| f.stops <= max);
        let airline_ok = match &c.preferred_airlines {
            Some(list) if !list.is_empty() => list.contains(&f.airline),
            _ => true,
        };
        let time_ok = match &c.departure_time_range {
            None => true,
            Some(w) => match f.departure_local() {
                None => false,
                Some(dt) => {
                    let m = chrono::Timelike::hour(&dt) * 60 + chrono::Timelike::minute(&dt);
                    w.start.minutes() as u32 <= m && m <= w.end.minutes() as u32
                }
            },
        };
        price_ok && stops_ok && airline_ok && time_ok
    }

    const AIRLINES: [&str; 4] = ["Sky Airlines", "Ocean Airways", "Global Connect", "Budget Flyers"];

    fn random_flight(rng: &mut StdRng, n: usize) -> Flight {
        let departure = if rng.gen_bool(0.1) {
            "garbage".to_string()
        } else {
            format!("2026-01-18T{:02}:{:02}:00", rng.gen_range(0..24u32), rng.gen_range(0..60u32))
        };
        flight(
            &format!("R{n:03}"),
            AIRLINES[rng.gen_range(0..AIRLINES.len())],
            &departure,
            rng.gen_range(0..600u32) as f64,
            rng.gen_range(0..4),
        )
    }

    fn random_criteria(rng: &mut StdRng) -> FilterCriteria {
        let mut criteria = FilterCriteria::default();
        if rng.gen_bool(0.5) {
            criteria.max_price = Some(rng.gen_range(0..600u32) as f64);
        }
        if rng.gen_bool(0.5) {
            criteria.max_stops = Some(rng.gen_range(0..4));
        }
        if rng.gen_bool(0.5) {
            let picked: Vec<String> = AIRLINES
                .iter()
                .filter(|_| rng.gen_bool(0.4))
                .map(|a| a.to_string())
                .collect();
            criteria.preferred_airlines = Some(picked);
        }
        if rng.gen_bool(0.5) {
            let a = rng.gen_range(0..1440u16);
            let b = rng.gen_range(0..1440u16);
            let (start, end) = (a.min(b), a.max(b));
            criteria.departure_time_range = Some(DepartureWindow::new(
                ClockTime::new((start / 60) as u8, (start % 60) as u8).unwrap(),
                ClockTime::new((end / 60) as u8, (end % 60) as u8).unwrap(),
            ));
        }
        criteria
    }

    #[test]
    fn test_matches_reference_evaluation() {
        let mut rng = StdRng::seed_from_u64(0x5eed);

        for _ in 0..500 {
            let len = rng.gen_range(0..20);
            let flights: Vec<Flight> = (0..len).map(|n| random_flight(&mut rng, n)).collect();
            let criteria = random_criteria(&mut rng);

            let expected: Vec<Flight> = flights
                .iter()
                .filter(|f| reference_matches(f, &criteria))
                .cloned()
                .collect();

            assert_eq!(apply_filters(&flights, &criteria), expected, "criteria: {criteria:?}");
        }
    }
}
