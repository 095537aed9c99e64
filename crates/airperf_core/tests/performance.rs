use airperf_core::{
    Aircraft, AircraftDataStore, AircraftId, AircraftPerformanceData, AircraftPerformanceSnapshot,
    AircraftType, EnduranceRequest, InMemoryAircraftStore, PerformanceCalculator,
    PerformanceError, RangeRequest, RepoResult,
};
use regex::Regex;
use std::cell::Cell;

fn snapshot(
    id: AircraftId,
    fuel_consumption: f64,
    cruise_speed: f64,
) -> AircraftPerformanceSnapshot {
    AircraftPerformanceSnapshot {
        aircraft_id: id,
        name: "C-152".to_string(),
        performance: AircraftPerformanceData {
            fuel_consumption,
            ceiling: 2800.0,
            weight: 750.0,
            fuel: 120.0,
            take_off_weight: 870.0,
            max_speed: 270.0,
            cruise_speed,
        },
    }
}

fn store_with(
    snapshots: impl IntoIterator<Item = AircraftPerformanceSnapshot>,
) -> InMemoryAircraftStore {
    let mut store = InMemoryAircraftStore::new();
    for snapshot in snapshots {
        store.insert(snapshot);
    }
    store
}

fn c152_calculator() -> PerformanceCalculator<InMemoryAircraftStore> {
    PerformanceCalculator::new(store_with([snapshot(100, 15.0, 190.0)]))
}

/// Store wrapper that records how often it was queried.
struct CountingStore {
    inner: InMemoryAircraftStore,
    calls: Cell<usize>,
}

impl AircraftDataStore for CountingStore {
    fn resolve(&self, aircraft_id: AircraftId) -> RepoResult<AircraftPerformanceSnapshot> {
        self.calls.set(self.calls.get() + 1);
        self.inner.resolve(aircraft_id)
    }
}

fn endurance(calculator: &PerformanceCalculator<InMemoryAircraftStore>, fuel: f64) -> String {
    calculator
        .calculate_endurance(&EnduranceRequest {
            aircraft_id: 100,
            fuel,
        })
        .unwrap()
        .endurance
}

fn range(
    calculator: &PerformanceCalculator<InMemoryAircraftStore>,
    wind_speed: f64,
    fuel: f64,
) -> f64 {
    calculator
        .calculate_range(&RangeRequest {
            aircraft_id: 100,
            wind_speed,
            fuel,
        })
        .unwrap()
        .range
}

#[test]
fn endurance_for_reference_aircraft_is_four_hours() {
    let result = c152_calculator()
        .calculate_endurance(&EnduranceRequest {
            aircraft_id: 100,
            fuel: 60.0,
        })
        .unwrap();

    assert_eq!(result.name, "C-152");
    assert_eq!(result.endurance, "04:00");
}

#[test]
fn range_for_reference_aircraft_is_eight_hundred() {
    let result = c152_calculator()
        .calculate_range(&RangeRequest {
            aircraft_id: 100,
            wind_speed: 10.0,
            fuel: 60.0,
        })
        .unwrap();

    assert_eq!(result.name, "C-152");
    assert_eq!(result.range, 800.0);
}

#[test]
fn zero_fuel_gives_zero_endurance_and_range() {
    let calculator = c152_calculator();
    assert_eq!(endurance(&calculator, 0.0), "00:00");
    assert_eq!(range(&calculator, 25.0, 0.0), 0.0);
}

#[test]
fn endurance_rounds_minutes() {
    let calculator = PerformanceCalculator::new(store_with([snapshot(100, 20.0, 190.0)]));
    assert_eq!(endurance(&calculator, 16.9), "00:51");
}

#[test]
fn endurance_minute_rounding_carries_into_hours() {
    let calculator = PerformanceCalculator::new(store_with([snapshot(100, 1.0, 190.0)]));
    assert_eq!(endurance(&calculator, 1.995), "02:00");
}

#[test]
fn endurance_hours_grow_past_two_digits() {
    let calculator = PerformanceCalculator::new(store_with([snapshot(100, 1.0, 190.0)]));
    assert_eq!(endurance(&calculator, 123.25), "123:15");
}

#[test]
fn endurance_keeps_every_hour_digit_for_very_long_flights() {
    let calculator = PerformanceCalculator::new(store_with([snapshot(100, 1.0, 190.0)]));
    assert_eq!(endurance(&calculator, 1e15), "1000000000000000:00");
}

#[test]
fn flight_time_beyond_u64_hours_is_invalid_input() {
    let calculator = PerformanceCalculator::new(store_with([snapshot(100, 1.0, 190.0)]));
    let err = calculator
        .calculate_endurance(&EnduranceRequest {
            aircraft_id: 100,
            fuel: 1e20,
        })
        .unwrap_err();
    assert!(matches!(err, PerformanceError::InvalidInput(_)));

    let err = calculator
        .calculate_range(&RangeRequest {
            aircraft_id: 100,
            wind_speed: 0.0,
            fuel: 1e20,
        })
        .unwrap_err();
    assert!(matches!(err, PerformanceError::InvalidInput(_)));
}

#[test]
fn infinite_flight_hours_never_produce_nan_range() {
    let calculator = PerformanceCalculator::new(store_with([snapshot(100, 1e-300, 100.0)]));

    let err = calculator
        .calculate_range(&RangeRequest {
            aircraft_id: 100,
            wind_speed: -100.0,
            fuel: 1e10,
        })
        .unwrap_err();
    assert_eq!(err.code(), "invalid_input");

    let err = calculator
        .calculate_endurance(&EnduranceRequest {
            aircraft_id: 100,
            fuel: 1e10,
        })
        .unwrap_err();
    assert_eq!(err.code(), "invalid_input");
}

#[test]
fn endurance_always_matches_wire_pattern() {
    let pattern = Regex::new(r"^\d{2,}:\d{2}$").unwrap();
    let calculator = PerformanceCalculator::new(store_with([snapshot(100, 7.0, 190.0)]));
    for step in 0..500 {
        let fuel = f64::from(step) * 1.37;
        let value = endurance(&calculator, fuel);
        assert!(pattern.is_match(&value), "`{value}` for fuel {fuel}");
    }
}

#[test]
fn range_is_linear_in_fuel() {
    let calculator = c152_calculator();
    let ratio = range(&calculator, -30.0, 10.0) / 10.0;
    for fuel in [1.0, 7.5, 60.0, 120.0, 999.0] {
        let observed = range(&calculator, -30.0, fuel) / fuel;
        assert!((observed - ratio).abs() < 1e-9, "fuel {fuel}: {observed} != {ratio}");
    }
}

#[test]
fn range_increases_strictly_with_wind_speed() {
    let calculator = c152_calculator();
    let winds = [-250.0, -190.0, -50.0, 0.0, 0.5, 40.0, 300.0];
    let ranges: Vec<f64> = winds.iter().map(|wind| range(&calculator, *wind, 60.0)).collect();
    for pair in ranges.windows(2) {
        assert!(pair[0] < pair[1], "{pair:?}");
    }
}

#[test]
fn headwind_stronger_than_cruise_speed_yields_negative_range() {
    let calculator = c152_calculator();
    assert_eq!(range(&calculator, -200.0, 60.0), -40.0);
    assert_eq!(range(&calculator, -190.0, 60.0), 0.0);
}

#[test]
fn missing_aircraft_is_not_found_for_both_operations() {
    let calculator = c152_calculator();

    let err = calculator
        .calculate_endurance(&EnduranceRequest {
            aircraft_id: 999,
            fuel: 60.0,
        })
        .unwrap_err();
    assert!(matches!(err, PerformanceError::NotFound(999)));

    let err = calculator
        .calculate_range(&RangeRequest {
            aircraft_id: 999,
            wind_speed: 0.0,
            fuel: 60.0,
        })
        .unwrap_err();
    assert!(matches!(err, PerformanceError::NotFound(999)));
    assert_eq!(err.code(), "not_found");
}

#[test]
fn zero_fuel_consumption_is_invalid_aircraft_data() {
    let calculator = PerformanceCalculator::new(store_with([snapshot(100, 0.0, 190.0)]));

    let err = calculator
        .calculate_endurance(&EnduranceRequest {
            aircraft_id: 100,
            fuel: 60.0,
        })
        .unwrap_err();
    assert!(matches!(
        err,
        PerformanceError::InvalidAircraftData { aircraft_id: 100, .. }
    ));

    let err = calculator
        .calculate_range(&RangeRequest {
            aircraft_id: 100,
            wind_speed: 10.0,
            fuel: 0.0,
        })
        .unwrap_err();
    assert!(matches!(
        err,
        PerformanceError::InvalidAircraftData { aircraft_id: 100, .. }
    ));
}

#[test]
fn negative_fuel_consumption_is_invalid_aircraft_data() {
    let calculator = PerformanceCalculator::new(store_with([snapshot(100, -3.0, 190.0)]));
    let err = calculator
        .calculate_range(&RangeRequest {
            aircraft_id: 100,
            wind_speed: 10.0,
            fuel: 60.0,
        })
        .unwrap_err();
    assert_eq!(err.code(), "invalid_aircraft_data");
}

#[test]
fn non_finite_fuel_consumption_is_invalid_aircraft_data() {
    let calculator = PerformanceCalculator::new(store_with([
        snapshot(100, f64::INFINITY, 190.0),
        snapshot(101, f64::NAN, 190.0),
    ]));

    for aircraft_id in [100, 101] {
        let err = calculator
            .calculate_endurance(&EnduranceRequest {
                aircraft_id,
                fuel: 60.0,
            })
            .unwrap_err();
        assert_eq!(err.code(), "invalid_aircraft_data");

        let err = calculator
            .calculate_range(&RangeRequest {
                aircraft_id,
                wind_speed: 10.0,
                fuel: 60.0,
            })
            .unwrap_err();
        assert_eq!(err.code(), "invalid_aircraft_data");
    }
}

#[test]
fn invalid_input_never_queries_the_store() {
    let store = CountingStore {
        inner: store_with([snapshot(100, 15.0, 190.0)]),
        calls: Cell::new(0),
    };
    let calculator = PerformanceCalculator::new(&store);

    let rejected = [
        calculator
            .calculate_endurance(&EnduranceRequest {
                aircraft_id: 100,
                fuel: -1.0,
            })
            .unwrap_err(),
        calculator
            .calculate_range(&RangeRequest {
                aircraft_id: 100,
                wind_speed: 0.0,
                fuel: -0.5,
            })
            .unwrap_err(),
        calculator
            .calculate_endurance(&EnduranceRequest {
                aircraft_id: 0,
                fuel: 60.0,
            })
            .unwrap_err(),
        calculator
            .calculate_range(&RangeRequest {
                aircraft_id: -4,
                wind_speed: 0.0,
                fuel: 60.0,
            })
            .unwrap_err(),
        calculator
            .calculate_range(&RangeRequest {
                aircraft_id: 100,
                wind_speed: f64::NAN,
                fuel: 60.0,
            })
            .unwrap_err(),
        calculator
            .calculate_endurance(&EnduranceRequest {
                aircraft_id: 100,
                fuel: f64::INFINITY,
            })
            .unwrap_err(),
    ];

    for err in &rejected {
        assert!(matches!(err, PerformanceError::InvalidInput(_)), "{err}");
    }
    assert_eq!(store.calls.get(), 0);

    calculator
        .calculate_endurance(&EnduranceRequest {
            aircraft_id: 100,
            fuel: 60.0,
        })
        .unwrap();
    assert_eq!(store.calls.get(), 1);
}

#[test]
fn calculator_can_be_shared_across_threads() {
    let calculator = c152_calculator();
    std::thread::scope(|scope| {
        for wind in 0..4 {
            let calculator = &calculator;
            scope.spawn(move || {
                let result = calculator
                    .calculate_range(&RangeRequest {
                        aircraft_id: 100,
                        wind_speed: f64::from(wind) * 10.0,
                        fuel: 60.0,
                    })
                    .unwrap();
                assert_eq!(result.range, 4.0 * (190.0 + f64::from(wind) * 10.0));
            });
        }
    });
}

#[test]
fn results_serialize_with_wire_field_names() {
    let calculator = c152_calculator();
    let range = calculator
        .calculate_range(&RangeRequest {
            aircraft_id: 100,
            wind_speed: 10.0,
            fuel: 60.0,
        })
        .unwrap();
    let json = serde_json::to_value(&range).unwrap();
    assert_eq!(json, serde_json::json!({ "name": "C-152", "range": 800.0 }));

    let request: EnduranceRequest =
        serde_json::from_str(r#"{ "aircraft_id": 100, "fuel": 60.0 }"#).unwrap();
    let endurance = calculator.calculate_endurance(&request).unwrap();
    let json = serde_json::to_value(&endurance).unwrap();
    assert_eq!(json, serde_json::json!({ "name": "C-152", "endurance": "04:00" }));
}

#[test]
fn in_memory_store_collects_aircraft_records() {
    let store: InMemoryAircraftStore = [100, 200]
        .into_iter()
        .map(|id| Aircraft {
            id,
            name: format!("Trainer {id}"),
            manufacturer: "Piper".to_string(),
            kind: AircraftType::Trainer,
            first_flight: "1960-01-14".to_string(),
            performance: snapshot(id, 10.0, 100.0).performance,
        })
        .collect();
    assert_eq!(store.len(), 2);

    let calculator = PerformanceCalculator::new(store);
    let result = calculator
        .calculate_endurance(&EnduranceRequest {
            aircraft_id: 200,
            fuel: 25.0,
        })
        .unwrap();
    assert_eq!(result.name, "Trainer 200");
    assert_eq!(result.endurance, "02:30");
}
