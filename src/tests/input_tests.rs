// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use crate::error::MarketError;
use crate::input::MarketInput;

fn sample() -> MarketInput {
    MarketInput {
        capacities: vec![100.0, 100.0],
        qualities: vec![1.0, 1.0],
        production_costs: vec![10.0, 10.0],
        buyer_demand: 100.0,
        max_profit_percentage: 0.5,
        min_profits: vec![0.0, 0.0],
        max_change_percentage: 0.2,
        supply_coefficient: 1.0,
        initial_prices: Some(vec![12.0, 12.0]),
    }
}

#[test]
fn test_valid_input() {
    let market = sample().validate().unwrap();
    assert_eq!(market.sellers.len(), 2);
    assert_eq!(market.initial_prices, vec![12.0, 12.0]);
    assert_eq!(market.params.buyer_demand, 100.0);
    assert_eq!(market.params.tolerance, 0.01);
    assert_eq!(market.params.max_iterations, 1000);
}

#[test]
fn test_default_initial_prices_are_midpoints() {
    let mut input = sample();
    input.initial_prices = None;
    let market = input.validate().unwrap();
    assert_eq!(market.initial_prices, vec![12.5, 12.5]);
}

#[test]
fn test_json_document_parses() {
    let doc = r#"{
        "capacities": [100, 100],
        "qualities": [1, 1],
        "production_costs": [10, 10],
        "buyer_demand": 100,
        "max_profit_percentage": 0.5,
        "min_profits": [0, 0],
        "max_change_percentage": 0.2,
        "supply_coefficient": 1.0
    }"#;
    let input: MarketInput = serde_json::from_str(doc).unwrap();
    assert!(input.initial_prices.is_none());
    assert!(input.validate().is_ok());
}

#[test]
fn test_capacity_below_minimum_rejected() {
    let mut input = sample();
    // 100 / (0.5 * 2) = 100 minimum.
    input.supply_coefficient = 0.5;
    input.capacities = vec![99.0, 150.0];
    assert!(matches!(
        input.validate(),
        Err(MarketError::SellerOutOfRange { seller: 0, field: "capacity", .. })
    ));
}

#[test]
fn test_supply_coefficient_bounds() {
    let mut input = sample();
    input.supply_coefficient = 0.1;
    assert!(matches!(
        input.validate(),
        Err(MarketError::OutOfRange { field: "supply_coefficient", .. })
    ));
}

#[test]
fn test_min_profit_upper_bound() {
    let mut input = sample();
    // Cap is 100 * 10 * 0.5 = 500.
    input.min_profits = vec![0.0, 500.5];
    assert!(matches!(
        input.validate(),
        Err(MarketError::SellerOutOfRange { seller: 1, field: "min_profit", .. })
    ));
}

#[test]
fn test_initial_price_out_of_range() {
    let mut input = sample();
    input.initial_prices = Some(vec![9.0, 12.0]);
    assert!(matches!(
        input.validate(),
        Err(MarketError::SellerOutOfRange { seller: 0, field: "initial_price", .. })
    ));
}

#[test]
fn test_length_mismatch_and_empty() {
    let mut input = sample();
    input.qualities = vec![1.0];
    assert_eq!(
        input.validate(),
        Err(MarketError::LengthMismatch {
            field: "qualities",
            expected: 2,
            found: 1
        })
    );

    let empty = MarketInput {
        capacities: Vec::new(),
        ..sample()
    };
    assert_eq!(empty.validate(), Err(MarketError::NoSellers));
}

#[test]
fn test_percentages_bounded() {
    let mut input = sample();
    input.max_change_percentage = 1.5;
    assert!(matches!(
        input.validate(),
        Err(MarketError::OutOfRange { field: "max_change_percentage", .. })
    ));
}
