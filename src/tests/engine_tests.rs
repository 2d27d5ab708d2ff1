// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use crate::engine::{allocate, enforce_min_profit, Engine};
use crate::error::MarketError;
use crate::types::{MarketParams, Seller};

fn twin_sellers() -> Vec<Seller> {
    vec![
        Seller::new(100.0, 1.0, 10.0, 0.0),
        Seller::new(100.0, 1.0, 10.0, 0.0),
    ]
}

fn mixed_sellers() -> Vec<Seller> {
    vec![
        Seller::new(60.0, 0.9, 8.0, 0.0),
        Seller::new(80.0, 1.2, 11.0, 0.0),
        Seller::new(40.0, 0.7, 9.5, 0.0),
    ]
}

#[test]
fn test_two_seller_scenario_converges() {
    let sellers = twin_sellers();
    let params = MarketParams::new(100.0, 0.5, 0.2);
    let engine = Engine::new(&sellers, params).unwrap();

    let outcome = engine.run(&[12.0, 12.0], None).unwrap();

    assert!(outcome.iterations < params.max_iterations);
    for price in &outcome.final_prices {
        assert!(*price >= 10.0 && *price <= 15.0, "price {} out of range", price);
    }
    let total: f64 = outcome.final_shares.iter().sum();
    assert!(total <= 100.0 + 1e-9);
    assert!(outcome.final_shares.iter().all(|s| *s <= 100.0));

    // Both sellers climb to the ceiling and stop there.
    assert_eq!(outcome.iterations, 3);
    assert!(outcome.final_prices.iter().all(|p| (p - 15.0).abs() < 1e-9));
    assert!(outcome.final_shares.iter().all(|s| (s - 50.0).abs() < 1e-9));
}

#[test]
fn test_history_length_matches_iterations() {
    let sellers = mixed_sellers();
    let params = MarketParams::new(120.0, 0.4, 0.1);
    let outcome = Engine::new(&sellers, params)
        .unwrap()
        .run(&[9.0, 12.0, 10.0], None)
        .unwrap();

    let expected = outcome.iterations as usize + 1;
    assert_eq!(outcome.price_history.len(), expected);
    assert_eq!(outcome.share_history.len(), expected);
    assert_eq!(outcome.price_history[0], vec![9.0, 12.0, 10.0]);
    assert!(outcome.share_history[0].iter().all(|s| *s == 0.0));
    assert_eq!(outcome.price_history.last().unwrap(), &outcome.final_prices);
}

#[test]
fn test_constraints_hold_every_iteration() {
    let sellers = mixed_sellers();
    let params = MarketParams::new(150.0, 0.6, 0.15);
    let outcome = Engine::new(&sellers, params)
        .unwrap()
        .run(&[8.5, 12.0, 10.0], None)
        .unwrap();

    for (prices, shares) in outcome.price_history.iter().zip(&outcome.share_history) {
        for (i, seller) in sellers.iter().enumerate() {
            assert!(shares[i] <= seller.capacity + 1e-9);
            assert!(prices[i] >= seller.production_cost - 1e-9);
            assert!(prices[i] <= seller.price_ceiling(params.max_profit_percentage) + 1e-9);
        }
        assert!(shares.iter().sum::<f64>() <= params.buyer_demand + 1e-9);
    }

    for pair in outcome.price_history.windows(2) {
        for i in 0..sellers.len() {
            let limit = pair[0][i] * params.max_change_percentage;
            assert!((pair[1][i] - pair[0][i]).abs() <= limit + 1e-9);
        }
    }
}

#[test]
fn test_max_iterations_bounds_run() {
    let sellers = mixed_sellers();
    let params = MarketParams::new(150.0, 0.6, 0.15).with_max_iterations(1);
    let outcome = Engine::new(&sellers, params)
        .unwrap()
        .run(&[8.5, 12.0, 10.0], None)
        .unwrap();

    assert_eq!(outcome.iterations, 1);
    assert_eq!(outcome.price_history.len(), 2);
}

#[test]
fn test_capacity_caps_share() {
    let sellers = vec![
        Seller::new(10.0, 5.0, 1.0, 0.0),
        Seller::new(500.0, 1.0, 1.0, 0.0),
    ];
    let allocation = allocate(&sellers, &[1.0, 1.0], 100.0);

    // Seller 0 would get 100 * 50/550 ≈ 9.09 (< 10), raise demand to force the cap.
    assert!(allocation.shares[0] <= 10.0);
    let heavy = allocate(&sellers, &[1.0, 1.0], 1000.0);
    assert_eq!(heavy.shares[0], 10.0);
    assert!((heavy.weights.iter().sum::<f64>() - 1.0).abs() < 1e-12);
}

#[test]
fn test_zero_utility_falls_back_to_uniform() {
    let sellers = vec![
        Seller::new(100.0, 0.0, 10.0, 0.0),
        Seller::new(100.0, 0.0, 10.0, 0.0),
        Seller::new(100.0, 0.0, 10.0, 0.0),
        Seller::new(100.0, 0.0, 10.0, 0.0),
    ];
    let allocation = allocate(&sellers, &[12.0, 12.0, 12.0, 12.0], 80.0);

    assert!(allocation.weights.iter().all(|w| (w - 0.25).abs() < 1e-12));
    assert!(allocation.shares.iter().all(|s| (s - 20.0).abs() < 1e-12));
}

#[test]
fn test_min_profit_raised_in_increments() {
    let seller = Seller::new(100.0, 1.0, 10.0, 200.0);
    // Profit at 10.5 is 50; 12.0 is the first increment reaching 200.
    let price = enforce_min_profit(&seller, 10.5, 100.0, 15.0);
    assert!((price - 12.0).abs() < 1e-12);
}

#[test]
fn test_min_profit_capped_at_ceiling() {
    // Floor needs a price of 20, the ceiling is 15: settles below the floor.
    let seller = Seller::new(100.0, 1.0, 10.0, 1000.0);
    let price = enforce_min_profit(&seller, 11.0, 100.0, 15.0);
    assert_eq!(price, 15.0);
    assert!(seller.profit(price, 100.0) < seller.min_profit);
}

#[test]
fn test_min_profit_with_zero_share_terminates() {
    // No share means no profit can ever be earned; the guard or ceiling stops the loop.
    let seller = Seller::new(100.0, 1.0, 10.0, 5.0);
    let price = enforce_min_profit(&seller, 10.0, 0.0, 15.0);
    assert_eq!(price, 15.0);
}

#[test]
fn test_moderator_price_clamped_into_range() {
    let mut sellers = twin_sellers();
    sellers.push(Seller::new(100.0, 0.99, 10.0, 0.0));
    let params = MarketParams::new(100.0, 0.5, 0.2);
    let engine = Engine::new(&sellers, params).unwrap();

    let below = engine.run(&[15.0, 15.0, 3.0], Some(3.0)).unwrap();
    assert_eq!(below.price_history[0][2], 10.0);

    let above = engine.run(&[15.0, 15.0, 30.0], Some(30.0)).unwrap();
    assert_eq!(above.price_history[0][2], 15.0);
}

#[test]
fn test_weighted_utility_returned() {
    let sellers = mixed_sellers();
    let params = MarketParams::new(120.0, 0.4, 0.1);
    let outcome = Engine::new(&sellers, params)
        .unwrap()
        .run(&[9.0, 12.0, 10.0], None)
        .unwrap();

    assert_eq!(outcome.weighted_utility.len(), 3);
    assert!((outcome.weighted_utility.iter().sum::<f64>() - 1.0).abs() < 1e-9);
}

#[test]
fn test_stagnation_window() {
    assert_eq!(MarketParams::new(1.0, 0.1, 0.1).stagnation_window(), 50);
    assert_eq!(
        MarketParams::new(1.0, 0.1, 0.1).with_max_iterations(100).stagnation_window(),
        10
    );
}

#[test]
fn test_invalid_engine_inputs() {
    let params = MarketParams::new(100.0, 0.5, 0.2);
    assert_eq!(Engine::new(&[], params).err(), Some(MarketError::NoSellers));

    let sellers = twin_sellers();
    assert!(matches!(
        Engine::new(&sellers, MarketParams::new(0.0, 0.5, 0.2)),
        Err(MarketError::OutOfRange { field: "buyer_demand", .. })
    ));

    let engine = Engine::new(&sellers, params).unwrap();
    assert!(matches!(
        engine.run(&[12.0], None),
        Err(MarketError::LengthMismatch { expected: 2, found: 1, .. })
    ));
}

#[test]
fn test_run_stops_at_first_quiet_iteration() {
    let sellers = mixed_sellers();
    let params = MarketParams::new(120.0, 0.4, 0.1);
    let outcome = Engine::new(&sellers, params)
        .unwrap()
        .run(&[9.0, 12.0, 10.0], None)
        .unwrap();

    // Every step before the last moved some price by more than the tolerance,
    // so the stagnation counter never accumulates.
    let quiet: Vec<bool> = outcome
        .price_history
        .windows(2)
        .map(|pair| {
            pair[1]
                .iter()
                .zip(&pair[0])
                .all(|(now, before)| (now - before).abs() <= params.tolerance)
        })
        .collect();
    let (last, earlier) = quiet.split_last().unwrap();
    assert!(earlier.iter().all(|q| !q));
    if outcome.iterations < params.max_iterations {
        assert!(*last);
    }
}
