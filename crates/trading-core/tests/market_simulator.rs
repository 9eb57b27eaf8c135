// crates/trading-core/tests/market_simulator.rs
use rand::rngs::StdRng;
use rand::SeedableRng;
use trading_core::config::default_catalog;
use trading_core::{
    InstrumentRegistry, InstrumentSpec, MarketConfig, MarketSimulator, Price, TradingEngine,
    TradingError,
};

fn floor() -> Price {
    Price::from_units(1)
}

#[test]
fn every_move_stays_within_five_percent_and_above_floor() {
    let config = MarketConfig {
        seed: Some(42),
        ..MarketConfig::default()
    };
    let mut engine = TradingEngine::from_config(&config).unwrap();

    for _ in 0..500 {
        let before: Vec<Price> = engine.market().iter().map(|s| s.price).collect();
        engine.tick();

        for (pre, snap) in before.iter().zip(engine.market()) {
            let pre_raw = pre.raw() as i128;
            let new_raw = snap.price.raw() as i128;
            assert!(new_raw * 100 >= pre_raw * 95, "{} fell more than 5%", snap.symbol);
            assert!(new_raw * 100 <= pre_raw * 105, "{} rose more than 5%", snap.symbol);
            assert!(snap.price >= floor());
            assert_eq!(snap.previous_price, *pre);
        }
    }
}

#[test]
fn cheap_instruments_never_drop_below_the_floor() {
    let specs = vec![
        InstrumentSpec::new("PENNY", "Penny Co.", 1.00),
        InstrumentSpec::new("DIME", "Dime Co.", 1.03),
    ];
    let mut registry = InstrumentRegistry::from_specs(&specs, floor()).unwrap();
    let mut simulator = MarketSimulator::seeded(3);

    for _ in 0..300 {
        simulator.tick(&mut registry);
        for instrument in registry.iter() {
            assert!(instrument.price() >= floor(), "{}", instrument.symbol());
        }
    }
}

#[test]
fn history_always_ends_with_current_price() {
    let mut registry = InstrumentRegistry::from_specs(&default_catalog(), floor()).unwrap();
    let mut simulator = MarketSimulator::seeded(11);

    for tick in 1..=25 {
        simulator.tick(&mut registry);
        for instrument in registry.iter() {
            let history = instrument.history();
            assert_eq!(history.len(), tick + 1);
            assert_eq!(history.last(), Some(&instrument.price()));
            assert_eq!(history[history.len() - 2], instrument.previous_price());
        }
    }
}

#[test]
fn same_seed_same_price_path() {
    let config = MarketConfig {
        seed: Some(99),
        ..MarketConfig::default()
    };
    let mut a = TradingEngine::from_config(&config).unwrap();
    let mut b = TradingEngine::from_config(&config).unwrap();

    for _ in 0..20 {
        a.tick();
        b.tick();
    }

    assert_eq!(a.market(), b.market());
    assert_eq!(
        a.registry().price_history("AAPL").unwrap(),
        b.registry().price_history("AAPL").unwrap()
    );
    assert_eq!(a.registry().price_history("AAPL").unwrap().len(), 21);
}

#[test]
fn zero_move_leaves_prices_unchanged_but_records_history() {
    let mut registry = InstrumentRegistry::from_specs(&default_catalog(), floor()).unwrap();
    let mut simulator = MarketSimulator::with_rng(StdRng::seed_from_u64(1), 0.0, floor());

    simulator.tick(&mut registry);
    simulator.tick(&mut registry);

    let aapl = registry.get("AAPL").unwrap();
    assert_eq!(aapl.price(), Price::from_units(150));
    assert_eq!(aapl.history(), &[Price::from_units(150); 3][..]);
    assert_eq!(registry.price_change("AAPL").unwrap().delta, Price::ZERO);
}

#[test]
fn registry_update_and_change() {
    let mut registry = InstrumentRegistry::from_specs(&default_catalog(), floor()).unwrap();

    registry.update_price("AAPL", Price::from_units(165)).unwrap();

    let change = registry.price_change("AAPL").unwrap();
    assert_eq!(change.delta, Price::from_units(15));
    assert!((change.percent - 10.0).abs() < 1e-9);
    assert_eq!(registry.price("AAPL").unwrap(), Price::from_units(165));
    assert_eq!(
        registry.update_price("NOPE", Price::from_units(1)),
        Err(TradingError::InstrumentNotFound("NOPE".to_string()))
    );

    let symbols: Vec<&str> = registry.symbols().collect();
    assert_eq!(
        symbols,
        ["AAPL", "GOOGL", "MSFT", "TSLA", "AMZN", "NVDA", "META", "NFLX"]
    );
}

#[test]
fn catalog_rejects_bad_listings() {
    let below_floor = vec![InstrumentSpec::new("CHEAP", "Cheap Co.", 0.5)];
    assert!(matches!(
        InstrumentRegistry::from_specs(&below_floor, floor()),
        Err(TradingError::InvalidPrice { .. })
    ));

    let duplicate = vec![
        InstrumentSpec::new("AAPL", "Apple Inc.", 150.0),
        InstrumentSpec::new("aapl", "Apple again", 151.0),
    ];
    assert_eq!(
        InstrumentRegistry::from_specs(&duplicate, floor()).unwrap_err(),
        TradingError::DuplicateInstrument("AAPL".to_string())
    );
}

#[test]
fn non_finite_or_oversized_moves_are_rejected() {
    for max_move_pct in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY, -1.0, 100.0] {
        let config = MarketConfig {
            max_move_pct,
            seed: Some(1),
            ..MarketConfig::default()
        };

        assert!(
            matches!(config.validate(), Err(TradingError::InvalidConfig(_))),
            "{} accepted",
            max_move_pct
        );
        assert!(matches!(
            TradingEngine::from_config(&config),
            Err(TradingError::InvalidConfig(_))
        ));
        assert!(matches!(
            MarketSimulator::from_config(&config),
            Err(TradingError::InvalidConfig(_))
        ));
    }

    let widest = MarketConfig {
        max_move_pct: 99.0,
        seed: Some(1),
        ..MarketConfig::default()
    };
    let mut engine = TradingEngine::from_config(&widest).unwrap();
    for _ in 0..50 {
        engine.tick();
    }
    assert!(engine.market().iter().all(|s| s.price >= floor()));
}

#[test]
fn non_positive_floor_is_rejected() {
    let negative = MarketConfig {
        price_floor: -10.0,
        instruments: vec![InstrumentSpec::new("NEG", "Negative Co.", -5.0)],
        ..MarketConfig::default()
    };
    assert!(matches!(
        TradingEngine::from_config(&negative),
        Err(TradingError::InvalidConfig(_))
    ));

    for price_floor in [0.0, 0.00001, f64::NAN] {
        let config = MarketConfig {
            price_floor,
            ..MarketConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(TradingError::InvalidConfig(_))
        ));
    }

    let free = vec![InstrumentSpec::new("FREE", "Free Co.", 0.0)];
    assert!(matches!(
        InstrumentRegistry::from_specs(&free, Price::ZERO),
        Err(TradingError::InvalidConfig(_))
    ));
}
