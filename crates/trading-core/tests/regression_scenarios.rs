// crates/trading-core/tests/regression_scenarios.rs
use trading_core::{MarketConfig, TradingDesk};
use trading_protocol::{format_response, parse_command_line};

const SESSION: &str = include_str!("data/session.txt");

fn desk() -> TradingDesk {
    let config = MarketConfig {
        seed: Some(2024),
        ..MarketConfig::default()
    };
    TradingDesk::from_config(&config).unwrap()
}

/// Trade lines carry a wall-clock timestamp in field 1; drop it.
fn without_timestamp(line: String) -> String {
    if !line.starts_with("T, ") {
        return line;
    }
    let mut fields: Vec<&str> = line.split(", ").collect();
    fields.remove(1);
    fields.join(", ")
}

fn replay(desk: &mut TradingDesk, script: &str) -> Vec<String> {
    let mut lines = Vec::new();
    for raw_line in script.lines() {
        if let Some(request) = parse_command_line(raw_line) {
            for out in desk.process_message(request) {
                lines.push(without_timestamp(format_response(&out)));
            }
        }
    }
    lines
}

#[test]
fn full_session_matches_reference_output() {
    let mut desk = desk();
    let actual = replay(&mut desk, SESSION);

    let expected = vec![
        "Q, AAPL, Apple Inc., 150.00, +0.00, +0.00%",
        "Q, GOOGL, Alphabet Inc., 2500.00, +0.00, +0.00%",
        "Q, MSFT, Microsoft Corp., 300.00, +0.00, +0.00%",
        "Q, TSLA, Tesla Inc., 800.00, +0.00, +0.00%",
        "Q, AMZN, Amazon.com Inc., 3200.00, +0.00, +0.00%",
        "Q, NVDA, NVIDIA Corp., 220.00, +0.00, +0.00%",
        "Q, META, Meta Platforms Inc., 320.00, +0.00, +0.00%",
        "Q, NFLX, Netflix Inc., 400.00, +0.00, +0.00%",
        "S, AAPL, 150.00",
        "R, alice, 1000.00",
        "E, username already exists: alice",
        "E, not logged in",
        "L, alice",
        "F, BUY, AAPL, 5, 150.00, 750.00, alice",
        "P, alice, 250.00, 750.00, 1000.00",
        "H, AAPL, 5, 150.00, 750.00",
        "F, SELL, AAPL, 5, 150.00, 750.00, alice",
        "P, alice, 1000.00, 0.00, 1000.00",
        "R, bob, 100.00",
        "L, bob",
        "E, insufficient funds: cost 2500.00, balance 100.00",
        "E, no holding in TSLA",
        "E, instrument not found: XYZ",
        "E, quantity must be positive, got 0",
        "T, BUY, AAPL, 5, 150.00, alice",
        "T, SELL, AAPL, 5, 150.00, alice",
        "T, SELL, AAPL, 5, 150.00, alice",
        "O, bob",
        "E, not logged in",
        "E, not logged in",
        "M, 8",
    ];

    assert_eq!(actual, expected);
    assert_eq!(desk.engine().log().len(), 2);
    assert!(desk.session().is_none());
}

#[test]
fn each_scenario_runs_on_a_fresh_desk() {
    let mut current_scenario = String::new();
    let mut scenario_lines = Vec::new();
    let mut scenarios = Vec::new();

    for line in SESSION.lines() {
        if line.starts_with("#name:") {
            if !scenario_lines.is_empty() {
                scenarios.push((current_scenario.clone(), scenario_lines.clone()));
            }
            current_scenario = line.to_string();
            scenario_lines.clear();
        } else if !line.starts_with('#') && !line.trim().is_empty() {
            scenario_lines.push(line.to_string());
        }
    }
    if !scenario_lines.is_empty() {
        scenarios.push((current_scenario, scenario_lines));
    }

    let expected_prefixes: [(&str, &[&str]); 5] = [
        ("#name: market view", &["Q", "Q", "Q", "Q", "Q", "Q", "Q", "Q", "S"][..]),
        ("#name: registration and login", &["R", "E", "E", "L"][..]),
        // Fresh desk: nobody is logged in yet.
        ("#name: round trip", &["E", "E", "E", "E"][..]),
        ("#name: rejections", &["R", "L", "E", "E", "E", "E"][..]),
        // Empty log, so both HISTORY requests print nothing.
        ("#name: history and logout", &["E", "E", "E", "M"][..]),
    ];
    assert_eq!(scenarios.len(), expected_prefixes.len());

    for ((name, lines), (expected_name, prefixes)) in scenarios.into_iter().zip(expected_prefixes) {
        assert_eq!(name, expected_name);

        let mut desk = desk();
        let outputs = replay(&mut desk, &lines.join("\n"));
        let actual: Vec<&str> = outputs
            .iter()
            .map(|line| line.split(", ").next().unwrap_or(""))
            .collect();

        assert_eq!(actual, prefixes, "{}", name);
        assert!(desk.engine().log().is_empty(), "{} traded", name);
    }
}
