use pricewatch::config::Config;
use pricewatch::fetcher::parse::normalize_price;
use pricewatch::monitor::{AlertState, Evaluation};

/// Integration tests for the alerting state machine and price parsing.
/// These run the same decision path a live monitor cycle takes, minus the
/// network and SMTP edges.

fn drive(state: &mut AlertState, observations: &[Option<f64>]) -> Vec<f64> {
    let mut alerts = Vec::new();
    for &observed in observations {
        if state.evaluate(observed) == Evaluation::Alert {
            let price = observed.expect("Alert implies an observed price");
            state.record_alert(price);
            alerts.push(price);
        }
    }
    alerts
}

#[test]
fn test_price_drop_sequence_alerts_on_each_new_minimum() {
    // threshold 50.00, prices [60, 45, 45, 40, 42, 38] -> alerts at 45, 40, 38
    let mut state = AlertState::new(50.0);
    let observations = [60.0, 45.0, 45.0, 40.0, 42.0, 38.0].map(Some);
    assert_eq!(drive(&mut state, &observations), vec![45.0, 40.0, 38.0]);
}

#[test]
fn test_unavailable_cycles_are_harmless() {
    // Three failed fetches, then a price just under threshold: one alert.
    let mut state = AlertState::new(50.0);
    let observations = [None, None, None, Some(49.99)];
    assert_eq!(drive(&mut state, &observations), vec![49.99]);
}

#[test]
fn test_threshold_boundary_is_inclusive() {
    let mut state = AlertState::new(50.0);
    assert_eq!(drive(&mut state, &[Some(50.0)]), vec![50.0]);
}

#[test]
fn test_recrossing_threshold_without_new_minimum_stays_quiet() {
    let mut state = AlertState::new(50.0);
    let observations = [Some(45.0), Some(70.0), None, Some(45.0), Some(46.0)];
    assert_eq!(drive(&mut state, &observations), vec![45.0]);
}

#[test]
fn test_scraped_price_strings_feed_the_state_machine() {
    // End-to-end over the parsing step: raw scraped strings in, alerts out.
    let mut state = AlertState::new(1300.0);
    let scraped = ["$1,349.00", "$1,299.00", "garbage", "$1,299.00", "$1,249.50"];
    let observations: Vec<Option<f64>> =
        scraped.iter().map(|s| normalize_price(s)).collect();
    assert_eq!(drive(&mut state, &observations), vec![1299.0, 1249.5]);
}

#[test]
fn test_config_threshold_wires_into_state() {
    let config: Config = toml::from_str(
        r#"
        [product]
        url = "https://shop.example.com/item/42"

        [request]
        user_agent = "pricewatch"

        [selector]
        price_css_selector = "span.price"

        [alert]
        price_threshold = 25.0

        [settings]
        check_interval_seconds = 300

        [email]
        smtp_server = "smtp.example.com"
        smtp_port = 587
        email_address = "alerts@example.com"
        email_password = "secret"
        to_address = "me@example.com"
        "#,
    )
    .unwrap();

    let state = AlertState::new(config.alert.price_threshold);
    assert_eq!(state.evaluate(Some(25.01)), Evaluation::AboveThreshold);
    assert_eq!(state.evaluate(Some(25.0)), Evaluation::Alert);
}
