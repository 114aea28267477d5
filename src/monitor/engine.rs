use anyhow::Result;
use tokio::signal;
use tokio::time::sleep;

use crate::alerts::EmailAlerter;
use crate::config::{Config, SendFailurePolicy};
use crate::fetcher::PriceFetcher;

/// Outcome of evaluating one observed price against the alert state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Evaluation {
    /// No usable price this cycle.
    Unavailable,
    /// Price is above the threshold.
    AboveThreshold,
    /// Price is at or below the threshold but not a new low since the
    /// last alert.
    NoNewDrop,
    /// Price qualifies for an alert.
    Alert,
}

/// The monitor's only cross-cycle state: the threshold and the lowest price
/// an alert has been successfully sent for.
#[derive(Debug, Clone)]
pub struct AlertState {
    threshold: f64,
    last_alerted: Option<f64>,
}

impl AlertState {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            last_alerted: None,
        }
    }

    /// Pure decision step. Alerts require the price to be at or below the
    /// threshold (inclusive) and strictly below the last alerted price, so
    /// an unchanged or recovering price never re-alerts.
    pub fn evaluate(&self, observed: Option<f64>) -> Evaluation {
        let Some(price) = observed else {
            return Evaluation::Unavailable;
        };
        if price > self.threshold {
            return Evaluation::AboveThreshold;
        }
        match self.last_alerted {
            Some(last) if price >= last => Evaluation::NoNewDrop,
            _ => Evaluation::Alert,
        }
    }

    /// Record a successfully dispatched alert. Only called after the email
    /// went out, so a failed send leaves the state unchanged and the next
    /// qualifying cycle tries again.
    pub fn record_alert(&mut self, price: f64) {
        self.last_alerted = Some(price);
    }

    pub fn last_alerted(&self) -> Option<f64> {
        self.last_alerted
    }
}

/// Orchestrates fetch -> evaluate -> alert -> sleep until Ctrl-C.
pub struct Monitor {
    fetcher: PriceFetcher,
    alerter: EmailAlerter,
    state: AlertState,
    config: Config,
}

impl Monitor {
    pub fn new(config: Config) -> Result<Self> {
        let fetcher = PriceFetcher::new(&config)?;
        let alerter = EmailAlerter::new(&config)?;
        let state = AlertState::new(config.alert.price_threshold);

        Ok(Self {
            fetcher,
            alerter,
            state,
            config,
        })
    }

    /// Run the monitor until Ctrl-C. The inter-cycle sleep is the
    /// cancellation point; a cycle in progress finishes first.
    pub async fn run(&mut self) -> Result<()> {
        println!(
            "Watching {} (threshold {}, every {}s)",
            self.config.product.url,
            self.config.alert.price_threshold,
            self.config.settings.check_interval_seconds
        );

        let ctrl_c = signal::ctrl_c();
        tokio::pin!(ctrl_c);

        loop {
            self.cycle().await?;

            tokio::select! {
                _ = sleep(self.config.check_interval()) => {}
                _ = &mut ctrl_c => {
                    println!("Shutting down.");
                    return Ok(());
                }
            }
        }
    }

    async fn cycle(&mut self) -> Result<()> {
        let Some(price) = self.fetcher.fetch().await else {
            println!("Failed to retrieve price.");
            return Ok(());
        };

        println!("Current price: {price}");

        match self.state.evaluate(Some(price)) {
            Evaluation::Unavailable => unreachable!("price is present"),
            Evaluation::AboveThreshold => println!("Price is above threshold."),
            Evaluation::NoNewDrop => {
                println!("Price is below threshold but no drop since last alert.")
            }
            Evaluation::Alert => {
                println!("Price threshold met, sending alert email...");
                match self.alerter.send(price).await {
                    Ok(()) => self.state.record_alert(price),
                    Err(e) => match self.config.alert.on_send_failure {
                        SendFailurePolicy::Fatal => return Err(e),
                        SendFailurePolicy::Continue => {
                            eprintln!("Warning: failed to send alert email: {e:#}");
                        }
                    },
                }
            }
        }

        Ok(())
    }
}
