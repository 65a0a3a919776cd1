use lazy_static::lazy_static;
use prometheus::{register_counter, register_counter_vec, Counter, CounterVec};

lazy_static! {
    /// Claim attempts by outcome: won, conflict, invalid, error.
    pub static ref CLAIMS_COUNTER: CounterVec = register_counter_vec!(
        "offer_claims_total",
        "Claim attempts by outcome",
        &["outcome"]
    ).expect("offer_claims_total registers once");

    pub static ref OFFERS_CREATED_COUNTER: Counter = register_counter!(
        "offers_created_total",
        "Offers posted"
    ).expect("offers_created_total registers once");
}

pub fn record_claim(outcome: &str) {
    CLAIMS_COUNTER.with_label_values(&[outcome]).inc();
}
