pub mod claim;
pub mod dates;
pub mod metrics;
pub mod offers;
