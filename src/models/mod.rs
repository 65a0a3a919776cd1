pub mod date;
pub mod offer;
