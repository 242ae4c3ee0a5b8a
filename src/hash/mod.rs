pub mod locked;
pub mod open;
