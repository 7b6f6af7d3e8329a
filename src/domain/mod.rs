// Indicator names, display groups and values
pub mod indicators;

// Port interfaces
pub mod ports;

// Crash risk tiers
pub mod risk;

// Domain-specific error types
pub mod errors;
