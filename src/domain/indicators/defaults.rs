//! Fallback indicator values and the external ticker table.

/// Values shown for an indicator before anything is fetched or typed.
/// Names missing from this table start at 0.0.
pub const FALLBACK_VALUES: &[(&str, f64)] = &[
    ("VIX", 17.57),
    ("DXY", 72.54),
    ("BDIY", 12126.20),
    ("JPY", 102.70),
    ("USGG30YR", 4.67),
];

/// Indicator name to Yahoo Finance ticker. Only these are ever fetched.
pub const SYMBOL_MAP: &[(&str, &str)] = &[
    ("VIX", "^VIX"),
    ("DXY", "DX-Y.NYB"),
    // Regional equity ETFs stand in for the MSCI indices
    ("MXEU", "IEUR"),
    ("MXRU", "ERUS"),
    ("MXIN", "INDA"),
    ("USGG30YR", "^TYX"),
    ("USGG2YR", "^IRX"),
    ("JPY", "JPY=X"),
];

/// Fallback for `name`, 0.0 when the table has no entry
pub fn fallback_value(name: &str) -> f64 {
    FALLBACK_VALUES
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, v)| *v)
        .unwrap_or(0.0)
}

/// External ticker for `name`, if one is known
pub fn ticker_for(name: &str) -> Option<&'static str> {
    SYMBOL_MAP
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, ticker)| *ticker)
}

/// The symbol table as owned (name, ticker) pairs
pub fn default_symbol_map() -> Vec<(String, String)> {
    SYMBOL_MAP
        .iter()
        .map(|(name, ticker)| (name.to_string(), ticker.to_string()))
        .collect()
}
