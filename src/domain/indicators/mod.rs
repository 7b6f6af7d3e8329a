pub mod defaults;
pub mod groups;
pub mod values;

pub use defaults::{default_symbol_map, fallback_value, ticker_for, FALLBACK_VALUES, SYMBOL_MAP};
pub use groups::{classify, groups_for, widget_key, GroupAssignment, IndicatorGroup};
pub use values::{FeatureVector, IndicatorValue, IndicatorValues, ValueSource};
