//! Tax-year data for the calculators: the built-in year files, a TOML
//! loader for custom years, and a CSV loader for IRS bracket schedules.

mod loader;
mod year_config;

pub use loader::{BracketCsvError, TaxBracketLoader, TaxBracketRecord};
pub use year_config::{ConfigError, YearData};
