//! Application-level configuration constants.

// Session keys
pub const RELOAD_COUNT_KEY: &str = "reload_count";
pub const MEOW_DATA_KEY: &str = "meow_df";
pub const NAME_KEY: &str = "name";
pub const RADIO_OPTION_KEY: &str = "radio_option";

// Secrets
pub const SECRET_KEY: &str = "my_secret";

// Long-running task
pub const PROGRESS_STEPS: u32 = 100;
pub const PROGRESS_INTERVAL_MS: u32 = 20;

// Datasets
pub const RANDOM_ROWS: usize = 5;
pub const RANDOM_COLS: usize = 10;
pub const PICKUP_ROWS: usize = 10_000;
pub const DEFAULT_PICKUP_HOUR: u32 = 17;

// Widget options
pub const CONTACT_OPTIONS: &[&str] = &["Email", "Home phone", "Mobile phone"];
pub const HOUSES: &[&str] = &["Gryffindor", "Ravenclaw", "Hufflepuff", "Slytherin"];
pub const DEFAULT_HOUSE_INDEX: usize = 3;
pub const RADIO_OPTIONS: &[&str] = &["a", "b", "c"];

// Min/Max limits for sliders
pub const RANGE_MIN: f64 = 0.0;
pub const RANGE_MAX: f64 = 100.0;
pub const DEFAULT_RANGE: (f64, f64) = (25.0, 75.0);
pub const SQUARE_SLIDER_MAX: i64 = 100;
pub const MAX_HOUR: u32 = 23;
