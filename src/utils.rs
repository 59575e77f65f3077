use crate::config::{RANGE_MAX, RANGE_MIN};

/// Generic numeric input validation
pub fn validate_numeric_input<T>(
    input: &str,
    min: Option<T>,
    max: Option<T>,
    field_name: &str,
) -> Result<T, String>
where
    T: std::str::FromStr + std::fmt::Display + PartialOrd,
{
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(format!("{} cannot be empty", field_name));
    }

    match trimmed.parse::<T>() {
        Ok(val) => {
            if let Some(min_val) = min {
                if val < min_val {
                    return Err(format!("{} must be at least {}", field_name, min_val));
                }
            }
            if let Some(max_val) = max {
                if val > max_val {
                    return Err(format!("{} cannot exceed {}", field_name, max_val));
                }
            }
            Ok(val)
        }
        Err(_) => Err(format!("{} must be a valid number", field_name)),
    }
}

/// Put the two ends of a range slider in order and clamp them to the slider bounds.
pub fn ordered_range(a: f64, b: f64) -> (f64, f64) {
    let lo = a.min(b).clamp(RANGE_MIN, RANGE_MAX);
    let hi = a.max(b).clamp(RANGE_MIN, RANGE_MAX);
    (lo, hi)
}

pub fn format_range((lo, hi): (f64, f64)) -> String {
    format!("({:.1}, {:.1})", lo, hi)
}

/// The option after `current`, wrapping to the first. An unknown `current`
/// also yields the first option.
pub fn next_option<'a>(options: &[&'a str], current: &str) -> Option<&'a str> {
    let next = match options.iter().position(|o| *o == current) {
        Some(idx) => (idx + 1) % options.len(),
        None => 0,
    };
    options.get(next).copied()
}

pub fn square(x: i64) -> i64 {
    x * x
}
