use chrono::{DateTime, Utc};

/// Truncate a string to a maximum number of characters, adding "..." if truncated
pub fn truncate(s: &str, max_len: usize) -> String {
  if s.chars().count() <= max_len {
    s.to_string()
  } else {
    let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
    format!("{}...", kept)
  }
}

/// Price as shown in the list: whole amounts without decimals
pub fn format_price(price: f64) -> String {
  if price.fract() == 0.0 {
    format!("₹{:.0}", price)
  } else {
    format!("₹{:.2}", price)
  }
}

/// Price as pre-filled into an edit field
pub fn price_input(price: f64) -> String {
  format!("{}", price)
}

pub fn format_date(at: Option<DateTime<Utc>>) -> String {
  at.map(|t| t.format("%Y-%m-%d").to_string())
    .unwrap_or_default()
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::TimeZone;

  #[test]
  fn test_truncate_short_string() {
    assert_eq!(truncate("Desk", 10), "Desk");
  }

  #[test]
  fn test_truncate_long_string() {
    assert_eq!(truncate("Standing desk", 8), "Stand...");
  }

  #[test]
  fn test_truncate_multibyte() {
    assert_eq!(truncate("☕☕☕☕☕☕", 5), "☕☕...");
  }

  #[test]
  fn test_format_price() {
    assert_eq!(format_price(1299.0), "₹1299");
    assert_eq!(format_price(12.5), "₹12.50");
    assert_eq!(format_price(0.0), "₹0");
  }

  #[test]
  fn test_price_input() {
    assert_eq!(price_input(1299.0), "1299");
    assert_eq!(price_input(12.5), "12.5");
  }

  #[test]
  fn test_format_date() {
    let at = Utc.with_ymd_and_hms(2024, 6, 5, 8, 0, 0).unwrap();
    assert_eq!(format_date(Some(at)), "2024-06-05");
    assert_eq!(format_date(None), "");
  }
}
