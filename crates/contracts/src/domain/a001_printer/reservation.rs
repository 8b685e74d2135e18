use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

const PREFIX_WITH_HOLDER: &str = "Reserverad av";
const PREFIX_BARE: &str = "Reserverad";
const EXPIRY_SEPARATOR: &str = " till ";

/// Бронь, разобранная из ячейки "Reserverad av".
///
/// Cell format is `Reserverad av {holder} till {YYYY-MM-DD}`. Expiry is
/// advisory: nothing clears an expired hold in the sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub holder: String,
    #[serde(rename = "expiresOn")]
    pub expires_on: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRemaining {
    pub expired: bool,
    pub text: String,
}

impl Reservation {
    pub fn new(holder: &str, expires_on: NaiveDate) -> Self {
        Self {
            holder: holder.trim().to_string(),
            expires_on: Some(expires_on),
        }
    }

    /// None for an empty cell
    pub fn parse(cell: &str) -> Option<Self> {
        let text = cell.trim();
        if text.is_empty() {
            return None;
        }

        let (holder_part, expires_on) = match text.rfind(EXPIRY_SEPARATOR) {
            Some(idx) => {
                let date_part = text[idx + EXPIRY_SEPARATOR.len()..].trim();
                (&text[..idx], parse_date(date_part))
            }
            None => (text, None),
        };

        let holder = holder_part
            .strip_prefix(PREFIX_WITH_HOLDER)
            .or_else(|| holder_part.strip_prefix(PREFIX_BARE))
            .unwrap_or(holder_part)
            .trim()
            .to_string();

        Some(Self { holder, expires_on })
    }

    /// Text written back into the sheet cell
    pub fn to_cell_text(&self) -> String {
        match self.expires_on {
            Some(date) => format!(
                "{} {}{}{}",
                PREFIX_WITH_HOLDER,
                self.holder,
                EXPIRY_SEPARATOR,
                date.format("%Y-%m-%d")
            ),
            None => format!("{} {}", PREFIX_WITH_HOLDER, self.holder),
        }
    }

    /// Active until the expiry day starts; unknown expiry counts as active
    pub fn is_active(&self, today: NaiveDate) -> bool {
        match self.expires_on {
            Some(date) => date > today,
            None => true,
        }
    }

    pub fn time_remaining(&self, now: DateTime<Utc>) -> TimeRemaining {
        let Some(date) = self.expires_on else {
            return TimeRemaining {
                expired: false,
                text: "Okänt".to_string(),
            };
        };

        let expiry = date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
        let Some(expiry) = expiry else {
            return TimeRemaining {
                expired: false,
                text: "Okänt".to_string(),
            };
        };

        let left = expiry - now;
        if left <= chrono::Duration::zero() {
            return TimeRemaining {
                expired: true,
                text: "Utgången".to_string(),
            };
        }

        let days = left.num_days();
        let text = if days > 0 {
            format!("{} dag{} kvar", days, if days != 1 { "ar" } else { "" })
        } else {
            let hours = left.num_hours();
            format!("{} timm{} kvar", hours, if hours != 1 { "ar" } else { "e" })
        };

        TimeRemaining {
            expired: false,
            text,
        }
    }
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    let head: String = s.chars().take(10).collect();
    NaiveDate::parse_from_str(&head, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_parse_holder_and_date() {
        let r = Reservation::parse("Reserverad av Alice till 2025-08-15").unwrap();
        assert_eq!(r.holder, "Alice");
        assert_eq!(r.expires_on, Some(d(2025, 8, 15)));
    }

    #[test]
    fn test_parse_without_date_is_unknown_expiry() {
        let r = Reservation::parse("Reserverad av Bo Ek").unwrap();
        assert_eq!(r.holder, "Bo Ek");
        assert_eq!(r.expires_on, None);
        assert!(r.is_active(d(2030, 1, 1)));
    }

    #[test]
    fn test_parse_free_text_holder() {
        let r = Reservation::parse("Kalle").unwrap();
        assert_eq!(r.holder, "Kalle");
        assert!(Reservation::parse("   ").is_none());
    }

    #[test]
    fn test_holder_name_containing_till() {
        let r = Reservation::parse("Reserverad av Stina till Sala till 2025-09-01").unwrap();
        assert_eq!(r.holder, "Stina till Sala");
        assert_eq!(r.expires_on, Some(d(2025, 9, 1)));
    }

    #[test]
    fn test_cell_text_round_trips() {
        let r = Reservation::new("Alice", d(2025, 8, 15));
        assert_eq!(r.to_cell_text(), "Reserverad av Alice till 2025-08-15");
        assert_eq!(Reservation::parse(&r.to_cell_text()), Some(r));
    }

    #[test]
    fn test_is_active_strictly_before_expiry_day() {
        let r = Reservation::new("Alice", d(2025, 8, 15));
        assert!(r.is_active(d(2025, 8, 14)));
        assert!(!r.is_active(d(2025, 8, 15)));
    }

    #[test]
    fn test_time_remaining_texts() {
        let r = Reservation::new("Alice", d(2025, 8, 15));

        let now = Utc.with_ymd_and_hms(2025, 8, 1, 12, 0, 0).unwrap();
        assert_eq!(r.time_remaining(now).text, "13 dagar kvar");

        let now = Utc.with_ymd_and_hms(2025, 8, 13, 12, 0, 0).unwrap();
        assert_eq!(r.time_remaining(now).text, "1 dag kvar");

        let now = Utc.with_ymd_and_hms(2025, 8, 14, 23, 0, 0).unwrap();
        assert_eq!(r.time_remaining(now).text, "1 timme kvar");

        let now = Utc.with_ymd_and_hms(2025, 8, 15, 0, 0, 0).unwrap();
        let left = r.time_remaining(now);
        assert!(left.expired);
        assert_eq!(left.text, "Utgången");
    }

    #[test]
    fn test_time_remaining_unknown() {
        let r = Reservation::parse("Reserverad av Alice").unwrap();
        let left = r.time_remaining(Utc::now());
        assert!(!left.expired);
        assert_eq!(left.text, "Okänt");
    }
}
