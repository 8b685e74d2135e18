use serde::{Deserialize, Serialize};

/// Цена из таблицы: исходный текст плюс нормализованная сумма.
///
/// The sheet mixes numbers with thousands separators ("12 500") and
/// placeholders ("Se avtal" for contract pricing). Placeholders keep their
/// text and count as 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    pub text: String,
    pub amount: u64,
}

impl Price {
    pub fn parse(text: &str) -> Self {
        Self {
            text: text.trim().to_string(),
            amount: normalize_amount(text),
        }
    }

    /// The cell holds a number too large for `amount`, which fell back to 0
    pub fn is_out_of_range(&self) -> bool {
        let digits = leading_digits(&self.text);
        !digits.is_empty() && digits.parse::<u64>().is_err()
    }
}

/// Leading integer run after all whitespace is removed, 0 when there is none
/// or when it does not fit into `u64`.
pub fn normalize_amount(text: &str) -> u64 {
    leading_digits(text).parse().unwrap_or(0)
}

fn leading_digits(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect()
}
