/// Форматирует число с разделителями тысяч (пробелами)
///
/// # Примеры
/// ```
/// use backend::shared::format::format_number;
/// assert_eq!(format_number(1234567), "1 234 567");
/// assert_eq!(format_number(42), "42");
/// assert_eq!(format_number(0), "0");
/// ```
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(' ');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}

/// Короткая запись суммы для карточек табло: "1.2M kr", "45k kr", "900 kr"
pub fn format_value(value: u64) -> String {
    if value >= 1_000_000 {
        format!("{:.1}M kr", value as f64 / 1_000_000.0)
    } else if value >= 1_000 {
        format!("{:.0}k kr", value as f64 / 1_000.0)
    } else {
        format!("{} kr", value)
    }
}
