// --- File: crates/clinicbook_booking/src/phone.rs ---

/// Digits in a complete number.
pub const PHONE_DIGITS: usize = 10;

/// Reformats phone input into `(XXX) XXX-XXXX` as digits accumulate.
///
/// Anything that isn't an ASCII digit is dropped first, and digits past the
/// tenth are ignored. Partial input gives a prefix of the full pattern:
/// `"123"` becomes `"(123"`, `"1234"` becomes `"(123) 4"`.
pub fn format_phone_number(value: &str) -> String {
    let digits: String = value
        .chars()
        .filter(char::is_ascii_digit)
        .take(PHONE_DIGITS)
        .collect();

    let area = &digits[..digits.len().min(3)];
    let exchange = &digits[area.len()..digits.len().min(6)];
    let line = &digits[area.len() + exchange.len()..];

    let mut formatted = String::with_capacity(14);
    if !area.is_empty() {
        formatted.push('(');
        formatted.push_str(area);
    }
    if !exchange.is_empty() {
        formatted.push_str(") ");
        formatted.push_str(exchange);
    }
    if !line.is_empty() {
        formatted.push('-');
        formatted.push_str(line);
    }
    formatted
}
