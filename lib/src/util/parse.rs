use std::num::ParseIntError;

/// Parses a decimal or `0x`-prefixed hexadecimal integer, optionally negated with a leading `-`.
pub fn parse_i64(text: &str) -> Result<i64, ParseIntError> {
    let (negative, value) = text.strip_prefix('-').map(|abs| (true, abs)).unwrap_or((false, text));
    let digits = if let Some(hex) = value.strip_prefix("0x") { hex } else { value };
    let radix = if digits.len() == value.len() { 10 } else { 16 };
    // Parsing the sign along with the digits keeps i64::MIN representable
    if negative { i64::from_str_radix(&format!("-{digits}"), radix) } else { i64::from_str_radix(digits, radix) }
}
