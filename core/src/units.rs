// Ether unit formatting (18 decimal places)
use primitive_types::U256;

pub const ETHER_DECIMALS: usize = 18;
pub const GWEI_DECIMALS: usize = 9;

/// Format an integer amount with `decimals` implied decimal places.
/// Trailing zeros are trimmed but one fractional digit is always kept.
pub fn format_units(value: U256, decimals: usize) -> String {
    let base = U256::exp10(decimals);
    let whole = value / base;
    let frac = value % base;

    let mut frac_str = format!("{:0>width$}", frac.to_string(), width = decimals);
    while frac_str.len() > 1 && frac_str.ends_with('0') {
        frac_str.pop();
    }
    if frac_str.is_empty() {
        frac_str.push('0');
    }

    format!("{}.{}", whole, frac_str)
}

/// Convert wei to ETH for display
pub fn format_ether(wei: U256) -> String {
    format_units(wei, ETHER_DECIMALS)
}

pub fn format_gwei(wei: U256) -> String {
    format_units(wei, GWEI_DECIMALS)
}

/// Parse a block number given as decimal or `0x`-hex.
pub fn parse_quantity(input: &str) -> Option<u64> {
    let s = input.trim();
    if let Some(hex_str) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        if hex_str.is_empty() {
            return None;
        }
        return u64::from_str_radix(hex_str, 16).ok();
    }
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_ether() {
        assert_eq!(format_ether(U256::zero()), "0.0");
        assert_eq!(format_ether(U256::exp10(18)), "1.0");
        assert_eq!(
            format_ether(U256::from(1_500_000_000_000_000_000u64)),
            "1.5"
        );
        assert_eq!(format_ether(U256::one()), "0.000000000000000001");
        assert_eq!(
            format_ether(U256::from(123_456_789_000_000_000_000u128)),
            "123.456789"
        );
    }

    #[test]
    fn test_format_gwei() {
        assert_eq!(format_gwei(U256::from(20_000_000_000u64)), "20.0");
        assert_eq!(format_gwei(U256::from(1_234_567_890u64)), "1.23456789");
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("17000000"), Some(17_000_000));
        assert_eq!(parse_quantity(" 42 "), Some(42));
        assert_eq!(parse_quantity("0x10"), Some(16));
        assert_eq!(parse_quantity("0x"), None);
        assert_eq!(parse_quantity("-1"), None);
        assert_eq!(parse_quantity("12abc"), None);
        assert_eq!(parse_quantity(""), None);
        assert_eq!(parse_quantity("99999999999999999999999"), None);
    }
}
