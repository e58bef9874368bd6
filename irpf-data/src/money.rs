use irpf_core::calculations::common::round_half_up;
use rust_decimal::Decimal;
use thiserror::Error;

/// Error returned when a string cannot be parsed as a monetary amount.
#[derive(Debug, Error)]
#[error("invalid amount '{input}': {source}")]
pub struct ParseMoneyError {
    input: String,
    #[source]
    source: rust_decimal::Error,
}

/// Strips the currency symbol and converts pt-BR separators to a plain
/// decimal literal.
///
/// When a comma is present it is the decimal separator and dots are
/// thousands separators (`1.234,56`). Without a comma, dots between groups
/// of exactly three digits are thousands separators (`60.000`), and any
/// other dot is the decimal separator (`1234.56`).
fn normalize_money_input(s: &str) -> String {
    let trimmed = s.trim();
    let (sign, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", trimmed),
    };
    let digits: String = rest
        .trim_start_matches("R$")
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    if digits.contains(',') || is_thousands_grouped(&digits) {
        format!("{sign}{}", digits.replace('.', "").replace(',', "."))
    } else {
        format!("{sign}{digits}")
    }
}

/// `60.000` or `1.234.567`, but not `0.500` or `1234.567`.
fn is_thousands_grouped(digits: &str) -> bool {
    let groups: Vec<&str> = digits.split('.').collect();
    let Some((head, tail)) = groups.split_first() else {
        return false;
    };

    !tail.is_empty()
        && (1..=3).contains(&head.len())
        && !head.starts_with('0')
        && tail.iter().all(|g| g.len() == 3)
        && groups.iter().all(|g| g.bytes().all(|b| b.is_ascii_digit()))
}

/// Parses an amount such as `60000`, `60000.00`, `60.000`, `60.000,00` or
/// `R$ 60.000,00`.
///
/// Empty or whitespace-only input is treated as 0.
pub fn parse_money(s: &str) -> Result<Decimal, ParseMoneyError> {
    let normalized = normalize_money_input(s);
    if normalized.is_empty() || normalized == "-" {
        return Ok(Decimal::ZERO);
    }
    normalized.parse().map_err(|source| ParseMoneyError {
        input: s.to_string(),
        source,
    })
}

/// Formats an amount in Brazilian reais, e.g. `R$ 1.234,56`.
pub fn format_brl(value: Decimal) -> String {
    let rounded = round_half_up(value);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let plain = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));

    format!("{sign}R$ {},{frac_part}", group_thousands(int_part))
}

/// Formats a ratio as a pt-BR percentage with two decimals, e.g. `4,76%`.
pub fn format_percent(ratio: Decimal) -> String {
    let percent = format!("{:.2}", round_half_up(ratio * Decimal::ONE_HUNDRED));
    format!("{}%", percent.replace('.', ","))
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn parse_money_accepts_plain_decimal() {
        assert_eq!(parse_money("60000.50").unwrap(), dec!(60000.50));
    }

    #[test]
    fn parse_money_accepts_brazilian_separators() {
        assert_eq!(parse_money("1.234,56").unwrap(), dec!(1234.56));
        assert_eq!(parse_money("1.234.567,89").unwrap(), dec!(1234567.89));
    }

    #[test]
    fn parse_money_reads_dot_grouped_whole_reais() {
        assert_eq!(parse_money("R$ 60.000").unwrap(), dec!(60000));
        assert_eq!(parse_money("1.234.567").unwrap(), dec!(1234567));
        assert_eq!(parse_money("-2.500").unwrap(), dec!(-2500));
    }

    #[test]
    fn parse_money_keeps_dot_as_decimal_when_not_grouped() {
        assert_eq!(parse_money("60000.5").unwrap(), dec!(60000.5));
        assert_eq!(parse_money("0.500").unwrap(), dec!(0.500));
        assert_eq!(parse_money("1234.567").unwrap(), dec!(1234.567));
    }

    #[test]
    fn parse_money_strips_currency_symbol() {
        assert_eq!(parse_money("R$ 60.000,00").unwrap(), dec!(60000.00));
        assert_eq!(parse_money("-R$ 10,00").unwrap(), dec!(-10.00));
    }

    #[test]
    fn parse_money_trims_whitespace() {
        assert_eq!(parse_money("  123.45  ").unwrap(), dec!(123.45));
    }

    #[test]
    fn parse_money_empty_treated_as_zero() {
        assert_eq!(parse_money("").unwrap(), Decimal::ZERO);
        assert_eq!(parse_money("   ").unwrap(), Decimal::ZERO);
    }

    #[test]
    fn parse_money_invalid_returns_error() {
        assert!(parse_money("abc").is_err());
        assert!(parse_money("1,2,3").is_err());
    }

    #[test]
    fn format_brl_groups_thousands() {
        assert_eq!(format_brl(dec!(0)), "R$ 0,00");
        assert_eq!(format_brl(dec!(999.9)), "R$ 999,90");
        assert_eq!(format_brl(dec!(1234.56)), "R$ 1.234,56");
        assert_eq!(format_brl(dec!(1234567.891)), "R$ 1.234.567,89");
    }

    #[test]
    fn format_brl_marks_negative_amounts() {
        assert_eq!(format_brl(dec!(-16754.34)), "-R$ 16.754,34");
    }

    #[test]
    fn format_percent_uses_comma() {
        assert_eq!(format_percent(dec!(0.0476305)), "4,76%");
        assert_eq!(format_percent(dec!(0)), "0,00%");
    }
}
