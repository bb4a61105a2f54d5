// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Exact decimal <-> integer unit conversion shared by token amounts and gas prices.

use std::str::FromStr;

use alloy_primitives::U256;
use bigdecimal::{num_bigint::BigInt, BigDecimal};

/// Scale a plain decimal string (`"10"`, `"10.5"`) by `10^decimals` into an
/// integer, without any floating-point step.
///
/// Only digits and a single `.` are accepted; signs and exponents are rejected
/// so the result is always exact and bounded.
pub(crate) fn parse_units(input: &str, decimals: u8) -> Result<U256, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err("empty value".to_string());
    }
    if trimmed.starts_with('-') {
        return Err("value is negative".to_string());
    }
    let mut seen_dot = false;
    for c in trimmed.chars() {
        match c {
            '0'..='9' => {}
            '.' if !seen_dot => seen_dot = true,
            _ => return Err(format!("unexpected character `{c}`")),
        }
    }
    if trimmed == "." {
        return Err("no digits".to_string());
    }

    let mut canonical = trimmed.to_string();
    if canonical.starts_with('.') {
        canonical.insert(0, '0');
    }
    if canonical.ends_with('.') {
        canonical.push('0');
    }

    let value = BigDecimal::from_str(&canonical).map_err(|e| e.to_string())?;
    let scale = BigDecimal::new(BigInt::from(1), -i64::from(decimals));
    let scaled = value * scale;
    if !scaled.is_integer() {
        return Err(format!("more than {decimals} fractional digits"));
    }

    let (digits, _) = scaled.with_scale(0).as_bigint_and_exponent();
    U256::from_str_radix(&digits.to_string(), 10).map_err(|_| "exceeds 256 bits".to_string())
}

/// Render `value / 10^decimals` as an exact decimal string.
///
/// Trailing fractional zeros and a dangling `.` are removed, so `100000000`
/// with 6 decimals renders as `100` and `1` renders as `0.000001`.
pub(crate) fn format_units(value: U256, decimals: u8) -> String {
    let digits = value.to_string();
    let decimals = usize::from(decimals);
    if decimals == 0 {
        return digits;
    }

    let (int_part, frac_part) = if digits.len() > decimals {
        let split = digits.len() - decimals;
        (digits[..split].to_string(), digits[split..].to_string())
    } else {
        let padding = "0".repeat(decimals - digits.len());
        ("0".to_string(), format!("{padding}{digits}"))
    };

    let frac_part = frac_part.trim_end_matches('0');
    if frac_part.is_empty() {
        int_part
    } else {
        format!("{int_part}.{frac_part}")
    }
}
