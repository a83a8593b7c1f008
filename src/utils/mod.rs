//! Amount normalization for user-typed currency fields.

use solana_sdk::native_token::LAMPORTS_PER_SOL;

use crate::errors::{ClientError, Result};

/// Parse a user-typed SOL price into lamports, rounding to the nearest
/// lamport. Accepts a comma or a dot as decimal separator; rejects
/// non-numeric, negative, and non-finite input.
pub fn parse_price_lamports(input: &str) -> Result<u64> {
    let trimmed = input.trim();
    let normalized = trimmed.replace(',', ".");
    let value: f64 = normalized
        .parse()
        .map_err(|_| ClientError::InvalidAmount(trimmed.to_string()))?;
    if !value.is_finite() || value < 0.0 {
        return Err(ClientError::InvalidAmount(trimmed.to_string()));
    }
    Ok((value * LAMPORTS_PER_SOL as f64).round() as u64)
}

/// Parse a user-typed withdrawal amount into lamports, truncating the
/// fractional lamport. Non-numeric input is treated as zero.
///
/// The truncation here is asymmetric with [`parse_price_lamports`]'
/// rounding. The program accounts against the exact client-computed
/// value, so the asymmetry is preserved rather than unified.
pub fn parse_withdraw_lamports(input: &str) -> u64 {
    let value: f64 = input.trim().replace(',', ".").parse().unwrap_or(0.0);
    (value.max(0.0) * LAMPORTS_PER_SOL as f64) as u64
}
