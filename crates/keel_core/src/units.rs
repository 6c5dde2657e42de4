use crate::error::IntentError;

/// Largest supported decimal count. 10^38 is the biggest power of ten that
/// still fits in a u128.
pub const MAX_DECIMALS: u8 = 38;

fn scale_for(decimals: u8) -> Result<u128, IntentError> {
    if decimals > MAX_DECIMALS {
        return Err(IntentError::InvalidAmount(format!(
            "{decimals} decimals exceeds the supported maximum of {MAX_DECIMALS}"
        )));
    }
    Ok(10u128.pow(u32::from(decimals)))
}

/// Converts a human decimal string (e.g. `"1.5"`) into integer base units
/// (`1_500_000_000_000_000_000` at 18 decimals).
///
/// The conversion is exact: amounts with more fractional digits than the
/// asset supports are rejected rather than rounded, and anything that would
/// overflow a u128 is an error, never a wrap.
pub fn to_base_units(amount: &str, decimals: u8) -> Result<u128, IntentError> {
    let scale = scale_for(decimals)?;
    let trimmed = amount.trim();
    let (whole, frac) = match trimmed.split_once('.') {
        Some((whole, frac)) => (whole, frac),
        None => (trimmed, ""),
    };

    let all_digits =
        whole.bytes().all(|b| b.is_ascii_digit()) && frac.bytes().all(|b| b.is_ascii_digit());
    if !all_digits || (whole.is_empty() && frac.is_empty()) {
        return Err(IntentError::InvalidAmount(format!(
            "`{trimmed}` is not a decimal number"
        )));
    }
    if frac.len() > usize::from(decimals) {
        return Err(IntentError::InvalidAmount(format!(
            "at most {decimals} fractional digits are supported, got {}",
            frac.len()
        )));
    }

    let too_large = || IntentError::InvalidAmount(format!("`{trimmed}` is too large"));
    let whole_part: u128 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| too_large())?
    };
    // At most MAX_DECIMALS digits, so this always fits in a u128.
    let frac_digits: u128 = if frac.is_empty() {
        0
    } else {
        frac.parse().map_err(|_| too_large())?
    };
    let frac_part = frac_digits
        .checked_mul(10u128.pow(u32::from(decimals) - frac.len() as u32))
        .ok_or_else(too_large)?;

    whole_part
        .checked_mul(scale)
        .and_then(|units| units.checked_add(frac_part))
        .ok_or_else(too_large)
}

/// Converts integer base units back into a decimal string, trimming
/// trailing fractional zeros: `from_base_units(1_500_000_000_000_000_000, 18)`
/// is `"1.5"`.
pub fn from_base_units(amount: u128, decimals: u8) -> Result<String, IntentError> {
    let scale = scale_for(decimals)?;
    let whole = amount / scale;
    let frac = amount % scale;
    if frac == 0 {
        return Ok(whole.to_string());
    }
    let digits = format!("{frac:0width$}", width = usize::from(decimals));
    let digits = digits.trim_end_matches('0');
    Ok(format!("{whole}.{digits}"))
}
