//! Conversions between human readable decimal amounts and the integer
//! representation used on chain.

use {
    alloy::primitives::{U256, utils::Unit},
    anyhow::{Context, Result, anyhow, ensure},
};

/// Largest number of decimals whose scaling factor still fits into a
/// [`U256`].
pub const MAX_DECIMALS: u8 = 77;

/// Listing fee used when none is configured: 0.01 ETH.
pub const DEFAULT_LISTING_FEE: U256 = U256::from_limbs([10_000_000_000_000_000, 0, 0, 0]);

pub trait EthUnit: std::marker::Sized {
    /// Returns the current wei amount.
    fn wei(self) -> U256;

    /// Returns the current Gwei amount as wei (i.e. 1e9 wei).
    fn gwei(self) -> U256 {
        self.wei() * Unit::GWEI.wei()
    }

    /// Returns the current Eth amount as wei (i.e. 1e18 wei).
    fn eth(self) -> U256 {
        self.wei() * Unit::ETHER.wei()
    }
}

impl EthUnit for u64 {
    fn wei(self) -> U256 {
        U256::from(self)
    }
}

impl EthUnit for u128 {
    fn wei(self) -> U256 {
        U256::from(self)
    }
}

/// Scales a decimal string like `"0.01"` by `10^decimals` into an integer.
///
/// The conversion is exact: amounts with more fractional digits than
/// `decimals` are rejected instead of rounded, as are negative amounts and
/// results that do not fit into 256 bits.
pub fn parse_units(amount: &str, decimals: u8) -> Result<U256> {
    ensure!(
        decimals <= MAX_DECIMALS,
        "{decimals} decimals exceed the maximum of {MAX_DECIMALS}"
    );
    let amount = amount.trim();
    let (integer, fraction) = amount.split_once('.').unwrap_or((amount, ""));
    ensure!(
        !integer.is_empty() || !fraction.is_empty(),
        "invalid decimal number {amount:?}"
    );
    ensure!(
        is_digits(integer) && is_digits(fraction),
        "invalid decimal number {amount:?}"
    );
    // Padding zeros carry no precision: "1.0" is a valid amount with 0 decimals.
    let fraction = fraction.trim_end_matches('0');
    ensure!(
        fraction.len() <= usize::from(decimals),
        "{amount} has more than {decimals} fractional digits"
    );

    let scale = pow10(decimals);
    let integer = parse_digits(integer)?
        .checked_mul(scale)
        .with_context(|| format!("{amount} overflows 256 bits"))?;
    // `fraction.len() <= decimals` was checked above so this can't truncate.
    let padding = decimals - fraction.len() as u8;
    let fraction = parse_digits(fraction)?
        .checked_mul(pow10(padding))
        .ok_or_else(|| anyhow!("{amount} overflows 256 bits"))?;
    integer
        .checked_add(fraction)
        .with_context(|| format!("{amount} overflows 256 bits"))
}

/// Formats an integer amount with `decimals` decimals as a decimal string,
/// dropping trailing zeros of the fractional part.
pub fn format_units(value: U256, decimals: u8) -> String {
    let decimals = decimals.min(MAX_DECIMALS);
    let scale = pow10(decimals);
    let (integer, fraction) = value.div_rem(scale);
    if fraction.is_zero() {
        return integer.to_string();
    }
    let fraction = format!(
        "{:0>width$}",
        fraction.to_string(),
        width = usize::from(decimals)
    );
    format!("{integer}.{}", fraction.trim_end_matches('0'))
}

fn pow10(exponent: u8) -> U256 {
    U256::from(10).pow(U256::from(exponent))
}

fn is_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}

fn parse_digits(digits: &str) -> Result<U256> {
    if digits.is_empty() {
        return Ok(U256::ZERO);
    }
    U256::from_str_radix(digits, 10)
        .ok()
        .with_context(|| format!("{digits} overflows 256 bits"))
}
