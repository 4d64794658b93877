use std::fmt;

use alloy_primitives::U256;
use rand::Rng;

/// Amount of native currency, counted in ten-thousandths of a whole coin.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd)]
pub struct Amount(u32);

/// Wei in one ten-thousandth of a coin (10^18 / 10^4).
const WEI_PER_UNIT: u64 = 100_000_000_000_000;
const UNITS_PER_COIN: u32 = 10_000;

impl Amount {
    /// 0.0100
    pub const MIN: Amount = Amount(100);
    /// 0.0900
    pub const MAX: Amount = Amount(900);

    pub fn from_units(units: u32) -> Self {
        Self(units)
    }

    /// Uniform over `[MIN, MAX]` at 4-decimal resolution.
    pub fn sample<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(rng.gen_range(Self::MIN.0..=Self::MAX.0))
    }

    pub fn to_wei(self) -> U256 {
        U256::from(self.0) * U256::from(WEI_PER_UNIT)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{:04}",
            self.0 / UNITS_PER_COIN,
            self.0 % UNITS_PER_COIN
        )
    }
}
