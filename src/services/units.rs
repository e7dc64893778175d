use num_bigint::BigUint;
use num_traits::ToPrimitive;

pub const WEI_PER_GWEI: u64 = 1_000_000_000;
pub const GWEI_PER_ETH: u64 = 1_000_000_000;

/// 10^18, the scale of bond and fee fixed-point values.
pub fn wei_per_eth() -> BigUint {
    BigUint::from(WEI_PER_GWEI) * BigUint::from(GWEI_PER_ETH)
}

/// Two-stage conversion: base unit -> intermediate unit -> display unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitLadder {
    pub base_per_intermediate: u64,
    pub intermediate_per_display: u64,
}

impl UnitLadder {
    /// wei -> gwei -> ETH
    pub const WEI: UnitLadder = UnitLadder {
        base_per_intermediate: WEI_PER_GWEI,
        intermediate_per_display: GWEI_PER_ETH,
    };

    /// gwei -> gwei -> ETH
    pub const GWEI: UnitLadder = UnitLadder {
        base_per_intermediate: 1,
        intermediate_per_display: GWEI_PER_ETH,
    };

    /// Integer divisions first, float only for the sub-unit remainder.
    /// Anything below one intermediate unit is truncated.
    pub fn to_display(&self, amount: &BigUint) -> f64 {
        let intermediate = amount / self.base_per_intermediate;
        let whole = &intermediate / self.intermediate_per_display;
        let rest = (&intermediate % self.intermediate_per_display)
            .to_u64()
            .unwrap_or_default();
        let whole = whole.to_f64().unwrap_or(f64::INFINITY);
        whole + rest as f64 / self.intermediate_per_display as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn back_to_base(ladder: UnitLadder, display: f64) -> BigUint {
        let intermediate = (display * ladder.intermediate_per_display as f64).round() as u128;
        BigUint::from(intermediate) * ladder.base_per_intermediate
    }

    #[test]
    fn gwei_amounts_convert_to_whole_eth() {
        assert_eq!(UnitLadder::GWEI.to_display(&BigUint::from(32_000_000_000u64)), 32.0);
        assert_eq!(UnitLadder::GWEI.to_display(&BigUint::from(2_000_000_000u64)), 2.0);
        assert_eq!(UnitLadder::GWEI.to_display(&BigUint::from(0u8)), 0.0);
    }

    #[test]
    fn wei_amounts_truncate_below_one_gwei() {
        let amount = BigUint::from_str("1234567891999999999").unwrap();
        assert!((UnitLadder::WEI.to_display(&amount) - 1.234567891).abs() < 1e-12);
        assert_eq!(UnitLadder::WEI.to_display(&BigUint::from(999_999_999u64)), 0.0);
    }

    #[test]
    fn display_round_trip_stays_within_truncation() {
        let samples = [
            "0",
            "1",
            "999999999",
            "1000000000",
            "362500000000000000",
            "32000000000000000000",
            "15432109876543210987",
        ];
        for s in samples {
            let amount = BigUint::from_str(s).unwrap();
            let recovered = back_to_base(UnitLadder::WEI, UnitLadder::WEI.to_display(&amount));
            assert!(recovered <= amount, "{s}: recovered {recovered} exceeds amount");
            assert!(
                &amount - &recovered < BigUint::from(WEI_PER_GWEI),
                "{s}: recovered {recovered} lost more than one gwei"
            );
        }
    }

    #[test]
    fn huge_amounts_do_not_overflow() {
        let amount = BigUint::from_str("123456789000000000000000000000000").unwrap();
        assert_eq!(UnitLadder::WEI.to_display(&amount), 123456789000000.0);
    }
}
