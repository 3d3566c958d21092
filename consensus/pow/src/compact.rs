//! Compact target codec
//!
//! A compact target packs an unsigned 256-bit bound into 32 bits: the top
//! byte is a base-256 exponent (the length of the value in bytes), the low
//! 23 bits are the mantissa and bit 23 is a sign flag. Decoding never fails;
//! the sign and overflow conditions are reported to the caller, which must
//! reject such targets before using them.

use primitive_types::U256;
use serde::{Deserialize, Serialize};
use std::fmt;

const SIGN_BIT: u32 = 0x0080_0000;
const MANTISSA_MASK: u32 = 0x007f_ffff;

/// A proof-of-work target in compact ("bits") form.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CompactTarget(pub u32);

/// Result of decoding a [`CompactTarget`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecodedTarget {
    pub value: U256,
    /// The sign bit was set on a non-zero mantissa
    pub negative: bool,
    /// The encoded value does not fit in 256 bits
    pub overflow: bool,
}

impl DecodedTarget {
    /// Whether the target may be used on a network whose easiest target is
    /// `pow_limit`.
    pub fn is_usable(&self, pow_limit: U256) -> bool {
        !self.negative && !self.overflow && !self.value.is_zero() && self.value <= pow_limit
    }
}

impl CompactTarget {
    pub const fn bits(&self) -> u32 {
        self.0
    }

    pub fn decode(self) -> DecodedTarget {
        let size = self.0 >> 24;
        let mut word = self.0 & MANTISSA_MASK;

        let value = if size <= 3 {
            word >>= 8 * (3 - size);
            U256::from(word)
        } else {
            // Shifts of 256 bits or more leave zero, the overflow flag below
            // reports the lost bits.
            U256::from(word) << (8 * (size as usize - 3))
        };

        let negative = word != 0 && (self.0 & SIGN_BIT) != 0;
        let overflow = word != 0
            && (size > 34 || (word > 0xff && size > 33) || (word > 0xffff && size > 32));

        DecodedTarget { value, negative, overflow }
    }

    /// Canonical compact form of `value`.
    pub fn encode(value: U256) -> Self {
        Self::encode_signed(value, false)
    }

    /// Canonical compact form of `value`, setting the sign flag when
    /// `negative` is requested and the mantissa is non-zero.
    pub fn encode_signed(value: U256, negative: bool) -> Self {
        let mut size = (value.bits() + 7) / 8;
        let mut compact = if size <= 3 {
            (value.low_u64() << (8 * (3 - size))) as u32
        } else {
            (value >> (8 * (size - 3))).low_u64() as u32
        };

        // Keep the sign bit clear by moving one byte into the exponent.
        if compact & SIGN_BIT != 0 {
            compact >>= 8;
            size += 1;
        }

        compact |= (size as u32) << 24;
        if negative && compact & MANTISSA_MASK != 0 {
            compact |= SIGN_BIT;
        }
        Self(compact)
    }
}

impl From<u32> for CompactTarget {
    fn from(bits: u32) -> Self {
        Self(bits)
    }
}

impl From<CompactTarget> for u32 {
    fn from(target: CompactTarget) -> Self {
        target.0
    }
}

impl fmt::Debug for CompactTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CompactTarget({:#010x})", self.0)
    }
}

impl fmt::Display for CompactTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08x}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(bits: u32) -> DecodedTarget {
        CompactTarget(bits).decode()
    }

    #[test]
    fn test_zero_mantissas_decode_to_zero() {
        for bits in [
            0x0000_0000u32,
            0x0012_3456,
            0x0100_3456,
            0x0200_0056,
            0x0300_0000,
            0x0400_0000,
            0x0092_3456,
            0x0180_3456,
            0x0280_0056,
            0x0380_0000,
            0x0480_0000,
        ] {
            let decoded = decode(bits);
            assert!(decoded.value.is_zero(), "bits {:#x}", bits);
            assert!(!decoded.negative, "bits {:#x}", bits);
            assert!(!decoded.overflow, "bits {:#x}", bits);
            assert_eq!(CompactTarget::encode(decoded.value), CompactTarget(0));
        }
    }

    #[test]
    fn test_known_vectors() {
        let decoded = decode(0x0112_3456);
        assert_eq!(decoded.value, U256::from(0x12u64));
        assert_eq!(CompactTarget::encode(decoded.value), CompactTarget(0x0112_0000));

        assert_eq!(decode(0x0212_3456).value, U256::from(0x1234u64));
        assert_eq!(CompactTarget::encode(U256::from(0x1234u64)), CompactTarget(0x0212_3400));

        assert_eq!(decode(0x0312_3456).value, U256::from(0x12_3456u64));
        assert_eq!(CompactTarget::encode(U256::from(0x12_3456u64)), CompactTarget(0x0312_3456));

        assert_eq!(decode(0x0412_3456).value, U256::from(0x1234_5600u64));
        assert_eq!(CompactTarget::encode(U256::from(0x1234_5600u64)), CompactTarget(0x0412_3456));

        assert_eq!(decode(0x0500_9234).value, U256::from(0x9234_0000u64));
        assert_eq!(CompactTarget::encode(U256::from(0x9234_0000u64)), CompactTarget(0x0500_9234));

        let wide = U256::from(0x12_3456u64) << 232;
        assert_eq!(decode(0x2012_3456).value, wide);
        assert_eq!(CompactTarget::encode(wide), CompactTarget(0x2012_3456));
    }

    #[test]
    fn test_encode_never_sets_sign_bit() {
        assert_eq!(CompactTarget::encode(U256::from(0x80u64)), CompactTarget(0x0200_8000));
    }

    #[test]
    fn test_negative_flag() {
        let decoded = decode(0x01fe_dcba);
        assert_eq!(decoded.value, U256::from(0x7eu64));
        assert!(decoded.negative);
        assert_eq!(CompactTarget::encode_signed(decoded.value, true), CompactTarget(0x01fe_0000));

        let decoded = decode(0x0492_3456);
        assert_eq!(decoded.value, U256::from(0x1234_5600u64));
        assert!(decoded.negative);
        assert_eq!(CompactTarget::encode_signed(decoded.value, true), CompactTarget(0x0492_3456));
    }

    #[test]
    fn test_overflow_flag() {
        assert!(decode(0xff12_3456).overflow);
        assert!(decode(0x2301_0000).overflow);
        assert!(!decode(0x2200_00ff).overflow);
        assert!(decode(0x2200_0100).overflow);
        assert!(!decode(0x2100_ffff).overflow);
        assert!(decode(0x2101_0000).overflow);
    }

    #[test]
    fn test_representable_targets_survive_encoding() {
        let pow_limit = U256::MAX >> 20;
        for mantissa in [1u64, 0x7f, 0x80, 0xffff, 0x12_3456, 0x7f_ffff] {
            for shift in (0..232).step_by(8) {
                let target = U256::from(mantissa) << shift;
                if target > pow_limit {
                    continue;
                }
                let encoded = CompactTarget::encode(target);
                assert_eq!(encoded.decode().value, target, "target {:x}", target);
            }
        }

        let limit_bits = CompactTarget::encode(pow_limit);
        assert_eq!(limit_bits, CompactTarget(0x1e0f_ffff));
        assert!(limit_bits.decode().is_usable(pow_limit));
    }
}
