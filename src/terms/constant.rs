/*!
Constant values of terms.

A constant is a vector of bits, least significant bit first.
So, bit *i* of a constant is `bits[i]`, and the sign bit of a (signed) constant is the last bit.

Constants may be read from:
- An unsigned integer, with an explicit width.
- A decimal string, with an explicit width, optionally negative (read as two's complement).
- A binary string, most significant bit first, with width the length of the string or an explicit width.
- A hexadecimal string, most significant digit first, with width four times the length of the string or an explicit width.

A value which does not fit the width is an error, and never truncated.

```rust
# use otter_bv::terms::constant::{self};
let bits = constant::from_decimal(8, "-2").unwrap();
assert_eq!(constant::to_u64(&bits), Some(254));

let bits = constant::from_binary(None, "0101").unwrap();
assert_eq!(bits, vec![true, false, true, false]);

assert!(constant::from_hex(Some(4), "1f").is_err());
```
*/

use crate::types::err::TypeError;

use super::eval;

/// The bits of a constant, least significant first.
pub type Bits = Vec<bool>;

/// The bits of `value`, at `width`.
pub fn from_u64(width: u32, value: u64) -> Result<Bits, TypeError> {
    if width == 0 {
        return Err(TypeError::ZeroWidth);
    }
    if width < u64::BITS && value >> width != 0 {
        return Err(TypeError::ConstantOverflow { width });
    }
    Ok((0..width)
        .map(|index| index < u64::BITS && (value >> index) & 1 == 1)
        .collect())
}

/// The value of `bits` as an unsigned integer, if the value fits.
pub fn to_u64(bits: &[bool]) -> Option<u64> {
    let mut value: u64 = 0;
    for (index, bit) in bits.iter().enumerate() {
        if *bit {
            if index >= u64::BITS as usize {
                return None;
            }
            value |= 1 << index;
        }
    }
    Some(value)
}

/// The value of `bits` as a signed (two's complement) integer, if the value fits.
pub fn to_i64(bits: &[bool]) -> Option<i64> {
    match bits.last() {
        None => Some(0),
        Some(false) => to_u64(bits).and_then(|value| i64::try_from(value).ok()),
        Some(true) => {
            let magnitude = to_u64(&eval::negate(bits))?;
            match magnitude {
                m if m == 1 << 63 => Some(i64::MIN),
                m => i64::try_from(m).ok().map(|m| -m),
            }
        }
    }
}

/// The bits of a decimal string at `width`.
///
/// A negative value is read as two's complement, and so the magnitude of a negative value is at most 2^(width - 1).
pub fn from_decimal(width: u32, text: &str) -> Result<Bits, TypeError> {
    if width == 0 {
        return Err(TypeError::ZeroWidth);
    }
    let trimmed = text.trim();
    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    if digits.is_empty() {
        return Err(TypeError::InvalidConstant(text.to_owned()));
    }

    // Four spare bits hold any value * 10 + 9 of a value below 2^width.
    let working = width as usize + 4;
    let mut value: Bits = vec![false; working];
    for character in digits.chars() {
        let digit = character
            .to_digit(10)
            .ok_or_else(|| TypeError::InvalidConstant(text.to_owned()))?;

        let eight = eval::shift_left(&value, 3);
        let two = eval::shift_left(&value, 1);
        value = eval::add(&eval::add(&eight, &two), &from_small(working, digit));

        if value[width as usize..].iter().any(|bit| *bit) {
            return Err(TypeError::ConstantOverflow { width });
        }
    }
    value.truncate(width as usize);

    match negative {
        false => Ok(value),
        true => {
            // The magnitude may be 2^(width - 1) exactly, and otherwise the sign bit must be clear.
            let sign = value[width as usize - 1];
            let rest_clear = value[..width as usize - 1].iter().all(|bit| !bit);
            if sign && !rest_clear {
                return Err(TypeError::ConstantOverflow { width });
            }
            Ok(eval::negate(&value))
        }
    }
}

/// The bits of a binary string, most significant bit first.
///
/// Without a width the width is the length of the string.
/// With a width, the string is padded with leading zeros, and leading ones beyond the width are an overflow.
pub fn from_binary(width: Option<u32>, text: &str) -> Result<Bits, TypeError> {
    let text = text.trim();
    let mut bits = Bits::with_capacity(text.len());
    for character in text.chars().rev() {
        match character {
            '0' => bits.push(false),
            '1' => bits.push(true),
            _ => return Err(TypeError::InvalidConstant(text.to_owned())),
        }
    }
    fit(width, bits, text)
}

/// The bits of a hexadecimal string, most significant digit first.
///
/// Without a width the width is four times the length of the string.
pub fn from_hex(width: Option<u32>, text: &str) -> Result<Bits, TypeError> {
    let text = text.trim();
    let mut bits = Bits::with_capacity(4 * text.len());
    for character in text.chars().rev() {
        let digit = character
            .to_digit(16)
            .ok_or_else(|| TypeError::InvalidConstant(text.to_owned()))?;
        for index in 0..4 {
            bits.push((digit >> index) & 1 == 1);
        }
    }
    fit(width, bits, text)
}

/// `bits` at `width`, if given, with checks for an empty string and overflow.
fn fit(width: Option<u32>, mut bits: Bits, text: &str) -> Result<Bits, TypeError> {
    if bits.is_empty() {
        return Err(TypeError::InvalidConstant(text.to_owned()));
    }
    match width {
        None => Ok(bits),
        Some(0) => Err(TypeError::ZeroWidth),
        Some(width) => {
            let width = width as usize;
            if bits.len() > width {
                if bits[width..].iter().any(|bit| *bit) {
                    return Err(TypeError::ConstantOverflow {
                        width: width as u32,
                    });
                }
                bits.truncate(width);
            } else {
                bits.resize(width, false);
            }
            Ok(bits)
        }
    }
}

fn from_small(width: usize, value: u32) -> Bits {
    (0..width)
        .map(|index| index < u32::BITS as usize && (value >> index) & 1 == 1)
        .collect()
}

/// A string of the bits, most significant bit first.
pub fn as_binary(bits: &[bool]) -> String {
    bits.iter()
        .rev()
        .map(|bit| if *bit { '1' } else { '0' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal() {
        assert_eq!(to_u64(&from_decimal(8, "18").unwrap()), Some(18));
        assert_eq!(to_u64(&from_decimal(8, "255").unwrap()), Some(255));
        assert_eq!(
            from_decimal(8, "256"),
            Err(TypeError::ConstantOverflow { width: 8 })
        );
        assert_eq!(to_i64(&from_decimal(8, "-128").unwrap()), Some(-128));
        assert_eq!(
            from_decimal(8, "-129"),
            Err(TypeError::ConstantOverflow { width: 8 })
        );
        assert!(from_decimal(8, "1x").is_err());
    }

    #[test]
    fn wide_decimal() {
        let bits = from_decimal(80, "1208925819614629174706175").unwrap();
        assert!(bits.iter().all(|bit| *bit));
    }

    #[test]
    fn binary_and_hex() {
        assert_eq!(as_binary(&from_binary(Some(6), "101").unwrap()), "000101");
        assert_eq!(
            from_binary(Some(2), "101"),
            Err(TypeError::ConstantOverflow { width: 2 })
        );
        assert_eq!(to_u64(&from_hex(None, "fF").unwrap()), Some(255));
        assert_eq!(from_hex(None, "a0").unwrap().len(), 8);
        assert_eq!(to_u64(&from_hex(Some(12), "0a0").unwrap()), Some(160));
    }

    #[test]
    fn unsigned() {
        assert_eq!(from_u64(4, 16), Err(TypeError::ConstantOverflow { width: 4 }));
        assert_eq!(to_u64(&from_u64(70, u64::MAX).unwrap()), Some(u64::MAX));
        assert_eq!(to_i64(&from_u64(4, 15).unwrap()), Some(-1));
    }
}
