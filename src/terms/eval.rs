//! Evaluation of operators over constant bits.
//!
//! The semantics here are the semantics of the [bit-blaster](crate::blast), and so a model of a blasted formula evaluates each asserted term to one.
//! Bits are least significant first.

use super::{constant::Bits, Opcode};

/// The sum of `a` and `b`, truncated to the width of `a`.
pub fn add(a: &[bool], b: &[bool]) -> Bits {
    let mut carry = false;
    a.iter()
        .zip(b.iter().chain(std::iter::repeat(&false)))
        .map(|(x, y)| {
            let sum = x ^ y ^ carry;
            carry = (x & y) | (carry & (x ^ y));
            sum
        })
        .collect()
}

/// The two's complement negation of `a`.
pub fn negate(a: &[bool]) -> Bits {
    let inverted = a.iter().map(|bit| !bit).collect::<Bits>();
    let mut one = vec![false; a.len()];
    if let Some(first) = one.first_mut() {
        *first = true;
    }
    add(&inverted, &one)
}

/// The product of `a` and `b`, truncated to the width of `a`.
pub fn multiply(a: &[bool], b: &[bool]) -> Bits {
    let mut product = vec![false; a.len()];
    for (index, bit) in b.iter().enumerate() {
        if *bit {
            product = add(&product, &shift_left(a, index));
        }
    }
    product
}

/// `a` shifted towards the most significant bit by `amount`, filled with zeros.
pub fn shift_left(a: &[bool], amount: usize) -> Bits {
    (0..a.len())
        .map(|index| index >= amount && a[index - amount])
        .collect()
}

/// `a` shifted towards the least significant bit by `amount`, filled with `fill`.
pub fn shift_right(a: &[bool], amount: usize, fill: bool) -> Bits {
    (0..a.len())
        .map(|index| a.get(index.saturating_add(amount)).copied().unwrap_or(fill))
        .collect()
}

/// Whether `a` is less than `b`, read as unsigned or as two's complement.
pub fn less_than(a: &[bool], b: &[bool], signed: bool) -> bool {
    let top = a.len().saturating_sub(1);
    for index in (0..a.len()).rev() {
        if a[index] != b[index] {
            return match signed && index == top {
                true => a[index],
                false => b[index],
            };
        }
    }
    false
}

/// The unsigned quotient and remainder of `a` by `b`.
///
/// Division by zero gives a quotient of all ones, and a remainder of `a`.
pub fn divide(a: &[bool], b: &[bool]) -> (Bits, Bits) {
    let width = a.len();
    let mut quotient = vec![false; width];
    let mut remainder = vec![false; width];

    for index in (0..width).rev() {
        // The remainder is below b, and so fits the width after the shift when b is non-zero.
        let overflow = remainder.last().copied().unwrap_or(false);
        remainder = shift_left(&remainder, 1);
        remainder[0] = a[index];

        if overflow || !less_than(&remainder, b, false) {
            remainder = add(&remainder, &negate(b));
            quotient[index] = true;
        }
    }
    (quotient, remainder)
}

fn is_zero(a: &[bool]) -> bool {
    a.iter().all(|bit| !bit)
}

fn sign(a: &[bool]) -> bool {
    a.last().copied().unwrap_or(false)
}

fn absolute(a: &[bool]) -> Bits {
    match sign(a) {
        true => negate(a),
        false => a.to_vec(),
    }
}

/// Signed division, rounding towards zero.
pub fn signed_divide(a: &[bool], b: &[bool]) -> Bits {
    let (quotient, _) = divide(&absolute(a), &absolute(b));
    match sign(a) != sign(b) {
        true => negate(&quotient),
        false => quotient,
    }
}

/// Signed remainder, with the sign of the dividend.
pub fn signed_remainder(a: &[bool], b: &[bool]) -> Bits {
    let (_, remainder) = divide(&absolute(a), &absolute(b));
    match sign(a) {
        true => negate(&remainder),
        false => remainder,
    }
}

/// Signed remainder, with the sign of the divisor.
pub fn signed_modulo(a: &[bool], b: &[bool]) -> Bits {
    let (_, remainder) = divide(&absolute(a), &absolute(b));
    if is_zero(&remainder) {
        return remainder;
    }
    match (sign(a), sign(b)) {
        (false, false) => remainder,
        (true, false) => add(&negate(&remainder), b),
        (false, true) => add(&remainder, b),
        (true, true) => negate(&remainder),
    }
}

/// The amount of a shift by `b` over a width of `width`, saturated at `width`.
fn shift_amount(b: &[bool], width: usize) -> usize {
    let mut amount: usize = 0;
    for (index, bit) in b.iter().enumerate() {
        if *bit {
            if index >= usize::BITS as usize - 1 || (1_usize << index) >= width {
                return width;
            }
            amount += 1 << index;
        }
    }
    amount.min(width)
}

fn boolean(value: bool) -> Bits {
    vec![value]
}

fn fold(operands: &[Bits], f: impl Fn(bool, bool) -> bool) -> Bits {
    let mut result = operands.first().cloned().unwrap_or_default();
    for operand in operands.iter().skip(1) {
        for (bit, other) in result.iter_mut().zip(operand) {
            *bit = f(*bit, *other);
        }
    }
    result
}

fn invert(a: Bits) -> Bits {
    a.into_iter().map(|bit| !bit).collect()
}

/// The value of `opcode` with `parameters` applied to `operands`.
///
/// Operands are assumed to fit the typing rules of the opcode.
pub fn evaluate(opcode: Opcode, parameters: &[u32], operands: &[Bits]) -> Bits {
    let empty = Bits::default();
    let a = operands.first().unwrap_or(&empty);
    let b = operands.get(1).unwrap_or(&empty);
    let parameter = |index: usize| parameters.get(index).copied().unwrap_or(0) as usize;

    match opcode {
        Opcode::EQUAL => boolean(a == b),
        Opcode::NEQUAL => boolean(a != b),
        Opcode::DISTINCT => boolean(
            operands
                .iter()
                .enumerate()
                .all(|(index, x)| operands[index + 1..].iter().all(|y| x != y)),
        ),
        Opcode::IMPLIES => boolean(!sign(a) || sign(b)),

        Opcode::ULT => boolean(less_than(a, b, false)),
        Opcode::ULE => boolean(!less_than(b, a, false)),
        Opcode::UGT => boolean(less_than(b, a, false)),
        Opcode::UGE => boolean(!less_than(a, b, false)),
        Opcode::SLT => boolean(less_than(a, b, true)),
        Opcode::SLE => boolean(!less_than(b, a, true)),
        Opcode::SGT => boolean(less_than(b, a, true)),
        Opcode::SGE => boolean(!less_than(a, b, true)),

        Opcode::NOT => invert(a.clone()),
        Opcode::NEG => negate(a),
        Opcode::ITE => match sign(a) {
            true => b.clone(),
            false => operands.get(2).cloned().unwrap_or_default(),
        },

        Opcode::ADD => operands
            .iter()
            .skip(1)
            .fold(a.clone(), |sum, operand| add(&sum, operand)),
        Opcode::SUB => add(a, &negate(b)),
        Opcode::MUL => operands
            .iter()
            .skip(1)
            .fold(a.clone(), |product, operand| multiply(&product, operand)),

        Opcode::UDIV => divide(a, b).0,
        Opcode::UREM => divide(a, b).1,
        Opcode::SDIV => signed_divide(a, b),
        Opcode::SREM => signed_remainder(a, b),
        Opcode::SMOD => signed_modulo(a, b),

        Opcode::AND => fold(operands, |x, y| x & y),
        Opcode::NAND => invert(fold(operands, |x, y| x & y)),
        Opcode::OR => fold(operands, |x, y| x | y),
        Opcode::NOR => invert(fold(operands, |x, y| x | y)),
        Opcode::XOR => fold(operands, |x, y| x ^ y),
        Opcode::XNOR => invert(fold(operands, |x, y| x ^ y)),

        Opcode::LSHL => shift_left(a, shift_amount(b, a.len())),
        Opcode::LSHR => shift_right(a, shift_amount(b, a.len()), false),
        Opcode::ASHR => shift_right(a, shift_amount(b, a.len()), sign(a)),

        Opcode::RED_OR => boolean(a.iter().any(|bit| *bit)),
        Opcode::RED_AND => boolean(a.iter().all(|bit| *bit)),

        Opcode::CONCAT => operands.iter().rev().flatten().copied().collect(),
        Opcode::EXTRACT => a[parameter(0)..parameter(1)].to_vec(),
        Opcode::REPEAT => a.repeat(parameter(0)),
        Opcode::ROTATE_LEFT => {
            let width = a.len();
            (0..width)
                .map(|index| a[(index + width - parameter(0) % width) % width])
                .collect()
        }
        Opcode::ROTATE_RIGHT => {
            let width = a.len();
            (0..width)
                .map(|index| a[(index + parameter(0)) % width])
                .collect()
        }
        Opcode::ZERO_EXTEND => {
            let mut extended = a.clone();
            extended.resize(a.len() + parameter(0), false);
            extended
        }
        Opcode::SIGN_EXTEND => {
            let mut extended = a.clone();
            extended.resize(a.len() + parameter(0), sign(a));
            extended
        }

        Opcode::SELECT => {
            let element_width = a.len() >> b.len();
            let index = shift_amount(b, usize::MAX);
            a[index * element_width..(index + 1) * element_width].to_vec()
        }
        Opcode::STORE => {
            let value = operands.get(2).cloned().unwrap_or_default();
            let element_width = value.len();
            let index = shift_amount(b, usize::MAX);
            let mut array = a.clone();
            array[index * element_width..(index + 1) * element_width].copy_from_slice(&value);
            array
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terms::constant::{from_decimal, from_u64, to_i64, to_u64};

    fn u(value: u64) -> Bits {
        from_u64(8, value).unwrap()
    }

    fn s(value: &str) -> Bits {
        from_decimal(8, value).unwrap()
    }

    #[test]
    fn arithmetic() {
        assert_eq!(to_u64(&add(&u(200), &u(100))), Some(44));
        assert_eq!(to_u64(&multiply(&u(3), &u(6))), Some(18));
        assert_eq!(to_u64(&multiply(&u(16), &u(16))), Some(0));
        assert_eq!(to_u64(&negate(&u(1))), Some(255));
    }

    #[test]
    fn unsigned_division() {
        assert_eq!(divide(&u(200), &u(7)), (u(28), u(4)));
        assert_eq!(divide(&u(255), &u(1)), (u(255), u(0)));
        assert_eq!(divide(&u(37), &u(0)), (u(255), u(37)));
        assert_eq!(divide(&u(255), &u(128)), (u(1), u(127)));
    }

    #[test]
    fn signed_division() {
        assert_eq!(to_i64(&signed_divide(&s("-7"), &s("2"))), Some(-3));
        assert_eq!(to_i64(&signed_remainder(&s("-7"), &s("2"))), Some(-1));
        assert_eq!(to_i64(&signed_modulo(&s("-7"), &s("2"))), Some(1));
        assert_eq!(to_i64(&signed_modulo(&s("7"), &s("-2"))), Some(-1));
        assert_eq!(to_i64(&signed_divide(&s("5"), &s("0"))), Some(-1));
        assert_eq!(to_i64(&signed_divide(&s("-5"), &s("0"))), Some(1));
        assert_eq!(to_i64(&signed_remainder(&s("-5"), &s("0"))), Some(-5));
        assert_eq!(to_i64(&signed_modulo(&s("-5"), &s("0"))), Some(-5));
        assert_eq!(to_i64(&signed_divide(&s("-128"), &s("-1"))), Some(-128));
    }

    #[test]
    fn shifts_and_structure() {
        assert_eq!(evaluate(Opcode::LSHL, &[], &[u(3), u(2)]), u(12));
        assert_eq!(evaluate(Opcode::LSHR, &[], &[u(3), u(9)]), u(0));
        assert_eq!(evaluate(Opcode::ASHR, &[], &[u(128), u(7)]), u(255));
        assert_eq!(evaluate(Opcode::ROTATE_LEFT, &[1], &[u(129)]), u(3));
        assert_eq!(evaluate(Opcode::ROTATE_RIGHT, &[1], &[u(3)]), u(129));
        assert_eq!(
            to_u64(&evaluate(Opcode::CONCAT, &[], &[u(1), u(2)])),
            Some(258)
        );
        assert_eq!(evaluate(Opcode::EXTRACT, &[4, 8], &[u(0xa5)]), vec![false, true, false, true]);
        assert_eq!(evaluate(Opcode::SIGN_EXTEND, &[2], &[u(128)]).len(), 10);
    }

    #[test]
    fn predicates() {
        assert_eq!(evaluate(Opcode::SLT, &[], &[s("-1"), s("0")]), vec![true]);
        assert_eq!(evaluate(Opcode::ULT, &[], &[s("-1"), s("0")]), vec![false]);
        assert_eq!(evaluate(Opcode::DISTINCT, &[], &[u(1), u(2), u(1)]), vec![false]);
        assert_eq!(evaluate(Opcode::XNOR, &[], &[u(0), u(255)]), u(0));
    }

    #[test]
    fn arrays() {
        let array = from_u64(16, 0x4321).unwrap();
        let index = from_u64(2, 2).unwrap();
        assert_eq!(
            to_u64(&evaluate(Opcode::SELECT, &[], &[array.clone(), index.clone()])),
            Some(3)
        );
        let stored = evaluate(Opcode::STORE, &[], &[array, index, from_u64(4, 9).unwrap()]);
        assert_eq!(to_u64(&stored), Some(0x4921));
    }
}
