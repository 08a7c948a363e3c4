//! Luhn checksum digit.

// Digit doubled, with the tens carried back in: 2 * 7 = 14 -> 1 + 4 = 5.
const DOUBLE_DIGITS: [u8; 10] = [0, 2, 4, 6, 8, 1, 3, 5, 7, 9];

/// Computes the Luhn check digit over the lowest `digits` decimal places of `code`.
///
/// Starting from the least significant digit, every other digit is doubled (the first one
/// included). The result is the digit which brings the sum up to a multiple of ten, so appending
/// it to `code` yields a number that passes the usual Luhn validation.
pub fn checksum(mut code: u64, digits: u8) -> u8 {
    let mut double = true;
    let mut total: u32 = 0;
    for _ in 0..digits {
        let mut digit = (code % 10) as u8;
        code /= 10;
        if double {
            digit = DOUBLE_DIGITS[usize::from(digit)];
        }
        total += u32::from(digit);
        double = !double;
    }
    ((10 - total % 10) % 10) as u8
}
