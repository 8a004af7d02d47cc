//! Control letter of Spanish NIF (DNI) and NIE identity numbers.
//!
//! A DNI is eight digits plus a letter. A NIE starts with `X`, `Y` or `Z`,
//! which stand for 0, 1 and 2, followed by seven digits and a letter. In both
//! cases the letter is [`CONTROL_LETTERS`] indexed by the number mod 23.

/// Lookup table indexed by the number modulo 23.
pub const CONTROL_LETTERS: &[u8; 23] = b"TRWAGMYFPDXBNJZSQVHLCKE";

/// Control letter for an eight-digit number.
pub fn control_letter(number: u32) -> char {
    char::from(CONTROL_LETTERS[(number % 23) as usize])
}

/// Whether `code` is a DNI or NIE with a correct control letter.
///
/// Surrounding whitespace and letter case are ignored.
pub fn is_valid_nif(code: &str) -> bool {
    let code = code.trim().to_ascii_uppercase();
    let bytes = code.as_bytes();
    let [first, digits @ .., letter] = bytes else {
        return false;
    };
    if bytes.len() != 9 || !digits.iter().all(u8::is_ascii_digit) {
        return false;
    }
    let lead = match *first {
        b'X' => 0,
        b'Y' => 1,
        b'Z' => 2,
        d if d.is_ascii_digit() => u32::from(d - b'0'),
        _ => return false,
    };
    let number = digits
        .iter()
        .fold(lead, |acc, d| acc * 10 + u32::from(d - b'0'));
    char::from(*letter) == control_letter(number)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dni() {
        assert!(is_valid_nif("12345678Z"));
        assert!(is_valid_nif("87654321X"));
        assert!(!is_valid_nif("12345678A"));
    }

    #[test]
    fn test_nie() {
        assert!(is_valid_nif("X1234567L"));
        assert!(is_valid_nif("Y9127527Z"));
        assert!(!is_valid_nif("X1234567A"));
    }

    #[test]
    fn test_normalization() {
        assert!(is_valid_nif(" 12345678z "));
        assert!(is_valid_nif("x1234567l"));
    }

    #[test]
    fn test_bad_shapes() {
        assert!(!is_valid_nif(""));
        assert!(!is_valid_nif("1234567Z"));
        assert!(!is_valid_nif("123456789Z"));
        assert!(!is_valid_nif("A1234567L"));
        assert!(!is_valid_nif("1234567AZ"));
        assert!(!is_valid_nif("X12345678"));
    }

    #[test]
    fn test_control_letter() {
        assert_eq!(control_letter(0), 'T');
        assert_eq!(control_letter(22), 'E');
        assert_eq!(control_letter(12_345_678), 'Z');
    }
}
