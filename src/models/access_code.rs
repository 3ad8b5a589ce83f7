use rand::Rng;

/// Symbols an access code is drawn from.
pub const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

pub const DEFAULT_LENGTH: usize = 8;

/// Builds a random code of `length` symbols from [`ALPHABET`].
///
/// Every symbol is drawn independently and uniformly. Two calls share no
/// state, so nothing stops the same code from coming out twice.
pub fn generate(length: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..length)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}

/// Form used to compare a stored code with user input.
pub fn normalize(code: &str) -> String {
    code.trim().to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_code_symbol(c: char) -> bool {
        c.is_ascii_uppercase() || c.is_ascii_digit()
    }

    #[test]
    fn test_generate_default_length() {
        let code = generate(DEFAULT_LENGTH);
        assert_eq!(code.len(), 8);
        assert!(code.chars().all(is_code_symbol));
    }

    #[test]
    fn test_generate_respects_requested_length() {
        for length in [0, 1, 5, 12, 32] {
            assert_eq!(generate(length).len(), length);
        }
    }

    #[test]
    fn test_repeated_calls_keep_length() {
        let first = generate(8);
        let second = generate(8);
        assert_eq!(first.len(), second.len());
    }

    #[test]
    fn test_generate_covers_alphabet() {
        // 36 symbols over 20k draws: missing one is vanishingly unlikely
        let drawn: String = (0..2_500).map(|_| generate(8)).collect();
        for symbol in ALPHABET {
            assert!(drawn.contains(*symbol as char), "never drew {}", *symbol as char);
        }
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  ab12cd34 "), "AB12CD34");
        assert_eq!(normalize(""), "");
    }
}
