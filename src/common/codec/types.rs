use std::fmt::{Display, Formatter};

// Mode
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub enum Mode {
    Numeric = 0b0001,
    Alphanumeric = 0b0010,
    Byte = 0b0100,
    Kanji = 0b1000,
    Eci = 0b0111,
}

impl Mode {
    // Picks the most compact mode able to hold every character. Kanji is never picked.
    pub fn classify(data: &str) -> Self {
        let bytes = data.as_bytes();
        if !bytes.is_empty() && bytes.iter().all(|&b| Mode::Numeric.contains(b)) {
            Mode::Numeric
        } else if bytes.iter().all(|&b| Mode::Alphanumeric.contains(b)) {
            Mode::Alphanumeric
        } else {
            Mode::Byte
        }
    }

    #[inline]
    fn numeric_digit(char: u8) -> u16 {
        debug_assert!(Mode::Numeric.contains(char), "Invalid numeric data: {char}");
        match char {
            b'0'..=b'9' => (char - b'0') as u16,
            _ => unreachable!("Invalid numeric {char}"),
        }
    }

    #[inline]
    fn alphanumeric_digit(char: u8) -> u16 {
        debug_assert!(Mode::Alphanumeric.contains(char), "Invalid alphanumeric data: {char}");
        match char {
            b'0'..=b'9' => (char - b'0') as u16,
            b'A'..=b'Z' => (char - b'A' + 10) as u16,
            b' ' => 36,
            b'$' => 37,
            b'%' => 38,
            b'*' => 39,
            b'+' => 40,
            b'-' => 41,
            b'.' => 42,
            b'/' => 43,
            b':' => 44,
            _ => unreachable!("Invalid alphanumeric {char}"),
        }
    }

    // Numeric value of a chunk: up to 3 digits, 2 alphanumeric chars or 1 byte
    pub fn encode_chunk(&self, data: &[u8]) -> u16 {
        let len = data.len();
        match self {
            Self::Numeric => {
                debug_assert!(len <= 3, "Data is too long for numeric conver: {len}");
                data.iter().fold(0_u16, |n, b| n * 10 + Self::numeric_digit(*b))
            }
            Self::Alphanumeric => {
                debug_assert!(len <= 2, "Data is too long for alphanumeric conver: {len}");
                data.iter().fold(0_u16, |n, b| n * 45 + Self::alphanumeric_digit(*b))
            }
            Self::Byte => {
                debug_assert!(len == 1, "Data is too long for byte conver: {len}");
                data[0] as u16
            }
            Self::Kanji | Self::Eci => unreachable!("Cannot encode chunks in {self} mode"),
        }
    }

    // Bit length of an encoded chunk
    pub fn chunk_bits(&self, chunk_len: usize) -> usize {
        match self {
            Self::Numeric => chunk_len * 3 + 1,
            Self::Alphanumeric => chunk_len * 5 + 1,
            Self::Byte => 8,
            Self::Kanji => 13,
            Self::Eci => unreachable!("ECI mode doesn't have characters"),
        }
    }

    pub fn contains(&self, byte: u8) -> bool {
        match self {
            Self::Numeric => byte.is_ascii_digit(),
            Self::Alphanumeric => {
                matches!(byte, b'0'..=b'9' | b'A'..=b'Z' | b' ' | b'$' | b'%' | b'*' | b'+' | b'-' | b'.' | b'/' | b':')
            }
            Self::Byte => true,
            Self::Kanji | Self::Eci => false,
        }
    }

    pub fn encoded_len(&self, len: usize) -> usize {
        match *self {
            Self::Numeric => (len * 10).div_ceil(3),
            Self::Alphanumeric => (len * 11).div_ceil(2),
            Self::Byte => len * 8,
            Self::Kanji => 0,
            Self::Eci => unreachable!("ECI mode doesn't have characters"),
        }
    }
}

impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Numeric => "Numeric",
            Self::Alphanumeric => "Alphanumeric",
            Self::Byte => "Byte",
            Self::Kanji => "Kanji",
            Self::Eci => "ECI",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod mode_tests {
    use test_case::test_case;

    use super::Mode;
    use super::Mode::*;

    #[test_case("0123456789", Numeric)]
    #[test_case("5", Numeric)]
    #[test_case("HELLO WORLD", Alphanumeric)]
    #[test_case("$%*+-./:", Alphanumeric)]
    #[test_case("", Alphanumeric)]
    #[test_case("Hello", Byte)]
    #[test_case("12a", Byte)]
    #[test_case("héllo", Byte)]
    fn test_classify(data: &str, exp: Mode) {
        assert_eq!(Mode::classify(data), exp);
    }

    #[test]
    fn test_numeric_digit() {
        assert_eq!(Mode::numeric_digit(b'0'), 0);
        assert_eq!(Mode::numeric_digit(b'9'), 9);
    }

    #[test]
    #[should_panic]
    fn test_invalid_numeric_digit() {
        Mode::numeric_digit(b'A');
    }

    #[test]
    fn test_alphanumeric_digit() {
        assert_eq!(Mode::alphanumeric_digit(b'0'), 0);
        assert_eq!(Mode::alphanumeric_digit(b'9'), 9);
        assert_eq!(Mode::alphanumeric_digit(b'A'), 10);
        assert_eq!(Mode::alphanumeric_digit(b'Z'), 35);
        assert_eq!(Mode::alphanumeric_digit(b' '), 36);
        assert_eq!(Mode::alphanumeric_digit(b':'), 44);
    }

    #[test]
    #[should_panic]
    fn test_invalid_alphanumeric_digit() {
        Mode::alphanumeric_digit(b'a');
    }

    #[test]
    fn test_numeric_encoding() {
        assert_eq!(Numeric.encode_chunk(b"012"), 0b0000001100);
        assert_eq!(Numeric.encode_chunk(b"345"), 0b0101011001);
        assert_eq!(Numeric.encode_chunk(b"00"), 0);
        assert_eq!(Numeric.encode_chunk(b"67"), 0b1000011);
        assert_eq!(Numeric.encode_chunk(b"5"), 5);
    }

    #[test]
    fn test_alphanumeric_encoding() {
        assert_eq!(Alphanumeric.encode_chunk(b"AB"), 461);
        assert_eq!(Alphanumeric.encode_chunk(b"AC"), 0b00111001110);
        assert_eq!(Alphanumeric.encode_chunk(b"A"), 10);
    }

    #[test]
    fn test_chunk_bits() {
        assert_eq!(Numeric.chunk_bits(3), 10);
        assert_eq!(Numeric.chunk_bits(2), 7);
        assert_eq!(Numeric.chunk_bits(1), 4);
        assert_eq!(Alphanumeric.chunk_bits(2), 11);
        assert_eq!(Alphanumeric.chunk_bits(1), 6);
        assert_eq!(Byte.chunk_bits(1), 8);
    }

    #[test]
    fn test_encoded_len() {
        assert_eq!(Numeric.encoded_len(6), 20);
        assert_eq!(Numeric.encoded_len(2), 7);
        assert_eq!(Numeric.encoded_len(1), 4);
        assert_eq!(Alphanumeric.encoded_len(2), 11);
        assert_eq!(Alphanumeric.encoded_len(1), 6);
        assert_eq!(Byte.encoded_len(3), 24);
    }
}
