use std::fmt;

/// Number of digits in a CEP
pub const CEP_DIGITS: usize = 8;

/// Position of the optional separator in the `NNNNN-NNN` form
const SEPARATOR_POS: usize = 5;
const SEPARATOR: u8 = b'-';

/// Check whether a string is a well-formed CEP
///
/// Accepts exactly eight ASCII digits (`01001000`) or the hyphenated
/// `NNNNN-NNN` form (`01001-000`). Anything else, including surrounding
/// whitespace, is rejected. Never touches the network.
#[inline]
pub fn is_valid_cep(cep: &str) -> bool {
    ZipCode::parse(cep).is_some()
}

/// A validated CEP, normalized to its eight digits
///
/// The only way to obtain one is through [`ZipCode::parse`], so holding a
/// `ZipCode` proves the format check already passed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ZipCode(String);

impl ZipCode {
    pub fn parse(raw: &str) -> Option<Self> {
        let bytes = raw.as_bytes();

        let digits: String = match bytes.len() {
            CEP_DIGITS if bytes.iter().all(u8::is_ascii_digit) => raw.to_string(),
            len if len == CEP_DIGITS + 1 => {
                let (head, tail) = bytes.split_at(SEPARATOR_POS);
                let tail = tail.strip_prefix(&[SEPARATOR])?;
                if !head.iter().chain(tail).all(u8::is_ascii_digit) {
                    return None;
                }
                raw.chars().filter(char::is_ascii_digit).collect()
            }
            _ => return None,
        };

        Some(Self(digits))
    }

    /// The eight digits, without separator
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ZipCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ZipCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
