//! Six-digit room codes used as the rendezvous identifier.

use rand::Rng;

/// Required code length.
pub const ROOM_CODE_LEN: usize = 6;

/// Base of the port range room codes map into.
const PORT_BASE: u16 = 40_000;

/// Size of the port range room codes map into.
const PORT_SPAN: u32 = 20_000;

/// A validated 6-digit numeric room code.
///
/// The host generates one and shares it out of band; the guest joins with it.
/// The code doubles as the transport rendezvous identifier: for the TCP
/// transport it maps deterministically onto a listening port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomCode(String);

/// Validation errors for guest-entered codes, surfaced before any transport
/// attempt.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RoomCodeError {
    /// The code is not exactly six characters.
    #[error("room code must be 6 digits, got {0} characters")]
    WrongLength(usize),

    /// The code contains a non-digit character.
    #[error("room code must be numeric")]
    NotNumeric,
}

impl RoomCode {
    /// Generate a fresh code in `100000..=999999`.
    pub fn generate(rng: &mut impl Rng) -> Self {
        Self(rng.random_range(100_000..=999_999u32).to_string())
    }

    /// Validate a guest-entered code.
    pub fn parse(code: &str) -> Result<Self, RoomCodeError> {
        if code.len() != ROOM_CODE_LEN {
            return Err(RoomCodeError::WrongLength(code.len()));
        }
        if !code.bytes().all(|b| b.is_ascii_digit()) {
            return Err(RoomCodeError::NotNumeric);
        }
        Ok(Self(code.to_string()))
    }

    /// The code as entered/displayed.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Deterministic rendezvous port for the TCP transport.
    pub fn port(&self) -> u16 {
        // parse cannot fail: the constructor guarantees six ASCII digits.
        let value: u32 = self.0.parse().unwrap_or_default();
        PORT_BASE + (value % PORT_SPAN) as u16
    }
}

impl std::fmt::Display for RoomCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_generated_codes_are_six_digits() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..100 {
            let code = RoomCode::generate(&mut rng);
            assert_eq!(code.as_str().len(), 6);
            assert!(code.as_str().bytes().all(|b| b.is_ascii_digit()));
            assert_ne!(code.as_str().as_bytes()[0], b'0', "no leading zero");
        }
    }

    #[test]
    fn test_parse_accepts_valid() {
        let code = RoomCode::parse("123456").unwrap();
        assert_eq!(code.as_str(), "123456");
    }

    #[test]
    fn test_parse_rejects_wrong_length() {
        assert_eq!(
            RoomCode::parse("12345"),
            Err(RoomCodeError::WrongLength(5))
        );
        assert_eq!(
            RoomCode::parse("1234567"),
            Err(RoomCodeError::WrongLength(7))
        );
        assert_eq!(RoomCode::parse(""), Err(RoomCodeError::WrongLength(0)));
    }

    #[test]
    fn test_parse_rejects_non_numeric() {
        assert_eq!(RoomCode::parse("12a456"), Err(RoomCodeError::NotNumeric));
        assert_eq!(RoomCode::parse("-12345"), Err(RoomCodeError::NotNumeric));
    }

    #[test]
    fn test_port_is_deterministic_and_in_range() {
        let code = RoomCode::parse("123456").unwrap();
        assert_eq!(code.port(), RoomCode::parse("123456").unwrap().port());
        assert!((40_000..60_000).contains(&code.port()));
    }

    #[test]
    fn test_host_and_guest_derive_same_port() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let host_code = RoomCode::generate(&mut rng);
        let guest_code = RoomCode::parse(host_code.as_str()).unwrap();
        assert_eq!(host_code.port(), guest_code.port());
    }
}
