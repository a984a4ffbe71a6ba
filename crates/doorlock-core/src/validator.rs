//! Credential comparison.

use subtle::ConstantTimeEq;

use crate::Credential;

/// Check a candidate against the provisioned secret.
///
/// Returns `true` iff all four positions match. Pure and O(1); the byte
/// comparison runs in constant time so the position of the first mismatch is
/// not observable.
///
/// ```
/// use doorlock_core::{Credential, validate};
///
/// let secret: Credential = "1234".parse().unwrap();
/// assert!(validate(&"1234".parse().unwrap(), &secret));
/// assert!(!validate(&"1243".parse().unwrap(), &secret));
/// ```
#[must_use]
pub fn validate(input: &Credential, secret: &Credential) -> bool {
    input.to_ascii()[..].ct_eq(&secret.to_ascii()[..]).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1234", "1234", true)]
    #[case("0000", "1234", false)]
    #[case("1235", "1234", false)]
    #[case("2234", "1234", false)]
    #[case("4321", "1234", false)]
    #[case("0000", "0000", true)]
    fn test_validate(#[case] input: &str, #[case] secret: &str, #[case] expected: bool) {
        let input: Credential = input.parse().unwrap();
        let secret: Credential = secret.parse().unwrap();
        assert_eq!(validate(&input, &secret), expected);
    }
}
