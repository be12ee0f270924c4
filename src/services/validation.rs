use super::error_handling::{HafalanError, LogHelper};
use anyhow::Result;
use regex::Regex;
use std::sync::LazyLock;

static AYAT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{1,9}$").expect("valid ayat pattern"));

pub const REQUIRED_FIELDS_MESSAGE: &str = "Semua field harus diisi";
pub const AYAT_NOT_A_NUMBER_MESSAGE: &str = "Jumlah ayat harus berupa angka";

const MAX_NAMA_LEN: usize = 200;

/// Input validation for the creation form
pub struct InputValidator;

impl InputValidator {
    /// Both fields must be non-blank before anything else is checked.
    pub fn validate_required(nama: &str, ayat: &str) -> Result<()> {
        if nama.trim().is_empty() || ayat.trim().is_empty() {
            let field = if nama.trim().is_empty() { "nama" } else { "ayat" };
            LogHelper::log_validation_failure(field, "", REQUIRED_FIELDS_MESSAGE);
            return Err(HafalanError::validation(field, REQUIRED_FIELDS_MESSAGE).into());
        }
        Ok(())
    }

    /// Trims and lower-cases the name, dropping control characters.
    pub fn validate_nama(nama: &str) -> Result<String> {
        let trimmed = nama.trim();

        if trimmed.is_empty() {
            return Err(HafalanError::validation("nama", REQUIRED_FIELDS_MESSAGE).into());
        }

        if trimmed.chars().count() > MAX_NAMA_LEN {
            LogHelper::log_validation_failure("nama", trimmed, "too long");
            return Err(HafalanError::validation(
                "nama",
                format!("Nama tidak boleh lebih dari {} karakter", MAX_NAMA_LEN),
            )
            .into());
        }

        let sanitized = trimmed
            .chars()
            .filter(|c| !c.is_control())
            .collect::<String>()
            .to_lowercase();

        Ok(sanitized)
    }

    /// Parses the verse count typed in the form.
    pub fn validate_ayat(ayat: &str) -> Result<u32> {
        let trimmed = ayat.trim();

        if trimmed.is_empty() {
            return Err(HafalanError::validation("ayat", REQUIRED_FIELDS_MESSAGE).into());
        }

        if !AYAT_PATTERN.is_match(trimmed) {
            LogHelper::log_validation_failure("ayat", trimmed, AYAT_NOT_A_NUMBER_MESSAGE);
            return Err(HafalanError::validation("ayat", AYAT_NOT_A_NUMBER_MESSAGE).into());
        }

        trimmed
            .parse::<u32>()
            .map_err(|_| HafalanError::validation("ayat", AYAT_NOT_A_NUMBER_MESSAGE).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn reason(error: anyhow::Error) -> String {
        match error.downcast::<HafalanError>() {
            Ok(HafalanError::Validation { reason, .. }) => reason,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[rstest]
    #[case("", "3")]
    #[case("   ", "3")]
    #[case("ahmad", "")]
    #[case("ahmad", "  ")]
    #[case("", "")]
    fn test_required_fields(#[case] nama: &str, #[case] ayat: &str) {
        let error = InputValidator::validate_required(nama, ayat).unwrap_err();
        assert_eq!(reason(error), REQUIRED_FIELDS_MESSAGE);
    }

    #[test]
    fn test_nama_is_lowercased_and_trimmed() {
        assert_eq!(InputValidator::validate_nama("  Ahmad Fauzi ").unwrap(), "ahmad fauzi");
    }

    #[test]
    fn test_nama_too_long() {
        let long = "a".repeat(MAX_NAMA_LEN + 1);
        assert!(InputValidator::validate_nama(&long).is_err());
        assert!(InputValidator::validate_nama(&"a".repeat(MAX_NAMA_LEN)).is_ok());
    }

    #[rstest]
    #[case("0", 0)]
    #[case("3", 3)]
    #[case(" 42 ", 42)]
    #[case("286", 286)]
    fn test_valid_ayat(#[case] input: &str, #[case] expected: u32) {
        assert_eq!(InputValidator::validate_ayat(input).unwrap(), expected);
    }

    #[rstest]
    #[case("-1")]
    #[case("3.5")]
    #[case("tiga")]
    #[case("1e3")]
    #[case("9999999999")]
    fn test_invalid_ayat(#[case] input: &str) {
        let error = InputValidator::validate_ayat(input).unwrap_err();
        assert_eq!(reason(error), AYAT_NOT_A_NUMBER_MESSAGE);
    }
}
