//! Public identifier generation.
//!
//! Employees get a short shareable ID (e.g. "Z2DU79"), employers get an
//! internal six-digit number plus a public handle derived from their company
//! name. The generators are pure candidate factories; uniqueness is checked
//! against the user store by the auth service.

use rand::Rng;

/// Length of an employee public ID
pub const PUBLIC_ID_LENGTH: usize = 6;

/// Inclusive range of employer numbers
pub const EMPLOYER_NUMBER_MIN: i32 = 100_000;
pub const EMPLOYER_NUMBER_MAX: i32 = 999_999;

/// Maximum length of a company handle before any de-dup suffix
pub const COMPANY_HANDLE_MAX_LENGTH: usize = 20;

const LETTERS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const ALPHANUMERIC: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Generates a candidate employee public ID
///
/// The first character is always a letter so IDs never carry a leading zero.
pub fn generate_public_id() -> String {
    let mut rng = rand::thread_rng();
    let mut id = String::with_capacity(PUBLIC_ID_LENGTH);
    id.push(LETTERS[rng.gen_range(0..LETTERS.len())] as char);
    for _ in 1..PUBLIC_ID_LENGTH {
        id.push(ALPHANUMERIC[rng.gen_range(0..ALPHANUMERIC.len())] as char);
    }
    id
}

/// Generates a candidate employer number in the 100000-999999 range
pub fn generate_employer_number() -> i32 {
    rand::thread_rng().gen_range(EMPLOYER_NUMBER_MIN..=EMPLOYER_NUMBER_MAX)
}

/// Derives the base company handle from a company name: lowercase
/// alphanumerics only, truncated to the handle limit
pub fn slugify_company_name(company_name: &str) -> String {
    company_name
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(|c| c.to_lowercase())
        .take(COMPANY_HANDLE_MAX_LENGTH)
        .collect()
}

/// Generates a random three-digit suffix for handle collisions that survive
/// the counter-based retries
pub fn random_handle_suffix() -> String {
    let mut rng = rand::thread_rng();
    format!("{:03}", rng.gen_range(0..1000))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_id_format() {
        for _ in 0..100 {
            let id = generate_public_id();
            assert_eq!(id.len(), PUBLIC_ID_LENGTH);
            assert!(id.chars().next().unwrap().is_ascii_uppercase());
            assert!(id.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_employer_number_range() {
        for _ in 0..100 {
            let number = generate_employer_number();
            assert!((EMPLOYER_NUMBER_MIN..=EMPLOYER_NUMBER_MAX).contains(&number));
        }
    }

    #[test]
    fn test_slugify_company_name() {
        assert_eq!(slugify_company_name("Acme Corp"), "acmecorp");
        assert_eq!(slugify_company_name("Big-Data.io"), "bigdataio");
        assert_eq!(
            slugify_company_name("A Very Long Company Name Indeed LLC"),
            "averylongcompanyname"
        );
        assert_eq!(slugify_company_name("日本企業"), "日本企業");
    }

    #[test]
    fn test_random_handle_suffix_is_three_digits() {
        for _ in 0..50 {
            let suffix = random_handle_suffix();
            assert_eq!(suffix.len(), 3);
            assert!(suffix.chars().all(|c| c.is_ascii_digit()));
        }
    }
}
