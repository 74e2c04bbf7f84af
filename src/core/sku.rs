//! SKU generation and format checks.
//!
//! Generated SKUs are not checked for collisions here; uniqueness is enforced
//! when the item is saved.

/// Prefix of every generated SKU
pub const SKU_PREFIX: &str = "SKU-";

/// Longest SKU accepted from user input
pub const MAX_SKU_LEN: usize = 64;

/// Generates `SKU-` followed by 8 uppercase hex characters from a random UUID.
#[must_use]
pub fn generate_sku() -> String {
    let token = uuid::Uuid::new_v4().simple().to_string();
    format!("{SKU_PREFIX}{}", token[..8].to_uppercase())
}

/// Returns true if `sku` is usable as an identifier.
#[must_use]
pub fn is_valid_sku_format(sku: &str) -> bool {
    !sku.is_empty() && sku.len() <= MAX_SKU_LEN && !sku.chars().any(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_sku_shape() {
        let sku = generate_sku();
        assert!(sku.starts_with(SKU_PREFIX));
        let token = &sku[SKU_PREFIX.len()..];
        assert_eq!(token.len(), 8);
        assert!(
            token
                .chars()
                .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase())
        );
        assert!(is_valid_sku_format(&sku));
    }

    #[test]
    fn test_generated_skus_differ() {
        assert_ne!(generate_sku(), generate_sku());
    }

    #[test]
    fn test_sku_format() {
        assert!(is_valid_sku_format("ABC-123"));
        assert!(!is_valid_sku_format(""));
        assert!(!is_valid_sku_format("ABC 123"));
        assert!(!is_valid_sku_format(&"X".repeat(MAX_SKU_LEN + 1)));
    }
}
