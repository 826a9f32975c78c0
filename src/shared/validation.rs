use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

lazy_static! {
    /// Regex for validating category slugs
    /// Must be lowercase alphanumeric with hyphens
    /// - Valid: "kantor-pemerintahan", "umkm", "fasilitas-umum-2"
    /// - Invalid: "-umkm", "umkm-", "tempat--ibadah", "Umkm", "tempat_ibadah"
    pub static ref SLUG_REGEX: Regex = Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap();

    /// Regex for validating hex colors ("#3B82F6" or "#fff")
    pub static ref COLOR_REGEX: Regex =
        Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").unwrap();

    static ref SLUG_STRIP: Regex = Regex::new(r"[^a-z0-9_\s-]").unwrap();
    static ref SLUG_SEPARATORS: Regex = Regex::new(r"[\s_-]+").unwrap();
}

/// Derive a category id from its display name.
/// "Kantor Pemerintahan" -> "kantor-pemerintahan", "UMKM & Koperasi" -> "umkm-koperasi"
pub fn slugify(name: &str) -> String {
    let lowered = name.to_lowercase();
    let stripped = SLUG_STRIP.replace_all(&lowered, "");
    let joined = SLUG_SEPARATORS.replace_all(&stripped, "-");
    joined.trim_matches('-').to_string()
}

/// Reject values that are empty once surrounding whitespace is trimmed
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}
