// Country names to ISO 3166-1 alpha-2 codes, as they appear in the source
// data (Spanish and English spellings).

pub const COUNTRY_CODES: [(&str, &str); 56] = [
    ("Perú", "PE"),
    ("Peru", "PE"),
    ("Brasil", "BR"),
    ("Brazil", "BR"),
    ("Argentina", "AR"),
    ("Chile", "CL"),
    ("Colombia", "CO"),
    ("Ecuador", "EC"),
    ("Bolivia", "BO"),
    ("Venezuela", "VE"),
    ("Paraguay", "PY"),
    ("Uruguay", "UY"),
    ("México", "MX"),
    ("Mexico", "MX"),
    ("Costa Rica", "CR"),
    ("Panamá", "PA"),
    ("Panama", "PA"),
    ("Guatemala", "GT"),
    ("Honduras", "HN"),
    ("El Salvador", "SV"),
    ("Nicaragua", "NI"),
    ("Cuba", "CU"),
    ("República Dominicana", "DO"),
    ("Puerto Rico", "PR"),
    ("España", "ES"),
    ("Spain", "ES"),
    ("Estados Unidos", "US"),
    ("USA", "US"),
    ("United States", "US"),
    ("Canadá", "CA"),
    ("Canada", "CA"),
    ("Francia", "FR"),
    ("France", "FR"),
    ("Alemania", "DE"),
    ("Germany", "DE"),
    ("Italia", "IT"),
    ("Italy", "IT"),
    ("Reino Unido", "GB"),
    ("United Kingdom", "GB"),
    ("Portugal", "PT"),
    ("Países Bajos", "NL"),
    ("Netherlands", "NL"),
    ("Bélgica", "BE"),
    ("Belgium", "BE"),
    ("Suiza", "CH"),
    ("Switzerland", "CH"),
    ("Australia", "AU"),
    ("Nueva Zelanda", "NZ"),
    ("New Zealand", "NZ"),
    ("Japón", "JP"),
    ("Japan", "JP"),
    ("China", "CN"),
    ("India", "IN"),
    ("Sudáfrica", "ZA"),
    ("South Africa", "ZA"),
];

/// The two-letter code for a country name, if known.
///
/// Matching is case-insensitive; a substring match in either direction is
/// accepted as a fallback for decorated names ("Lima, Perú").
pub fn country_code(name: &str) -> Option<&'static str> {
    let clean = name.trim().to_lowercase();
    if clean.is_empty() {
        return None;
    }
    for (known, code) in COUNTRY_CODES.iter() {
        if known.to_lowercase() == clean {
            return Some(code);
        }
    }
    for (known, code) in COUNTRY_CODES.iter() {
        let known_clean = known.to_lowercase();
        if known_clean.contains(&clean) || clean.contains(&known_clean) {
            return Some(code);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_exact_names_in_both_spellings() {
        assert_eq!(country_code("Perú"), Some("PE"));
        assert_eq!(country_code("peru"), Some("PE"));
        assert_eq!(country_code("BRAZIL"), Some("BR"));
    }

    #[test]
    fn falls_back_to_substring_matching() {
        assert_eq!(country_code("Lima, Perú"), Some("PE"));
        assert_eq!(country_code("Republica"), None);
    }

    #[test]
    fn unknown_and_empty_names_have_no_code() {
        assert_eq!(country_code("Atlantis"), None);
        assert_eq!(country_code("  "), None);
    }
}
