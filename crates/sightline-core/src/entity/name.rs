use unicode_general_category::{GeneralCategory, get_general_category};

/// Strip everything but letters, decimal digits, punctuation and whitespace.
///
/// Player names are attacker-controlled text that ends up in the overlay, so
/// control and formatting characters (bidi overrides, zero-width joiners)
/// are dropped. Symbols and non-decimal numerals are dropped as well.
pub fn sanitize_name(raw: &str) -> String {
    raw.chars().filter(|&c| is_kept(c)).collect()
}

fn is_kept(c: char) -> bool {
    if c.is_whitespace() {
        return true;
    }
    matches!(
        get_general_category(c),
        GeneralCategory::UppercaseLetter
            | GeneralCategory::LowercaseLetter
            | GeneralCategory::TitlecaseLetter
            | GeneralCategory::ModifierLetter
            | GeneralCategory::OtherLetter
            | GeneralCategory::DecimalNumber
            | GeneralCategory::ConnectorPunctuation
            | GeneralCategory::DashPunctuation
            | GeneralCategory::OpenPunctuation
            | GeneralCategory::ClosePunctuation
            | GeneralCategory::InitialPunctuation
            | GeneralCategory::FinalPunctuation
            | GeneralCategory::OtherPunctuation
    )
}
