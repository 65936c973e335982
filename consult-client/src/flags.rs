/// Флаг, если страна не из таблицы.
pub const FALLBACK_FLAG: &str = "🌍";

const FLAGS: &[(&str, &str)] = &[
    ("united states", "🇺🇸"),
    ("united kingdom", "🇬🇧"),
    ("canada", "🇨🇦"),
    ("australia", "🇦🇺"),
    ("germany", "🇩🇪"),
    ("france", "🇫🇷"),
    ("netherlands", "🇳🇱"),
    ("switzerland", "🇨🇭"),
    ("singapore", "🇸🇬"),
    ("japan", "🇯🇵"),
    ("south korea", "🇰🇷"),
    ("new zealand", "🇳🇿"),
    ("india", "🇮🇳"),
    ("china", "🇨🇳"),
    ("italy", "🇮🇹"),
    ("spain", "🇪🇸"),
    ("ireland", "🇮🇪"),
    ("sweden", "🇸🇪"),
    ("norway", "🇳🇴"),
    ("finland", "🇫🇮"),
    ("denmark", "🇩🇰"),
    ("united arab emirates", "🇦🇪"),
    ("malaysia", "🇲🇾"),
];

/// Эмодзи-флаг страны по названию, без учёта регистра и пробелов по краям.
pub fn country_flag(country: &str) -> &'static str {
    let country = country.trim().to_lowercase();
    FLAGS
        .iter()
        .find(|(name, _)| *name == country)
        .map_or(FALLBACK_FLAG, |&(_, flag)| flag)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_ignores_case_and_padding() {
        assert_eq!(country_flag("  United Kingdom "), "🇬🇧");
        assert_eq!(country_flag("JAPAN"), "🇯🇵");
    }

    #[test]
    fn unknown_country_gets_globe() {
        assert_eq!(country_flag("Atlantis"), FALLBACK_FLAG);
        assert_eq!(country_flag(""), FALLBACK_FLAG);
    }
}
