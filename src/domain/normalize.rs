//! Static canonicalization tables for product names and currency wording,
//! plus the case-insensitive longest-match-first replacement they share.
//!
//! The tables feed two consumers: the bulk importer rewrites currency
//! mentions in question text before embedding, and the normalization
//! prompt renders both tables into the instruction given to the chat model.

use std::sync::LazyLock;

/// Canonical product names as they appear in the FAQ export.
pub const PRODUCT_NAMES: [&str; 17] = [
    "MORE",
    "Форсаж",
    "Комплимент",
    "Signature",
    "PLAT/ON",
    "Портмоне 2.0",
    "Отличник",
    "ЧЕРЕПАХА",
    "КСТАТИ",
    "На всё про всё",
    "Дальше - меньше",
    "Легко платить",
    "Всё только начинается",
    "Старт",
    "Проще в онлайн",
    "СуперСемь",
    "Mir Pay",
];

/// `(alias, canonical)` pairs for product names. Aliases are lowercase;
/// Latin-scripted names also get the Cyrillic spelling customers type.
pub static PRODUCT_ALIASES: LazyLock<Vec<(String, String)>> = LazyLock::new(|| {
    let mut aliases = Vec::new();
    for name in PRODUCT_NAMES {
        aliases.push((name.to_lowercase(), name.to_string()));

        if name.chars().any(|c| c.is_ascii_uppercase()) {
            let approx = cyrillic_approximation(name);
            if approx != name {
                aliases.push((approx.to_lowercase(), name.to_string()));
            }
        }
    }
    aliases
});

fn cyrillic_approximation(name: &str) -> String {
    let mut approx = name.to_string();
    for (latin, cyrillic) in [("MORE", "МОРЕ"), ("PLAT/ON", "ПЛАТ/ОН"), ("Mir Pay", "МИР ПЭЙ")] {
        approx = replace_aliases(&approx, &[(latin.to_lowercase(), cyrillic.to_string())]);
    }
    approx.split_whitespace().collect()
}

/// Currency wording mapped to ISO-like codes, as used in FAQ question text.
pub static CURRENCY_ALIASES: LazyLock<Vec<(String, String)>> = LazyLock::new(|| {
    [
        ("белорусский рубль", "BYN"),
        ("белорусских рублей", "BYN"),
        ("белорусских рублях", "BYN"),
        ("белорусские рубли", "BYN"),
        ("BYN", "BYN"),
        ("базовых величин Республики Беларусь", "BYN"),
        ("российский рубль", "RUB"),
        ("российских рублях", "RUB"),
        ("российских рублей", "RUB"),
        ("российские рубли", "RUB"),
        ("рублевый", "RUB"),
        ("руб.", "RUB"),
        ("российских руб.", "RUB"),
        ("доллар США", "USD"),
        ("долларовый", "USD"),
        ("долларах США", "USD"),
        ("доллары США", "USD"),
        ("долларов США", "USD"),
        ("доллара", "USD"),
        ("долл.", "USD"),
        ("долларов", "USD"),
        ("евро", "EUR"),
        ("евровых", "EUR"),
        ("китайский юань", "CNY"),
        ("китайских юанях", "CNY"),
        ("китайских юаней", "CNY"),
        ("китайские юани", "CNY"),
        ("юани", "CNY"),
        ("китайской валюте", "CNY"),
    ]
    .into_iter()
    .map(|(alias, code)| (alias.to_string(), code.to_string()))
    .collect()
});

/// Replaces every alias occurrence in `text` with its canonical form.
///
/// Matching is case-insensitive and longest-alias-first, so a multi-word
/// alias is never shadowed by a shorter one it contains. Non-matching
/// input passes through with its original casing intact.
pub fn replace_aliases(text: &str, aliases: &[(String, String)]) -> String {
    // Lowercase view of the input. Each lowercase char remembers the byte
    // offset of the original char it came from so untouched spans can be
    // copied back verbatim.
    let mut lower: Vec<char> = Vec::new();
    let mut origin: Vec<usize> = Vec::new();
    for (offset, ch) in text.char_indices() {
        for lc in ch.to_lowercase() {
            lower.push(lc);
            origin.push(offset);
        }
    }

    let mut needles: Vec<(Vec<char>, &str)> = aliases
        .iter()
        .filter(|(alias, _)| !alias.is_empty())
        .map(|(alias, canonical)| (alias.to_lowercase().chars().collect(), canonical.as_str()))
        .collect();
    needles.sort_by(|a, b| b.0.len().cmp(&a.0.len()));

    let mut out = String::with_capacity(text.len());
    let mut i = 0;
    'scan: while i < lower.len() {
        for (needle, canonical) in &needles {
            if i + needle.len() <= lower.len() && lower[i..i + needle.len()] == needle[..] {
                out.push_str(canonical);
                i += needle.len();
                continue 'scan;
            }
        }

        let start = origin[i];
        let mut j = i + 1;
        while j < lower.len() && origin[j] == start {
            j += 1;
        }
        let end = if j < lower.len() { origin[j] } else { text.len() };
        out.push_str(&text[start..end]);
        i = j;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_phrases_map_to_codes() {
        assert_eq!(
            replace_aliases("перевести 100 долларов США", &CURRENCY_ALIASES),
            "перевести 100 USD"
        );
        assert_eq!(replace_aliases("счёт в евро", &CURRENCY_ALIASES), "счёт в EUR");
        assert_eq!(
            replace_aliases("вклад в китайских юанях", &CURRENCY_ALIASES),
            "вклад в CNY"
        );
    }

    #[test]
    fn test_longest_alias_wins() {
        // "долларов США" must win over the bare "долларов" inside it
        assert_eq!(
            replace_aliases("долларов США", &CURRENCY_ALIASES),
            "USD"
        );
        // and the bare form still maps on its own
        assert_eq!(replace_aliases("100 долларов", &CURRENCY_ALIASES), "100 USD");
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        assert_eq!(replace_aliases("Долларов США", &CURRENCY_ALIASES), "USD");
        assert_eq!(replace_aliases("ЕВРО", &CURRENCY_ALIASES), "EUR");
    }

    #[test]
    fn test_product_aliases_canonicalize_cyrillic_spellings() {
        assert_eq!(replace_aliases("плат/он", &PRODUCT_ALIASES), "PLAT/ON");
        assert_eq!(replace_aliases("море", &PRODUCT_ALIASES), "MORE");
        assert_eq!(replace_aliases("карта черепаха", &PRODUCT_ALIASES), "карта ЧЕРЕПАХА");
    }

    #[test]
    fn test_canonical_name_is_identity() {
        assert_eq!(replace_aliases("MORE", &PRODUCT_ALIASES), "MORE");
        assert_eq!(replace_aliases("Mir Pay", &PRODUCT_ALIASES), "Mir Pay");
    }

    #[test]
    fn test_unrelated_text_passes_through() {
        let text = "Как открыть счёт?";
        assert_eq!(replace_aliases(text, &CURRENCY_ALIASES), text);
    }
}
