//! Fixed instruction prompts for the two rewrite stages.

use crate::domain::normalize::{CURRENCY_ALIASES, PRODUCT_ALIASES};

/// System prompt for the normalization stage: canonicalize product names
/// and currency wording from the static tables, fix grammar and typos,
/// expand abbreviations, and answer with the corrected question only.
pub fn normalization_prompt() -> String {
    format!(
        "Ты обрабатываешь вопросы клиентов банка перед поиском по базе знаний.\n\
         Перепиши вопрос клиента:\n\
         1. Замени названия продуктов по таблице:\n{products}\n\
         2. Замени упоминания валют на коды:\n{currencies}\n\
         3. Исправь грамматику, пунктуацию и опечатки.\n\
         4. Раскрой сокращения, которых нет в таблицах.\n\
         Ответь только исправленным вопросом, без кавычек и пояснений.",
        products = render_alias_table(&PRODUCT_ALIASES),
        currencies = render_alias_table(&CURRENCY_ALIASES),
    )
}

/// System prompt for the standalone-ization stage.
pub fn standalone_prompt() -> &'static str {
    "Given a question, convert it to a standalone question that can be \
     understood without any prior conversation. Reply with the standalone \
     question only."
}

fn render_alias_table(aliases: &[(String, String)]) -> String {
    aliases
        .iter()
        .map(|(alias, canonical)| {
            format!("если найдено \"{alias}\" -> заменить на \"{canonical}\"")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Strips the quoting wrapper a chat model sometimes adds around its answer.
pub fn strip_wrapper(text: &str) -> String {
    let trimmed = text.trim();
    let stripped = [("\"", "\""), ("«", "»"), ("'", "'")]
        .iter()
        .find_map(|(open, close)| {
            trimmed
                .strip_prefix(open)
                .and_then(|s| s.strip_suffix(close))
        })
        .unwrap_or(trimmed);
    stripped.trim().to_string()
}
