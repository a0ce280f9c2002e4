//! Deterministic category suggestion from transaction descriptions.
//!
//! A static keyword table maps merchant vocabulary to candidate category
//! names; candidates are resolved against the *user's own* categories, so
//! a suggestion is only ever one of their ids. No match means no suggestion
//! (the user picks by hand) — rows are never defaulted.

use std::collections::HashMap;

use crate::model::{Category, ParsedTransaction};
use crate::text::normalize;

struct KeywordRule {
    /// Normalized substrings probed against the description.
    keywords: &'static [&'static str],
    /// Normalized category names tried against the user's list, in order.
    candidates: &'static [&'static str],
}

/// Curated Brazilian-merchant vocabulary. Keywords and candidate names are
/// already in normalized form (lowercase, no diacritics).
static KEYWORD_RULES: &[KeywordRule] = &[
    KeywordRule {
        keywords: &["uber", "99app", "99 *", "taxi", "cabify", "metro", "onibus", "estacionamento"],
        candidates: &["transporte", "mobilidade"],
    },
    KeywordRule {
        keywords: &["ifood", "rappi", "restaurante", "lanchonete", "pizzaria", "burger", "padaria", "cafeteria"],
        candidates: &["alimentacao", "restaurantes", "comida"],
    },
    KeywordRule {
        keywords: &["supermercado", "mercado", "carrefour", "pao de acucar", "atacadao", "assai", "hortifruti"],
        candidates: &["mercado", "alimentacao", "compras"],
    },
    KeywordRule {
        keywords: &["farmacia", "drogaria", "drogasil", "pague menos", "laboratorio", "clinica", "hospital"],
        candidates: &["saude", "farmacia"],
    },
    KeywordRule {
        keywords: &["netflix", "spotify", "disney", "hbo", "globoplay", "prime video", "deezer", "assinatura"],
        candidates: &["assinaturas", "streaming", "lazer"],
    },
    KeywordRule {
        keywords: &["posto", "ipiranga", "shell", "petrobras", "combustivel", "gasolina", "etanol"],
        candidates: &["combustivel", "transporte", "carro"],
    },
    KeywordRule {
        keywords: &["academia", "smart fit", "smartfit", "crossfit", "pilates"],
        candidates: &["academia", "saude", "esporte"],
    },
    KeywordRule {
        keywords: &["aluguel", "condominio", "imobiliaria"],
        candidates: &["moradia", "casa", "aluguel"],
    },
    KeywordRule {
        keywords: &["enel", "light ", "cemig", "copel", "sabesp", "energia", "agua e esgoto"],
        candidates: &["contas", "moradia", "casa"],
    },
    KeywordRule {
        keywords: &["vivo", "claro", "tim ", "oi movel", "internet", "banda larga"],
        candidates: &["telefone", "contas", "internet"],
    },
    KeywordRule {
        keywords: &["latam", "gol linhas", "azul linhas", "airbnb", "booking", "hotel", "hostel", "passagem"],
        candidates: &["viagem", "lazer"],
    },
    KeywordRule {
        keywords: &["faculdade", "universidade", "escola", "curso", "udemy", "alura", "mensalidade"],
        candidates: &["educacao", "cursos"],
    },
    KeywordRule {
        keywords: &["cinema", "ingresso", "teatro", "show", "steam", "playstation", "xbox"],
        candidates: &["lazer", "entretenimento"],
    },
    KeywordRule {
        keywords: &["petz", "cobasi", "veterinari", "pet shop", "petshop"],
        candidates: &["pets", "animais"],
    },
    KeywordRule {
        keywords: &["salario", "pagamento recebido", "pix recebido", "ted recebida", "rendimento", "provento"],
        candidates: &["renda", "salario", "receitas"],
    },
    KeywordRule {
        keywords: &["amazon", "mercado livre", "mercadolivre", "shopee", "aliexpress", "magalu", "magazine luiza"],
        candidates: &["compras", "lazer"],
    },
];

/// Best-effort category suggestion for one description.
///
/// Keyword rules win; otherwise any user category whose own name (3+ chars)
/// appears inside the description is taken. `None` when nothing fits.
pub fn match_category(description: &str, categories: &[Category]) -> Option<i64> {
    if categories.is_empty() {
        return None;
    }
    let desc = normalize(description);

    for rule in KEYWORD_RULES {
        if !rule.keywords.iter().any(|k| desc.contains(k)) {
            continue;
        }
        for candidate in rule.candidates {
            if let Some(cat) = categories.iter().find(|c| normalize(&c.name) == *candidate) {
                return Some(cat.id);
            }
        }
    }

    // Fallback: the category name itself shows up in the description.
    categories
        .iter()
        .find(|c| {
            let name = normalize(&c.name);
            name.chars().count() >= 3 && desc.contains(&name)
        })
        .map(|c| c.id)
}

/// Batch variant: row index -> suggested category id. Rows with no match
/// are absent from the map.
pub fn suggest_categories(
    transactions: &[ParsedTransaction],
    categories: &[Category],
) -> HashMap<usize, i64> {
    transactions
        .iter()
        .enumerate()
        .filter_map(|(i, t)| match_category(&t.description, categories).map(|id| (i, id)))
        .collect()
}
