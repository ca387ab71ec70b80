use crate::models::{Module, Mood};

/// Module phrases in priority order; the first contained phrase wins.
///
/// More specific phrases must stay ahead of the ones they contain.
pub const MODULE_PATTERNS: &[(&str, Module)] = &[
    ("NF-E (NOTA FISCAL ELETRÔNICA)", Module::Nfe),
    ("NFC-E (NOTA FISCAL DO CONSUMIDOR ELETRÔNICA)", Module::Nfce),
    ("MDF-E", Module::Mdfe),
    ("CT-E", Module::Cte),
    ("FRENTE DE CAIXA", Module::FrenteDeCaixa),
    ("CERTIFICADO", Module::Certificado),
    ("CONFIGURAÇÃO DE CONTA", Module::ConfiguracaoDeConta),
    ("COMERCIAL/VENDAS", Module::ComercialVendas),
    ("ESTOQUE", Module::Estoque),
    ("FINANCEIRO", Module::Financeiro),
    ("BOLETOS", Module::Boletos),
    ("MARKETPLACE / LOJA VIRTUAL", Module::MarketplaceLojaVirtual),
    ("RESTAURANTE", Module::Restaurante),
    ("RELATÓRIO", Module::Relatorio),
];

/// Mood tokens checked in order; unmatched text is `Mood::Good`.
pub const MOOD_PATTERNS: &[(&str, Mood)] = &[
    ("BOM", Mood::Good),
    ("NEUTRO", Mood::Neutral),
    ("IRRITADO", Mood::Irritated),
];

/// Map a free-text module label to the closed module set.
/// Total: empty or unknown labels are `Module::Generic`.
pub fn classify_module(label: &str) -> Module {
    first_match(label, MODULE_PATTERNS).unwrap_or_default()
}

/// Map a free-text mood label to the closed mood set.
pub fn classify_mood(label: &str) -> Mood {
    first_match(label, MOOD_PATTERNS).unwrap_or_default()
}

fn first_match<T: Copy>(label: &str, patterns: &[(&str, T)]) -> Option<T> {
    if label.trim().is_empty() {
        return None;
    }
    let upper = label.to_uppercase();
    patterns
        .iter()
        .find(|(phrase, _)| upper.contains(phrase))
        .map(|(_, value)| *value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_exact_phrases() {
        assert_eq!(classify_module("ESTOQUE"), Module::Estoque);
        assert_eq!(classify_module("FRENTE DE CAIXA"), Module::FrenteDeCaixa);
        assert_eq!(
            classify_module("MARKETPLACE / LOJA VIRTUAL"),
            Module::MarketplaceLojaVirtual
        );
    }

    #[test]
    fn classify_is_case_insensitive_with_accents() {
        assert_eq!(classify_module("configuração de conta"), Module::ConfiguracaoDeConta);
        assert_eq!(classify_module("Relatório"), Module::Relatorio);
        assert_eq!(
            classify_module("nf-e (nota fiscal eletrônica)"),
            Module::Nfe
        );
    }

    #[test]
    fn classify_matches_inside_surrounding_text() {
        assert_eq!(classify_module("- NFC-E (NOTA FISCAL DO CONSUMIDOR ELETRÔNICA)."), Module::Nfce);
        assert_eq!(classify_module("Módulo escolhido: BOLETOS"), Module::Boletos);
    }

    #[test]
    fn classify_respects_priority_order() {
        // Both phrases present: the earlier entry wins.
        assert_eq!(classify_module("CT-E e ESTOQUE"), Module::Cte);
        assert_eq!(classify_module("MDF-E vinculado a CT-E"), Module::Mdfe);
    }

    #[test]
    fn unknown_or_empty_is_generic() {
        assert_eq!(classify_module(""), Module::Generic);
        assert_eq!(classify_module("   "), Module::Generic);
        assert_eq!(classify_module("GENÉRICO"), Module::Generic);
        assert_eq!(classify_module("padaria"), Module::Generic);
        assert_eq!(classify_module("NFE"), Module::Generic);
    }

    #[test]
    fn every_module_except_generic_has_a_pattern() {
        assert_eq!(MODULE_PATTERNS.len(), 14);
        assert!(MODULE_PATTERNS.iter().all(|(_, m)| *m != Module::Generic));
    }

    #[test]
    fn mood_tokens() {
        assert_eq!(classify_mood("BOM."), Mood::Good);
        assert_eq!(classify_mood("neutro."), Mood::Neutral);
        assert_eq!(classify_mood("Irritado"), Mood::Irritated);
    }

    #[test]
    fn unknown_mood_defaults_to_good() {
        assert_eq!(classify_mood(""), Mood::Good);
        assert_eq!(classify_mood("ansioso"), Mood::Good);
    }
}
