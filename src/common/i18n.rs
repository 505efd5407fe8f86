// src/common/i18n.rs

use std::collections::HashMap;

const DEFAULT_LANG: &str = "en";

// Catálogo de mensagens: código do erro -> frase.
// Os códigos são os mesmos usados em AppError::code() e nas mensagens do `validator`.
const EN: &[(&str, &str)] = &[
    ("validation_failed", "One or more fields are invalid."),
    ("invalid_day_of_week", "Day of week must be between 0 (Sunday) and 6 (Saturday)."),
    ("duplicate_booking", "You already have a booking for this class on this date."),
    ("invalid_payment_transition", "This payment status change is not allowed."),
    ("resource_not_found", "The requested resource was not found."),
    ("invalid_token", "Invalid or missing authentication token."),
    ("user_not_found", "User not found."),
    ("forbidden", "You do not have permission to perform this action."),
    ("unexpected_error", "An unexpected error occurred."),
    // Formulário de atribuição
    ("select_class", "Please select a class"),
    ("select_instructor", "Please select an instructor"),
    ("negative_amount", "Payment amount cannot be negative"),
    ("amount_too_large", "Payment amount must be at most 99999999.99"),
    ("amount_too_precise", "Payment amount can have at most 2 decimal places"),
    ("unknown_class", "The selected class does not exist"),
    ("unknown_instructor", "The selected instructor does not exist"),
    // Formulário de reserva
    ("invalid_email", "The e-mail address is invalid."),
    ("too_long", "The value is too long."),
];

const PT: &[(&str, &str)] = &[
    ("validation_failed", "Um ou mais campos são inválidos."),
    ("invalid_day_of_week", "O dia da semana deve estar entre 0 (domingo) e 6 (sábado)."),
    ("duplicate_booking", "Você já possui uma reserva para esta aula nesta data."),
    ("invalid_payment_transition", "Esta mudança de status de pagamento não é permitida."),
    ("resource_not_found", "O recurso solicitado não foi encontrado."),
    ("invalid_token", "Token de autenticação inválido ou ausente."),
    ("user_not_found", "Usuário não encontrado."),
    ("forbidden", "Você não tem permissão para realizar esta ação."),
    ("unexpected_error", "Ocorreu um erro inesperado."),
    ("select_class", "Selecione uma aula"),
    ("select_instructor", "Selecione um instrutor"),
    ("negative_amount", "O valor do pagamento não pode ser negativo"),
    ("amount_too_large", "O valor do pagamento deve ser no máximo 99999999.99"),
    ("amount_too_precise", "O valor do pagamento pode ter no máximo 2 casas decimais"),
    ("unknown_class", "A aula selecionada não existe"),
    ("unknown_instructor", "O instrutor selecionado não existe"),
    ("invalid_email", "O e-mail fornecido é inválido."),
    ("too_long", "O valor é muito longo."),
];

#[derive(Debug, Clone)]
pub struct I18nStore {
    catalogs: HashMap<&'static str, HashMap<&'static str, &'static str>>,
}

impl Default for I18nStore {
    fn default() -> Self {
        let mut catalogs = HashMap::new();
        catalogs.insert("en", EN.iter().copied().collect());
        catalogs.insert("pt", PT.iter().copied().collect());
        Self { catalogs }
    }
}

impl I18nStore {
    /// Traduz um código. Idioma desconhecido cai no inglês;
    /// código desconhecido é devolvido como veio.
    pub fn translate(&self, lang: &str, key: &str) -> String {
        let lookup = |l: &str| self.catalogs.get(l).and_then(|c| c.get(key)).copied();

        lookup(lang)
            .or_else(|| lookup(DEFAULT_LANG))
            .map(str::to_string)
            .unwrap_or_else(|| key.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translates_known_language() {
        let store = I18nStore::default();
        assert_eq!(store.translate("pt", "user_not_found"), "Usuário não encontrado.");
    }

    #[test]
    fn unknown_language_falls_back_to_english() {
        let store = I18nStore::default();
        assert_eq!(store.translate("de", "user_not_found"), "User not found.");
    }

    #[test]
    fn unknown_code_is_returned_verbatim() {
        let store = I18nStore::default();
        assert_eq!(store.translate("en", "some_new_code"), "some_new_code");
    }

    #[test]
    fn every_english_code_has_a_portuguese_entry() {
        let pt: Vec<&str> = PT.iter().map(|(k, _)| *k).collect();
        for (key, _) in EN {
            assert!(pt.contains(key), "faltando tradução pt para {key}");
        }
    }
}
