//! ViaCEP wire types.

use serde::Deserialize;

use crate::services::AddressRecord;

/// The `erro` flag; ViaCEP has sent both `true` and `"true"` over time.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum ErrorFlag {
    Bool(bool),
    Text(String),
}

impl ErrorFlag {
    fn is_set(&self) -> bool {
        match self {
            Self::Bool(flag) => *flag,
            Self::Text(text) => text.trim().eq_ignore_ascii_case("true"),
        }
    }
}

/// Response body of `GET /ws/{cep}/json/`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ViaCepResponse {
    pub logradouro: String,
    pub complemento: String,
    pub bairro: String,
    pub localidade: String,
    pub uf: String,
    pub erro: Option<ErrorFlag>,
}

impl ViaCepResponse {
    /// `None` when ViaCEP flagged the CEP as unknown.
    #[must_use]
    pub fn into_record(self) -> Option<AddressRecord> {
        if self.erro.as_ref().is_some_and(ErrorFlag::is_set) {
            return None;
        }

        Some(AddressRecord {
            street: self.logradouro,
            complement: self.complemento,
            district: self.bairro,
            city: self.localidade,
            state: self.uf,
        })
    }
}
