use crate::db::DatabaseError;
use serde::{Deserialize, Serialize};

/// Macro to generate enum with as_str + std::str::FromStr pattern.
/// The string form doubles as the serde name and the stored column value.
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $s)] $variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = DatabaseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(DatabaseError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

str_enum!(Module {
    Nfe => "NFE",
    Nfce => "NFCE",
    Mdfe => "MDFE",
    Cte => "CTE",
    FrenteDeCaixa => "FRENTE_DE_CAIXA",
    Certificado => "CERTIFICADO",
    ConfiguracaoDeConta => "CONFIGURACAO_DE_CONTA",
    ComercialVendas => "COMERCIAL_VENDAS",
    Estoque => "ESTOQUE",
    Financeiro => "FINANCEIRO",
    Boletos => "BOLETOS",
    MarketplaceLojaVirtual => "MARKETPLACE_LOJA_VIRTUAL",
    Restaurante => "RESTAURANTE",
    Relatorio => "RELATORIO",
    Generic => "GENERIC",
});

str_enum!(Mood {
    Good => "GOOD",
    Neutral => "NEUTRAL",
    Irritated => "IRRITATED",
});

impl Default for Module {
    fn default() -> Self {
        Module::Generic
    }
}

impl Default for Mood {
    fn default() -> Self {
        Mood::Good
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn module_round_trips_through_str() {
        for module in [Module::Nfe, Module::ConfiguracaoDeConta, Module::Generic] {
            assert_eq!(Module::from_str(module.as_str()).unwrap(), module);
        }
    }

    #[test]
    fn unknown_module_is_invalid_enum() {
        let err = Module::from_str("PADARIA").unwrap_err();
        assert!(matches!(err, DatabaseError::InvalidEnum { .. }));
    }

    #[test]
    fn serde_uses_screaming_names() {
        assert_eq!(
            serde_json::to_string(&Module::MarketplaceLojaVirtual).unwrap(),
            "\"MARKETPLACE_LOJA_VIRTUAL\""
        );
        let mood: Mood = serde_json::from_str("\"IRRITATED\"").unwrap();
        assert_eq!(mood, Mood::Irritated);
    }

    #[test]
    fn defaults_are_generic_and_good() {
        assert_eq!(Module::default(), Module::Generic);
        assert_eq!(Mood::default(), Mood::Good);
    }
}
