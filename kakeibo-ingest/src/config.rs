use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::hash::DEFAULT_TIMEZONE;
use crate::parsers::{
    CardStatementParser, DebitBankParser, StatementFormat, StatementParser, SumishinSbiParser,
    card_statement, debit_bank, sumishin_sbi,
};

/// Tunables for the statement parsers. Every field has a working default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Timezone statement dates are local to; feeds the dedup key.
    pub timezone: Tz,
    pub sumishin_transfer_keywords: Vec<String>,
    pub debit_bank_transfer_markers: Vec<String>,
    /// Suffix closing a card holder's section header.
    pub holder_suffix: String,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            timezone: DEFAULT_TIMEZONE,
            sumishin_transfer_keywords: to_strings(sumishin_sbi::DEFAULT_TRANSFER_KEYWORDS),
            debit_bank_transfer_markers: to_strings(debit_bank::DEFAULT_TRANSFER_MARKERS),
            holder_suffix: card_statement::DEFAULT_HOLDER_SUFFIX.to_string(),
        }
    }
}

impl ParserConfig {
    pub fn parser_for(&self, format: StatementFormat) -> Box<dyn StatementParser> {
        match format {
            StatementFormat::SumishinSbi => Box::new(SumishinSbiParser::new(
                self.sumishin_transfer_keywords.clone(),
                self.timezone,
            )),
            StatementFormat::DebitBank => Box::new(DebitBankParser::new(
                self.debit_bank_transfer_markers.clone(),
                self.timezone,
            )),
            StatementFormat::CardStatement => {
                Box::new(CardStatementParser::new(self.holder_suffix.clone(), self.timezone))
            }
        }
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::ALL_FORMATS;

    #[test]
    fn test_defaults() {
        let cfg = ParserConfig::default();
        assert_eq!(cfg.timezone, chrono_tz::Asia::Tokyo);
        assert_eq!(cfg.sumishin_transfer_keywords, vec!["ハイブリッド預金"]);
        assert_eq!(cfg.debit_bank_transfer_markers.len(), 2);
        assert_eq!(cfg.holder_suffix, "様");
    }

    #[test]
    fn test_parser_for_each_format() {
        let cfg = ParserConfig::default();
        for fmt in ALL_FORMATS {
            assert_eq!(cfg.parser_for(*fmt).format(), *fmt);
        }
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let cfg: ParserConfig =
            serde_json::from_str(r#"{"timezone":"UTC","holder_suffix":"殿"}"#).unwrap();
        assert_eq!(cfg.timezone, chrono_tz::UTC);
        assert_eq!(cfg.holder_suffix, "殿");
        assert_eq!(cfg.sumishin_transfer_keywords, vec!["ハイブリッド預金"]);
    }
}
