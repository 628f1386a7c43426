//! Typed views over the CLDR JSON documents the Elm engine reads.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::plural::{Condition, PluralCategory, parse_rule};

#[derive(Debug, Deserialize)]
struct MainDocument {
    main: BTreeMap<String, Value>,
}

/// Decode the `main.<locale>` entry of a per-locale document.
///
/// Falls back to the only entry when the document is keyed differently from
/// its directory.
pub fn locale_entry<T: DeserializeOwned>(text: &str, locale: &str) -> Result<T, String> {
    let document: MainDocument = serde_json::from_str(text).map_err(|err| err.to_string())?;
    let mut main = document.main;
    let entry = match main.remove(locale) {
        Some(entry) => entry,
        None if main.len() == 1 => main.into_values().next().unwrap_or(Value::Null),
        None => return Err(format!("no `main.{locale}` entry")),
    };
    serde_json::from_value(entry).map_err(|err| err.to_string())
}

#[derive(Debug, Deserialize)]
pub struct NumbersEntry {
    pub numbers: NumbersSection,
}

#[derive(Debug, Deserialize)]
pub struct NumbersSection {
    #[serde(rename = "defaultNumberingSystem", default)]
    pub default_numbering_system: Option<String>,
    #[serde(flatten)]
    pub rest: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumberSymbols {
    pub decimal: String,
    pub group: Option<String>,
    pub percent_sign: Option<String>,
    pub plus_sign: Option<String>,
    pub minus_sign: Option<String>,
    pub exponential: Option<String>,
    pub per_mille: Option<String>,
    pub infinity: Option<String>,
    pub nan: Option<String>,
}

/// Number data resolved for the locale's default numbering system.
#[derive(Debug, Clone)]
pub struct LocaleNumbers {
    pub numbering_system: String,
    pub symbols: NumberSymbols,
    pub decimal_pattern: Option<String>,
}

impl NumbersSection {
    pub fn resolve(self) -> Result<LocaleNumbers, String> {
        let numbering_system = self
            .default_numbering_system
            .unwrap_or_else(|| "latn".to_string());

        let symbols_key = format!("symbols-numberSystem-{numbering_system}");
        let symbols = self
            .rest
            .get(&symbols_key)
            .cloned()
            .ok_or_else(|| format!("missing `{symbols_key}`"))?;
        let symbols: NumberSymbols = serde_json::from_value(symbols)
            .map_err(|err| format!("`{symbols_key}`: {err}"))?;

        let decimal_pattern = self
            .rest
            .get(&format!("decimalFormats-numberSystem-{numbering_system}"))
            .and_then(|formats| formats.get("standard"))
            .and_then(Value::as_str)
            .map(str::to_string);

        Ok(LocaleNumbers {
            numbering_system,
            symbols,
            decimal_pattern,
        })
    }
}

pub fn decode_numbers(text: &str, locale: &str) -> Result<LocaleNumbers, String> {
    locale_entry::<NumbersEntry>(text, locale)?.numbers.resolve()
}

#[derive(Debug, Deserialize)]
struct CurrenciesEntry {
    numbers: CurrenciesSection,
}

#[derive(Debug, Deserialize)]
struct CurrenciesSection {
    currencies: BTreeMap<String, Currency>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Currency {
    #[serde(rename = "displayName")]
    pub display_name: String,
    pub symbol: Option<String>,
}

/// Currencies keyed by ISO code, in code order.
pub fn decode_currencies(text: &str, locale: &str) -> Result<BTreeMap<String, Currency>, String> {
    Ok(locale_entry::<CurrenciesEntry>(text, locale)?.numbers.currencies)
}

#[derive(Debug, Deserialize)]
struct DelimitersEntry {
    delimiters: Delimiters,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Delimiters {
    pub quotation_start: String,
    pub quotation_end: String,
    pub alternate_quotation_start: String,
    pub alternate_quotation_end: String,
}

pub fn decode_delimiters(text: &str, locale: &str) -> Result<Delimiters, String> {
    Ok(locale_entry::<DelimitersEntry>(text, locale)?.delimiters)
}

#[derive(Debug, Deserialize)]
struct ListPatternsEntry {
    #[serde(rename = "listPatterns")]
    list_patterns: BTreeMap<String, ListPattern>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListPattern {
    pub start: String,
    pub middle: String,
    pub end: String,
    #[serde(rename = "2")]
    pub two: String,
}

const STANDARD_LIST_PATTERN: &str = "listPattern-type-standard";

pub fn decode_list_pattern(text: &str, locale: &str) -> Result<ListPattern, String> {
    let mut patterns = locale_entry::<ListPatternsEntry>(text, locale)?.list_patterns;
    patterns
        .remove(STANDARD_LIST_PATTERN)
        .ok_or_else(|| format!("missing `{STANDARD_LIST_PATTERN}`"))
}

#[derive(Debug, Deserialize)]
struct NumberingSystemsDocument {
    supplemental: NumberingSystemsSection,
}

#[derive(Debug, Deserialize)]
struct NumberingSystemsSection {
    #[serde(rename = "numberingSystems")]
    numbering_systems: BTreeMap<String, NumberingSystem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NumberingSystem {
    /// Present for numeric systems only; algorithmic systems carry rules instead.
    #[serde(rename = "_digits")]
    pub digits: Option<String>,
}

pub fn decode_numbering_systems(text: &str) -> Result<BTreeMap<String, NumberingSystem>, String> {
    let document: NumberingSystemsDocument =
        serde_json::from_str(text).map_err(|err| err.to_string())?;
    Ok(document.supplemental.numbering_systems)
}

/// Which supplemental plural document a table came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PluralKind {
    Cardinal,
    Ordinal,
}

impl PluralKind {
    pub fn key(self) -> &'static str {
        match self {
            Self::Cardinal => "plurals-type-cardinal",
            Self::Ordinal => "plurals-type-ordinal",
        }
    }

    /// Name of the generated Elm function.
    pub fn function_name(self) -> &'static str {
        match self {
            Self::Cardinal => "cardinal",
            Self::Ordinal => "ordinal",
        }
    }

    pub fn document(self) -> &'static str {
        match self {
            Self::Cardinal => "plurals.json",
            Self::Ordinal => "ordinals.json",
        }
    }
}

#[derive(Debug, Deserialize)]
struct PluralsDocument {
    supplemental: BTreeMap<String, Value>,
}

/// Compiled plural rules for one locale, in CLDR category order.
pub type PluralRules = Vec<(PluralCategory, Condition)>;

/// Plural rules of every locale in a supplemental plural document.
#[derive(Debug, Clone, Default)]
pub struct PluralTable {
    locales: BTreeMap<String, BTreeMap<String, String>>,
}

const RULE_PREFIX: &str = "pluralRule-count-";

impl PluralTable {
    pub fn decode(text: &str, kind: PluralKind) -> Result<Self, String> {
        let mut document: PluralsDocument =
            serde_json::from_str(text).map_err(|err| err.to_string())?;
        let table = document
            .supplemental
            .remove(kind.key())
            .ok_or_else(|| format!("missing `supplemental.{}`", kind.key()))?;
        let locales = serde_json::from_value(table).map_err(|err| err.to_string())?;
        Ok(Self { locales })
    }

    /// Raw rules for `locale`, falling back through its parent tags
    /// (`zh-Hant-HK`, `zh-Hant`, `zh`).
    fn raw_rules(&self, locale: &str) -> Option<&BTreeMap<String, String>> {
        let mut tag = locale;
        loop {
            if let Some(rules) = self.locales.get(tag) {
                return Some(rules);
            }
            tag = &tag[..tag.rfind(['-', '_'])?];
        }
    }

    /// Parse the rules for `locale`. A locale without rules only has `other`.
    pub fn rules_for(&self, locale: &str) -> Result<PluralRules, String> {
        let Some(raw) = self.raw_rules(locale) else {
            return Ok(Vec::new());
        };

        let mut rules = Vec::new();
        for (key, rule) in raw {
            let name = key.strip_prefix(RULE_PREFIX).unwrap_or(key);
            let category = PluralCategory::parse(name)
                .ok_or_else(|| format!("unknown plural category `{key}`"))?;
            let condition =
                parse_rule(rule).map_err(|err| format!("rule `{key}` ({rule:?}): {err}"))?;
            rules.push((category, condition));
        }
        rules.sort_by_key(|(category, _)| *category);
        Ok(rules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLURALS: &str = r#"{
      "supplemental": {
        "version": {"_unicodeVersion": "15.0.0"},
        "plurals-type-cardinal": {
          "en": {
            "pluralRule-count-one": "i = 1 and v = 0 @integer 1",
            "pluralRule-count-other": " @integer 0, 2~16"
          },
          "zh": {"pluralRule-count-other": " @integer 0~15"}
        }
      }
    }"#;

    #[test]
    fn plural_rules_fall_back_to_parent_tags() {
        let table = PluralTable::decode(PLURALS, PluralKind::Cardinal).expect("decode");
        let rules = table.rules_for("zh-Hant-HK").expect("rules");
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].0, PluralCategory::Other);

        let rules = table.rules_for("en-GB").expect("rules");
        let categories: Vec<_> = rules.iter().map(|(c, _)| *c).collect();
        assert_eq!(categories, vec![PluralCategory::One, PluralCategory::Other]);

        assert!(table.rules_for("xx").expect("rules").is_empty());
    }

    #[test]
    fn wrong_plural_document_is_reported() {
        let err = PluralTable::decode(PLURALS, PluralKind::Ordinal).expect_err("no ordinals");
        assert!(err.contains("plurals-type-ordinal"));
    }

    #[test]
    fn numbers_need_only_a_decimal_symbol() {
        let numbers = decode_numbers(
            r#"{"main":{"fr":{"numbers":{"symbols-numberSystem-latn":{"decimal":","}}}}}"#,
            "fr",
        )
        .expect("decode numbers");
        assert_eq!(numbers.numbering_system, "latn");
        assert_eq!(numbers.symbols.decimal, ",");
        assert!(numbers.symbols.group.is_none());
        assert!(numbers.decimal_pattern.is_none());
    }

    #[test]
    fn numbers_follow_default_numbering_system() {
        let numbers = decode_numbers(
            r##"{"main":{"ar":{"numbers":{
                "defaultNumberingSystem":"arab",
                "symbols-numberSystem-arab":{"decimal":"٫","group":"٬"},
                "decimalFormats-numberSystem-arab":{"standard":"#,##0.###"}
            }}}}"##,
            "ar",
        )
        .expect("decode numbers");
        assert_eq!(numbers.numbering_system, "arab");
        assert_eq!(numbers.symbols.group.as_deref(), Some("٬"));
        assert_eq!(numbers.decimal_pattern.as_deref(), Some("#,##0.###"));
    }

    #[test]
    fn missing_symbols_are_reported() {
        let err =
            decode_numbers(r#"{"main":{"en":{"numbers":{}}}}"#, "en").expect_err("no symbols");
        assert!(err.contains("symbols-numberSystem-latn"));
    }

    #[test]
    fn single_main_entry_is_used_for_mismatched_keys() {
        let delimiters = decode_delimiters(
            r#"{"main":{"en-US-POSIX":{"delimiters":{
                "quotationStart":"“","quotationEnd":"”",
                "alternateQuotationStart":"‘","alternateQuotationEnd":"’"
            }}}}"#,
            "en-posix",
        )
        .expect("decode delimiters");
        assert_eq!(delimiters.quotation_start, "“");
    }
}
