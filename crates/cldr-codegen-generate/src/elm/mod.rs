//! Built-in engine that renders CLDR data as Elm modules.

pub mod cldr;
pub mod plural;
pub mod render;

use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use cldr_codegen_core::{
    DocumentKind, GeneratedModule, GenerationFailure, LocaleDataset, NumberFormats,
    SupplementalData,
};

use crate::engine::GenerationEngine;
use crate::model::GenerationRequest;

use self::cldr::{
    Currency, Delimiters, ListPattern, LocaleNumbers, NumberingSystem, PluralKind, PluralRules,
    PluralTable,
};
use self::plural::{FLOAT_MOD_HELPER, PluralCategory, condition_to_elm};
use self::render::{ElmModule, list, maybe_string, module_name, record, string};

/// Module prefix and directory of numbers-only output.
const NUMBERS_NAMESPACE: &[&str] = &["Translation"];
/// Module prefix and directory of full output.
const FULL_NAMESPACE: &[&str] = &["Cldr", "Locale"];

/// Renders one self-contained Elm module per locale.
#[derive(Debug, Clone, Copy, Default)]
pub struct ElmEngine;

impl GenerationEngine for ElmEngine {
    fn name(&self) -> &str {
        "elm"
    }

    fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<Vec<GeneratedModule>, GenerationFailure> {
        match request {
            GenerationRequest::NumbersOnly {
                number_formats,
                cardinals,
                ordinals,
            } => generate_numbers(number_formats, cardinals, ordinals),
            GenerationRequest::Full {
                dataset,
                supplemental,
            } => generate_full(dataset, supplemental),
        }
    }
}

/// Decode problems collected across every locale before failing.
#[derive(Debug, Default)]
struct Diagnostics {
    lines: Vec<String>,
}

impl Diagnostics {
    fn push(&mut self, locale: &str, document: &str, reason: impl AsRef<str>) {
        self.lines
            .push(format!("{locale}/{document}: {}", reason.as_ref()));
    }

    fn check<T>(&mut self, locale: &str, document: &str, result: Result<T, String>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(reason) => {
                self.push(locale, document, reason);
                None
            }
        }
    }

    fn finish<T>(self, value: T) -> Result<T, GenerationFailure> {
        if self.lines.is_empty() {
            Ok(value)
        } else {
            let mut diagnostic = format!(
                "Could not generate modules, {} problem(s) in the CLDR data:",
                self.lines.len()
            );
            for line in &self.lines {
                diagnostic.push_str("\n    ");
                diagnostic.push_str(line);
            }
            Err(GenerationFailure::new(diagnostic))
        }
    }
}

struct PluralTables {
    cardinal: PluralTable,
    ordinal: PluralTable,
}

impl PluralTables {
    fn decode(cardinals: &str, ordinals: &str) -> Result<Self, GenerationFailure> {
        let mut diagnostics = Diagnostics::default();
        let cardinal = diagnostics.check(
            "supplemental",
            PluralKind::Cardinal.document(),
            PluralTable::decode(cardinals, PluralKind::Cardinal),
        );
        let ordinal = diagnostics.check(
            "supplemental",
            PluralKind::Ordinal.document(),
            PluralTable::decode(ordinals, PluralKind::Ordinal),
        );
        diagnostics.finish(())?;
        Ok(Self {
            cardinal: cardinal.unwrap_or_default(),
            ordinal: ordinal.unwrap_or_default(),
        })
    }
}

/// Module names must stay unique once locale codes are normalised.
struct ModuleNames {
    seen: HashMap<String, String>,
}

impl ModuleNames {
    fn new() -> Self {
        Self {
            seen: HashMap::new(),
        }
    }

    fn claim(&mut self, locale: &str) -> Result<String, String> {
        let name = module_name(locale).map_err(|err| err.to_string())?;
        if let Some(previous) = self.seen.get(&name) {
            return Err(format!(
                "module name `{name}` is already used by locale `{previous}`"
            ));
        }
        self.seen.insert(name.clone(), locale.to_string());
        Ok(name)
    }
}

fn generate_numbers(
    number_formats: &NumberFormats,
    cardinals: &str,
    ordinals: &str,
) -> Result<Vec<GeneratedModule>, GenerationFailure> {
    let plurals = PluralTables::decode(cardinals, ordinals)?;
    let mut diagnostics = Diagnostics::default();
    let mut names = ModuleNames::new();
    let mut modules = Vec::new();

    for (locale, text) in number_formats {
        let name = diagnostics.check(locale, "module", names.claim(locale));
        let numbers = diagnostics.check(
            locale,
            DocumentKind::Numbers.file_name(),
            cldr::decode_numbers(text, locale),
        );
        let cardinal =
            diagnostics.check(locale, "plurals.json", plurals.cardinal.rules_for(locale));
        let ordinal =
            diagnostics.check(locale, "ordinals.json", plurals.ordinal.rules_for(locale));

        let (Some(name), Some(numbers), Some(cardinal), Some(ordinal)) =
            (name, numbers, cardinal, ordinal)
        else {
            continue;
        };

        let mut module = ElmModule::new(
            qualified(NUMBERS_NAMESPACE, &name),
            doc_line(locale),
        );
        add_numbers(&mut module, &numbers);
        add_plurals(&mut module, &cardinal, &ordinal);
        debug!(locale = %locale, module = %name, "rendered numbers module");
        modules.push(GeneratedModule::new(
            Vec::<String>::new(),
            format!("{name}.elm"),
            module.render(),
        ));
    }

    diagnostics.finish(modules)
}

fn generate_full(
    dataset: &LocaleDataset,
    supplemental: &SupplementalData,
) -> Result<Vec<GeneratedModule>, GenerationFailure> {
    let plurals = PluralTables::decode(&supplemental.cardinals, &supplemental.ordinals)?;
    let numbering_systems = match cldr::decode_numbering_systems(&supplemental.numbering_systems)
    {
        Ok(systems) => systems,
        Err(reason) => {
            let mut diagnostics = Diagnostics::default();
            diagnostics.push("supplemental", "numberingSystems.json", reason);
            return diagnostics.finish(Vec::new());
        }
    };

    let mut diagnostics = Diagnostics::default();
    let mut names = ModuleNames::new();
    let mut modules = Vec::new();

    for (locale, documents) in dataset {
        let name = diagnostics.check(locale, "module", names.claim(locale));
        let numbers = diagnostics.check(
            locale,
            DocumentKind::Numbers.file_name(),
            cldr::decode_numbers(&documents.numbers, locale),
        );
        let digits = numbers.as_ref().and_then(|numbers| {
            diagnostics.check(
                locale,
                "numberingSystems.json",
                digits_for(&numbering_systems, &numbers.numbering_system),
            )
        });
        let currencies = diagnostics.check(
            locale,
            DocumentKind::Currencies.file_name(),
            cldr::decode_currencies(&documents.currencies, locale),
        );
        let delimiters = diagnostics.check(
            locale,
            DocumentKind::Delimiters.file_name(),
            cldr::decode_delimiters(&documents.delimiters, locale),
        );
        let list_pattern = diagnostics.check(
            locale,
            DocumentKind::ListPatterns.file_name(),
            cldr::decode_list_pattern(&documents.list_patterns, locale),
        );
        let cardinal =
            diagnostics.check(locale, "plurals.json", plurals.cardinal.rules_for(locale));
        let ordinal =
            diagnostics.check(locale, "ordinals.json", plurals.ordinal.rules_for(locale));

        let (
            Some(name),
            Some(numbers),
            Some(digits),
            Some(currencies),
            Some(delimiters),
            Some(list_pattern),
            Some(cardinal),
            Some(ordinal),
        ) = (
            name,
            numbers,
            digits,
            currencies,
            delimiters,
            list_pattern,
            cardinal,
            ordinal,
        )
        else {
            continue;
        };

        let mut module = ElmModule::new(qualified(FULL_NAMESPACE, &name), doc_line(locale));
        add_numbers(&mut module, &numbers);
        module.value("digits", "Maybe String", &maybe_string(digits.as_deref()));
        add_delimiters(&mut module, &delimiters);
        add_list_pattern(&mut module, &list_pattern);
        add_currencies(&mut module, &currencies);
        add_plurals(&mut module, &cardinal, &ordinal);
        debug!(locale = %locale, module = %name, "rendered locale module");
        modules.push(GeneratedModule::new(
            FULL_NAMESPACE.iter().copied(),
            format!("{name}.elm"),
            module.render(),
        ));
    }

    diagnostics.finish(modules)
}

fn qualified(namespace: &[&str], name: &str) -> String {
    let mut parts: Vec<&str> = namespace.to_vec();
    parts.push(name);
    parts.join(".")
}

fn doc_line(locale: &str) -> String {
    format!("CLDR data for the `{locale}` locale. Generated by cldr-codegen, do not edit.")
}

/// Digits of a numeric numbering system, `None` for algorithmic ones.
fn digits_for(
    systems: &BTreeMap<String, NumberingSystem>,
    numbering_system: &str,
) -> Result<Option<String>, String> {
    systems
        .get(numbering_system)
        .map(|system| system.digits.clone())
        .ok_or_else(|| format!("unknown numbering system `{numbering_system}`"))
}

fn add_numbers(module: &mut ElmModule, numbers: &LocaleNumbers) {
    let symbols = &numbers.symbols;
    let optional = |value: &Option<String>| maybe_string(value.as_deref());

    module.type_alias(
        "NumberSymbols",
        &[
            ("decimal", "String".to_string()),
            ("group", "Maybe String".to_string()),
            ("percentSign", "Maybe String".to_string()),
            ("plusSign", "Maybe String".to_string()),
            ("minusSign", "Maybe String".to_string()),
            ("exponential", "Maybe String".to_string()),
            ("perMille", "Maybe String".to_string()),
            ("infinity", "Maybe String".to_string()),
            ("nan", "Maybe String".to_string()),
        ],
    );
    module.value(
        "numberSymbols",
        "NumberSymbols",
        &record(
            &[
                ("decimal", string(&symbols.decimal)),
                ("group", optional(&symbols.group)),
                ("percentSign", optional(&symbols.percent_sign)),
                ("plusSign", optional(&symbols.plus_sign)),
                ("minusSign", optional(&symbols.minus_sign)),
                ("exponential", optional(&symbols.exponential)),
                ("perMille", optional(&symbols.per_mille)),
                ("infinity", optional(&symbols.infinity)),
                ("nan", optional(&symbols.nan)),
            ],
            "=",
        ),
    );
    module.value("numberingSystem", "String", &string(&numbers.numbering_system));
    module.value(
        "decimalPattern",
        "Maybe String",
        &maybe_string(numbers.decimal_pattern.as_deref()),
    );
}

fn add_delimiters(module: &mut ElmModule, delimiters: &Delimiters) {
    module.type_alias(
        "Delimiters",
        &[
            ("quotationStart", "String".to_string()),
            ("quotationEnd", "String".to_string()),
            ("alternateQuotationStart", "String".to_string()),
            ("alternateQuotationEnd", "String".to_string()),
        ],
    );
    module.value(
        "delimiters",
        "Delimiters",
        &record(
            &[
                ("quotationStart", string(&delimiters.quotation_start)),
                ("quotationEnd", string(&delimiters.quotation_end)),
                (
                    "alternateQuotationStart",
                    string(&delimiters.alternate_quotation_start),
                ),
                (
                    "alternateQuotationEnd",
                    string(&delimiters.alternate_quotation_end),
                ),
            ],
            "=",
        ),
    );
}

fn add_list_pattern(module: &mut ElmModule, pattern: &ListPattern) {
    module.type_alias(
        "ListPattern",
        &[
            ("start", "String".to_string()),
            ("middle", "String".to_string()),
            ("end", "String".to_string()),
            ("two", "String".to_string()),
        ],
    );
    module.value(
        "listPattern",
        "ListPattern",
        &record(
            &[
                ("start", string(&pattern.start)),
                ("middle", string(&pattern.middle)),
                ("end", string(&pattern.end)),
                ("two", string(&pattern.two)),
            ],
            "=",
        ),
    );
}

fn add_currencies(module: &mut ElmModule, currencies: &BTreeMap<String, Currency>) {
    let items: Vec<String> = currencies
        .iter()
        .map(|(code, currency)| {
            let symbol = currency.symbol.as_deref().unwrap_or(code);
            format!(
                "( {}, {{ displayName = {}, symbol = {} }} )",
                string(code),
                string(&currency.display_name),
                string(symbol)
            )
        })
        .collect();
    module.value(
        "currencies",
        "List ( String, { displayName : String, symbol : String } )",
        &list(&items),
    );
}

fn add_plurals(module: &mut ElmModule, cardinal: &PluralRules, ordinal: &PluralRules) {
    module.type_alias(
        "PluralOperands",
        &[
            ("n", "Float".to_string()),
            ("i", "Int".to_string()),
            ("v", "Int".to_string()),
            ("w", "Int".to_string()),
            ("f", "Int".to_string()),
            ("t", "Int".to_string()),
            ("e", "Int".to_string()),
        ],
    );

    let mut uses_float_mod = false;
    for (kind, rules) in [(PluralKind::Cardinal, cardinal), (PluralKind::Ordinal, ordinal)] {
        let (param, body) = plural_body(rules, &mut uses_float_mod);
        module.function(
            kind.function_name(),
            "PluralOperands -> String",
            &[param],
            &body,
        );
    }

    if uses_float_mod {
        module.helper(
            FLOAT_MOD_HELPER,
            "Int -> Float -> Float",
            &["divisor", "x"],
            "x - toFloat divisor * toFloat (floor (x / toFloat divisor))",
        );
    }
}

/// `if` chain over the non-`other` categories, ending in `"other"`.
fn plural_body(rules: &PluralRules, uses_float_mod: &mut bool) -> (&'static str, String) {
    let branches: Vec<_> = rules
        .iter()
        .filter(|(category, _)| *category != PluralCategory::Other)
        .collect();
    let other = string(PluralCategory::Other.as_str());

    if branches.is_empty() {
        return ("_", other);
    }

    let mut body = String::new();
    for (index, (category, condition)) in branches.iter().enumerate() {
        let keyword = if index == 0 { "if" } else { "else if" };
        body.push_str(&format!(
            "{keyword} {} then\n    {}\n\n",
            condition_to_elm(condition, uses_float_mod),
            string(category.as_str())
        ));
    }
    body.push_str(&format!("else\n    {other}"));
    ("op", body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cldr_codegen_core::LocaleDocuments;

    const CARDINALS: &str = r#"{"supplemental":{"plurals-type-cardinal":{
        "en":{"pluralRule-count-one":"i = 1 and v = 0 @integer 1","pluralRule-count-other":" @integer 0, 2~16"},
        "fr":{"pluralRule-count-one":"i = 0,1 @integer 0, 1","pluralRule-count-many":"e = 0 and i != 0 and i % 1000000 = 0 and v = 0 or e != 0..5","pluralRule-count-other":" @integer 2~17"}
    }}}"#;
    const ORDINALS: &str = r#"{"supplemental":{"plurals-type-ordinal":{
        "en":{"pluralRule-count-one":"n % 10 = 1 and n % 100 != 11","pluralRule-count-two":"n % 10 = 2 and n % 100 != 12","pluralRule-count-few":"n % 10 = 3 and n % 100 != 13","pluralRule-count-other":""}
    }}}"#;
    const NUMBERING_SYSTEMS: &str = r#"{"supplemental":{"numberingSystems":{
        "latn":{"_digits":"0123456789","_type":"numeric"},
        "roman":{"_rules":"roman-upper","_type":"algorithmic"}
    }}}"#;

    fn numbers(locale: &str, decimal: &str) -> String {
        format!(
            r#"{{"main":{{"{locale}":{{"numbers":{{"symbols-numberSystem-latn":{{"decimal":"{decimal}"}}}}}}}}}}"#
        )
    }

    fn documents(locale: &str) -> LocaleDocuments {
        LocaleDocuments {
            numbers: numbers(locale, "."),
            currencies: format!(
                r#"{{"main":{{"{locale}":{{"numbers":{{"currencies":{{
                    "USD":{{"displayName":"US Dollar","symbol":"$"}},
                    "EUR":{{"displayName":"Euro","symbol":"€"}},
                    "XTS":{{"displayName":"Testing Currency Code"}}
                }}}}}}}}}}"#
            ),
            delimiters: format!(
                r#"{{"main":{{"{locale}":{{"delimiters":{{"quotationStart":"“","quotationEnd":"”","alternateQuotationStart":"‘","alternateQuotationEnd":"’"}}}}}}}}"#
            ),
            list_patterns: format!(
                r#"{{"main":{{"{locale}":{{"listPatterns":{{"listPattern-type-standard":{{"start":"{{0}}, {{1}}","middle":"{{0}}, {{1}}","end":"{{0}}, and {{1}}","2":"{{0}} and {{1}}"}}}}}}}}}}"#
            ),
        }
    }

    fn numbers_request(locales: &[(&str, &str)]) -> GenerationRequest {
        GenerationRequest::NumbersOnly {
            number_formats: locales
                .iter()
                .map(|(locale, decimal)| (locale.to_string(), numbers(locale, decimal)))
                .collect(),
            cardinals: CARDINALS.to_string(),
            ordinals: ORDINALS.to_string(),
        }
    }

    #[test]
    fn numbers_mode_emits_one_flat_module_per_locale() {
        let modules = ElmEngine
            .generate(&numbers_request(&[("en", "."), ("fr", ",")]))
            .expect("generate");

        assert_eq!(modules.len(), 2);
        assert_eq!(modules[0].filename, "En.elm");
        assert!(modules[0].directory.is_empty());
        assert!(modules[0].content.starts_with("module Translation.En exposing"));
        assert!(modules[0].content.contains("{ decimal = \".\""));
        assert!(modules[1].content.contains("{ decimal = \",\""));
        assert!(modules[1].content.contains("\"many\""));
    }

    #[test]
    fn plural_functions_compile_rules() {
        let modules = ElmEngine
            .generate(&numbers_request(&[("en", ".")]))
            .expect("generate");
        let content = &modules[0].content;

        assert!(content.contains(
            "cardinal : PluralOperands -> String\ncardinal op =\n    if op.i == 1 && op.v == 0 then\n        \"one\"\n\n    else\n        \"other\"\n"
        ));
        assert!(content.contains("ordinal op =\n    if (floatModBy 10 op.n) == 1"));
        assert!(content.contains("floatModBy : Int -> Float -> Float"));
    }

    #[test]
    fn locale_without_rules_only_has_other() {
        let modules = ElmEngine
            .generate(&numbers_request(&[("ja", ".")]))
            .expect("generate");
        let content = &modules[0].content;
        assert!(
            content.contains("cardinal : PluralOperands -> String\ncardinal _ =\n    \"other\"\n")
        );
        assert!(!content.contains("floatModBy"));
    }

    #[test]
    fn full_mode_nests_modules_and_renders_every_document() {
        let request = GenerationRequest::Full {
            dataset: [("en".to_string(), documents("en"))].into_iter().collect(),
            supplemental: SupplementalData {
                cardinals: CARDINALS.to_string(),
                ordinals: ORDINALS.to_string(),
                numbering_systems: NUMBERING_SYSTEMS.to_string(),
            },
        };

        let modules = ElmEngine.generate(&request).expect("generate");
        assert_eq!(modules.len(), 1);
        let module = &modules[0];
        assert_eq!(module.directory, vec!["Cldr".to_string(), "Locale".to_string()]);
        assert_eq!(module.filename, "En.elm");
        assert!(module.content.starts_with("module Cldr.Locale.En exposing"));
        assert!(module.content.contains("digits =\n    Just \"0123456789\""));
        assert!(module.content.contains("{ quotationStart = \"“\""));
        assert!(module.content.contains(", two = \"{0} and {1}\""));

        let eur = module.content.find("\"EUR\"").expect("EUR listed");
        let usd = module.content.find("\"USD\"").expect("USD listed");
        assert!(eur < usd, "currencies sorted by code");
        assert!(module.content.contains(
            "( \"XTS\", { displayName = \"Testing Currency Code\", symbol = \"XTS\" } )"
        ));
    }

    #[test]
    fn decode_errors_are_collected_across_locales() {
        let mut request = numbers_request(&[("en", "."), ("fr", ",")]);
        if let GenerationRequest::NumbersOnly { number_formats, .. } = &mut request {
            number_formats.insert("xx".to_string(), "{ not json".to_string());
            number_formats.insert(
                "yy".to_string(),
                r#"{"main":{"yy":{"numbers":{}}}}"#.to_string(),
            );
        }

        let failure = ElmEngine.generate(&request).expect_err("bad data");
        let lines = failure.lines();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].trim_start().starts_with("xx/numbers.json:"));
        assert!(lines[2].contains("yy/numbers.json: missing `symbols-numberSystem-latn`"));
    }

    #[test]
    fn colliding_module_names_fail() {
        let failure = ElmEngine
            .generate(&numbers_request(&[("en-US", "."), ("en_US", ".")]))
            .expect_err("collision");
        assert!(failure.diagnostic.contains("already used by locale `en-US`"));
    }

    #[test]
    fn unknown_numbering_system_fails_full_mode() {
        let mut docs = documents("en");
        docs.numbers = r#"{"main":{"en":{"numbers":{"defaultNumberingSystem":"klingon","symbols-numberSystem-klingon":{"decimal":"."}}}}}"#.to_string();
        let request = GenerationRequest::Full {
            dataset: [("en".to_string(), docs)].into_iter().collect(),
            supplemental: SupplementalData {
                cardinals: CARDINALS.to_string(),
                ordinals: ORDINALS.to_string(),
                numbering_systems: NUMBERING_SYSTEMS.to_string(),
            },
        };

        let failure = ElmEngine.generate(&request).expect_err("unknown system");
        assert!(failure.diagnostic.contains("unknown numbering system `klingon`"));
    }

    #[test]
    fn malformed_plural_document_fails_before_locales() {
        let request = GenerationRequest::NumbersOnly {
            number_formats: [("en".to_string(), numbers("en", "."))].into_iter().collect(),
            cardinals: "[]".to_string(),
            ordinals: ORDINALS.to_string(),
        };
        let failure = ElmEngine.generate(&request).expect_err("bad plurals");
        assert!(failure.diagnostic.contains("supplemental/plurals.json"));
    }
}
