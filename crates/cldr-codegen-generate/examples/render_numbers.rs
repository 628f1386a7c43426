use cldr_codegen_generate::{ElmEngine, GenerationEngine, GenerationRequest};

fn main() {
    let numbers = r##"{"main":{"de":{"numbers":{
        "defaultNumberingSystem":"latn",
        "symbols-numberSystem-latn":{"decimal":",","group":".","percentSign":"%"},
        "decimalFormats-numberSystem-latn":{"standard":"#,##0.###"}
    }}}}"##;
    let cardinals = r#"{"supplemental":{"plurals-type-cardinal":{"de":{
        "pluralRule-count-one":"i = 1 and v = 0 @integer 1",
        "pluralRule-count-other":" @integer 0, 2~16"
    }}}}"#;
    let ordinals = r#"{"supplemental":{"plurals-type-ordinal":{"de":{
        "pluralRule-count-other":" @integer 0~15"
    }}}}"#;

    let request = GenerationRequest::NumbersOnly {
        number_formats: [("de".to_string(), numbers.to_string())].into_iter().collect(),
        cardinals: cardinals.to_string(),
        ordinals: ordinals.to_string(),
    };

    match ElmEngine.generate(&request) {
        Ok(modules) => {
            for module in modules {
                println!("-- {}", module.relative_path().display());
                println!("{}", module.content);
            }
        }
        Err(failure) => {
            for line in failure.lines() {
                eprintln!("{line}");
            }
            std::process::exit(1);
        }
    }
}
