//! Engine backed by an external worker process.
//!
//! The worker reads one JSON request on stdin and answers with exactly one
//! JSON object on stdout: `{"modules": [...]}` or `{"error": "..."}`.

use std::io::Write;
use std::process::{Command, Stdio};

use serde::{Deserialize, Serialize};
use tracing::debug;

use cldr_codegen_core::{GeneratedModule, GenerationFailure, LocaleDataset};

use crate::engine::GenerationEngine;
use crate::model::GenerationRequest;

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum WorkerRequest<'a> {
    Full {
        #[serde(rename = "rawData")]
        raw_data: &'a LocaleDataset,
        cardinals: &'a str,
        ordinals: &'a str,
        #[serde(rename = "numberingSystems")]
        numbering_systems: &'a str,
    },
    Numbers {
        #[serde(rename = "numberFormatsJsons")]
        number_formats: Vec<(&'a str, &'a str)>,
        #[serde(rename = "cardinalsJson")]
        cardinals: &'a str,
        #[serde(rename = "ordinalsJson")]
        ordinals: &'a str,
    },
}

impl<'a> From<&'a GenerationRequest> for WorkerRequest<'a> {
    fn from(request: &'a GenerationRequest) -> Self {
        match request {
            GenerationRequest::Full {
                dataset,
                supplemental,
            } => Self::Full {
                raw_data: dataset,
                cardinals: &supplemental.cardinals,
                ordinals: &supplemental.ordinals,
                numbering_systems: &supplemental.numbering_systems,
            },
            GenerationRequest::NumbersOnly {
                number_formats,
                cardinals,
                ordinals,
            } => Self::Numbers {
                number_formats: number_formats
                    .iter()
                    .map(|(code, json)| (code.as_str(), json.as_str()))
                    .collect(),
                cardinals,
                ordinals,
            },
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WorkerResponse {
    Modules { modules: Vec<GeneratedModule> },
    Error { error: String },
}

/// Delegates generation to `program args...`.
#[derive(Debug, Clone)]
pub struct ProcessEngine {
    program: String,
    args: Vec<String>,
}

impl ProcessEngine {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }
}

impl GenerationEngine for ProcessEngine {
    fn name(&self) -> &str {
        &self.program
    }

    fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<Vec<GeneratedModule>, GenerationFailure> {
        let payload = serde_json::to_vec(&WorkerRequest::from(request)).map_err(|err| {
            GenerationFailure::new(format!("failed to encode engine request: {err}"))
        })?;

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|err| {
                GenerationFailure::new(format!("failed to start engine '{}': {err}", self.program))
            })?;

        // Feed stdin from a separate thread so a chatty worker cannot deadlock us.
        let stdin = child.stdin.take();
        let feeder = std::thread::spawn(move || -> std::io::Result<()> {
            if let Some(mut stdin) = stdin {
                stdin.write_all(&payload)?;
            }
            Ok(())
        });

        let output = child.wait_with_output().map_err(|err| {
            GenerationFailure::new(format!("engine '{}' could not be awaited: {err}", self.program))
        })?;
        // A worker may answer without consuming its whole input.
        if let Ok(Err(err)) = feeder.join() {
            debug!(engine = %self.program, error = %err, "engine closed stdin early");
        }

        debug!(
            engine = %self.program,
            status = %output.status,
            bytes = output.stdout.len(),
            "engine exited"
        );

        if output.stdout.iter().all(u8::is_ascii_whitespace) {
            return Err(GenerationFailure::new(format!(
                "engine '{}' exited ({}) without a response",
                self.program, output.status
            )));
        }

        match serde_json::from_slice::<WorkerResponse>(&output.stdout) {
            Ok(WorkerResponse::Modules { modules }) => Ok(modules),
            Ok(WorkerResponse::Error { error }) => Err(GenerationFailure::new(error)),
            Err(err) => Err(GenerationFailure::new(format!(
                "engine '{}' sent an unreadable response: {err}",
                self.program
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use cldr_codegen_core::{LocaleDocuments, SupplementalData};

    use super::*;

    fn numbers_request() -> GenerationRequest {
        GenerationRequest::NumbersOnly {
            number_formats: [("en".to_string(), "{}".to_string())].into_iter().collect(),
            cardinals: "{\"c\":1}".to_string(),
            ordinals: "{\"o\":1}".to_string(),
        }
    }

    #[test]
    fn numbers_request_uses_worker_flag_names() {
        let request = numbers_request();
        let value = serde_json::to_value(WorkerRequest::from(&request)).expect("encode");
        assert_eq!(
            value,
            serde_json::json!({
                "numberFormatsJsons": [["en", "{}"]],
                "cardinalsJson": "{\"c\":1}",
                "ordinalsJson": "{\"o\":1}",
            })
        );
    }

    #[test]
    fn full_request_nests_raw_documents() {
        let mut dataset = BTreeMap::new();
        dataset.insert("fr".to_string(), LocaleDocuments::default());
        let request = GenerationRequest::Full {
            dataset,
            supplemental: SupplementalData::default(),
        };
        let value = serde_json::to_value(WorkerRequest::from(&request)).expect("encode");
        assert!(value["rawData"]["fr"].get("listPatterns").is_some());
        assert!(value.get("numberingSystems").is_some());
    }

    #[test]
    fn missing_program_is_a_failure() {
        let engine = ProcessEngine::new("cldr-codegen-no-such-engine", Vec::new());
        let failure = engine.generate(&numbers_request()).expect_err("spawn fails");
        assert!(failure.diagnostic.contains("failed to start engine"));
    }

    #[cfg(unix)]
    fn shell(script: &str) -> ProcessEngine {
        ProcessEngine::new("sh", vec!["-c".to_string(), script.to_string()])
    }

    #[cfg(unix)]
    #[test]
    fn reads_modules_from_worker() {
        let engine = shell(
            r#"cat > /dev/null; printf '%s' '{"modules":[{"directory":["Cldr"],"name":"En.elm","content":"x"}]}'"#,
        );
        let modules = engine.generate(&numbers_request()).expect("modules");
        assert_eq!(modules, vec![GeneratedModule::new(["Cldr"], "En.elm", "x")]);
    }

    #[cfg(unix)]
    #[test]
    fn reads_error_from_worker() {
        let engine = shell(r#"cat > /dev/null; printf '%s' '{"error":"bad numbers\nfor xx"}'"#);
        let failure = engine.generate(&numbers_request()).expect_err("error");
        assert_eq!(failure.lines(), vec!["bad numbers", "for xx"]);
    }

    #[cfg(unix)]
    #[test]
    fn silent_worker_is_a_failure() {
        let failure = shell("cat > /dev/null; exit 3")
            .generate(&numbers_request())
            .expect_err("no response");
        assert!(failure.diagnostic.contains("without a response"));
    }
}
