use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::time::Instant;

use tracing::{info, warn};

use cldr_codegen_core::{GeneratedModule, GenerationFailure};

use crate::model::GenerationRequest;

/// A pure transformation from raw CLDR documents to generated modules.
///
/// Engines are called once per run and answer exactly once: either the full,
/// ordered module list or a diagnostic. They must not touch the output tree.
pub trait GenerationEngine {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<Vec<GeneratedModule>, GenerationFailure>;
}

/// Invoke `engine` once, turning a panic into a [`GenerationFailure`].
pub fn run_engine(
    engine: &dyn GenerationEngine,
    request: &GenerationRequest,
) -> Result<Vec<GeneratedModule>, GenerationFailure> {
    let start = Instant::now();
    info!(
        event = "generation_started",
        engine = engine.name(),
        mode = %request.mode(),
        locales = request.locale_count()
    );

    let outcome = catch_unwind(AssertUnwindSafe(|| engine.generate(request)));
    let duration_ms = start.elapsed().as_millis() as u64;

    match outcome {
        Ok(Ok(modules)) => {
            info!(
                event = "generation_finished",
                engine = engine.name(),
                modules = modules.len(),
                duration_ms
            );
            Ok(modules)
        }
        Ok(Err(failure)) => {
            warn!(
                event = "generation_failed",
                engine = engine.name(),
                lines = failure.lines().len(),
                duration_ms
            );
            Err(failure)
        }
        Err(panic) => {
            warn!(event = "generation_panicked", engine = engine.name(), duration_ms);
            Err(GenerationFailure::new(format!(
                "engine '{}' panicked: {}",
                engine.name(),
                panic_message(panic)
            )))
        }
    }
}

fn panic_message(panic: Box<dyn Any + Send>) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "panic during generation".to_string()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    struct Fixed(Result<Vec<GeneratedModule>, GenerationFailure>);

    impl GenerationEngine for Fixed {
        fn name(&self) -> &str {
            "fixed"
        }

        fn generate(
            &self,
            _request: &GenerationRequest,
        ) -> Result<Vec<GeneratedModule>, GenerationFailure> {
            self.0.clone()
        }
    }

    struct Panicking;

    impl GenerationEngine for Panicking {
        fn name(&self) -> &str {
            "panicking"
        }

        fn generate(
            &self,
            _request: &GenerationRequest,
        ) -> Result<Vec<GeneratedModule>, GenerationFailure> {
            panic!("decoder blew up")
        }
    }

    fn request() -> GenerationRequest {
        GenerationRequest::NumbersOnly {
            number_formats: BTreeMap::new(),
            cardinals: String::new(),
            ordinals: String::new(),
        }
    }

    #[test]
    fn passes_modules_through_in_order() {
        let modules = vec![
            GeneratedModule::new(Vec::<String>::new(), "B.elm", "b"),
            GeneratedModule::new(Vec::<String>::new(), "A.elm", "a"),
        ];
        let result = run_engine(&Fixed(Ok(modules.clone())), &request());
        assert_eq!(result, Ok(modules));
    }

    #[test]
    fn passes_failures_through() {
        let failure = GenerationFailure::new("line one\nline two");
        let result = run_engine(&Fixed(Err(failure.clone())), &request());
        assert_eq!(result, Err(failure));
    }

    #[test]
    fn converts_panics_into_failures() {
        let failure = run_engine(&Panicking, &request()).expect_err("panic becomes failure");
        assert!(failure.diagnostic.contains("decoder blew up"));
        assert!(failure.diagnostic.contains("panicking"));
    }
}
