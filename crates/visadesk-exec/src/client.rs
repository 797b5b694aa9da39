use std::sync::Arc;
use std::thread;
use std::thread::JoinHandle;

use tracing::info;
use tracing::warn;
use visadesk_core::config::ModelConfig;
use visadesk_core::state::RouteSelection;
use visadesk_core::state::StrategyResult;
use visadesk_core::strategy::build_prompt;
use visadesk_core::strategy::fallback_result;
use visadesk_core::strategy::parse_response;

use crate::adapters::resolve_generator;
use crate::contracts::TextGenerator;

/// Turns a route into a [`StrategyResult`]. Every failure collapses into the
/// fixed fallback, so callers never see an error.
pub struct StrategyClient {
    generator: Box<dyn TextGenerator>,
    temperature: f32,
}

impl StrategyClient {
    pub fn new(generator: Box<dyn TextGenerator>, temperature: f32) -> Self {
        Self {
            generator,
            temperature,
        }
    }

    pub fn from_config(config: &ModelConfig) -> Self {
        Self::new(resolve_generator(config), config.temperature)
    }

    pub fn provider(&self) -> &'static str {
        self.generator.name()
    }

    pub fn generate(&self, route: &RouteSelection) -> StrategyResult {
        self.complete(&build_prompt(route))
    }

    pub fn complete(&self, prompt: &str) -> StrategyResult {
        let provider = self.generator.name();
        let raw = match self.generator.generate(prompt, self.temperature) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(provider, error = %err, "strategy generation failed, using fallback");
                return fallback_result();
            }
        };
        match parse_response(&raw) {
            Ok(result) => {
                info!(
                    provider,
                    structured = result.payload.is_some(),
                    "strategy generated"
                );
                result
            }
            Err(err) => {
                warn!(provider, error = %err, "unusable strategy response, using fallback");
                fallback_result()
            }
        }
    }
}

/// Owns the completion callback for one strategy run. Completing it delivers
/// the result; dropping it first delivers the fallback. Either way the callback
/// runs exactly once.
pub struct PendingStrategy<F>
where
    F: FnOnce(u64, StrategyResult),
{
    run_id: u64,
    deliver: Option<F>,
}

impl<F> PendingStrategy<F>
where
    F: FnOnce(u64, StrategyResult),
{
    pub fn new(run_id: u64, deliver: F) -> Self {
        Self {
            run_id,
            deliver: Some(deliver),
        }
    }

    pub fn run_id(&self) -> u64 {
        self.run_id
    }

    pub fn complete(mut self, result: StrategyResult) {
        if let Some(deliver) = self.deliver.take() {
            deliver(self.run_id, result);
        }
    }
}

impl<F> Drop for PendingStrategy<F>
where
    F: FnOnce(u64, StrategyResult),
{
    fn drop(&mut self) {
        if let Some(deliver) = self.deliver.take() {
            warn!(run_id = self.run_id, "strategy run abandoned, delivering fallback");
            deliver(self.run_id, fallback_result());
        }
    }
}

/// Runs `prompt` on a worker thread and hands the outcome to `deliver`.
pub fn spawn_strategy<F>(
    client: Arc<StrategyClient>,
    run_id: u64,
    prompt: String,
    deliver: F,
) -> JoinHandle<()>
where
    F: FnOnce(u64, StrategyResult) + Send + 'static,
{
    thread::spawn(move || {
        let pending = PendingStrategy::new(run_id, deliver);
        let result = client.complete(&prompt);
        pending.complete(result);
    })
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;
    use std::sync::Mutex;

    use pretty_assertions::assert_eq;
    use visadesk_core::catalog::find_country;
    use visadesk_core::strategy::FALLBACK_NARRATIVE;

    use super::*;
    use crate::error::GenerationError;

    struct ScriptedGenerator {
        reply: Mutex<Option<Result<String, GenerationError>>>,
        prompts: Arc<Mutex<Vec<(String, f32)>>>,
    }

    impl ScriptedGenerator {
        fn new(reply: Result<String, GenerationError>) -> Self {
            Self {
                reply: Mutex::new(Some(reply)),
                prompts: Arc::default(),
            }
        }
    }

    impl TextGenerator for ScriptedGenerator {
        fn name(&self) -> &'static str {
            "scripted"
        }

        fn generate(&self, prompt: &str, temperature: f32) -> Result<String, GenerationError> {
            if let Ok(mut prompts) = self.prompts.lock() {
                prompts.push((prompt.to_string(), temperature));
            }
            self.reply
                .lock()
                .ok()
                .and_then(|mut reply| reply.take())
                .unwrap_or(Err(GenerationError::Empty))
        }
    }

    struct PanickingGenerator;

    impl TextGenerator for PanickingGenerator {
        fn name(&self) -> &'static str {
            "panicking"
        }

        fn generate(&self, _prompt: &str, _temperature: f32) -> Result<String, GenerationError> {
            panic!("generator blew up");
        }
    }

    fn us_to_germany() -> RouteSelection {
        RouteSelection::new(
            find_country("United States").expect("us"),
            find_country("Germany").expect("de"),
        )
    }

    #[test]
    fn successful_reply_is_split_into_payload_and_narrative() {
        let generator = ScriptedGenerator::new(Ok(
            "```json\n{\"a\":1}\n```\nSome narrative.".to_string()
        ));
        let prompts = Arc::clone(&generator.prompts);
        let client = StrategyClient::new(Box::new(generator), 0.7);

        let result = client.generate(&us_to_germany());

        assert_eq!(result.payload.as_deref(), Some("{\"a\":1}"));
        assert_eq!(result.narrative, "Some narrative.");
        let prompts = prompts.lock().map(|p| p.clone()).unwrap_or_default();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].0.contains("United States"));
        assert!(prompts[0].0.contains("Germany"));
        assert_eq!(prompts[0].1, 0.7);
    }

    #[test]
    fn transport_failures_become_the_fallback() {
        for err in [
            GenerationError::Status {
                code: 503,
                body: "unavailable".to_string(),
            },
            GenerationError::Malformed("eof".to_string()),
            GenerationError::MissingApiKey("GEMINI_API_KEY".to_string()),
            GenerationError::Offline,
        ] {
            let client = StrategyClient::new(Box::new(ScriptedGenerator::new(Err(err))), 0.7);
            let result = client.generate(&us_to_germany());
            assert_eq!(result.narrative, FALLBACK_NARRATIVE);
            assert_eq!(result.payload, None);
        }
    }

    #[test]
    fn empty_and_block_only_replies_become_the_fallback() {
        for reply in ["   ", "```json\n{}\n```"] {
            let client = StrategyClient::new(
                Box::new(ScriptedGenerator::new(Ok(reply.to_string()))),
                0.7,
            );
            assert_eq!(client.complete("p"), fallback_result());
        }
    }

    #[test]
    fn pending_strategy_delivers_exactly_once() {
        let (tx, rx) = mpsc::channel();
        let pending = PendingStrategy::new(4, move |run_id, result| {
            let _ = tx.send((run_id, result));
        });
        pending.complete(StrategyResult::narrative_only("done"));

        let delivered: Vec<_> = rx.iter().collect();
        assert_eq!(
            delivered,
            vec![(4, StrategyResult::narrative_only("done"))]
        );
    }

    #[test]
    fn dropped_pending_strategy_delivers_the_fallback() {
        let (tx, rx) = mpsc::channel();
        drop(PendingStrategy::new(9, move |run_id, result| {
            let _ = tx.send((run_id, result));
        }));
        assert_eq!(rx.recv().ok(), Some((9, fallback_result())));
    }

    #[test]
    fn worker_panic_still_releases_the_run() {
        let (tx, rx) = mpsc::channel();
        let client = Arc::new(StrategyClient::new(Box::new(PanickingGenerator), 0.7));
        let handle = spawn_strategy(client, 2, "prompt".to_string(), move |run_id, result| {
            let _ = tx.send((run_id, result));
        });

        assert!(handle.join().is_err());
        assert_eq!(rx.recv().ok(), Some((2, fallback_result())));
    }
}
