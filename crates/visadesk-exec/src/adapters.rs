use std::io::BufRead;
use std::io::BufReader;
use std::io::Read;
use std::io::Write;
use std::process::Command;
use std::process::Stdio;
use std::sync::mpsc;
use std::sync::Mutex;
use std::thread;
use std::time::Duration;

use serde::Deserialize;
use serde::Serialize;
use tracing::debug;
use tracing::warn;
use visadesk_core::config::AudioConfig;
use visadesk_core::config::ModelConfig;
use visadesk_core::contact::DeepLink;

use crate::contracts::MessagingLink;
use crate::contracts::Notifier;
use crate::contracts::TextGenerator;
use crate::error::GenerationError;
use crate::error::LinkError;

const STATUS_BODY_LIMIT: usize = 240;

fn resolve_provider(provider: &str) -> &'static str {
    match provider.trim().to_ascii_lowercase().as_str() {
        "gemini" => "gemini",
        "ollama" => "ollama",
        _ => "offline",
    }
}

fn default_model_for_provider(provider: &str) -> &'static str {
    match provider {
        "gemini" => "gemini-2.0-flash",
        _ => "phi3:mini-128k",
    }
}

/// Builds the generator named by `model.provider`. Unknown providers, and a
/// Gemini client that cannot be constructed, fall back to [`OfflineGenerator`].
pub fn resolve_generator(config: &ModelConfig) -> Box<dyn TextGenerator> {
    let provider = resolve_provider(&config.provider);
    if provider == "offline" && !config.provider.eq_ignore_ascii_case("offline") {
        warn!(provider = %config.provider, "unknown model provider, using offline");
    }
    let model = config
        .model
        .clone()
        .unwrap_or_else(|| default_model_for_provider(provider).to_string());

    match provider {
        "gemini" => match GeminiGenerator::from_config(config, model) {
            Ok(generator) => Box::new(generator),
            Err(err) => {
                warn!(error = %err, "gemini client unavailable, using offline");
                Box::new(OfflineGenerator)
            }
        },
        "ollama" => Box::new(OllamaGenerator::new(model, config.timeout_ms)),
        _ => Box::new(OfflineGenerator),
    }
}

pub struct GeminiGenerator {
    client: reqwest::blocking::Client,
    endpoint: String,
    model: String,
    api_key_env: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: [RequestContent<'a>; 1],
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: [RequestPart<'a>; 1],
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GeminiGenerator {
    pub fn from_config(config: &ModelConfig, model: String) -> Result<Self, GenerationError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;
        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model,
            api_key_env: config.api_key_env.clone(),
        })
    }

    fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }
}

impl TextGenerator for GeminiGenerator {
    fn name(&self) -> &'static str {
        "gemini"
    }

    fn generate(&self, prompt: &str, temperature: f32) -> Result<String, GenerationError> {
        let api_key = std::env::var(&self.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| GenerationError::MissingApiKey(self.api_key_env.clone()))?;

        let body = GenerateRequest {
            contents: [RequestContent {
                parts: [RequestPart { text: prompt }],
            }],
            generation_config: GenerationConfig { temperature },
        };
        debug!(model = %self.model, "posting generateContent request");
        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()?;

        let status = response.status();
        let text = response.text()?;
        if !status.is_success() {
            return Err(GenerationError::Status {
                code: status.as_u16(),
                body: text.chars().take(STATUS_BODY_LIMIT).collect(),
            });
        }
        parse_gemini_body(&text)
    }
}

/// Concatenates the text parts of the first candidate.
pub fn parse_gemini_body(body: &str) -> Result<String, GenerationError> {
    let response: GenerateResponse =
        serde_json::from_str(body).map_err(|err| GenerationError::Malformed(err.to_string()))?;
    let text: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect()
        })
        .unwrap_or_default();
    if text.trim().is_empty() {
        return Err(GenerationError::Empty);
    }
    Ok(text)
}

pub struct OllamaGenerator {
    model: String,
    timeout_ms: u64,
}

impl OllamaGenerator {
    pub fn new(model: impl Into<String>, timeout_ms: u64) -> Self {
        Self {
            model: model.into(),
            timeout_ms,
        }
    }
}

impl TextGenerator for OllamaGenerator {
    fn name(&self) -> &'static str {
        "ollama"
    }

    // `ollama run` takes no sampling flags, so temperature is left to the model file.
    fn generate(&self, prompt: &str, _temperature: f32) -> Result<String, GenerationError> {
        let mut child = Command::new("ollama")
            .args(["run", "--nowordwrap", &self.model, prompt])
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| GenerationError::Spawn {
                program: "ollama",
                source,
            })?;

        let stderr_handle = child.stderr.take().map(|mut stderr| {
            thread::spawn(move || {
                let mut stderr_text = String::new();
                let _ = stderr.read_to_string(&mut stderr_text);
                stderr_text
            })
        });

        let mut lines = Vec::new();
        if let Some(stdout) = child.stdout.take() {
            let (tx, rx) = mpsc::channel();
            thread::spawn(move || {
                let reader = BufReader::new(stdout);
                for line in reader.lines().map_while(Result::ok) {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
            });

            // Model loading dominates the first line; later lines stream quickly.
            let mut timeout = Duration::from_millis(self.timeout_ms.saturating_mul(3));
            loop {
                match rx.recv_timeout(timeout) {
                    Ok(line) => {
                        lines.push(strip_ansi_sequences(&line));
                        timeout = Duration::from_millis(self.timeout_ms);
                    }
                    Err(mpsc::RecvTimeoutError::Timeout) => {
                        let _ = child.kill();
                        let _ = child.wait();
                        return Err(GenerationError::TimedOut {
                            program: "ollama",
                            timeout_ms: self.timeout_ms,
                        });
                    }
                    Err(mpsc::RecvTimeoutError::Disconnected) => break,
                }
            }
        }

        let status = child.wait().ok();
        let stderr_text = stderr_handle
            .and_then(|h| h.join().ok())
            .unwrap_or_default()
            .trim()
            .to_string();
        if !status.is_some_and(|s| s.success()) {
            return Err(GenerationError::Process {
                program: "ollama",
                stderr: stderr_text,
            });
        }

        let text = lines.join("\n");
        if text.trim().is_empty() {
            return Err(GenerationError::Empty);
        }
        Ok(text)
    }
}

fn strip_ansi_sequences(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\u{1b}' {
            if chars.peek() == Some(&'[') {
                let _ = chars.next();
                for n in chars.by_ref() {
                    if ('@'..='~').contains(&n) {
                        break;
                    }
                }
            }
            continue;
        }
        if c == '\r' {
            continue;
        }
        out.push(c);
    }
    out
}

#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineGenerator;

impl TextGenerator for OfflineGenerator {
    fn name(&self) -> &'static str {
        "offline"
    }

    fn generate(&self, _prompt: &str, _temperature: f32) -> Result<String, GenerationError> {
        Err(GenerationError::Offline)
    }
}

/// Opens links with the platform's default handler.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemOpener;

impl SystemOpener {
    fn command(url: &str) -> (&'static str, Command) {
        if cfg!(target_os = "windows") {
            let mut cmd = Command::new("cmd");
            // `start` treats the first quoted argument as a window title.
            cmd.args(["/C", "start", "", url]);
            ("cmd", cmd)
        } else if cfg!(target_os = "macos") {
            let mut cmd = Command::new("open");
            cmd.arg(url);
            ("open", cmd)
        } else {
            let mut cmd = Command::new("xdg-open");
            cmd.arg(url);
            ("xdg-open", cmd)
        }
    }
}

impl MessagingLink for SystemOpener {
    fn open(&self, link: &DeepLink) -> Result<(), LinkError> {
        let (program, mut cmd) = Self::command(&link.url());
        let status = cmd
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|source| LinkError::Spawn { program, source })?;
        if !status.success() {
            return Err(LinkError::Exit {
                program,
                status: status.to_string(),
            });
        }
        Ok(())
    }
}

/// Writes each link's URL on its own line instead of opening it.
pub struct PrintLink {
    out: Mutex<Box<dyn Write + Send>>,
}

impl PrintLink {
    pub fn new(out: impl Write + Send + 'static) -> Self {
        Self {
            out: Mutex::new(Box::new(out)),
        }
    }

    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl MessagingLink for PrintLink {
    fn open(&self, link: &DeepLink) -> Result<(), LinkError> {
        let mut out = self.out.lock().map_err(|_| LinkError::Poisoned)?;
        writeln!(out, "{}", link.url())?;
        out.flush()?;
        Ok(())
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn on_click(&self) {}
    fn on_success(&self) {}
    fn on_transition(&self) {}
}

/// Rings the terminal bell for successes and screen transitions.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalBell;

impl TerminalBell {
    fn ring(&self) {
        let mut err = std::io::stderr();
        let _ = err.write_all(b"\x07");
        let _ = err.flush();
    }
}

impl Notifier for TerminalBell {
    fn on_click(&self) {}

    fn on_success(&self) {
        self.ring();
    }

    fn on_transition(&self) {
        self.ring();
    }
}

pub fn resolve_notifier(config: &AudioConfig) -> Box<dyn Notifier> {
    if config.enabled {
        Box::new(TerminalBell)
    } else {
        Box::new(SilentNotifier)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use pretty_assertions::assert_eq;

    use super::*;

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            match self.0.lock() {
                Ok(mut inner) => inner.write(buf),
                Err(_) => Err(std::io::Error::other("poisoned")),
            }
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn gemini_body_concatenates_first_candidate_parts() {
        let body = r#"{"candidates":[
            {"content":{"parts":[{"text":"Hello "},{"text":"world"}]}},
            {"content":{"parts":[{"text":"ignored"}]}}
        ]}"#;
        assert_eq!(parse_gemini_body(body).expect("text"), "Hello world");
    }

    #[test]
    fn gemini_body_without_text_is_empty() {
        assert!(matches!(
            parse_gemini_body(r#"{"candidates":[]}"#),
            Err(GenerationError::Empty)
        ));
        assert!(matches!(
            parse_gemini_body(r#"{"promptFeedback":{"blockReason":"OTHER"}}"#),
            Err(GenerationError::Empty)
        ));
    }

    #[test]
    fn gemini_body_that_is_not_json_is_malformed() {
        assert!(matches!(
            parse_gemini_body("<html>bad gateway</html>"),
            Err(GenerationError::Malformed(_))
        ));
    }

    #[test]
    fn request_body_matches_generate_content_shape() {
        let body = GenerateRequest {
            contents: [RequestContent {
                parts: [RequestPart { text: "hi" }],
            }],
            generation_config: GenerationConfig { temperature: 0.5 },
        };
        assert_eq!(
            serde_json::to_value(&body).expect("json"),
            serde_json::json!({
                "contents": [{"parts": [{"text": "hi"}]}],
                "generationConfig": {"temperature": 0.5}
            })
        );
    }

    #[test]
    fn unknown_provider_resolves_offline() {
        let config = ModelConfig {
            provider: "carrier-pigeon".to_string(),
            ..ModelConfig::default()
        };
        assert_eq!(resolve_generator(&config).name(), "offline");
        assert_eq!(resolve_provider(" Ollama "), "ollama");
    }

    #[test]
    fn offline_generator_always_fails() {
        assert!(matches!(
            OfflineGenerator.generate("prompt", 0.7),
            Err(GenerationError::Offline)
        ));
    }

    #[test]
    fn ansi_sequences_and_carriage_returns_are_removed() {
        assert_eq!(strip_ansi_sequences("\u{1b}[2Khello\r"), "hello");
    }

    #[test]
    fn print_link_writes_the_url() {
        let buf = SharedBuf::default();
        let links = PrintLink::new(buf.clone());
        links
            .open(&DeepLink::new("+15550100199", Some("hi there")))
            .expect("write");
        let written = buf.0.lock().map(|b| b.clone()).unwrap_or_default();
        assert_eq!(
            String::from_utf8_lossy(&written),
            "https://wa.me/15550100199?text=hi%20there\n"
        );
    }
}
