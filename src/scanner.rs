//! AI-backed issue extraction.
//!
//! One file at a time: compose a prompt around the line-numbered content,
//! send a single blocking chat-completion request, and parse the reply as
//! a JSON array of findings. Response parsing is a pure function so it can
//! be tested against literal fixtures without touching the network. Any
//! failure on the way (network, HTTP status, unparseable reply) degrades
//! to an empty issue list for that file; the scan always continues.

use crate::models::{Issue, WcagLevel, WcagVersion};
use crate::utils::{error_prefix, warn_prefix};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

/// Default OpenAI-compatible endpoint; override with `OPENAI_BASE_URL`.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

const SYSTEM_PROMPT: &str = "You are an expert accessibility auditor.";

/// Code-fence markers stripped from model replies before array
/// extraction; compiled once, the parser runs for every scanned file.
fn fence_regex() -> &'static Regex {
    static FENCE: OnceLock<Regex> = OnceLock::new();
    FENCE.get_or_init(|| Regex::new(r"(?m)^```(?:json)?|```$").expect("valid fence pattern"))
}

/// Low temperature favors deterministic, schema-shaped output.
const TEMPERATURE: f32 = 0.3;

const TWIG_GUIDANCE: &str = r#"
**IMPORTANT - Template Syntax Awareness:**
This file contains Twig/HTML template syntax. Distinguish between these two patterns:

1. **Variables that render COMPLETE HTML elements** (DO NOT FLAG):
   - Examples: {{ image }}, {{ content.field_image }}, {{ node.field_banner }}, {{ item.image }}
   - These variables output entire HTML tags (e.g., a complete <img> with all attributes)
   - The backend/CMS handles accessibility attributes automatically
   - DO NOT flag these as missing alt text - they are handled server-side

2. **Manual HTML tags with dynamic ATTRIBUTES** (FLAG if missing alt):
   - Examples: <img src="{{ image_url }}">, <img src="{{ path }}">
   - The template is building the HTML tag structure itself
   - If the template lacks an alt attribute entirely (not even alt="{{ var }}"), FLAG it
   - If the template has alt="{{ variable }}" or alt="{{ item.alt }}", DO NOT flag

**Key Rule**: Only flag accessibility issues when the TEMPLATE STRUCTURE itself is building an incomplete HTML element. Do NOT flag when a variable is outputting a complete, pre-rendered HTML element.
"#;

const JSX_GUIDANCE: &str = r#"
**IMPORTANT - JSX/React Awareness:**
This file contains JSX/React code. Distinguish between these patterns:

1. **Components/Functions that render COMPLETE accessible elements** (DO NOT FLAG):
   - Examples: <Image />, <NextImage />, <GatsbyImage />, {renderImage()}, {content.image}
   - Framework image components (Next.js Image, Gatsby Image, custom Image components)
   - Functions that return complete JSX with accessibility built-in
   - DO NOT flag these - they handle accessibility internally

2. **Manual <img> tags with dynamic PROPS** (FLAG if missing alt):
   - Examples: <img src={imageUrl} />, <img src={props.image} />
   - The component is building the HTML tag structure itself
   - If the JSX lacks an alt prop entirely (not even alt={variable}), FLAG it
   - If the JSX has alt={variable}, alt={props.alt}, or alt={alt || ''}, DO NOT flag
   - Exception: alt="" is acceptable for decorative images

3. **Image components WITH explicit props** (Verify alt exists):
   - Examples: <Image src={url} alt={description} />
   - Even custom components should carry an alt prop for accessibility
   - Flag if a custom image component lacks an alt prop entirely

**Key Rule**: Only flag when the component/element structure itself lacks accessibility props. Recognize that framework components and render functions handle accessibility internally.
"#;

/// Prefix every line with a right-aligned 1-based line number.
pub fn number_lines(content: &str) -> String {
    content
        .lines()
        .enumerate()
        .map(|(i, line)| format!("{:4}: {}", i + 1, line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Template-syntax guidance selected by file extension; empty when the
/// extension has no special handling.
pub fn template_guidance(file_name: &str) -> &'static str {
    let ext = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    match ext.as_str() {
        "twig" | "html" => TWIG_GUIDANCE,
        "jsx" | "tsx" => JSX_GUIDANCE,
        _ => "",
    }
}

/// Compose the audit prompt for one file.
pub fn build_prompt(
    numbered_content: &str,
    file_name: &str,
    level: WcagLevel,
    version: WcagVersion,
) -> String {
    let guidance = template_guidance(file_name);
    format!(
        r#"You are an expert in web accessibility and WCAG compliance.

The following code includes line numbers.
{guidance}
Scan the code and return **only valid JSON** with this structure:
[
  {{
    "title": "Short title of the issue",
    "issue_type": "Type/category of the issue (e.g., Contrast, Alt Text, Keyboard Navigation)",
    "description": "Detailed description of the issue",
    "line_numbers": [list of affected lines],
    "code_snippet": "Relevant code snippet",
    "suggestion": "AI-based suggestion to fix it",
    "severity": "High | Medium | Low"
  }}
]

Rules:
- Do not include any extra text outside JSON.
- Severity should be based on WCAG impact.
- If no issues found, return [].
- For template files: Recognize that variables/expressions provide dynamic content at runtime.
- Only flag issues when the template structure itself is inaccessible, not when dynamic content might fix it.

WCAG Version: {version}
Accessibility Level: {level}

File: {file_name}
----------------------
{numbered_content}
"#
    )
}

/// Parse a model reply into findings.
///
/// Strips code-fence markers, takes the span from the first `[` to the
/// last `]`, and parses it as a JSON array of [`Issue`]s. Errors when no
/// such span exists or the span is not valid JSON.
pub fn parse_issue_response(raw: &str) -> anyhow::Result<Vec<Issue>> {
    let cleaned = fence_regex().replace_all(raw.trim(), "");
    let cleaned = cleaned.trim();
    match (cleaned.find('['), cleaned.rfind(']')) {
        (Some(start), Some(end)) if start < end => {
            let issues: Vec<Issue> = serde_json::from_str(&cleaned[start..=end])?;
            Ok(issues)
        }
        _ => anyhow::bail!("no JSON array found in model response"),
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

/// Handle to the completion endpoint, constructed once per run.
pub struct ModelClient {
    http: reqwest::blocking::Client,
    api_key: String,
    base_url: String,
}

impl ModelClient {
    pub fn new(api_key: String) -> Self {
        let base_url = std::env::var("OPENAI_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        ModelClient {
            http: reqwest::blocking::Client::new(),
            api_key,
            base_url,
        }
    }

    fn chat(&self, model: &str, prompt: &str) -> anyhow::Result<String> {
        let body = ChatRequest {
            model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: TEMPERATURE,
        };
        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()?
            .error_for_status()?;
        let parsed: ChatResponse = response.json()?;
        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| anyhow::anyhow!("model response contained no choices"))
    }

    /// Audit one file's content; failures degrade to zero issues.
    pub fn analyze_file(
        &self,
        content: &str,
        file_name: &str,
        level: WcagLevel,
        version: WcagVersion,
        model: &str,
    ) -> Vec<Issue> {
        let numbered = number_lines(content);
        let prompt = build_prompt(&numbered, file_name, level, version);
        let raw = match self.chat(model, &prompt) {
            Ok(raw) => raw,
            Err(e) => {
                eprintln!("{} Error scanning file {}: {}", error_prefix(), file_name, e);
                return Vec::new();
            }
        };
        issues_or_empty(&raw, file_name)
    }
}

/// Parse a reply, degrading to an empty list with a warning instead of
/// raising. This is the failure policy for the whole extractor: a bad
/// reply costs one file its findings, never the run.
pub fn issues_or_empty(raw: &str, file_name: &str) -> Vec<Issue> {
    match parse_issue_response(raw) {
        Ok(issues) => issues,
        Err(e) => {
            eprintln!(
                "{} Could not parse model response for {}: {}",
                warn_prefix(),
                file_name,
                e
            );
            Vec::new()
        }
    }
}
