//! Server-rendered page for the summarizer form and its results.

use askama::Template;

use crate::core::models::{FieldValue, NOT_PROCESSED_MESSAGE, SummaryOutcome};
use crate::errors::SummarizerError;

pub const SUCCESS_MESSAGE: &str = "Summary generated successfully!";

/// How a free-text list field is split into items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListSplit {
    /// Always split on commas.
    Commas,
    /// Split on newlines when present, otherwise on commas.
    LinesOrCommas,
}

/// Normalise a `people`/`actions` value into trimmed, non-blank items.
pub fn list_items(value: Option<&FieldValue>, split: ListSplit) -> Vec<String> {
    let raw: Vec<&str> = match value {
        None => Vec::new(),
        Some(FieldValue::List(items)) => items.iter().map(String::as_str).collect(),
        Some(FieldValue::Text(text)) => match split {
            ListSplit::LinesOrCommas if text.contains('\n') => text.split('\n').collect(),
            _ => text.split(',').collect(),
        },
    };

    raw.into_iter()
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(ToString::to_string)
        .collect()
}

#[derive(Template)]
#[template(
    source = r##"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Email Summary</title>
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <style>
    body { font-family: Arial, sans-serif; margin: 0; background: #f7f7f7; }
    .container { background: #fff; padding: 30px 40px; border-radius: 10px; box-shadow: 0 2px 8px #0001; max-width: 800px; margin: 40px auto; }
    textarea, input { font-family: inherit; }
    textarea { width: 100%; font-size: 1em; padding: 10px; border-radius: 6px; border: 1px solid #ccc; margin-bottom: 10px; resize: vertical; box-sizing: border-box; }
    input[type=submit] { padding: 10px 30px; font-size: 1em; border-radius: 6px; border: none; background: #007bff; color: #fff; cursor: pointer; }
    input[type=submit]:hover:not(:disabled) { background: #0056b3; }
    input[type=submit]:disabled { background: #aaa; cursor: not-allowed; }
    .error { color: #b30000; background: #ffeaea; padding: 10px; border-radius: 6px; margin-bottom: 15px; border: 1px solid #b30000; }
    .success { color: #155724; background: #d4edda; padding: 10px; border-radius: 6px; margin-bottom: 15px; border: 1px solid #155724; }
    h1 { margin-top: 0; }
    label { font-weight: bold; }
    .output { margin-top: 25px; }
    ul { padding-left: 20px; }
    .info { color: #555; font-size: 0.97em; margin-bottom: 10px; }
    @media (max-width: 600px) {
      .container { padding: 15px 5vw; }
    }
  </style>
  <script>
    function checkInput() {
      var ta = document.getElementById('email_chain');
      document.getElementById('submitBtn').disabled = ta.value.trim().length === 0;
    }
    window.onload = checkInput;
  </script>
</head>
<body>
<div class="container">
  <h1>Email Chain Summarizer</h1>
  <div class="info">
    Paste your email chain below and get a summary, people involved, action items, and a reply template.
  </div>
  {% if show_banner %}<div class="{{ banner_class }}">{{ banner_text }}</div>{% endif %}
  <form method="post" autocomplete="off">
    <label for="email_chain">Email Chain</label><br>
    <textarea id="email_chain" name="email_chain" rows="10" placeholder="Paste the full email conversation here..." oninput="checkInput()" required>{{ email_chain }}</textarea>
    <input id="submitBtn" type="submit" value="Summarize">
  </form>
  {% if show_result %}
  <div class="output">
    <label for="summary">Summary</label>
    <textarea id="summary" rows="3" readonly>{{ summary }}</textarea>
    <label for="people">People Involved</label>
    <ul id="people">
      {% for person in people %}<li>{{ person }}</li>
      {% endfor %}
    </ul>
    <label for="actions">Action Items</label>
    <ul id="actions">
      {% for action in actions %}<li>{{ action }}</li>
      {% endfor %}
    </ul>
    <label for="response_template">Response Template</label>
    <textarea id="response_template" rows="5" readonly>{{ response_template }}</textarea>
  </div>
  {% endif %}
</div>
</body>
</html>
"##,
    ext = "html"
)]
pub struct IndexPage<'a> {
    email_chain: &'a str,
    show_banner: bool,
    banner_class: &'static str,
    banner_text: &'a str,
    show_result: bool,
    summary: &'a str,
    people: Vec<String>,
    actions: Vec<String>,
    response_template: &'a str,
}

impl<'a> IndexPage<'a> {
    pub fn new(email_chain: &'a str, outcome: &'a SummaryOutcome) -> Self {
        let mut page = Self {
            email_chain,
            show_banner: false,
            banner_class: "",
            banner_text: "",
            show_result: false,
            summary: "",
            people: Vec::new(),
            actions: Vec::new(),
            response_template: "",
        };

        match outcome {
            SummaryOutcome::Idle => {}
            SummaryOutcome::NotProcessed => {
                page.show_banner = true;
                page.banner_class = "error";
                page.banner_text = NOT_PROCESSED_MESSAGE;
            }
            SummaryOutcome::Failed(message) => {
                page.show_banner = true;
                page.banner_class = "error";
                page.banner_text = message;
            }
            SummaryOutcome::Completed(result) => {
                // A missing or empty summary shows nothing, same as an idle page
                if let Some(summary) = result.summary.as_deref().filter(|s| !s.is_empty()) {
                    page.show_banner = true;
                    page.banner_class = "success";
                    page.banner_text = SUCCESS_MESSAGE;
                    page.show_result = true;
                    page.summary = summary;
                    page.people = list_items(result.people.as_ref(), ListSplit::Commas);
                    page.actions = list_items(result.actions.as_ref(), ListSplit::LinesOrCommas);
                    page.response_template = result.response_template.as_deref().unwrap_or("");
                }
            }
        }

        page
    }
}

/// Render the full page for the submitted text and its outcome.
pub fn render_page(email_chain: &str, outcome: &SummaryOutcome) -> Result<String, SummarizerError> {
    Ok(IndexPage::new(email_chain, outcome).render()?)
}
