//! Assistant Markdown Renderer
//!
//! Renders chat responses with pulldown-cmark. Model output is untrusted:
//! - raw HTML is shown as text
//! - images become plain links
//! - links open in a new tab and unsafe schemes are dropped
//! - fenced code keeps its language as a CSS class, no highlighting

use pulldown_cmark::{html::push_html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};

/// Parse markdown into sanitized HTML
pub fn render_markdown(text: &str) -> String {
    let parser = Parser::new_ext(text, get_options());
    let events = transform_events(parser);
    let mut html_output = String::new();
    push_html(&mut html_output, events.into_iter());
    html_output
}

fn get_options() -> Options {
    Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES | Options::ENABLE_TASKLISTS
}

// State for the event transformer
enum State {
    Normal,
    InCodeBlock { lang: Option<String>, content: String },
    InImage { dest: String, alt: String, depth: usize },
}

fn transform_events<'a>(parser: Parser<'a>) -> Vec<Event<'a>> {
    let mut events = Vec::new();
    let mut state = State::Normal;

    for event in parser {
        match state {
            State::Normal => match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    let lang = match kind {
                        CodeBlockKind::Fenced(l) if !l.is_empty() => Some(l.to_string()),
                        _ => None,
                    };
                    state = State::InCodeBlock { lang, content: String::new() };
                }

                Event::Start(Tag::Image { dest_url, .. }) => {
                    state = State::InImage { dest: dest_url.to_string(), alt: String::new(), depth: 0 };
                }

                Event::Start(Tag::Link { dest_url, title, .. }) => {
                    let html = match safe_href(&dest_url) {
                        Some(href) => format!(
                            r#"<a href="{}" title="{}" target="_blank" rel="noopener noreferrer">"#,
                            escape_html(&href),
                            escape_html(&title)
                        ),
                        None => "<a>".to_string(),
                    };
                    events.push(Event::Html(CowStr::from(html)));
                }
                Event::End(TagEnd::Link) => events.push(Event::Html(CowStr::from("</a>"))),

                // Never pass model-provided markup through
                Event::Html(raw) | Event::InlineHtml(raw) => events.push(Event::Text(raw)),

                other => events.push(other),
            },

            State::InCodeBlock { ref lang, ref mut content } => match event {
                Event::Text(t) => content.push_str(&t),
                Event::End(TagEnd::CodeBlock) => {
                    let class = lang
                        .as_deref()
                        .map(|l| format!(r#" class="language-{}""#, escape_html(l)))
                        .unwrap_or_default();
                    let html = format!("<pre><code{}>{}</code></pre>", class, escape_html(content));
                    events.push(Event::Html(CowStr::from(html)));
                    state = State::Normal;
                }
                _ => {}
            },

            State::InImage { ref dest, ref mut alt, ref mut depth } => match event {
                Event::Start(_) => *depth += 1,
                Event::Text(t) => alt.push_str(&t),
                Event::End(_) if *depth > 0 => *depth -= 1,
                Event::End(_) => {
                    let label = if alt.is_empty() { "image" } else { alt.as_str() };
                    let html = match safe_href(dest) {
                        Some(href) => format!(
                            r#"<a href="{}" target="_blank" rel="noopener noreferrer">{}</a>"#,
                            escape_html(&href),
                            escape_html(label)
                        ),
                        None => escape_html(label),
                    };
                    events.push(Event::Html(CowStr::from(html)));
                    state = State::Normal;
                }
                _ => {}
            },
        }
    }

    events
}

/// Only web and mail links survive
fn safe_href(url: &str) -> Option<String> {
    let trimmed = url.trim();
    let lower = trimmed.to_ascii_lowercase();
    let allowed = lower.starts_with("http://")
        || lower.starts_with("https://")
        || lower.starts_with("mailto:")
        || lower.starts_with('/')
        || lower.starts_with('#');
    allowed.then(|| trimmed.to_string())
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
