//! HTML rendering for the form page and the scroll page.
//!
//! User- and model-supplied strings go through `html_escape`: `encode_text`
//! for element content, `encode_double_quoted_attribute` for attribute values.

use crate::core::{GeneratedStory, Style, StoryRequest};
use crate::domain::regions::REGIONS;
use html_escape::{encode_double_quoted_attribute, encode_text};
use std::fmt::Write;

const BRAND_CSS: &str = r#"
:root{
  --bg:#fffdf7;
  --card:#fcf5e6;
  --ink:#12222a;
  --gold:#c2a14d;
  --turq:#1f8a8a;
  --turq-deep:#0f6d6d;
}
html, body{ background:var(--bg); color:var(--ink); margin:0; font-family:system-ui, sans-serif; }
main{ max-width:720px; margin:0 auto; padding:2rem 1rem; }
.brand-wrap{ display:flex; align-items:center; justify-content:center; gap:14px; margin-bottom:6px; }
.brand-title{ font-size:44px; font-weight:800; letter-spacing:.4px; margin:0; color:var(--turq-deep); }
.brand-sub{ text-align:center; margin:6px 0 0 0; color:#213b40; }
.pars-card{
  background:var(--card); padding:22px; border:2px solid var(--gold);
  border-radius:14px; font-family:Georgia,serif; box-shadow:0 8px 24px rgba(0,0,0,0.06);
}
.pars-scroll{
  background:var(--card); padding:18px; border:1px solid #d8caa1;
  border-radius:10px; font-family:Georgia,serif; margin-top:12px;
}
.scroll-text{ font-size:18px; line-height:1.7; white-space:pre-wrap; margin:0; }
.divider{ height:1px; background:linear-gradient(90deg, transparent, var(--gold), transparent); margin:18px 0; }
form.myth label{ display:block; margin-top:10px; font-weight:600; }
form.myth input, form.myth select{ width:100%; padding:8px; border:1px solid #d8caa1; border-radius:8px; background:#fff; }
button{ margin-top:14px; padding:8px 16px; border-radius:999px; border:1px solid var(--gold); background:var(--turq); color:#fff; cursor:pointer; }
.notice{ padding:10px 14px; border-radius:8px; margin:12px 0; }
.notice.warning{ background:#fff6d6; border:1px solid #e6c75a; }
.notice.error{ background:#fde8e8; border:1px solid #d98c8c; }
.fact{ font-style:italic; color:#32565b; }
.sharebar a{ color:var(--turq-deep); }
.footer{ margin-top:28px; padding:10px 12px; border-top:1px solid var(--gold); text-align:center; color:#32565b; font-size:13px; }
"#;

const SVG_LOGO: &str = r##"<svg width="42" height="42" viewBox="0 0 64 64" xmlns="http://www.w3.org/2000/svg" aria-label="ParsVerse logo">
  <defs>
    <linearGradient id="g" x1="0" x2="0" y1="0" y2="1">
      <stop offset="0%" stop-color="#1f8a8a"/>
      <stop offset="100%" stop-color="#0f6d6d"/>
    </linearGradient>
  </defs>
  <circle cx="32" cy="32" r="30" fill="url(#g)" stroke="#c2a14d" stroke-width="3"/>
  <path d="M32 12 C28 20, 28 26, 32 30 C36 26, 36 20, 32 12 Z" fill="#fff"/>
  <rect x="30.8" y="30" width="2.4" height="18" fill="#fff"/>
  <circle cx="32" cy="52" r="3" fill="#c2a14d"/>
</svg>"##;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Warning(String),
    Error(String),
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>{css}</style>
</head>
<body>
<main>
<div class="brand-wrap">
{logo}
<h1 class="brand-title">ParsVerse</h1>
</div>
<p class="brand-sub">Create your Persian-inspired <strong>myth</strong> from a name and a historical region.</p>
<div class="divider"></div>
{body}
<div class="footer">Stories are generated by a language model and may be inaccurate.</div>
</main>
</body>
</html>"#,
        title = encode_text(title),
        css = BRAND_CSS,
        logo = SVG_LOGO,
        body = body,
    )
}

fn render_notice(notice: &Notice) -> String {
    let (class, message) = match notice {
        Notice::Warning(message) => ("warning", message),
        Notice::Error(message) => ("error", message),
    };
    format!(
        r#"<div class="notice {}" role="alert">{}</div>"#,
        class,
        encode_text(message)
    )
}

fn render_form(name: &str, region: &str, style: Style) -> String {
    let mut region_options = String::new();
    for candidate in REGIONS {
        let selected = if candidate.eq_ignore_ascii_case(region.trim()) {
            " selected"
        } else {
            ""
        };
        let _ = write!(
            region_options,
            r#"<option value="{0}"{1}>{2}</option>"#,
            encode_double_quoted_attribute(candidate),
            selected,
            encode_text(candidate)
        );
    }

    let mut style_options = String::new();
    for candidate in Style::ALL {
        let selected = if candidate == style { " selected" } else { "" };
        let _ = write!(
            style_options,
            r#"<option value="{0}"{1}>{0}</option>"#,
            candidate.as_str(),
            selected
        );
    }

    format!(
        r#"<form class="myth" method="post" action="/scroll">
<label for="name">Your name</label>
<input id="name" name="name" type="text" value="{name}" autocomplete="given-name">
<label for="region">Historical region</label>
<select id="region" name="region">{regions}</select>
<label for="style">Style / tone</label>
<select id="style" name="style">{styles}</select>
<button type="submit">Generate Myth</button>
</form>"#,
        name = encode_double_quoted_attribute(name),
        regions = region_options,
        styles = style_options,
    )
}

/// 首頁表單，可附帶警告或錯誤訊息
pub fn render_home(notice: Option<&Notice>, name: &str, region: &str, style: Style) -> String {
    let mut body = String::new();
    if let Some(notice) = notice {
        body.push_str(&render_notice(notice));
    }
    body.push_str(&render_form(name, region, style));
    layout("ParsVerse – Myth", &body)
}

/// X (Twitter) 分享連結
pub fn share_url(app_url: Option<&str>) -> String {
    let text = match app_url {
        Some(url) => format!("My ParsVerse myth ✨ {}", url),
        None => "My ParsVerse myth ✨".to_string(),
    };
    let quoted: String = url::form_urlencoded::byte_serialize(text.as_bytes()).collect();
    format!("https://twitter.com/intent/tweet?text={}", quoted)
}

pub fn render_scroll(
    request: &StoryRequest,
    story: &GeneratedStory,
    fact: &str,
    app_url: Option<&str>,
) -> String {
    let body = format!(
        r#"<p class="fact">Did you know? {fact}</p>
<div class="pars-card"><h3 style="text-align:center;margin-top:0;">🪶 ParsVerse Scroll</h3></div>
<div class="pars-scroll"><p class="scroll-text">{text}</p></div>
<form method="post" action="/download">
<input type="hidden" name="name" value="{name}">
<input type="hidden" name="text" value="{text_attr}">
<button type="submit">⬇️ Download Myth (.txt)</button>
</form>
<div class="sharebar" style="margin-top:8px;"><a href="{share}" target="_blank" rel="noopener">🐦 Share on X</a></div>
<div class="divider"></div>
{form}"#,
        fact = encode_text(fact),
        text = encode_text(&story.text),
        text_attr = encode_double_quoted_attribute(&story.text),
        name = encode_double_quoted_attribute(&request.name),
        share = encode_double_quoted_attribute(&share_url(app_url)),
        form = render_form(&request.name, &request.region, request.style),
    );
    layout("ParsVerse – Your Scroll", &body)
}

/// 下載檔名只保留安全字元
pub fn download_filename(name: &str) -> String {
    let cleaned: String = name
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    let stem = if cleaned.trim_matches('_').is_empty() {
        "anon".to_string()
    } else {
        cleaned
    };
    format!("parsverse_myth_{}.txt", stem)
}
