//! HTML rendering. Every function here is pure: state in, markup out.

pub mod pages;

pub use pages::{about_page, analysis_page, error_page, login_page, records_page};

use crate::db::PatientRecord;
use crate::types::session::{Session, View};

pub const APP_TITLE: &str = "CerviHope";

/// Inline message shown above a view's content.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    Success(String),
    Error(String),
}

/// Everything a render needs besides the session itself.
#[derive(Debug, Default)]
pub struct PageContext<'a> {
    pub records: &'a [PatientRecord],
    pub notice: Option<Notice>,
    pub about_image_url: Option<&'a str>,
}

/// Page controller: logged out always means the login view.
pub fn render(session: &Session, ctx: &PageContext<'_>) -> String {
    match session {
        Session::LoggedOut => login_page(ctx.notice.as_ref()),
        Session::LoggedIn { username, view } => {
            let body = match view {
                View::About => about_page(ctx.about_image_url),
                View::ImageAnalysis => analysis_page(),
                View::Records => records_page(ctx.records),
            };
            shell(username, *view, ctx.notice.as_ref(), &body)
        }
    }
}

pub(crate) fn document(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} · {APP_TITLE}</title>
<style>
body {{ font-family: sans-serif; margin: 0; display: flex; min-height: 100vh; }}
nav {{ width: 14rem; background: #f3eef5; padding: 1rem; }}
nav form {{ margin: 0 0 .5rem 0; }}
nav button {{ width: 100%; text-align: left; padding: .4rem; border: 0; background: none; cursor: pointer; }}
nav button.active {{ background: #d9c7e2; font-weight: bold; }}
main {{ flex: 1; padding: 1.5rem 2rem; max-width: 60rem; }}
.notice {{ padding: .6rem 1rem; border-radius: 4px; margin-bottom: 1rem; }}
.success {{ background: #e3f4e1; }}
.error {{ background: #fbe3e3; }}
table {{ border-collapse: collapse; width: 100%; }}
th, td {{ border-bottom: 1px solid #ddd; padding: .4rem; text-align: left; }}
img.scan {{ max-width: 24rem; margin-top: .5rem; }}
</style>
</head>
<body>
{body}
</body>
</html>"#,
        title = escape_html(title),
    )
}

fn shell(username: &str, active: View, notice: Option<&Notice>, content: &str) -> String {
    let nav: String = View::ALL
        .into_iter()
        .map(|view| {
            let class = if view == active { " class=\"active\"" } else { "" };
            format!(
                r#"<form method="post" action="/navigate"><input type="hidden" name="view" value="{slug}"><button type="submit"{class}>{title}</button></form>"#,
                slug = view.slug(),
                title = view.title(),
            )
        })
        .collect();

    let body = format!(
        r#"<nav>
<h2>{APP_TITLE}</h2>
<p>Signed in as <strong>{user}</strong></p>
{nav}
<form method="post" action="/logout"><button type="submit">Logout</button></form>
</nav>
<main>
{notice}
{content}
</main>"#,
        user = escape_html(username),
        notice = notice_html(notice),
    );
    document(active.title(), &body)
}

pub(crate) fn notice_html(notice: Option<&Notice>) -> String {
    match notice {
        Some(Notice::Success(msg)) => {
            format!(r#"<div class="notice success">{}</div>"#, escape_html(msg))
        }
        Some(Notice::Error(msg)) => {
            format!(r#"<div class="notice error">{}</div>"#, escape_html(msg))
        }
        None => String::new(),
    }
}

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}
