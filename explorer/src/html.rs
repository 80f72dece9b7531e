// HTML building blocks shared by the views
use actix_web::HttpResponse;
use actix_web::http::StatusCode;

/// Escape text for element content and quoted attribute values.
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Percent-encode a value for use inside a URL path segment.
pub fn path_segment(input: &str) -> String {
    urlencoding::encode(input).into_owned()
}

pub fn join_classes(classes: &[&str]) -> String {
    classes
        .iter()
        .filter(|c| !c.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn link(href: &str, text: &str) -> String {
    format!(
        r#"<a class="text-blue-500 hover:underline" href="{}">{}</a>"#,
        escape(href),
        escape(text)
    )
}

/// `label: value` line; `value_html` must already be escaped.
pub fn field(label: &str, value_html: &str) -> String {
    format!(
        r#"<div class="{}"><span class="font-semibold">{}:</span> <span class="break-all">{}</span></div>"#,
        join_classes(&["flex", "gap-2", "py-1"]),
        escape(label),
        value_html
    )
}

fn header() -> String {
    let nav = [
        ("/", "Home"),
        ("/account-balance", "Account Balance"),
        ("/nft", "NFT"),
    ]
    .iter()
    .map(|(href, text)| {
        format!(
            r#"<a class="hover:text-blue-200" href="{}">{}</a>"#,
            href, text
        )
    })
    .collect::<Vec<_>>()
    .join("");

    format!(
        r#"<header class="{}"><a class="text-2xl font-bold" href="/">Ethereum Block Explorer</a><nav class="flex gap-6">{}</nav></header>"#,
        join_classes(&[
            "flex",
            "justify-between",
            "items-center",
            "p-5",
            "bg-blue-500",
            "text-white"
        ]),
        nav
    )
}

/// Full document with the shared header around `body`.
pub fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{} | Ethereum Block Explorer</title>
<script src="https://cdn.tailwindcss.com"></script>
</head>
<body>
{}
<main>
{}
</main>
</body>
</html>
"#,
        escape(title),
        header(),
        body
    )
}

pub fn page(status: StatusCode, title: &str, body: &str) -> HttpResponse {
    HttpResponse::build(status)
        .content_type("text/html; charset=utf-8")
        .body(layout(title, body))
}

pub fn heading(text: &str) -> String {
    format!(
        r#"<div class="text-center my-10 text-3xl">{}</div>"#,
        escape(text)
    )
}

pub fn error_text(message: &str) -> String {
    format!(
        r#"<div class="text-red-500 text-center">{}</div>"#,
        escape(message)
    )
}
