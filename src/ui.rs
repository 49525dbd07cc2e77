// src/ui.rs
use chrono::{Datelike, Local};
use once_cell::sync::Lazy;

use crate::data_types::Tab;

pub struct Palette {
    pub primary: String,
    pub light: String,
    pub text: String,
    pub font_family: String,
}

pub static PALETTE: Lazy<Palette> = Lazy::new(|| Palette {
    primary: "#005eb8".to_string(),
    light: "#cce6ff".to_string(),
    text: "#003366".to_string(),
    font_family: "Aptos, Calibri".to_string(),
});

pub const TITLE: &str = "Cloud Cost Dashboard";
const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

/// Full dashboard page with `content` already rendered for `active`.
pub fn render_page(active: Tab, content: &str) -> String {
    let palette = &*PALETTE;
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <script src="{plotly}"></script>
    <style>{css}</style>
</head>
<body>
    <h1>{title}</h1>
    {tabs}
    <div id="tab-content">{content}</div>
    {footer}
    <script>{js}</script>
</body>
</html>"#,
        title = TITLE,
        plotly = PLOTLY_CDN,
        css = inline_css(palette),
        tabs = render_tabs(active),
        content = content,
        footer = render_footer(),
        js = inline_javascript(),
    )
}

fn render_tabs(active: Tab) -> String {
    let buttons: String = Tab::ALL
        .iter()
        .map(|tab| {
            let class = if *tab == active { "tab tab--selected" } else { "tab" };
            format!(
                r#"<button class="{class}" data-tab="{value}">{label}</button>"#,
                class = class,
                value = tab.value(),
                label = html_escape(tab.label()),
            )
        })
        .collect();
    format!(r#"<nav id="tabs">{}</nav>"#, buttons)
}

fn render_footer() -> String {
    format!(
        "<footer>{} &copy; {}</footer>",
        TITLE,
        Local::now().year()
    )
}

fn inline_css(palette: &Palette) -> String {
    format!(
        "body {{ margin: 0 2em; font-family: {font}; }}
h1 {{ font-family: {font}; color: {text}; }}
#tabs {{ display: flex; border-bottom: 1px solid #d6d6d6; }}
.tab {{ flex: 1; padding: 0.75em; border: 1px solid #d6d6d6; border-bottom: none; background: #f9f9f9; cursor: pointer; font-family: {font}; }}
.tab--selected {{ background: #ffffff; border-top: 2px solid {primary}; }}
.chart--half {{ width: 49%; display: inline-block; }}
.chart--right {{ float: right; }}
footer {{ margin-top: 2em; font-size: 0.8em; color: {text}; }}",
        font = palette.font_family,
        text = palette.text,
        primary = palette.primary,
    )
}

fn inline_javascript() -> &'static str {
    r#"
function drawFigures(root) {
    root.querySelectorAll('[data-figure]').forEach(function (el) {
        var figure = JSON.parse(el.getAttribute('data-figure'));
        Plotly.newPlot(el, figure.data, figure.layout, {responsive: true});
    });
}
document.querySelectorAll('#tabs .tab').forEach(function (button) {
    button.addEventListener('click', function () {
        document.querySelectorAll('#tabs .tab').forEach(function (b) {
            b.classList.toggle('tab--selected', b === button);
        });
        fetch('/tab-content?tab=' + encodeURIComponent(button.dataset.tab))
            .then(function (response) { return response.text(); })
            .then(function (html) {
                var content = document.getElementById('tab-content');
                content.innerHTML = html;
                drawFigures(content);
            });
    });
});
drawFigures(document);
"#
}

/// Escape HTML special characters
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
