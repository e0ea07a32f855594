//! HTML Rendering
//!
//! Turns the component tree into markup and wraps it in the page shell:
//! fonts, plotly.js, the page stylesheet, and the script that posts control
//! changes to the update endpoint and redraws the affected chart.

use std::fmt::{self, Write};

use serde_json::json;

use super::component::{Component, TITLE};
use crate::bindings::BindingRegistry;

pub const PLOTLY_JS: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

const FONT_PRECONNECT: [&str; 2] = ["https://fonts.googleapis.com", "https://fonts.gstatic.com"];

const FONT_STYLESHEET: &str = "https://fonts.googleapis.com/css2?family=Inter+Tight:ital,wght@0,100;0,200;0,300;0,400;0,500;0,600;0,700;0,800;0,900;1,100;1,200;1,300;1,400;1,500;1,600;1,700;1,800;1,900&family=Ubuntu:ital,wght@0,300;0,400;0,500;0,700;1,300;1,400;1,500;1,700&display=swap";

/// Endpoint the page script posts control values to
pub const UPDATE_PATH: &str = "/api/v1/update";

pub const PAGE_CSS: &str = r#"
body {
  margin: 0;
  font-family: "Inter Tight", "Ubuntu", system-ui, sans-serif;
  background: #f6f7fb;
  color: #1c2233;
}
.app_wrapper { max-width: 1200px; margin: 0 auto; padding: 24px; }
.app_wrapper h1 { font-family: "Ubuntu", sans-serif; font-weight: 500; }
.scatter_plot_field, .bar_plot_field, .geo_scatter_field, .line_plot_field {
  background: #ffffff;
  border-radius: 10px;
  box-shadow: 0 4px 18px rgba(0, 0, 0, 0.06);
  margin-bottom: 24px;
  padding: 16px;
}
.dropdown-field, .slider-field { display: flex; align-items: center; gap: 12px; }
.dropdown-field h4, .slider-field h4 { margin: 8px 0; }
select { min-width: 240px; padding: 6px 8px; border-radius: 6px; }
input[type=range] { flex: 1; }
.slider-value { min-width: 48px; font-variant-numeric: tabular-nums; }
.graph { min-height: 450px; }
"#;

pub const PAGE_SCRIPT: &str = r#"
(function () {
  function controlValue(id) {
    var el = document.getElementById(id);
    if (!el) return null;
    return el.type === "range" ? Number(el.value) : el.value;
  }

  function refresh(binding) {
    var inputs = {};
    binding.inputs.forEach(function (id) { inputs[id] = controlValue(id); });
    return fetch(UPDATE_PATH, {
      method: "POST",
      headers: { "Content-Type": "application/json" },
      body: JSON.stringify({ output: binding.output, inputs: inputs })
    })
      .then(function (res) {
        if (!res.ok) { return res.text().then(function (t) { throw new Error(t); }); }
        return res.json();
      })
      .then(function (body) {
        Plotly.react(body.output, body.figure.data, body.figure.layout);
      })
      .catch(function (err) { console.error(binding.output, err); });
  }

  document.querySelectorAll("input[type=range]").forEach(function (el) {
    var label = document.getElementById(el.id + "-value");
    el.addEventListener("input", function () { if (label) label.textContent = el.value; });
  });

  BINDINGS.forEach(function (binding) {
    binding.inputs.forEach(function (id) {
      var el = document.getElementById(id);
      if (el) el.addEventListener("change", function () { refresh(binding); });
    });
    refresh(binding);
  });
})();
"#;

/// Escape text for use in element content and attribute values
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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

/// Render a component and its children to markup
pub fn render_html(component: &Component) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail
    let _ = write_component(&mut out, component);
    out
}

fn write_component(out: &mut String, component: &Component) -> fmt::Result {
    match component {
        Component::Div {
            class_name,
            children,
        } => {
            match class_name {
                Some(class) => write!(out, r#"<div class="{}">"#, escape(class))?,
                None => out.push_str("<div>"),
            }
            for child in children {
                write_component(out, child)?;
            }
            out.push_str("</div>");
        }
        Component::Heading { level, text } => {
            let level = (*level).clamp(1, 6);
            write!(out, "<h{level}>{}</h{level}>", escape(text))?;
        }
        Component::Dropdown { id, options, value } => {
            write!(out, r#"<select id="{}">"#, escape(id))?;
            for option in options {
                let selected = if value.as_deref() == Some(option.value.as_str()) {
                    " selected"
                } else {
                    ""
                };
                write!(
                    out,
                    r#"<option value="{}"{}>{}</option>"#,
                    escape(&option.value),
                    selected,
                    escape(&option.label)
                )?;
            }
            out.push_str("</select>");
        }
        Component::Slider {
            id,
            min,
            max,
            step,
            value,
            marks,
        } => {
            let id = escape(id);
            write!(
                out,
                r#"<input type="range" id="{id}" min="{min}" max="{max}" step="{step}" value="{value}" list="{id}-marks">"#
            )?;
            write!(out, r#"<datalist id="{id}-marks">"#)?;
            for mark in marks {
                write!(out, r#"<option value="{mark}" label="{mark}"></option>"#)?;
            }
            write!(
                out,
                r#"</datalist><span class="slider-value" id="{id}-value">{value}</span>"#
            )?;
        }
        Component::Graph { id } => {
            write!(out, r#"<div class="graph" id="{}"></div>"#, escape(id))?;
        }
        Component::Break => out.push_str("<br>"),
    }
    Ok(())
}

/// JSON for inline `<script>` use; `</` cannot close the element early
fn script_json(value: &serde_json::Value) -> String {
    value.to_string().replace("</", "<\\/")
}

/// Full HTML document for the dashboard
pub fn render_page(root: &Component, registry: &BindingRegistry) -> String {
    let bindings = json!(registry
        .bindings()
        .iter()
        .map(|b| json!({ "output": b.output, "inputs": b.inputs }))
        .collect::<Vec<_>>());

    let mut head = String::new();
    for href in FONT_PRECONNECT {
        let _ = write!(head, r#"<link rel="preconnect" href="{href}" crossorigin>"#);
    }
    let _ = write!(
        head,
        r#"<link rel="stylesheet" href="{}">"#,
        escape(FONT_STYLESHEET)
    );

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
{head}
<script src="{plotly}"></script>
<style>{css}</style>
</head>
<body>
{body}
<script>const BINDINGS = {bindings}; const UPDATE_PATH = "{update}";</script>
<script>{script}</script>
</body>
</html>
"#,
        title = escape(TITLE),
        head = head,
        plotly = PLOTLY_JS,
        css = PAGE_CSS,
        body = render_html(root),
        bindings = script_json(&bindings),
        update = UPDATE_PATH,
        script = PAGE_SCRIPT,
    )
}
