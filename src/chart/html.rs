//! HTML page assembly shared by the browser backends

use serde::Serialize;

use super::colors::{COLOR_BACKGROUND, COLOR_TEXT};

pub(super) const ECHARTS_CDN: &str = "https://cdn.jsdelivr.net/npm/echarts@5/dist/echarts.min.js";
pub(super) const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

/// Escape text for HTML element content and attribute values
pub(super) fn escape(text: &str) -> String {
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

/// Serialize a value as a JavaScript literal that is safe inside `<script>`
pub(super) fn script_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    Ok(serde_json::to_string(value)?.replace("</", "<\\/"))
}

/// Chart container plus its selection panel
pub(super) fn section(heading: &str, div_id: &str, script: &str) -> String {
    format!(
        r#"<section class="timeline">
<h2>{heading}</h2>
<div id="{id}" class="chart"></div>
<div id="{id}-selection" class="selection" hidden></div>
<script>
{script}
</script>
</section>"#,
        heading = escape(heading),
        id = escape(div_id),
        script = script,
    )
}

/// Fills a selection panel from a `{category, date, titles}` payload.
/// Uses `textContent` so titles are never interpreted as markup.
const SHOW_SELECTION_JS: &str = r#"function eventlineShowSelection(panelId, sel) {
  var panel = document.getElementById(panelId);
  if (!panel || !sel) { return; }
  panel.replaceChildren();
  function row(label, value) {
    var div = document.createElement('div');
    var strong = document.createElement('strong');
    strong.textContent = label + ': ';
    div.appendChild(strong);
    div.appendChild(document.createTextNode(value));
    panel.appendChild(div);
  }
  row('Event Type', sel.category);
  row('Date', sel.date);
  var heading = document.createElement('strong');
  heading.textContent = 'Titles:';
  panel.appendChild(heading);
  var list = document.createElement('ul');
  sel.titles.forEach(function (t) {
    var li = document.createElement('li');
    li.textContent = t;
    list.appendChild(li);
  });
  panel.appendChild(list);
  panel.hidden = false;
}"#;

pub(super) fn render_page(title: &str, sections: &[String]) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<script src="{echarts}"></script>
<script src="{plotly}"></script>
<style>
body {{ font-family: Helvetica, Arial, sans-serif; background: {background}; color: {text}; margin: 2rem; }}
.chart {{ width: 100%; height: 400px; }}
.selection {{ margin-top: 1rem; padding: 1rem; border: 1px solid #ccc; border-radius: 8px; background-color: #f9f9f9; }}
</style>
<script>
{show_selection}
</script>
</head>
<body>
<h1>{title}</h1>
{sections}
</body>
</html>
"#,
        title = escape(title),
        echarts = ECHARTS_CDN,
        plotly = PLOTLY_CDN,
        background = COLOR_BACKGROUND,
        text = COLOR_TEXT,
        show_selection = SHOW_SELECTION_JS,
        sections = sections.join("\n"),
    )
}
