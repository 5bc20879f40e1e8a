use std::collections::BTreeMap;

use crate::dashboard::svg::level_color;
use crate::model::schema::{SLIDER_MAX, SLIDER_MIN, display_name};
use crate::pipeline::Assessment;
use crate::report::format_percent;

pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
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

pub struct PageParts<'a> {
    pub features: &'a [String],
    pub values: &'a BTreeMap<String, i64>,
    pub assessment: &'a Assessment,
    pub gauge_svg: String,
    pub factors_svg: String,
    pub chart_svgs: Vec<String>,
    pub form_action: &'a str,
}

const STYLE: &str = "\
body{margin:0;font-family:system-ui,sans-serif;color:#222;display:flex}\
aside{width:260px;min-height:100vh;background:#f0f2f6;padding:16px;box-sizing:border-box}\
aside label{display:block;font-size:13px;margin-top:10px}\
aside input{width:80%;vertical-align:middle}\
aside output{margin-left:6px}\
main{flex:1;padding:16px 28px}\
.row{display:flex;flex-wrap:wrap;gap:16px;align-items:flex-start}\
.metric{padding:12px 20px;border-radius:8px;color:#fff;min-width:160px}\
.metric .value{font-size:32px;font-weight:700}\
.metric .delta{font-size:14px}\
.advice{max-width:900px;line-height:1.5}\
main svg{background:#fff;border:1px solid #eee}";

pub fn render_page(parts: &PageParts<'_>) -> String {
    let a = parts.assessment;
    let mut out = String::new();

    out.push_str("<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">");
    out.push_str("<title>AI Student Stress Dashboard</title>");
    out.push_str(&format!("<style>{STYLE}</style></head><body>"));

    out.push_str(&format!(
        "<aside><h2>Student Inputs</h2><form method=\"get\" action=\"{}\">",
        escape(parts.form_action)
    ));
    for name in parts.features {
        let v = parts.values.get(name).copied().unwrap_or_default();
        out.push_str(&format!(
            "<label for=\"{n}\">{label}</label>\
             <input type=\"range\" id=\"{n}\" name=\"{n}\" min=\"{SLIDER_MIN}\" max=\"{SLIDER_MAX}\" step=\"1\" value=\"{v}\" \
             oninput=\"this.nextElementSibling.value=this.value\" onchange=\"this.form.submit()\">\
             <output>{v}</output>",
            n = escape(name),
            label = escape(&display_name(name)),
        ));
    }
    out.push_str("<noscript><button type=\"submit\">Update</button></noscript></form></aside>");

    out.push_str("<main><h1>AI Student Stress Dashboard</h1>");
    out.push_str("<h3>Predicted Stress Level</h3><div class=\"row\">");
    out.push_str(&format!(
        "<div class=\"metric\" style=\"background:{}\"><div>Stress Level</div><div class=\"value\">{}</div><div class=\"delta\">{}</div></div>",
        level_color(a.stress_level),
        a.stress_level,
        format_percent(a.risk_score)
    ));
    out.push_str(&parts.gauge_svg);
    out.push_str(&parts.factors_svg);
    out.push_str("</div>");

    out.push_str("<h3>Top Contributing Factors &amp; Advice</h3>");
    out.push_str(&format!("<p class=\"advice\">{}</p>", escape(&a.advice)));

    out.push_str("<div class=\"row\">");
    for svg in &parts.chart_svgs {
        out.push_str(svg);
    }
    out.push_str("</div>");

    out.push_str("<p>Move the sliders in the sidebar to see your stress level update and visualize your input on all graphs!</p>");
    out.push_str("</main></body></html>");
    out
}

#[cfg(test)]
#[path = "../../tests/src_inline/dashboard/page.rs"]
mod tests;
