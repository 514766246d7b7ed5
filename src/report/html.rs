use crate::core::metrics::summary_headers;
use crate::core::model::{HistogramSeries, ReportModel};
use crate::report::pdf;
use crate::report::script::{JPEG_QUALITY, REPORT_JS};
use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Write as FmtWrite;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub const FILE_NAME: &str = "polyA_report.html";

const CANVAS_WIDTH: u32 = 900;
const CANVAS_HEIGHT: u32 = 400;

const POSITION_HEADERS: [&str; 4] = [
    "Sample",
    "Detected_Runs",
    "Avg_nearest_end_offset",
    "Median_nearest_end_offset",
];

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ColumnKind {
    Text,
    Number,
}

impl ColumnKind {
    fn as_str(self) -> &'static str {
        match self {
            ColumnKind::Text => "text",
            ColumnKind::Number => "number",
        }
    }
}

/// HTML table with a per-column filter row and TSV/PDF export buttons.
pub struct FilterableTable {
    pub id: &'static str,
    pub title: &'static str,
    pub download_name: &'static str,
    pub columns: Vec<(String, ColumnKind)>,
    pub rows: Vec<Vec<String>>,
}

impl FilterableTable {
    fn write(&self, out: &mut String) -> Result<()> {
        writeln!(out, "<section>")?;
        writeln!(out, "<h2>{}</h2>", escape_html(self.title))?;
        writeln!(
            out,
            "<div class=\"download-controls\"><button class=\"download-btn\" data-download-table=\"{id}\" data-filename=\"{file}\">Download table (TSV)</button><button class=\"download-btn secondary\" data-download-table-pdf=\"{id}\" data-title=\"{title}\">Download table (PDF)</button></div>",
            id = escape_html(self.id),
            file = escape_html(self.download_name),
            title = escape_html(self.title)
        )?;
        writeln!(
            out,
            "<table class=\"table\" data-filterable=\"true\" id=\"{}\">",
            escape_html(self.id)
        )?;
        writeln!(out, "<thead>")?;
        out.push_str("<tr>");
        for (label, _) in &self.columns {
            write!(out, "<th>{}</th>", escape_html(label))?;
        }
        writeln!(out, "</tr>")?;
        out.push_str("<tr class=\"filters\">");
        for (idx, (_, kind)) in self.columns.iter().enumerate() {
            let placeholder = match kind {
                ColumnKind::Number => "min value",
                ColumnKind::Text => "text",
            };
            write!(
                out,
                "<th><input data-col=\"{}\" data-type=\"{}\" type=\"{}\" placeholder=\"{}\"/></th>",
                idx,
                kind.as_str(),
                kind.as_str(),
                placeholder
            )?;
        }
        writeln!(out, "</tr>")?;
        writeln!(out, "</thead>")?;
        writeln!(out, "<tbody>")?;
        for row in &self.rows {
            out.push_str("<tr>");
            for cell in row {
                write!(out, "<td>{}</td>", escape_html(cell))?;
            }
            writeln!(out, "</tr>")?;
        }
        writeln!(out, "</tbody></table>")?;
        writeln!(out, "</section>")?;
        Ok(())
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReportData<'a> {
    hist_min_length: usize,
    histogram_samples: Vec<&'a str>,
    histogram_data: BTreeMap<&'a str, HistogramSeries>,
    combined_histogram_data: &'a HistogramSeries,
}

impl<'a> ReportData<'a> {
    fn from_model(model: &'a ReportModel) -> Self {
        let floor = model.config.hist_min_length;
        Self {
            hist_min_length: floor,
            histogram_samples: model.samples.iter().map(|s| s.sample.as_str()).collect(),
            histogram_data: model
                .samples
                .iter()
                .map(|s| (s.sample.as_str(), s.histogram.series(floor)))
                .collect(),
            combined_histogram_data: &model.combined,
        }
    }
}

pub fn summary_table(model: &ReportModel) -> FilterableTable {
    let columns = summary_headers()
        .into_iter()
        .enumerate()
        .map(|(i, label)| {
            let kind = if i == 0 {
                ColumnKind::Text
            } else {
                ColumnKind::Number
            };
            (label, kind)
        })
        .collect();
    FilterableTable {
        id: "polyat-summary-table",
        title: "PolyA/T Summary",
        download_name: "polyA_counts_table.tsv",
        columns,
        rows: model.samples.iter().map(|s| s.summary_cells()).collect(),
    }
}

pub fn position_table(model: &ReportModel) -> FilterableTable {
    let columns = POSITION_HEADERS
        .iter()
        .enumerate()
        .map(|(i, label)| {
            let kind = if i == 0 {
                ColumnKind::Text
            } else {
                ColumnKind::Number
            };
            (label.to_string(), kind)
        })
        .collect();
    let rows = model
        .samples
        .iter()
        .map(|s| {
            let mut row = vec![s.sample.clone()];
            row.extend(s.offset_summary().cells());
            row
        })
        .collect();
    FilterableTable {
        id: "polyat-position-table",
        title: "PolyA/T Position Offsets",
        download_name: "polyA_offsets_table.tsv",
        columns,
        rows,
    }
}

pub fn render(model: &ReportModel) -> Result<String> {
    let mut html = String::with_capacity(64 * 1024);
    let floor = model.config.hist_min_length;

    writeln!(html, "<!DOCTYPE html>")?;
    writeln!(html, "<html lang=\"en\">")?;
    writeln!(html, "<head>")?;
    writeln!(html, "<meta charset=\"utf-8\"/>")?;
    writeln!(
        html,
        "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\"/>"
    )?;
    writeln!(html, "<title>kira-polyat report</title>")?;
    write_style(&mut html)?;
    writeln!(html, "</head>")?;
    writeln!(html, "<body>")?;

    writeln!(html, "<h1>PolyA/T Report</h1>")?;
    writeln!(
        html,
        "<div class=\"meta\">Samples: <b>{}</b><br/>Reads: {}<br/>Histogram floor: {} nt</div>",
        model.samples.len(),
        fmt_int(model.total_reads()),
        floor
    )?;

    summary_table(model).write(&mut html)?;

    writeln!(html, "<section id=\"histogram-section\">")?;
    writeln!(html, "<h2>PolyA/T Histogram (&gt;={} nt)</h2>", floor)?;
    writeln!(html, "<label for=\"histogram-sample\">Sample</label>")?;
    writeln!(html, "<select id=\"histogram-sample\"></select>")?;
    canvas_controls(
        &mut html,
        "download-sample-histogram",
        "Download histogram",
    )?;
    writeln!(
        html,
        "<canvas id=\"histogram-canvas\" width=\"{}\" height=\"{}\"></canvas>",
        CANVAS_WIDTH, CANVAS_HEIGHT
    )?;
    writeln!(
        html,
        "<div id=\"histogram-tooltip\" class=\"hist-tooltip\"></div>"
    )?;
    writeln!(html, "</section>")?;

    writeln!(html, "<section id=\"histogram-section-all\">")?;
    writeln!(html, "<h2>Combined PolyA/T Histogram</h2>")?;
    canvas_controls(
        &mut html,
        "download-combined-histogram",
        "Download combined histogram",
    )?;
    writeln!(
        html,
        "<canvas id=\"histogram-canvas-all\" width=\"{}\" height=\"{}\"></canvas>",
        CANVAS_WIDTH, CANVAS_HEIGHT
    )?;
    writeln!(html, "</section>")?;

    position_table(model).write(&mut html)?;

    let data = serde_json::to_string(&ReportData::from_model(model))
        .context("failed to serialize report data")?;
    writeln!(html, "<script>")?;
    writeln!(html, "const REPORT_DATA = {};", escape_script(&data))?;
    writeln!(html, "const JPEG_QUALITY = {};", JPEG_QUALITY)?;
    html.push_str(&pdf::js_encoder());
    html.push_str(REPORT_JS);
    writeln!(html, "</script>")?;
    writeln!(html, "</body></html>")?;
    Ok(html)
}

pub fn write(path: &Path, model: &ReportModel) -> Result<()> {
    let html = render(model)?;
    let mut w = BufWriter::new(
        File::create(path).with_context(|| format!("create {} failed", path.display()))?,
    );
    w.write_all(html.as_bytes())?;
    w.flush()?;
    Ok(())
}

fn write_style(html: &mut String) -> Result<()> {
    writeln!(html, "<style>")?;
    writeln!(
        html,
        "body{{font-family:Arial,Helvetica,sans-serif;margin:20px;color:#222;background:#fefefe;}}"
    )?;
    writeln!(html, "h1{{margin:0 0 8px 0;font-size:24px;}}")?;
    writeln!(html, "h2{{margin:24px 0 8px 0;font-size:20px;}}")?;
    writeln!(
        html,
        ".meta{{color:#555;font-size:13px;margin-bottom:16px;}}"
    )?;
    writeln!(html, "section{{margin-bottom:30px;}}")?;
    writeln!(
        html,
        "#histogram-section label{{display:block;margin-bottom:6px;font-weight:bold;}}"
    )?;
    writeln!(
        html,
        "#histogram-section select{{padding:6px 10px;margin-bottom:12px;}}"
    )?;
    writeln!(
        html,
        "canvas{{width:100%;max-width:{}px;height:auto;border:1px solid #ddd;background:#fff;}}",
        CANVAS_WIDTH
    )?;
    writeln!(
        html,
        ".hist-tooltip{{position:absolute;padding:6px 10px;background:rgba(0,0,0,0.75);color:#fff;border-radius:4px;font-size:12px;pointer-events:none;transform:translate(-50%,-120%);white-space:nowrap;display:none;z-index:10;}}"
    )?;
    writeln!(
        html,
        ".download-controls{{display:flex;gap:8px;flex-wrap:wrap;margin:8px 0;}}"
    )?;
    writeln!(
        html,
        ".download-btn{{padding:6px 12px;border:1px solid #4a90e2;background:#4a90e2;color:#fff;border-radius:4px;cursor:pointer;font-size:0.9rem;}}"
    )?;
    writeln!(
        html,
        ".download-btn.secondary{{border-color:#555;background:#555;}}"
    )?;
    writeln!(html, ".download-btn:hover{{opacity:0.9;}}")?;
    writeln!(
        html,
        ".table{{border-collapse:collapse;width:100%;font-size:13px;}}"
    )?;
    writeln!(
        html,
        ".table th,.table td{{border:1px solid #ccc;padding:8px;text-align:center;}}"
    )?;
    writeln!(html, ".table th{{background-color:#f4f4f4;}}")?;
    writeln!(html, ".filters th{{background-color:#fafafa;}}")?;
    writeln!(
        html,
        ".filters input{{width:100%;box-sizing:border-box;padding:4px;}}"
    )?;
    writeln!(html, ".table tbody tr:nth-child(even){{background:#fafafa;}}")?;
    writeln!(html, "</style>")?;
    Ok(())
}

fn canvas_controls(html: &mut String, id: &str, label: &str) -> Result<()> {
    writeln!(
        html,
        "<div class=\"download-controls\"><button id=\"{id}\" class=\"download-btn\">{label} (PNG)</button><button id=\"{id}-pdf\" class=\"download-btn secondary\">{label} (PDF)</button></div>",
        id = id,
        label = label
    )?;
    Ok(())
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            c => out.push(c),
        }
    }
    out
}

/// `<` only occurs inside JSON strings, where `\u003c` decodes back to it.
fn escape_script(json: &str) -> String {
    json.replace('<', "\\u003c")
}

fn fmt_int(v: u64) -> String {
    let s = v.to_string();
    let mut out = String::with_capacity(s.len() + s.len() / 3);
    let len = s.len();
    for (i, ch) in s.chars().enumerate() {
        if i != 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
