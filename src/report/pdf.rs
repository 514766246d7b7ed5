//! Minimal single-page PDF holding one JPEG image.
//!
//! Objects: 1 catalog, 2 page tree, 3 page sized to the image in pixels,
//! 4 image XObject (`/DCTDecode`), 5 content stream drawing the image over
//! the whole page. The same object templates feed the native encoder and
//! the JavaScript encoder embedded in the HTML report.

use std::fmt::{Display, Write as FmtWrite};

const HEADER: &str = "%PDF-1.4\n";
const OBJECTS: usize = 5;
const IMAGE_NAME: &str = "Im0";
const STREAM_TAIL: &str = "\nendstream\nendobj\n";

fn catalog() -> String {
    "1 0 obj << /Type /Catalog /Pages 2 0 R >> endobj\n".to_string()
}

fn pages() -> String {
    "2 0 obj << /Type /Pages /Kids [3 0 R] /Count 1 >> endobj\n".to_string()
}

fn page(width: impl Display, height: impl Display) -> String {
    format!(
        "3 0 obj << /Type /Page /Parent 2 0 R /MediaBox [0 0 {w} {h}] /Resources << /ProcSet [/PDF /ImageC] /XObject << /{img} 4 0 R >> >> /Contents 5 0 R >> endobj\n",
        w = width,
        h = height,
        img = IMAGE_NAME
    )
}

fn image_head(width: impl Display, height: impl Display, len: impl Display) -> String {
    format!(
        "4 0 obj << /Type /XObject /Subtype /Image /Width {} /Height {} /ColorSpace /DeviceRGB /BitsPerComponent 8 /Filter /DCTDecode /Length {} >> stream\n",
        width, height, len
    )
}

fn content(width: impl Display, height: impl Display) -> String {
    format!("q\n{} 0 0 {} 0 0 cm\n/{} Do\nQ\n", width, height, IMAGE_NAME)
}

fn content_object(len: impl Display, body: impl Display) -> String {
    format!("5 0 obj << /Length {} >> stream\n{}endstream\nendobj\n", len, body)
}

fn xref_head() -> String {
    format!("xref\n0 {}\n0000000000 65535 f \n", OBJECTS + 1)
}

/// `padded` must already be the 10-digit byte offset.
fn xref_entry(padded: impl Display) -> String {
    format!("{} 00000 n \n", padded)
}

fn trailer(xref_start: impl Display) -> String {
    format!(
        "trailer << /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF",
        OBJECTS + 1,
        xref_start
    )
}

/// Wraps a PDF page around `jpeg`, a baseline JPEG of `width` x `height` pixels.
pub fn encode_image_page(width: u32, height: u32, jpeg: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(jpeg.len() + 1024);
    let mut offsets = [0usize; OBJECTS];

    out.extend_from_slice(HEADER.as_bytes());
    offsets[0] = out.len();
    out.extend_from_slice(catalog().as_bytes());
    offsets[1] = out.len();
    out.extend_from_slice(pages().as_bytes());
    offsets[2] = out.len();
    out.extend_from_slice(page(width, height).as_bytes());
    offsets[3] = out.len();
    out.extend_from_slice(image_head(width, height, jpeg.len()).as_bytes());
    out.extend_from_slice(jpeg);
    out.extend_from_slice(STREAM_TAIL.as_bytes());
    let body = content(width, height);
    offsets[4] = out.len();
    out.extend_from_slice(content_object(body.len(), &body).as_bytes());

    let xref_start = out.len();
    out.extend_from_slice(xref_head().as_bytes());
    for off in offsets {
        out.extend_from_slice(xref_entry(format!("{:010}", off)).as_bytes());
    }
    out.extend_from_slice(trailer(xref_start).as_bytes());
    out
}

/// JavaScript `imageToPdfBytes(imageBytes, width, height)` producing the
/// same layout as [`encode_image_page`].
pub fn js_encoder() -> String {
    let mut js = String::with_capacity(4096);
    let _ = write_js_encoder(&mut js);
    js
}

fn write_js_encoder(js: &mut String) -> std::fmt::Result {
    writeln!(js, "function imageToPdfBytes(imageBytes, width, height) {{")?;
    writeln!(js, "  const encoder = new TextEncoder();")?;
    writeln!(js, "  const chunks = [];")?;
    writeln!(js, "  const offsets = [];")?;
    writeln!(js, "  let position = 0;")?;
    writeln!(js, "  function append(data) {{")?;
    writeln!(
        js,
        "    const bytes = typeof data === 'string' ? encoder.encode(data) : data;"
    )?;
    writeln!(js, "    chunks.push(bytes);")?;
    writeln!(js, "    position += bytes.length;")?;
    writeln!(js, "  }}")?;
    writeln!(js, "  append({});", js_literal(HEADER))?;
    for object in [
        catalog(),
        pages(),
        page("${width}", "${height}"),
        image_head("${width}", "${height}", "${imageBytes.length}"),
    ] {
        writeln!(js, "  offsets.push(position); append({});", js_literal(&object))?;
    }
    writeln!(js, "  append(imageBytes);")?;
    writeln!(js, "  append({});", js_literal(STREAM_TAIL))?;
    writeln!(
        js,
        "  const content = {};",
        js_literal(&content("${width}", "${height}"))
    )?;
    writeln!(
        js,
        "  offsets.push(position); append({});",
        js_literal(&content_object("${encoder.encode(content).length}", "${content}"))
    )?;
    writeln!(js, "  const xrefStart = position;")?;
    writeln!(js, "  append({});", js_literal(&xref_head()))?;
    writeln!(
        js,
        "  offsets.forEach(offset => append({}));",
        js_literal(&xref_entry("${String(offset).padStart(10, '0')}"))
    )?;
    writeln!(js, "  append({});", js_literal(&trailer("${xrefStart}")))?;
    writeln!(js, "  const pdf = new Uint8Array(position);")?;
    writeln!(js, "  let at = 0;")?;
    writeln!(js, "  chunks.forEach(chunk => {{ pdf.set(chunk, at); at += chunk.length; }});")?;
    writeln!(js, "  return pdf;")?;
    writeln!(js, "}}")?;
    Ok(())
}

/// Template literal with newlines, backslashes and backticks escaped.
fn js_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 8);
    out.push('`');
    for ch in s.chars() {
        match ch {
            '\n' => out.push_str("\\n"),
            '\\' => out.push_str("\\\\"),
            '`' => out.push_str("\\`"),
            c => out.push(c),
        }
    }
    out.push('`');
    out
}
