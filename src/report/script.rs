// Client-side behaviour of the HTML report. Expects `REPORT_DATA` and
// `imageToPdfBytes` (from `report::pdf`) to be defined before it runs.

pub(crate) const JPEG_QUALITY: &str = "0.95";

pub(crate) const REPORT_JS: &str = r#"
function initTableFilters(table) {
  const inputs = table.querySelectorAll('thead input[data-col]');
  const rows = table.querySelectorAll('tbody tr');
  function apply() {
    rows.forEach(row => {
      let visible = true;
      inputs.forEach(input => {
        if (!visible) return;
        const value = input.value.trim();
        if (!value) return;
        const cell = row.children[parseInt(input.dataset.col, 10)];
        if (!cell) return;
        const text = cell.innerText.trim();
        if (input.dataset.type === 'number') {
          const min = parseFloat(value);
          const cellValue = parseFloat(text);
          if (isNaN(min) || isNaN(cellValue)) return;
          if (cellValue < min) visible = false;
        } else if (!text.toLowerCase().includes(value.toLowerCase())) {
          visible = false;
        }
      });
      row.style.display = visible ? '' : 'none';
    });
  }
  inputs.forEach(input => input.addEventListener('input', apply));
  apply();
}

function exportRows(table) {
  const head = table.tHead ? Array.from(table.tHead.rows).filter(r => !r.classList.contains('filters')) : [];
  const body = table.tBodies.length ? Array.from(table.tBodies[0].rows).filter(r => r.style.display !== 'none') : [];
  return head.concat(body);
}

function tableToTSV(table) {
  return exportRows(table)
    .map(row => Array.from(row.cells).map(cell => cell.innerText.replace(/\s+/g, ' ').trim()).join('\t'))
    .join('\n') + '\n';
}

function downloadBlob(content, filename, mime) {
  const blob = content instanceof Blob ? content : new Blob([content], { type: mime });
  const link = document.createElement('a');
  link.href = URL.createObjectURL(blob);
  link.download = filename;
  document.body.appendChild(link);
  link.click();
  setTimeout(() => { URL.revokeObjectURL(link.href); link.remove(); }, 0);
}

function slugify(text) {
  return (text || 'polyat').toLowerCase().replace(/[^a-z0-9]+/g, '_').replace(/^_|_$/g, '') || 'polyat';
}

function withWhiteBackground(canvas) {
  const out = document.createElement('canvas');
  out.width = canvas.width;
  out.height = canvas.height;
  const ctx = out.getContext('2d');
  ctx.fillStyle = '#fff';
  ctx.fillRect(0, 0, out.width, out.height);
  ctx.drawImage(canvas, 0, 0);
  return out;
}

function renderTableCanvas(table) {
  const rows = exportRows(table);
  const scale = window.devicePixelRatio || 1;
  const width = Math.max(1, Math.round(table.getBoundingClientRect().width));
  const height = Math.max(1, Math.round(rows.reduce((h, r) => h + (r.getBoundingClientRect().height || 0), 0)));
  const canvas = document.createElement('canvas');
  canvas.width = Math.round(width * scale);
  canvas.height = Math.round(height * scale);
  const ctx = canvas.getContext('2d');
  ctx.scale(scale, scale);
  ctx.fillStyle = '#fff';
  ctx.fillRect(0, 0, width, height);
  const padding = 6;
  let y = 0;
  rows.forEach(row => {
    const rowHeight = row.getBoundingClientRect().height || 0;
    let x = 0;
    Array.from(row.cells).forEach(cell => {
      const cellWidth = cell.getBoundingClientRect().width || 0;
      const styles = window.getComputedStyle(cell);
      const bg = styles.backgroundColor && styles.backgroundColor !== 'rgba(0, 0, 0, 0)' ? styles.backgroundColor : '#fff';
      ctx.fillStyle = bg;
      ctx.fillRect(x, y, cellWidth, rowHeight);
      ctx.strokeStyle = '#ccc';
      ctx.lineWidth = 1;
      ctx.strokeRect(x + 0.5, y + 0.5, cellWidth, rowHeight);
      const fontSize = parseFloat(styles.fontSize) || 12;
      const fontWeight = styles.fontWeight && styles.fontWeight !== 'normal' ? styles.fontWeight : '400';
      ctx.font = `${fontWeight} ${fontSize}px ${styles.fontFamily || 'Arial'}`;
      ctx.fillStyle = styles.color || '#000';
      ctx.textBaseline = 'middle';
      const text = cell.innerText.trim();
      const maxWidth = Math.max(0, cellWidth - padding * 2);
      const align = styles.textAlign || 'center';
      if (align === 'left' || align === 'start') {
        ctx.textAlign = 'left';
        ctx.fillText(text, x + padding, y + rowHeight / 2, maxWidth);
      } else if (align === 'right' || align === 'end') {
        ctx.textAlign = 'right';
        ctx.fillText(text, x + cellWidth - padding, y + rowHeight / 2, maxWidth);
      } else {
        ctx.textAlign = 'center';
        ctx.fillText(text, x + cellWidth / 2, y + rowHeight / 2, maxWidth);
      }
      x += cellWidth;
    });
    y += rowHeight;
  });
  return canvas;
}

function canvasToPdfBytes(canvas) {
  const flat = withWhiteBackground(canvas);
  const base64 = flat.toDataURL('image/jpeg', JPEG_QUALITY).split(',')[1];
  const binary = atob(base64);
  const jpeg = new Uint8Array(binary.length);
  for (let i = 0; i < binary.length; i++) {
    jpeg[i] = binary.charCodeAt(i);
  }
  return imageToPdfBytes(jpeg, flat.width, flat.height);
}

function downloadCanvasPNG(canvas, filename) {
  if (!canvas) return;
  const link = document.createElement('a');
  link.href = withWhiteBackground(canvas).toDataURL('image/png');
  link.download = filename;
  document.body.appendChild(link);
  link.click();
  link.remove();
}

function downloadCanvasPDF(canvas, filename) {
  if (!canvas) return;
  downloadBlob(canvasToPdfBytes(canvas), filename, 'application/pdf');
}

function drawHistogram(canvas, entries, messages) {
  const bars = [];
  if (!canvas) return bars;
  const ctx = canvas.getContext('2d');
  ctx.clearRect(0, 0, canvas.width, canvas.height);
  ctx.fillStyle = '#fff';
  ctx.fillRect(0, 0, canvas.width, canvas.height);
  const margin = 60;
  const width = canvas.width - margin * 2;
  const height = canvas.height - margin * 2;
  ctx.strokeStyle = '#333';
  ctx.fillStyle = '#333';
  ctx.lineWidth = 1;
  ctx.font = '12px Arial';
  ctx.beginPath();
  ctx.moveTo(margin, margin);
  ctx.lineTo(margin, margin + height);
  ctx.lineTo(margin + width, margin + height);
  ctx.stroke();
  if (!entries || entries.length === 0) {
    ctx.fillText(messages.empty, margin, margin);
    return bars;
  }
  const maxCount = Math.max(...entries.map(e => e[1]));
  if (!isFinite(maxCount) || maxCount <= 0) {
    ctx.fillText(messages.zero, margin, margin);
    return bars;
  }

  const yTicks = 5;
  ctx.fillStyle = '#000';
  ctx.textAlign = 'right';
  ctx.textBaseline = 'middle';
  for (let i = 0; i <= yTicks; i++) {
    const value = Math.round(i * maxCount / yTicks);
    const y = margin + height - (value / maxCount) * height;
    ctx.strokeStyle = '#eee';
    ctx.beginPath();
    ctx.moveTo(margin, y);
    ctx.lineTo(margin + width, y);
    ctx.stroke();
    ctx.strokeStyle = '#333';
    ctx.beginPath();
    ctx.moveTo(margin - 5, y);
    ctx.lineTo(margin, y);
    ctx.stroke();
    ctx.fillText(String(value), margin - 8, y);
  }
  ctx.textAlign = 'center';
  ctx.fillText('Count', margin - 35, margin - 20);
  ctx.fillText('Run length (nt)', margin + width / 2, margin + height + 45);

  const barWidth = width / entries.length;
  const minLength = entries[0][0];
  const span = Math.max(1, entries.length - 1);
  const xStep = Math.max(1, Math.round(span / Math.min(10, span)));
  ctx.textBaseline = 'top';
  for (let i = 0; i < entries.length; i += xStep) {
    const x = margin + i * barWidth + barWidth / 2;
    ctx.beginPath();
    ctx.moveTo(x, margin + height);
    ctx.lineTo(x, margin + height + 5);
    ctx.stroke();
    ctx.fillText(String(minLength + i), x, margin + height + 8);
  }

  ctx.fillStyle = '#4a90e2';
  entries.forEach((entry, index) => {
    const length = entry[0];
    const count = entry[1];
    const barHeight = (count / maxCount) * height;
    const h = barHeight || (count > 0 ? 1 : 0);
    const x = margin + index * barWidth + barWidth * 0.1;
    const y = margin + height - h;
    const w = barWidth * 0.8;
    ctx.fillRect(x, y, w, h);
    bars.push({ x, y, width: w, height: h, length, count });
  });
  return bars;
}

const tooltip = document.getElementById('histogram-tooltip');

function showTooltip(bar, event) {
  if (!tooltip) return;
  tooltip.textContent = `Length: ${bar.length} nt | Reads: ${bar.count}`;
  tooltip.style.display = 'block';
  tooltip.style.left = `${event.pageX}px`;
  tooltip.style.top = `${event.pageY}px`;
}

function hideTooltip() {
  if (tooltip) tooltip.style.display = 'none';
}

function attachHover(canvas, getBars) {
  if (!canvas) return;
  canvas.addEventListener('mousemove', event => {
    const rect = canvas.getBoundingClientRect();
    const sx = canvas.width / (rect.width || canvas.width);
    const sy = canvas.height / (rect.height || canvas.height);
    const x = (event.clientX - rect.left) * sx;
    const y = (event.clientY - rect.top) * sy;
    const bar = getBars().find(b => x >= b.x && x <= b.x + b.width && y >= b.y && y <= b.y + b.height);
    if (bar && bar.count > 0) {
      showTooltip(bar, event);
    } else {
      hideTooltip();
    }
  });
  canvas.addEventListener('mouseleave', hideTooltip);
}

function onClick(id, handler) {
  const el = document.getElementById(id);
  if (el) el.addEventListener('click', handler);
}

document.querySelectorAll('table[data-filterable]').forEach(initTableFilters);

document.querySelectorAll('[data-download-table]').forEach(button => {
  button.addEventListener('click', () => {
    const table = document.getElementById(button.dataset.downloadTable);
    if (!table) return;
    downloadBlob(tableToTSV(table), button.dataset.filename || 'table.tsv', 'text/tab-separated-values');
  });
});

document.querySelectorAll('[data-download-table-pdf]').forEach(button => {
  button.addEventListener('click', () => {
    const table = document.getElementById(button.dataset.downloadTablePdf);
    if (!table) return;
    const pdf = canvasToPdfBytes(renderTableCanvas(table));
    downloadBlob(pdf, `${slugify(button.dataset.title)}.pdf`, 'application/pdf');
  });
});

const sampleSelect = document.getElementById('histogram-sample');
const sampleCanvas = document.getElementById('histogram-canvas');
const combinedCanvas = document.getElementById('histogram-canvas-all');
let sampleBars = [];
let combinedBars = [];

function renderSampleHistogram(sample) {
  sampleBars = drawHistogram(sampleCanvas, REPORT_DATA.histogramData[sample] || [], {
    empty: `No data for selected sample (no runs >=${REPORT_DATA.histMinLength} nt).`,
    zero: 'All counts are zero for this sample.'
  });
}

function renderCombinedHistogram() {
  combinedBars = drawHistogram(combinedCanvas, REPORT_DATA.combinedHistogramData, {
    empty: 'No combined histogram data available.',
    zero: 'All combined counts are zero.'
  });
}

function selectedSample() {
  return sampleSelect && sampleSelect.value ? sampleSelect.value : 'sample';
}

attachHover(sampleCanvas, () => sampleBars);
attachHover(combinedCanvas, () => combinedBars);
onClick('download-sample-histogram', () => downloadCanvasPNG(sampleCanvas, `polyA_histogram_${selectedSample()}.png`));
onClick('download-sample-histogram-pdf', () => downloadCanvasPDF(sampleCanvas, `polyA_histogram_${selectedSample()}.pdf`));
onClick('download-combined-histogram', () => downloadCanvasPNG(combinedCanvas, 'polyA_histogram_combined.png'));
onClick('download-combined-histogram-pdf', () => downloadCanvasPDF(combinedCanvas, 'polyA_histogram_combined.pdf'));

if (sampleSelect) {
  sampleSelect.innerHTML = '';
  REPORT_DATA.histogramSamples.forEach(sample => {
    const option = document.createElement('option');
    option.value = sample;
    option.textContent = sample;
    sampleSelect.appendChild(option);
  });
  if (REPORT_DATA.histogramSamples.length > 0) {
    sampleSelect.value = REPORT_DATA.histogramSamples[0];
  }
  renderSampleHistogram(sampleSelect.value);
  sampleSelect.addEventListener('change', () => {
    hideTooltip();
    renderSampleHistogram(sampleSelect.value);
  });
}
renderCombinedHistogram();
"#;
