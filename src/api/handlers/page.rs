use axum::response::Html;

use crate::utils::validation::ALLOWED_EXTENSIONS;

/// The whole UI: one page that posts the dropped file to `/convert` and
/// renders the returned payload into the Preview / Size Comparison tabs.
pub async fn index() -> Html<String> {
    let accept = ALLOWED_EXTENSIONS
        .iter()
        .map(|ext| format!(".{}", ext))
        .collect::<Vec<_>>()
        .join(",");

    Html(PAGE.replace("{{ACCEPT}}", &accept))
}

const PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>📄 Universal File-to-Text Converter</title>
<style>
  body { font-family: system-ui, sans-serif; max-width: 720px; margin: 2rem auto; padding: 0 1rem; color: #222; }
  h1 { font-size: 1.6rem; }
  #dropzone { border: 2px dashed #bbb; border-radius: 8px; padding: 2.5rem 1rem; text-align: center; color: #666; cursor: pointer; }
  #dropzone.dragover { border-color: #4a90d9; background: #f0f7ff; }
  #status { margin: 1rem 0; }
  .tabs { display: flex; gap: 0.5rem; margin-top: 1.5rem; border-bottom: 1px solid #ddd; }
  .tabs button { border: none; background: none; padding: 0.5rem 1rem; cursor: pointer; font-size: 1rem; }
  .tabs button.active { border-bottom: 2px solid #4a90d9; font-weight: 600; }
  .tab-panel { display: none; padding: 1rem 0; }
  .tab-panel.visible { display: block; }
  pre { background: #f6f6f6; padding: 1rem; border-radius: 6px; white-space: pre-wrap; word-break: break-word; max-height: 24rem; overflow-y: auto; }
  table { border-collapse: collapse; width: 100%; }
  th, td { border: 1px solid #ddd; padding: 0.5rem 0.75rem; text-align: left; }
  .success { color: #1a7f37; }
  .error { color: #b42318; }
  #download { display: inline-block; margin-top: 0.75rem; }
  #result { display: none; }
</style>
</head>
<body>
<h1>📄 Universal File-to-Text Converter</h1>
<p>Drag &amp; drop your file below. It will be converted into plain text with Markdown formatting.</p>

<div id="dropzone">Drop a document here, or click to choose a file</div>
<input type="file" id="file-input" accept="{{ACCEPT}}" hidden>
<div id="status"></div>

<div id="result">
  <div class="tabs">
    <button id="tab-preview" class="active">🔍 Preview</button>
    <button id="tab-sizes">📊 File Size Comparison</button>
  </div>
  <div id="panel-preview" class="tab-panel visible">
    <h3>Preview (first 1000 characters):</h3>
    <pre id="preview"></pre>
    <a id="download">📥 Download Converted File</a>
  </div>
  <div id="panel-sizes" class="tab-panel">
    <h3>File Size Comparison</h3>
    <table>
      <thead><tr><th></th><th>Size (MB)</th></tr></thead>
      <tbody id="size-rows"></tbody>
    </table>
    <p id="reduction" class="success"></p>
  </div>
</div>

<script>
const dropzone = document.getElementById('dropzone');
const input = document.getElementById('file-input');
const status = document.getElementById('status');

dropzone.addEventListener('click', () => input.click());
dropzone.addEventListener('dragover', (e) => { e.preventDefault(); dropzone.classList.add('dragover'); });
dropzone.addEventListener('dragleave', () => dropzone.classList.remove('dragover'));
dropzone.addEventListener('drop', (e) => {
  e.preventDefault();
  dropzone.classList.remove('dragover');
  if (e.dataTransfer.files.length > 0) upload(e.dataTransfer.files[0]);
});
input.addEventListener('change', () => { if (input.files.length > 0) upload(input.files[0]); });

function switchTab(name) {
  for (const tab of ['preview', 'sizes']) {
    document.getElementById('tab-' + tab).classList.toggle('active', tab === name);
    document.getElementById('panel-' + tab).classList.toggle('visible', tab === name);
  }
}
document.getElementById('tab-preview').addEventListener('click', () => switchTab('preview'));
document.getElementById('tab-sizes').addEventListener('click', () => switchTab('sizes'));

async function upload(file) {
  status.textContent = 'Converting ' + file.name + '…';
  status.className = '';
  document.getElementById('result').style.display = 'none';

  const form = new FormData();
  form.append('file', file);

  let response;
  try {
    response = await fetch('/convert', { method: 'POST', body: form });
  } catch (err) {
    status.textContent = 'Upload failed: ' + err;
    status.className = 'error';
    return;
  }

  if (!response.ok) {
    const body = await response.json().catch(() => ({}));
    status.textContent = body.error || ('Conversion failed (HTTP ' + response.status + ')');
    status.className = 'error';
    return;
  }

  const payload = await response.json();
  status.textContent = 'Uploaded: ' + payload.filename;
  status.className = 'success';

  document.getElementById('preview').textContent = payload.preview;
  const link = document.getElementById('download');
  link.href = payload.download_data_uri;
  link.download = payload.download_filename;

  const rows = document.getElementById('size-rows');
  rows.innerHTML = '';
  for (const row of payload.size_table) {
    const tr = document.createElement('tr');
    const label = document.createElement('td');
    label.textContent = row.label;
    const size = document.createElement('td');
    size.textContent = row.size_mb;
    tr.append(label, size);
    rows.append(tr);
  }
  document.getElementById('reduction').textContent = payload.status;

  document.getElementById('result').style.display = 'block';
  switchTab('preview');
}
</script>
</body>
</html>
"#;
