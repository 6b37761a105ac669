//! The single page served at `/`.
//!
//! Tab 1 submits to `POST /api/entries`; tab 2 reloads the listing from
//! `GET /api/entries/table` whenever the search box changes or the tab opens.

pub const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>PhonoFix</title>
<style>
  :root { color-scheme: light; }
  body { font-family: ui-monospace, monospace; background: #fff; color: #111; max-width: 56rem; margin: 0 auto; padding: 0 1rem; }
  h2 { text-align: center; margin-top: 2em; }
  .tabs { display: flex; gap: .25rem; border-bottom: 1px solid #ccc; }
  .tabs button { border: 1px solid #ccc; border-bottom: none; background: #f4f4f4; padding: .5rem 1rem; border-radius: 6px 6px 0 0; cursor: pointer; }
  .tabs button.active { background: #fff; font-weight: bold; }
  .panel { display: none; padding: 1rem 0; }
  .panel.active { display: block; }
  label { display: block; margin-top: .75rem; font-size: .85rem; }
  input { width: 100%; box-sizing: border-box; padding: .5rem; border: 1px solid #ccc; border-radius: 6px; }
  #insert { margin-top: 1rem; padding: .5rem 1rem; border-radius: 6px; border: 1px solid #111; background: #111; color: #fff; cursor: pointer; }
  #insert:disabled { opacity: .4; cursor: not-allowed; }
  #status { margin-top: 1rem; min-height: 1.5rem; }
  table.entries { border-collapse: collapse; width: 100%; margin-top: 1rem; }
  table.entries th, table.entries td { border: 1px solid #ddd; padding: .35rem .5rem; text-align: left; }
</style>
</head>
<body>
<h2>PhonoFix</h2>
<div class="tabs">
  <button data-tab="add" class="active">Text (add | edit)</button>
  <button data-tab="list">Text List</button>
</div>

<section id="add" class="panel active">
  <label for="text">Text</label>
  <input id="text" placeholder="ใส่อินพุต">
  <label for="phoneme">Phoneme</label>
  <input id="phoneme" placeholder="ใส่|อิน|พุด">
  <button id="insert" disabled>Insert Data</button>
  <div id="status"></div>
</section>

<section id="list" class="panel">
  <label for="search">Search</label>
  <input id="search" placeholder="Enter search query">
  <div id="listing"></div>
</section>

<script>
const $ = (id) => document.getElementById(id);

function checkInputs() {
  $("insert").disabled = !($("text").value.trim() && $("phoneme").value.trim());
}

function errorSpan(message) {
  const span = document.createElement("span");
  span.style.color = "red";
  span.textContent = message;
  return span.outerHTML;
}

async function insertData() {
  try {
    const res = await fetch("/api/entries", {
      method: "POST",
      headers: { "content-type": "application/json" },
      body: JSON.stringify({ text: $("text").value, phoneme: $("phoneme").value }),
    });
    const raw = await res.text();
    let body;
    try {
      body = JSON.parse(raw);
    } catch {
      // axum extractor rejections are plain text
      $("status").innerHTML = errorSpan(`Error adding data: ${raw || res.statusText}`);
      return;
    }
    $("status").innerHTML = body.html ?? errorSpan(body.error);
  } catch (err) {
    $("status").innerHTML = errorSpan(`Error adding data: ${err}`);
  }
}

// Only the latest search may paint the listing.
let listingSeq = 0;

async function refreshListing() {
  const seq = ++listingSeq;
  const q = encodeURIComponent($("search").value);
  try {
    const res = await fetch(`/api/entries/table?q=${q}`);
    const html = await res.text();
    if (seq === listingSeq) $("listing").innerHTML = html;
  } catch (err) {
    if (seq === listingSeq) $("listing").innerHTML = errorSpan(`Error fetching data: ${err}`);
  }
}

document.querySelectorAll(".tabs button").forEach((tab) => {
  tab.addEventListener("click", () => {
    document.querySelectorAll(".tabs button, .panel").forEach((el) => el.classList.remove("active"));
    tab.classList.add("active");
    $(tab.dataset.tab).classList.add("active");
    if (tab.dataset.tab === "list") refreshListing();
  });
});

$("text").addEventListener("input", checkInputs);
$("phoneme").addEventListener("input", checkInputs);
$("insert").addEventListener("click", insertData);
$("search").addEventListener("input", refreshListing);
</script>
</body>
</html>
"##;
