//! Schema diagnostic overlay for the browser.
//!
//! When a schema edit fails to compile, the previously generated module
//! keeps being served; this page is what the developer sees on the server
//! root until the schema is fixed.

use crate::dev::SchemaDiagnostic;

/// Render the diagnostic overlay page.
///
/// The embedded script listens to the SSE stream and reloads as soon as a
/// successful regeneration invalidates modules again.
pub fn render(diagnostic: &SchemaDiagnostic) -> String {
    let path = html_escape(&diagnostic.path.display().to_string());
    let message = html_escape(&diagnostic.message);

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Schema Error</title>
<style>
  body {{ background: #1b1b1f; color: #e4e4e7; font-family: ui-monospace, monospace; padding: 2rem; }}
  h1 {{ color: #f87171; font-size: 1.2rem; }}
  .path {{ color: #fbbf24; }}
  pre {{ background: #27272a; padding: 1rem; border-radius: 6px; white-space: pre-wrap; }}
  p.hint {{ color: #a1a1aa; }}
</style>
</head>
<body>
<h1>Schema Error</h1>
<p class="path">{path}</p>
<pre>{message}</pre>
<p class="hint">The previously generated types are still being served. Fix the schema and save to recover.</p>
<script>
  var source = new EventSource("/__tyg_sse__");
  source.onmessage = function (event) {{
    try {{
      if (JSON.parse(event.data).type === "ModulesInvalidated") {{
        window.location.reload();
      }}
    }} catch (_err) {{}}
  }};
</script>
</body>
</html>
"#
    )
}

/// Escape HTML special characters so compiler output cannot inject markup.
fn html_escape(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '&' => "&amp;".to_string(),
            '<' => "&lt;".to_string(),
            '>' => "&gt;".to_string(),
            '"' => "&quot;".to_string(),
            '\'' => "&#x27;".to_string(),
            _ => c.to_string(),
        })
        .collect()
}
