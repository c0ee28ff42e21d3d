//! Asset pipeline for CSS and JavaScript processing.

/// Asset pipeline utilities.
pub struct AssetPipeline;

impl AssetPipeline {
    /// Generate the main CSS file.
    pub fn generate_css() -> String {
        DEFAULT_CSS.to_string()
    }

    /// Generate the main JavaScript file.
    pub fn generate_js() -> String {
        DEFAULT_JS.to_string()
    }

    /// Minify CSS using lightningcss.
    pub fn minify_css(css: &str) -> Result<String, String> {
        use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};

        let stylesheet = StyleSheet::parse(css, ParserOptions::default())
            .map_err(|e| format!("CSS parse error: {}", e))?;

        let minified = stylesheet
            .to_css(PrinterOptions {
                minify: true,
                ..Default::default()
            })
            .map_err(|e| format!("CSS minify error: {}", e))?;

        Ok(minified.code)
    }
}

const DEFAULT_CSS: &str = r#"/* refbook reference theme */

:root {
  --sidebar-width: 260px;
  --content-max-width: 960px;
  --background: #ffffff;
  --foreground: #1c1c1c;
  --muted: #f4f4f4;
  --muted-foreground: #666666;
  --border: #dddddd;
  --primary: #0564ff;
  --code-background: #f7f7f7;
  --radius: 0.25rem;
}

* {
  box-sizing: border-box;
  margin: 0;
  padding: 0;
}

body {
  font-family: system-ui, -apple-system, sans-serif;
  background: var(--background);
  color: var(--foreground);
  line-height: 1.6;
}

a {
  color: var(--primary);
}

.header {
  display: flex;
  gap: 1.5rem;
  align-items: center;
  padding: 1rem 2rem;
  border-bottom: 1px solid var(--border);
}

.logo {
  font-weight: 700;
  color: var(--foreground);
  text-decoration: none;
}

.layout {
  display: grid;
  grid-template-columns: 1fr;
  min-height: 100vh;
}

.layout.with-sidebar {
  grid-template-columns: var(--sidebar-width) 1fr;
}

/* Sidebar */
.sidebar {
  background: var(--muted);
  border-right: 1px solid var(--border);
  padding: 1.5rem;
  position: sticky;
  top: 0;
  height: 100vh;
  overflow-y: auto;
}

.sidebar.collapsed .sidebar-list {
  display: none;
}

.sidebar-list,
.sidebar-list ul {
  list-style: none;
}

.sidebar-category h3 {
  font-size: 0.875rem;
  text-transform: uppercase;
  margin-top: 1rem;
}

.sidebar-category h4 {
  font-size: 0.8rem;
  color: var(--muted-foreground);
  margin-top: 0.5rem;
}

.sidebar-list a {
  font-size: 0.875rem;
  text-decoration: none;
}

.sidebar-toggle {
  background: none;
  border: 1px solid var(--border);
  border-radius: var(--radius);
  padding: 0.25rem 0.5rem;
  cursor: pointer;
}

/* Main content */
.main {
  padding: 2rem;
  max-width: var(--content-max-width);
}

.section {
  display: grid;
  grid-template-columns: 10rem 1fr;
  gap: 1rem;
  padding: 1.5rem 0;
  border-bottom: 1px solid var(--border);
}

.section h4 {
  font-size: 0.875rem;
  color: var(--muted-foreground);
}

.section ul {
  list-style: none;
}

.description p {
  margin-bottom: 0.75rem;
}

/* Examples */
.example {
  display: grid;
  grid-template-columns: 2fr 1fr;
  gap: 1rem;
  margin-bottom: 1.5rem;
}

.code-block {
  background: var(--code-background);
  border-radius: var(--radius);
  padding: 1rem;
  overflow-x: auto;
  font-family: ui-monospace, monospace;
  font-size: 0.875rem;
  position: relative;
}

.code-block code {
  display: block;
  white-space: pre;
}

.copy-btn {
  position: absolute;
  top: 0.5rem;
  right: 0.5rem;
  padding: 0.25rem 0.75rem;
  font-size: 0.75rem;
  border: none;
  border-radius: var(--radius);
  cursor: pointer;
}

.param {
  display: grid;
  grid-template-columns: 8rem 1fr;
}

.param-name {
  font-family: ui-monospace, monospace;
}

.license {
  font-size: 0.75rem;
  color: var(--muted-foreground);
}

/* Listings */
.category h2,
.ex-category h2 {
  margin-top: 2rem;
  text-transform: capitalize;
}

.ex-categories,
.ex-subcategory ul {
  list-style: none;
}

@media (max-width: 1024px) {
  .layout.with-sidebar {
    grid-template-columns: 1fr;
  }

  .sidebar {
    position: static;
    height: auto;
  }

  .example {
    grid-template-columns: 1fr;
  }
}
"#;

const DEFAULT_JS: &str = r#"// refbook runtime
(function() {
  'use strict';

  // Sidebar show/hide
  const sidebar = document.querySelector('.sidebar');
  const toggle = document.querySelector('.sidebar-toggle');

  if (sidebar && toggle) {
    toggle.addEventListener('click', () => {
      const collapsed = sidebar.classList.toggle('collapsed');
      toggle.textContent = collapsed ? 'Show' : 'Hide';
    });
  }

  // Copy button for example code
  document.querySelectorAll('.code-block').forEach(pre => {
    if (pre.querySelector('.copy-btn')) return;

    const btn = document.createElement('button');
    btn.className = 'copy-btn';
    btn.textContent = 'Copy';
    btn.setAttribute('type', 'button');

    btn.addEventListener('click', async () => {
      const lines = Array.from(pre.querySelectorAll('code')).map(c => c.textContent);

      try {
        await navigator.clipboard.writeText(lines.join('\n'));
        btn.textContent = 'Copied!';
      } catch (err) {
        btn.textContent = 'Error';
      }
      setTimeout(() => { btn.textContent = 'Copy'; }, 2000);
    });

    pre.appendChild(btn);
  });
})();
"#;
