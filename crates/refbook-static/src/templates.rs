//! Template engine for rendering reference and example pages.

use minijinja::{context, Environment};
use serde::Serialize;

use refbook_core::{Grouping, MatchedPair};

/// A link in a listing.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct NavLink {
    /// Display title
    pub title: String,
    /// URL path
    pub path: String,
}

/// One subcategory of a category listing.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct SubcategoryGroup {
    /// Subcategory name; `None` for entries directly under the category
    pub name: Option<String>,
    /// Entries of the subcategory
    pub items: Vec<NavLink>,
}

/// One category of a listing with its subcategories.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct CategoryGroup {
    pub name: String,
    pub subcategories: Vec<SubcategoryGroup>,
}

/// Build category listings from a grouping.
///
/// `link` maps a record identifier to its link; records it returns `None`
/// for are left out.
pub fn category_groups<F>(grouping: &Grouping, link: F) -> Vec<CategoryGroup>
where
    F: Fn(&str) -> Option<NavLink>,
{
    grouping
        .categories()
        .iter()
        .map(|category| CategoryGroup {
            name: category.clone(),
            subcategories: grouping
                .subcategories(category)
                .iter()
                .map(|sub| SubcategoryGroup {
                    name: sub.clone(),
                    items: grouping
                        .records_in_subcategory(category, sub.as_deref())
                        .into_iter()
                        .filter_map(|r| link(&r.identifier))
                        .collect(),
                })
                .collect(),
        })
        .collect()
}

/// A code example prepared for rendering.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ExampleView {
    /// Example name
    pub name: String,
    /// Source lines
    pub lines: Vec<String>,
    /// Image URL, if the example has a preview image
    pub image: Option<String>,
}

impl From<&MatchedPair<'_>> for ExampleView {
    fn from(pair: &MatchedPair<'_>) -> Self {
        Self {
            name: pair.example.name.clone(),
            lines: pair.example.lines().into_iter().map(str::to_string).collect(),
            image: pair.image.map(|i| i.asset.clone()),
        }
    }
}

/// Context shared by every page.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Context {
    /// Page title
    pub title: String,
    /// Site title
    pub site_title: String,
    /// Base URL
    pub base_url: String,
    /// Page locale
    pub locale: String,
    /// Reference sidebar, shown on core library pages only
    pub sidebar: Option<Vec<CategoryGroup>>,
}

/// Template engine using minijinja.
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Create a new template engine with the built-in templates.
    pub fn new() -> Self {
        let mut env = Environment::new();

        for (name, source) in TEMPLATES {
            env.add_template_owned(name.to_string(), source.to_string())
                .expect("Failed to add built-in template");
        }

        Self { env }
    }

    /// Render `template` with the shared context and page-specific data.
    pub fn render_page<P: Serialize>(
        &self,
        template: &str,
        context: &Context,
        page: &P,
    ) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template(template)?;

        tmpl.render(context! {
            title => &context.title,
            site_title => &context.site_title,
            base_url => &context.base_url,
            locale => &context.locale,
            sidebar => &context.sidebar,
            page => page,
        })
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

const TEMPLATES: &[(&str, &str)] = &[
    ("base.html", BASE_TEMPLATE),
    ("sidebar.html", SIDEBAR_TEMPLATE),
    ("reference.html", REFERENCE_TEMPLATE),
    ("fallback.html", FALLBACK_TEMPLATE),
    ("reference_index.html", REFERENCE_INDEX_TEMPLATE),
    ("examples_index.html", EXAMPLES_INDEX_TEMPLATE),
    ("example.html", EXAMPLE_TEMPLATE),
];

const BASE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="{{ locale }}">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{{ title }} - {{ site_title }}</title>
  <link rel="stylesheet" href="{{ base_url }}assets/main.css">
</head>
<body>
  <header class="header">
    <a href="{{ base_url }}" class="logo">{{ site_title }}</a>
    <a href="{{ base_url }}reference/">Reference</a>
    <a href="{{ base_url }}examples/">Examples</a>
  </header>
  <div class="layout{% if sidebar %} with-sidebar{% endif %}">
    {% if sidebar %}
    <nav class="sidebar">
      <button type="button" class="sidebar-toggle">Hide</button>
      {% include "sidebar.html" %}
    </nav>
    {% endif %}
    <main class="main">
      {% block content %}{% endblock %}
    </main>
  </div>
  <script src="{{ base_url }}assets/main.js"></script>
</body>
</html>"##;

const SIDEBAR_TEMPLATE: &str = r##"<ul class="sidebar-list">
{% for category in sidebar %}
  <li class="sidebar-category">
    <h3>{{ category.name }}</h3>
    {% for sub in category.subcategories %}
    {% if sub.name %}<h4>{{ sub.name }}</h4>{% endif %}
    <ul>
      {% for item in sub.items %}
      <li><a href="{{ item.path }}">{{ item.title }}</a></li>
      {% endfor %}
    </ul>
    {% endfor %}
  </li>
{% endfor %}
</ul>"##;

const REFERENCE_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block content %}
<article class="reference">
  <section class="section">
    <h4>Name</h4>
    <h3>{{ page.entry.name }}</h3>
  </section>
  <section class="section">
    <h4>Description</h4>
    <div class="description">{{ page.entry.description | safe }}</div>
  </section>
  {% if page.examples %}
  <section class="section">
    <h4>Examples</h4>
    <ul class="examples">
    {% for ex in page.examples %}
      <li class="example">
        <pre class="code-block">{% for line in ex.lines %}<code>{{ line }}</code>
{% endfor %}</pre>
        {% if ex.image %}<img src="{{ ex.image }}" alt="{{ ex.name }}">{% endif %}
      </li>
    {% endfor %}
    </ul>
  </section>
  {% endif %}
  <section class="section">
    <h4>Syntax</h4>
    <ul>
    {% for syn in page.entry.syntax %}
      <li><code>{{ syn }}</code></li>
    {% endfor %}
    </ul>
  </section>
  {% if page.entry.parameters %}
  <section class="section">
    <h4>Parameters</h4>
    <ul class="params">
    {% for param in page.entry.parameters %}
      <li class="param">
        <span class="param-name">{{ param.name }}</span>
        <span>{{ param.type }}: {{ param.description }}</span>
      </li>
    {% endfor %}
    </ul>
  </section>
  {% endif %}
  {% if page.entry.returns %}
  <section class="section">
    <h4>Return</h4>
    <p><code>{{ page.entry.returns }}</code></p>
  </section>
  {% endif %}
  {% if page.in_use %}
  <section class="section">
    <h4>In use</h4>
    <ul>
    {% for link in page.in_use %}
      <li><a href="{{ link.path }}">{{ link.title }}</a></li>
    {% endfor %}
    </ul>
  </section>
  {% endif %}
  {% if page.related %}
  <section class="section">
    <h4>Related</h4>
    <ul>
    {% for link in page.related %}
      <li><a href="{{ link.path }}">{{ link.title }}</a></li>
    {% endfor %}
    </ul>
  </section>
  {% endif %}
  <section class="section license">
    <a rel="license" href="http://creativecommons.org/licenses/by-nc-sa/4.0/">
      <img alt="Creative Commons License" src="https://i.creativecommons.org/l/by-nc-sa/4.0/88x31.png">
    </a>
    <p>This work is licensed under a
      <a rel="license" href="http://creativecommons.org/licenses/by-nc-sa/4.0/">Creative Commons Attribution-NonCommercial-ShareAlike 4.0 International License</a>.
    </p>
  </section>
</article>
{% endblock %}"##;

const FALLBACK_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block content %}
<div class="fallback">
  This page is not translated, please refer to the
  <a href="{{ page.link }}">english page</a>
</div>
{% endblock %}"##;

const REFERENCE_INDEX_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block content %}
<h1>Reference</h1>
{% for category in page.categories %}
<section class="category">
  <h2>{{ category.name }}</h2>
  {% for sub in category.subcategories %}
  {% if sub.name %}<h3>{{ sub.name }}</h3>{% endif %}
  <ul>
    {% for item in sub.items %}
    <li><a href="{{ item.path }}">{{ item.title }}</a></li>
    {% endfor %}
  </ul>
  {% endfor %}
</section>
{% endfor %}
{% endblock %}"##;

const EXAMPLES_INDEX_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block content %}
<h1>Examples</h1>
<ul class="ex-categories">
{% for category in page.categories %}
  <li class="ex-category">
    <h2>{{ category.name }}</h2>
    {% for sub in category.subcategories %}
    <div class="ex-subcategory">
      {% if sub.name %}<h3>{{ sub.name }}</h3>{% endif %}
      <ul>
        {% for item in sub.items %}
        <li><a href="{{ item.path }}">{{ item.title }}</a></li>
        {% endfor %}
      </ul>
    </div>
    {% endfor %}
  </li>
{% endfor %}
</ul>
{% endblock %}"##;

const EXAMPLE_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block content %}
<article class="example-page">
  <h1>{{ page.title }}</h1>
  <div class="content">{{ page.content | safe }}</div>
  <ul class="examples">
  {% for ex in page.examples %}
    <li class="example">
      {% if ex.image %}<img src="{{ ex.image }}" alt="{{ ex.name }}">{% endif %}
      <pre class="code-block">{% for line in ex.lines %}<code>{{ line }}</code>
{% endfor %}</pre>
    </li>
  {% endfor %}
  </ul>
</article>
{% endblock %}"##;
