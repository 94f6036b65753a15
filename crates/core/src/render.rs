//! HTML rendering for the dashboard page and its two list views.
//!
//! Every function is pure: it takes a view state and returns markup. All
//! record text goes through [`escape_html`].

use crate::types::{BusinessDomain, BusinessTerm};
use crate::view::ViewState;

pub const PAGE_TITLE: &str = "Business Glossary Dashboard";
pub const PAGE_SUBTITLE: &str =
    "Explore business domains and glossary terms extracted from your documents.";

const DOMAINS_HEADING: &str = "Business Domains";
const GLOSSARY_HEADING: &str = "Business Glossary";
const DOMAINS_LOADING: &str = "Loading domains...";
const GLOSSARY_LOADING: &str = "Loading glossary...";
const RETRY_FORM: &str =
    "<form method=\"post\" action=\"/remount\"><button type=\"submit\">Retry</button></form>";

const STYLESHEET: &str = "\
body{font-family:system-ui,sans-serif;background:#f9fafb;color:#1f2937;margin:0}\
.page{max-width:72rem;margin:0 auto;padding:1.5rem}\
header h1{font-size:1.875rem;color:#1d4ed8;margin:0}\
header p{color:#4b5563;margin-top:.5rem}\
.view{padding:1rem}\
.view h2{font-size:1.25rem;color:#2563eb;margin-bottom:.75rem}\
.grid{display:grid;grid-template-columns:repeat(auto-fill,minmax(18rem,1fr));gap:1rem}\
.stack>.card+.card{margin-top:.75rem}\
.card{padding:1rem;border:1px solid #e5e7eb;background:#fff;border-radius:.75rem;\
box-shadow:0 1px 2px rgba(0,0,0,.05)}\
.card h3{font-size:1.125rem;margin:0}\
.card-body{margin-top:.25rem}\
.card-footer{margin-top:.5rem;font-size:.875rem;color:#4b5563}\
.status{color:#6b7280}\
.status.error{color:#b91c1c}";

/// Escapes text for use inside HTML element content and attribute values.
pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

pub fn render_domain_card(domain: &BusinessDomain) -> String {
    let description = domain.domain_description.as_deref().unwrap_or_default();
    format!(
        "<article class=\"card\" data-key=\"{id}\">\
         <h3 class=\"card-title\">{title}</h3><p class=\"card-body\">{body}</p></article>",
        id = domain.id,
        title = escape_html(&domain.business_value),
        body = escape_html(description),
    )
}

pub fn render_term_card(term: &BusinessTerm) -> String {
    let mut footer = format!(
        "<strong>Domain:</strong> {domain}<br><strong>Context:</strong> {context}",
        domain = escape_html(term.domain_label()),
        context = escape_html(&term.context_text()),
    );
    if let Some(synonyms) = term.synonyms.as_deref().filter(|s| !s.is_empty()) {
        footer.push_str(&format!(
            "<br><strong>Synonyms:</strong> {}",
            escape_html(synonyms)
        ));
    }

    format!(
        "<article class=\"card\" data-key=\"{id}\">\
         <h3 class=\"card-title\">{title}</h3><p class=\"card-body\">{body}</p>\
         <div class=\"card-footer\">{footer}</div></article>",
        id = term.id,
        title = escape_html(&term.term),
        body = escape_html(&term.term_definition),
    )
}

/// Renders the domain view: a grid of cards once loaded.
pub fn render_domain_view(state: &ViewState<BusinessDomain>) -> String {
    render_view(
        state,
        ViewLayout {
            id: "domains",
            heading: DOMAINS_HEADING,
            loading: DOMAINS_LOADING,
            list_class: "grid",
        },
        render_domain_card,
    )
}

/// Renders the glossary view: a vertical list of cards once loaded.
pub fn render_glossary_view(state: &ViewState<BusinessTerm>) -> String {
    render_view(
        state,
        ViewLayout {
            id: "glossary",
            heading: GLOSSARY_HEADING,
            loading: GLOSSARY_LOADING,
            list_class: "stack",
        },
        render_term_card,
    )
}

/// Renders the full page: static header, then the domain and glossary views.
pub fn render_page(
    domains: &ViewState<BusinessDomain>,
    glossary: &ViewState<BusinessTerm>,
) -> String {
    let mut page = String::from("<!DOCTYPE html>\n<html lang=\"en\">");
    page.push_str("<head><meta charset=\"utf-8\">");
    page.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">");
    page.push_str(&format!("<title>{PAGE_TITLE}</title>"));
    page.push_str(&format!("<style>{STYLESHEET}</style></head><body>"));
    page.push_str("<div class=\"page\">");
    page.push_str(&format!(
        "<header><h1>{PAGE_TITLE}</h1><p>{PAGE_SUBTITLE}</p></header>"
    ));
    page.push_str(&render_domain_view(domains));
    page.push_str(&render_glossary_view(glossary));
    page.push_str("</div></body></html>\n");
    page
}

struct ViewLayout {
    id: &'static str,
    heading: &'static str,
    loading: &'static str,
    list_class: &'static str,
}

fn render_view<T>(state: &ViewState<T>, layout: ViewLayout, card: fn(&T) -> String) -> String {
    match state {
        ViewState::Loading => format!(
            "<section id=\"{}\"><p class=\"status\">{}</p></section>",
            layout.id, layout.loading
        ),
        ViewState::Failed { error, .. } => format!(
            "<section id=\"{}\" class=\"view\"><h2>{}</h2>\
             <p class=\"status error\">Failed to load: {}</p>{RETRY_FORM}</section>",
            layout.id,
            layout.heading,
            escape_html(error)
        ),
        ViewState::Loaded { items, .. } => {
            let cards: String = items.iter().map(card).collect();
            format!(
                "<section id=\"{}\" class=\"view\"><h2>{}</h2>\
                 <div class=\"{}\">{}</div></section>",
                layout.id, layout.heading, layout.list_class, cards
            )
        }
    }
}
