//! HTML rendering
//!
//! Turns a [`ReportPage`] into a single self-contained HTML document. Nodes
//! with children become `<details>` elements, so expanding and collapsing is
//! left entirely to the browser.

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::problem::ProblemNode;
use crate::report::ReportPage;
use crate::text::{Fragment, PrettyText};
use crate::tree::Tree;

/// Renders the whole report page
pub fn render_page(page: &ReportPage) -> String {
    let mut html = String::from(HTML_TEMPLATE_HEADER);

    html.push_str("<header class='report-header'>");
    html.push_str("<h1>Configuration cache report</h1>");
    html.push_str(&format!(
        "<p class='summary'><strong>{}</strong> {} found {} the configuration cache.</p>",
        page.total_problems,
        if page.total_problems == 1 {
            "problem was"
        } else {
            "problems were"
        },
        encode_text(&page.cache_action)
    ));
    if !page.documentation_link.is_empty() {
        html.push_str(&format!(
            "<p class='learn-more'>See the <a href=\"{}\" target=\"_blank\">complete documentation</a> for details.</p>",
            encode_double_quoted_attribute(&page.documentation_link)
        ));
    }
    html.push_str("</header>");

    for tree in [&page.message_tree, &page.task_tree] {
        html.push_str("<section class='report-tree'>");
        html.push_str("<ul class='tree'>");
        render_tree_html(&mut html, tree);
        html.push_str("</ul>");
        html.push_str("</section>");
    }

    html.push_str(HTML_TEMPLATE_FOOTER);
    html
}

/// Renders one tree node, and its children recursively, as a list item
pub fn render_tree_html(html: &mut String, tree: &Tree<ProblemNode>) {
    if tree.is_leaf() {
        html.push_str("<li class='leaf'>");
        render_node_html(html, &tree.label);
        html.push_str("</li>");
        return;
    }

    let open = if tree.view_state.is_expanded() {
        " open"
    } else {
        ""
    };
    html.push_str(&format!("<li><details{}><summary>", open));
    render_node_html(html, &tree.label);
    html.push_str("</summary><ul class='tree'>");
    for child in &tree.children {
        render_tree_html(html, child);
    }
    html.push_str("</ul></details></li>");
}

/// Renders the markup for a single node label
pub fn render_node_html(html: &mut String, node: &ProblemNode) {
    match node {
        ProblemNode::Task { path, type_name } => {
            html.push_str(&format!(
                "<span class='node task'>task <code>{}</code> of type <code>{}</code></span>",
                encode_text(path),
                encode_text(type_name)
            ));
        }
        ProblemNode::Bean { type_name } => {
            html.push_str(&format!(
                "<span class='node bean'>bean of type <code>{}</code></span>",
                encode_text(type_name)
            ));
        }
        ProblemNode::Property {
            property_kind,
            name,
            owner,
        } => {
            html.push_str(&format!(
                "<span class='node property'>{} <code>{}</code> of <code>{}</code></span>",
                property_kind,
                encode_text(name),
                encode_text(owner)
            ));
        }
        ProblemNode::Label { text } => {
            html.push_str(&format!(
                "<span class='node label'>{}</span>",
                encode_text(text)
            ));
        }
        ProblemNode::Message { text } => {
            html.push_str("<span class='node message'>");
            render_pretty_text_html(html, text);
            html.push_str("</span>");
        }
        ProblemNode::Exception { raw_text } => {
            html.push_str(&format!(
                "<pre class='node exception'>{}</pre>",
                encode_text(raw_text)
            ));
        }
        ProblemNode::Error { inner, doc_link } => {
            render_severity_html(html, "error", "✖", inner, doc_link.as_deref());
        }
        ProblemNode::Warning { inner, doc_link } => {
            render_severity_html(html, "warning", "⚠", inner, doc_link.as_deref());
        }
        ProblemNode::Link { url, display_text } => {
            html.push_str(&format!(
                "<a class='node documentation-button' href=\"{}\" target=\"_blank\">{}</a>",
                encode_double_quoted_attribute(url),
                encode_text(display_text)
            ));
        }
    }
}

fn render_severity_html(
    html: &mut String,
    severity: &str,
    icon: &str,
    inner: &ProblemNode,
    doc_link: Option<&ProblemNode>,
) {
    html.push_str(&format!(
        "<span class='{}'><span class='severity-icon'>{}</span> ",
        severity, icon
    ));
    render_node_html(html, inner);
    if let Some(link) = doc_link {
        render_node_html(html, link);
    }
    html.push_str("</span>");
}

fn render_pretty_text_html(html: &mut String, text: &PrettyText) {
    for fragment in text.fragments() {
        match fragment {
            Fragment::Text(text) => html.push_str(&encode_text(text)),
            Fragment::Reference(name) => {
                html.push_str(&format!("<code>{}</code>", encode_text(name)))
            }
        }
    }
}

const HTML_TEMPLATE_HEADER: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Configuration cache report</title>
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Oxygen, Ubuntu, Cantarell, 'Open Sans', 'Helvetica Neue', sans-serif;
            line-height: 1.6;
            color: #333;
            max-width: 1200px;
            margin: 0 auto;
            padding: 20px;
            background-color: #f7f9fc;
        }
        h1 {
            color: #2c3e50;
            border-bottom: 2px solid #3498db;
            padding-bottom: 10px;
        }
        .report-tree {
            background: white;
            padding: 20px;
            margin-top: 20px;
            border-radius: 8px;
            box-shadow: 0 2px 10px rgba(0,0,0,0.1);
        }
        .tree {
            list-style-type: none;
            padding-left: 20px;
        }
        .tree > li {
            padding: 2px 0;
        }
        summary {
            cursor: pointer;
        }
        .leaf {
            padding-left: 16px;
        }
        code {
            font-family: monospace;
            background-color: #f0f4f8;
            padding: 0 4px;
            border-radius: 3px;
        }
        .label {
            font-weight: bold;
            color: #3498db;
        }
        .error .severity-icon {
            color: #e74c3c;
        }
        .warning .severity-icon {
            color: #e67e22;
        }
        .exception {
            font-size: 0.85em;
            background-color: #fdf2f2;
            border-left: 4px solid #e74c3c;
            padding: 8px;
            margin: 4px 0;
            white-space: pre-wrap;
        }
        .documentation-button {
            color: #7f8c8d;
            text-decoration: none;
            font-weight: bold;
        }
    </style>
</head>
<body>
"#;

const HTML_TEMPLATE_FOOTER: &str = r#"
</body>
</html>
"#;
