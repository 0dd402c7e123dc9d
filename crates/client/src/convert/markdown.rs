//! Conversion pass: pruned DOM to Markdown.
//!
//! Walks the tree once and emits ATX headings, `-` bullets, numbered lists,
//! inline links, emphasis, and fenced code blocks. Whitespace is collapsed
//! the way a renderer would collapse it; the final text has no runs of more
//! than one blank line.

use ego_tree::NodeRef;
use scraper::{Html, Node, Selector};

/// Extract the document title, collapsed to a single line. Empty when the
/// document has no `<title>`.
pub fn extract_title(doc: &Html) -> String {
    let selector = Selector::parse("title").expect("invalid title selector");
    doc.select(&selector)
        .next()
        .map(|el| collapse_whitespace(&el.text().collect::<String>()))
        .unwrap_or_default()
}

/// Convert the (pruned) document body to Markdown.
pub fn to_markdown(doc: &Html) -> String {
    let mut out = String::new();
    render_children(doc.tree.root(), &mut out, 0);
    tidy(&out)
}

fn render_children(node: NodeRef<'_, Node>, out: &mut String, list_depth: usize) {
    for child in node.children() {
        render_node(child, out, list_depth);
    }
}

fn render_node(node: NodeRef<'_, Node>, out: &mut String, list_depth: usize) {
    match node.value() {
        Node::Text(text) => push_text(out, &text.text),
        Node::Element(_) => render_element(node, out, list_depth),
        Node::Comment(_) | Node::Doctype(_) | Node::ProcessingInstruction(_) => {}
        _ => render_children(node, out, list_depth),
    }
}

fn render_element(node: NodeRef<'_, Node>, out: &mut String, list_depth: usize) {
    let Node::Element(element) = node.value() else { return };

    match element.name() {
        // metadata and non-text subtrees; title is read separately
        "head" | "svg" | "img" | "picture" | "video" | "audio" | "button" => {}

        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
            let level = usize::from(element.name().as_bytes()[1] - b'0');
            ensure_block(out);
            out.push_str(&"#".repeat(level));
            out.push(' ');
            render_children(node, out, list_depth);
            ensure_block(out);
        }

        "p" => {
            ensure_block(out);
            render_children(node, out, list_depth);
            ensure_block(out);
        }

        "br" => out.push('\n'),

        "hr" => {
            ensure_block(out);
            out.push_str("---");
            ensure_block(out);
        }

        "ul" => render_list(node, out, list_depth, false),
        "ol" => render_list(node, out, list_depth, true),

        // a stray li outside a list; render its content as a block
        "li" => {
            ensure_block(out);
            render_children(node, out, list_depth);
            ensure_block(out);
        }

        "a" => render_link(node, element.attr("href"), out, list_depth),

        "strong" | "b" => {
            out.push_str("**");
            render_children(node, out, list_depth);
            while out.ends_with(' ') {
                out.pop();
            }
            out.push_str("**");
        }

        "em" | "i" => {
            out.push('*');
            render_children(node, out, list_depth);
            while out.ends_with(' ') {
                out.pop();
            }
            out.push('*');
        }

        "code" => {
            out.push('`');
            out.push_str(collapse_whitespace(&raw_text(node)).as_str());
            out.push('`');
        }

        "pre" => {
            ensure_block(out);
            out.push_str("```\n");
            out.push_str(raw_text(node).trim_matches('\n'));
            out.push_str("\n```");
            ensure_block(out);
        }

        "blockquote" => {
            let mut inner = String::new();
            render_children(node, &mut inner, list_depth);
            ensure_block(out);
            for line in tidy(&inner).lines() {
                out.push_str("> ");
                out.push_str(line);
                out.push('\n');
            }
            ensure_block(out);
        }

        "table" => render_table(node, out),
        // rows are emitted by render_table; ignore any reached directly
        "tr" | "thead" | "tbody" | "th" | "td" => render_children(node, out, list_depth),

        name if is_block(name) => {
            ensure_block(out);
            render_children(node, out, list_depth);
            ensure_block(out);
        }

        // everything else renders inline
        _ => render_children(node, out, list_depth),
    }
}

fn render_link(
    node: NodeRef<'_, Node>, href: Option<&str>, out: &mut String, list_depth: usize,
) {
    // fragment-only and empty targets render as plain text
    let target = href.filter(|h| !h.is_empty() && !h.starts_with('#'));

    let Some(target) = target else {
        render_children(node, out, list_depth);
        return;
    };

    out.push('[');
    let text_start = out.len();
    render_children(node, out, list_depth);
    while out.ends_with(' ') {
        out.pop();
    }
    if out.len() == text_start {
        out.push_str("link");
    }
    out.push_str("](");
    out.push_str(target);
    out.push(')');
}

fn render_list(node: NodeRef<'_, Node>, out: &mut String, list_depth: usize, ordered: bool) {
    ensure_block(out);
    let indent = "  ".repeat(list_depth);
    let mut index = 1usize;

    for child in node.children() {
        let is_item = matches!(child.value(), Node::Element(el) if el.name() == "li");
        if !is_item {
            continue;
        }

        let marker = if ordered { format!("{index}. ") } else { "- ".to_string() };
        index += 1;

        let mut item = String::new();
        render_children(child, &mut item, list_depth + 1);

        for (i, line) in tidy(&item).lines().enumerate() {
            if i == 0 {
                out.push_str(&indent);
                out.push_str(&marker);
                out.push_str(line);
            } else if !line.is_empty() {
                out.push_str(&indent);
                out.push_str(&" ".repeat(marker.len()));
                out.push_str(line);
            }
            out.push('\n');
        }
    }

    ensure_block(out);
}

fn render_table(node: NodeRef<'_, Node>, out: &mut String) {
    ensure_block(out);

    for row in node.descendants() {
        let is_row = matches!(row.value(), Node::Element(el) if el.name() == "tr");
        if !is_row {
            continue;
        }

        let cells: Vec<String> = row
            .children()
            .filter(|cell| {
                matches!(cell.value(), Node::Element(el) if el.name() == "td" || el.name() == "th")
            })
            .map(|cell| collapse_whitespace(&raw_text(cell)))
            .collect();

        if !cells.is_empty() {
            out.push_str(&cells.join(" | "));
            out.push('\n');
        }
    }

    ensure_block(out);
}

fn is_block(name: &str) -> bool {
    matches!(
        name,
        "address"
            | "article"
            | "aside"
            | "body"
            | "dd"
            | "details"
            | "div"
            | "dl"
            | "dt"
            | "fieldset"
            | "figcaption"
            | "figure"
            | "form"
            | "header"
            | "html"
            | "main"
            | "section"
            | "summary"
    )
}

/// All text under a node, unmodified.
fn raw_text(node: NodeRef<'_, Node>) -> String {
    let mut text = String::new();
    for descendant in node.descendants() {
        if let Node::Text(t) = descendant.value() {
            text.push_str(&t.text);
        }
    }
    text
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Append inline text, collapsing whitespace runs to single spaces while
/// keeping word separation across node boundaries.
fn push_text(out: &mut String, text: &str) {
    let collapsed = collapse_whitespace(text);

    if collapsed.is_empty() {
        if !text.is_empty() && needs_space(out) {
            out.push(' ');
        }
        return;
    }

    if text.starts_with(char::is_whitespace) && needs_space(out) {
        out.push(' ');
    }
    out.push_str(&collapsed);
    if text.ends_with(char::is_whitespace) {
        out.push(' ');
    }
}

fn needs_space(out: &str) -> bool {
    !out.is_empty()
        && !out.ends_with(char::is_whitespace)
        && !out.ends_with('[')
        && !out.ends_with('(')
}

/// End the current block: strip trailing spaces and leave exactly one blank
/// line before whatever comes next.
fn ensure_block(out: &mut String) {
    while out.ends_with(' ') || out.ends_with('\t') {
        out.pop();
    }
    if out.is_empty() {
        return;
    }
    while !out.ends_with("\n\n") {
        out.push('\n');
    }
}

/// Final cleanup: right-trim lines, collapse blank-line runs, trim the ends.
fn tidy(text: &str) -> String {
    let mut lines: Vec<&str> = Vec::new();
    let mut prev_empty = true;

    for line in text.lines() {
        let line = line.trim_end();
        let empty = line.is_empty();
        if empty && prev_empty {
            continue;
        }
        lines.push(line);
        prev_empty = empty;
    }

    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }

    lines.join("\n")
}
