//! Structural pruning pass.
//!
//! Removes non-content elements from a parsed document before conversion.
//! The selector list covers generic noise (scripts, styles, navigation) and
//! the structural markers of the Docsy theme used by the target sites.

use ego_tree::NodeId;
use scraper::{Html, Selector};

/// Elements removed before conversion.
const PRUNE_SELECTORS: &[&str] = &[
    "script",
    "style",
    "noscript",
    "iframe",
    "template",
    "nav",
    "footer",
    "aside.td-sidebar",
    ".td-sidebar-nav",
    ".td-navbar",
    "header.td-header",
    ".td-toc",
    "#main_navbar",
];

/// Remove all elements matching the prune list from the document, in place.
pub fn prune(doc: &mut Html) {
    // collect first: selection borrows the tree, detaching mutates it
    let mut to_remove: Vec<NodeId> = Vec::new();

    for selector_str in PRUNE_SELECTORS {
        let selector = Selector::parse(selector_str).expect("invalid prune selector");
        to_remove.extend(doc.select(&selector).map(|element| element.id()));
    }

    for id in to_remove {
        if let Some(mut node) = doc.tree.get_mut(id) {
            node.detach();
        }
    }
}
