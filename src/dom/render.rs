//! Dropdown element rendering

use crate::dom::tree::{NodeId, NodeTree};
use crate::menu::{DropdownData, ResolvedItem};

const DROPDOWN_CLASS: &str = "nav-item versions-dropdown";

/// Create a detached dropdown element for `data`
pub fn render_dropdown(tree: &mut NodeTree, data: &DropdownData) -> NodeId {
    let el = tree.create_element("div");
    tree.set_attribute(el, "class", DROPDOWN_CLASS);
    update_dropdown(tree, el, data);
    el
}

/// Replace the content of a dropdown element previously created by [`render_dropdown`]
pub fn update_dropdown(tree: &mut NodeTree, el: NodeId, data: &DropdownData) {
    tree.clear_children(el);

    let wrapper = tree.append_element(el, "div", &[("class", "dropdown-wrapper")]);
    let title = tree.append_element(
        wrapper,
        "button",
        &[("class", "dropdown-title"), ("type", "button")],
    );
    let label = tree.append_element(title, "span", &[("class", "title")]);
    tree.append_text(label, data.text.as_deref().unwrap_or_default());
    tree.append_element(title, "span", &[("class", "arrow down")]);

    let list = tree.append_element(wrapper, "ul", &[("class", "nav-dropdown")]);
    for item in data.items.iter().flatten() {
        render_item(tree, list, item, "dropdown-item");
    }
}

fn render_item(tree: &mut NodeTree, list: NodeId, item: &ResolvedItem, class: &str) {
    let li = tree.append_element(list, "li", &[("class", class)]);

    if let Some(children) = &item.items {
        let heading = tree.append_element(li, "h4", &[]);
        tree.append_text(heading, &item.text);
        let sublist = tree.append_element(li, "ul", &[("class", "dropdown-subitem-wrapper")]);
        for child in children {
            render_item(tree, sublist, child, "dropdown-subitem");
        }
        return;
    }

    let node = match &item.link {
        Some(link) if !link.is_empty() => {
            let a = tree.append_element(li, "a", &[("class", "nav-link"), ("href", link)]);
            if let Some(target) = &item.target {
                tree.set_attribute(a, "target", target);
                if target == "_blank" {
                    tree.set_attribute(a, "rel", "noopener noreferrer");
                }
            }
            a
        }
        _ => tree.append_element(li, "span", &[("class", "nav-link")]),
    };
    tree.append_text(node, &item.text);
}
