//! Page fixtures

use version_menu::dom::{NodeId, NodeTree};

/// Layout of a default-theme docs page:
///
/// ```html
/// <div id="app">
///   <header class="navbar">
///     <a class="home-link" href="/">Docs</a>
///     <div class="links"></div>
///   </header>
///   <aside class="sidebar">
///     <nav class="nav-links">
///       <div class="nav-item">Guide</div>
///       <div class="nav-item">API</div>
///     </nav>
///   </aside>
/// </div>
/// ```
pub fn create_vuepress_page() -> (NodeTree, NodeId) {
    let mut tree = NodeTree::new();
    let app = tree.create_element("div");
    tree.set_attribute(app, "id", "app");

    let navbar = tree.append_element(app, "header", &[("class", "navbar")]);
    let home = tree.append_element(navbar, "a", &[("class", "home-link"), ("href", "/")]);
    tree.append_text(home, "Docs");
    tree.append_element(navbar, "div", &[("class", "links")]);

    let sidebar = tree.append_element(app, "aside", &[("class", "sidebar")]);
    let nav_links = tree.append_element(sidebar, "nav", &[("class", "nav-links")]);
    for title in ["Guide", "API"] {
        let item = tree.append_element(nav_links, "div", &[("class", "nav-item")]);
        tree.append_text(item, title);
    }

    (tree, app)
}
