//! Config to dropdown E2E tests

mod helper;

use serde_json::json;

use helper::{create_project, create_vuepress_page};
use version_menu::config::{ConfigError, PluginConfig};
use version_menu::dom::{Selector, inject_element, query_selector, render_dropdown};
use version_menu::menu::{DropdownBuilder, ResolvedItem};
use version_menu::version::types::VersionRecord;

fn records(names: &[&str]) -> Vec<VersionRecord> {
    names.iter().map(|name| VersionRecord::untagged(*name)).collect()
}

#[test]
fn default_menu_lists_latest_patch_per_minor() {
    let (_temp_dir, config_path) = create_project(json!({}), json!({
        "name": "chart.js",
        "version": "3.5.1"
    }));
    let config = PluginConfig::load(&config_path).unwrap();

    let data = DropdownBuilder::from_config(&config, "")
        .build(&config, &records(&["3.4.0", "3.5.0", "3.5.1", "3.4.1", "2.9.4"]));

    assert_eq!(data.text.as_deref(), Some("3.5.1"));
    assert_eq!(
        data.items.unwrap(),
        vec![
            ResolvedItem::leaf("3.5.1", Some("/3.5.1/".to_string()), Some("_self".to_string())),
            ResolvedItem::leaf("3.4.1", Some("/3.4.1/".to_string()), Some("_self".to_string())),
            ResolvedItem::leaf("2.9.4", Some("/2.9.4/".to_string()), Some("_self".to_string())),
        ]
    );
}

#[test]
fn custom_menu_with_filters_and_links() {
    let (_temp_dir, config_path) = create_project(
        json!({
            "base": "/docs/3.5.1",
            "filters": { "series": "{{major}}.x" },
            "menu": {
                "text": "Chart.js v{{version}}",
                "items": [
                    { "type": "versions", "text": "{{version|series}}", "link": "/docs/{{version}}/", "group": "major", "limit": 2 },
                    {
                        "text": "Resources",
                        "items": [
                            { "text": "Release notes ({{version}})", "link": "https://github.com/chartjs/Chart.js/releases/tag/v{{version}}", "target": "_blank" }
                        ]
                    }
                ]
            }
        }),
        json!({ "name": "chart.js", "version": "3.5.1" }),
    );
    let config = PluginConfig::load(&config_path).unwrap();
    assert_eq!(config.base, "/docs/3.5.1/");

    let data = DropdownBuilder::from_config(&config, "https://www.chartjs.org")
        .build(&config, &records(&["3.5.1", "3.5.0", "2.9.4", "1.1.1"]));

    assert_eq!(data.text.as_deref(), Some("Chart.js v3.5.1"));
    assert_eq!(
        data.items.unwrap(),
        vec![
            ResolvedItem::leaf("3.x", Some("/".to_string()), None),
            ResolvedItem::leaf(
                "2.x",
                Some("https://www.chartjs.org/docs/2.9.4/".to_string()),
                None
            ),
            ResolvedItem::group(
                "Resources",
                vec![ResolvedItem::leaf(
                    "Release notes (3.5.1)",
                    Some("https://github.com/chartjs/Chart.js/releases/tag/v3.5.1".to_string()),
                    Some("_blank".to_string()),
                )],
                None,
            ),
        ]
    );
}

#[test]
fn null_menu_disables_dropdown() {
    let (_temp_dir, config_path) = create_project(
        json!({ "menu": null }),
        json!({ "name": "chart.js", "version": "3.5.1" }),
    );
    let config = PluginConfig::load(&config_path).unwrap();

    let data = DropdownBuilder::from_config(&config, "").build(&config, &records(&["3.5.1"]));

    assert!(data.is_empty());
}

#[test]
fn missing_package_json_is_actionable_error() {
    let (_temp_dir, config_path) = create_project(
        json!({ "package": "missing/package.json" }),
        json!({ "name": "chart.js", "version": "3.5.1" }),
    );

    let error = PluginConfig::load(&config_path).unwrap_err();

    assert!(matches!(error, ConfigError::ReadPackage { .. }));
    assert!(error.to_string().contains("'package' option"));
}

#[test]
fn invalid_exclude_pattern_fails_at_load() {
    let (_temp_dir, config_path) = create_project(
        json!({
            "menu": { "items": [{ "type": "versions", "exclude": "(beta" }] }
        }),
        json!({ "name": "chart.js", "version": "3.5.1" }),
    );

    let error = PluginConfig::load(&config_path).unwrap_err();

    assert!(matches!(error, ConfigError::InvalidExclude { pattern, .. } if pattern == "(beta"));
}

#[test]
fn dropdown_is_injected_at_default_locations() {
    let (_temp_dir, config_path) = create_project(
        json!({}),
        json!({ "name": "chart.js", "version": "3.5.1" }),
    );
    let config = PluginConfig::load(&config_path).unwrap();
    let data = DropdownBuilder::from_config(&config, "").build(&config, &records(&["3.5.1"]));
    let (mut tree, app) = create_vuepress_page();

    let locations = &config.menu.as_ref().unwrap().locations;
    for location in locations {
        let el = render_dropdown(&mut tree, &data);
        inject_element(&mut tree, app, el, location).unwrap();
    }

    // ::after the home link, inside the navbar
    let navbar = Selector::parse(".navbar > .versions-dropdown").unwrap();
    assert!(query_selector(&tree, app, &navbar).is_some());
    // ::before the first sidebar link
    let sidebar = Selector::parse(".sidebar > .nav-links > :first-child").unwrap();
    let first = query_selector(&tree, app, &sidebar).unwrap();
    assert!(tree.has_class(first, "versions-dropdown"));
}
