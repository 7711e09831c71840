use gbop_core::search;
use crate::results_view::{render_results, render_results_json, ResultsView};
use crate::tests::{catalog, init};
use crate::view_config::ViewConfig;

#[test]
fn test_render_results_in_address_order() {
    init();

    let matches = search(catalog().instructions(), "0x3e");
    let text = render_results(&matches, &ViewConfig::default());

    assert_eq!(text, "2 matches\n0x3E    LD A,d8\n0xCB3E  SRL (HL)\n");
}

#[test]
fn test_render_results_respects_limit() {
    init();

    let matches = search(catalog().instructions(), "0x3e");
    let text = render_results(&matches, &ViewConfig::default().with_result_limit(1));

    assert_eq!(text, "2 matches\n0x3E    LD A,d8\n");
}

#[test]
fn test_render_no_results() {
    init();

    let matches = search(catalog().instructions(), "xyz");
    let text = render_results(&matches, &ViewConfig::default());

    assert_eq!(text, "0 matches\nNo matches.\n");
}

#[test]
fn test_default_limit_caps_large_result_sets() {
    init();

    let matches = search(catalog().instructions(), "");
    let text = render_results(&matches, &ViewConfig::default());

    assert!(text.starts_with("501 matches\n"));
    assert_eq!(text.lines().count(), 1 + 300);
}

#[test]
fn test_render_results_json() {
    init();

    let matches = search(catalog().instructions(), "0x3e");
    let json = render_results_json(&matches, &ViewConfig::default()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value.as_array().unwrap().len(), 2);
    assert_eq!(value[0]["opCode"], "3E");
    assert_eq!(value[0]["mnemonic"], "LD A,d8");
    assert_eq!(value[0]["type"], "load8");
    assert_eq!(value[0]["bytes"], 2);
    assert_eq!(value[0]["flags"]["Z"], "unaffected");
    assert!(value[0]["description"].is_null());
    assert_eq!(value[1]["opCode"], "CB3E");
    assert_eq!(value[1]["flags"]["CY"], "affected");
}

#[test]
fn test_results_view_writes_into_formatter() {
    init();

    let matches = search(catalog().instructions(), "rlca");
    let config = ViewConfig::default();

    assert_eq!(format!("{}", ResultsView::new(&matches, &config)), "1 match\n0x07    RLCA\n");
    assert_eq!(format!(">{}", ResultsView::new(&[], &config)), ">0 matches\nNo matches.\n");
}
