use gbop_core::{MatchSet, Namespace, OpCodeGrids};
use crate::table_view::{caption, render_table, TableView};
use crate::tests::{catalog, init};
use crate::view_config::ViewConfig;

#[test]
fn test_render_primary_table_without_query() {
    init();

    let grids = OpCodeGrids::build(catalog().instructions());
    let text = render_table(grids.grid(Namespace::Primary), Namespace::Primary, None, None, &ViewConfig::default());

    assert!(text.starts_with("8-bit opcodes\n"));
    assert!(text.contains("x0"));
    assert!(text.contains("Fx"));
    assert!(text.contains("NOP"));
    assert!(text.contains("LD A,d8"));
    assert!(text.contains("Z 0 H -"));
    assert!(!text.contains('*'));
    assert!(!text.contains('['));
}

#[test]
fn test_render_marks_matching_cells() {
    init();

    let grids = OpCodeGrids::build(catalog().instructions());
    let match_set = MatchSet::for_query(catalog().instructions(), "0x3e").unwrap();

    let primary = render_table(grids.grid(Namespace::Primary), Namespace::Primary, Some(&match_set), None, &ViewConfig::default());
    let extended = render_table(grids.grid(Namespace::Extended), Namespace::Extended, Some(&match_set), None, &ViewConfig::default());

    assert!(primary.contains("*LD A,d8"));
    assert!(primary.contains("NOP"));
    assert_eq!(primary.matches('*').count(), 1);
    assert!(extended.starts_with(caption(Namespace::Extended)));
    assert!(extended.contains("*SRL (HL)"));
}

#[test]
fn test_render_hides_non_matches() {
    init();

    let grids = OpCodeGrids::build(catalog().instructions());
    let match_set = MatchSet::for_query(catalog().instructions(), "0x3e").unwrap();
    let config = ViewConfig::default().with_hide_non_matches(true);

    let text = render_table(grids.grid(Namespace::Primary), Namespace::Primary, Some(&match_set), None, &config);

    assert!(text.contains("*LD A,d8"));
    assert!(!text.contains("NOP"));

    let unfiltered = render_table(grids.grid(Namespace::Primary), Namespace::Primary, None, None, &config);
    assert!(unfiltered.contains("NOP"));
}

#[test]
fn test_render_highlights_active_row_and_column() {
    init();

    let grids = OpCodeGrids::build(catalog().instructions());
    let active = grids.locate("3E");

    let primary = render_table(grids.grid(Namespace::Primary), Namespace::Primary, None, active, &ViewConfig::default());
    let extended = render_table(grids.grid(Namespace::Extended), Namespace::Extended, None, active, &ViewConfig::default());

    assert!(primary.contains("[3x]"));
    assert!(primary.contains("[xE]"));
    assert!(!extended.contains('['));
}

#[test]
fn test_table_view_lines() {
    init();

    let grids = OpCodeGrids::build(catalog().instructions());
    let config = ViewConfig::default();
    let text = TableView::new(grids.grid(Namespace::Extended), Namespace::Extended, None, None, &config).to_string();

    let lines: Vec<&str> = text.lines().collect();
    // caption, column header, three lines per row
    assert_eq!(lines.len(), 2 + 16 * 3);
    assert_eq!(lines[0], "16-bit opcodes (0xCB prefix)");
    assert!(lines[1].starts_with("     x0"));
    assert!(lines[2].starts_with("0x   RLC B"));
    assert!(lines.iter().all(|line| line.len() == line.trim_end().len()));
    assert!(text.ends_with('\n'));
}
