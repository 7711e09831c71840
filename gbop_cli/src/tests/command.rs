use clap::Parser;
use crate::table_view::caption;
use crate::tests::{catalog, init};
use crate::{run, Args};
use gbop_core::Namespace;

fn run_args(args: &[&str]) -> String {
    let args = Args::try_parse_from(args).unwrap();
    run(args.command, catalog()).unwrap()
}

#[test]
fn test_table_prints_both_grids_by_default() {
    init();

    let text = run_args(&["gbop", "table"]);

    assert!(text.starts_with(caption(Namespace::Primary)));
    assert!(text.contains(caption(Namespace::Extended)));
}

#[test]
fn test_table_only_selects_one_grid() {
    init();

    let extended = run_args(&["gbop", "table", "--only", "cb"]);
    assert!(extended.starts_with(caption(Namespace::Extended)));
    assert!(!extended.contains(caption(Namespace::Primary)));

    let primary = run_args(&["gbop", "table", "--only", "primary", "-q", "halt"]);
    assert!(primary.starts_with(caption(Namespace::Primary)));
    assert!(primary.contains("*HALT"));
    assert!(!primary.contains(caption(Namespace::Extended)));
}

#[test]
fn test_table_rejects_cb_flag() {
    init();

    assert!(Args::try_parse_from(["gbop", "table", "--cb"]).is_err());
}
