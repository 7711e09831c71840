use std::sync::Once;
use log::LevelFilter;
use simplelog::{Config, TestLogger};
use gbop_core::Catalog;

mod table_view;
mod results_view;
mod command;

static START: Once = Once::new();

fn init_logger_for_test() {
    START.call_once(|| TestLogger::init(LevelFilter::Trace, Config::default()).unwrap());
}

pub fn init() {
    init_logger_for_test();
}

fn catalog() -> &'static Catalog {
    Catalog::shared().unwrap()
}
