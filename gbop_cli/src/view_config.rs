pub const DEFAULT_RESULT_LIMIT: usize = 300;

/// Presentation options owned by the front end and handed to every view.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewConfig {
    pub hide_non_matches: bool,
    pub result_limit: usize,
}

impl Default for ViewConfig {
    fn default() -> Self {
        ViewConfig {
            hide_non_matches: false,
            result_limit: DEFAULT_RESULT_LIMIT,
        }
    }
}

impl ViewConfig {
    pub fn with_hide_non_matches(mut self, hide: bool) -> Self {
        self.hide_non_matches = hide;
        self
    }

    pub fn with_result_limit(mut self, limit: usize) -> Self {
        self.result_limit = limit;
        self
    }
}
