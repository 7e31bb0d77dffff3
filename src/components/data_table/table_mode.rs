//! Table Mode
//!
//! Feature switches for the presentation shell, derived once from configuration.

/// Which parts of the grid chrome are enabled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableMode {
    pub show_toolbar: bool,
    pub enable_row_actions: bool,
    pub enable_export: bool,
    pub enable_detail_panel: bool,
}

impl TableMode {
    pub fn derive(simple: bool, has_actions: bool, detail_panel: bool, export_enabled: bool) -> Self {
        Self {
            show_toolbar: !simple,
            enable_row_actions: has_actions || detail_panel,
            enable_export: export_enabled && !simple,
            enable_detail_panel: detail_panel,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_hides_toolbar_and_export() {
        let mode = TableMode::derive(true, false, false, true);
        assert!(!mode.show_toolbar);
        assert!(!mode.enable_export);
        assert!(!mode.enable_row_actions);
    }

    #[test]
    fn test_detail_panel_enables_row_menu() {
        let mode = TableMode::derive(false, false, true, true);
        assert!(mode.show_toolbar);
        assert!(mode.enable_export);
        assert!(mode.enable_row_actions);
        assert!(mode.enable_detail_panel);
    }
}
