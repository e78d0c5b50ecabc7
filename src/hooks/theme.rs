//! Theme state for the presentation layer.

use crate::services::ThemeService;
use crate::types::{Theme, ThemeMode};

/// Current theme plus the actions that change it.
pub struct ThemeState {
    service: ThemeService,
    theme: Theme,
}

impl ThemeState {
    pub fn new(service: ThemeService) -> Self {
        let theme = service.current_theme();
        Self { service, theme }
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn is_dark_mode(&self) -> bool {
        self.theme.mode == ThemeMode::Dark
    }

    pub fn toggle_theme(&mut self) {
        self.service.toggle();
        self.theme = self.service.current_theme();
    }

    pub fn set_theme_mode(&mut self, mode: ThemeMode) {
        self.service.set_mode(mode);
        self.theme = self.service.current_theme();
    }
}
