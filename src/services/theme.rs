//! Persisted light/dark preference and the static color tables.

use crate::store::SharedStore;
use crate::types::{Theme, ThemeColors, ThemeMode};
use tracing::{error, warn};

/// Storage key holding `"light"` or `"dark"`.
pub const THEME_KEY: &str = "theme_mode";

pub const LIGHT_COLORS: ThemeColors = ThemeColors {
    background: "#ffffff",
    surface: "#f8fafc",
    primary: "#4f46e5",
    secondary: "#7c3aed",
    text: "#1f2937",
    text_secondary: "#6b7280",
    border: "#e5e7eb",
    success: "#059669",
    error: "#dc2626",
    overlay: "rgba(0, 0, 0, 0.3)",
};

pub const DARK_COLORS: ThemeColors = ThemeColors {
    background: "#1a1a1a",
    surface: "#2d2d2d",
    primary: "#6366f1",
    secondary: "#8b5cf6",
    text: "#ffffff",
    text_secondary: "#a1a1aa",
    border: "#404040",
    success: "#10b981",
    error: "#ef4444",
    overlay: "rgba(0, 0, 0, 0.5)",
};

/// Palette for a mode.
pub fn colors_for_mode(mode: ThemeMode) -> ThemeColors {
    match mode {
        ThemeMode::Light => LIGHT_COLORS,
        ThemeMode::Dark => DARK_COLORS,
    }
}

/// Current theme mode, loaded once and written through on change.
///
/// Preference writes are best effort: a failed write is logged and the
/// in-memory mode still changes.
pub struct ThemeService {
    store: SharedStore,
    current: ThemeMode,
}

impl ThemeService {
    /// Read the stored mode, falling back to light.
    pub fn load(store: SharedStore) -> Self {
        let current = match store.get(THEME_KEY) {
            Ok(Some(raw)) => ThemeMode::from_str(&raw).unwrap_or_else(|| {
                warn!(value = %raw, "Unknown stored theme mode, using light");
                ThemeMode::Light
            }),
            Ok(None) => ThemeMode::Light,
            Err(e) => {
                error!(error = %e, "Error loading theme");
                ThemeMode::Light
            }
        };
        Self { store, current }
    }

    pub fn mode(&self) -> ThemeMode {
        self.current
    }

    pub fn current_theme(&self) -> Theme {
        Theme {
            mode: self.current,
            colors: colors_for_mode(self.current),
        }
    }

    pub fn set_mode(&mut self, mode: ThemeMode) {
        self.current = mode;
        if let Err(e) = self.store.set(THEME_KEY, mode.as_str()) {
            error!(error = %e, mode = %mode, "Error saving theme");
        }
    }

    pub fn toggle(&mut self) {
        self.set_mode(self.current.toggled());
    }
}
