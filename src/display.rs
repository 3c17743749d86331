//! Decides whether `Plot::show` should open a window.

use serde::{Deserialize, Serialize};
use std::env;

/// Environment variable that forces the display backend (`agg`/`headless`/`none` or `window`).
pub const BACKEND_ENV: &str = "MOO_VIZ_BACKEND";

/// Where figures are displayed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Native window.
    Window,
    /// Non-interactive: `show` renders nothing.
    Headless,
}

impl Backend {
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "agg" | "headless" | "none" => Backend::Headless,
            _ => Backend::Window,
        }
    }

    pub fn is_interactive(self) -> bool {
        matches!(self, Backend::Window)
    }
}

/// True inside a Jupyter kernel (evcxr for Rust), where figures are displayed implicitly.
pub fn in_notebook() -> bool {
    env::var_os("EVCXR_IS_RUNTIME").is_some() || env::var_os("JPY_PARENT_PID").is_some()
}

/// Backend from `MOO_VIZ_BACKEND`, else a window when a display is available.
pub fn detect_backend() -> Backend {
    match env::var(BACKEND_ENV) {
        Ok(name) => Backend::from_name(&name),
        Err(_) if has_display() => Backend::Window,
        Err(_) => Backend::Headless,
    }
}

fn has_display() -> bool {
    cfg!(any(target_os = "windows", target_os = "macos"))
        || env::var_os("DISPLAY").is_some()
        || env::var_os("WAYLAND_DISPLAY").is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_names() {
        assert_eq!(Backend::from_name("Agg"), Backend::Headless);
        assert_eq!(Backend::from_name("none"), Backend::Headless);
        assert_eq!(Backend::from_name("window"), Backend::Window);
        assert!(!Backend::Headless.is_interactive());
    }
}
