//! Theme context
//!
//! Explicit context object for the light/dark flag: read once at startup,
//! mutated only through [`ThemeContext::set`], observed through a watch
//! channel. Persisted to a small file, the local-storage analog.

use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

use tokio::sync::watch;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("unknown theme: {}", other)),
        }
    }
}

pub struct ThemeContext {
    state: watch::Sender<Theme>,
    path: PathBuf,
}

impl ThemeContext {
    /// Read the persisted theme once; defaults to dark
    pub fn load(path: PathBuf) -> Self {
        let theme = fs::read_to_string(&path)
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(Theme::Dark);

        let (state, _) = watch::channel(theme);
        Self { state, path }
    }

    pub fn current(&self) -> Theme {
        *self.state.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<Theme> {
        self.state.subscribe()
    }

    /// Single mutation entry point; persists and notifies subscribers
    pub fn set(&self, theme: Theme) {
        if let Err(e) = fs::write(&self.path, theme.as_str()) {
            tracing::warn!(path = %self.path.display(), error = %e, "Failed to persist theme");
        }
        self.state.send_replace(theme);
    }

    pub fn toggle(&self) -> Theme {
        let next = match self.current() {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        };
        self.set(next);
        next
    }
}
