use log::Level;
use web_sys::window;

/// Prefix of the `localStorage` keys that override settings.
pub const STORAGE_PREFIX: &str = "formchart_";

/// Keys read from `localStorage`, without the prefix.
pub const STORAGE_KEYS: [&str; 5] = [
    "endpoint",
    "form_selector",
    "graph_selector",
    "toasts_selector",
    "log_level",
];

/// Page settings
#[derive(Debug, Clone, PartialEq)]
pub struct AppSettings {
    /// Form taken over by the controller
    pub form_selector: String,

    /// Element the chart is drawn into
    pub graph_selector: String,

    /// Container of pre-rendered toasts; its presence marks the index page
    pub toasts_selector: String,

    /// Forced endpoint. When unset it is read from the page
    pub endpoint: Option<String>,

    /// Default log level for the application
    pub log_level: Level,

    /// Enable debug mode
    pub debug_mode: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            form_selector: "#main_form".to_string(),
            graph_selector: "#graph".to_string(),
            toasts_selector: "#toasts-container".to_string(),
            endpoint: None,
            log_level: Level::Info,
            debug_mode: false,
        }
    }
}

impl AppSettings {
    /// Create settings from the window location and `localStorage`
    pub fn from_environment() -> Self {
        let mut settings = Self::default();

        if let Some(window) = window() {
            if let Ok(hostname) = window.location().hostname() {
                settings.apply_hostname(&hostname);
            }

            if let Ok(Some(storage)) = window.local_storage() {
                for key in STORAGE_KEYS {
                    let stored = format!("{}{}", STORAGE_PREFIX, key);
                    if let Ok(Some(value)) = storage.get_item(&stored) {
                        settings.apply_override(key, &value);
                    }
                }
            }
        }

        settings
    }

    /// Development hosts get debug mode and verbose logging.
    pub fn apply_hostname(&mut self, hostname: &str) {
        self.debug_mode = hostname == "localhost" || hostname == "127.0.0.1";
        if self.debug_mode {
            self.log_level = Level::Debug;
        }
    }

    /// Apply one stored value. Unknown keys and unparsable values are
    /// ignored; returns whether anything changed.
    pub fn apply_override(&mut self, key: &str, value: &str) -> bool {
        let value = value.trim();
        if value.is_empty() {
            return false;
        }

        match key {
            "endpoint" => self.endpoint = Some(value.to_string()),
            "form_selector" => self.form_selector = value.to_string(),
            "graph_selector" => self.graph_selector = value.to_string(),
            "toasts_selector" => self.toasts_selector = value.to_string(),
            "log_level" => match value.parse::<Level>() {
                Ok(level) => self.log_level = level,
                Err(_) => return false,
            },
            _ => return false,
        }
        true
    }
}

// Global settings instance using thread_local
use std::cell::RefCell;

thread_local! {
    static SETTINGS: RefCell<AppSettings> = RefCell::new(AppSettings::default());
}

/// Get a copy of the current settings
pub fn get_settings() -> AppSettings {
    SETTINGS.with(|s| s.borrow().clone())
}

/// Initialize settings (call this at app startup)
pub fn init_settings() {
    SETTINGS.with(|s| {
        *s.borrow_mut() = AppSettings::from_environment();
    });
}
