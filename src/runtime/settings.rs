use crate::config;

/// Load settings, falling back to defaults when the file or environment is
/// unusable. The second value describes why defaults were used.
pub fn load_settings() -> (config::Settings, Option<String>) {
    match config::Settings::load() {
        Ok(s) => {
            if let Err(msg) = s.validate() {
                (config::Settings::default(), Some(format!("invalid config: {msg}")))
            } else {
                (s, None)
            }
        }
        // Config is optional; failures should not prevent autoloading.
        Err(e) => (
            config::Settings::default(),
            Some(format!("failed to load config: {e}")),
        ),
    }
}
