use crate::config;

pub fn load_settings() -> config::Settings {
    match config::Settings::load() {
        Ok(s) => {
            if let Err(msg) = s.validate() {
                eprintln!("m3u-builder: invalid config, using defaults: {msg}");
                config::Settings::default()
            } else {
                s
            }
        }
        Err(e) => {
            // A broken config file should not keep the scan from running.
            eprintln!("m3u-builder: failed to load config, using defaults: {e}");
            config::Settings::default()
        }
    }
}
