// Application constants
pub const APP_NAME:        &str = env!("CARGO_PKG_NAME");
pub const APP_VERSION:     &str = env!("CARGO_PKG_VERSION");
pub const APP_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

// Platform directory identifiers, see `directories::ProjectDirs::from`
pub const APP_QUALIFIER:    &str = "dev";
pub const APP_ORGANIZATION: &str = "flame-chart";
pub const APP_DIR_NAME:     &str = "flame_chart";

/// Style file picked up from the config dir when `--style` is not given
pub const STYLE_FILE_NAME: &str = "style.toml";
