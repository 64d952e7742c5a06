//! Constants used throughout the dockerdev application

/// Gem manifest at the project root
pub const GEMFILE: &str = "Gemfile";

/// Database connection config rewritten by the provisioning step
pub const DATABASE_CONFIG: &str = "config/database.yml";

/// Application config receiving environment injections
pub const APPLICATION_CONFIG: &str = "config/application.rb";

/// Route config receiving route injections
pub const ROUTES_CONFIG: &str = "config/routes.rb";

/// Anchor line inside config/application.rb after which environment
/// configuration is injected
pub const APPLICATION_ANCHOR: &str = "class Application < Rails::Application";

/// Anchor line inside config/routes.rb after which routes are injected
pub const ROUTES_ANCHOR: &str = "Rails.application.routes.draw do";

/// STDIN indicator for the --options argument
pub const STDIN_INDICATOR: &str = "-";

/// Ruby version baked into the generated compose file
pub const RUBY_VERSION: &str = "2.7.2";

/// Exit codes
pub mod exit_codes {
    pub const FAILURE: i32 = 1;
}

/// Verbosity levels
pub mod verbosity {
    pub const OFF: u8 = 0;
    pub const INFO: u8 = 1;
    pub const DEBUG: u8 = 2;
    pub const TRACE: u8 = 3;
}
