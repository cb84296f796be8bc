//! Configuration module

mod site;

pub use site::AdminConfig;
pub use site::HighlightConfig;
pub use site::ProjectConfig;
pub use site::SiteConfig;
pub use site::SlugPolicy;
