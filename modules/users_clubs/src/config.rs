use serde::{Deserialize, Serialize};

/// Configuration for the users_clubs module
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UsersClubsConfig {
    /// Page size used by `list` when the caller gives no valid limit.
    #[serde(default = "default_page_size")]
    pub default_page_size: u64,
}

impl Default for UsersClubsConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
        }
    }
}

fn default_page_size() -> u64 {
    10
}
