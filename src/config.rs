/// Configuration constants for the Scalr API
pub mod api {
    /// Default Scalr address
    pub const DEFAULT_ADDRESS: &str = "https://scalr.io";

    /// Base path for the IaC platform API v3
    pub const BASE_PATH: &str = "/api/iacp/v3/";

    /// JSON:API media type used for resource bodies
    pub const MEDIA_TYPE: &str = "application/vnd.api+json";

    /// Media type for raw uploads
    pub const OCTET_STREAM: &str = "application/octet-stream";

    /// Accept header for raw uploads
    pub const PLAIN_JSON: &str = "application/json";

    /// Default page size for list requests
    pub const DEFAULT_PAGE_SIZE: u32 = 100;

    /// Maximum concurrent page requests when fetching every page of a list
    pub const MAX_CONCURRENT_PAGE_REQUESTS: usize = 10;

    pub const ENVIRONMENTS: &str = "environments";
    pub const WORKSPACES: &str = "workspaces";
    pub const RUNS: &str = "runs";
    pub const VARIABLES: &str = "vars";
    pub const TAGS: &str = "tags";
    pub const TEAMS: &str = "iam/teams";
    pub const WEBHOOKS: &str = "integrations/webhooks";
    pub const PROVIDER_CONFIGURATIONS: &str = "provider-configurations";
    pub const PROVIDER_CONFIGURATION_PARAMETERS: &str = "provider-configuration-parameters";
    pub const CONFIGURATION_VERSIONS: &str = "configuration-versions";
    pub const STATE_VERSIONS: &str = "state-versions";
}

/// Environment variables that seed the default configuration
pub mod env {
    /// Address of the Scalr installation
    pub const ADDRESS: &str = "SCALR_ADDRESS";

    /// API token
    pub const TOKEN: &str = "SCALR_TOKEN";
}

/// Terraform CLI credentials file, used as the last token fallback
pub mod credentials {
    /// Credentials file name (Windows, relative to the config dir)
    pub const FILE_NAME: &str = "terraform.d/credentials.tfrc.json";

    /// Path to the credentials file on Unix (relative to HOME)
    pub const FILE_PATH_UNIX: &str = ".terraform.d/credentials.tfrc.json";
}

/// Retry and concurrency tuning
pub mod retry {
    use std::time::Duration;

    /// Minimum wait before a retry
    pub const WAIT_MIN: Duration = Duration::from_millis(100);

    /// Maximum wait before a retry
    pub const WAIT_MAX: Duration = Duration::from_millis(400);

    /// Maximum number of retries after the first attempt
    pub const MAX_RETRIES: u32 = 30;

    /// Default worker count for provider configuration parameter changes
    pub const NUM_PARALLEL: usize = 3;
}
