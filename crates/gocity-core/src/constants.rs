/// Bucket holding the analysis artifacts when `GCS_BUCKET` is not set.
pub const DEFAULT_BUCKET: &str = "gocity";

/// Extension appended to a project name to form its object key.
pub const OBJECT_KEY_EXTENSION: &str = "json";

pub const DEFAULT_SERVER_PORT: u16 = 4000;
