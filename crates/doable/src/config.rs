use std::env;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the SQLite database file (default: "data/app.db")
    pub sqlite_path: String,
    /// Object storage settings; `None` disables the upload endpoint.
    pub s3: Option<S3Config>,
}

/// Connection settings for the S3-compatible object store.
#[derive(Debug, Clone)]
pub struct S3Config {
    /// Custom endpoint for S3-compatible providers. When absent the AWS
    /// virtual-hosted URL format is used.
    pub endpoint: Option<String>,
    pub region: String,
    pub bucket: String,
    pub access_key_id: String,
    pub secret_access_key: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `SQLITE_PATH` - SQLite database path (default: "data/app.db")
    /// - `S3_ENDPOINT` - custom object storage endpoint (optional)
    /// - `S3_REGION` - object storage region (default: "us-east-1")
    /// - `S3_BUCKET_ID` / `S3_BUCKET` - bucket name
    /// - `S3_ACCESS_KEY_ID` / `S3_SECRET_ACCESS_KEY` - credentials
    ///
    /// Uploads stay disabled unless bucket and both credentials are set.
    pub fn from_env() -> Self {
        Self {
            sqlite_path: env::var("SQLITE_PATH").unwrap_or_else(|_| "data/app.db".to_string()),
            s3: S3Config::from_env(),
        }
    }
}

impl S3Config {
    fn from_env() -> Option<Self> {
        let bucket = env::var("S3_BUCKET_ID")
            .or_else(|_| env::var("S3_BUCKET"))
            .ok()?;
        let access_key_id = env::var("S3_ACCESS_KEY_ID").ok()?;
        let secret_access_key = env::var("S3_SECRET_ACCESS_KEY").ok()?;

        Some(Self {
            endpoint: env::var("S3_ENDPOINT").ok(),
            region: env::var("S3_REGION").unwrap_or_else(|_| "us-east-1".to_string()),
            bucket,
            access_key_id,
            secret_access_key,
        })
    }
}
