use std::path::PathBuf;

/// The configuration parameters for the application.
///
/// These can either be passed on the command line, or pulled from environment variables.
/// The latter is preferred as environment variables are one of the recommended ways to
/// get configuration from Kubernetes Secrets in deployment.
///
/// For development convenience, these can also be read from a `.env` file in the working
/// directory where the application is started.
///
/// If a required configuration value is missing, startup fails with a help message
/// naming the value. There is no graceful degradation.
#[derive(clap::Parser, Clone, Default)]
pub struct Config {
    /// The connection URL for the Postgres database this application should use.
    #[clap(long, env)]
    pub database_url: String,

    /// The HMAC signing and verification key used for login tokens (JWTs).
    ///
    /// There is no required structure or format to this key as it's just fed into a hash function.
    /// In practice, it should be a long, random string.
    #[clap(long, env)]
    pub hmac_key: String,

    /// The port to serve the API on.
    #[clap(long, env, default_value = "3025")]
    pub port: u16,

    /// If set, logs are appended to this file instead of stderr.
    #[clap(long, env)]
    pub log_file: Option<PathBuf>,
}
