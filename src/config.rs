use crate::crypto::{digest, Algorithm, AppKey, SigningContext};

/// The configuration parameters for the application.
#[derive(clap::Parser, Clone)]
pub struct Config {
    /// The signing secret shared with the slack workspace that calls this application.
    #[clap(long, env)]
    pub signing_secret: String,

    /// The keyed digest used to verify inbound slack requests. Slack only signs with hmac-sha256.
    #[clap(long, env, default_value = "hmac-sha256")]
    pub signing_algorithm: String,

    /// The application id registered with the transit data API.
    #[clap(long, env)]
    pub transit_app_id: String,

    /// The application key registered with the transit data API.
    #[clap(long, env)]
    pub transit_app_key: String,

    /// The base URL of the transit bus API.
    #[clap(long, env, default_value = "https://ptx.transportdata.tw/MOTC/v2/Bus")]
    pub transit_api_url: String,

    /// The city queried on the transit API.
    #[clap(long, env, default_value = "Taipei")]
    pub transit_city: String,

    /// The base URL of the slack web API.
    #[clap(long, env, default_value = "https://slack.com/api/")]
    pub slack_api_url: String,

    /// Prefix of the key under which each user's delegated token is stored.
    #[clap(long, env, default_value = "slack.legacy.token")]
    pub token_namespace: String,

    /// The connection URL for the credentials database. Tokens are read from the
    /// environment when absent.
    #[clap(long, env)]
    pub database_url: Option<String>,

    /// The name for the credentials database.
    #[clap(long, env, default_value = "tasks")]
    pub database_name: String,

    /// The PORT number for the server address.
    #[clap(long, env, default_value_t = 8080)]
    pub port: u16,
}

impl Config {
    pub fn signing_context(&self) -> Result<SigningContext, digest::Error> {
        let algorithm = self.signing_algorithm.parse::<Algorithm>()?;
        if algorithm != Algorithm::HmacSha256 {
            return Err(digest::Error::CryptoUnavailable(self.signing_algorithm.clone()));
        }
        SigningContext::new(&self.signing_secret, algorithm)
    }

    pub fn transit_key(&self) -> AppKey {
        AppKey::new(&self.transit_app_id, &self.transit_app_key)
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    fn parse(args: &[&str]) -> Config {
        let mut argv = vec![
            "slack-task-relay",
            "--signing-secret",
            "s3cr3t",
            "--transit-app-id",
            "id",
            "--transit-app-key",
            "key",
        ];
        argv.extend_from_slice(args);
        Config::try_parse_from(argv).unwrap()
    }

    #[test]
    fn it_should_build_the_default_signing_context() {
        let config = parse(&[]);

        let context = config.signing_context().unwrap();

        assert_eq!(context.algorithm(), Algorithm::HmacSha256);
        assert_eq!(context.secret(), b"s3cr3t");
    }

    #[test]
    fn it_should_reject_an_unknown_algorithm() {
        let config = parse(&["--signing-algorithm", "md5"]);

        match config.signing_context() {
            Err(digest::Error::CryptoUnavailable(name)) => assert_eq!(name, "md5"),
            _ => unreachable!(),
        }
    }

    #[test]
    fn it_should_only_verify_inbound_requests_with_hmac_sha256() {
        let config = parse(&["--signing-algorithm", "hmac-sha1"]);

        match config.signing_context() {
            Err(digest::Error::CryptoUnavailable(name)) => assert_eq!(name, "hmac-sha1"),
            _ => unreachable!(),
        }

        let config = parse(&["--signing-algorithm", "HmacSHA256"]);
        assert_eq!(config.signing_context().unwrap().algorithm(), Algorithm::HmacSha256);
    }

    #[test]
    fn it_should_reject_an_empty_secret() {
        let mut config = parse(&[]);
        config.signing_secret = String::new();

        assert_eq!(config.signing_context().unwrap_err(), digest::Error::InvalidKey);
    }

    #[test]
    fn it_should_build_the_transit_key() {
        let key = parse(&[]).transit_key();

        assert_eq!(key.id, "id");
        assert_eq!(key.key, "key");
        assert!(key.is_complete());
    }
}
