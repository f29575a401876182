//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands};
use crate::config::{load_settings, Settings};
use crate::error::{Error, Result, ResultExt};
use crate::http::Session;
use crate::params::{QueryParams, QueryValue};
use crate::types::JsonValue;
use tracing::debug;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command and print the result
    pub async fn run(&self) -> Result<()> {
        let value = self.execute().await?;
        println!("{}", serde_json::to_string_pretty(&value)?);
        Ok(())
    }

    /// Run the CLI command and return the result
    pub async fn execute(&self) -> Result<JsonValue> {
        let session = self.settings()?.into_session()?;
        debug!("Using {:?}", session);
        self.dispatch(&session).await
    }

    /// Settings file merged with command-line overrides
    pub fn settings(&self) -> Result<Settings> {
        let mut settings = match &self.cli.config {
            Some(path) => load_settings(path)?,
            None => Settings::default(),
        };

        if let Some(key) = &self.cli.api_key {
            settings.api_key = Some(key.clone());
        }
        if let Some(url) = &self.cli.base_url {
            settings.base_url = url.clone();
        }
        if let Some(timeout) = self.cli.timeout_seconds {
            settings.http.timeout_seconds = timeout;
        }
        if self.cli.simulate {
            settings.simulate = true;
        }

        settings.validate()?;
        Ok(settings)
    }

    async fn dispatch(&self, session: &Session) -> Result<JsonValue> {
        match &self.cli.command {
            Commands::Get {
                path,
                params,
                total_pages,
                direction,
            } => {
                let query = parse_params(params)?;
                match total_pages {
                    Some(total_pages) => {
                        let items = session
                            .get_pages(path, query, *total_pages, *direction)
                            .await?;
                        Ok(JsonValue::Array(items))
                    }
                    None => session.get(path, query).await,
                }
            }
            Commands::Post { path, body } => session.post(path, parse_body(body.as_deref())?).await,
            Commands::Put { path, body } => session.put(path, parse_body(body.as_deref())?).await,
            Commands::Delete { path } => session.delete(path).await,
        }
    }
}

/// Parse `key=value` arguments into query parameters
///
/// Keys ending in `[]` take a comma separated list.
pub fn parse_params(params: &[String]) -> Result<QueryParams> {
    let mut query = QueryParams::new();

    for param in params {
        let (key, value) = param.split_once('=').ok_or_else(|| {
            Error::invalid_value("param", format!("expected key=value, got \"{param}\""))
        })?;
        let key = key.trim();
        if key.is_empty() {
            return Err(Error::invalid_value("param", format!("empty key in \"{param}\"")));
        }

        let value = if key.ends_with("[]") {
            QueryValue::List(
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|v| !v.is_empty())
                    .map(String::from)
                    .collect(),
            )
        } else {
            QueryValue::Scalar(value.to_string())
        };
        query.set(key, value);
    }

    Ok(query)
}

/// Parse a JSON body argument, defaulting to an empty object
pub fn parse_body(body: Option<&str>) -> Result<JsonValue> {
    match body {
        Some(body) => serde_json::from_str::<JsonValue>(body).context("--body is not valid JSON"),
        None => Ok(JsonValue::Object(serde_json::Map::new())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::io::Write;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn runner(args: &[&str]) -> Runner {
        let mut argv = vec!["meraki-dashboard"];
        argv.extend_from_slice(args);
        Runner::new(Cli::try_parse_from(argv).unwrap())
    }

    #[test]
    fn test_parse_params_scalars_and_lists() {
        let query = parse_params(&[
            "perPage=3".to_string(),
            "serials[]=Q2A, Q2B,".to_string(),
            "t0=2024-01-01T00:00:00Z".to_string(),
        ])
        .unwrap();

        assert_eq!(query.get("perPage"), Some(&QueryValue::Scalar("3".to_string())));
        assert_eq!(
            query.get("serials[]"),
            Some(&QueryValue::List(vec!["Q2A".to_string(), "Q2B".to_string()]))
        );
        assert_eq!(
            query.get("t0"),
            Some(&QueryValue::Scalar("2024-01-01T00:00:00Z".to_string()))
        );
    }

    #[test]
    fn test_parse_params_rejects_missing_equals() {
        let err = parse_params(&["perPage".to_string()]).unwrap_err();
        assert!(matches!(err, Error::InvalidConfigValue { .. }));

        let err = parse_params(&["=3".to_string()]).unwrap_err();
        assert!(matches!(err, Error::InvalidConfigValue { .. }));
    }

    #[test]
    fn test_parse_body() {
        assert_eq!(parse_body(None).unwrap(), json!({}));
        assert_eq!(parse_body(Some(r#"{"mask": 24}"#)).unwrap(), json!({"mask": 24}));
        let err = parse_body(Some("{not json")).unwrap_err();
        assert!(err.to_string().starts_with("--body is not valid JSON"));
    }

    #[test]
    fn test_cli_parses_total_pages() {
        let cli = Cli::try_parse_from([
            "meraki-dashboard",
            "get",
            "/organizations",
            "--total-pages",
            "-1",
            "--direction",
            "prev",
        ])
        .unwrap();

        match cli.command {
            Commands::Get {
                total_pages,
                direction,
                ..
            } => {
                assert_eq!(total_pages, Some(crate::types::TotalPages::All));
                assert_eq!(direction, crate::types::Direction::Prev);
            }
            other => panic!("expected get, got {other:?}"),
        }

        assert!(Cli::try_parse_from(["meraki-dashboard", "get", "/x", "--total-pages", "0"]).is_err());
    }

    #[test]
    fn test_settings_overrides() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "api_key: from-file\nhttp:\n  timeout_seconds: 30").unwrap();
        let config = file.path().to_string_lossy().to_string();

        let settings = runner(&[
            "--config",
            config.as_str(),
            "--base-url",
            "http://localhost:1234",
            "--timeout-seconds",
            "5",
            "--simulate",
            "delete",
            "/x",
        ])
        .settings()
        .unwrap();

        assert_eq!(settings.api_key.as_deref(), Some("from-file"));
        assert_eq!(settings.base_url, "http://localhost:1234");
        assert_eq!(settings.http.timeout_seconds, 5);
        assert!(settings.simulate);
    }

    #[tokio::test]
    async fn test_execute_get_pages() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/organizations/1/networks"))
            .and(query_param("perPage", "5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": "N_1"}])))
            .expect(1)
            .mount(&server)
            .await;

        let value = runner(&[
            "--api-key",
            "k",
            "--base-url",
            server.uri().as_str(),
            "get",
            "/organizations/1/networks",
            "-p",
            "perPage=5",
            "--total-pages",
            "all",
        ])
        .execute()
        .await
        .unwrap();

        assert_eq!(value, json!([{"id": "N_1"}]));
    }

    #[tokio::test]
    async fn test_execute_simulated_put_sends_nothing() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let value = runner(&[
            "--api-key",
            "k",
            "--base-url",
            server.uri().as_str(),
            "--simulate",
            "put",
            "/networks/N_1/cellularGateway/subnetPool",
            "--body",
            r#"{"mask": 24}"#,
        ])
        .execute()
        .await
        .unwrap();

        assert!(value.is_null());
    }
}
