// File: ./src/client/core.rs
use crate::client::cert::https_connector;
use crate::error::{Error, Result};
use crate::model::{Calendar, CalendarResponse};

use http::header::{ACCEPT, CONTENT_TYPE, USER_AGENT};
use http::{HeaderValue, Method, Request, Uri};
use http_body_util::BodyExt;
use hyper_rustls::HttpsConnector;
use hyper_util::client::legacy::Client;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::rt::TokioExecutor;
use tower::ServiceExt;
use tower_http::auth::AddAuthorization;
use tracing::{debug, info};

type HttpsClient = AddAuthorization<Client<HttpsConnector<HttpConnector>, String>>;

pub const CONTRIBUTION_QUERY: &str = "query($login: String!) {
  user(login: $login) {
    contributionsCollection {
      contributionCalendar {
        totalContributions
        weeks {
          contributionDays {
            date
            contributionCount
            weekday
          }
        }
      }
    }
  }
}";

const CLIENT_AGENT: &str = concat!("contrib-graph/", env!("CARGO_PKG_VERSION"));

#[derive(Clone, Debug)]
pub struct GraphQlClient {
    endpoint: Uri,
    client: HttpsClient,
}

impl GraphQlClient {
    /// `token` is sent as a bearer credential on every request.
    pub fn new(endpoint: &str, token: &str) -> Result<Self> {
        let endpoint: Uri = endpoint
            .parse()
            .map_err(|e: http::uri::InvalidUri| {
                Error::InvalidConfig(format!("invalid endpoint {:?}: {}", endpoint, e))
            })?;

        // AddAuthorization panics on a token that is not a valid header value
        HeaderValue::try_from(format!("Bearer {}", token)).map_err(|_| {
            Error::InvalidConfig("token contains characters not allowed in a header".to_string())
        })?;

        let connector = https_connector(endpoint.scheme_str() == Some("https"))?;
        let http_client: Client<_, String> = Client::builder(TokioExecutor::new()).build(connector);
        let client = AddAuthorization::bearer(http_client, token);

        Ok(Self { endpoint, client })
    }

    /// Single POST of the calendar query; any failure is returned as-is,
    /// there is no retry.
    pub async fn fetch_calendar(&self, login: &str) -> Result<Calendar> {
        let payload = serde_json::json!({
            "query": CONTRIBUTION_QUERY,
            "variables": { "login": login },
        });

        let req = Request::builder()
            .method(Method::POST)
            .uri(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .header(USER_AGENT, CLIENT_AGENT)
            .body(payload.to_string())
            .map_err(|e| Error::Connection(e.to_string()))?;

        info!(login, endpoint = %self.endpoint, "requesting contribution calendar");

        let response = self
            .client
            .clone()
            .oneshot(req)
            .await
            .map_err(|e| Error::Connection(format!("{:?}", e)))?;

        let status = response.status();
        let body = response
            .into_body()
            .collect()
            .await
            .map_err(|e| Error::Connection(format!("reading body: {}", e)))?
            .to_bytes();
        debug!(%status, bytes = body.len(), "response received");

        if !status.is_success() {
            return Err(Error::Transport {
                status,
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        let calendar = CalendarResponse::from_slice(&body)?.into_calendar()?;
        info!(
            weeks = calendar.weeks.len(),
            days = calendar.day_count(),
            total = calendar.total,
            "contribution calendar parsed"
        );
        Ok(calendar)
    }
}
