use log::{debug, trace};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::{Error, Operation};

/// Thin JSON GET client shared by the geocoding and daily services
///
/// Every request carries its own deadline. Nothing is retried here.
#[derive(Debug, Clone)]
pub struct JsonFetcher {
    client: Client,
}

pub type QueryParams = Vec<(&'static str, String)>;

impl JsonFetcher {
    pub fn new(user_agent: &str) -> Result<Self, Error> {
        let client = Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(Error::Client)?;
        Ok(Self { client })
    }

    pub async fn fetch_json<T: DeserializeOwned>(
        &self,
        operation: Operation,
        url: &str,
        params: &QueryParams,
        timeout: Duration,
    ) -> Result<T, Error> {
        let query = describe_query(params);
        debug!("requesting {}: {}?{}", operation, url, query);

        let response = self
            .client
            .get(url)
            .query(params)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| transport_error(operation, &query, timeout, e))?;

        trace!("{} responded with {}", operation, response.status());
        let response = response
            .error_for_status()
            .map_err(|e| transport_error(operation, &query, timeout, e))?;

        response.json::<T>().await.map_err(|e| {
            if e.is_decode() {
                Error::DataUnavailable {
                    operation,
                    query: query.clone(),
                    reason: format!("undecodable response body: {}", e),
                }
            } else {
                transport_error(operation, &query, timeout, e)
            }
        })
    }
}

fn transport_error(
    operation: Operation,
    query: &str,
    timeout: Duration,
    err: reqwest::Error,
) -> Error {
    if err.is_timeout() {
        Error::UpstreamTimeout {
            operation,
            query: query.to_string(),
            timeout,
        }
    } else {
        Error::UpstreamUnavailable {
            operation,
            query: query.to_string(),
            source: err,
        }
    }
}

/// Human readable `k=v&k=v` form of the query, used in error context
pub(crate) fn describe_query(params: &QueryParams) -> String {
    params
        .iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect::<Vec<_>>()
        .join("&")
}
