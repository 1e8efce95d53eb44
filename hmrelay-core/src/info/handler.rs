use crate::conf::RelayConfig;
use http::{StatusCode, header};
use pingora::prelude::Session;
use pingora::{Custom, Error};
use pingora_http::ResponseHeader;
use serde::Serialize;
use std::str::FromStr;
use std::time::Instant;

#[derive(Debug, PartialEq)]
pub enum InfoEndpoint {
    Info,
}

impl FromStr for InfoEndpoint {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "/info" => Ok(InfoEndpoint::Info),
            _ => Err("unknown endpoint"),
        }
    }
}

/// Body of `GET /info`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelayInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub uptime_seconds: u64,
    pub incoming_port: u16,
    pub metron_port: u16,
}

pub struct InfoHandler {
    started_at: Instant,
    incoming_port: u16,
    metron_port: u16,
}

impl InfoHandler {
    pub fn new(config: &RelayConfig) -> Self {
        Self {
            started_at: Instant::now(),
            incoming_port: config.incoming_port,
            metron_port: config.metron_port,
        }
    }

    pub fn info(&self) -> RelayInfo {
        RelayInfo {
            name: "hmrelay",
            version: env!("CARGO_PKG_VERSION"),
            uptime_seconds: self.started_at.elapsed().as_secs(),
            incoming_port: self.incoming_port,
            metron_port: self.metron_port,
        }
    }

    pub(crate) async fn handle(&self, session: &mut Session, path: &str) -> pingora::Result<bool> {
        let Ok(endpoint) = path.parse::<InfoEndpoint>() else {
            session.respond_error(StatusCode::NOT_FOUND.as_u16()).await?;
            return Ok(true);
        };

        match endpoint {
            InfoEndpoint::Info => {
                // Return early when not a GET request.
                if session.req_header().method != http::Method::GET {
                    let mut resp = ResponseHeader::build(StatusCode::METHOD_NOT_ALLOWED, None)?;
                    resp.insert_header(header::ALLOW, "GET")?;
                    resp.insert_header(header::CONTENT_LENGTH, "0")?;
                    session.write_response_header(Box::new(resp), true).await?;
                    return Ok(true);
                }

                let body = serde_json::to_vec(&self.info())
                    .map_err(|_| Error::new(Custom("json serialization failed")))?;

                self.send_json_response(session, StatusCode::OK, body)
                    .await?;
                Ok(true)
            }
        }
    }

    async fn send_json_response(
        &self,
        session: &mut Session,
        status: StatusCode,
        body: Vec<u8>,
    ) -> pingora::Result<()> {
        let mut resp = ResponseHeader::build(status, None)?;
        resp.insert_header(header::CONTENT_TYPE, "application/json")?;
        resp.insert_header(header::CONTENT_LENGTH, body.len().to_string())?;

        session.write_response_header(Box::new(resp), false).await?;
        session.write_response_body(Some(body.into()), true).await?;

        Ok(())
    }
}
