use crate::info::handler::InfoHandler;
use async_trait::async_trait;
use pingora::prelude::{HttpPeer, ProxyHttp, Session};
use pingora::{Custom, Error};

/// Terminal HTTP service answering the info endpoint; never proxies.
pub struct InfoGateway {
    info_handler: InfoHandler,
}

impl InfoGateway {
    pub fn new(info_handler: InfoHandler) -> Self {
        Self { info_handler }
    }
}

#[async_trait]
impl ProxyHttp for InfoGateway {
    type CTX = ();

    fn new_ctx(&self) -> Self::CTX {}

    async fn upstream_peer(
        &self,
        _session: &mut Session,
        _ctx: &mut Self::CTX,
    ) -> pingora::Result<Box<HttpPeer>> {
        Err(Error::new(Custom("InfoGateway attempted to proxy upstream (bug)")))
    }

    async fn request_filter(
        &self,
        session: &mut Session,
        _ctx: &mut Self::CTX,
    ) -> pingora::Result<bool> {
        let path = session.req_header().uri.path().to_owned();
        self.info_handler.handle(session, &path).await
    }
}
