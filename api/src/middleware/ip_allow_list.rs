//! IP allow-list middleware
//!
//! Rejects requests whose peer address is not on the configured list:
//! - An empty list allows every client
//! - Loopback addresses are always allowed
//! - Otherwise the peer IP must match an entry exactly
//!
//! Only the socket peer address is checked. Forwarding headers are ignored,
//! so behind a reverse proxy the proxy's address is what must be listed.

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpResponse,
};
use futures_util::future::LocalBoxFuture;
use std::{
    collections::HashSet,
    future::{ready, Ready},
    net::IpAddr,
    rc::Rc,
    sync::Arc,
};

use otp_shared::errors::{error_codes, ErrorResponse};

/// Allow-list middleware factory
#[derive(Clone, Default)]
pub struct IpAllowList {
    allowed: Arc<HashSet<IpAddr>>,
}

impl IpAllowList {
    /// Build the list from configured entries, skipping unparseable ones
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut allowed = HashSet::new();
        for entry in entries {
            let entry = entry.as_ref().trim();
            if entry.is_empty() {
                continue;
            }
            match entry.parse::<IpAddr>() {
                Ok(ip) => {
                    allowed.insert(ip);
                }
                Err(_) => tracing::warn!(entry = %entry, "Ignoring invalid allow-list entry"),
            }
        }

        tracing::info!(entries = allowed.len(), "IP allow-list configured");
        Self {
            allowed: Arc::new(allowed),
        }
    }

    /// Allow every client
    pub fn allow_all() -> Self {
        Self::default()
    }

    /// Whether a request from `ip` may pass
    pub fn permits(&self, ip: Option<IpAddr>) -> bool {
        if self.allowed.is_empty() {
            return true;
        }
        match ip {
            Some(ip) => ip.is_loopback() || self.allowed.contains(&ip),
            None => false,
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for IpAllowList
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = IpAllowListService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(IpAllowListService {
            service: Rc::new(service),
            list: self.clone(),
        }))
    }
}

/// Allow-list middleware service implementation
pub struct IpAllowListService<S> {
    service: Rc<S>,
    list: IpAllowList,
}

impl<S, B> Service<ServiceRequest> for IpAllowListService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    actix_web::dev::forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let peer_ip = req.peer_addr().map(|addr| addr.ip());

        if !self.list.permits(peer_ip) {
            tracing::warn!(
                peer = ?peer_ip,
                path = %req.path(),
                event = "ip_rejected",
                "Request from IP outside the allow-list"
            );
            let response = HttpResponse::Forbidden()
                .json(ErrorResponse::new(error_codes::IP_NOT_ALLOWED, "IP not allowed"));
            return Box::pin(async move { Ok(req.into_response(response).map_into_right_body()) });
        }

        let service = Rc::clone(&self.service);
        Box::pin(async move {
            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ip(s: &str) -> Option<IpAddr> {
        Some(s.parse().unwrap())
    }

    #[test]
    fn test_empty_list_allows_everyone() {
        let list = IpAllowList::new(Vec::<String>::new());
        assert!(list.permits(ip("203.0.113.9")));
        assert!(list.permits(None));
    }

    #[test]
    fn test_listed_and_loopback_allowed() {
        let list = IpAllowList::new(["10.0.0.5", " 192.168.1.20 "]);

        assert!(list.permits(ip("10.0.0.5")));
        assert!(list.permits(ip("192.168.1.20")));
        assert!(list.permits(ip("127.0.0.1")));
        assert!(list.permits(ip("::1")));
        assert!(!list.permits(ip("10.0.0.6")));
        assert!(!list.permits(None));
    }

    #[test]
    fn test_invalid_entries_ignored() {
        let list = IpAllowList::new(["not-an-ip", "10.0.0.0/8", "10.0.0.5"]);

        assert!(list.permits(ip("10.0.0.5")));
        assert!(!list.permits(ip("10.1.2.3")));
    }
}
