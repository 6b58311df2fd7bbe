use axum::http::Request;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use tower_governor::{GovernorError, key_extractor::KeyExtractor};

/// Client IP for login throttling.
///
/// Keys on the peer address. X-Forwarded-For and X-Real-IP are only read when
/// `trust_proxy_headers` is set, i.e. when a reverse proxy in front of the
/// service overwrites them. Requests with no identifiable address share the
/// localhost bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoginIpKeyExtractor {
    pub trust_proxy_headers: bool,
}

fn forwarded_ip<T>(req: &Request<T>) -> Option<IpAddr> {
    let xff = req.headers().get("x-forwarded-for")?.to_str().ok()?;
    xff.split(',').next()?.trim().parse().ok()
}

fn real_ip<T>(req: &Request<T>) -> Option<IpAddr> {
    req.headers().get("x-real-ip")?.to_str().ok()?.trim().parse().ok()
}

impl KeyExtractor for LoginIpKeyExtractor {
    type Key = IpAddr;

    fn extract<T>(&self, req: &Request<T>) -> Result<Self::Key, GovernorError> {
        let peer = || {
            req.extensions()
                .get::<axum::extract::ConnectInfo<SocketAddr>>()
                .map(|info| info.0.ip())
        };

        let proxied = if self.trust_proxy_headers {
            forwarded_ip(req).or_else(|| real_ip(req))
        } else {
            None
        };

        Ok(proxied
            .or_else(peer)
            .unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(trust_proxy_headers: bool, req: Request<()>) -> IpAddr {
        LoginIpKeyExtractor { trust_proxy_headers }.extract(&req).unwrap()
    }

    fn forwarded_request(peer: &str) -> Request<()> {
        let mut req = Request::builder()
            .header("x-forwarded-for", "10.0.0.7, 172.16.0.1")
            .header("x-real-ip", "10.0.0.9")
            .body(())
            .unwrap();
        req.extensions_mut()
            .insert(axum::extract::ConnectInfo(peer.parse::<SocketAddr>().unwrap()));
        req
    }

    #[test]
    fn peer_address_wins_without_a_trusted_proxy() {
        let req = forwarded_request("192.168.1.20:40000");
        assert_eq!(key(false, req), "192.168.1.20".parse::<IpAddr>().unwrap());
    }

    #[test]
    fn first_forwarded_address_wins_behind_a_trusted_proxy() {
        let req = forwarded_request("192.168.1.20:40000");
        assert_eq!(key(true, req), "10.0.0.7".parse::<IpAddr>().unwrap());
    }

    #[test]
    fn unknown_clients_share_localhost() {
        let req = Request::builder().body(()).unwrap();
        assert_eq!(key(true, req), IpAddr::V4(Ipv4Addr::LOCALHOST));
    }
}
