//! Endpoint selection between the public and intranet backends.
//!
//! Exactly two endpoints exist: the public documentation site and the
//! authenticated intranet. Which one serves a request is a pure function of
//! credential presence, evaluated fresh on every call. The credential is read
//! once at startup, so mid-process rotation is not observable here.

use crate::auth::Credential;
use url::Url;

/// A search/content backend: base URL plus its authentication requirement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub base_url: Url,
    pub requires_auth: bool,
}

impl Endpoint {
    /// URL of the search API at this endpoint.
    pub fn search_url(&self) -> Url {
        // base_url is validated to have a host and path "/", join cannot fail
        self.base_url
            .join("searchapi/")
            .unwrap_or_else(|_| self.base_url.clone())
    }

    /// Host of this endpoint, for scoping credentials to it.
    pub fn host(&self) -> Option<&str> {
        self.base_url.host_str()
    }
}

/// The two fixed endpoint instances.
#[derive(Debug, Clone)]
pub struct Endpoints {
    public: Endpoint,
    intranet: Endpoint,
}

impl Endpoints {
    pub fn new(public_base: Url, intranet_base: Url) -> Self {
        Self {
            public: Endpoint { base_url: public_base, requires_auth: false },
            intranet: Endpoint { base_url: intranet_base, requires_auth: true },
        }
    }

    /// Pick the endpoint for a request: authenticated callers get the
    /// intranet, everyone else the public site. Deterministic, no I/O.
    pub fn select(&self, credential: &Credential) -> &Endpoint {
        if credential.is_authenticated() { &self.intranet } else { &self.public }
    }

    pub fn public(&self) -> &Endpoint {
        &self.public
    }

    pub fn intranet(&self) -> &Endpoint {
        &self.intranet
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoints() -> Endpoints {
        Endpoints::new(
            Url::parse("https://docs.giantswarm.io").unwrap(),
            Url::parse("https://intranet.giantswarm.io").unwrap(),
        )
    }

    #[test]
    fn test_select_without_credential() {
        let eps = endpoints();
        let chosen = eps.select(&Credential::absent());
        assert_eq!(chosen.base_url.as_str(), "https://docs.giantswarm.io/");
        assert!(!chosen.requires_auth);
    }

    #[test]
    fn test_select_with_credential() {
        let eps = endpoints();
        let cred = Credential::new(Some("token".into()));
        let chosen = eps.select(&cred);
        assert_eq!(chosen.base_url.as_str(), "https://intranet.giantswarm.io/");
        assert!(chosen.requires_auth);
    }

    #[test]
    fn test_select_is_deterministic() {
        let eps = endpoints();
        let cred = Credential::new(Some("token".into()));
        for _ in 0..3 {
            assert_eq!(eps.select(&cred), eps.intranet());
            assert_eq!(eps.select(&Credential::absent()), eps.public());
        }
    }

    #[test]
    fn test_search_url() {
        let eps = endpoints();
        assert_eq!(
            eps.public().search_url().as_str(),
            "https://docs.giantswarm.io/searchapi/"
        );
        assert_eq!(
            eps.intranet().search_url().as_str(),
            "https://intranet.giantswarm.io/searchapi/"
        );
    }

    #[test]
    fn test_host() {
        let eps = endpoints();
        assert_eq!(eps.intranet().host(), Some("intranet.giantswarm.io"));
        assert_eq!(eps.public().host(), Some("docs.giantswarm.io"));
    }
}
