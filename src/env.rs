// Copyright (c) 2022 Sebastian Wiesner <sebastian@swsnr.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Resolve proxies via environment variables.
//!
//! This module reads the proxy environment understood by [curl](https://curl.se/) and similar
//! tools:
//!
//! - `$http_proxy` is the proxy for `http:` URLs.  There is deliberately no `$HTTP_PROXY`
//!   fallback, because CGI programs receive the `Proxy` request header in that variable.
//! - `$https_proxy`, or `$HTTPS_PROXY` if the former is unusable, is the proxy for `https:` URLs.
//! - `$all_proxy`, or `$ALL_PROXY`, fills in whichever of the above is missing.
//! - `$no_proxy` lists hosts which bypass the proxy, see [`crate::noproxy`].
//!
//! Proxy values may be full `http` or `https` URLs or bare `host[:port]` pairs.  Values which fail
//! to parse or use another scheme are ignored as if they were unset.  User info in proxy URLs
//! provides credentials for the proxy, see [`ProxyCredentials`].
//!
//! The environment is read once, by [`EnvProxyConfig::from_lookup`]; the resulting configuration
//! never changes afterwards.  Use [`EnvLookup`] to provide the environment, e.g. [`ProcessEnv`]
//! for the environment of the current process.

use url::Url;

use crate::credentials::{extract_credential, Credential, ProxyCredentials};
use crate::noproxy::BypassList;
use crate::tls::is_supported_non_secure_scheme;
use crate::types::ProxyResolver;
use crate::uri::{normalize_proxy_uri, redacted, user_info};

/// The proxy for `http:` URLs.
pub const HTTP_PROXY_LC: &str = "http_proxy";
/// The proxy for `https:` URLs.
pub const HTTPS_PROXY_LC: &str = "https_proxy";
/// Fallback for [`HTTPS_PROXY_LC`].
pub const HTTPS_PROXY_UC: &str = "HTTPS_PROXY";
/// The proxy for all URLs without a scheme-specific proxy.
pub const ALL_PROXY_LC: &str = "all_proxy";
/// Fallback for [`ALL_PROXY_LC`].
pub const ALL_PROXY_UC: &str = "ALL_PROXY";
/// Hosts which bypass the proxy.
pub const NO_PROXY_LC: &str = "no_proxy";

/// Lookup environment variables.
pub trait EnvLookup {
    /// Get the value of the variable `name`, or `None` if it's unset.
    fn lookup(&self, name: &str) -> Option<String>;
}

impl<F> EnvLookup for F
where
    F: Fn(&str) -> Option<String>,
{
    fn lookup(&self, name: &str) -> Option<String> {
        self(name)
    }
}

/// The environment of the current process.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnv;

impl EnvLookup for ProcessEnv {
    fn lookup(&self, name: &str) -> Option<String> {
        std::env::var_os(name).and_then(|v| {
            v.to_str().map(ToOwned::to_owned).or_else(|| {
                log::warn!("Variable ${} does not contain valid unicode, skipping", name);
                None
            })
        })
    }
}

fn lookup_url<E: EnvLookup + ?Sized>(env: &E, var: &str) -> Option<Url> {
    normalize_proxy_uri(var, env.lookup(var).as_deref())
}

fn credential_of(url: Option<&Url>) -> Option<(String, Credential)> {
    let info = user_info(url?);
    let credential = extract_credential(&info)?;
    Some((info, credential))
}

/// Proxy configuration extracted from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvProxyConfig {
    http: Option<Url>,
    https: Option<Url>,
    bypass: Option<BypassList>,
    credentials: ProxyCredentials,
}

static_assertions::assert_impl_all!(EnvProxyConfig: Send, Sync);

impl EnvProxyConfig {
    /// Build proxy configuration from the environment provided by `env`.
    ///
    /// Scheme-specific variables take precedence over `$all_proxy`, and lowercase variables over
    /// their uppercase variants.  See the [module documentation](self) for details.
    ///
    /// Return `None` if the environment configures neither a HTTP nor a HTTPS proxy; the caller
    /// may then use another source of proxy configuration.
    pub fn from_lookup<E: EnvLookup + ?Sized>(env: &E) -> Option<Self> {
        let mut http = lookup_url(env, HTTP_PROXY_LC);
        let mut https =
            lookup_url(env, HTTPS_PROXY_LC).or_else(|| lookup_url(env, HTTPS_PROXY_UC));

        if http.is_none() || https.is_none() {
            let all = lookup_url(env, ALL_PROXY_LC).or_else(|| lookup_url(env, ALL_PROXY_UC));
            if http.is_none() {
                http = all.clone();
            }
            if https.is_none() {
                https = all;
            }
        }

        if http.is_none() && https.is_none() {
            log::debug!("No HTTP or HTTPS proxy in environment");
            return None;
        }

        let credentials =
            ProxyCredentials::combine(credential_of(http.as_ref()), credential_of(https.as_ref()));

        let bypass = env.lookup(NO_PROXY_LC).and_then(BypassList::parse);

        log::debug!(
            "Using HTTP proxy {:?}, HTTPS proxy {:?}, bypass list {:?}",
            http.as_ref().map(|url| redacted(url).to_string()),
            https.as_ref().map(|url| redacted(url).to_string()),
            bypass.as_ref().map(BypassList::patterns),
        );

        Some(Self {
            http,
            https,
            bypass,
            credentials,
        })
    }

    /// The proxy for `http:` URLs, if any.
    pub fn http_proxy(&self) -> Option<&Url> {
        self.http.as_ref()
    }

    /// The proxy for `https:` URLs, if any.
    pub fn https_proxy(&self) -> Option<&Url> {
        self.https.as_ref()
    }

    /// The hosts which bypass the proxy, if `$no_proxy` had any.
    pub fn bypass(&self) -> Option<&BypassList> {
        self.bypass.as_ref()
    }

    /// Credentials for the proxies.
    pub fn credentials(&self) -> &ProxyCredentials {
        &self.credentials
    }
}

/// Resolve proxies for URLs from a fixed [`EnvProxyConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvProxyResolver {
    config: EnvProxyConfig,
}

static_assertions::assert_impl_all!(EnvProxyResolver: Send, Sync);

impl EnvProxyResolver {
    /// Resolve proxies with the given `config`.
    pub fn new(config: EnvProxyConfig) -> Self {
        Self { config }
    }

    /// Resolve proxies configured in the environment provided by `env`.
    ///
    /// Return `None` if the environment configures no proxy, see [`EnvProxyConfig::from_lookup`].
    pub fn from_lookup<E: EnvLookup + ?Sized>(env: &E) -> Option<Self> {
        EnvProxyConfig::from_lookup(env).map(Self::new)
    }

    /// Resolve proxies configured in the environment of this process.
    pub fn from_process_env() -> Option<Self> {
        Self::from_lookup(&ProcessEnv)
    }

    /// The underlying configuration.
    pub fn config(&self) -> &EnvProxyConfig {
        &self.config
    }

    /// Get the proxy for the scheme of `url`.
    ///
    /// Return the HTTP proxy for `http:` URLs, and the HTTPS proxy for all other URLs.  This does
    /// not consider the bypass list; see [`Self::is_bypassed`].
    pub fn proxy_for(&self, url: &Url) -> Option<&Url> {
        if is_supported_non_secure_scheme(url.scheme()) {
            self.config.http_proxy()
        } else {
            self.config.https_proxy()
        }
    }

    /// Whether to connect to `url` directly.
    ///
    /// A URL is bypassed if no proxy is configured for its scheme, or if its host matches the
    /// bypass list.
    pub fn is_bypassed(&self, url: &Url) -> bool {
        if self.proxy_for(url).is_none() {
            return true;
        }
        self.config
            .bypass()
            .is_some_and(|bypass| bypass.matches_url(url))
    }

    /// Credentials for the proxies.
    pub fn credentials(&self) -> &ProxyCredentials {
        self.config.credentials()
    }

    /// Get the credential for the proxy of `url`, if any.
    pub fn credential_for(&self, url: &Url) -> Option<&Credential> {
        self.credentials().for_url(url)
    }
}

impl ProxyResolver for EnvProxyResolver {
    fn for_url(&self, url: &Url) -> Option<Url> {
        if self.is_bypassed(url) {
            log::debug!("Using direct connection for {}", url);
            None
        } else {
            let proxy = self.proxy_for(url).cloned();
            log::debug!(
                "Using proxy {:?} for {}",
                proxy.as_ref().map(|proxy| redacted(proxy).to_string()),
                url
            );
            proxy
        }
    }
}
