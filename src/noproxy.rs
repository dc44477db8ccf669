// Copyright (c) 2022 Sebastian Wiesner <sebastian@swsnr.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Hosts which bypass the proxy, as listed in `$no_proxy`.
//!
//! `$no_proxy` holds a comma separated list of host patterns.  A pattern with a leading dot, e.g.
//! `.example.com`, matches the domain `example.com` itself as well as all of its subdomains.
//! Any other pattern only matches the host exactly; in particular `example.com` does *not* match
//! `api.example.com`.  All comparisons ignore ASCII case.
//!
//! There are no wildcards and no IP ranges; IP addresses are compared as plain strings.

use url::Url;

/// A non-empty list of bypass patterns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BypassList {
    patterns: Vec<String>,
}

static_assertions::assert_impl_all!(BypassList: Send, Sync);

/// Whether `host` ends with `suffix`, ignoring ASCII case.
fn ends_with_ignore_case(host: &str, suffix: &str) -> bool {
    host.len()
        .checked_sub(suffix.len())
        .and_then(|start| host.get(start..))
        .is_some_and(|tail| tail.eq_ignore_ascii_case(suffix))
}

/// Whether the single `pattern` matches `host`.
fn pattern_matches(pattern: &str, host: &str) -> bool {
    match pattern.strip_prefix('.') {
        // The suffix keeps its dot, so `.foo.com` does not match `xfoo.com`.
        Some(domain) => domain.eq_ignore_ascii_case(host) || ends_with_ignore_case(host, pattern),
        None => pattern.eq_ignore_ascii_case(host),
    }
}

impl BypassList {
    /// Parse a comma separated list of patterns.
    ///
    /// Surrounding whitespace is trimmed from every pattern, and empty patterns are dropped.
    /// Return `None` if no pattern remains.
    pub fn parse<S: AsRef<str>>(value: S) -> Option<Self> {
        let patterns = value
            .as_ref()
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(ToOwned::to_owned)
            .collect::<Vec<_>>();
        if patterns.is_empty() {
            None
        } else {
            Some(Self { patterns })
        }
    }

    /// The patterns in the order they were given.
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Whether any pattern matches `host`.
    pub fn matches(&self, host: &str) -> bool {
        self.patterns.iter().any(|p| pattern_matches(p, host))
    }

    /// Whether any pattern matches the host of `url`.
    ///
    /// URLs without host never match.  IPv6 hosts are matched with their enclosing brackets.
    pub fn matches_url(&self, url: &Url) -> bool {
        url.host_str().is_some_and(|host| self.matches(host))
    }
}
