// Copyright (c) 2022 Sebastian Wiesner <sebastian@swsnr.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Scheme checks, and the host name to validate TLS certificates against.

use std::borrow::Cow;

use url::{Host, Url};

/// Whether `scheme` is `http`, ignoring ASCII case.
pub fn is_supported_non_secure_scheme(scheme: &str) -> bool {
    scheme.eq_ignore_ascii_case("http")
}

/// Whether `scheme` is `https`, ignoring ASCII case.
pub fn is_supported_secure_scheme(scheme: &str) -> bool {
    scheme.eq_ignore_ascii_case("https")
}

/// Whether `scheme` is either `http` or `https`.
pub fn is_supported_scheme(scheme: &str) -> bool {
    is_supported_non_secure_scheme(scheme) || is_supported_secure_scheme(scheme)
}

/// Whether `url` is a `http` or `https` URL.
pub fn is_http_url(url: &Url) -> bool {
    is_supported_scheme(url.scheme())
}

/// Strip a trailing `:port` from the value of a `Host` header.
///
/// For IPv6 literals only a colon after the closing `]` separates a port.
fn strip_port(host: &str) -> &str {
    match host.find(']') {
        None => host.split_once(':').map_or(host, |(host, _)| host),
        Some(ipv6_end) => match host.rfind(':') {
            Some(colon) if colon > ipv6_end => &host[..colon],
            _ => host,
        },
    }
}

/// Get the host name to validate the TLS certificate of a request against.
///
/// `url` is the request URL and `host_header` the value of its `Host` header, if any.  A `Host`
/// header overrides the host of `url`, less any port.  Without such a header return the host of
/// `url`, with internationalized domain names decoded to Unicode.
///
/// Return `None` if `url` does not use `https`, i.e. needs no TLS validation at all.
pub fn validation_host<'a>(url: &'a Url, host_header: Option<&'a str>) -> Option<Cow<'a, str>> {
    if !is_supported_secure_scheme(url.scheme()) {
        return None;
    }
    match host_header {
        Some(header) => Some(Cow::Borrowed(strip_port(header))),
        None => match url.host()? {
            Host::Domain(domain) => {
                let (unicode, result) = idna::domain_to_unicode(domain);
                if let Err(error) = result {
                    log::debug!("Domain {} is not valid IDNA: {:?}", domain, error);
                }
                Some(Cow::Owned(unicode))
            }
            // host_str keeps the brackets of IPv6 addresses
            Host::Ipv4(_) | Host::Ipv6(_) => url.host_str().map(Cow::Borrowed),
        },
    }
}
