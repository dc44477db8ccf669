// Copyright (c) 2022 Sebastian Wiesner <sebastian@swsnr.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Proxy credentials taken from the user info of proxy URLs.

use std::fmt;

use percent_encoding::percent_decode_str;
use url::Url;

use crate::tls::is_supported_non_secure_scheme;

/// A user name and password to authenticate against a proxy.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    user: String,
    password: String,
}

static_assertions::assert_impl_all!(Credential: Send, Sync);

impl Credential {
    /// Create a credential.
    pub fn new<U: Into<String>, P: Into<String>>(user: U, password: P) -> Self {
        Self {
            user: user.into(),
            password: password.into(),
        }
    }

    /// The user name.
    pub fn user(&self) -> &str {
        &self.user
    }

    /// The password; empty if the user info had none.
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Parse a `user:password` user info fragment.
///
/// Split at the first colon, so the password may contain further colons.  Without any colon the
/// whole value is the user name and the password is empty.
///
/// Both parts are percent-decoded after splitting, as user info in URLs is percent-encoded:
/// `se%3Acret` yields the password `se:cret`.  A password that literally contains `%3A` must
/// therefore be given as `%253A`.
///
/// Return `None` if `user_info` is empty or only contains whitespace.
pub fn extract_credential(user_info: &str) -> Option<Credential> {
    if user_info.trim().is_empty() {
        return None;
    }
    let (user, password) = user_info.split_once(':').unwrap_or((user_info, ""));
    Some(Credential::new(
        percent_decode_str(user).decode_utf8_lossy(),
        percent_decode_str(password).decode_utf8_lossy(),
    ))
}

/// Credentials to use for proxies.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ProxyCredentials {
    /// No proxy needs credentials.
    #[default]
    None,
    /// Use the same credential for every proxy.
    Shared(Credential),
    /// Use distinct credentials for `http` and `https` URLs.
    PerScheme {
        /// The credential for the proxy of `http:` URLs.
        http: Credential,
        /// The credential for the proxy of all other URLs.
        https: Credential,
    },
}

static_assertions::assert_impl_all!(ProxyCredentials: Send, Sync);

impl ProxyCredentials {
    /// Combine the credentials of the http and the https proxy.
    ///
    /// `http` and `https` are the user info strings and the credentials extracted from each.
    /// Identical user info collapses into a single shared credential, and so does a credential
    /// that only one side has.
    pub(crate) fn combine(
        http: Option<(String, Credential)>,
        https: Option<(String, Credential)>,
    ) -> Self {
        match (http, https) {
            (None, None) => Self::None,
            (Some((_, credential)), None) | (None, Some((_, credential))) => {
                Self::Shared(credential)
            }
            (Some((http_info, http)), Some((https_info, _))) if http_info == https_info => {
                Self::Shared(http)
            }
            (Some((_, http)), Some((_, https))) => Self::PerScheme { http, https },
        }
    }

    /// Get the credential for the proxy of `url`.
    ///
    /// Per-scheme credentials pick by the scheme of `url` exactly like proxies are picked: the
    /// `http` credential for `http:` URLs, the `https` credential otherwise.
    pub fn for_url(&self, url: &Url) -> Option<&Credential> {
        match self {
            Self::None => None,
            Self::Shared(credential) => Some(credential),
            Self::PerScheme { http, https } => {
                if is_supported_non_secure_scheme(url.scheme()) {
                    Some(http)
                } else {
                    Some(https)
                }
            }
        }
    }
}
