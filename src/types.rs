// Copyright (c) 2022 Sebastian Wiesner <sebastian@swsnr.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Common proxy resolver types.

use url::Url;

/// Resolve proxies.
pub trait ProxyResolver {
    /// Resolve a proxy for the given `url`.
    ///
    /// Return the URL of a HTTP proxy to use for `url` or `None` for a direct connection to `url`.
    fn for_url(&self, url: &Url) -> Option<Url>;
}

/// A proxy resolver which never returns a proxy URL.
///
/// Used as fallback if the environment configures no proxy.
#[derive(Debug, Default, Clone, Copy)]
pub struct DirectResolver;

static_assertions::assert_impl_all!(DirectResolver: Send, Sync);

impl ProxyResolver for DirectResolver {
    fn for_url(&self, _url: &Url) -> Option<Url> {
        None
    }
}
