// Copyright (c) 2022 Sebastian Wiesner <sebastian@swsnr.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Errors for proxy values.

use thiserror::Error;

/// Why a string was rejected as a proxy endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidProxyUri {
    /// The value was empty.
    #[error("proxy value is empty")]
    Empty,
    /// The value could not be parsed as URL.
    #[error("failed to parse proxy URL: {0}")]
    Malformed(#[from] url::ParseError),
    /// The URL parsed, but its scheme is neither `http` nor `https`.
    #[error("unsupported proxy scheme {0:?}, expected http or https")]
    UnsupportedScheme(String),
}

static_assertions::assert_impl_all!(InvalidProxyUri: Send, Sync);
