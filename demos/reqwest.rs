// Copyright (c) 2022 Sebastian Wiesner <sebastian@swsnr.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use env_proxy::env::EnvProxyResolver;
use env_proxy::tls::validation_host;
use env_proxy::ProxyResolver;

fn main() {
    let Some(resolver) = EnvProxyResolver::from_process_env() else {
        println!("No proxy in environment, set $http_proxy, $https_proxy or $all_proxy");
        return;
    };

    let target = reqwest::Url::parse("https://httpbin.org/status/200").unwrap();
    if let Some(credential) = resolver.credential_for(&target) {
        println!("Authenticating against proxy as {}", credential.user());
    }
    if let Some(host) = validation_host(&target, None) {
        println!("Validating TLS certificate against {}", host);
    }

    let client = reqwest::blocking::Client::builder()
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ))
        .proxy(reqwest::Proxy::custom(move |url| {
            let proxy_url = resolver.for_url(url);
            match &proxy_url {
                None => println!("Using direct connection for URL {}", url),
                Some(u) => println!("Using proxy {} for URL {}", u, url),
            }
            proxy_url
        }))
        .build()
        .unwrap();

    let response = client.get(target).send().unwrap();
    println!("Status code: {}", response.status());
}
