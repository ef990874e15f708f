/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use anyhow::{Context, Result};
use aws_smithy_async::time::SharedTimeSource;
use clap::Parser;
use cloudfront_login_signer::{assemble, build_policy, PrivateKey};
use std::ffi::OsString;
use std::path::PathBuf;
use std::process;

const USAGE: &str = "Please specify path to private key, key id, expiration in days, \
                     distribution domain name, and redirect path as parameters.\n";

#[derive(Debug, Parser)]
#[clap(name = "cloudfront-login-signer", version)]
#[clap(about = "Generates a signed CloudFront login URL")]
struct Cli {
    /// PEM file holding the unencrypted RSA private key
    private_key: PathBuf,

    /// ID of the key pair the private key belongs to
    key_pair_id: String,

    /// Days until the signed policy expires
    expiration_days: String,

    /// Distribution URL, without a trailing slash
    distribution_url: String,

    /// Path the login page redirects to
    redirect_path: String,
}

/// Process arguments with an end-of-options marker inserted after the program name, so any
/// value (including `-x` or `--`) counts as a positional parameter. A lone help or version
/// flag is left alone.
fn command_line(args: impl IntoIterator<Item = OsString>) -> Vec<OsString> {
    let mut args: Vec<OsString> = args.into_iter().collect();
    let lone_flag = args.len() == 2
        && matches!(
            args[1].to_str(),
            Some("-h" | "--help" | "-V" | "--version")
        );
    if !lone_flag {
        let program_len = args.len().min(1);
        args.insert(program_len, OsString::from("--"));
    }
    args
}

fn run(cli: &Cli) -> Result<String> {
    let private_key = PrivateKey::from_pem_file(&cli.private_key).with_context(|| {
        format!("failed to load private key from {}", cli.private_key.display())
    })?;
    let policy = build_policy(
        &cli.distribution_url,
        &cli.expiration_days,
        &SharedTimeSource::default(),
    )?;
    let policy_bytes = policy.to_bytes();
    let signature = private_key
        .sign(&policy_bytes)
        .context("failed to sign the access policy")?;

    Ok(assemble(
        &cli.distribution_url,
        &cli.key_pair_id,
        &policy_bytes,
        &signature,
        policy.expires_at(),
        &cli.redirect_path,
    ))
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_owned()))
        .init();

    let cli = match Cli::try_parse_from(command_line(std::env::args_os())) {
        Ok(cli) => cli,
        // lone --help or --version
        Err(err) if !err.use_stderr() => err.exit(),
        Err(err) => {
            tracing::debug!(%err, "rejected command line");
            println!("{USAGE}");
            process::exit(1)
        }
    };

    match run(&cli) {
        Ok(signed_url) => println!("{signed_url}"),
        Err(err) => {
            eprintln!("{err:#}");
            process::exit(1)
        }
    }
}
