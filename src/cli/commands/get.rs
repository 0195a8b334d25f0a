//! Implementation of the `get` command.
//!
//! Docker writes the registry URL to stdin and reads `{"ServerURL", "Username",
//! "Secret"}` back from stdout. Nothing else is ever written to stdout here.

use clap::Args;
use std::io::{Read, Write};
use tracing::{debug, info};

use crate::domain::errors::CredentialError;
use crate::domain::models::Config;
use crate::domain::ports::SecretStore;
use crate::infrastructure::vault::VaultClient;
use crate::services::CredentialService;

#[derive(Args, Debug, Default)]
pub struct GetArgs {}

/// Answer one credential request from `input`, writing the payload to `output`.
pub async fn execute<R, W>(config: &Config, mut input: R, output: W) -> Result<(), CredentialError>
where
    R: Read,
    W: Write,
{
    let mut raw = Vec::new();
    input
        .read_to_end(&mut raw)
        .map_err(CredentialError::InputRead)?;
    debug!(bytes = raw.len(), "Read credential request");

    let client =
        VaultClient::new(config).map_err(|e| CredentialError::StoreConnection(Box::new(e)))?;
    debug!(vault = %client.base_url(), "Vault client created");

    respond(&CredentialService::new(client), &raw, output).await
}

/// Look up the request in `raw` and write the payload, without a trailing
/// newline, to `output`.
pub async fn respond<S, W>(
    service: &CredentialService<S>,
    raw: &[u8],
    mut output: W,
) -> Result<(), CredentialError>
where
    S: SecretStore,
    W: Write,
{
    let payload = service.get(raw).await?;

    output
        .write_all(&payload)
        .and_then(|()| output.flush())
        .map_err(CredentialError::OutputWrite)?;

    info!("Credentials written");
    Ok(())
}
