use std::future::Future;

use aws_sdk_ssm::error::{DisplayErrorContext, ProvideErrorMetadata};
use tracing::{error, info, instrument};

use crate::config::{Environment, SecretSource, SecretSpec};
use crate::error::{DigestError, Result, ServiceError};

/// Remote key-value store holding (possibly encrypted) configuration values.
pub trait SecretStore: Send + Sync {
    /// Look up a parameter by name, decrypting it. `Ok(None)` means the store
    /// answered but carried no value.
    fn get_parameter(&self, name: &str) -> impl Future<Output = Result<Option<String>>> + Send;
}

/// AWS Systems Manager Parameter Store client.
#[derive(Debug, Clone)]
pub struct ParameterStore {
    client: aws_sdk_ssm::Client,
}

impl ParameterStore {
    pub fn new(client: aws_sdk_ssm::Client) -> Self {
        Self { client }
    }
}

impl SecretStore for ParameterStore {
    #[instrument(level = "info", skip(self))]
    async fn get_parameter(&self, name: &str) -> Result<Option<String>> {
        match self.client.get_parameter().name(name).with_decryption(true).send().await {
            Ok(output) => Ok(output.parameter().and_then(|p| p.value()).map(str::to_string)),
            Err(e) if e.as_service_error().is_some() => {
                let detail = DisplayErrorContext(&e).to_string();
                let err = ServiceError::new("ssm:GetParameter", e.code(), detail);
                error!(parameter = %name, error = %err, "Error retrieving parameter");
                Err(DigestError::SecretStore(err))
            }
            Err(e) => {
                // Never reached the service: dispatch, timeout, credentials.
                let detail = DisplayErrorContext(&e).to_string();
                error!(parameter = %name, error = %detail, "Parameter request could not be sent");
                Err(DigestError::Unexpected(format!(
                    "ssm:GetParameter could not be sent: {}",
                    detail
                )))
            }
        }
    }
}

/// Resolves named configuration values by walking each spec's sources in order.
pub struct SecretResolver<'a, S, E> {
    store: &'a S,
    env: &'a E,
}

impl<'a, S: SecretStore, E: Environment> SecretResolver<'a, S, E> {
    pub fn new(store: &'a S, env: &'a E) -> Self {
        Self { store, env }
    }

    /// Return the first value any source yields. A store failure aborts the
    /// walk; an unset or empty environment variable moves on to the next source.
    pub async fn resolve(&self, spec: &SecretSpec) -> Result<String> {
        for source in &spec.sources {
            let found = match source {
                SecretSource::Environment(var) => self.env.var(var).filter(|v| !v.is_empty()),
                SecretSource::Parameter(path) => self.store.get_parameter(path).await?,
            };
            if let Some(value) = found {
                info!(secret = %spec.name, source = ?source, "Resolved configuration value");
                return Ok(value);
            }
        }
        error!(secret = %spec.name, "No source yielded a configuration value");
        Err(DigestError::MissingConfiguration(spec.name.clone()))
    }
}
