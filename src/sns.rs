use std::future::Future;

use aws_sdk_sns::error::{DisplayErrorContext, ProvideErrorMetadata};
use tracing::{error, info};

use crate::error::{DigestError, Result, ServiceError};

/// Pub/sub destination for the digest.
pub trait Notifier: Send + Sync {
    /// Publish one message and return the service-assigned message id.
    fn publish(
        &self,
        topic: &str,
        body: &str,
        subject: &str,
    ) -> impl Future<Output = Result<String>> + Send;
}

/// Amazon SNS client.
#[derive(Debug, Clone)]
pub struct SnsPublisher {
    client: aws_sdk_sns::Client,
}

impl SnsPublisher {
    pub fn new(client: aws_sdk_sns::Client) -> Self {
        Self { client }
    }
}

impl Notifier for SnsPublisher {
    async fn publish(&self, topic: &str, body: &str, subject: &str) -> Result<String> {
        let sent = self
            .client
            .publish()
            .topic_arn(topic)
            .message(body)
            .subject(subject)
            .send()
            .await;
        match sent {
            Ok(output) => match output.message_id() {
                Some(id) => {
                    info!(message_id = %id, "Message published successfully");
                    Ok(id.to_string())
                }
                None => {
                    error!(topic = %topic, "Publish response carried no message id");
                    Err(DigestError::Unexpected(
                        "publish response carried no message id".to_string(),
                    ))
                }
            },
            Err(e) if e.as_service_error().is_some() => {
                let detail = DisplayErrorContext(&e).to_string();
                let err = ServiceError::new("sns:Publish", e.code(), detail);
                error!(topic = %topic, error = %err, "Error publishing to SNS");
                Err(DigestError::Publish(err))
            }
            Err(e) => {
                let detail = DisplayErrorContext(&e).to_string();
                error!(topic = %topic, error = %detail, "Publish request could not be sent");
                Err(DigestError::Unexpected(format!("sns:Publish could not be sent: {}", detail)))
            }
        }
    }
}
