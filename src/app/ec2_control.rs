//! EC2 instance control over the AWS SDK.
//!
//! [`Ec2Controller`] wraps the four remote operations the application
//! needs (start, stop, reboot, describe) behind a lazily built, memoized
//! SDK client bound to the current profile/region pair. The profile and
//! region are user-editable at runtime, so the client cannot be built at
//! startup: it is constructed on the first remote call after the target
//! changes and dropped whenever it changes again.
//!
//! All SDK calls are bridged from the egui event loop onto a Tokio
//! runtime owned by the controller with `block_on`. There is no timeout
//! or cancellation for in-flight calls; a slow call blocks the event
//! loop until it returns.

use anyhow::{anyhow, bail, Context, Result};
use aws_config::BehaviorVersion;
use aws_sdk_ec2 as ec2;
use aws_types::region::Region;
use tokio::runtime::Runtime;
use tracing::info;

/// Cloud client factory and dispatcher for instance control calls.
pub struct Ec2Controller {
    runtime: Runtime,
    client: Option<ec2::Client>,
    profile: String,
    region: String,
}

impl Ec2Controller {
    pub fn new() -> Result<Self> {
        let runtime = Runtime::new().context("failed to create tokio runtime for AWS calls")?;
        Ok(Self {
            runtime,
            client: None,
            profile: String::new(),
            region: String::new(),
        })
    }

    /// Bind the controller to a profile/region pair.
    ///
    /// Changing either value drops the cached client so the next remote
    /// call rebuilds it against the new target.
    pub fn set_target(&mut self, profile: &str, region: &str) {
        if profile != self.profile || region != self.region {
            self.profile = profile.to_string();
            self.region = region.to_string();
            self.invalidate();
        }
    }

    /// Drop the cached client, if any.
    pub fn invalidate(&mut self) {
        if self.client.take().is_some() {
            info!(
                "Dropped cached EC2 client (profile={}, region={})",
                self.profile, self.region
            );
        }
    }

    /// Whether a client is currently memoized.
    pub fn has_cached_client(&self) -> bool {
        self.client.is_some()
    }

    /// Get the memoized client for the current target, building it on
    /// first use. Empty profile or region fall back to the SDK's default
    /// resolution (config files, environment).
    pub fn client(&mut self) -> &ec2::Client {
        let runtime = &self.runtime;
        let profile = self.profile.clone();
        let region = self.region.clone();
        self.client.get_or_insert_with(|| {
            info!(
                "Building EC2 client (profile={}, region={})",
                profile, region
            );
            let config = runtime.block_on(async move {
                let mut loader = aws_config::defaults(BehaviorVersion::latest());
                if !profile.is_empty() {
                    loader = loader.profile_name(&profile);
                }
                if !region.is_empty() {
                    loader = loader.region(Region::new(region));
                }
                loader.load().await
            });
            ec2::Client::new(&config)
        })
    }

    /// Start the instance. Exactly one remote call.
    pub fn start_instance(&mut self, instance_id: &str) -> Result<()> {
        let id = validated_id(instance_id)?;
        let client = self.client().clone();
        self.runtime
            .block_on(async move { client.start_instances().instance_ids(id).send().await })
            .with_context(|| format!("failed to start instance {}", instance_id))?;
        info!("Instance {} start requested", instance_id);
        Ok(())
    }

    /// Stop the instance. Exactly one remote call.
    pub fn stop_instance(&mut self, instance_id: &str) -> Result<()> {
        let id = validated_id(instance_id)?;
        let client = self.client().clone();
        self.runtime
            .block_on(async move { client.stop_instances().instance_ids(id).send().await })
            .with_context(|| format!("failed to stop instance {}", instance_id))?;
        info!("Instance {} stop requested", instance_id);
        Ok(())
    }

    /// Reboot the instance. Exactly one remote call.
    pub fn reboot_instance(&mut self, instance_id: &str) -> Result<()> {
        let id = validated_id(instance_id)?;
        let client = self.client().clone();
        self.runtime
            .block_on(async move { client.reboot_instances().instance_ids(id).send().await })
            .with_context(|| format!("failed to reboot instance {}", instance_id))?;
        info!("Instance {} reboot requested", instance_id);
        Ok(())
    }

    /// Fetch the current provider state name of the instance
    /// ("running", "stopped", "pending", ...).
    pub fn instance_state(&mut self, instance_id: &str) -> Result<String> {
        let id = validated_id(instance_id)?;
        let client = self.client().clone();
        let request_id = id.clone();
        let response = self
            .runtime
            .block_on(async move {
                client
                    .describe_instances()
                    .instance_ids(request_id)
                    .send()
                    .await
            })
            .with_context(|| format!("failed to describe instance {}", id))?;

        response
            .reservations()
            .iter()
            .flat_map(|reservation| reservation.instances())
            .find(|instance| instance.instance_id() == Some(id.as_str()))
            .and_then(|instance| instance.state())
            .and_then(|state| state.name())
            .map(|name| name.as_str().to_string())
            .ok_or_else(|| anyhow!("instance {} not found", id))
    }
}

fn validated_id(instance_id: &str) -> Result<String> {
    let trimmed = instance_id.trim();
    if trimmed.is_empty() {
        bail!("instance id is empty");
    }
    Ok(trimmed.to_string())
}

/// Heuristic check for authorization failures in an error chain.
///
/// The status poller uses this to suggest re-running the SSO login
/// instead of showing a generic error, and to keep polling rather than
/// giving up.
pub fn is_auth_error(err: &anyhow::Error) -> bool {
    let text = format!("{:#}", err);
    ["AuthFailure", "ExpiredToken", "RequestExpired", "credential"]
        .iter()
        .any(|marker| text.contains(marker))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validated_id_rejects_empty() {
        assert!(validated_id("").is_err());
        assert!(validated_id("   ").is_err());
        assert_eq!(validated_id(" i-0abc ").unwrap(), "i-0abc");
    }

    #[test]
    fn test_is_auth_error() {
        let auth = anyhow!("service error: ExpiredToken: the token has expired");
        assert!(is_auth_error(&auth));

        let creds = anyhow!("failed to describe instance")
            .context("no credential source found for profile");
        assert!(is_auth_error(&creds));

        let other = anyhow!("instance i-0abc not found");
        assert!(!is_auth_error(&other));
    }
}
