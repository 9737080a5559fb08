//! Send-with-recovery for commands addressed to a page handler.

use sidescroll_protocols::{RemoteTarget, ResponseStatus, TabRequest, TabResponse, TargetError};
use tracing::{debug, warn};

/// How many times a command may be sent before giving up.
///
/// The page handler is re-injected between attempts, so the default of two
/// attempts means "send, and on failure re-inject and send once more".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
}

impl RetryPolicy {
    /// Create a policy. Values below one are raised to one.
    pub const fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: if max_attempts == 0 { 1 } else { max_attempts },
        }
    }

    /// Send once, never recover.
    pub const fn none() -> Self {
        Self::new(1)
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(2)
    }
}

/// Send `request` and recover from failures by re-injecting the handler.
///
/// Resolves with the reply when the handler answers `success` or `stopped`.
/// Any other status counts as a failed attempt, the same as a delivery
/// failure. Once the policy's attempts are used up, the last failure is
/// returned. A failed re-injection ends the attempts early.
pub async fn send_with_recovery(
    target: &dyn RemoteTarget,
    request: TabRequest,
    policy: RetryPolicy,
) -> Result<TabResponse, TargetError> {
    let mut attempt = 1;
    loop {
        let failure = match target.send(request).await {
            Ok(resp) if matches!(resp.status, ResponseStatus::Success | ResponseStatus::Stopped) => {
                return Ok(resp);
            }
            Ok(resp) => TargetError::Rejected {
                action: request.action().to_string(),
                status: match resp.message {
                    Some(msg) => format!("{} ({})", resp.status, msg),
                    None => resp.status.to_string(),
                },
            },
            Err(e) => e,
        };

        if attempt >= policy.max_attempts() {
            debug!(%request, attempt, "giving up: {}", failure);
            return Err(failure);
        }

        if failure.is_delivery_failure() {
            warn!(%request, attempt, "command not delivered, re-injecting page handler: {}", failure);
        } else {
            warn!(%request, attempt, "command rejected, re-injecting page handler: {}", failure);
        }
        target.inject_handler().await?;
        attempt += 1;
    }
}

#[cfg(test)]
#[path = "retry_tests.rs"]
mod tests;
