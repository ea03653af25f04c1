//! RTP transport endpoint

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::domain::shared::{MediaSpecError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct RtpEndpoint {
    address: String,
    port: u16,
}

/// RTP endpoint: address and port
///
/// Fields are guarded by one lock per instance, so a value shared between
/// threads can be read and updated through `&self`.
#[derive(Serialize, Deserialize)]
#[serde(try_from = "RtpEndpoint", into = "RtpEndpoint")]
pub struct TransportRtp {
    inner: Mutex<RtpEndpoint>,
}

fn check_address(address: &str) -> Result<()> {
    if address.trim().is_empty() {
        return Err(MediaSpecError::InvalidArgument(
            "address can not be empty".to_string(),
        ));
    }
    Ok(())
}

impl TransportRtp {
    pub fn new(address: impl Into<String>, port: u16) -> Result<Self> {
        let address = address.into();
        check_address(&address)?;

        Ok(Self {
            inner: Mutex::new(RtpEndpoint { address, port }),
        })
    }

    fn lock(&self) -> MutexGuard<'_, RtpEndpoint> {
        // Every write replaces a whole field, a poisoned guard is still consistent
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn address(&self) -> String {
        self.lock().address.clone()
    }

    pub fn port(&self) -> u16 {
        self.lock().port
    }

    /// Replace the address; an empty address is rejected and nothing changes
    pub fn set_address(&self, address: impl Into<String>) -> Result<()> {
        let address = address.into();
        check_address(&address)?;
        self.lock().address = address;
        Ok(())
    }

    pub fn set_port(&self, port: u16) {
        self.lock().port = port;
    }

    /// Port 0 marks a disabled stream
    pub fn is_enabled(&self) -> bool {
        self.port() != 0
    }

    fn snapshot(&self) -> RtpEndpoint {
        self.lock().clone()
    }

    /// Each side keeps its own endpoint; a disabled endpoint on either side
    /// makes the pair unusable
    pub fn intersect(
        answerer: &TransportRtp,
        offerer: &TransportRtp,
    ) -> Option<(TransportRtp, TransportRtp)> {
        if !answerer.is_enabled() || !offerer.is_enabled() {
            return None;
        }
        Some((answerer.clone(), offerer.clone()))
    }
}

impl Default for TransportRtp {
    fn default() -> Self {
        Self {
            inner: Mutex::new(RtpEndpoint {
                address: "localhost".to_string(),
                port: 0,
            }),
        }
    }
}

impl Clone for TransportRtp {
    fn clone(&self) -> Self {
        Self {
            inner: Mutex::new(self.snapshot()),
        }
    }
}

impl PartialEq for TransportRtp {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other) || self.snapshot() == other.snapshot()
    }
}

impl Eq for TransportRtp {}

impl fmt::Debug for TransportRtp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let endpoint = self.snapshot();
        f.debug_struct("TransportRtp")
            .field("address", &endpoint.address)
            .field("port", &endpoint.port)
            .finish()
    }
}

impl fmt::Display for TransportRtp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let endpoint = self.snapshot();
        write!(
            f,
            "TransportRtp [address={}, port={}]",
            endpoint.address, endpoint.port
        )
    }
}

impl TryFrom<RtpEndpoint> for TransportRtp {
    type Error = MediaSpecError;

    fn try_from(endpoint: RtpEndpoint) -> Result<Self> {
        TransportRtp::new(endpoint.address, endpoint.port)
    }
}

impl From<TransportRtp> for RtpEndpoint {
    fn from(rtp: TransportRtp) -> Self {
        rtp.inner.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}
