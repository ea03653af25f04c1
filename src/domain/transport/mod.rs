//! Transport capabilities
//!
//! [`Transport`] is a container with one optional slot per transport kind
//! rather than a hierarchy of transport types, so it stays a plain value that
//! can be copied and serialized.

pub mod rtmp;
pub mod rtp;

pub use rtmp::TransportRtmp;
pub use rtp::TransportRtp;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
struct TransportSlots {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    rtp: Option<TransportRtp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    rtmp: Option<TransportRtmp>,
}

impl TransportSlots {
    fn is_empty(&self) -> bool {
        self.rtp.is_none() && self.rtmp.is_none()
    }
}

/// Transport container: at most one RTP and one RTMP transport
#[derive(Default, Serialize, Deserialize)]
#[serde(from = "TransportSlots", into = "TransportSlots")]
pub struct Transport {
    slots: Mutex<TransportSlots>,
}

impl Transport {
    /// Empty container
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rtp(self, rtp: TransportRtp) -> Self {
        self.set_rtp(Some(rtp));
        self
    }

    pub fn with_rtmp(self, rtmp: TransportRtmp) -> Self {
        self.set_rtmp(Some(rtmp));
        self
    }

    fn lock(&self) -> MutexGuard<'_, TransportSlots> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Copy of the RTP slot, `None` when absent
    pub fn rtp(&self) -> Option<TransportRtp> {
        self.lock().rtp.clone()
    }

    /// Copy of the RTMP slot, `None` when absent
    pub fn rtmp(&self) -> Option<TransportRtmp> {
        self.lock().rtmp.clone()
    }

    /// Replace the RTP slot
    pub fn set_rtp(&self, rtp: Option<TransportRtp>) {
        self.lock().rtp = rtp;
    }

    /// Replace the RTMP slot
    pub fn set_rtmp(&self, rtmp: Option<TransportRtmp>) {
        self.lock().rtmp = rtmp;
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn snapshot(&self) -> TransportSlots {
        self.lock().clone()
    }

    /// Reduce an answerer and an offerer transport to what both can use
    ///
    /// A slot survives only when both sides have it and it intersects; it is
    /// otherwise cleared on both sides. Returns `None` when either side is
    /// left without any slot. The inputs are never modified.
    pub fn negotiate(answerer: &Transport, offerer: &Transport) -> Option<(Transport, Transport)> {
        let mut neg_answ = answerer.snapshot();
        let mut neg_off = offerer.snapshot();

        let rtmps = match (&neg_answ.rtmp, &neg_off.rtmp) {
            (Some(answ_rtmp), Some(off_rtmp)) => {
                let rtmps = TransportRtmp::intersect(answ_rtmp, off_rtmp);
                if rtmps.is_none() {
                    debug!("RTMP transports do not intersect, clearing slot");
                }
                rtmps
            }
            _ => None,
        };
        (neg_answ.rtmp, neg_off.rtmp) = rtmps.unzip();

        let rtps = match (&neg_answ.rtp, &neg_off.rtp) {
            (Some(answ_rtp), Some(off_rtp)) => {
                let rtps = TransportRtp::intersect(answ_rtp, off_rtp);
                if rtps.is_none() {
                    debug!("RTP endpoint disabled on one side, clearing slot");
                }
                rtps
            }
            _ => None,
        };
        (neg_answ.rtp, neg_off.rtp) = rtps.unzip();

        if neg_answ.is_empty() || neg_off.is_empty() {
            debug!("No transport left after negotiation");
            return None;
        }

        Some((Transport::from(neg_answ), Transport::from(neg_off)))
    }
}

impl Clone for Transport {
    fn clone(&self) -> Self {
        Transport::from(self.snapshot())
    }
}

impl PartialEq for Transport {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other) || self.snapshot() == other.snapshot()
    }
}

impl Eq for Transport {}

impl fmt::Debug for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slots = self.snapshot();
        f.debug_struct("Transport")
            .field("rtp", &slots.rtp)
            .field("rtmp", &slots.rtmp)
            .finish()
    }
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slots = self.snapshot();
        let mut fields = Vec::new();
        if let Some(rtp) = &slots.rtp {
            fields.push(format!("rtp={}", rtp));
        }
        if let Some(rtmp) = &slots.rtmp {
            fields.push(format!("rtmp={}", rtmp));
        }
        write!(f, "Transport [{}]", fields.join(", "))
    }
}

impl From<TransportSlots> for Transport {
    fn from(slots: TransportSlots) -> Self {
        Self {
            slots: Mutex::new(slots),
        }
    }
}

impl From<Transport> for TransportSlots {
    fn from(transport: Transport) -> Self {
        transport
            .slots
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "rtmp://media.example.com/live";

    fn rtp(address: &str, port: u16) -> TransportRtp {
        TransportRtp::new(address, port).unwrap()
    }

    fn rtmp(publish: &str) -> TransportRtmp {
        TransportRtmp::new(URL).unwrap().with_publish(publish)
    }

    #[test]
    fn test_empty_transport() {
        let transport = Transport::new();
        assert!(transport.is_empty());
        assert_eq!(transport.rtp(), None);
        assert_eq!(transport.rtmp(), None);
        assert_eq!(transport.to_string(), "Transport []");
    }

    #[test]
    fn test_clone_is_deep() {
        let original = Transport::new().with_rtp(rtp("10.0.0.1", 5000));
        let copy = original.clone();

        copy.set_rtp(Some(rtp("10.0.0.2", 6000)));
        copy.set_rtmp(Some(rtmp("alice")));

        assert_eq!(original.rtp().unwrap().port(), 5000);
        assert_eq!(original.rtp().unwrap().address(), "10.0.0.1");
        assert_eq!(original.rtmp(), None);

        original.set_rtp(None);
        assert_eq!(copy.rtp().unwrap().address(), "10.0.0.2");
    }

    #[test]
    fn test_display_lists_present_slots() {
        let transport = Transport::new().with_rtp(rtp("10.0.0.1", 5000));
        assert_eq!(
            transport.to_string(),
            "Transport [rtp=TransportRtp [address=10.0.0.1, port=5000]]"
        );

        let transport = Transport::new().with_rtmp(rtmp("alice"));
        assert_eq!(
            transport.to_string(),
            format!("Transport [rtmp=TransportRtmp [url={}, publish=alice]]", URL)
        );
    }

    #[test]
    fn test_negotiate_self() {
        let full = Transport::new()
            .with_rtp(rtp("10.0.0.1", 5000))
            .with_rtmp(rtmp("room").with_play("room"));

        let (neg_answ, neg_off) = Transport::negotiate(&full, &full).unwrap();
        assert!(neg_answ.rtmp().is_some());
        assert!(neg_off.rtmp().is_some());
        assert_eq!(neg_answ, full);
        assert_eq!(neg_off, full);
    }

    #[test]
    fn test_negotiate_asymmetric_rtmp_is_cleared() {
        let answerer = Transport::new()
            .with_rtp(rtp("10.0.0.1", 5000))
            .with_rtmp(rtmp("bob"));
        let offerer = Transport::new().with_rtp(rtp("10.0.0.2", 6000));

        let (neg_answ, neg_off) = Transport::negotiate(&answerer, &offerer).unwrap();
        assert_eq!(neg_answ.rtmp(), None);
        assert_eq!(neg_off.rtmp(), None);
        assert!(answerer.rtmp().is_some());
    }

    #[test]
    fn test_negotiate_endpoints_keep_their_own_values() {
        let answerer = Transport::new().with_rtp(rtp("10.0.0.1", 5000));
        let offerer = Transport::new().with_rtp(rtp("10.0.0.2", 6000));

        let (neg_answ, neg_off) = Transport::negotiate(&answerer, &offerer).unwrap();
        assert_eq!(neg_answ, answerer);
        assert_eq!(neg_off, offerer);
    }

    #[test]
    fn test_negotiate_no_shared_kind() {
        let answerer = Transport::new().with_rtmp(rtmp("bob"));
        let offerer = Transport::new().with_rtp(rtp("10.0.0.2", 6000));
        assert!(Transport::negotiate(&answerer, &offerer).is_none());
    }

    #[test]
    fn test_negotiate_fails_when_rtmp_does_not_intersect() {
        let other = TransportRtmp::new("rtmp://elsewhere/live")
            .unwrap()
            .with_publish("alice");
        let answerer = Transport::new().with_rtmp(rtmp("bob"));
        let offerer = Transport::new().with_rtmp(other);
        assert!(Transport::negotiate(&answerer, &offerer).is_none());
    }

    #[test]
    fn test_negotiate_disabled_endpoint() {
        let answerer = Transport::new().with_rtp(rtp("10.0.0.1", 0));
        let offerer = Transport::new().with_rtp(rtp("10.0.0.2", 6000));
        assert!(Transport::negotiate(&answerer, &offerer).is_none());
    }

    #[test]
    fn test_negotiate_empty() {
        assert!(Transport::negotiate(&Transport::new(), &Transport::new()).is_none());
    }

    #[test]
    fn test_serde_round_trip() {
        let json = r#"{"rtp":{"address":"10.0.0.1","port":5000}}"#;
        let transport: Transport = serde_json::from_str(json).unwrap();
        assert_eq!(transport.rtp().unwrap().port(), 5000);
        assert_eq!(transport.rtmp(), None);
        assert_eq!(serde_json::to_string(&transport).unwrap(), json);

        let bad = r#"{"rtp":{"address":"","port":5000}}"#;
        assert!(serde_json::from_str::<Transport>(bad).is_err());
    }
}
