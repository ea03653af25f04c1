//! Media capability set
//!
//! A [`MediaSpec`] is one media line: the media types it carries, its
//! direction, its transports and its payloads.

pub mod mode;
pub mod payload;

pub use mode::Mode;
pub use payload::{Payload, PayloadNegotiator};

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use tracing::{debug, info};

use crate::domain::shared::{MediaSpecError, Result};
use crate::domain::transport::Transport;

/// Media type
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Audio,
    Video,
    Application,
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MediaType::Audio => "audio",
            MediaType::Video => "video",
            MediaType::Application => "application",
        };
        write!(f, "{}", name)
    }
}

/// Capabilities of one media line
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MediaSpec {
    #[serde(default)]
    pub types: BTreeSet<MediaType>,
    #[serde(default)]
    pub mode: Mode,
    #[serde(default)]
    pub transport: Transport,
    #[serde(default)]
    pub payloads: Vec<Payload>,
}

impl MediaSpec {
    pub fn new(types: impl IntoIterator<Item = MediaType>, transport: Transport) -> Self {
        Self {
            types: types.into_iter().collect(),
            mode: Mode::default(),
            transport,
            payloads: Vec::new(),
        }
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_payload(mut self, payload: Payload) -> Self {
        self.payloads.push(payload);
        self
    }

    /// Reduce an answerer and an offerer media line to what both can use
    ///
    /// Returns the answerer's and the offerer's negotiated lines. They share
    /// media types and payloads, while mode and transport stay per side.
    pub fn negotiate(answerer: &MediaSpec, offerer: &MediaSpec) -> Result<(MediaSpec, MediaSpec)> {
        let types: BTreeSet<MediaType> = answerer
            .types
            .intersection(&offerer.types)
            .copied()
            .collect();
        if types.is_empty() {
            return Err(MediaSpecError::NegotiationFailed(
                "no common media type".to_string(),
            ));
        }

        let (answ_mode, off_mode) = Mode::negotiate(answerer.mode, offerer.mode).ok_or_else(|| {
            MediaSpecError::NegotiationFailed(format!(
                "modes {} and {} are not compatible",
                answerer.mode, offerer.mode
            ))
        })?;

        let (answ_transport, off_transport) =
            Transport::negotiate(&answerer.transport, &offerer.transport).ok_or_else(|| {
                MediaSpecError::NegotiationFailed("no common transport".to_string())
            })?;

        let payloads = PayloadNegotiator::new(answerer.payloads.clone()).negotiate(&offerer.payloads);
        if payloads.is_empty() {
            return Err(MediaSpecError::NegotiationFailed(
                "no common payload".to_string(),
            ));
        }
        debug!("Negotiated {} payload(s)", payloads.len());

        let neg_answ = MediaSpec {
            types: types.clone(),
            mode: answ_mode,
            transport: answ_transport,
            payloads: payloads.clone(),
        };
        let neg_off = MediaSpec {
            types,
            mode: off_mode,
            transport: off_transport,
            payloads,
        };

        info!("Media negotiated: answerer {} / offerer {}", neg_answ, neg_off);
        Ok((neg_answ, neg_off))
    }
}

impl fmt::Display for MediaSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let types: Vec<String> = self.types.iter().map(|t| t.to_string()).collect();
        let payloads: Vec<String> = self.payloads.iter().map(|p| p.to_string()).collect();
        write!(
            f,
            "MediaSpec [types={}, mode={}, transport={}, payloads=[{}]]",
            types.join(","),
            self.mode,
            self.transport,
            payloads.join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::transport::{TransportRtmp, TransportRtp};

    fn audio(address: &str, port: u16) -> MediaSpec {
        MediaSpec::new(
            [MediaType::Audio],
            Transport::new().with_rtp(TransportRtp::new(address, port).unwrap()),
        )
        .with_payload(Payload::new(0, "PCMU", 8000).unwrap())
        .with_payload(Payload::new(8, "PCMA", 8000).unwrap())
    }

    #[test]
    fn test_negotiate_audio() {
        let answerer = audio("10.0.0.1", 5000).with_mode(Mode::RecvOnly);
        let offerer = audio("10.0.0.2", 6000);

        let (neg_answ, neg_off) = MediaSpec::negotiate(&answerer, &offerer).unwrap();
        assert_eq!(neg_answ.mode, Mode::RecvOnly);
        assert_eq!(neg_off.mode, Mode::SendOnly);
        assert_eq!(neg_answ.transport.rtp().unwrap().address(), "10.0.0.1");
        assert_eq!(neg_off.transport.rtp().unwrap().address(), "10.0.0.2");
        assert_eq!(neg_answ.payloads, neg_off.payloads);
        assert_eq!(neg_answ.payloads.len(), 2);
    }

    #[test]
    fn test_no_common_type() {
        let answerer = audio("10.0.0.1", 5000);
        let mut offerer = audio("10.0.0.2", 6000);
        offerer.types = [MediaType::Video].into_iter().collect();

        let err = MediaSpec::negotiate(&answerer, &offerer).unwrap_err();
        assert_eq!(
            err,
            MediaSpecError::NegotiationFailed("no common media type".to_string())
        );
    }

    #[test]
    fn test_incompatible_mode() {
        let answerer = audio("10.0.0.1", 5000).with_mode(Mode::SendOnly);
        let offerer = audio("10.0.0.2", 6000).with_mode(Mode::SendOnly);
        assert!(matches!(
            MediaSpec::negotiate(&answerer, &offerer),
            Err(MediaSpecError::NegotiationFailed(_))
        ));
    }

    #[test]
    fn test_no_common_transport() {
        let answerer = audio("10.0.0.1", 5000);
        let mut offerer = audio("10.0.0.2", 6000);
        offerer.transport = Transport::new().with_rtmp(
            TransportRtmp::new("rtmp://media.example.com/live")
                .unwrap()
                .with_publish("alice"),
        );

        let err = MediaSpec::negotiate(&answerer, &offerer).unwrap_err();
        assert_eq!(
            err,
            MediaSpecError::NegotiationFailed("no common transport".to_string())
        );
    }

    #[test]
    fn test_no_common_payload() {
        let answerer = audio("10.0.0.1", 5000);
        let offerer = MediaSpec::new(
            [MediaType::Audio],
            Transport::new().with_rtp(TransportRtp::new("10.0.0.2", 6000).unwrap()),
        )
        .with_payload(Payload::new(9, "G722", 8000).unwrap());

        let err = MediaSpec::negotiate(&answerer, &offerer).unwrap_err();
        assert_eq!(
            err,
            MediaSpecError::NegotiationFailed("no common payload".to_string())
        );
    }

    #[test]
    fn test_inputs_untouched() {
        let answerer = audio("10.0.0.1", 5000);
        let offerer = audio("10.0.0.2", 6000);
        let (answ_before, off_before) = (answerer.clone(), offerer.clone());

        let _ = MediaSpec::negotiate(&answerer, &offerer).unwrap();
        assert_eq!(answerer, answ_before);
        assert_eq!(offerer, off_before);
    }
}
