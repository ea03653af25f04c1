//! Payload negotiation
//!
//! Matches the payloads of an offer against the locally supported ones

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::domain::format::FormatParameters;
use crate::domain::shared::{MediaSpecError, Result};

/// Highest RTP payload type
pub const MAX_PAYLOAD_TYPE: u8 = 127;

/// RTP payload description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PayloadRecord", into = "PayloadRecord")]
pub struct Payload {
    id: u8,
    name: String,
    clock_rate: u32,
    channels: u8,
    format_parameters: Option<FormatParameters>,
}

#[derive(Serialize, Deserialize)]
struct PayloadRecord {
    id: u8,
    name: String,
    clock_rate: u32,
    #[serde(default = "default_channels")]
    channels: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    format_parameters: Option<FormatParameters>,
}

fn default_channels() -> u8 {
    1
}

impl Payload {
    pub fn new(id: u8, name: impl Into<String>, clock_rate: u32) -> Result<Self> {
        let name = name.into();
        if id > MAX_PAYLOAD_TYPE {
            return Err(MediaSpecError::InvalidArgument(format!(
                "payload type {} out of range 0..={}",
                id, MAX_PAYLOAD_TYPE
            )));
        }
        if name.trim().is_empty() {
            return Err(MediaSpecError::InvalidArgument(
                "payload name can not be empty".to_string(),
            ));
        }
        if clock_rate == 0 {
            return Err(MediaSpecError::InvalidArgument(format!(
                "clock rate of {} can not be zero",
                name
            )));
        }

        Ok(Self {
            id,
            name,
            clock_rate,
            channels: default_channels(),
            format_parameters: None,
        })
    }

    pub fn with_channels(mut self, channels: u8) -> Result<Self> {
        if channels == 0 {
            return Err(MediaSpecError::InvalidArgument(format!(
                "channel count of {} can not be zero",
                self.name
            )));
        }
        self.channels = channels;
        Ok(self)
    }

    pub fn with_format_parameters(mut self, params: impl Into<FormatParameters>) -> Self {
        self.format_parameters = Some(params.into());
        self
    }

    pub fn id(&self) -> u8 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn clock_rate(&self) -> u32 {
        self.clock_rate
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    pub fn format_parameters(&self) -> Option<&FormatParameters> {
        self.format_parameters.as_ref()
    }

    /// `name/clock_rate`, followed by `/channels` when there is more than one
    pub fn encoding(&self) -> String {
        if self.channels > 1 {
            format!("{}/{}/{}", self.name, self.clock_rate, self.channels)
        } else {
            format!("{}/{}", self.name, self.clock_rate)
        }
    }

    /// Same codec, clock rate and channel count
    pub fn matches(&self, other: &Payload) -> bool {
        self.name.eq_ignore_ascii_case(&other.name)
            && self.clock_rate == other.clock_rate
            && self.channels == other.channels
    }

    /// Payload both sides can use, keeping the offered payload type
    ///
    /// Format parameters carried by only one side are dropped.
    pub fn intersect(&self, offered: &Payload) -> Result<Payload> {
        if !self.matches(offered) {
            return Err(MediaSpecError::Incompatible(format!(
                "{} does not match {}",
                self.encoding(),
                offered.encoding()
            )));
        }

        let format_parameters = match (&self.format_parameters, &offered.format_parameters) {
            (Some(mine), Some(theirs)) => Some(mine.intersect(theirs)?),
            _ => None,
        };

        Ok(Payload {
            id: offered.id,
            name: offered.name.clone(),
            clock_rate: offered.clock_rate,
            channels: offered.channels,
            format_parameters,
        })
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Payload [id={}, encoding={}", self.id, self.encoding())?;
        if let Some(params) = &self.format_parameters {
            write!(f, ", formatParameters={}", params)?;
        }
        write!(f, "]")
    }
}

impl TryFrom<PayloadRecord> for Payload {
    type Error = MediaSpecError;

    fn try_from(record: PayloadRecord) -> Result<Self> {
        let mut payload =
            Payload::new(record.id, record.name, record.clock_rate)?.with_channels(record.channels)?;
        payload.format_parameters = record.format_parameters;
        Ok(payload)
    }
}

impl From<Payload> for PayloadRecord {
    fn from(payload: Payload) -> Self {
        Self {
            id: payload.id,
            name: payload.name,
            clock_rate: payload.clock_rate,
            channels: payload.channels,
            format_parameters: payload.format_parameters,
        }
    }
}

/// Payload Negotiator
pub struct PayloadNegotiator {
    supported: Vec<Payload>,
}

impl PayloadNegotiator {
    pub fn new(supported: Vec<Payload>) -> Self {
        Self { supported }
    }

    /// Negotiate payloads based on offer
    ///
    /// Returns the payloads both sides support, in the offer's preference
    /// order
    pub fn negotiate(&self, offered: &[Payload]) -> Vec<Payload> {
        offered
            .iter()
            .filter_map(|payload| {
                let supported = self.find_match(payload)?;
                match supported.intersect(payload) {
                    Ok(negotiated) => Some(negotiated),
                    Err(e) => {
                        debug!("Dropping payload {}: {}", payload.id(), e);
                        None
                    }
                }
            })
            .collect()
    }

    /// First supported payload matching the offered one
    pub fn find_match(&self, offered: &Payload) -> Option<&Payload> {
        self.supported.iter().find(|p| p.matches(offered))
    }
}
