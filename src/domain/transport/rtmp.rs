//! RTMP stream transport

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::domain::shared::{MediaSpecError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct RtmpStream {
    url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    publish: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    play: Option<String>,
}

/// RTMP transport: server url plus the stream names published and played
#[derive(Serialize, Deserialize)]
#[serde(try_from = "RtmpStream", into = "RtmpStream")]
pub struct TransportRtmp {
    inner: Mutex<RtmpStream>,
}

fn check_url(url: &str) -> Result<()> {
    if url.trim().is_empty() {
        return Err(MediaSpecError::InvalidArgument(
            "url can not be empty".to_string(),
        ));
    }
    Ok(())
}

fn non_empty(name: Option<String>) -> Option<String> {
    name.filter(|n| !n.trim().is_empty())
}

impl TransportRtmp {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let url = url.into();
        check_url(&url)?;

        Ok(Self {
            inner: Mutex::new(RtmpStream {
                url,
                publish: None,
                play: None,
            }),
        })
    }

    pub fn with_publish(self, publish: impl Into<String>) -> Self {
        self.set_publish(Some(publish.into()));
        self
    }

    pub fn with_play(self, play: impl Into<String>) -> Self {
        self.set_play(Some(play.into()));
        self
    }

    fn lock(&self) -> MutexGuard<'_, RtmpStream> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn url(&self) -> String {
        self.lock().url.clone()
    }

    pub fn publish(&self) -> Option<String> {
        self.lock().publish.clone()
    }

    pub fn play(&self) -> Option<String> {
        self.lock().play.clone()
    }

    pub fn set_url(&self, url: impl Into<String>) -> Result<()> {
        let url = url.into();
        check_url(&url)?;
        self.lock().url = url;
        Ok(())
    }

    /// Empty names are stored as absent
    pub fn set_publish(&self, publish: Option<String>) {
        self.lock().publish = non_empty(publish);
    }

    pub fn set_play(&self, play: Option<String>) {
        self.lock().play = non_empty(play);
    }

    fn snapshot(&self) -> RtmpStream {
        self.lock().clone()
    }

    /// Connect the two sides of an RTMP exchange
    ///
    /// Both must point at the same url and at least one must publish a
    /// stream. Each side then plays what the other publishes.
    pub fn intersect(
        answerer: &TransportRtmp,
        offerer: &TransportRtmp,
    ) -> Option<(TransportRtmp, TransportRtmp)> {
        let answ = answerer.snapshot();
        let off = offerer.snapshot();

        if answ.url != off.url {
            return None;
        }
        if answ.publish.is_none() && off.publish.is_none() {
            return None;
        }

        let neg_answ = RtmpStream {
            url: answ.url.clone(),
            publish: answ.publish.clone(),
            play: off.publish.clone(),
        };
        let neg_off = RtmpStream {
            url: off.url,
            publish: off.publish,
            play: answ.publish,
        };

        Some((
            TransportRtmp {
                inner: Mutex::new(neg_answ),
            },
            TransportRtmp {
                inner: Mutex::new(neg_off),
            },
        ))
    }
}

impl Clone for TransportRtmp {
    fn clone(&self) -> Self {
        Self {
            inner: Mutex::new(self.snapshot()),
        }
    }
}

impl PartialEq for TransportRtmp {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other) || self.snapshot() == other.snapshot()
    }
}

impl Eq for TransportRtmp {}

impl fmt::Debug for TransportRtmp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stream = self.snapshot();
        f.debug_struct("TransportRtmp")
            .field("url", &stream.url)
            .field("publish", &stream.publish)
            .field("play", &stream.play)
            .finish()
    }
}

impl fmt::Display for TransportRtmp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stream = self.snapshot();
        write!(f, "TransportRtmp [url={}", stream.url)?;
        if let Some(publish) = &stream.publish {
            write!(f, ", publish={}", publish)?;
        }
        if let Some(play) = &stream.play {
            write!(f, ", play={}", play)?;
        }
        write!(f, "]")
    }
}

impl TryFrom<RtmpStream> for TransportRtmp {
    type Error = MediaSpecError;

    fn try_from(stream: RtmpStream) -> Result<Self> {
        let rtmp = TransportRtmp::new(stream.url)?;
        rtmp.set_publish(stream.publish);
        rtmp.set_play(stream.play);
        Ok(rtmp)
    }
}

impl From<TransportRtmp> for RtmpStream {
    fn from(rtmp: TransportRtmp) -> Self {
        rtmp.inner.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}
