//! Media direction

use serde::{Deserialize, Serialize};
use std::fmt;

/// Media direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Can send and receive
    #[default]
    SendRecv,
    /// Can only send
    SendOnly,
    /// Can only receive
    RecvOnly,
    /// Neither send nor receive
    Inactive,
}

impl Mode {
    fn from_flags(send: bool, recv: bool) -> Self {
        match (send, recv) {
            (true, true) => Mode::SendRecv,
            (true, false) => Mode::SendOnly,
            (false, true) => Mode::RecvOnly,
            (false, false) => Mode::Inactive,
        }
    }

    pub fn can_send(&self) -> bool {
        matches!(self, Mode::SendRecv | Mode::SendOnly)
    }

    pub fn can_recv(&self) -> bool {
        matches!(self, Mode::SendRecv | Mode::RecvOnly)
    }

    /// The same direction seen from the other side
    pub fn reverse(&self) -> Self {
        Mode::from_flags(self.can_recv(), self.can_send())
    }

    /// Directions each side ends up with
    ///
    /// The answerer sends only if the offerer can receive, and receives only
    /// if the offerer can send. `None` when no media would flow at all.
    pub fn negotiate(answerer: Mode, offerer: Mode) -> Option<(Mode, Mode)> {
        let send = answerer.can_send() && offerer.can_recv();
        let recv = answerer.can_recv() && offerer.can_send();

        match Mode::from_flags(send, recv) {
            Mode::Inactive => None,
            answ_mode => Some((answ_mode, answ_mode.reverse())),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mode::SendRecv => "sendrecv",
            Mode::SendOnly => "sendonly",
            Mode::RecvOnly => "recvonly",
            Mode::Inactive => "inactive",
        };
        write!(f, "{}", name)
    }
}
