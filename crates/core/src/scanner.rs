//! Camera scanner lifecycle.
//!
//! ```text
//! Idle ──Start──▶ RequestingPermission ──PermissionGranted──▶ Scanning ◀─┐
//!   ▲                     │                                    │ Pause   │ Resume
//!   │                     └──PermissionDenied──▶ Stopped ◀─Stop─┤        │
//!   └───────────────────────────Reset─────────────┘            ▼        │
//!                                                             Paused ───┘
//! ```
//!
//! Decoded codes are only accepted while `Scanning`; after an IMEI is staged
//! the scanner pauses until the confirmation notice closes.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScannerState {
    Idle,
    RequestingPermission,
    Scanning,
    Paused,
    Stopped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScannerEvent {
    Start,
    PermissionGranted,
    PermissionDenied,
    Pause,
    Resume,
    Stop,
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Scanner cannot handle {event:?} while {from:?}")]
pub struct InvalidTransition {
    pub from: ScannerState,
    pub event: ScannerEvent,
}

/// Compute the next state, or reject the event.
pub fn next_state(
    from: ScannerState,
    event: ScannerEvent,
) -> Result<ScannerState, InvalidTransition> {
    use ScannerEvent as E;
    use ScannerState as S;

    let to = match (from, event) {
        (S::Idle, E::Start) => S::RequestingPermission,
        (S::RequestingPermission, E::PermissionGranted) => S::Scanning,
        (S::RequestingPermission, E::PermissionDenied) => S::Stopped,
        (S::Scanning, E::Pause) => S::Paused,
        (S::Paused, E::Resume) => S::Scanning,
        (S::RequestingPermission | S::Scanning | S::Paused, E::Stop) => S::Stopped,
        (S::Stopped, E::Reset) => S::Idle,
        _ => return Err(InvalidTransition { from, event }),
    };
    Ok(to)
}

/// Scanner state holder used by the scanning view.
#[derive(Debug, Clone)]
pub struct Scanner {
    state: ScannerState,
}

impl Default for Scanner {
    fn default() -> Self {
        Self {
            state: ScannerState::Idle,
        }
    }
}

impl Scanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ScannerState {
        self.state
    }

    /// Apply an event. The state is unchanged when the event is rejected.
    pub fn apply(&mut self, event: ScannerEvent) -> Result<ScannerState, InvalidTransition> {
        self.state = next_state(self.state, event)?;
        Ok(self.state)
    }

    /// Whether a decoded code should be processed right now.
    pub fn accepts_scans(&self) -> bool {
        self.state == ScannerState::Scanning
    }
}
