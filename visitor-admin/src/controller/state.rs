//! Page load state machine
//!
//! `Idle → Loading → {Loaded, Error}`; any refresh trigger (mount,
//! post-mutation reload, manual retry) returns to `Loading`.

/// Load phase of a page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Loaded,
    Error,
}

/// What a page should draw, given its phase and whether it holds data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    /// Nothing to show yet
    Loading,
    /// Load failed with nothing to fall back on; offer a retry
    FullPageError,
    /// Draw the content, with the banner if one is set
    Content,
}

/// Phase plus the dismissible banners shared by every page
#[derive(Debug, Clone, Default)]
pub struct PageState {
    phase: Phase,
    error: Option<String>,
    notice: Option<String>,
}

impl PageState {
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    /// Error banner text
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Success banner text
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn begin_load(&mut self) {
        self.phase = Phase::Loading;
        self.error = None;
    }

    pub fn finish_load(&mut self) {
        self.phase = Phase::Loaded;
    }

    pub fn fail_load(&mut self, message: String) {
        self.phase = Phase::Error;
        self.error = Some(message);
    }

    /// Mutation failures leave the phase alone
    pub fn fail_action(&mut self, message: String) {
        self.error = Some(message);
        self.notice = None;
    }

    pub fn set_notice(&mut self, message: String) {
        self.notice = Some(message);
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    pub fn view_kind(&self, has_data: bool) -> ViewKind {
        match (self.phase, has_data) {
            (Phase::Idle | Phase::Loading, false) => ViewKind::Loading,
            (Phase::Error, false) => ViewKind::FullPageError,
            _ => ViewKind::Content,
        }
    }
}
