pub const DEFAULT_BREAKPOINT: u32 = 768;

const VISIBLE_CLASS: &str = "translate-x-0";
const HIDDEN_CLASS: &str = "-translate-x-full";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SidebarPhase {
    Closed,
    OpenWithOverlay,
}

/// The dimming layer shown behind an open sidebar. Clicking it closes the
/// sidebar again.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OverlayHandle {
    id: u64,
}

impl OverlayHandle {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn element_id(&self) -> &'static str {
        "sidebar-overlay"
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SidebarController {
    breakpoint: u32,
    overlay: Option<OverlayHandle>,
    overlays_created: u64,
}

impl SidebarController {
    pub fn new(breakpoint: u32) -> Self {
        Self {
            breakpoint,
            overlay: None,
            overlays_created: 0,
        }
    }

    pub fn toggle(&mut self) -> SidebarPhase {
        match self.phase() {
            SidebarPhase::Closed => self.open(),
            SidebarPhase::OpenWithOverlay => self.close(),
        }
        self.phase()
    }

    /// Collapses an open sidebar once the viewport reaches the desktop
    /// breakpoint. Never opens it. Returns true if a close happened.
    pub fn on_viewport_resize(&mut self, width: u32) -> bool {
        if width >= self.breakpoint && self.is_open() {
            tracing::debug!(width, breakpoint = self.breakpoint, "auto-closing sidebar");
            self.close();
            return true;
        }
        false
    }

    pub fn phase(&self) -> SidebarPhase {
        if self.overlay.is_some() {
            SidebarPhase::OpenWithOverlay
        } else {
            SidebarPhase::Closed
        }
    }

    pub fn is_open(&self) -> bool {
        self.phase() == SidebarPhase::OpenWithOverlay
    }

    pub fn overlay(&self) -> Option<OverlayHandle> {
        self.overlay
    }

    pub fn overlay_count(&self) -> usize {
        usize::from(self.overlay.is_some())
    }

    /// Transform class for the sidebar container.
    pub fn visual_class(&self) -> &'static str {
        if self.is_open() {
            VISIBLE_CLASS
        } else {
            HIDDEN_CLASS
        }
    }

    fn open(&mut self) {
        self.overlays_created += 1;
        self.overlay = Some(OverlayHandle {
            id: self.overlays_created,
        });
        tracing::debug!(overlay = self.overlays_created, "sidebar opened");
    }

    fn close(&mut self) {
        if let Some(overlay) = self.overlay.take() {
            tracing::debug!(overlay = overlay.id, "sidebar closed");
        }
    }
}

impl Default for SidebarController {
    fn default() -> Self {
        Self::new(DEFAULT_BREAKPOINT)
    }
}
