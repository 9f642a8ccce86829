use tracing::{debug, info};

use super::{DrawContext, Popup};
use crate::state::window::Window;
use crate::state::WindowManager;
use crate::surface::Surface;

/// LIFO of open popups. Index 0 is the root menu; the last entry is active
/// and the only one that receives input.
#[derive(Debug, Default)]
pub struct MenuStack {
    popups: Vec<Popup>,
}

impl MenuStack {
    pub fn new() -> Self {
        Self { popups: Vec::new() }
    }

    pub fn push(&mut self, popup: Popup) {
        info!(
            "[MenuStack] push {} at {:?} (depth {})",
            popup.kind(),
            popup.rect(),
            self.popups.len() + 1
        );
        self.popups.push(popup);
    }

    pub fn pop(&mut self) -> Option<Popup> {
        let popup = self.popups.pop()?;
        info!("[MenuStack] pop {} (depth {})", popup.kind(), self.popups.len());
        Some(popup)
    }

    pub fn clear(&mut self) {
        if !self.popups.is_empty() {
            info!("[MenuStack] cleared {} popup(s)", self.popups.len());
            self.popups.clear();
        }
    }

    pub fn top(&self) -> Option<&Popup> {
        self.popups.last()
    }

    pub fn top_mut(&mut self) -> Option<&mut Popup> {
        self.popups.last_mut()
    }

    pub fn is_empty(&self) -> bool {
        self.popups.is_empty()
    }

    pub fn len(&self) -> usize {
        self.popups.len()
    }

    /// Bottom-to-top
    pub fn iter(&self) -> impl Iterator<Item = &Popup> {
        self.popups.iter()
    }

    pub fn kinds(&self) -> Vec<&'static str> {
        self.popups.iter().map(|p| p.kind()).collect()
    }

    /// Drop the lowest popup that lost its target, and everything stacked
    /// above it. Returns how many popups were closed.
    pub fn prune(&mut self, windows: &WindowManager) -> usize {
        let Some(index) = self.popups.iter_mut().position(|p| !p.refresh(windows)) else {
            return 0;
        };
        let closed = self.popups.len() - index;
        info!(
            "[MenuStack] target of {} gone; closing {} popup(s)",
            self.popups[index].kind(),
            closed
        );
        self.popups.truncate(index);
        closed
    }

    pub fn tick(&mut self) {
        for popup in &mut self.popups {
            popup.tick();
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface, ctx: &DrawContext<'_>) {
        for popup in &self.popups {
            popup.draw(surface, ctx);
        }
        if !self.popups.is_empty() {
            debug!("[MenuStack] drew {} popup(s)", self.popups.len());
        }
    }
}
