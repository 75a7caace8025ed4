//! # Boot Attempt State

use crate::selector::{BootDevice, BootMode};
use spl_image::HeaderResolution;

/// Progress of the single boot attempt.
///
/// ```text
/// Init → DeviceSelected → ModeSelected → HeaderResolved → ImageMaterialized → Dispatched
///   └──────────────┴──────────────┴──────────────┴──────────────┴──→ Halted
/// ```
///
/// Stages only ever move forward. `Dispatched` and `Halted` are terminal.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd)]
pub enum BootStage {
    Init,
    DeviceSelected,
    ModeSelected,
    HeaderResolved,
    ImageMaterialized,
    Dispatched,
    Halted,
}

impl BootStage {
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Dispatched | Self::Halted)
    }

    /// Whether `next` is reachable from `self` without going back.
    #[must_use]
    pub fn can_advance_to(self, next: Self) -> bool {
        if self.is_terminal() {
            return false;
        }
        match next {
            Self::Halted => true,
            _ => next > self,
        }
    }
}

/// Everything resolved so far during the boot attempt.
///
/// Created once at pipeline start and passed down by `&mut`; there is no
/// other boot state. Fields are filled in as the stages advance and are never
/// rewritten.
#[derive(Debug, Clone)]
pub struct BootContext {
    stage: BootStage,
    device: Option<BootDevice>,
    mode: Option<BootMode>,
    image: Option<HeaderResolution>,
}

impl Default for BootContext {
    fn default() -> Self {
        Self::new()
    }
}

impl BootContext {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            stage: BootStage::Init,
            device: None,
            mode: None,
            image: None,
        }
    }

    #[must_use]
    pub const fn stage(&self) -> BootStage {
        self.stage
    }

    #[must_use]
    pub const fn device(&self) -> Option<BootDevice> {
        self.device
    }

    #[must_use]
    pub const fn mode(&self) -> Option<BootMode> {
        self.mode
    }

    #[must_use]
    pub const fn image(&self) -> Option<&HeaderResolution> {
        self.image.as_ref()
    }

    pub(crate) fn device_selected(&mut self, device: BootDevice) {
        self.advance(BootStage::DeviceSelected);
        self.device = Some(device);
    }

    pub(crate) fn mode_selected(&mut self, mode: BootMode) {
        self.advance(BootStage::ModeSelected);
        self.mode = Some(mode);
    }

    pub(crate) fn header_resolved(&mut self, image: HeaderResolution) {
        self.advance(BootStage::HeaderResolved);
        self.image = Some(image);
    }

    pub(crate) fn image_materialized(&mut self) {
        self.advance(BootStage::ImageMaterialized);
    }

    pub(crate) fn dispatched(&mut self) {
        self.advance(BootStage::Dispatched);
    }

    pub(crate) fn halted(&mut self) {
        self.advance(BootStage::Halted);
    }

    fn advance(&mut self, next: BootStage) {
        debug_assert!(
            self.stage.can_advance_to(next),
            "illegal boot stage transition {:?} -> {next:?}",
            self.stage
        );
        if self.stage.can_advance_to(next) {
            self.stage = next;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [BootStage; 7] = [
        BootStage::Init,
        BootStage::DeviceSelected,
        BootStage::ModeSelected,
        BootStage::HeaderResolved,
        BootStage::ImageMaterialized,
        BootStage::Dispatched,
        BootStage::Halted,
    ];

    #[test]
    fn never_moves_backwards() {
        for from in ALL {
            for to in ALL {
                if from.can_advance_to(to) && to != BootStage::Halted {
                    assert!(to > from, "{from:?} -> {to:?}");
                }
            }
        }
    }

    #[test]
    fn halted_reachable_from_every_live_stage() {
        for from in ALL.into_iter().filter(|s| !s.is_terminal()) {
            assert!(from.can_advance_to(BootStage::Halted), "{from:?}");
        }
    }

    #[test]
    fn terminal_stages_are_final() {
        for to in ALL {
            assert!(!BootStage::Dispatched.can_advance_to(to));
            assert!(!BootStage::Halted.can_advance_to(to));
        }
    }

    #[test]
    fn context_records_in_order() {
        let mut ctx = BootContext::new();
        assert_eq!(ctx.stage(), BootStage::Init);

        ctx.device_selected(BootDevice::PrimaryMmc);
        ctx.mode_selected(BootMode::Raw);
        assert_eq!(ctx.stage(), BootStage::ModeSelected);
        assert_eq!(ctx.device(), Some(BootDevice::PrimaryMmc));
        assert_eq!(ctx.mode(), Some(BootMode::Raw));

        ctx.halted();
        assert_eq!(ctx.stage(), BootStage::Halted);
    }

    #[test]
    #[should_panic(expected = "illegal boot stage transition")]
    fn backward_transition_is_rejected() {
        let mut ctx = BootContext::new();
        ctx.mode_selected(BootMode::Filesystem);
        ctx.device_selected(BootDevice::SecondaryMmc);
    }
}
