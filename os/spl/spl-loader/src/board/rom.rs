use spl_boot::device::BootRom;

unsafe extern "C" {
    fn omap_boot_device() -> u32;
    fn omap_boot_mode() -> u32;
}

/// Boot parameters the OMAP ROM code saved before jumping to the SPL.
pub struct OmapBootRom;

impl BootRom for OmapBootRom {
    fn query_boot_device(&self) -> u32 {
        // SAFETY: reads the parameter block saved by the start-up code.
        unsafe { omap_boot_device() }
    }

    fn query_boot_mode(&self) -> u32 {
        // SAFETY: as above.
        unsafe { omap_boot_mode() }
    }
}
