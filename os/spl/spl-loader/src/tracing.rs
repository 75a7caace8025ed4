//! # Trace output

use spl_boot::BootContext;
use spl_console::console_trace;
use spl_image::HeaderResolution;

pub fn trace_boot_context(ctx: &BootContext) {
    console_trace!("Boot context in SPL:\n");
    console_trace!("   stage = {:?}", ctx.stage());
    if let Some(device) = ctx.device() {
        console_trace!(", device = {device}");
    }
    if let Some(mode) = ctx.mode() {
        console_trace!(", mode = {mode}");
    }
    console_trace!("\n");

    let Some(resolution) = ctx.image() else {
        return;
    };
    let image = resolution.image();
    console_trace!("   image = {}", image.name);
    console_trace!(", os = {}", image.os);
    console_trace!(", size = {}", image.total_size);
    console_trace!(", load = {}", image.load_address);
    console_trace!(", entry = {}", image.entry_address);
    console_trace!(", header = ");
    match resolution {
        HeaderResolution::Parsed(_) => console_trace!("parsed"),
        HeaderResolution::Defaulted(_) => console_trace!("defaulted"),
    }
    console_trace!("\n");
}
