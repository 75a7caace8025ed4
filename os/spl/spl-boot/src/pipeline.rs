//! # Boot Pipeline
//!
//! One boot attempt, start to finish:
//!
//! 1. ask the boot ROM which device and mode it used,
//! 2. bring up that device,
//! 3. load the image with the matching loader,
//! 4. check the image OS tag and jump.
//!
//! Any error halts the board. There is no retry and no second device.

use crate::context::BootContext;
use crate::device::{BootRom, FileSystem, MmcHost, TargetMemory};
use crate::dispatch::{self, EntryInvoker, EntryPoint};
use crate::error::BootError;
use crate::halt;
use crate::selector;
use log::info;
use spl_info::SplConfig;

/// The board services the pipeline runs on.
pub struct Board<R, H, F, M> {
    pub rom: R,
    pub mmc: H,
    pub fs: F,
    pub memory: M,
}

/// Run every stage up to, but not including, the jump.
///
/// On error the context is left in [`BootStage::Halted`](crate::context::BootStage::Halted).
///
/// # Errors
/// The first [`BootError`] any stage reports.
pub fn run<R, H, F, M>(
    ctx: &mut BootContext,
    board: &mut Board<R, H, F, M>,
    config: &SplConfig,
) -> Result<EntryPoint, BootError>
where
    R: BootRom,
    H: MmcHost,
    F: FileSystem,
    M: TargetMemory,
{
    let result = run_stages(ctx, board, config);
    if result.is_err() {
        ctx.halted();
    }
    result
}

fn run_stages<R, H, F, M>(
    ctx: &mut BootContext,
    board: &mut Board<R, H, F, M>,
    config: &SplConfig,
) -> Result<EntryPoint, BootError>
where
    R: BootRom,
    H: MmcHost,
    F: FileSystem,
    M: TargetMemory,
{
    let Board {
        rom,
        mmc,
        fs,
        memory,
    } = board;

    // A stage is only recorded once its value has been accepted.
    let device = selector::select(&*rom);
    selector::controller_for(device)?;
    ctx.device_selected(device);
    let card = selector::init_storage(mmc, device)?;

    let mode = selector::check_mode(selector::select_mode(&*rom))?;
    ctx.mode_selected(mode);

    let loaded = selector::load_image(ctx, mode, card, fs, memory, config)?;
    info!(
        "loaded {} ({} bytes) at {}",
        loaded.image.name, loaded.bytes_loaded, loaded.image.load_address
    );

    dispatch::prepare(&loaded.image, config.os_policy)
}

/// Boot the board. Either the image runs or the board halts.
pub fn boot<R, H, F, M, I>(board: &mut Board<R, H, F, M>, config: &SplConfig, invoker: &I) -> !
where
    R: BootRom,
    H: MmcHost,
    F: FileSystem,
    M: TargetMemory,
    I: EntryInvoker + ?Sized,
{
    let mut ctx = BootContext::new();
    match run(&mut ctx, board, config) {
        Ok(entry) => dispatch::jump(&mut ctx, entry, invoker),
        Err(err) => halt::fail(&err),
    }
}
