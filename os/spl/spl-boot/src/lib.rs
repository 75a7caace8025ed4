//! # SPL Boot Flow
//!
//! Finds the next boot stage on the device the boot ROM came from, copies it
//! into memory and jumps to it. Every board service the flow needs sits
//! behind a trait in [`device`], so the whole flow runs on the host against
//! mocks and on the board against the real drivers.
//!
//! ## Stages
//!
//! | Stage                | Module       | Failure                              |
//! |----------------------|--------------|--------------------------------------|
//! | device selection     | [`selector`] | unsupported device, controller init  |
//! | mode selection       | [`selector`] | unsupported mode                     |
//! | raw sector load      | [`raw`]      | header or payload read               |
//! | FAT file load        | [`fat`]      | mount, full file read                |
//! | dispatch             | [`dispatch`] | OS tag (only if configured to halt)  |
//!
//! [`pipeline::boot`] strings them together. Each failure becomes a
//! [`BootError`] and ends in [`halt::fail`]; a missing image header never
//! does.
//!
//! ## Usage
//! ```rust
//! use spl_boot::device::{BootRom, FileSystem, MmcHost, TargetMemory};
//! use spl_boot::dispatch::DirectJump;
//! use spl_boot::pipeline::{Board, boot};
//! use spl_info::SplConfig;
//!
//! fn start<R, H, F, M>(mut board: Board<R, H, F, M>) -> !
//! where
//!     R: BootRom,
//!     H: MmcHost,
//!     F: FileSystem,
//!     M: TargetMemory,
//! {
//!     boot(&mut board, &SplConfig::DEFAULT, &DirectJump)
//! }
//! ```

#![cfg_attr(not(any(test, doctest)), no_std)]
#![allow(unsafe_code)]

pub mod context;
pub mod device;
pub mod dispatch;
mod error;
pub mod fat;
pub mod halt;
mod loaded;
pub mod pipeline;
pub mod raw;
pub mod selector;

pub use context::{BootContext, BootStage};
pub use error::{BootError, ReadStep};
pub use loaded::LoadedImage;
pub use selector::{BootDevice, BootMode};
