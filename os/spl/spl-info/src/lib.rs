//! # SPL Configuration and Boot Interface
//!
//! This crate is the single source of truth for the board-level constants the
//! secondary program loader (SPL) is built with, and for the small set of
//! types that every other SPL crate exchanges: physical addresses, boot ROM
//! codes and the entry-point ABI of the next boot stage.
//!
//! ## Architecture
//!
//! ### Configuration ([`config`])
//! Compile-time constants for the board:
//! * **Link Addresses**: where the SPL itself runs and where the next stage is linked
//! * **Raw Mode**: the fixed sector holding the next-stage image
//! * **Filesystem Mode**: boot partition index and payload file name
//! * **Console / I2C**: baud rate and bus parameters for early bring-up
//!
//! The constants are gathered into a [`SplConfig`] value once at start-up and
//! threaded explicitly through the boot pipeline. There is no runtime
//! configuration surface and no persisted state.
//!
//! ### Boot ROM Interface ([`boot`])
//! * **Boot Device Codes**: values the ROM leaves behind for the selected device
//! * **Boot Mode Codes**: raw sectors vs. FAT filesystem
//! * **Entry ABI**: [`ImageEntryFn`](boot::ImageEntryFn), a no-argument, non-returning procedure
//!
//! ### Addresses ([`address`])
//! [`PhysicalAddress`] keeps raw 32-bit bus addresses apart from sizes and
//! offsets. The SPL runs with the MMU disabled, so there is no virtual
//! counterpart.
//!
//! ## Memory Layout
//!
//! ```text
//! 0x4030_0000 ┌─────────────────────────────────┐
//!             │        On-chip SRAM             │
//! SPL_TEXT    ├─────────────────────────────────┤ 0x4030_4350
//!             │     SPL text / data / bss       │
//! SPL_STACK   ├─────────────────────────────────┤ 0x4030_D800
//!             └─────────────────────────────────┘
//!
//! 0x8000_0000 ┌─────────────────────────────────┐
//!             │            SDRAM                │
//!             ├─────────────────────────────────┤ SYS_TEXT_BASE - 64
//!             │     legacy image header         │
//! SYS_TEXT    ├─────────────────────────────────┤ 0x80E8_0000
//!             │     next-stage payload          │
//!             └─────────────────────────────────┘
//! ```

#![cfg_attr(not(any(test, doctest)), no_std)]
#![deny(unsafe_code)]

pub mod address;
pub mod boot;
pub mod config;

pub use address::PhysicalAddress;
pub use config::{OsTagPolicy, SplConfig};
