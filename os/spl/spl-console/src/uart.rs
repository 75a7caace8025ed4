//! # NS16550 Transmit Path

use bitfield_struct::bitfield;
use core::hint::spin_loop;
use core::ptr::{read_volatile, write_volatile};

/// Byte offset of the transmit holding register.
pub const THR_OFFSET: usize = 0x00;

/// Byte offset of the line status register.
///
/// The registers are spaced four bytes apart on this SoC.
pub const LSR_OFFSET: usize = 0x14;

/// NS16550 Line Status Register (LSR).
#[bitfield(u8)]
pub struct LineStatus {
    /// Bit 0: a received byte is waiting in RBR/FIFO.
    pub data_ready: bool,
    /// Bit 1: a received byte was lost.
    pub overrun_error: bool,
    /// Bit 2: parity mismatch on the received byte.
    pub parity_error: bool,
    /// Bit 3: missing stop bit on the received byte.
    pub framing_error: bool,
    /// Bit 4: line held low for longer than a character.
    pub break_interrupt: bool,
    /// Bit 5: THR (or TX FIFO) can accept another byte.
    pub thr_empty: bool,
    /// Bit 6: THR and the shift register are both empty.
    pub transmitter_empty: bool,
    /// Bit 7: at least one error is pending in the RX FIFO.
    pub rx_fifo_error: bool,
}

/// Transmit-only view of a memory-mapped NS16550.
///
/// The console is configured (baud rate, line format) by the board before
/// the SPL writes to it; this type only pushes bytes.
pub struct Ns16550 {
    base: usize,
}

impl Ns16550 {
    /// # Safety
    /// `base` must point to an NS16550 register block (or memory laid out like
    /// one) that stays valid for the lifetime of the value.
    #[must_use]
    pub const unsafe fn new(base: usize) -> Self {
        Self { base }
    }

    #[inline]
    #[must_use]
    pub fn line_status(&self) -> LineStatus {
        let lsr = (self.base + LSR_OFFSET) as *const u8;
        // SAFETY: `new` requires a valid register block.
        LineStatus::from_bits(unsafe { read_volatile(lsr) })
    }

    /// Write one byte, waiting for room in the transmitter first.
    pub fn putc(&mut self, byte: u8) {
        while !self.line_status().thr_empty() {
            spin_loop();
        }

        let thr = (self.base + THR_OFFSET) as *mut u8;
        // SAFETY: `new` requires a valid register block.
        unsafe { write_volatile(thr, byte) }
    }

    /// Write a string, expanding `\n` to `\r\n` for serial terminals.
    pub fn puts(&mut self, s: &str) {
        for b in s.bytes() {
            if b == b'\n' {
                self.putc(b'\r');
            }
            self.putc(b);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// RAM stand-in for the register block.
    #[repr(C, align(4))]
    struct FakeRegs([u8; 0x20]);

    #[test]
    fn lsr_bits() {
        let lsr = LineStatus::from_bits(0x60);
        assert!(lsr.thr_empty());
        assert!(lsr.transmitter_empty());
        assert!(!lsr.data_ready());
        assert_eq!(LineStatus::new().with_thr_empty(true).into_bits(), 0x20);
    }

    #[test]
    fn putc_writes_thr_when_ready() {
        let mut regs = FakeRegs([0; 0x20]);
        regs.0[LSR_OFFSET] = LineStatus::new().with_thr_empty(true).into_bits();

        let base = regs.0.as_mut_ptr() as usize;
        let mut uart = unsafe { Ns16550::new(base) };
        uart.putc(b'A');

        assert_eq!(regs.0[THR_OFFSET], b'A');
    }

    #[test]
    fn puts_ends_with_last_byte() {
        let mut regs = FakeRegs([0; 0x20]);
        regs.0[LSR_OFFSET] = LineStatus::new().with_thr_empty(true).into_bits();

        let base = regs.0.as_mut_ptr() as usize;
        let mut uart = unsafe { Ns16550::new(base) };
        uart.puts("ok\n");

        // THR only holds the most recent byte.
        assert_eq!(regs.0[THR_OFFSET], b'\n');
    }
}
