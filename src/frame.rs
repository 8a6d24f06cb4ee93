//! Register frame codec.
//!
//! Pure translation between logical operations and the DAC7678's wire
//! format: 3-byte write frames, 1-byte read selects, 2-byte read replies.
//! No I/O happens here; the driver in [`crate`] owns the bus.
//!
//! Every write frame is `[command << 4 | channel, msb, lsb]`. The command
//! nibble is shifted into place by this module, never by callers — the
//! `Command` discriminants below are the raw 4-bit values from the
//! datasheet's command table.

use crate::types::{
    Channel, ChannelMask, ClearCode, Error, PowerMode, ReferenceFlexi, ReferenceStatic, ResetMode,
    WriteMode,
};

/// Largest code the 12-bit DAC accepts.
pub const MAX_VALUE: u16 = 4095;

/// DAC7678 command nibbles.
///
/// Read and write accesses to the same register share a nibble; the I2C
/// transfer direction tells them apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub(crate) enum Command {
    /// Write to / read from a channel's input register
    InputRegister = 0x0,
    /// Update DAC registers from input registers; read a channel's DAC register
    DacRegister = 0x1,
    /// Write input register, update all outputs
    WriteUpdateAll = 0x2,
    /// Write input register, update that output
    WriteUpdate = 0x3,
    /// Power-down register
    Power = 0x4,
    /// Clear-code register
    ClearCode = 0x5,
    /// LDAC mask register
    LdacMask = 0x6,
    /// Software reset
    Reset = 0x7,
    /// Static internal-reference register
    RefStatic = 0x8,
    /// Flexible internal-reference register
    RefFlexi = 0x9,
}

/// Codec-level rejection, mapped into [`Error`] by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FrameError {
    /// Code outside `0..=4095`
    Value(u16),
    /// Channel not valid for the operation
    Channel,
    /// Reply bit pattern outside the register's defined values
    Readback,
}

impl<E> From<FrameError> for Error<E> {
    fn from(err: FrameError) -> Self {
        match err {
            FrameError::Value(v) => Error::InvalidValue(v),
            FrameError::Channel => Error::InvalidChannel,
            FrameError::Readback => Error::InvalidReadback,
        }
    }
}

impl WriteMode {
    pub(crate) const fn command(self) -> Command {
        match self {
            WriteMode::WriteOnly => Command::InputRegister,
            WriteMode::WriteAndUpdate => Command::WriteUpdate,
            WriteMode::WriteAndUpdateAll => Command::WriteUpdateAll,
        }
    }
}

const fn frame(cmd: Command, channel_nibble: u8, msb: u8, lsb: u8) -> [u8; 3] {
    [(cmd as u8) << 4 | channel_nibble, msb, lsb]
}

/// Encode a value write for the given mode.
///
/// The 12-bit code is split as `[.., code[11:4], code[3:0] << 4]`.
/// `Channel::All` (broadcast nibble) is only defined for the
/// write-and-update-all command.
pub(crate) fn value_write(
    mode: WriteMode,
    channel: Channel,
    value: u16,
) -> Result<[u8; 3], FrameError> {
    if value > MAX_VALUE {
        return Err(FrameError::Value(value));
    }
    if matches!(channel, Channel::All) && mode != WriteMode::WriteAndUpdateAll {
        return Err(FrameError::Channel);
    }

    Ok(frame(
        mode.command(),
        channel as u8,
        (value >> 4) as u8,
        (value << 4) as u8,
    ))
}

/// Encode an update commit.
///
/// The device latches every pending input register on this command; the
/// channel nibble is don't-care and encoded as zero.
pub(crate) fn update(_channel: Channel) -> [u8; 3] {
    frame(Command::DacRegister, 0, 0, 0)
}

/// Encode a power-down register write.
///
/// The channel mask occupies a 13-bit field shifted up by 5; its top bits
/// land in byte 1 alongside the 2-bit mode at bits 6:5, the rest fill byte 2.
pub(crate) fn power_write(mode: PowerMode, mask: ChannelMask) -> [u8; 3] {
    let field = (mask.bits() as u16) << 5;
    frame(
        Command::Power,
        0,
        (field >> 8) as u8 | (mode as u8) << 5,
        (field & 0xFF) as u8,
    )
}

/// Encode a clear-code register write (byte 2, bits 5:4).
pub(crate) fn clear_code_write(code: ClearCode) -> [u8; 3] {
    frame(Command::ClearCode, 0, 0, (code as u8) << 4)
}

/// Encode an LDAC mask register write (byte 1).
///
/// A set bit lets that channel's output track input-register writes without
/// waiting for LDAC.
pub(crate) fn ldac_write(mask: ChannelMask) -> [u8; 3] {
    frame(Command::LdacMask, 0, mask.bits(), 0)
}

/// Encode a software reset (byte 1, bits 7:6).
pub(crate) fn reset_write(mode: ResetMode) -> [u8; 3] {
    frame(Command::Reset, 0, (mode as u8) << 6, 0)
}

/// Encode a static reference register write (byte 2, bit 4).
pub(crate) fn ref_static_write(mode: ReferenceStatic) -> [u8; 3] {
    let bit = match mode {
        ReferenceStatic::On => 0x10,
        ReferenceStatic::Off => 0x00,
    };
    frame(Command::RefStatic, 0, 0, bit)
}

/// Encode a flexible reference register write (byte 1, bits 6:4).
pub(crate) fn ref_flexi_write(mode: ReferenceFlexi) -> [u8; 3] {
    frame(Command::RefFlexi, 0, (mode as u8) << 4, 0)
}

/// Build the 1-byte command select that precedes a register read.
///
/// Only the input and DAC registers are per-channel; every other register is
/// global and selected with a bare command nibble.
pub(crate) fn read_select(cmd: Command, channel: Option<Channel>) -> u8 {
    let nibble = match channel {
        Some(ch) => ch as u8,
        None => 0,
    };
    (cmd as u8) << 4 | nibble
}

/// Decode a value-class reply (input or DAC register) back into a 12-bit code.
pub(crate) fn decode_value(rx: [u8; 2]) -> u16 {
    (rx[0] as u16) << 4 | (rx[1] as u16) >> 4
}

/// Decode a power-down register reply.
///
/// The read layout is not the write layout's mirror: the device reports the
/// mode in the high byte's bits 6:5 and the full channel mask in the low
/// byte.
pub(crate) fn decode_power(rx: [u8; 2]) -> (PowerMode, ChannelMask) {
    let mode = match rx[0] >> 5 & 0b11 {
        0b00 => PowerMode::PowerOn,
        0b01 => PowerMode::PullDown1k,
        0b10 => PowerMode::PullDown100k,
        _ => PowerMode::HighImpedance,
    };
    (mode, ChannelMask::from_bits(rx[1]))
}

/// Decode a clear-code register reply (low byte, bits 5:4).
pub(crate) fn decode_clear_code(rx: [u8; 2]) -> ClearCode {
    match rx[1] >> 4 & 0b11 {
        0b00 => ClearCode::Zero,
        0b01 => ClearCode::MidScale,
        0b10 => ClearCode::FullScale,
        _ => ClearCode::Disabled,
    }
}

/// Decode an LDAC mask register reply (low byte).
pub(crate) fn decode_ldac(rx: [u8; 2]) -> ChannelMask {
    ChannelMask::from_bits(rx[1])
}

/// Decode a static reference register reply (low byte, bit 4).
pub(crate) fn decode_ref_static(rx: [u8; 2]) -> ReferenceStatic {
    if rx[1] & 0x10 != 0 {
        ReferenceStatic::On
    } else {
        ReferenceStatic::Off
    }
}

/// Decode a flexible reference register reply.
///
/// Asymmetric with the write path: the mode comes back in the **high** byte's
/// bits 6:4. That is the device's register layout, not a driver quirk. The
/// 3-bit field has four undefined patterns, which surface as a readback
/// error.
pub(crate) fn decode_ref_flexi(rx: [u8; 2]) -> Result<ReferenceFlexi, FrameError> {
    match rx[0] >> 4 & 0b111 {
        0b100 => Ok(ReferenceFlexi::SynchToDac),
        0b101 => Ok(ReferenceFlexi::AlwaysOn),
        0b110 => Ok(ReferenceFlexi::AlwaysOff),
        0b000 => Ok(ReferenceFlexi::AsStatic),
        _ => Err(FrameError::Readback),
    }
}
