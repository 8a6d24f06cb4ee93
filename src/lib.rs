//! *Texas Instruments DAC7678 Driver for Rust Embedded HAL*
//!
//! This crate provides a driver for the TI **DAC7678**, an 8-channel,
//! 12-bit digital-to-analog converter controlled over I²C.
//!
//! The driver is built on top of the Rust
//! [embedded-hal](https://github.com/rust-embedded/embedded-hal)
//! and provides a typed, `no_std` compatible API covering the full register
//! map: per-channel value writes, buffered writes with deferred update,
//! power-down control, clear-code selection, LDAC masking, internal
//! reference control (static and flexible modes), software reset, and
//! read-back of every readable register.
//!
//! ---
//!
//! ## Initialization
//!
//! To initialize the driver, create an instance of [`DAC7678`] by providing:
//! - an I²C interface implementing [`embedded_hal::i2c::I2c`],
//! - the I²C address configuration derived from the ADDR0 pin.
//!
//! ```
//! use dac7678::{Address, AddrPin, DAC7678};
//! use embedded_hal_mock::eh1::i2c::Mock;
//!
//! let i2c = Mock::new(&[]);
//!
//! let mut dac = DAC7678::new(i2c, Address::Pin(AddrPin::Low));
//! # dac.destroy().done();
//! ```
//!
//! One [`DAC7678`] instance is one session with one chip. Sessions hold no
//! global state, so several instances can coexist on a shared bus (one per
//! chip, distinguished by the ADDR0 pin) using whatever bus-sharing
//! mechanism your HAL provides.
//!
//! ---
//!
//! ## Writing to a channel
//!
//! The session carries a [`WriteMode`] that selects what a value write does
//! to the analog outputs. The default, [`WriteMode::WriteAndUpdate`], writes
//! the channel's input register and immediately updates its output:
//!
//! ```
//! use dac7678::{Address, AddrPin, Channel, DAC7678};
//! use embedded_hal_mock::eh1::i2c::{Mock, Transaction};
//!
//! let i2c = Mock::new(&[
//!     Transaction::write(0x48, vec![0x30, 0xFF, 0x00]),
//! ]);
//!
//! let mut dac = DAC7678::new(i2c, Address::Pin(AddrPin::Low));
//! dac.set_value(Channel::A, 0x0FF0).unwrap();
//! # dac.destroy().done();
//! ```
//!
//! Values are 12-bit codes, `0..=4095`. Out-of-range values are rejected
//! with [`Error::InvalidValue`] before anything reaches the bus — there is
//! no silent clamping.
//!
//! Switching to [`WriteMode::WriteOnly`] buffers values in the input
//! registers; they take effect on the outputs only once
//! [`DAC7678::commit_update`] runs (or the hardware LDAC pin fires):
//!
//! ```
//! use dac7678::{Address, AddrPin, Channel, DAC7678, WriteMode};
//! use embedded_hal_mock::eh1::i2c::{Mock, Transaction};
//!
//! let i2c = Mock::new(&[
//!     Transaction::write(0x48, vec![0x02, 0x40, 0x00]), // buffer C
//!     Transaction::write(0x48, vec![0x10, 0x00, 0x00]), // latch
//! ]);
//!
//! let mut dac = DAC7678::new(i2c, Address::Pin(AddrPin::Low));
//! dac.set_write_mode(WriteMode::WriteOnly);
//! dac.set_value(Channel::C, 0x0400).unwrap();
//! dac.commit_update(Channel::C).unwrap();
//! # dac.destroy().done();
//! ```
//!
//! ---
//!
//! ## Read-back
//!
//! Every readable register has a `read_*` counterpart. A read is two bus
//! transactions, a one-byte command select followed by a two-byte reply, and
//! the driver reports which of the two failed ([`Error::Transmit`] vs
//! [`Error::Receive`]) so a dead device can be told apart from a collision
//! during the reply.
//!
//! ---
//!
//! ## Error handling
//!
//! All fallible operations return `Result<_, Error<E>>` where `E` is the
//! I²C implementation's error type. The driver never retries, never logs,
//! and never panics on caller input; retry policy belongs to the caller.
//!
//! ---
//!
//! ## More information
//!
//! - DAC7678 datasheet: <https://www.ti.com/product/DAC7678>

#![cfg_attr(not(test), no_std)]
#![warn(missing_debug_implementations, missing_docs)]

mod frame;
mod types;

pub use types::{
    AddrPin, Address, Channel, ChannelMask, ClearCode, Error, PowerMode, ReferenceFlexi,
    ReferenceStatic, ResetMode, WriteMode, CHANNELS,
};

pub use frame::MAX_VALUE;

use embedded_hal::i2c::I2c;
use frame::Command;

/// DAC7678 driver.
///
/// One instance is one session with one chip: it owns the I²C handle for the
/// session's lifetime, remembers the 7-bit address and the current
/// [`WriteMode`], and serializes all register traffic through `&mut self`.
#[derive(Debug)]
pub struct DAC7678<I2C>
where
    I2C: I2c,
{
    i2c: I2C,
    address: u8,
    write_mode: WriteMode,
}

impl<I2C> DAC7678<I2C>
where
    I2C: I2c,
{
    /// Create a new DAC7678 driver instance bound to `address`.
    ///
    /// Binding happens at construction, so every method on the returned
    /// session is immediately usable. The write mode starts as
    /// [`WriteMode::WriteAndUpdate`].
    pub fn new(i2c: I2C, address: Address) -> Self {
        Self {
            i2c,
            address: address.to_u8(),
            write_mode: WriteMode::WriteAndUpdate,
        }
    }

    /// Select the write mode used by subsequent [`set_value`] calls.
    ///
    /// Host-side state only; nothing is sent on the bus.
    ///
    /// [`set_value`]: DAC7678::set_value
    pub fn set_write_mode(&mut self, mode: WriteMode) {
        self.write_mode = mode;
    }

    /// The session's current write mode.
    pub fn write_mode(&self) -> WriteMode {
        self.write_mode
    }

    /// Write a 12-bit code to a channel, using the session's write mode to
    /// decide whether and which outputs update.
    ///
    /// [`Channel::All`] is accepted only while the mode is
    /// [`WriteMode::WriteAndUpdateAll`]; the broadcast nibble does not exist
    /// for the other two commands.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidValue`] for codes above 4095,
    /// [`Error::InvalidChannel`] for a misused broadcast alias (both checked
    /// before any bus traffic), and [`Error::Transmit`] if the transport
    /// fails.
    pub fn set_value(&mut self, channel: Channel, value: u16) -> Result<(), Error<I2C::Error>> {
        let bytes = frame::value_write(self.write_mode, channel, value)?;
        self.transmit(&bytes)
    }

    /// Write all eight channels in register order, A through H.
    ///
    /// All eight values are validated up front; an out-of-range entry means
    /// nothing is transmitted at all. Transmission itself is sequential and
    /// not transactional: if channel *i* fails, channels `0..i` have already
    /// been written and stay written, channels `i+1..` are never attempted,
    /// and the error is returned immediately.
    pub fn set_all_values(&mut self, values: &[u16; 8]) -> Result<(), Error<I2C::Error>> {
        for &value in values {
            if value > MAX_VALUE {
                return Err(Error::InvalidValue(value));
            }
        }

        for (&channel, &value) in CHANNELS.iter().zip(values) {
            self.set_value(channel, value)?;
        }
        Ok(())
    }

    /// Latch pending input-register values to the outputs without re-sending
    /// any code.
    ///
    /// The device performs this update globally; the channel argument exists
    /// for call-site clarity and does not reach the wire.
    pub fn commit_update(&mut self, channel: Channel) -> Result<(), Error<I2C::Error>> {
        let bytes = frame::update(channel);
        self.transmit(&bytes)
    }

    /// Apply a power mode to every channel in `mask`.
    ///
    /// Channels outside the mask keep their previous power state.
    pub fn set_power(
        &mut self,
        mode: PowerMode,
        mask: ChannelMask,
    ) -> Result<(), Error<I2C::Error>> {
        let bytes = frame::power_write(mode, mask);
        self.transmit(&bytes)
    }

    /// Select the code forced on all outputs when the CLR pin asserts.
    pub fn set_clear_code(&mut self, code: ClearCode) -> Result<(), Error<I2C::Error>> {
        let bytes = frame::clear_code_write(code);
        self.transmit(&bytes)
    }

    /// Configure which channels bypass the LDAC signal.
    ///
    /// A channel in the mask updates its output on every input-register
    /// write; a channel outside it buffers until LDAC (or
    /// [`commit_update`](DAC7678::commit_update)).
    pub fn set_ldac_mask(&mut self, mask: ChannelMask) -> Result<(), Error<I2C::Error>> {
        let bytes = frame::ldac_write(mask);
        self.transmit(&bytes)
    }

    /// Switch the internal reference on or off (static mode).
    ///
    /// Effective only while the flexible register defers to the static one;
    /// the device honors whichever reference register was written last.
    pub fn set_reference_static(&mut self, mode: ReferenceStatic) -> Result<(), Error<I2C::Error>> {
        let bytes = frame::ref_static_write(mode);
        self.transmit(&bytes)
    }

    /// Configure the internal reference's flexible mode.
    pub fn set_reference_flexi(&mut self, mode: ReferenceFlexi) -> Result<(), Error<I2C::Error>> {
        let bytes = frame::ref_flexi_write(mode);
        self.transmit(&bytes)
    }

    /// Perform a software reset of the DAC.
    ///
    /// The reset behavior depends on the selected [`ResetMode`].
    pub fn reset(&mut self, mode: ResetMode) -> Result<(), Error<I2C::Error>> {
        let bytes = frame::reset_write(mode);
        self.transmit(&bytes)
    }

    /// Read back a channel's input register (the buffered, possibly
    /// not-yet-latched code).
    pub fn read_value(&mut self, channel: Channel) -> Result<u16, Error<I2C::Error>> {
        let rx = self.read_channel_register(Command::InputRegister, channel)?;
        Ok(frame::decode_value(rx))
    }

    /// Read back a channel's DAC register (the code currently driving the
    /// output).
    pub fn read_dac_register(&mut self, channel: Channel) -> Result<u16, Error<I2C::Error>> {
        let rx = self.read_channel_register(Command::DacRegister, channel)?;
        Ok(frame::decode_value(rx))
    }

    /// Read back the power-down register as `(mode, mask)`.
    pub fn read_power(&mut self) -> Result<(PowerMode, ChannelMask), Error<I2C::Error>> {
        let rx = self.read_register(frame::read_select(Command::Power, None))?;
        Ok(frame::decode_power(rx))
    }

    /// Read back the clear-code register.
    pub fn read_clear_code(&mut self) -> Result<ClearCode, Error<I2C::Error>> {
        let rx = self.read_register(frame::read_select(Command::ClearCode, None))?;
        Ok(frame::decode_clear_code(rx))
    }

    /// Read back the LDAC mask register.
    pub fn read_ldac_mask(&mut self) -> Result<ChannelMask, Error<I2C::Error>> {
        let rx = self.read_register(frame::read_select(Command::LdacMask, None))?;
        Ok(frame::decode_ldac(rx))
    }

    /// Read back the static reference register.
    pub fn read_reference_static(&mut self) -> Result<ReferenceStatic, Error<I2C::Error>> {
        let rx = self.read_register(frame::read_select(Command::RefStatic, None))?;
        Ok(frame::decode_ref_static(rx))
    }

    /// Read back the flexible reference register.
    ///
    /// # Errors
    ///
    /// Besides transport failures, [`Error::InvalidReadback`] if the reply
    /// carries a mode pattern the register does not define.
    pub fn read_reference_flexi(&mut self) -> Result<ReferenceFlexi, Error<I2C::Error>> {
        let rx = self.read_register(frame::read_select(Command::RefFlexi, None))?;
        Ok(frame::decode_ref_flexi(rx)?)
    }

    /// Destroy the driver and return the wrapped I2C interface.
    pub fn destroy(self) -> I2C {
        self.i2c
    }

    fn transmit(&mut self, bytes: &[u8; 3]) -> Result<(), Error<I2C::Error>> {
        self.i2c.write(self.address, bytes).map_err(Error::Transmit)
    }

    fn read_channel_register(
        &mut self,
        cmd: Command,
        channel: Channel,
    ) -> Result<[u8; 2], Error<I2C::Error>> {
        if matches!(channel, Channel::All) {
            return Err(Error::InvalidChannel);
        }
        self.read_register(frame::read_select(cmd, Some(channel)))
    }

    /// One-byte command select, then a two-byte reply. The reply depends on
    /// the select just written, so the two transactions must stay ordered
    /// and unbatched.
    fn read_register(&mut self, select: u8) -> Result<[u8; 2], Error<I2C::Error>> {
        self.i2c
            .write(self.address, &[select])
            .map_err(Error::Transmit)?;

        let mut rx = [0u8; 2];
        self.i2c
            .read(self.address, &mut rx)
            .map_err(Error::Receive)?;
        Ok(rx)
    }
}
