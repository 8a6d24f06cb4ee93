//! Value types shared by the frame codec and the driver.
//!
//! Every enum here mirrors a field of the DAC7678 register map; the bit
//! patterns themselves live in [`crate::frame`] so that this module stays a
//! purely logical vocabulary.

/// Errors returned by the driver.
///
/// The type is generic over the I2C implementation's error so that transport
/// failures can be handed back to the caller unchanged, while still telling
/// apart the two phases of a read-back transaction: a device that never
/// acknowledged the command select ([`Error::Transmit`]) looks very different
/// on the bus from one that failed mid-read ([`Error::Receive`]).
#[derive(Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub enum Error<E> {
    /// A DAC code was outside the 12-bit range `0..=4095`.
    ///
    /// The offending value is carried along. Nothing was sent on the bus.
    InvalidValue(u16),
    /// A channel was not valid for the requested operation.
    ///
    /// This covers [`Channel::All`] used with a write mode other than
    /// [`WriteMode::WriteAndUpdateAll`], and `All` passed to a per-channel
    /// read-back.
    InvalidChannel,
    /// A read-back reply contained a bit pattern the register cannot hold.
    ///
    /// Only the flexible reference register can produce this: its mode field
    /// is three bits wide but defines four values.
    InvalidReadback,
    /// The transport failed while sending a command frame.
    Transmit(E),
    /// The transport failed while reading a register reply.
    ///
    /// Only reachable after the command select was transmitted successfully.
    Receive(E),
}

/// DAC output channel selection.
///
/// The DAC7678 provides 8 independent output channels. [`Channel::All`] is a
/// broadcast alias the device only defines for the write-and-update-all
/// command; using it anywhere else is rejected with
/// [`Error::InvalidChannel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
#[repr(u8)]
pub enum Channel {
    /// DAC output channel A
    A = 0,
    /// DAC output channel B
    B = 1,
    /// DAC output channel C
    C = 2,
    /// DAC output channel D
    D = 3,
    /// DAC output channel E
    E = 4,
    /// DAC output channel F
    F = 5,
    /// DAC output channel G
    G = 6,
    /// DAC output channel H
    H = 7,
    /// Target all DAC channels simultaneously (broadcast nibble `0xF`)
    All = 0x0F,
}

/// The eight per-channel variants in register order, `A` through `H`.
pub const CHANNELS: [Channel; 8] = [
    Channel::A,
    Channel::B,
    Channel::C,
    Channel::D,
    Channel::E,
    Channel::F,
    Channel::G,
    Channel::H,
];

impl Channel {
    /// Convert a numeric channel index (0–7) into a [`Channel`].
    ///
    /// Returns `None` for any other index; the broadcast alias has no index.
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Channel::A),
            1 => Some(Channel::B),
            2 => Some(Channel::C),
            3 => Some(Channel::D),
            4 => Some(Channel::E),
            5 => Some(Channel::F),
            6 => Some(Channel::G),
            7 => Some(Channel::H),
            _ => None,
        }
    }
}

/// An 8-bit set of channels, bit *i* = channel *i*.
///
/// The power-down and LDAC registers address channels through this mask
/// rather than through the command byte's channel nibble.
///
/// ```
/// use dac7678::{Channel, ChannelMask};
///
/// let mask = ChannelMask::from(Channel::D) | Channel::F.into() | Channel::H.into();
/// assert_eq!(mask.bits(), 0b1010_1000);
/// assert!(mask.contains(Channel::F));
/// assert!(!mask.contains(Channel::A));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub struct ChannelMask(u8);

impl ChannelMask {
    /// The empty set.
    pub const NONE: ChannelMask = ChannelMask(0x00);
    /// All eight channels.
    pub const ALL: ChannelMask = ChannelMask(0xFF);

    /// Build a mask from its raw bit pattern.
    pub const fn from_bits(bits: u8) -> Self {
        ChannelMask(bits)
    }

    /// The raw bit pattern.
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// This mask with `channel` added.
    ///
    /// [`Channel::All`] adds every channel.
    pub const fn with(self, channel: Channel) -> Self {
        match channel {
            Channel::All => ChannelMask::ALL,
            ch => ChannelMask(self.0 | 1 << ch as u8),
        }
    }

    /// Whether `channel` is in the set.
    ///
    /// [`Channel::All`] is contained only by the full mask.
    pub const fn contains(self, channel: Channel) -> bool {
        match channel {
            Channel::All => self.0 == 0xFF,
            ch => self.0 & (1 << ch as u8) != 0,
        }
    }
}

impl From<Channel> for ChannelMask {
    fn from(channel: Channel) -> Self {
        ChannelMask::NONE.with(channel)
    }
}

impl core::ops::BitOr for ChannelMask {
    type Output = ChannelMask;

    fn bitor(self, rhs: ChannelMask) -> ChannelMask {
        ChannelMask(self.0 | rhs.0)
    }
}

/// How a value write affects the analog outputs.
///
/// This is host-side state: the session remembers one mode and uses it to
/// pick the command opcode for every subsequent value write. The device has
/// no such register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub enum WriteMode {
    /// Buffer the value in the channel's input register; the output does not
    /// change until an update is committed.
    WriteOnly,
    /// Write the input register and immediately update that channel's output.
    WriteAndUpdate,
    /// Write the input register and update all eight outputs (software
    /// global LDAC). The only mode that accepts [`Channel::All`].
    WriteAndUpdateAll,
}

/// Power state applied to a set of channels.
///
/// The power-down register is mask-based, so the mode always travels with a
/// [`ChannelMask`] rather than a single channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
#[repr(u8)]
pub enum PowerMode {
    /// Normal operation
    PowerOn = 0b00,
    /// Output pulled to ground through 1 kΩ
    PullDown1k = 0b01,
    /// Output pulled to ground through 100 kΩ
    PullDown100k = 0b10,
    /// Output in high impedance
    HighImpedance = 0b11,
}

/// Output value forced on all channels when the hardware CLR pin asserts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
#[repr(u8)]
pub enum ClearCode {
    /// Clear to zero scale
    Zero = 0b00,
    /// Clear to mid scale
    MidScale = 0b01,
    /// Clear to full scale
    FullScale = 0b10,
    /// Ignore the CLR pin entirely
    Disabled = 0b11,
}

/// Static (always on/off) control of the internal voltage reference.
///
/// Effective only while the flexible reference register defers to it
/// ([`ReferenceFlexi::AsStatic`]); the device honors whichever reference
/// register was written last.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub enum ReferenceStatic {
    /// Internal reference powered down
    Off,
    /// Internal reference always on
    On,
}

/// Flexible-mode control of the internal voltage reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
#[repr(u8)]
pub enum ReferenceFlexi {
    /// Reference powers up and down with DAC activity
    SynchToDac = 0b100,
    /// Reference always on, independent of the DACs
    AlwaysOn = 0b101,
    /// Reference always off
    AlwaysOff = 0b110,
    /// Defer to the static reference register
    AsStatic = 0b000,
}

/// Software reset mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
#[repr(u8)]
pub enum ResetMode {
    /// Power-on reset (default behavior)
    Por = 0b00,
    /// Reset and force high-speed mode
    SetHighSpeed = 0b01,
    /// Reset while preserving high-speed mode
    MaintainHighSpeed = 0b10,
}

/// Logical state of the ADDR0 address selection pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub enum AddrPin {
    /// Pin tied to GND
    Low,
    /// Pin tied to VDD
    High,
    /// Pin left floating
    Float,
}

/// I2C address configuration.
///
/// The DAC7678 derives its 7-bit address from the tri-state ADDR0 pin:
///
/// | ADDR0  | I2C Address |
/// |-------:|------------:|
/// | Low    | `0x48` |
/// | High   | `0x4A` |
/// | Float  | `0x4C` |
///
/// [`Address::Custom`] carries a raw 7-bit address for buses with a
/// non-standard arrangement (e.g. behind an address translator).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub enum Address {
    /// Address derived from the ADDR0 pin state per the datasheet.
    Pin(AddrPin),
    /// A raw 7-bit address.
    Custom(u8),
}

impl Address {
    /// Compute the 7-bit I2C address.
    pub const fn to_u8(self) -> u8 {
        let base = 0x48; // 0b1001_000

        match self {
            Address::Pin(AddrPin::Low) => base,
            Address::Pin(AddrPin::High) => base | 0b010,
            Address::Pin(AddrPin::Float) => base | 0b100,
            Address::Custom(addr) => addr & 0x7F,
        }
    }
}
