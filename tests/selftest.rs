//! End-to-end self-test of the driver's public contract.
//!
//! Mirrors the write-then-read-back verification a hardware bring-up would
//! run on a real chip, with `embedded-hal-mock` standing in for the bus.
//! Everything here goes through the public API only.

use dac7678::{
    AddrPin, Address, Channel, ChannelMask, ClearCode, PowerMode, ReferenceFlexi, ReferenceStatic,
    WriteMode, CHANNELS, DAC7678,
};
use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};

const ADDR: u8 = 0x48;

fn value_frame(cmd: u8, ch: u8, code: u16) -> I2cTransaction {
    I2cTransaction::write(ADDR, vec![cmd << 4 | ch, (code >> 4) as u8, (code << 4) as u8])
}

fn readback(select: u8, reply: [u8; 2]) -> [I2cTransaction; 2] {
    [
        I2cTransaction::write(ADDR, vec![select]),
        I2cTransaction::read(ADDR, reply.to_vec()),
    ]
}

/// Buffer a distinct code into every input register, verify each one reads
/// back unchanged, then latch and verify the DAC registers followed suit.
#[test]
fn input_and_dac_register_write_read_cycle() {
    let codes: Vec<u16> = (0..8).map(|i| i * 512 + 21).collect();

    let mut expectations = Vec::new();
    for (i, &code) in codes.iter().enumerate() {
        expectations.push(value_frame(0x0, i as u8, code));
    }
    for (i, &code) in codes.iter().enumerate() {
        let reply = [(code >> 4) as u8, (code << 4) as u8];
        expectations.extend(readback(i as u8, reply));
    }
    expectations.push(I2cTransaction::write(ADDR, vec![0x10, 0x00, 0x00]));
    for (i, &code) in codes.iter().enumerate() {
        let reply = [(code >> 4) as u8, (code << 4) as u8];
        expectations.extend(readback(0x10 | i as u8, reply));
    }

    let mut dac = DAC7678::new(I2cMock::new(&expectations), Address::Pin(AddrPin::Low));
    dac.set_write_mode(WriteMode::WriteOnly);

    for (&channel, &code) in CHANNELS.iter().zip(&codes) {
        dac.set_value(channel, code).unwrap();
    }
    for (&channel, &code) in CHANNELS.iter().zip(&codes) {
        assert_eq!(dac.read_value(channel).unwrap(), code);
    }

    dac.commit_update(Channel::A).unwrap();
    for (&channel, &code) in CHANNELS.iter().zip(&codes) {
        assert_eq!(dac.read_dac_register(channel).unwrap(), code);
    }

    dac.destroy().done();
}

/// Sweep every power mode over a rotating mask and confirm the register
/// reports the same mode/mask pair.
#[test]
fn power_register_write_read_cycle() {
    let cases = [
        (PowerMode::PowerOn, 0b0000_0001u8),
        (PowerMode::PullDown1k, 0b0001_1000),
        (PowerMode::PullDown100k, 0b1010_1000),
        (PowerMode::HighImpedance, 0b1111_1111),
    ];

    let mut expectations = Vec::new();
    for &(mode, mask) in &cases {
        let field = (mask as u16) << 5;
        expectations.push(I2cTransaction::write(
            ADDR,
            vec![0x40, (field >> 8) as u8 | (mode as u8) << 5, (field & 0xFF) as u8],
        ));
        expectations.extend(readback(0x40, [(mode as u8) << 5, mask]));
    }

    let mut dac = DAC7678::new(I2cMock::new(&expectations), Address::Pin(AddrPin::Low));

    for (mode, mask) in cases {
        let mask = ChannelMask::from_bits(mask);
        dac.set_power(mode, mask).unwrap();
        assert_eq!(dac.read_power().unwrap(), (mode, mask));
    }

    dac.destroy().done();
}

#[test]
fn clear_code_register_write_read_cycle() {
    let cases = [
        (ClearCode::Zero, 0x00u8),
        (ClearCode::MidScale, 0x10),
        (ClearCode::FullScale, 0x20),
        (ClearCode::Disabled, 0x30),
    ];

    let mut expectations = Vec::new();
    for &(_, bits) in &cases {
        expectations.push(I2cTransaction::write(ADDR, vec![0x50, 0x00, bits]));
        expectations.extend(readback(0x50, [0x00, bits]));
    }

    let mut dac = DAC7678::new(I2cMock::new(&expectations), Address::Pin(AddrPin::Low));

    for (code, _) in cases {
        dac.set_clear_code(code).unwrap();
        assert_eq!(dac.read_clear_code().unwrap(), code);
    }

    dac.destroy().done();
}

#[test]
fn ldac_register_write_read_cycle() {
    let masks = [0x00u8, 0x01, 0x80, 0b0101_0101, 0xFF];

    let mut expectations = Vec::new();
    for &mask in &masks {
        expectations.push(I2cTransaction::write(ADDR, vec![0x60, mask, 0x00]));
        expectations.extend(readback(0x60, [0x00, mask]));
    }

    let mut dac = DAC7678::new(I2cMock::new(&expectations), Address::Pin(AddrPin::Low));

    for mask in masks {
        let mask = ChannelMask::from_bits(mask);
        dac.set_ldac_mask(mask).unwrap();
        assert_eq!(dac.read_ldac_mask().unwrap(), mask);
    }

    dac.destroy().done();
}

#[test]
fn reference_registers_write_read_cycle() {
    let mut expectations = Vec::new();

    // Static: on, then off.
    expectations.push(I2cTransaction::write(ADDR, vec![0x80, 0x00, 0x10]));
    expectations.extend(readback(0x80, [0x00, 0x10]));
    expectations.push(I2cTransaction::write(ADDR, vec![0x80, 0x00, 0x00]));
    expectations.extend(readback(0x80, [0x00, 0x00]));

    // Flexi: all four modes; reply carries the mode in the high byte.
    let flexi = [
        (ReferenceFlexi::SynchToDac, 0x40u8),
        (ReferenceFlexi::AlwaysOn, 0x50),
        (ReferenceFlexi::AlwaysOff, 0x60),
        (ReferenceFlexi::AsStatic, 0x00),
    ];
    for &(_, bits) in &flexi {
        expectations.push(I2cTransaction::write(ADDR, vec![0x90, bits, 0x00]));
        expectations.extend(readback(0x90, [bits, 0x00]));
    }

    let mut dac = DAC7678::new(I2cMock::new(&expectations), Address::Pin(AddrPin::Low));

    dac.set_reference_static(ReferenceStatic::On).unwrap();
    assert_eq!(dac.read_reference_static().unwrap(), ReferenceStatic::On);
    dac.set_reference_static(ReferenceStatic::Off).unwrap();
    assert_eq!(dac.read_reference_static().unwrap(), ReferenceStatic::Off);

    for (mode, _) in flexi {
        dac.set_reference_flexi(mode).unwrap();
        assert_eq!(dac.read_reference_flexi().unwrap(), mode);
    }

    dac.destroy().done();
}

/// Full bring-up sequence: reference on, outputs powered, LDAC released,
/// clear-to-zero, then a mid-scale broadcast.
#[test]
fn bring_up_sequence() {
    let expectations = [
        I2cTransaction::write(ADDR, vec![0x80, 0x00, 0x10]),
        I2cTransaction::write(ADDR, vec![0x40, 0x1F, 0xE0]),
        I2cTransaction::write(ADDR, vec![0x60, 0xFF, 0x00]),
        I2cTransaction::write(ADDR, vec![0x50, 0x00, 0x00]),
        I2cTransaction::write(ADDR, vec![0x2F, 0x80, 0x00]),
    ];

    let mut dac = DAC7678::new(I2cMock::new(&expectations), Address::Pin(AddrPin::Low));

    dac.set_reference_static(ReferenceStatic::On).unwrap();
    dac.set_power(PowerMode::PowerOn, ChannelMask::ALL).unwrap();
    dac.set_ldac_mask(ChannelMask::ALL).unwrap();
    dac.set_clear_code(ClearCode::Zero).unwrap();

    dac.set_write_mode(WriteMode::WriteAndUpdateAll);
    dac.set_value(Channel::All, 0x0800).unwrap();

    dac.destroy().done();
}
