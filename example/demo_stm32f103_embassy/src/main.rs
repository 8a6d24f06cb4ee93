#![no_std]
#![no_main]

use {defmt_rtt as _, panic_probe as _};

use defmt::info;
use embassy_executor::Spawner;
use embassy_stm32::i2c::I2c;
use embassy_stm32::time::Hertz;
use embassy_time::{Duration, Timer};

use dac7678::{AddrPin, Address, Channel, ChannelMask, ReferenceStatic, DAC7678, MAX_VALUE};

// One period of a sine wave, mid-scale centered, 12-bit codes.
const SINE: [u16; 32] = [
    2048, 2447, 2831, 3185, 3495, 3750, 3939, 4056, 4095, 4056, 3939, 3750, 3495, 3185, 2831,
    2447, 2048, 1648, 1264, 910, 600, 345, 156, 39, 0, 39, 156, 345, 600, 910, 1264, 1648,
];

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let mut config = embassy_stm32::Config::default();
    {
        use embassy_stm32::rcc::*;
        config.rcc.hse = Some(Hse {
            freq: Hertz(16_000_000),
            mode: HseMode::Oscillator,
        });
        config.rcc.pll = Some(Pll {
            src: PllSource::HSE,
            prediv: PllPreDiv::DIV2,
            mul: PllMul::MUL9, // 16Mhz / 2 * 9  = 72Mhz
        });
        config.rcc.ahb_pre = AHBPrescaler::DIV1;
        config.rcc.apb1_pre = APBPrescaler::DIV2;
        config.rcc.apb2_pre = APBPrescaler::DIV1;
        config.rcc.sys = Sysclk::PLL1_P;
    }

    let p = embassy_stm32::init(config);

    let i2c1 = I2c::new_blocking(p.I2C1, p.PB6, p.PB7, Default::default());

    let mut dac = DAC7678::new(i2c1, Address::Pin(AddrPin::Low));

    dac.set_reference_static(ReferenceStatic::On).unwrap();
    dac.set_ldac_mask(ChannelMask::ALL).unwrap();

    info!("DAC7678 up, sawtooth on A, sine on B");

    let mut saw: u16 = 0;
    let mut phase: usize = 0;

    loop {
        dac.set_value(Channel::A, saw).unwrap();
        dac.set_value(Channel::B, SINE[phase]).unwrap();

        saw = saw.wrapping_add(16);
        if saw > MAX_VALUE {
            saw = 0;
        }
        phase = (phase + 1) % SINE.len();

        Timer::after(Duration::from_millis(1)).await;
    }
}
