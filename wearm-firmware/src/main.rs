//! Wearm - Six-Axis Arm Servo Firmware
//!
//! Main firmware binary for STM32F103-based arm controller boards.
//! A host streams text requests over USART1; the controller task eases
//! every joint toward its target while the intake task keeps listening
//! for `stop`.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_stm32::gpio::{Level, Output, OutputType, Speed};
use embassy_stm32::time::{hz, Hertz};
use embassy_stm32::timer::simple_pwm::{PwmPin, SimplePwm};
use embassy_stm32::usart::{self, BufferedUart, Config as UartConfig};
use embassy_stm32::{bind_interrupts, peripherals, Config};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use wearm_drivers::{PwmServo, FRAME_PERIOD_US};

use crate::channels::CONSOLE_TX;
use crate::servos::ServoChannels;

mod channels;
mod config;
mod console;
mod servos;
mod tasks;

bind_interrupts!(struct Irqs {
    USART1 => usart::BufferedInterruptHandler<peripherals::USART1>;
});

/// Host link baud rate
const BAUD_RATE: u32 = 115_200;

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Wearm firmware starting...");

    let p = embassy_stm32::init(clock_config());
    info!("Peripherals initialized");

    // Servo PWM at the standard 50 Hz frame rate
    let frame = hz(1_000_000 / FRAME_PERIOD_US as u32);

    let tim2 = SimplePwm::new(
        p.TIM2,
        None,
        Some(PwmPin::new(p.PA1, OutputType::PushPull)),
        None,
        None,
        frame,
        Default::default(),
    )
    .split();

    let tim3 = SimplePwm::new(
        p.TIM3,
        Some(PwmPin::new(p.PA6, OutputType::PushPull)),
        None,
        None,
        None,
        frame,
        Default::default(),
    )
    .split();

    let tim4 = SimplePwm::new(
        p.TIM4,
        Some(PwmPin::new(p.PB6, OutputType::PushPull)),
        Some(PwmPin::new(p.PB7, OutputType::PushPull)),
        Some(PwmPin::new(p.PB8, OutputType::PushPull)),
        Some(PwmPin::new(p.PB9, OutputType::PushPull)),
        frame,
        Default::default(),
    )
    .split();

    let mut base = tim2.ch2;
    let mut gripper = tim3.ch1;
    let (mut wrist_pitch, mut wrist_roll, mut shoulder, mut elbow) =
        (tim4.ch1, tim4.ch2, tim4.ch3, tim4.ch4);
    base.enable();
    gripper.enable();
    wrist_pitch.enable();
    wrist_roll.enable();
    shoulder.enable();
    elbow.enable();

    let servos = ServoChannels {
        base: PwmServo::new(base),
        shoulder: PwmServo::new(shoulder),
        elbow: PwmServo::new(elbow),
        wrist_pitch: PwmServo::new(wrist_pitch),
        wrist_roll: PwmServo::new(wrist_roll),
        gripper: PwmServo::new(gripper),
    };
    info!("Servo PWM initialized");

    // Buzzer (active high)
    let buzzer = Output::new(p.PB12, Level::Low, Speed::Low);

    // Host UART (PA9=TX, PA10=RX)
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = BAUD_RATE;

    let tx_buf = TX_BUF.init([0u8; 256]);
    let rx_buf = RX_BUF.init([0u8; 256]);

    let uart = unwrap!(BufferedUart::new(
        p.USART1,
        p.PA10, // RX
        p.PA9,  // TX
        tx_buf,
        rx_buf,
        Irqs,
        uart_config,
    ));
    let (tx, rx) = uart.split();
    *CONSOLE_TX.lock().await = Some(tx);
    info!("UART initialized at {} baud", BAUD_RATE);

    spawner.spawn(tasks::intake_task(rx)).unwrap();
    spawner.spawn(tasks::controller_task(servos, buzzer)).unwrap();

    info!("All tasks spawned");
}

/// 72 MHz system clock from the 8 MHz crystal
fn clock_config() -> Config {
    use embassy_stm32::rcc::*;

    let mut config = Config::default();
    config.rcc.hse = Some(Hse {
        freq: Hertz(8_000_000),
        mode: HseMode::Oscillator,
    });
    config.rcc.pll = Some(Pll {
        src: PllSource::HSE,
        prediv: PllPreDiv::DIV1,
        mul: PllMul::MUL9,
    });
    config.rcc.sys = Sysclk::PLL1_P;
    config.rcc.ahb_pre = AHBPrescaler::DIV1;
    config.rcc.apb1_pre = APBPrescaler::DIV2;
    config.rcc.apb2_pre = APBPrescaler::DIV1;
    config
}
