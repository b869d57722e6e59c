#![no_main]
#![no_std]

use core::fmt::Write;

use cortex_m_rt::entry;
use panic_halt as _;

use hal::{
    pac,
    prelude::*,
    serial::{Config, Serial},
    timer::{Channel1, Channel2, Channel3, Channel4},
};
use stm32f7xx_hal as hal;

use rotorbank::{
    app::FILE_BUF_LEN,
    config::SERVO_FRAME_HZ,
    hw::{BoardPins, PwmOutput, ServoBank, SysTickClock, Usart},
    protocol::Parser,
    storage::{BlobStore, MemStore},
    time::Clock,
    Controller,
};

/// Sequence available from a fresh boot.
const DEMO_SEQUENCE: &str = "\
# sweep every motor forward, then back
0,60,800
1,60,800
2,60,800
3,-60,800
4,-60,800
5,-60,800
";

#[entry]
fn main() -> ! {
    // Peripherals
    let dp = pac::Peripherals::take().unwrap();
    let cp = cortex_m::Peripherals::take().unwrap();

    // Clocks
    let rcc = dp.RCC.constrain();
    let clocks = rcc.cfgr.sysclk(216.MHz()).freeze();

    let pins = BoardPins::new(dp.GPIOA, dp.GPIOB, dp.GPIOD);

    // USART1 (DBG)
    let usart_cfg = Config {
        baud_rate: 115_200.bps(),
        ..Default::default()
    };
    let serial = Serial::new(
        dp.USART1,
        (pins.usart1.tx, pins.usart1.rx),
        &clocks,
        usart_cfg,
    );
    let mut usart = Usart::new(serial);

    // Servo PWM at 50 Hz: TIM3 CH1-4 and TIM4 CH1-4
    let t3 = pins.tim3;
    let (mut s0, mut s1, mut s2, mut s3) = dp
        .TIM3
        .pwm_hz(
            (
                Channel1::new(t3.ch1),
                Channel2::new(t3.ch2),
                Channel3::new(t3.ch3),
                Channel4::new(t3.ch4),
            ),
            SERVO_FRAME_HZ.Hz(),
            &clocks,
        )
        .split();
    let t4 = pins.tim4;
    let (mut s4, mut s5, mut s6, mut s7) = dp
        .TIM4
        .pwm_hz(
            (
                Channel1::new(t4.ch1),
                Channel2::new(t4.ch2),
                Channel3::new(t4.ch3),
                Channel4::new(t4.ch4),
            ),
            SERVO_FRAME_HZ.Hz(),
            &clocks,
        )
        .split();
    let outputs: [PwmOutput; 8] = [
        &mut s0, &mut s1, &mut s2, &mut s3, &mut s4, &mut s5, &mut s6, &mut s7,
    ];
    let bank = ServoBank::new(outputs);

    // 1 kHz tick
    let clock = SysTickClock::start(cp.SYST, clocks.sysclk().raw());

    // Files live in RAM; seed the demo sequence.
    let mut store = MemStore::<8, FILE_BUF_LEN>::new();
    if let Err(e) = store.write("/seq/demo.txt", DEMO_SEQUENCE.as_bytes()) {
        let _ = write!(usart, "store: {}\r\n", e);
    }

    let mut controller = Controller::boot(bank, store, &mut usart);
    let mut parser = Parser::new();

    usart.println("rotorbank ready");
    usart.flush();

    loop {
        while let Some(byte) = usart.read_byte() {
            if let Some(cmd) = parser.push(byte) {
                if let Err(e) = controller.execute(cmd, clock.now(), &mut usart) {
                    let _ = write!(usart, "error: {}\r\n", e);
                }
            }
        }

        controller.tick(clock.now());
    }
}
