#![no_std]
#![no_main]

use defmt::{debug, info, warn};
use defmt_rtt as _;
use embassy_executor::{InterruptExecutor, Spawner};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, OutputOpenDrain, Pull};
use embassy_rp::interrupt;
use embassy_rp::interrupt::{InterruptExt, Priority};
use embassy_rp::peripherals::PIO0;
use embassy_rp::pio::{InterruptHandler as PioInterruptHandler, Pio};
use embassy_time::Timer;
use snes_to_psx_rp2040::{
    snes_pad, AdapterBridge, BootConfig, PortLink, PortState, PortTask, SampleSource, SnesButtons,
};
use static_cell::StaticCell;

#[cfg(feature = "dev-panic")]
use panic_probe as _;
#[cfg(feature = "prod-panic")]
use panic_reset as _;

bind_interrupts!(struct Irqs {
    PIO0_IRQ_0 => PioInterruptHandler<PIO0>;
});

/// Time for the pad to power up before the boot sample.
const BOOT_SETTLE_MS: u64 = 20;

/// Runs the port task above thread mode, so the main cycle never delays a byte.
static PORT_EXECUTOR: InterruptExecutor = InterruptExecutor::new();

/// Responder, attention flag and published frame.
/// The identity is only known after the boot sample, hence the StaticCell.
static PORT_STATE: StaticCell<PortState> = StaticCell::new();

#[interrupt]
unsafe fn SWI_IRQ_1() {
    PORT_EXECUTOR.on_interrupt()
}

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("SNES-to-PSX starting...");

    let p = embassy_rp::init(embassy_rp::config::Config::default());

    // --- SNES pad ---
    let latch = Output::new(p.PIN_11, Level::Low);
    let clock = Output::new(p.PIN_12, Level::High);
    let data = Input::new(p.PIN_10, Pull::Up);
    let mut pad = snes_pad(latch, clock, data);

    Timer::after_millis(BOOT_SETTLE_MS).await;

    // --- Boot configuration ---
    let boot_sample = match pad.sample() {
        Ok(sample) => sample,
        Err(e) => {
            warn!("Boot sample failed: {:?}, using defaults", e);
            SnesButtons::NONE
        }
    };
    debug!("Boot sample: {=u16:#x}", boot_sample.raw());

    let config = BootConfig::from_sample(boot_sample);
    info!(
        "Layout {} ({}), identity {:?} (ID {=u8:#x})",
        config.table().name,
        config.mapping,
        config.identity,
        config.identity.id()
    );

    let state: &'static PortState = PORT_STATE.init(PortState::new(config.identity));

    // --- Controller port ---
    let Pio {
        mut common, sm0, ..
    } = Pio::new(p.PIO0, Irqs);
    let cmd = common.make_pio_pin(p.PIN_2);
    let clk = common.make_pio_pin(p.PIN_3);
    let dat = common.make_pio_pin(p.PIN_4);
    let att = Input::new(p.PIN_5, Pull::Up);
    let ack = OutputOpenDrain::new(p.PIN_6, Level::High);
    let port = PortTask::new(&mut common, sm0, cmd, clk, dat, att, ack);

    interrupt::SWI_IRQ_1.set_priority(Priority::P1);
    let port_spawner = PORT_EXECUTOR.start(interrupt::SWI_IRQ_1);
    port_spawner.spawn(port_task(port, state).unwrap());

    info!("SNES-to-PSX initialized, waiting for the console...");

    // --- Main cycle ---
    // Never awaits: thread mode belongs to the main cycle from here on.
    let mut bridge = AdapterBridge::new(pad, PortLink::new(state), &config, state.frame());
    loop {
        if let Err(e) = bridge.cycle() {
            warn!("Sample error: {:?}, released frame published", e);
        }
    }
}

/// Port task - answers the console byte by byte.
#[embassy_executor::task]
async fn port_task(mut port: PortTask<'static>, state: &'static PortState) -> ! {
    port.run(state).await
}
