#![no_std]
#![no_main]

// Required for ESP-IDF bootloader compatibility
// Use explicit parameters to ensure correct efuse block revision values
esp_bootloader_esp_idf::esp_app_desc!(
    env!("CARGO_PKG_VERSION"),  // version
    env!("CARGO_PKG_NAME"),     // project_name
    "00:00:00",                 // build_time
    "2025-01-01",               // build_date
    "0.0.0",                    // idf_ver (not using IDF)
    0x10000,                    // mmu_page_size (64KB)
    0,                          // min_efuse_blk_rev_full (accept all)
    u16::MAX                    // max_efuse_blk_rev_full (accept all)
);

use embassy_executor::Spawner;
use esp_backtrace as _;
use esp_hal::gpio::{Level, Output, OutputConfig};
use esp_hal::spi::master::{Config as SpiConfig, Spi};
use esp_hal::spi::Mode as SpiMode;
use esp_hal::time::Rate;
use esp_hal::timer::timg::TimerGroup;
use esp_hal::Async;
use static_cell::StaticCell;

use rfm95_bringup_firmware::config;
use rfm95_bringup_firmware::radio::driver::{Rfm95Pins, SpiTransport};
use rfm95_bringup_firmware::radio::Rfm95;
use rfm95_bringup_firmware::tasks::{self, LedReceiver, LedSender, LED_CHANNEL};

/// Concrete transport for the RFM95 on SPI2
type RadioTransport = SpiTransport<Spi<'static, Async>, Output<'static>, Output<'static>>;

/// Static executor for embassy
static EXECUTOR: StaticCell<esp_rtos::embassy::Executor> = StaticCell::new();

#[esp_hal::main]
fn main() -> ! {
    esp_println::logger::init_logger(log::LevelFilter::Info);

    let peripherals = esp_hal::init(esp_hal::Config::default());

    // LED off until the radio is verified (active low)
    let led = Output::new(peripherals.GPIO48, Level::High, OutputConfig::default());

    // Initialise the RTOS scheduler with timer - MUST be done before any async operations
    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    // Configure SPI for the RFM95: mode 0, MSB first
    let sclk = peripherals.GPIO7;
    let miso = peripherals.GPIO8;
    let mosi = peripherals.GPIO9;

    let spi = Spi::new(
        peripherals.SPI2,
        SpiConfig::default()
            .with_frequency(Rate::from_khz(config::spi::FREQUENCY_KHZ))
            .with_mode(SpiMode::_0),
    )
    .unwrap()
    .with_sck(sclk)
    .with_miso(miso)
    .with_mosi(mosi)
    .into_async();

    // NSS idles high (deselected), NRST idles high (not in reset)
    let nss = Output::new(peripherals.GPIO41, Level::High, OutputConfig::default());
    let nrst = Output::new(peripherals.GPIO42, Level::High, OutputConfig::default());

    let transport = SpiTransport::new(spi, Rfm95Pins { nss, nrst });
    let radio = Rfm95::new(transport);

    // Create and run the embassy executor
    let executor = EXECUTOR.init(esp_rtos::embassy::Executor::new());
    executor.run(|spawner| {
        spawner.must_spawn(async_main(spawner, radio, led));
    })
}

#[embassy_executor::task]
async fn async_main(spawner: Spawner, radio: Rfm95<RadioTransport>, led: Output<'static>) {
    // Time for a serial console to attach
    embassy_time::Timer::after(embassy_time::Duration::from_millis(
        config::startup::CONSOLE_SETTLE_MS,
    ))
    .await;
    log::info!("RFM95 bring-up firmware v{}", env!("CARGO_PKG_VERSION"));

    spawner.spawn(led_task(led, LED_CHANNEL.receiver())).unwrap();
    spawner.spawn(radio_task(radio, LED_CHANNEL.sender())).unwrap();
}

/// Task that drives the status LED
#[embassy_executor::task]
async fn led_task(led: Output<'static>, receiver: LedReceiver) {
    tasks::led_task(led, receiver).await;
}

/// Task that brings up and polls the radio
#[embassy_executor::task]
async fn radio_task(radio: Rfm95<RadioTransport>, led_sender: LedSender) {
    tasks::radio_task(radio, led_sender).await;
}
