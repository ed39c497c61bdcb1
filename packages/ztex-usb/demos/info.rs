use log::{info, warn};
use ztex_usb::{
    libusb::UsbTransport,
    protocol::{PRODUCT_ID, VENDOR_ID},
    Device,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    simplelog::TermLogger::init(
        log::LevelFilter::Debug,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    // Open the first module on the bus
    let handle = rusb::open_device_with_vid_pid(VENDOR_ID, PRODUCT_ID)
        .ok_or("no ZTEX module found")?;
    let mut device = Device::open(UsbTransport::new(handle))?;

    println!("{device}");

    match device.fpga_status() {
        Ok(status) => info!("FPGA: {status}"),
        Err(err) if err.is_unsupported() => warn!("{err}"),
        Err(err) => return Err(err.into()),
    }

    match device.flash_status() {
        Ok(status) => info!("Flash: {status}"),
        Err(err) if err.is_unsupported() => warn!("{err}"),
        Err(err) => return Err(err.into()),
    }

    Ok(())
}
