use embassy_usb::class::hid::HidWriter;
use embassy_usb::driver::{Driver, EndpointError};

use crate::hid::{HidError, KeyboardReport, ReportWriter};

impl From<EndpointError> for HidError {
    fn from(e: EndpointError) -> Self {
        match e {
            EndpointError::BufferOverflow => HidError::BufferOverflow,
            EndpointError::Disabled => HidError::UsbDisabled,
        }
    }
}

impl<'d, D: Driver<'d>, const N: usize> ReportWriter for HidWriter<'d, D, N> {
    async fn write_report(&mut self, report: &KeyboardReport) -> Result<usize, HidError> {
        self.write_serialize(report).await?;
        Ok(8)
    }
}
