use std::io::{self, Read, Write};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use serialport::SerialPort;

use crate::client::{AtError, READ_TIMEOUT, Transport};

const DEFAULT_DEVICE: &str = "/dev/ttyACM0";
const DEFAULT_BAUD_RATE: u32 = 19_200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Parity {
    #[default]
    None,
    Odd,
    Even,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
/// Serial line settings for the modem.
///
/// Defaults to `/dev/ttyACM0` at 19200 baud, 8 data bits, 1 stop bit, no parity.
pub struct SerialConfig {
    pub device: String,
    pub baud_rate: u32,
    pub data_bits: u8,
    pub stop_bits: u8,
    pub parity: Parity,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            device: DEFAULT_DEVICE.to_owned(),
            baud_rate: DEFAULT_BAUD_RATE,
            data_bits: 8,
            stop_bits: 1,
            parity: Parity::None,
        }
    }
}

impl SerialConfig {
    /// Default line settings on another device path.
    pub fn device(device: impl Into<String>) -> Self {
        Self {
            device: device.into(),
            ..Self::default()
        }
    }

    fn data_bits(&self) -> Result<serialport::DataBits, AtError> {
        Ok(match self.data_bits {
            5 => serialport::DataBits::Five,
            6 => serialport::DataBits::Six,
            7 => serialport::DataBits::Seven,
            8 => serialport::DataBits::Eight,
            other => return Err(self.invalid(format!("unsupported data bits: {other}"))),
        })
    }

    fn stop_bits(&self) -> Result<serialport::StopBits, AtError> {
        Ok(match self.stop_bits {
            1 => serialport::StopBits::One,
            2 => serialport::StopBits::Two,
            other => return Err(self.invalid(format!("unsupported stop bits: {other}"))),
        })
    }

    fn parity(&self) -> serialport::Parity {
        match self.parity {
            Parity::None => serialport::Parity::None,
            Parity::Odd => serialport::Parity::Odd,
            Parity::Even => serialport::Parity::Even,
        }
    }

    fn invalid(&self, description: String) -> AtError {
        AtError::Open {
            device: self.device.clone(),
            source: serialport::Error::new(serialport::ErrorKind::InvalidInput, description),
        }
    }
}

/// [`Transport`] over a serial device opened with the `serialport` crate.
///
/// The port delivers bytes as they arrive, so one [`Transport::read`] keeps
/// reading until the read timeout elapses or a final result line shows up.
pub struct SerialTransport {
    port: Box<dyn SerialPort>,
    timeout: Duration,
}

impl SerialTransport {
    /// Open and configure the serial device.
    pub fn open(config: &SerialConfig) -> Result<Self, AtError> {
        tracing::info!(device = %config.device, baud_rate = config.baud_rate, "opening modem");
        let port = serialport::new(&config.device, config.baud_rate)
            .data_bits(config.data_bits()?)
            .stop_bits(config.stop_bits()?)
            .parity(config.parity())
            .timeout(READ_TIMEOUT)
            .open()
            .map_err(|source| AtError::Open {
                device: config.device.clone(),
                source,
            })?;

        Ok(Self {
            port,
            timeout: READ_TIMEOUT,
        })
    }
}

impl Transport for SerialTransport {
    fn write(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.port.write_all(bytes)?;
        self.port.flush()
    }

    fn set_read_timeout(&mut self, timeout: Duration) -> io::Result<()> {
        self.timeout = timeout;
        Ok(())
    }

    fn read(&mut self) -> io::Result<Vec<u8>> {
        read_response(&mut self.port, self.timeout)
    }
}

/// Byte source whose blocking read can be bounded.
trait TimedRead: Read {
    fn set_timeout(&mut self, timeout: Duration) -> io::Result<()>;
}

impl TimedRead for Box<dyn SerialPort> {
    fn set_timeout(&mut self, timeout: Duration) -> io::Result<()> {
        SerialPort::set_timeout(self.as_mut(), timeout)?;
        Ok(())
    }
}

/// Collect chunks until `timeout` elapses, the port reports end of input or a
/// final result line (or the body prompt) has been read.
///
/// The first read always happens, even with a zero timeout.
fn read_response<P: TimedRead>(port: &mut P, timeout: Duration) -> io::Result<Vec<u8>> {
    let deadline = Instant::now() + timeout;
    let mut response = Vec::new();
    let mut buf = [0u8; 1024];

    loop {
        port.set_timeout(deadline.saturating_duration_since(Instant::now()))?;

        match port.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => {
                response.extend_from_slice(&buf[..n]);
                if crate::transport::is_final(&response) {
                    break;
                }
            }
            Err(err) if err.kind() == io::ErrorKind::TimedOut => break,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
            Err(err) => return Err(err),
        }

        if Instant::now() >= deadline {
            break;
        }
    }

    Ok(response)
}
