//! # Per-open device handle.
//!
//! Maps character-device style calls onto the coordinator:
//! ```text
//! write(buf)        → trigger()          Busy → EBUSY
//! read(buf)         → await_outcome()    one line per spin per handle, then EOF
//! ioctl(cmd, arg)   → peek_result()      raw i32, -1 when unset
//! close() / drop    → cancel the handle token (pending read → EINTR)
//! ```
//!
//! A failed call never changes coordinator state.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::core::{SpinCoordinator, UNSET_WINNER};
use crate::error::DeviceError;

/// `_IOR('R', 1, int *)` on 64-bit Linux: read the current winner.
pub const IOCTL_GET_WINNING_LED: u32 = 0x8008_5201;

/// An open handle on the wheel device.
pub struct DeviceFile {
    coord: Arc<SpinCoordinator>,
    cancel: CancellationToken,
    read_capacity: usize,
    delivered: Option<u64>,
}

impl DeviceFile {
    pub(crate) fn new(coord: Arc<SpinCoordinator>, cancel: CancellationToken, read_capacity: usize) -> Self {
        Self {
            coord,
            cancel,
            read_capacity,
            delivered: None,
        }
    }

    /// Starts a spin and waits for it to settle. The payload is ignored.
    ///
    /// Returns `buf.len()` on success.
    pub async fn write(&mut self, buf: &[u8]) -> Result<usize, DeviceError> {
        self.coord.trigger().await?;
        Ok(buf.len())
    }

    /// Reads the winner of the current (or in-progress) spin as `"<index>\n"`.
    ///
    /// Blocks while a spin is running. Returns `Ok(0)` once this handle has
    /// already delivered the current spin's result.
    pub async fn read(&mut self, buf: &mut [u8]) -> Result<usize, DeviceError> {
        let outcome = self.coord.await_outcome(&self.cancel).await?;
        if self.delivered == Some(outcome.spin) {
            return Ok(0);
        }

        let line = match outcome.winner {
            Some(w) => format!("{w}\n"),
            None => format!("{UNSET_WINNER}\n"),
        };
        let msg = &line.as_bytes()[..line.len().min(self.read_capacity)];
        if buf.len() < msg.len() {
            return Err(DeviceError::TransferFault {
                needed: msg.len(),
                got: buf.len(),
            });
        }

        buf[..msg.len()].copy_from_slice(msg);
        self.delivered = Some(outcome.spin);
        Ok(msg.len())
    }

    /// Fast query. Only [`IOCTL_GET_WINNING_LED`] is recognized; it stores the
    /// winner as a native-endian `i32` in the first 4 bytes of `arg`.
    pub fn ioctl(&self, cmd: u32, arg: &mut [u8]) -> Result<(), DeviceError> {
        if cmd != IOCTL_GET_WINNING_LED {
            return Err(DeviceError::InvalidArgument { cmd });
        }
        let raw = self
            .coord
            .peek_result()
            .and_then(|w| i32::try_from(w).ok())
            .unwrap_or(UNSET_WINNER)
            .to_ne_bytes();
        let Some(dst) = arg.get_mut(..raw.len()) else {
            return Err(DeviceError::TransferFault {
                needed: raw.len(),
                got: arg.len(),
            });
        };
        dst.copy_from_slice(&raw);
        Ok(())
    }

    /// Token interrupting this handle's pending reads.
    pub fn cancel_handle(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Closes the handle.
    pub fn close(self) {}
}

impl Drop for DeviceFile {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::core::WheelConfig;
    use crate::events::Bus;
    use crate::policies::{FlashPolicy, SpinCadence};
    use crate::ring::{OutputRing, SimulatedBank};
    use crate::selector::SeededSelector;

    const LINES: [u32; 4] = [40, 41, 42, 43];

    fn coordinator() -> Arc<SpinCoordinator> {
        let cfg = WheelConfig {
            cadence: SpinCadence {
                rounds: 4,
                base: Duration::from_millis(5),
                step: Duration::ZERO,
                ..SpinCadence::default()
            },
            flash: FlashPolicy {
                times: 0,
                ..FlashPolicy::default()
            },
            ..WheelConfig::with_lines(LINES)
        };
        let bank = Arc::new(SimulatedBank::new(LINES));
        let ring = OutputRing::acquire(bank, &cfg.lines, "t").unwrap();
        Arc::new(SpinCoordinator::new(
            ring,
            Arc::new(SeededSelector::new(11)),
            &cfg,
            Bus::new(16),
        ))
    }

    fn open(coord: &Arc<SpinCoordinator>) -> DeviceFile {
        DeviceFile::new(coord.clone(), CancellationToken::new(), 16)
    }

    #[tokio::test(start_paused = true)]
    async fn read_is_one_shot_per_spin() {
        let coord = coordinator();
        let mut dev = open(&coord);
        assert_eq!(dev.write(b"spin").await, Ok(4));
        let winner = coord.peek_result().unwrap();

        let mut buf = [0u8; 16];
        let n = dev.read(&mut buf).await.unwrap();
        assert_eq!(&buf[..n], format!("{winner}\n").as_bytes());
        assert_eq!(dev.read(&mut buf).await, Ok(0));

        // Another handle has its own offset.
        let mut other = open(&coord);
        assert_eq!(other.read(&mut buf).await, Ok(n));

        dev.write(b"").await.unwrap();
        assert_eq!(dev.read(&mut buf).await, Ok(n));
    }

    #[tokio::test(start_paused = true)]
    async fn read_before_any_spin_reports_unset() {
        let coord = coordinator();
        let mut dev = open(&coord);
        let mut buf = [0u8; 8];
        let n = dev.read(&mut buf).await.unwrap();
        assert_eq!(&buf[..n], b"-1\n");
        assert_eq!(dev.read(&mut buf).await, Ok(0));
    }

    #[tokio::test(start_paused = true)]
    async fn short_read_buffer_faults_without_consuming() {
        let coord = coordinator();
        let mut dev = open(&coord);
        dev.write(b"x").await.unwrap();

        let mut tiny = [0u8; 1];
        let err = dev.read(&mut tiny).await.unwrap_err();
        assert_eq!(err, DeviceError::TransferFault { needed: 2, got: 1 });
        assert_eq!(err.errno(), 14);

        let mut buf = [0u8; 16];
        assert_eq!(dev.read(&mut buf).await, Ok(2));
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_write_is_ebusy() {
        let coord = coordinator();
        let mut a = open(&coord);
        let mut b = open(&coord);

        let (ra, rb) = tokio::join!(a.write(b"1"), b.write(b"1"));
        let busy = [ra, rb].into_iter().filter(|r| *r == Err(DeviceError::Busy)).count();
        assert_eq!(busy, 1);
        assert_eq!(DeviceError::Busy.errno(), 16);
        assert_eq!(coord.status().spins, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn closing_a_handle_interrupts_its_read() {
        let coord = coordinator();
        let spin = tokio::spawn({
            let coord = coord.clone();
            async move { coord.trigger().await }
        });
        let mut rx = coord.subscribe();
        rx.wait_for(|s| s.spin_in_progress().is_some()).await.unwrap();

        let mut dev = open(&coord);
        let cancel = dev.cancel_handle();
        let reader = tokio::spawn(async move {
            let mut buf = [0u8; 16];
            dev.read(&mut buf).await
        });
        tokio::task::yield_now().await;
        cancel.cancel();

        let err = reader.await.unwrap().unwrap_err();
        assert_eq!(err, DeviceError::Interrupted);
        assert_eq!(err.errno(), 4);
        assert!(spin.await.unwrap().is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn ioctl_reports_raw_winner() {
        let coord = coordinator();
        let mut dev = open(&coord);

        let mut arg = [0u8; 4];
        dev.ioctl(IOCTL_GET_WINNING_LED, &mut arg).unwrap();
        assert_eq!(i32::from_ne_bytes(arg), -1);

        dev.write(b"go").await.unwrap();
        dev.ioctl(IOCTL_GET_WINNING_LED, &mut arg).unwrap();
        let winner = coord.peek_result().unwrap();
        assert_eq!(i32::from_ne_bytes(arg), winner as i32);
    }

    #[test]
    fn ioctl_rejects_unknown_commands_and_short_args() {
        let coord = coordinator();
        let dev = open(&coord);

        let mut arg = [0u8; 4];
        let err = dev.ioctl(0x1234, &mut arg).unwrap_err();
        assert_eq!(err, DeviceError::InvalidArgument { cmd: 0x1234 });
        assert_eq!(err.errno(), 22);

        let mut short = [0u8; 2];
        let err = dev.ioctl(IOCTL_GET_WINNING_LED, &mut short).unwrap_err();
        assert_eq!(err, DeviceError::TransferFault { needed: 4, got: 2 });
    }
}
