use log::{debug, trace};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Repeating timer running on its own thread.
///
/// Ticks queue up in a channel until [`Ticker::drain`] collects them, so the
/// owner decides when they are applied. Dropping the handle stops the thread.
#[derive(Debug)]
pub struct Ticker {
    stop: Option<Sender<()>>,
    ticks: Receiver<()>,
    handle: Option<JoinHandle<()>>,
}

impl Ticker {
    pub fn start(interval: Duration) -> Ticker {
        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let (tick_tx, tick_rx) = mpsc::channel::<()>();

        let handle = thread::spawn(move || loop {
            match stop_rx.recv_timeout(interval) {
                Err(RecvTimeoutError::Timeout) => {
                    trace!("[Timer] tick");
                    if tick_tx.send(()).is_err() {
                        break;
                    }
                }
                // stop requested or handle dropped
                _ => break,
            }
        });
        debug!("[Timer] Started with interval {} ms.", interval.as_millis());

        Ticker {
            stop: Some(stop_tx),
            ticks: tick_rx,
            handle: Some(handle),
        }
    }

    /// Number of ticks fired since the last call.
    pub fn drain(&self) -> u32 {
        self.ticks.try_iter().count() as u32
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    pub fn stop(&mut self) {
        drop(self.stop.take());
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                debug!("[Timer] Timer thread panicked.");
            }
            debug!("[Timer] Stopped.");
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn test_ticker_fires() {
        let ticker = Ticker::start(Duration::from_millis(5));
        thread::sleep(Duration::from_millis(60));
        assert!(ticker.drain() >= 1);
        assert!(ticker.is_running());
    }

    #[test]
    fn test_ticker_stop_is_prompt() {
        let mut ticker = Ticker::start(Duration::from_secs(30));
        let now = Instant::now();
        ticker.stop();
        assert!(now.elapsed() < Duration::from_secs(5));
        assert!(!ticker.is_running());
        assert_eq!(ticker.drain(), 0);
    }

    #[test]
    fn test_no_ticks_after_stop() {
        let mut ticker = Ticker::start(Duration::from_millis(2));
        thread::sleep(Duration::from_millis(20));
        ticker.stop();
        ticker.drain();
        thread::sleep(Duration::from_millis(20));
        assert_eq!(ticker.drain(), 0);
    }
}
