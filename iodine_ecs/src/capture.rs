//! Logger which records messages of the current thread, so tests can assert on them.

use std::cell::RefCell;
use std::sync::Once;

use log::{Level, LevelFilter, Log, Metadata, Record};

thread_local! {
    static RECORDS: RefCell<Vec<(Level, String)>> = RefCell::new(Vec::new());
}

struct CaptureLogger;

impl Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        RECORDS.with(|records| {
            records
                .borrow_mut()
                .push((record.level(), record.args().to_string()))
        });
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger;
static INIT: Once = Once::new();

/// Installs the capturing logger (once per process) and forgets
/// everything logged on this thread so far.
pub fn start() {
    INIT.call_once(|| {
        log::set_logger(&LOGGER).unwrap();
        log::set_max_level(LevelFilter::Trace);
    });
    RECORDS.with(|records| records.borrow_mut().clear());
}

/// Drains messages of the given level logged on this thread since [`start`].
pub fn take(level: Level) -> Vec<String> {
    RECORDS.with(|records| {
        let mut records = records.borrow_mut();
        let (taken, rest): (Vec<_>, Vec<_>) = records
            .drain(..)
            .partition(|(lvl, _)| *lvl == level);
        *records = rest;
        taken.into_iter().map(|(_, message)| message).collect()
    })
}
