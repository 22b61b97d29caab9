use std::sync::{Arc, Mutex, MutexGuard};

use crate::logger::{set_user_log_handler, LogRecord};

static HANDLER_LOCK: Mutex<()> = Mutex::new(());

/// Records every log line while alive, then restores the default handler.
///
/// Holding the capture also serializes tests that change global logger settings.
pub struct LogCapture {
    records: Arc<Mutex<Vec<LogRecord>>>,
    _exclusive: MutexGuard<'static, ()>,
}

impl LogCapture {
    pub fn records(&self) -> Vec<LogRecord> {
        self.records.lock().unwrap().clone()
    }

    pub fn from_logger(&self, name: &str) -> Vec<LogRecord> {
        self.records()
            .into_iter()
            .filter(|record| record.logger == name)
            .collect()
    }
}

impl Drop for LogCapture {
    fn drop(&mut self) {
        set_user_log_handler(None);
    }
}

pub fn capture_logs() -> LogCapture {
    let exclusive = HANDLER_LOCK
        .lock()
        .unwrap_or_else(|poison| poison.into_inner());
    let records = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&records);
    set_user_log_handler(Some(Arc::new(move |record: &LogRecord| {
        sink.lock().unwrap().push(record.clone());
    })));
    LogCapture {
        records,
        _exclusive: exclusive,
    }
}
