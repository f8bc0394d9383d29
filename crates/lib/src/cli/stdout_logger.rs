use log::{Log, Metadata, Record};

/// Logger printing `file:line: LEVEL: message` to stdout, interleaved with
/// solver answers.
pub(crate) struct StdoutLogger;

impl Log for StdoutLogger {
    #[inline]
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        println!(
            "{file}:{line}: {level}: {args}",
            file = record.file().unwrap_or_default(),
            line = record.line().unwrap_or_default(),
            level = record.level(),
            args = record.args(),
        );
    }

    fn flush(&self) {}
}
