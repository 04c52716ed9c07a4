use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

use tracing::Level;

/// Where log lines go. The desktop owns the terminal while it runs, so
/// logging to stderr is only useful when stderr is redirected.
#[derive(Debug, Clone)]
pub enum LogTarget {
    File(Arc<File>),
    Stderr,
    Discard,
}

pub fn open_log_file(path: &Path) -> io::Result<LogTarget> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    Ok(LogTarget::File(Arc::new(file)))
}

pub struct DelegatingWriter {
    inner: DelegatingInner,
}

enum DelegatingInner {
    File(Arc<File>),
    Stderr(io::Stderr),
    Discard,
}

impl DelegatingWriter {
    fn new(target: &LogTarget) -> Self {
        let inner = match target {
            LogTarget::File(file) => DelegatingInner::File(Arc::clone(file)),
            LogTarget::Stderr => DelegatingInner::Stderr(io::stderr()),
            LogTarget::Discard => DelegatingInner::Discard,
        };
        DelegatingWriter { inner }
    }
}

impl Write for DelegatingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match &mut self.inner {
            DelegatingInner::File(f) => (&**f).write(buf),
            DelegatingInner::Stderr(s) => s.write(buf),
            DelegatingInner::Discard => Ok(buf.len()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match &mut self.inner {
            DelegatingInner::File(f) => (&**f).flush(),
            DelegatingInner::Stderr(s) => s.flush(),
            DelegatingInner::Discard => Ok(()),
        }
    }
}

#[derive(Clone, Debug)]
pub struct SubscriberMakeWriter {
    target: LogTarget,
}

impl SubscriberMakeWriter {
    pub fn new(target: LogTarget) -> Self {
        Self { target }
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for SubscriberMakeWriter {
    type Writer = DelegatingWriter;

    fn make_writer(&'a self) -> Self::Writer {
        DelegatingWriter::new(&self.target)
    }
}

/// Install the global subscriber. Safe to call more than once; later calls
/// leave the first subscriber in place.
pub fn init_default(target: LogTarget) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_writer(SubscriberMakeWriter::new(target))
        .with_target(false)
        .with_thread_names(false)
        .with_ansi(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use tracing_subscriber::fmt::MakeWriter;

    #[test]
    fn file_target_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("desk.log");
        let target = open_log_file(&path).unwrap();
        let make = SubscriberMakeWriter::new(target);
        make.make_writer().write_all(b"first\n").unwrap();
        make.make_writer().write_all(b"second\n").unwrap();

        let mut contents = String::new();
        File::open(&path)
            .unwrap()
            .read_to_string(&mut contents)
            .unwrap();
        assert_eq!(contents, "first\nsecond\n");
    }

    #[test]
    fn discard_swallows_everything() {
        let make = SubscriberMakeWriter::new(LogTarget::Discard);
        let mut writer = make.make_writer();
        assert_eq!(writer.write(b"ignored").unwrap(), 7);
        writer.flush().unwrap();
    }

    #[test]
    fn init_twice_is_harmless() {
        init_default(LogTarget::Discard);
        init_default(LogTarget::Discard);
        tracing::debug!("still fine");
    }
}
