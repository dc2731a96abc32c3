use std::fmt;

/// One notification emitted while importing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImportEvent {
    Added(String),
    AlreadyExists(String),
    /// A row that was not imported, with the reason.
    Skipped(String),
    Completed(String),
}

impl ImportEvent {
    pub fn message(&self) -> &str {
        match self {
            Self::Added(message)
            | Self::AlreadyExists(message)
            | Self::Skipped(message)
            | Self::Completed(message) => message,
        }
    }

    /// Diagnostics go to the operator's error stream.
    pub fn is_diagnostic(&self) -> bool {
        matches!(self, Self::Skipped(_))
    }
}

impl fmt::Display for ImportEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Receiver of import events.
pub trait ImportSink {
    fn emit(&mut self, event: ImportEvent);
}

impl ImportSink for Vec<ImportEvent> {
    fn emit(&mut self, event: ImportEvent) {
        self.push(event);
    }
}

/// Row counts of a finished run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub added: usize,
    pub existing: usize,
    pub skipped: usize,
}

/// Logs every event and keeps the summary up to date.
pub(crate) struct Recorder<'a, S: ImportSink + ?Sized> {
    sink: &'a mut S,
    pub(crate) summary: ImportSummary,
}

impl<'a, S: ImportSink + ?Sized> Recorder<'a, S> {
    pub(crate) fn new(sink: &'a mut S) -> Self {
        Self {
            sink,
            summary: ImportSummary::default(),
        }
    }

    pub(crate) fn emit(&mut self, event: ImportEvent) {
        match &event {
            ImportEvent::Added(message) => {
                self.summary.added += 1;
                tracing::info!("{message}");
            }
            ImportEvent::AlreadyExists(message) => {
                self.summary.existing += 1;
                tracing::info!("{message}");
            }
            ImportEvent::Skipped(message) => {
                self.summary.skipped += 1;
                tracing::warn!("{message}");
            }
            ImportEvent::Completed(message) => tracing::info!("{message}"),
        }
        self.sink.emit(event);
    }
}
