use core::fmt;
use std::io::{self, Write};

use serde::{Serialize, Serializer};

use crate::cli::Report;

/// Where solver output goes, either as plain lines or as JSON lines for the
/// runner to consume.
pub(crate) struct Output<O> {
    out: O,
    kind: OutputKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OutputKind {
    Json,
    Normal,
}

impl<O> Output<O>
where
    O: Write,
{
    pub(crate) fn new(out: O, kind: OutputKind) -> Self {
        Self { out, kind }
    }

    /// Print the answer of a solver.
    pub(crate) fn answer(&mut self, m: impl fmt::Display) -> io::Result<()> {
        self.message(MessageKind::Answer, m)
    }

    pub(crate) fn info(&mut self, m: impl fmt::Display) -> io::Result<()> {
        self.message(MessageKind::Info, m)
    }

    pub(crate) fn error(&mut self, m: impl fmt::Display) -> io::Result<()> {
        self.message(MessageKind::Error, m)
    }

    pub(crate) fn report(&mut self, report: &Report) -> io::Result<()> {
        match self.kind {
            OutputKind::Json => self.json(LineType::Report, report),
            OutputKind::Normal => writeln!(self.out, "{report}"),
        }
    }

    fn message(&mut self, kind: MessageKind, output: impl fmt::Display) -> io::Result<()> {
        match self.kind {
            OutputKind::Json => self.json(LineType::Message, &Message { kind, output }),
            OutputKind::Normal => writeln!(self.out, "{kind}: {output}"),
        }
    }

    fn json<T>(&mut self, ty: LineType, data: &T) -> io::Result<()>
    where
        T: Serialize,
    {
        serde_json::to_writer(&mut self.out, &Line { ty, data })?;
        writeln!(self.out)
    }
}

#[derive(Serialize)]
struct Line<'a, T> {
    #[serde(rename = "type")]
    ty: LineType,
    data: &'a T,
}

#[derive(Serialize)]
#[serde(rename_all = "kebab-case")]
enum LineType {
    Message,
    Report,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "kebab-case")]
enum MessageKind {
    Answer,
    Info,
    Error,
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageKind::Answer => write!(f, "answer"),
            MessageKind::Info => write!(f, "info"),
            MessageKind::Error => write!(f, "error"),
        }
    }
}

#[derive(Serialize)]
#[serde(bound = "T: fmt::Display")]
struct Message<T> {
    kind: MessageKind,
    #[serde(serialize_with = "collect_str")]
    output: T,
}

fn collect_str<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    T: fmt::Display,
    S: Serializer,
{
    serializer.collect_str(value)
}
