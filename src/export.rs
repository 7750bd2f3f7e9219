use crate::chart::{ChartEntry, ChartSource, Song};
use crate::error::ExportError;
use log::info;
use serde::Serialize;
use serde_json::ser::{Formatter, PrettyFormatter, Serializer};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Pretty printing with every character outside printable ASCII written as a
/// `\uXXXX` escape of its UTF-16 code units.
struct AsciiFormatter<'a>(PrettyFormatter<'a>);

impl<'a> AsciiFormatter<'a> {
    fn with_indent(indent: &'a [u8]) -> Self {
        AsciiFormatter(PrettyFormatter::with_indent(indent))
    }
}

impl Formatter for AsciiFormatter<'_> {
    fn begin_array<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.begin_array(writer)
    }

    fn end_array<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_array(writer)
    }

    fn begin_array_value<W: ?Sized + Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        self.0.begin_array_value(writer, first)
    }

    fn end_array_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_array_value(writer)
    }

    fn begin_object<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.begin_object(writer)
    }

    fn end_object<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_object(writer)
    }

    fn begin_object_key<W: ?Sized + Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        self.0.begin_object_key(writer, first)
    }

    fn begin_object_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.begin_object_value(writer)
    }

    fn end_object_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_object_value(writer)
    }

    fn write_string_fragment<W: ?Sized + Write>(
        &mut self,
        writer: &mut W,
        fragment: &str,
    ) -> io::Result<()> {
        let mut start = 0;
        for (i, c) in fragment.char_indices() {
            if (' '..='~').contains(&c) {
                continue;
            }
            writer.write_all(fragment[start..i].as_bytes())?;
            let mut units = [0; 2];
            for unit in c.encode_utf16(&mut units) {
                write!(writer, "\\u{:04x}", unit)?;
            }
            start = i + c.len_utf8();
        }
        writer.write_all(fragment[start..].as_bytes())
    }
}

/// Render entries as an indented JSON array of `{"artist", "title"}` objects.
/// The output is pure ASCII.
pub fn render_songs(
    entries: impl IntoIterator<Item = ChartEntry>,
) -> Result<Vec<u8>, serde_json::Error> {
    let songs: Vec<Song> = entries.into_iter().map(Song::from).collect();

    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, AsciiFormatter::with_indent(b"    "));
    songs.serialize(&mut ser)?;

    Ok(buf)
}

/// Fetch `identifier` from `source` and write it to `destination`, replacing
/// whatever was there.
///
/// The destination is only opened once the chart has been fetched and
/// rendered, so a failed lookup never creates or truncates it.
pub fn export_chart(
    source: &impl ChartSource,
    identifier: &str,
    destination: impl AsRef<Path>,
) -> Result<(), ExportError> {
    let destination = destination.as_ref();

    let entries = source.fetch(identifier)?;
    let count = entries.len();
    let json = render_songs(entries)?;

    let io_err = |source| ExportError::Io {
        path: destination.to_path_buf(),
        source,
    };
    let file = File::create(destination).map_err(io_err)?;
    let mut w = BufWriter::new(file);
    w.write_all(&json).map_err(io_err)?;
    w.flush().map_err(io_err)?;

    info!("wrote {} songs to {:?}", count, destination);

    Ok(())
}
