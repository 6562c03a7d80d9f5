// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Fersch 3D Team

//! STL (stereolithography) parsing.
//!
//! Both flavours of the format are accepted and turned into the same
//! [`Facets`] stream.
//!
//! # Binary layout
//!
//! ```text
//! UINT8[80]    - header, ignored
//! UINT32       - triangle count, little endian
//! foreach triangle
//!     REAL32[3] - normal, ignored
//!     REAL32[3] - vertex 1
//!     REAL32[3] - vertex 2
//!     REAL32[3] - vertex 3
//!     UINT16    - attribute byte count, ignored
//! end
//! ```
//!
//! # ASCII layout
//!
//! ```text
//! solid name
//!   facet normal ni nj nk
//!     outer loop
//!       vertex v1x v1y v1z
//!       vertex v2x v2y v2z
//!       vertex v3x v3y v3z
//!     endloop
//!   endfacet
//! endsolid name
//! ```
//!
//! Only `vertex` lines matter to the ASCII reader: vertices are grouped in
//! threes in file order. Malformed vertex lines are skipped and a short or
//! truncated binary payload yields fewer facets; neither is an error.

use std::borrow::Cow;
use std::iter::Take;
use std::slice::ChunksExact;

use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::geometry::{Facet, Vertex};

/// Binary STL header size in bytes
pub const HEADER_SIZE: usize = 80;

/// Header plus the triangle count
pub const MIN_BINARY_SIZE: usize = HEADER_SIZE + 4;

/// Size of one binary facet record (normal + 3 vertices + attribute)
pub const FACET_RECORD_SIZE: usize = 50;

const ASCII_MARKER: &[u8] = b"solid";
const FACET_MARKER: &[u8] = b"facet";

/// Prefix searched for [`FACET_MARKER`] when sniffing the format
const SNIFF_WINDOW: usize = 200;

/// Wire flavour of an STL payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StlFormat {
    Ascii,
    Binary,
}

impl StlFormat {
    /// Classify a payload from its first bytes.
    ///
    /// Binary files are allowed to start with `solid` in their header, so
    /// the ASCII verdict also needs a `facet` keyword near the start.
    pub fn detect(data: &[u8]) -> Self {
        let starts_with_solid = data
            .get(..ASCII_MARKER.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(ASCII_MARKER));
        let window = &data[..data.len().min(SNIFF_WINDOW)];
        let has_facet = window
            .windows(FACET_MARKER.len())
            .any(|candidate| candidate == FACET_MARKER);

        if starts_with_solid && has_facet {
            StlFormat::Ascii
        } else {
            StlFormat::Binary
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StlFormat::Ascii => "ascii",
            StlFormat::Binary => "binary",
        }
    }
}

/// A classified STL payload, ready to stream facets
#[derive(Debug, Clone)]
pub enum StlPayload<'a> {
    Ascii(Cow<'a, str>),
    Binary {
        /// Triangle count from the header
        declared: u32,
        /// Bytes following the triangle count
        records: &'a [u8],
    },
}

impl<'a> StlPayload<'a> {
    pub fn parse(data: &'a [u8]) -> Self {
        match StlFormat::detect(data) {
            StlFormat::Ascii => StlPayload::Ascii(decode_text(data)),
            StlFormat::Binary => {
                if data.len() < MIN_BINARY_SIZE {
                    debug!(len = data.len(), "binary STL shorter than its header, no facets");
                    return StlPayload::Binary {
                        declared: 0,
                        records: &[],
                    };
                }
                let declared = u32::from_le_bytes([
                    data[HEADER_SIZE],
                    data[HEADER_SIZE + 1],
                    data[HEADER_SIZE + 2],
                    data[HEADER_SIZE + 3],
                ]);
                StlPayload::Binary {
                    declared,
                    records: &data[MIN_BINARY_SIZE..],
                }
            }
        }
    }

    pub fn format(&self) -> StlFormat {
        match self {
            StlPayload::Ascii(_) => StlFormat::Ascii,
            StlPayload::Binary { .. } => StlFormat::Binary,
        }
    }

    pub fn facets(&self) -> Facets<'_> {
        match self {
            StlPayload::Ascii(text) => Facets::Ascii(AsciiFacets::new(text)),
            StlPayload::Binary { declared, records } => {
                Facets::Binary(BinaryFacets::new(*declared, records))
            }
        }
    }
}

/// UTF-8 text with invalid byte sequences dropped
fn decode_text(data: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(data) {
        Ok(text) => Cow::Borrowed(text),
        Err(_) => {
            debug!("ASCII STL is not valid UTF-8, dropping invalid bytes");
            Cow::Owned(data.utf8_chunks().map(|chunk| chunk.valid()).collect())
        }
    }
}

/// Facet stream shared by both formats
pub enum Facets<'a> {
    Ascii(AsciiFacets<'a>),
    Binary(BinaryFacets<'a>),
}

impl Facets<'_> {
    /// Vertices left over after the last complete facet (ASCII only)
    pub fn stray_vertices(&self) -> &[Vertex] {
        match self {
            Facets::Ascii(facets) => facets.pending(),
            Facets::Binary(_) => &[],
        }
    }

    /// Vertex lines dropped because they could not be parsed
    pub fn skipped_lines(&self) -> usize {
        match self {
            Facets::Ascii(facets) => facets.skipped_lines(),
            Facets::Binary(_) => 0,
        }
    }
}

impl Iterator for Facets<'_> {
    type Item = Facet;

    fn next(&mut self) -> Option<Facet> {
        match self {
            Facets::Ascii(facets) => facets.next(),
            Facets::Binary(facets) => facets.next(),
        }
    }
}

enum AsciiLine {
    Vertex(Vertex),
    Malformed,
    Other,
}

fn classify_line(line: &str) -> AsciiLine {
    let mut tokens = line.split_whitespace();
    match tokens.next() {
        Some(keyword) if keyword.eq_ignore_ascii_case("vertex") => {}
        _ => return AsciiLine::Other,
    }

    let mut coord = || tokens.next().and_then(|token| token.parse::<f64>().ok());
    match (coord(), coord(), coord()) {
        (Some(x), Some(y), Some(z)) => AsciiLine::Vertex(Point3::new(x, y, z)),
        _ => AsciiLine::Malformed,
    }
}

/// Facets rebuilt from consecutive `vertex` lines
pub struct AsciiFacets<'a> {
    lines: std::str::Split<'a, [char; 2]>,
    pending: Vec<Vertex>,
    skipped: usize,
}

impl<'a> AsciiFacets<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            lines: text.split(['\n', '\r']),
            pending: Vec::with_capacity(3),
            skipped: 0,
        }
    }

    pub fn pending(&self) -> &[Vertex] {
        &self.pending
    }

    pub fn skipped_lines(&self) -> usize {
        self.skipped
    }
}

impl Iterator for AsciiFacets<'_> {
    type Item = Facet;

    fn next(&mut self) -> Option<Facet> {
        for line in self.lines.by_ref() {
            match classify_line(line) {
                AsciiLine::Vertex(vertex) => {
                    self.pending.push(vertex);
                    if let [v1, v2, v3] = self.pending[..] {
                        self.pending.clear();
                        return Some(Facet::new(v1, v2, v3));
                    }
                }
                AsciiLine::Malformed => {
                    trace!(line = line.trim(), "skipping malformed vertex line");
                    self.skipped += 1;
                }
                AsciiLine::Other => {}
            }
        }
        None
    }
}

/// Facets read from fixed-size binary records
#[derive(Debug)]
pub struct BinaryFacets<'a> {
    records: Take<ChunksExact<'a, u8>>,
}

impl<'a> BinaryFacets<'a> {
    pub fn new(declared: u32, records: &'a [u8]) -> Self {
        let available = records.len() / FACET_RECORD_SIZE;
        let declared = usize::try_from(declared).unwrap_or(usize::MAX);
        if available < declared {
            warn!(declared, available, "binary STL truncated, dropping missing facets");
        }
        Self {
            records: records.chunks_exact(FACET_RECORD_SIZE).take(declared),
        }
    }
}

impl Iterator for BinaryFacets<'_> {
    type Item = Facet;

    fn next(&mut self) -> Option<Facet> {
        let record = self.records.next()?;
        // Skip normal (12 bytes), read 3 vertices (36 bytes)
        Some(Facet::new(
            read_vertex(&record[12..24]),
            read_vertex(&record[24..36]),
            read_vertex(&record[36..48]),
        ))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.records.size_hint()
    }
}

/// Read a vertex from 12 bytes (3 little-endian f32s)
fn read_vertex(buf: &[u8]) -> Vertex {
    let coord = |at: usize| {
        f64::from(f32::from_le_bytes([buf[at], buf[at + 1], buf[at + 2], buf[at + 3]]))
    };
    Point3::new(coord(0), coord(4), coord(8))
}
