//! Semantic representation of a binvox file - a voxel grid with its placement and encoded occupancy.
//!
//! Decoding is permissive about header arity by default, encoding is strict. Both can be
//! overridden with a [`HeaderCheck`].

use std::{fs::File, io::{BufRead, BufReader, BufWriter, Read, Write}, path::Path};
use crate::{rle::RleData, syntax::{self, Header}};
use anyhow::{Context, Result};
use log::{debug, trace};
use thiserror::Error;

const AXES: usize = 3;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Encoded data must be byte-valued, element {index} is not")]
    NotByteValued { index: usize },
    #[error("Dimension along axis {axis} must be at least 1")]
    ZeroDimension { axis: usize },
    #[error("Expected {AXES} {field} values, found {found}")]
    WrongArity { field: &'static str, found: usize },
}

/// How closely the header fields are checked against the three-axis shape of a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderCheck {
    /// Any number of dimensions and translate values, including zero-sized axes.
    Permissive,
    /// Exactly three dimensions, none zero, and exactly three translate values.
    Strict
}

impl HeaderCheck {
    fn check(self, header: &Header) -> Result<()> {
        if self == HeaderCheck::Permissive { return Ok(()) }
        if header.dimensions.len() != AXES {
            return Err(ValidationError::WrongArity { field: "dimension", found: header.dimensions.len() }.into())
        }
        if let Some(axis) = header.dimensions.iter().position(|&dim| dim == 0) {
            return Err(ValidationError::ZeroDimension { axis }.into())
        }
        if header.translate.len() != AXES {
            return Err(ValidationError::WrongArity { field: "translate", found: header.translate.len() }.into())
        }
        Ok(())
    }
}

/// A decoded binvox file. The occupancy stays run-length encoded.
#[derive(Debug, Clone, PartialEq)]
pub struct Binvox {
    header: Header,
    data: RleData
}

impl Binvox {
    pub fn new<D: Into<RleData>>(dimensions: [u32; 3], translate: [f64; 3], scale: f64, data: D) -> Result<Self> {
        let header = Header {
            dimensions: dimensions.to_vec(),
            translate: translate.to_vec(),
            scale
        };
        HeaderCheck::Strict.check(&header)?;
        Ok(Binvox { header, data: data.into() })
    }

    /// A grid at the origin with unit scale.
    pub fn with_dimensions<D: Into<RleData>>(dimensions: [u32; 3], data: D) -> Result<Self> {
        Self::new(dimensions, [0.0; 3], 1.0, data)
    }

    /// Pairs a header with a payload without checking either.
    pub fn from_parts(header: Header, data: RleData) -> Self {
        Binvox { header, data }
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn dimensions(&self) -> &[u32] {
        &self.header.dimensions
    }

    pub fn translate(&self) -> &[f64] {
        &self.header.translate
    }

    pub fn scale(&self) -> f64 {
        self.header.scale
    }

    pub fn data(&self) -> &RleData {
        &self.data
    }

    pub fn into_parts(self) -> (Header, RleData) {
        (self.header, self.data)
    }

    /// Number of grid cells the payload should describe, `None` if that overflows.
    pub fn voxel_count(&self) -> Option<u64> {
        self.header.dimensions.iter().try_fold(1u64, |count, &dim| count.checked_mul(u64::from(dim)))
    }

    pub fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        encode(writer, self)
    }
}

pub fn decode<R: BufRead>(reader: &mut R) -> Result<Binvox> {
    decode_with(reader, HeaderCheck::Permissive)
}

pub fn decode_with<R: BufRead>(reader: &mut R, check: HeaderCheck) -> Result<Binvox> {
    let header = syntax::parse_header(reader)?;
    check.check(&header)?;
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    trace!("Read {} payload bytes", bytes.len());
    Ok(Binvox::from_parts(header, RleData::new(bytes)))
}

pub fn encode<W: Write>(writer: &mut W, binvox: &Binvox) -> Result<()> {
    encode_with(writer, binvox, HeaderCheck::Strict)
}

/// Writes the header lines followed by the payload. The writer is not flushed.
pub fn encode_with<W: Write>(writer: &mut W, binvox: &Binvox, check: HeaderCheck) -> Result<()> {
    check.check(&binvox.header)?;
    writer.write_all(&binvox.header.bytes())?;
    writer.write_all(binvox.data.as_bytes())?;
    debug!("Wrote binvox grid {:?} with {} payload bytes", binvox.header.dimensions, binvox.data.len());
    Ok(())
}

pub fn parse_bytes(bytes: &[u8]) -> Result<Binvox> {
    decode(&mut &bytes[..])
}

pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Binvox> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("Could not open {}", path.display()))?;
    decode(&mut BufReader::new(file))
}

pub fn write_file<P: AsRef<Path>>(path: P, binvox: &Binvox) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).with_context(|| format!("Could not create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    binvox.write(&mut writer)?;
    writer.flush()?;
    Ok(())
}
