//! Syntaxical representation of a binvox header - five text lines ahead of the payload.
//!
//! Only the magic prefix is checked; the version token and the `data` line are taken on trust.
use std::{io::BufRead, str::{self, FromStr}};

use anyhow::Result;
use log::debug;
use nom::{IResult, bytes::complete::{tag, take_till}, character::complete::char, combinator::{all_consuming, map_opt}, error::VerboseError, multi::many0, sequence::preceded};
use thiserror::Error;

pub const MAGIC_PREFIX: &str = "#binvox";
pub const VERSION: u32 = 1;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormatError {
    #[error("Missing or invalid magic header")]
    MissingMagic,
    #[error("Malformed dimension line {line:?}")]
    MalformedDimensions { line: String },
    #[error("Malformed translate line {line:?}")]
    MalformedTranslate { line: String },
    #[error("Malformed scale line {line:?}")]
    MalformedScale { line: String },
}

type Parsed<'a, T> = IResult<&'a [u8], T, VerboseError<&'a [u8]>>;

fn is_space(c: u8) -> bool {
    c == b' '
}

fn number<'a, T: FromStr>(i: &'a [u8]) -> Parsed<'a, T> {
    map_opt(take_till(is_space), |token: &[u8]| {
        str::from_utf8(token).ok()?.parse().ok()
    })(i)
}

/// `<keyword> <n> <n> ...` where every token after the keyword must be a number.
fn field_list<'a, T: FromStr>(i: &'a [u8]) -> Parsed<'a, Vec<T>> {
    all_consuming(preceded(
        take_till(is_space),
        many0(preceded(char(' '), number::<T>))
    ))(i)
}

/// `<keyword> <n> ...`; anything after the second token is ignored.
fn second_field<'a, T: FromStr>(i: &'a [u8]) -> Parsed<'a, T> {
    preceded(take_till(is_space), preceded(char(' '), number::<T>))(i)
}

fn magic(i: &[u8]) -> Parsed<'_, &[u8]> {
    tag(MAGIC_PREFIX)(i)
}

/// Reads one line, stripped of surrounding whitespace. Empty at end of input.
fn read_line<R: BufRead>(reader: &mut R) -> Result<Vec<u8>> {
    let mut line = Vec::new();
    reader.read_until(b'\n', &mut line)?;
    Ok(line.trim_ascii().to_vec())
}

fn lossy(line: &[u8]) -> String {
    String::from_utf8_lossy(line).into_owned()
}

/// Grid size and placement, as found ahead of the voxel payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    pub dimensions: Vec<u32>,
    pub translate: Vec<f64>,
    pub scale: f64
}

impl Header {
    /// Consumes the five header lines, leaving the reader at the first payload byte.
    pub fn parse<R: BufRead>(reader: &mut R) -> Result<Self> {
        if magic(&read_line(reader)?).is_err() {
            return Err(FormatError::MissingMagic.into())
        }
        let line = read_line(reader)?;
        let (_, dimensions) = field_list::<u32>(&line)
            .map_err(|_| FormatError::MalformedDimensions { line: lossy(&line) })?;
        let line = read_line(reader)?;
        let (_, translate) = field_list::<f64>(&line)
            .map_err(|_| FormatError::MalformedTranslate { line: lossy(&line) })?;
        let line = read_line(reader)?;
        let (_, scale) = second_field::<f64>(&line)
            .map_err(|_| FormatError::MalformedScale { line: lossy(&line) })?;
        // "data"
        read_line(reader)?;
        debug!("Parsed binvox header: dim {:?}, translate {:?}, scale {}", dimensions, translate, scale);
        Ok(Header { dimensions, translate, scale })
    }

    pub fn bytes(&self) -> Vec<u8> {
        let mut text = format!("{} {}\n", MAGIC_PREFIX, VERSION);
        text.push_str(&format!("dim {}\n", join(&self.dimensions)));
        text.push_str(&format!("translate {}\n", join(&self.translate)));
        text.push_str(&format!("scale {}\n", self.scale));
        text.push_str("data\n");
        text.into_bytes()
    }
}

fn join<T: ToString>(values: &[T]) -> String {
    values.iter().map(ToString::to_string).collect::<Vec<_>>().join(" ")
}

pub fn parse_header<R: BufRead>(reader: &mut R) -> Result<Header> {
    Header::parse(reader)
}
