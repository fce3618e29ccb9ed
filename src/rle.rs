//! Run-length encoded occupancy payload.
//!
//! The payload is a sequence of `(value, count)` byte pairs covering the flattened grid.
//! Nothing here expands or checks the pairs; the bytes are kept exactly as read.
use std::{convert::TryInto, result::Result as StdResult};

use anyhow::Result;
use crate::semantic::ValidationError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct RleData(Vec<u8>);

impl RleData {
    pub fn new(bytes: Vec<u8>) -> Self {
        RleData(bytes)
    }

    /// Builds a payload from wider values, failing on the first one that is not an unsigned byte.
    pub fn from_values<I, T>(values: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: TryInto<u8>
    {
        let bytes = values.into_iter()
            .enumerate()
            .map(|(index, value)| value.try_into().map_err(|_| ValidationError::NotByteValued { index }))
            .collect::<StdResult<Vec<u8>, _>>()?;
        Ok(RleData(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The `(value, count)` pairs. A trailing unpaired byte is skipped.
    pub fn runs(&self) -> impl Iterator<Item = (u8, u8)> + '_ {
        self.0.chunks_exact(2).map(|pair| (pair[0], pair[1]))
    }
}

impl From<Vec<u8>> for RleData {
    fn from(bytes: Vec<u8>) -> Self {
        RleData(bytes)
    }
}

impl From<&[u8]> for RleData {
    fn from(bytes: &[u8]) -> Self {
        RleData(bytes.to_vec())
    }
}

impl AsRef<[u8]> for RleData {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}
