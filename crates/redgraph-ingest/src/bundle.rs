// SPDX-License-Identifier: Apache-2.0

//! Typed reads from `.npz` bundles. Arrays are decoded by `ndarray-npy`;
//! this layer adds dtype widening and path-qualified errors.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use ndarray::{ArrayD, IxDyn, OwnedRepr};
use ndarray_npy::{NpzReader, ReadNpyError, ReadNpzError, ReadableElement};

use crate::error::DecodeError;

pub struct NpzBundle {
    path: PathBuf,
    names: Vec<String>,
    npz: NpzReader<BufReader<File>>,
}

impl NpzBundle {
    pub fn open(path: &Path) -> Result<Self, DecodeError> {
        let file = File::open(path).map_err(|e| DecodeError::in_file(path, e))?;
        let mut npz = NpzReader::new(BufReader::new(file))
            .map_err(|e| DecodeError::in_file(path, format!("not an npz bundle: {e}")))?;
        let names = npz
            .names()
            .map_err(|e| DecodeError::in_file(path, format!("not an npz bundle: {e}")))?;
        Ok(Self {
            path: path.to_path_buf(),
            names,
            npz,
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Array keys in archive order, without the `.npy` suffix.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.names.iter().any(|name| name == key)
    }

    /// Reads `key` if it is stored with element type `T`; `Ok(None)` when the
    /// array exists under another dtype.
    pub fn try_read<T: ReadableElement>(
        &mut self,
        key: &str,
    ) -> Result<Option<ArrayD<T>>, DecodeError> {
        if !self.contains(key) {
            return Err(self.error(format!("missing array `{key}`")));
        }
        match self.npz.by_name::<OwnedRepr<T>, IxDyn>(key) {
            Ok(array) => Ok(Some(array)),
            Err(ReadNpzError::Npy(ReadNpyError::WrongDescriptor(_))) => Ok(None),
            Err(e) => Err(self.error(format!("array `{key}`: {e}"))),
        }
    }

    /// Floating array of any rank, narrowed to float32.
    pub fn read_f32(&mut self, key: &str) -> Result<ArrayD<f32>, DecodeError> {
        if let Some(array) = self.try_read::<f32>(key)? {
            return Ok(array);
        }
        if let Some(array) = self.try_read::<f64>(key)? {
            return Ok(array.mapv(|v| v as f32));
        }
        Err(self.error(format!("array `{key}` must be float32 or float64")))
    }

    /// Integer array of any width and signedness, widened to int64.
    pub fn read_i64(&mut self, key: &str) -> Result<ArrayD<i64>, DecodeError> {
        if let Some(array) = self.try_read::<i64>(key)? {
            return Ok(array);
        }
        if let Some(array) = self.try_read::<i32>(key)? {
            return Ok(array.mapv(i64::from));
        }
        if let Some(array) = self.try_read::<u32>(key)? {
            return Ok(array.mapv(i64::from));
        }
        if let Some(array) = self.try_read::<i16>(key)? {
            return Ok(array.mapv(i64::from));
        }
        if let Some(array) = self.try_read::<u16>(key)? {
            return Ok(array.mapv(i64::from));
        }
        if let Some(array) = self.try_read::<i8>(key)? {
            return Ok(array.mapv(i64::from));
        }
        if let Some(array) = self.try_read::<u8>(key)? {
            return Ok(array.mapv(i64::from));
        }
        if let Some(array) = self.try_read::<u64>(key)? {
            if let Some(v) = array.iter().find(|&&v| i64::try_from(v).is_err()) {
                return Err(self.error(format!("array `{key}`: value {v} overflows int64")));
            }
            return Ok(array.mapv(|v| v as i64));
        }
        Err(self.error(format!("array `{key}` must be an integer array")))
    }

    pub(crate) fn error(&self, message: impl std::fmt::Display) -> DecodeError {
        DecodeError::in_file(&self.path, message)
    }
}
