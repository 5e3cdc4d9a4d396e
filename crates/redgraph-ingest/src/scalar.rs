// SPDX-License-Identifier: Apache-2.0

//! 0-d string arrays (`|S<n>` bytes, `<U<n>`/`>U<n>` UCS-4), the form scipy
//! uses for the `format` tag of a sparse bundle. `ndarray-npy` has no
//! element type for them.

use std::fs::File;
use std::io::{self, BufReader, Read, Seek, Write};
use std::path::Path;

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::error::DecodeError;

const MAGIC: &[u8] = b"\x93NUMPY";
const MEMBER_SUFFIX: &str = ".npy";
const MAX_MEMBER_BYTES: u64 = 64 * 1024;
const HEADER_ALIGN: usize = 64;

/// Reads the string scalar stored under `key` in the bundle at `path`.
pub fn read_string_scalar(path: &Path, key: &str) -> Result<String, DecodeError> {
    let file = File::open(path).map_err(|e| DecodeError::in_file(path, e))?;
    let mut zip = ZipArchive::new(BufReader::new(file))
        .map_err(|e| DecodeError::in_file(path, format!("not an npz bundle: {e}")))?;
    let member = format!("{key}{MEMBER_SUFFIX}");
    let entry = zip
        .by_name(&member)
        .map_err(|e| DecodeError::in_file(path, format!("missing array `{key}`: {e}")))?;
    let mut bytes = Vec::new();
    entry
        .take(MAX_MEMBER_BYTES)
        .read_to_end(&mut bytes)
        .map_err(|e| DecodeError::in_file(path, format!("array `{key}`: {e}")))?;
    decode_string_scalar(&bytes)
        .map_err(|e| DecodeError::in_file(path, format!("array `{key}`: {e}")))
}

/// Appends `key` as a `|S<n>` scalar to an existing bundle, the way
/// `scipy.sparse.save_npz` stores its format tag.
pub fn append_string_scalar<W: Read + Write + Seek>(
    bundle: W,
    key: &str,
    value: &str,
) -> io::Result<W> {
    let mut zip = ZipWriter::new_append(bundle).map_err(io::Error::other)?;
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
    zip.start_file(format!("{key}{MEMBER_SUFFIX}"), options)
        .map_err(io::Error::other)?;
    zip.write_all(&encode_byte_scalar(value))?;
    zip.finish().map_err(io::Error::other)
}

fn encode_byte_scalar(value: &str) -> Vec<u8> {
    let width = value.len().max(1);
    let mut header = format!("{{'descr': '|S{width}', 'fortran_order': False, 'shape': (), }}");
    let unpadded = MAGIC.len() + 4 + header.len() + 1;
    let padding = (HEADER_ALIGN - unpadded % HEADER_ALIGN) % HEADER_ALIGN;
    header.push_str(&" ".repeat(padding));
    header.push('\n');

    let mut out = Vec::with_capacity(MAGIC.len() + 4 + header.len() + width);
    out.extend_from_slice(MAGIC);
    out.extend_from_slice(&[1, 0]);
    // Header length fits u16: descr width is bounded by the tag length.
    out.extend_from_slice(&(header.len() as u16).to_le_bytes());
    out.extend_from_slice(header.as_bytes());
    out.extend_from_slice(value.as_bytes());
    out.resize(out.len() + (width - value.len()), 0);
    out
}

fn decode_string_scalar(bytes: &[u8]) -> Result<String, String> {
    let rest = bytes
        .strip_prefix(MAGIC)
        .ok_or_else(|| "missing npy magic".to_string())?;
    let (version, rest) = split(rest, 2)?;
    let (header_len, rest) = match version[0] {
        1 => {
            let (len, rest) = split(rest, 2)?;
            (usize::from(u16::from_le_bytes([len[0], len[1]])), rest)
        }
        2 | 3 => {
            let (len, rest) = split(rest, 4)?;
            let len = u32::from_le_bytes([len[0], len[1], len[2], len[3]]);
            (len as usize, rest)
        }
        major => return Err(format!("unsupported npy version {major}")),
    };
    let (header, payload) = split(rest, header_len)?;
    let header = std::str::from_utf8(header).map_err(|_| "npy header is not text".to_string())?;

    if !header_value(header, "shape").is_some_and(|v| v.starts_with("()")) {
        return Err("expected a 0-d array".to_string());
    }
    let descr = header_value(header, "descr")
        .and_then(quoted)
        .ok_or_else(|| "npy header has no descr".to_string())?;

    if let Some(width) = descr
        .strip_prefix("|S")
        .or_else(|| descr.strip_prefix('S'))
    {
        let width = parse_width(width)?;
        let (raw, _) = split(payload, width)?;
        let end = raw.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
        return String::from_utf8(raw[..end].to_vec())
            .map_err(|_| "byte string is not utf-8".to_string());
    }
    let (little, width) = if let Some(width) = descr.strip_prefix("<U") {
        (true, width)
    } else if let Some(width) = descr.strip_prefix(">U") {
        (false, width)
    } else {
        return Err(format!("expected a string scalar, found descr `{descr}`"));
    };
    let width = parse_width(width)?;
    let (raw, _) = split(payload, width * 4)?;
    let mut text = String::with_capacity(width);
    for unit in raw.chunks_exact(4) {
        let unit = [unit[0], unit[1], unit[2], unit[3]];
        let code = if little {
            u32::from_le_bytes(unit)
        } else {
            u32::from_be_bytes(unit)
        };
        if code == 0 {
            break;
        }
        let c = char::from_u32(code).ok_or_else(|| format!("invalid code point {code}"))?;
        text.push(c);
    }
    Ok(text)
}

fn split(bytes: &[u8], at: usize) -> Result<(&[u8], &[u8]), String> {
    if bytes.len() < at {
        return Err("truncated npy member".to_string());
    }
    Ok(bytes.split_at(at))
}

/// Text following `'key':` in the header dict.
fn header_value<'a>(header: &'a str, key: &str) -> Option<&'a str> {
    let needle = format!("'{key}':");
    let at = header.find(&needle)?;
    Some(header[at + needle.len()..].trim_start())
}

fn quoted(value: &str) -> Option<&str> {
    let quote = value.chars().next().filter(|c| *c == '\'' || *c == '"')?;
    let body = &value[1..];
    body.find(quote).map(|end| &body[..end])
}

fn parse_width(digits: &str) -> Result<usize, String> {
    digits
        .parse::<usize>()
        .ok()
        .filter(|&w| w > 0 && w <= MAX_MEMBER_BYTES as usize)
        .ok_or_else(|| format!("invalid string width `{digits}`"))
}
