use crate::fingerprint::demo_header::DemoFileHeader;
use crate::fingerprint::varint::read_varint32;
use crate::fingerprint::FingerprintError;

use chrono::{DateTime, Utc};
use crc::{Crc, CRC_64_XZ};
use prost::Message;
use std::fs::{File, Metadata};
use std::io::{self, BufReader, Read};
use std::path::Path;

/// Marker written in the first eight bytes of a Source 2 replay.
pub const DEMO_FILE_STAMP: &[u8; 8] = b"PBDEMS2\0";

/// Message tag of the file header record.
pub const FILE_HEADER_MESSAGE_TYPE: u32 = 1;

const RESERVED_BLOCK_LEN: usize = 8;

/// ECMA-182 polynomial, reflected, all-ones init and final xor.
const CRC64_ECMA: Crc<u64> = Crc::<u64>::new(&CRC_64_XZ);

/// Identity and basic metadata derived from a replay header.
///
/// # Fields
///
/// * `fingerprint` - Lower-case hex CRC-64 of the header fields and file size.
/// * `map_name` - The map recorded in the header, absent for the weak fallback.
/// * `server_name` - The sanitized server name, absent for the weak fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FingerprintInfo {
    pub fingerprint: String,
    pub map_name: Option<String>,
    pub server_name: Option<String>,
}

/// Computes the fingerprint of the replay at `path` from its header bytes.
///
/// Files that do not start with [`DEMO_FILE_STAMP`] get a weak fingerprint built
/// from the base name, size and modification time instead. That identity is not
/// content based: a renamed or touched copy gets a new one.
///
/// # Arguments
///
/// * `path` - The replay file to fingerprint.
///
/// # Returns
///
/// The `FingerprintInfo`, or a `FingerprintError` if the file cannot be read or
/// its header is malformed.
pub fn extract_fingerprint(path: &Path) -> Result<FingerprintInfo, FingerprintError> {
    let file = File::open(path)?;
    let metadata = file.metadata()?;
    let mut reader = BufReader::new(file);

    let stamp = read_stamp(&mut reader)?;
    if stamp.as_slice() != DEMO_FILE_STAMP {
        return weak_fingerprint(path, &metadata);
    }

    let header = read_file_header(&mut reader)?;
    let server_name = header.sanitized_server_name();

    let mut data = Vec::new();
    data.extend_from_slice(header.map_name());
    data.extend_from_slice(server_name.as_bytes());
    data.extend_from_slice(header.sanitized_client_name().as_bytes());
    data.extend_from_slice(header.network_protocol().to_string().as_bytes());
    data.extend_from_slice(header.build_num().to_string().as_bytes());
    data.extend_from_slice(header.demo_version_guid());
    data.extend_from_slice(header.demo_version_name());
    data.extend_from_slice(metadata.len().to_string().as_bytes());

    Ok(FingerprintInfo {
        fingerprint: checksum_hex(&data),
        map_name: Some(header.map_name_lossy()),
        server_name: Some(server_name),
    })
}

/// Hashes `data` with CRC-64/ECMA and renders it as unpadded lower-case hex.
pub fn checksum_hex(data: &[u8]) -> String {
    format!("{:x}", CRC64_ECMA.checksum(data))
}

/// Reads up to eight bytes of stamp. Only an empty file is an error; shorter
/// stamps simply fail to match.
fn read_stamp<R: Read>(reader: &mut R) -> Result<Vec<u8>, FingerprintError> {
    let mut stamp = Vec::with_capacity(DEMO_FILE_STAMP.len());
    reader
        .take(DEMO_FILE_STAMP.len() as u64)
        .read_to_end(&mut stamp)?;
    if stamp.is_empty() {
        return Err(io::Error::from(io::ErrorKind::UnexpectedEof).into());
    }
    Ok(stamp)
}

/// Skips the reserved block and decodes the file header record that follows.
fn read_file_header<R: Read>(reader: &mut R) -> Result<DemoFileHeader, FingerprintError> {
    let mut reserved = [0u8; RESERVED_BLOCK_LEN];
    reader.read_exact(&mut reserved)?;

    let message_type = read_varint32(reader)?;
    if message_type != FILE_HEADER_MESSAGE_TYPE {
        return Err(FingerprintError::UnexpectedMessageType(message_type));
    }
    let _tick = read_varint32(reader)?;
    let size = read_varint32(reader)?;

    let mut message = Vec::new();
    reader.take(u64::from(size)).read_to_end(&mut message)?;
    if message.len() != size as usize {
        return Err(io::Error::from(io::ErrorKind::UnexpectedEof).into());
    }

    Ok(DemoFileHeader::decode(message.as_slice())?)
}

fn weak_fingerprint(path: &Path, metadata: &Metadata) -> Result<FingerprintInfo, FingerprintError> {
    let base_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let modified: DateTime<Utc> = metadata.modified()?.into();
    let data = format!("{}{}{}", base_name, metadata.len(), modified.timestamp());

    Ok(FingerprintInfo {
        fingerprint: checksum_hex(data.as_bytes()),
        map_name: None,
        server_name: None,
    })
}
