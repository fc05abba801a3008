use byteorder::{LittleEndian, ReadBytesExt};
use std::io::{Cursor, Read};

use crate::error::{FolioError, FolioResult};

const GLB_MAGIC: u32 = 0x4654_6C67; // "glTF"
const CHUNK_JSON: u32 = 0x4E4F_534A; // "JSON"
const CHUNK_BIN: u32 = 0x004E_4942; // "BIN\0"

/// A parsed `.glb` container: the JSON document chunk and the optional
/// binary buffer chunk.
pub struct GlbFile {
    pub json: Vec<u8>,
    pub bin: Option<Vec<u8>>,
}

impl GlbFile {
    pub fn parse(data: &[u8]) -> FolioResult<Self> {
        let mut cursor = Cursor::new(data);

        let magic = cursor.read_u32::<LittleEndian>()?;
        if magic != GLB_MAGIC {
            return Err(FolioError::asset(format!(
                "not a glb file (magic {magic:#010x})"
            )));
        }
        let version = cursor.read_u32::<LittleEndian>()?;
        if version != 2 {
            return Err(FolioError::asset(format!(
                "unsupported glb version {version}"
            )));
        }
        let declared_len = cursor.read_u32::<LittleEndian>()? as usize;
        if declared_len > data.len() {
            return Err(FolioError::asset(format!(
                "glb declares {declared_len} bytes but only {} are present",
                data.len()
            )));
        }

        let mut json = None;
        let mut bin = None;
        while (cursor.position() as usize) + 8 <= declared_len {
            let chunk_len = cursor.read_u32::<LittleEndian>()? as usize;
            let chunk_type = cursor.read_u32::<LittleEndian>()?;
            if (cursor.position() as usize) + chunk_len > declared_len {
                return Err(FolioError::asset("glb chunk overruns the file"));
            }
            let mut payload = vec![0u8; chunk_len];
            cursor.read_exact(&mut payload)?;
            match chunk_type {
                CHUNK_JSON if json.is_none() => json = Some(payload),
                CHUNK_BIN if bin.is_none() => bin = Some(payload),
                // Unknown chunk types must be skipped, not rejected.
                _ => {}
            }
        }

        let json = json.ok_or_else(|| FolioError::asset("glb has no JSON chunk"))?;
        Ok(Self { json, bin })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glb_bytes(chunks: &[(u32, &[u8])]) -> Vec<u8> {
        let mut out = Vec::new();
        let total: usize = 12 + chunks.iter().map(|(_, d)| 8 + d.len()).sum::<usize>();
        out.extend_from_slice(&GLB_MAGIC.to_le_bytes());
        out.extend_from_slice(&2u32.to_le_bytes());
        out.extend_from_slice(&(total as u32).to_le_bytes());
        for (ty, data) in chunks {
            out.extend_from_slice(&(data.len() as u32).to_le_bytes());
            out.extend_from_slice(&ty.to_le_bytes());
            out.extend_from_slice(data);
        }
        out
    }

    #[test]
    fn parses_json_and_bin_chunks() {
        let bytes = glb_bytes(&[(CHUNK_JSON, b"{}"), (CHUNK_BIN, &[1, 2, 3, 4])]);
        let glb = GlbFile::parse(&bytes).unwrap();
        assert_eq!(glb.json, b"{}");
        assert_eq!(glb.bin.as_deref(), Some(&[1, 2, 3, 4][..]));
    }

    #[test]
    fn bin_chunk_is_optional() {
        let bytes = glb_bytes(&[(CHUNK_JSON, b"{}")]);
        let glb = GlbFile::parse(&bytes).unwrap();
        assert!(glb.bin.is_none());
    }

    #[test]
    fn unknown_chunks_are_skipped() {
        let bytes = glb_bytes(&[(0xDEAD_BEEF, &[9, 9]), (CHUNK_JSON, b"{}")]);
        let glb = GlbFile::parse(&bytes).unwrap();
        assert_eq!(glb.json, b"{}");
    }

    #[test]
    fn rejects_bad_magic() {
        let mut bytes = glb_bytes(&[(CHUNK_JSON, b"{}")]);
        bytes[0] = 0;
        assert!(GlbFile::parse(&bytes).is_err());
    }

    #[test]
    fn rejects_wrong_version() {
        let mut bytes = glb_bytes(&[(CHUNK_JSON, b"{}")]);
        bytes[4] = 1;
        assert!(GlbFile::parse(&bytes).is_err());
    }

    #[test]
    fn rejects_truncated_chunk() {
        let mut bytes = glb_bytes(&[(CHUNK_JSON, b"{}")]);
        // Inflate the chunk length beyond the file.
        bytes[12] = 0xFF;
        assert!(GlbFile::parse(&bytes).is_err());
    }

    #[test]
    fn rejects_missing_json() {
        let bytes = glb_bytes(&[(CHUNK_BIN, &[0u8; 4])]);
        assert!(GlbFile::parse(&bytes).is_err());
    }
}
