use byteorder::{ByteOrder, LittleEndian};

use super::document::{Accessor, Document};
use crate::error::{FolioError, FolioResult};

// glTF componentType constants.
const BYTE: u32 = 5120;
const UNSIGNED_BYTE: u32 = 5121;
const SHORT: u32 = 5122;
const UNSIGNED_SHORT: u32 = 5123;
const UNSIGNED_INT: u32 = 5125;
const FLOAT: u32 = 5126;

/// Decodes accessor data out of the binary chunk, honoring byte strides.
pub struct AccessorReader<'a> {
    doc: &'a Document,
    bin: &'a [u8],
}

impl<'a> AccessorReader<'a> {
    pub fn new(doc: &'a Document, bin: &'a [u8]) -> Self {
        Self { doc, bin }
    }

    fn component_size(component_type: u32) -> FolioResult<usize> {
        match component_type {
            BYTE | UNSIGNED_BYTE => Ok(1),
            SHORT | UNSIGNED_SHORT => Ok(2),
            UNSIGNED_INT | FLOAT => Ok(4),
            other => Err(FolioError::model(format!(
                "unknown accessor component type {other}"
            ))),
        }
    }

    fn component_count(kind: &str) -> FolioResult<usize> {
        match kind {
            "SCALAR" => Ok(1),
            "VEC2" => Ok(2),
            "VEC3" => Ok(3),
            "VEC4" => Ok(4),
            "MAT4" => Ok(16),
            other => Err(FolioError::model(format!("unknown accessor type {other}"))),
        }
    }

    /// Raw bytes of element `index` of an accessor.
    fn element(&self, accessor: &Accessor, index: usize) -> FolioResult<&'a [u8]> {
        let view_index = accessor
            .buffer_view
            .ok_or_else(|| FolioError::model("accessor without buffer view"))?;
        let view = self
            .doc
            .buffer_views
            .get(view_index)
            .ok_or_else(|| FolioError::model(format!("buffer view {view_index} out of range")))?;
        let elem_size =
            Self::component_size(accessor.component_type)? * Self::component_count(&accessor.kind)?;
        let stride = view.byte_stride.unwrap_or(elem_size);
        let start = view.byte_offset + accessor.byte_offset + stride * index;
        let end = start + elem_size;
        if end > view.byte_offset + view.byte_length || end > self.bin.len() {
            return Err(FolioError::model("accessor element out of bounds"));
        }
        Ok(&self.bin[start..end])
    }

    fn accessor(&self, index: usize) -> FolioResult<&'a Accessor> {
        self.doc
            .accessors
            .get(index)
            .ok_or_else(|| FolioError::model(format!("accessor {index} out of range")))
    }

    pub fn read_vec3(&self, accessor_index: usize) -> FolioResult<Vec<[f32; 3]>> {
        let accessor = self.accessor(accessor_index)?;
        if accessor.component_type != FLOAT || accessor.kind != "VEC3" {
            return Err(FolioError::model("expected float VEC3 accessor"));
        }
        (0..accessor.count)
            .map(|i| {
                let bytes = self.element(accessor, i)?;
                Ok([
                    LittleEndian::read_f32(&bytes[0..4]),
                    LittleEndian::read_f32(&bytes[4..8]),
                    LittleEndian::read_f32(&bytes[8..12]),
                ])
            })
            .collect()
    }

    pub fn read_vec4(&self, accessor_index: usize) -> FolioResult<Vec<[f32; 4]>> {
        let accessor = self.accessor(accessor_index)?;
        if accessor.component_type != FLOAT || accessor.kind != "VEC4" {
            return Err(FolioError::model("expected float VEC4 accessor"));
        }
        (0..accessor.count)
            .map(|i| {
                let bytes = self.element(accessor, i)?;
                Ok([
                    LittleEndian::read_f32(&bytes[0..4]),
                    LittleEndian::read_f32(&bytes[4..8]),
                    LittleEndian::read_f32(&bytes[8..12]),
                    LittleEndian::read_f32(&bytes[12..16]),
                ])
            })
            .collect()
    }

    /// Texture coordinates; float plus the two normalized integer
    /// encodings the format allows.
    pub fn read_vec2(&self, accessor_index: usize) -> FolioResult<Vec<[f32; 2]>> {
        let accessor = self.accessor(accessor_index)?;
        if accessor.kind != "VEC2" {
            return Err(FolioError::model("expected VEC2 accessor"));
        }
        (0..accessor.count)
            .map(|i| {
                let bytes = self.element(accessor, i)?;
                match accessor.component_type {
                    FLOAT => Ok([
                        LittleEndian::read_f32(&bytes[0..4]),
                        LittleEndian::read_f32(&bytes[4..8]),
                    ]),
                    UNSIGNED_BYTE if accessor.normalized => {
                        Ok([bytes[0] as f32 / 255.0, bytes[1] as f32 / 255.0])
                    }
                    UNSIGNED_SHORT if accessor.normalized => Ok([
                        LittleEndian::read_u16(&bytes[0..2]) as f32 / 65535.0,
                        LittleEndian::read_u16(&bytes[2..4]) as f32 / 65535.0,
                    ]),
                    other => Err(FolioError::model(format!(
                        "unsupported uv component type {other}"
                    ))),
                }
            })
            .collect()
    }

    pub fn read_scalar_f32(&self, accessor_index: usize) -> FolioResult<Vec<f32>> {
        let accessor = self.accessor(accessor_index)?;
        if accessor.component_type != FLOAT || accessor.kind != "SCALAR" {
            return Err(FolioError::model("expected float SCALAR accessor"));
        }
        (0..accessor.count)
            .map(|i| Ok(LittleEndian::read_f32(self.element(accessor, i)?)))
            .collect()
    }

    pub fn read_indices(&self, accessor_index: usize) -> FolioResult<Vec<u32>> {
        let accessor = self.accessor(accessor_index)?;
        if accessor.kind != "SCALAR" {
            return Err(FolioError::model("index accessor must be SCALAR"));
        }
        (0..accessor.count)
            .map(|i| {
                let bytes = self.element(accessor, i)?;
                match accessor.component_type {
                    UNSIGNED_BYTE => Ok(bytes[0] as u32),
                    UNSIGNED_SHORT => Ok(LittleEndian::read_u16(bytes) as u32),
                    UNSIGNED_INT => Ok(LittleEndian::read_u32(bytes)),
                    other => Err(FolioError::model(format!(
                        "unsupported index component type {other}"
                    ))),
                }
            })
            .collect()
    }

    /// Bytes of a whole buffer view (embedded image payloads).
    pub fn view_bytes(&self, view_index: usize) -> FolioResult<&'a [u8]> {
        let view = self
            .doc
            .buffer_views
            .get(view_index)
            .ok_or_else(|| FolioError::model(format!("buffer view {view_index} out of range")))?;
        let end = view.byte_offset + view.byte_length;
        if end > self.bin.len() {
            return Err(FolioError::model("buffer view out of bounds"));
        }
        Ok(&self.bin[view.byte_offset..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gltf::Document;

    fn doc_with_bin(json: &str) -> Document {
        Document::from_json(json.as_bytes()).unwrap()
    }

    #[test]
    fn reads_tightly_packed_vec3() {
        let doc = doc_with_bin(
            r#"{
                "accessors": [{"bufferView": 0, "componentType": 5126, "count": 2, "type": "VEC3"}],
                "bufferViews": [{"buffer": 0, "byteOffset": 0, "byteLength": 24}]
            }"#,
        );
        let mut bin = Vec::new();
        for v in [1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0] {
            bin.extend_from_slice(&v.to_le_bytes());
        }
        let reader = AccessorReader::new(&doc, &bin);
        let out = reader.read_vec3(0).unwrap();
        assert_eq!(out, vec![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
    }

    #[test]
    fn honors_byte_stride() {
        let doc = doc_with_bin(
            r#"{
                "accessors": [{"bufferView": 0, "componentType": 5126, "count": 2, "type": "SCALAR"}],
                "bufferViews": [{"buffer": 0, "byteOffset": 0, "byteLength": 16, "byteStride": 8}]
            }"#,
        );
        let mut bin = Vec::new();
        for v in [1.0f32, 99.0, 2.0, 99.0] {
            bin.extend_from_slice(&v.to_le_bytes());
        }
        let reader = AccessorReader::new(&doc, &bin);
        assert_eq!(reader.read_scalar_f32(0).unwrap(), vec![1.0, 2.0]);
    }

    #[test]
    fn reads_u16_indices() {
        let doc = doc_with_bin(
            r#"{
                "accessors": [{"bufferView": 0, "componentType": 5123, "count": 3, "type": "SCALAR"}],
                "bufferViews": [{"buffer": 0, "byteOffset": 0, "byteLength": 6}]
            }"#,
        );
        let bin: Vec<u8> = [0u16, 1, 2].iter().flat_map(|v| v.to_le_bytes()).collect();
        let reader = AccessorReader::new(&doc, &bin);
        assert_eq!(reader.read_indices(0).unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn rejects_out_of_bounds_accessor() {
        let doc = doc_with_bin(
            r#"{
                "accessors": [{"bufferView": 0, "componentType": 5126, "count": 4, "type": "VEC3"}],
                "bufferViews": [{"buffer": 0, "byteOffset": 0, "byteLength": 24}]
            }"#,
        );
        let bin = vec![0u8; 24];
        let reader = AccessorReader::new(&doc, &bin);
        assert!(reader.read_vec3(0).is_err());
    }

    #[test]
    fn normalized_u8_uvs_scale_to_unit() {
        let doc = doc_with_bin(
            r#"{
                "accessors": [{"bufferView": 0, "componentType": 5121, "count": 1, "type": "VEC2", "normalized": true}],
                "bufferViews": [{"buffer": 0, "byteOffset": 0, "byteLength": 2}]
            }"#,
        );
        let bin = vec![255u8, 0u8];
        let reader = AccessorReader::new(&doc, &bin);
        assert_eq!(reader.read_vec2(0).unwrap(), vec![[1.0, 0.0]]);
    }
}
