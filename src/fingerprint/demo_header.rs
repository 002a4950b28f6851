/// The file header record written at the start of every Source 2 replay.
///
/// Only the fields that feed the fingerprint are declared; the decoder skips
/// the rest. Text fields are kept as raw bytes because recorders are known to
/// write them with broken UTF-8. The derive generates the getters
/// (`map_name()`, `server_name()`, `build_num()`, ...), which return defaults
/// for absent fields.
#[derive(Clone, PartialEq, prost::Message)]
pub struct DemoFileHeader {
    #[prost(int32, optional, tag = "2")]
    pub network_protocol: Option<i32>,
    #[prost(bytes = "vec", optional, tag = "3")]
    pub server_name: Option<Vec<u8>>,
    #[prost(bytes = "vec", optional, tag = "4")]
    pub client_name: Option<Vec<u8>>,
    #[prost(bytes = "vec", optional, tag = "5")]
    pub map_name: Option<Vec<u8>>,
    #[prost(bytes = "vec", optional, tag = "11")]
    pub demo_version_name: Option<Vec<u8>>,
    #[prost(bytes = "vec", optional, tag = "12")]
    pub demo_version_guid: Option<Vec<u8>>,
    #[prost(int32, optional, tag = "13")]
    pub build_num: Option<i32>,
}

impl DemoFileHeader {
    pub fn sanitized_server_name(&self) -> String {
        strip_invalid_utf8(self.server_name())
    }

    pub fn sanitized_client_name(&self) -> String {
        strip_invalid_utf8(self.client_name())
    }

    /// Map name for display, with malformed bytes replaced.
    pub fn map_name_lossy(&self) -> String {
        String::from_utf8_lossy(self.map_name()).into_owned()
    }
}

/// Decodes `bytes` as UTF-8, dropping every malformed sequence and keeping the
/// valid text around it.
pub fn strip_invalid_utf8(bytes: &[u8]) -> String {
    bytes.utf8_chunks().map(|chunk| chunk.valid()).collect()
}
