#[derive(Debug, thiserror::Error)]
pub enum FormError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("no section at index {0}")]
    SectionNotFound(usize),
    #[error("invalid backend URL: {0}")]
    InvalidBackendUrl(String),
    #[error("failed to read draft file: {0}")]
    FileRead(std::io::Error),
    #[error("failed to serialize request: {0}")]
    Serialization(serde_json::Error),
    #[error("failed to deserialize request: {0}")]
    Deserialization(serde_json::Error),
    #[error("failed to deserialize YAML draft: {0}")]
    YamlDeserialization(serde_yaml::Error),

    #[error("failed to build HTTP client: {0}")]
    HttpClient(reqwest::Error),
    #[error("failed to reach backend at {url}: {source}")]
    BackendUnreachable {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("backend returned HTTP {status}: {body}")]
    BackendStatus { status: u16, body: String },
    #[error("backend response is not valid JSON: {0}")]
    InvalidResponse(serde_json::Error),
    #[error("failed to read backend response: {0}")]
    ResponseRead(reqwest::Error),

    #[error("failed to save export: {0}")]
    Export(#[from] nlp2fhir_files::FilesError),
}

pub type FormResult<T> = std::result::Result<T, FormError>;
