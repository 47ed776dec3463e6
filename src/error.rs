use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Io Error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Json Error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error(
        "Invalid court geometry: expected 4 corners per zone, got court={court} service_box={service_box} baseline={baseline}"
    )]
    InvalidGeometry {
        court: usize,
        service_box: usize,
        baseline: usize,
    },
}
