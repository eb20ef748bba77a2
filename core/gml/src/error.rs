#[derive(Debug, thiserror::Error)]
pub enum GmlError {
    #[error(
        "module `{module}` contains {processes} process(es), which the GML writer does not support (run `proc` first)"
    )]
    UnsupportedConstruct { module: String, processes: usize },
    #[error("failed to write GML output: {0}")]
    Io(#[from] std::io::Error),
}
