pub mod metrics;
pub mod prompt;
pub mod providers;
pub mod reader;
pub mod selector;

pub use metrics::{get_metrics, init_metrics};
pub use providers::mock::MockTextGenerator;
pub use providers::ollama::{OllamaClient, OllamaConfig};
pub use providers::{GenerationError, TextGenerator};
pub use reader::TarotReader;
