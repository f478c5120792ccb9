//! Generation backend adapters.

mod mock_client;
mod openai_client;

pub use mock_client::MockGenerator;
pub use openai_client::{OpenAiClient, OpenAiClientConfig};
