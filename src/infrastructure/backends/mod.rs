pub mod cerebras;
pub mod ollama;

use crate::domain::models::BackendBox;
use crate::domain::models::BackendName;

pub struct BackendManager {}

impl BackendManager {
    pub fn get(name: BackendName) -> BackendBox {
        match name {
            BackendName::Ollama => return Box::<ollama::Ollama>::default(),
            BackendName::Cerebras => return Box::<cerebras::Cerebras>::default(),
        }
    }
}
