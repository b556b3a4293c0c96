pub mod openai;
pub mod runner;
pub mod sse;

pub use openai::OpenAiRunner;
pub use runner::{AgentRunner, Fragment, FragmentStream, Role, RunnerError, Turn};
