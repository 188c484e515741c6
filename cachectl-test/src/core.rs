use cachectl::{CacheControl, GenerationConfig, ValidationErrors};
use cucumber::World;
use cucumber::gherkin::Step;

use crate::tracing::SpanCollector;

#[derive(Debug, Default)]
pub struct State {
    pub parsed: Option<Result<CacheControl, ValidationErrors>>,
    pub explanation: Option<String>,
    pub generated: Option<String>,
}

#[derive(Debug, Default, World)]
pub struct CachectlWorld {
    pub header: String,
    pub config: GenerationConfig,
    pub state: State,
    pub spans: Option<SpanCollector>,
}

impl CachectlWorld {
    pub fn parsed(&self) -> anyhow::Result<&Result<CacheControl, ValidationErrors>> {
        self.state
            .parsed
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("header was not parsed"))
    }
}

pub trait StepExt {
    fn docstring_content(&self) -> Option<String>;
}

impl StepExt for Step {
    fn docstring_content(&self) -> Option<String> {
        self.docstring()
            .map(|docstring| docstring.lines().skip(1).collect::<Vec<_>>().join("\n"))
    }
}
