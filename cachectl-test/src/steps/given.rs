use crate::core::{CachectlWorld, StepExt};
use anyhow::{Error, anyhow};
use cachectl_configuration::{Preset, from_yaml};
use cucumber::gherkin::Step;
use cucumber::given;

#[given(expr = "the header {string}")]
fn header(world: &mut CachectlWorld, value: String) {
    world.header = value;
}

#[given(expr = "an empty header")]
fn empty_header(world: &mut CachectlWorld) {
    world.header.clear();
}

#[given(expr = "generation config")]
fn generation_config(world: &mut CachectlWorld, step: &Step) -> Result<(), Error> {
    let yaml = step
        .docstring_content()
        .ok_or_else(|| anyhow!("generation config not provided"))?;
    world.config = from_yaml(&yaml)?;
    Ok(())
}

#[given(expr = "the preset {string}")]
fn preset(world: &mut CachectlWorld, name: String) -> Result<(), Error> {
    world.config = name.parse::<Preset>()?.config();
    Ok(())
}
