use crate::core::CachectlWorld;
use crate::tracing::with_span_capture;
use anyhow::{Error, anyhow};
use cachectl_http::CacheControlExt;
use cucumber::when;
use http::Response;
use http::header::CACHE_CONTROL;

fn capture_parse(world: &mut CachectlWorld) {
    let (parsed, spans) = with_span_capture(|| cachectl::parse(&world.header));
    world.state.parsed = Some(parsed);
    world.spans = Some(spans);
}

#[when(expr = "the header is parsed")]
fn parse_header(world: &mut CachectlWorld) {
    capture_parse(world);
}

#[when(expr = "the header is explained")]
fn explain_header(world: &mut CachectlWorld) {
    world.state.explanation = Some(cachectl::explain_header(&world.header));
}

#[when(expr = "the header is generated")]
fn generate_header(world: &mut CachectlWorld) {
    world.state.generated = Some(cachectl::generate(&world.config));
}

#[when(expr = "the generated header is parsed")]
fn parse_generated(world: &mut CachectlWorld) -> Result<(), Error> {
    let generated = world
        .state
        .generated
        .clone()
        .ok_or_else(|| anyhow!("no header was generated"))?;
    world.header = generated;
    capture_parse(world);
    Ok(())
}

#[when(expr = "the config is applied to a response")]
fn apply_to_response(world: &mut CachectlWorld) -> Result<(), Error> {
    let mut response = Response::new(());
    response.set_cache_control(&world.config)?;
    let value = match response.headers().get(CACHE_CONTROL) {
        Some(value) => value.to_str()?.to_string(),
        None => String::new(),
    };
    world.state.generated = Some(value);
    Ok(())
}
