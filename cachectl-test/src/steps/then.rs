use crate::core::{CachectlWorld, StepExt};
use anyhow::{Error, anyhow, bail};
use cachectl::DirectiveKind;
use cucumber::gherkin::Step;
use cucumber::then;

#[then(expr = "the header is valid")]
fn header_is_valid(world: &mut CachectlWorld) -> Result<(), Error> {
    match world.parsed()? {
        Ok(_) => Ok(()),
        Err(errors) => Err(anyhow!("expected a valid header, got: {errors}")),
    }
}

#[then(expr = "the header is invalid with {int} error(s)")]
fn header_is_invalid(world: &mut CachectlWorld, count: usize) -> Result<(), Error> {
    match world.parsed()? {
        Ok(parsed) => Err(anyhow!("expected an invalid header, got: {parsed}")),
        Err(errors) if errors.len() == count => Ok(()),
        Err(errors) => Err(anyhow!(
            "expected {count} errors, got {}: {errors}",
            errors.len()
        )),
    }
}

#[then(expr = "the error {string} is reported")]
fn error_reported(world: &mut CachectlWorld, message: String) -> Result<(), Error> {
    match world.parsed()? {
        Err(errors) if errors.messages().contains(&message) => Ok(()),
        Err(errors) => Err(anyhow!("error {message:?} not in {:?}", errors.messages())),
        Ok(_) => Err(anyhow!("header is valid, no errors reported")),
    }
}

fn expect_directives(world: &CachectlWorld, expected: &str) -> Result<(), Error> {
    let parsed = world
        .parsed()?
        .as_ref()
        .map_err(|errors| anyhow!("header is invalid: {errors}"))?;
    let actual = parsed.to_string();
    if actual == expected {
        Ok(())
    } else {
        Err(anyhow!("directives {actual:?} do not match {expected:?}"))
    }
}

#[then(expr = "the directives are {string}")]
fn directives_are(world: &mut CachectlWorld, expected: String) -> Result<(), Error> {
    expect_directives(world, &expected)
}

#[then(expr = "there are no directives")]
fn no_directives(world: &mut CachectlWorld) -> Result<(), Error> {
    expect_directives(world, "")
}

#[then(expr = "directive {string} has {int} seconds")]
fn directive_seconds(world: &mut CachectlWorld, name: String, seconds: i64) -> Result<(), Error> {
    let kind: DirectiveKind = name.parse()?;
    let parsed = world
        .parsed()?
        .as_ref()
        .map_err(|errors| anyhow!("header is invalid: {errors}"))?;
    match parsed.seconds(kind) {
        Some(actual) if actual == seconds => Ok(()),
        actual => Err(anyhow!("{name} carries {actual:?}, expected {seconds}")),
    }
}

#[then(expr = "the explanation is")]
fn explanation_is(world: &mut CachectlWorld, step: &Step) -> Result<(), Error> {
    let expected = step
        .docstring_content()
        .ok_or_else(|| anyhow!("expected explanation not provided"))?;
    let actual = world
        .state
        .explanation
        .as_deref()
        .ok_or_else(|| anyhow!("header was not explained"))?;
    pretty_assertions::assert_eq!(actual, expected.as_str());
    Ok(())
}

#[then(expr = "the summary is {string}")]
fn summary_is(world: &mut CachectlWorld, expected: String) -> Result<(), Error> {
    let explanation = world
        .state
        .explanation
        .as_deref()
        .ok_or_else(|| anyhow!("header was not explained"))?;
    let Some((_, summary)) = explanation.split_once("Summary: ") else {
        bail!("explanation has no summary: {explanation:?}");
    };
    if summary == expected {
        Ok(())
    } else {
        Err(anyhow!("summary {summary:?} does not match {expected:?}"))
    }
}

#[then(expr = "there is no summary")]
fn no_summary(world: &mut CachectlWorld) -> Result<(), Error> {
    match world.state.explanation.as_deref() {
        Some(text) if text.contains("Summary: ") => Err(anyhow!("unexpected summary in {text:?}")),
        Some(_) => Ok(()),
        None => Err(anyhow!("header was not explained")),
    }
}

#[then(expr = "the generated header is {string}")]
fn generated_is(world: &mut CachectlWorld, expected: String) -> Result<(), Error> {
    match world.state.generated.as_deref() {
        Some(actual) if actual == expected => Ok(()),
        Some(actual) => Err(anyhow!("generated {actual:?}, expected {expected:?}")),
        None => Err(anyhow!("no header was generated")),
    }
}

#[then(expr = "the parsed directives match the generation config")]
fn parsed_matches_config(world: &mut CachectlWorld) -> Result<(), Error> {
    let parsed = world
        .parsed()?
        .as_ref()
        .map_err(|errors| anyhow!("generated header is invalid: {errors}"))?;
    if parsed.directives() == world.config.tokens().as_slice() {
        Ok(())
    } else {
        Err(anyhow!("parsed {parsed} differs from generation config"))
    }
}

#[then(expr = "span {string} recorded {string} as {string}")]
fn span_field(
    world: &mut CachectlWorld,
    span: String,
    field: String,
    expected: String,
) -> Result<(), Error> {
    let spans = world
        .spans
        .as_ref()
        .ok_or_else(|| anyhow!("no spans were captured"))?;
    match spans.get_field(&span, &field) {
        Some(actual) if actual == expected => Ok(()),
        actual => Err(anyhow!(
            "span {span} field {field} is {actual:?}, expected {expected:?}; captured {:?}",
            spans.span_names()
        )),
    }
}
