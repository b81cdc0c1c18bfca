//! Then steps for dependency graph BDD scenarios.

use super::world::DependencyWorld;
use rstest_bdd_macros::then;

#[then(r#"the closure lists "{titles}""#)]
fn closure_lists(world: &DependencyWorld, titles: String) -> Result<(), eyre::Report> {
    let closure = world
        .last_closure
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing closure result"))?;
    let expected: Vec<&str> = titles.split(", ").collect();
    let actual = world.titles_of(closure);
    if actual != expected {
        return Err(eyre::eyre!("expected closure {expected:?}, found {actual:?}"));
    }
    Ok(())
}

#[then("the request is rejected")]
fn request_rejected(world: &DependencyWorld) -> Result<(), eyre::Report> {
    match world.last_request_accepted {
        Some(false) => Ok(()),
        other => Err(eyre::eyre!("expected a rejected request, got {other:?}")),
    }
}

#[then("the request is accepted")]
fn request_accepted(world: &DependencyWorld) -> Result<(), eyre::Report> {
    match world.last_request_accepted {
        Some(true) => Ok(()),
        other => Err(eyre::eyre!("expected an accepted request, got {other:?}")),
    }
}

#[then(r#""{task}" has no dependencies"#)]
fn has_no_dependencies(world: &DependencyWorld, task: String) -> Result<(), eyre::Report> {
    let stored = world.task(&task)?;
    if !stored.dependencies().is_empty() {
        return Err(eyre::eyre!(
            "expected {task} to have no dependencies, found {:?}",
            world.titles_of(stored.dependencies())
        ));
    }
    Ok(())
}

#[then(r#""{task}" depends only on "{dependency}""#)]
fn depends_only_on(
    world: &DependencyWorld,
    task: String,
    dependency: String,
) -> Result<(), eyre::Report> {
    let stored = world.task(&task)?;
    let actual = world.titles_of(stored.dependencies());
    if actual != [dependency.as_str()] {
        return Err(eyre::eyre!("expected {task} -> [{dependency}], found {actual:?}"));
    }
    Ok(())
}
