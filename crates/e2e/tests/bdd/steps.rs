//! Login step definitions
//!
//! Each keyword forwards its step text to `LoginStep::bind`, which owns the
//! phrase table. Text that matches no login step under that keyword fails
//! the step with `E2eError::UnboundStep`.

use cucumber::{given, then, when};

use wdu_e2e::{E2eResult, StepKind};

use crate::world::LoginWorld;

#[given(regex = r"^(.+)$")]
async fn given_login_step(world: &mut LoginWorld, text: String) -> E2eResult<()> {
    world.run_text(StepKind::Given, &text).await
}

#[when(regex = r"^(.+)$")]
async fn when_login_step(world: &mut LoginWorld, text: String) -> E2eResult<()> {
    world.run_text(StepKind::When, &text).await
}

#[then(regex = r"^(.+)$")]
async fn then_login_step(world: &mut LoginWorld, text: String) -> E2eResult<()> {
    world.run_text(StepKind::Then, &text).await
}
