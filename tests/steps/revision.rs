//! Stream revision step definitions.

use cucumber::{given, then, when, World};
use streamstore_client::{PositionError, StreamPosition, StreamRevision};

/// Test context for revision arithmetic scenarios.
#[derive(Debug, Default, World)]
pub struct RevisionWorld {
    revision: Option<StreamRevision>,
    result: Option<Result<StreamRevision, PositionError>>,
}

impl RevisionWorld {
    fn revision(&self) -> StreamRevision {
        self.revision.expect("no revision in context")
    }

    fn result(&self) -> &Result<StreamRevision, PositionError> {
        self.result.as_ref().expect("no operation was performed")
    }
}

// --- Given steps ---

#[given(regex = r"^revision (\d+)$")]
async fn given_revision(world: &mut RevisionWorld, value: u64) {
    world.revision = Some(StreamRevision::new(value).expect("valid revision"));
}

// --- When steps ---

#[when("I take the next revision")]
async fn when_next(world: &mut RevisionWorld) {
    world.result = Some(world.revision().next());
}

#[when(regex = r"^I add (\d+)$")]
async fn when_add(world: &mut RevisionWorld, delta: u64) {
    world.result = Some(world.revision().add(delta));
}

#[when(regex = r"^I subtract (\d+)$")]
async fn when_subtract(world: &mut RevisionWorld, delta: u64) {
    world.result = Some(world.revision().subtract(delta));
}

#[when(regex = r"^I construct revision (\d+)$")]
async fn when_construct(world: &mut RevisionWorld, value: u64) {
    world.result = Some(StreamRevision::new(value));
}

#[when("I convert the end of stream to a revision")]
async fn when_convert_end(world: &mut RevisionWorld) {
    world.result = Some(StreamRevision::from_stream_position(StreamPosition::End));
}

#[when("I convert the start of stream to a revision")]
async fn when_convert_start(world: &mut RevisionWorld) {
    world.result = Some(StreamRevision::from_stream_position(StreamPosition::START));
}

// --- Then steps ---

#[then(regex = r"^the result is revision (\d+)$")]
async fn then_result_is(world: &mut RevisionWorld, value: u64) {
    assert_eq!(world.result().as_ref().ok().map(|r| r.to_u64()), Some(value));
}

#[then("the operation fails with overflow")]
async fn then_overflow(world: &mut RevisionWorld) {
    assert!(matches!(world.result(), Err(PositionError::Overflow { .. })));
}

#[then("the operation fails with underflow")]
async fn then_underflow(world: &mut RevisionWorld) {
    assert!(matches!(world.result(), Err(PositionError::Underflow { .. })));
}

#[then(regex = r#"^the operation fails as out of range for "(\w+)"$"#)]
async fn then_out_of_range(world: &mut RevisionWorld, param: String) {
    match world.result() {
        Err(err @ PositionError::OutOfRange { .. }) => assert_eq!(err.param(), Some(param.as_str())),
        other => panic!("expected OutOfRange, got {other:?}"),
    }
}
