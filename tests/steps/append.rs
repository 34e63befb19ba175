//! Append step definitions.

use std::sync::Arc;
use std::time::Duration;

use cucumber::{given, then, when, World};
use streamstore_client::{
    AppendOptions, AppendOutcome, CurrentRevision, EventData, InMemoryStreamExecutor,
    StreamRevision, StreamState, StreamsClient, TransportError,
};

/// Test context for append scenarios.
#[derive(Debug, World)]
#[world(init = Self::new)]
pub struct AppendWorld {
    executor: Arc<InMemoryStreamExecutor>,
    stream: String,
    outcome: Option<AppendOutcome>,
}

impl AppendWorld {
    fn new() -> Self {
        Self {
            executor: Arc::new(InMemoryStreamExecutor::new()),
            stream: String::new(),
            outcome: None,
        }
    }

    fn client(&self) -> StreamsClient {
        StreamsClient::new(self.executor.clone())
    }

    fn outcome(&self) -> &AppendOutcome {
        self.outcome.as_ref().expect("no append was performed")
    }

    async fn append(&mut self, count: usize, expectation: &str, options: AppendOptions) {
        let expected = parse_expectation(expectation);
        let outcome = self
            .client()
            .append_to_stream_with(&self.stream, expected, events(count), &options)
            .await
            .expect("append input is valid");
        self.outcome = Some(outcome);
    }
}

fn events(count: usize) -> Vec<EventData> {
    (0..count)
        .map(|i| EventData::binary("OrderLineAdded", vec![i as u8]))
        .collect()
}

fn revision(value: u64) -> StreamRevision {
    StreamRevision::new(value).expect("valid revision")
}

fn parse_expectation(text: &str) -> StreamState {
    match text {
        "any" => StreamState::Any,
        "no stream" => StreamState::NoStream,
        "the stream to exist" => StreamState::StreamExists,
        other => {
            let value = other
                .strip_prefix("revision ")
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or_else(|| panic!("unknown expectation: {other}"));
            StreamState::Revision(revision(value))
        }
    }
}

// --- Given steps ---

#[given(regex = r#"^a new stream "([^"]+)"$"#)]
async fn given_new_stream(world: &mut AppendWorld, stream: String) {
    world.stream = stream;
}

#[given(regex = r#"^a stream "([^"]+)" with (\d+) events?$"#)]
async fn given_stream_with_events(world: &mut AppendWorld, stream: String, count: usize) {
    world.stream = stream;
    if count > 0 {
        world.append(count, "any", AppendOptions::new()).await;
        assert!(world.outcome().is_success());
        world.outcome = None;
    }
}

#[given(regex = r"^the store takes (\d+) seconds to respond$")]
async fn given_store_latency(world: &mut AppendWorld, seconds: u64) {
    world.executor.set_latency(Duration::from_secs(seconds)).await;
}

#[given("the store connection is refused")]
async fn given_connection_refused(world: &mut AppendWorld) {
    world
        .executor
        .set_fail_next(TransportError::Connection("connection refused".to_string()))
        .await;
}

// --- When steps ---

#[when(regex = r"^I append (\d+) events? expecting (no stream|any|the stream to exist|revision \d+)$")]
async fn when_append(world: &mut AppendWorld, count: usize, expectation: String) {
    world.append(count, &expectation, AppendOptions::new()).await;
}

#[when(regex = r"^I append (\d+) events? expecting (no stream|any|the stream to exist|revision \d+) with a zero timeout$")]
async fn when_append_zero_timeout(world: &mut AppendWorld, count: usize, expectation: String) {
    let options = AppendOptions::new().timeout_after(Duration::ZERO);
    world.append(count, &expectation, options).await;
}

#[when(regex = r"^I append (\d+) events? expecting (no stream|any|the stream to exist|revision \d+) with a (\d+) millisecond timeout$")]
async fn when_append_with_timeout(
    world: &mut AppendWorld,
    count: usize,
    expectation: String,
    millis: u64,
) {
    let options = AppendOptions::new().timeout_after(Duration::from_millis(millis));
    world.append(count, &expectation, options).await;
}

// --- Then steps ---

#[then(regex = r"^the append succeeds at revision (\d+)$")]
async fn then_succeeds_at(world: &mut AppendWorld, value: u64) {
    match world.outcome() {
        AppendOutcome::Success {
            next_expected_version,
        } => assert_eq!(*next_expected_version, CurrentRevision::Current(revision(value))),
        other => panic!("expected Success, got {other:?}"),
    }
}

#[then(regex = r"^the append fails with wrong expected version, expected revision (\d+) and actual revision (\d+)$")]
async fn then_wrong_expected_version(world: &mut AppendWorld, expected: u64, actual: u64) {
    match world.outcome() {
        AppendOutcome::WrongExpectedVersion {
            expected: e,
            actual: a,
        } => {
            assert_eq!(*e, StreamState::Revision(revision(expected)));
            assert_eq!(*a, CurrentRevision::Current(revision(actual)));
        }
        other => panic!("expected WrongExpectedVersion, got {other:?}"),
    }
}

#[then("the append fails with wrong expected version and no actual stream")]
async fn then_wrong_expected_version_no_stream(world: &mut AppendWorld) {
    assert!(matches!(
        world.outcome(),
        AppendOutcome::WrongExpectedVersion {
            actual: CurrentRevision::NoStream,
            ..
        }
    ));
}

#[then("the append exceeds its deadline")]
async fn then_deadline_exceeded(world: &mut AppendWorld) {
    assert!(matches!(world.outcome(), AppendOutcome::DeadlineExceeded));
}

#[then(regex = r#"^the append fails with a transport failure mentioning "([^"]+)"$"#)]
async fn then_transport_failure(world: &mut AppendWorld, fragment: String) {
    match world.outcome() {
        AppendOutcome::TransportFailure(cause) => {
            assert!(cause.to_string().contains(&fragment), "cause was: {cause}")
        }
        other => panic!("expected TransportFailure, got {other:?}"),
    }
}

#[then(regex = r#"^the stream "([^"]+)" holds (\d+) events$"#)]
async fn then_stream_holds(world: &mut AppendWorld, stream: String, count: usize) {
    assert_eq!(world.executor.read_stream(&stream).await.len(), count);
}
