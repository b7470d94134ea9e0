//! # Scripted resources for tests
//!
//! [`MockClient<T>`] hands out a real [`ResourceClient<T>`] whose requests are answered
//! from a queue of expectations instead of a store. Code under test cannot tell the
//! difference, which makes it the easy way to make the *n*-th remote call fail.
//!
//! | | MockClient | ResourceActor |
//! |---|---|---|
//! | State | none, answers are scripted | real store |
//! | Error injection | `return_err` | needs a state that triggers it |
//! | Use | logic *around* clients (coordinators) | the resource itself, full flows |
//!
//! Expectations are consumed in order. A request of the wrong kind, or for another id,
//! is not answered (the caller sees [`FrameworkError::ActorDropped`]) and is reported by
//! [`MockClient::verify`], together with expectations that were never consumed.
//!
//! ```rust
//! use resource_actor::mock::MockClient;
//! use resource_actor::{ActorEntity, FrameworkError};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)] struct Tag { id: u32 }
//! #[derive(Debug)] struct TagCreate;
//! #[derive(Debug)] struct TagUpdate;
//! #[derive(Debug)] enum TagAction {}
//! #[derive(Debug, thiserror::Error)] #[error("tag error")] struct TagError;
//!
//! #[async_trait]
//! impl ActorEntity for Tag {
//!     type Id = u32; type Create = TagCreate; type Update = TagUpdate;
//!     type Action = TagAction; type ActionResult = (); type Context = (); type Error = TagError;
//!     fn from_create_params(id: u32, _: TagCreate) -> Result<Self, Self::Error> { Ok(Self { id }) }
//!     async fn on_update(&mut self, _: TagUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
//!     async fn handle_action(&mut self, _: TagAction, _: &()) -> Result<(), Self::Error> { Ok(()) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Tag>::new();
//!     mock.expect_create().return_ok(1);
//!     mock.expect_create().return_err(FrameworkError::rejected("disk full"));
//!
//!     let client = mock.client();
//!     assert_eq!(client.create(TagCreate).await.unwrap(), 1);
//!     assert!(client.create(TagCreate).await.is_err());
//!     mock.verify();
//! }
//! ```

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::{mpsc, oneshot};

enum Expectation<T: ActorEntity> {
    Create {
        response: Result<T::Id, FrameworkError>,
    },
    Get {
        id: T::Id,
        response: Result<Option<T>, FrameworkError>,
    },
    List {
        response: Result<Vec<T>, FrameworkError>,
    },
    Update {
        id: T::Id,
        response: Result<T, FrameworkError>,
    },
    Delete {
        id: T::Id,
        response: Result<(), FrameworkError>,
    },
    Clear {
        response: Result<usize, FrameworkError>,
    },
    Action {
        id: T::Id,
        response: Result<T::ActionResult, FrameworkError>,
    },
}

impl<T: ActorEntity> Expectation<T> {
    fn kind(&self) -> &'static str {
        match self {
            Self::Create { .. } => "create",
            Self::Get { .. } => "get",
            Self::List { .. } => "list",
            Self::Update { .. } => "update",
            Self::Delete { .. } => "delete",
            Self::Clear { .. } => "clear",
            Self::Action { .. } => "action",
        }
    }
}

struct Script<T: ActorEntity> {
    expectations: VecDeque<Expectation<T>>,
    mismatches: Vec<String>,
    received: usize,
}

type Shared<T> = Arc<Mutex<Script<T>>>;

// A panicking test thread may poison the lock; the script is still readable.
fn lock<T: ActorEntity>(script: &Shared<T>) -> MutexGuard<'_, Script<T>> {
    script.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn answer<R>(respond_to: oneshot::Sender<Result<R, FrameworkError>>, response: Result<R, FrameworkError>) {
    let _ = respond_to.send(response);
}

fn check_id<I: PartialEq + std::fmt::Display>(
    mismatches: &mut Vec<String>,
    kind: &str,
    expected: &I,
    actual: &I,
) -> bool {
    if expected == actual {
        true
    } else {
        mismatches.push(format!("{kind}: expected id {expected}, got {actual}"));
        false
    }
}

/// Scripted stand-in for a resource store.
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    script: Shared<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a mock with an empty script. Must be called inside a tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let script: Shared<T> = Arc::new(Mutex::new(Script {
            expectations: VecDeque::new(),
            mismatches: Vec::new(),
            received: 0,
        }));
        let task_script = script.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let mut guard = lock(&task_script);
                guard.received += 1;
                let expectation = guard.expectations.pop_front();
                let script = &mut *guard;

                match (request, expectation) {
                    (ResourceRequest::Create { respond_to, .. }, Some(Expectation::Create { response })) => {
                        answer(respond_to, response);
                    }
                    (ResourceRequest::Get { id, respond_to }, Some(Expectation::Get { id: want, response })) => {
                        if check_id(&mut script.mismatches, "get", &want, &id) {
                            answer(respond_to, response);
                        }
                    }
                    (ResourceRequest::List { respond_to }, Some(Expectation::List { response })) => {
                        answer(respond_to, response);
                    }
                    (ResourceRequest::Update { id, respond_to, .. }, Some(Expectation::Update { id: want, response })) => {
                        if check_id(&mut script.mismatches, "update", &want, &id) {
                            answer(respond_to, response);
                        }
                    }
                    (ResourceRequest::Delete { id, respond_to }, Some(Expectation::Delete { id: want, response })) => {
                        if check_id(&mut script.mismatches, "delete", &want, &id) {
                            answer(respond_to, response);
                        }
                    }
                    (ResourceRequest::Clear { respond_to }, Some(Expectation::Clear { response })) => {
                        answer(respond_to, response);
                    }
                    (ResourceRequest::Action { id, respond_to, .. }, Some(Expectation::Action { id: want, response })) => {
                        if check_id(&mut script.mismatches, "action", &want, &id) {
                            answer(respond_to, response);
                        }
                    }
                    (request, Some(expectation)) => {
                        script.mismatches.push(format!(
                            "expected {} request, got {}",
                            expectation.kind(),
                            request.kind()
                        ));
                    }
                    (request, None) => {
                        script
                            .mismatches
                            .push(format!("unexpected {} request", request.kind()));
                    }
                }
            }
        });

        Self {
            client: ResourceClient::new(sender),
            script,
            _handle: handle,
        }
    }

    /// A client wired to this script.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    /// Number of requests received so far, matched or not.
    pub fn received(&self) -> usize {
        lock(&self.script).received
    }

    fn push(&self, expectation: Expectation<T>) {
        lock(&self.script).expectations.push_back(expectation);
    }

    pub fn expect_create(&mut self) -> Expect<'_, T, T::Id> {
        Expect::new(self, |response| Expectation::Create { response })
    }

    pub fn expect_get(&mut self, id: T::Id) -> Expect<'_, T, Option<T>> {
        Expect::new(self, move |response| Expectation::Get { id, response })
    }

    pub fn expect_list(&mut self) -> Expect<'_, T, Vec<T>> {
        Expect::new(self, |response| Expectation::List { response })
    }

    pub fn expect_update(&mut self, id: T::Id) -> Expect<'_, T, T> {
        Expect::new(self, move |response| Expectation::Update { id, response })
    }

    pub fn expect_delete(&mut self, id: T::Id) -> Expect<'_, T, ()> {
        Expect::new(self, move |response| Expectation::Delete { id, response })
    }

    pub fn expect_clear(&mut self) -> Expect<'_, T, usize> {
        Expect::new(self, |response| Expectation::Clear { response })
    }

    pub fn expect_action(&mut self, id: T::Id) -> Expect<'_, T, T::ActionResult> {
        Expect::new(self, move |response| Expectation::Action { id, response })
    }

    /// Panics if a request did not match the script or an expectation is left over.
    pub fn verify(&self) {
        let script = lock(&self.script);
        if !script.mismatches.is_empty() {
            panic!("Mock received unexpected requests: {:?}", script.mismatches);
        }
        if !script.expectations.is_empty() {
            panic!(
                "Not all expectations were met. {} remaining",
                script.expectations.len()
            );
        }
    }
}

/// Pending expectation; finish it with `return_ok` or `return_err`.
pub struct Expect<'a, T: ActorEntity, R> {
    mock: &'a MockClient<T>,
    build: Box<dyn FnOnce(Result<R, FrameworkError>) -> Expectation<T> + Send + 'a>,
}

impl<'a, T: ActorEntity, R> Expect<'a, T, R> {
    fn new(
        mock: &'a MockClient<T>,
        build: impl FnOnce(Result<R, FrameworkError>) -> Expectation<T> + Send + 'a,
    ) -> Self {
        Self {
            mock,
            build: Box::new(build),
        }
    }

    pub fn return_ok(self, value: R) {
        self.mock.push((self.build)(Ok(value)));
    }

    pub fn return_err(self, error: FrameworkError) {
        self.mock.push((self.build)(Err(error)));
    }
}

/// Mock client plus the raw request receiver, for tests that answer requests by hand
/// and inspect their payloads.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Next request if it is a Create.
pub async fn expect_create<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Create, oneshot::Sender<Result<T::Id, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Next request if it is an Update.
pub async fn expect_update<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T::Update, oneshot::Sender<Result<T, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Update {
            id,
            update,
            respond_to,
        }) => Some((id, update, respond_to)),
        _ => None,
    }
}

/// Next request if it is an Action.
pub async fn expect_action<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(
    T::Id,
    T::Action,
    oneshot::Sender<Result<T::ActionResult, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action {
            id,
            action,
            respond_to,
        }) => Some((id, action, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    #[derive(Clone, Debug, PartialEq)]
    struct Supplier {
        id: u32,
        name: String,
    }

    #[derive(Debug)]
    struct SupplierCreate {
        name: String,
    }

    #[derive(Debug)]
    struct SupplierUpdate;

    #[derive(Debug)]
    enum SupplierAction {}

    #[derive(Debug, thiserror::Error)]
    #[error("supplier error")]
    struct SupplierError;

    #[async_trait]
    impl ActorEntity for Supplier {
        type Id = u32;
        type Create = SupplierCreate;
        type Update = SupplierUpdate;
        type Action = SupplierAction;
        type ActionResult = ();
        type Context = ();
        type Error = SupplierError;

        fn from_create_params(id: u32, params: SupplierCreate) -> Result<Self, Self::Error> {
            Ok(Self {
                id,
                name: params.name,
            })
        }

        async fn on_update(&mut self, _: SupplierUpdate, _: &()) -> Result<(), Self::Error> {
            Ok(())
        }

        async fn handle_action(&mut self, action: SupplierAction, _: &()) -> Result<(), Self::Error> {
            match action {}
        }
    }

    fn supplier(id: u32, name: &str) -> Supplier {
        Supplier {
            id,
            name: name.to_string(),
        }
    }

    #[tokio::test]
    async fn test_raw_receiver_sees_payload() {
        let (client, mut receiver) = create_mock_client::<Supplier>(10);

        let create_task = tokio::spawn(async move {
            client
                .create(SupplierCreate {
                    name: "Ryans".to_string(),
                })
                .await
        });

        let (payload, responder) = expect_create(&mut receiver)
            .await
            .expect("Expected Create request");
        assert_eq!(payload.name, "Ryans");
        responder.send(Ok(7)).unwrap();

        assert!(matches!(create_task.await.unwrap(), Ok(7)));
    }

    #[tokio::test]
    async fn test_scripted_answers_in_order() {
        let mut mock = MockClient::<Supplier>::new();
        mock.expect_create().return_ok(1);
        mock.expect_list().return_ok(vec![supplier(1, "Ryans")]);
        mock.expect_delete(1)
            .return_err(FrameworkError::rejected("in use"));

        let client = mock.client();
        let id = client
            .create(SupplierCreate {
                name: "Ryans".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(id, 1);
        assert_eq!(client.list().await.unwrap(), vec![supplier(1, "Ryans")]);
        let err = client.delete(1).await.unwrap_err();
        assert!(err.to_string().contains("in use"));

        assert_eq!(mock.received(), 3);
        mock.verify();
    }

    #[tokio::test]
    async fn test_wrong_id_is_not_answered() {
        let mut mock = MockClient::<Supplier>::new();
        mock.expect_get(1).return_ok(Some(supplier(1, "Ryans")));

        let result = mock.client().get(2).await;
        assert!(matches!(result, Err(FrameworkError::ActorDropped)));

        let verdict = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| mock.verify()));
        assert!(verdict.is_err());
    }

    #[tokio::test]
    #[should_panic(expected = "remaining")]
    async fn test_unused_expectation_fails_verify() {
        let mut mock = MockClient::<Supplier>::new();
        mock.expect_clear().return_ok(0);
        mock.verify();
    }
}
