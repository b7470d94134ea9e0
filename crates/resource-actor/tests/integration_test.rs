use async_trait::async_trait;
use resource_actor::{ActorEntity, FrameworkError, ResourceActor};

// --- Test resource: a shelf bin with a capacity ---

#[derive(Clone, Debug, PartialEq)]
struct Bin {
    id: u32,
    label: String,
    capacity: u32,
    filled: u32,
}

#[derive(Debug)]
struct BinCreate {
    label: String,
    capacity: u32,
}

#[derive(Debug)]
struct BinUpdate {
    label: Option<String>,
    capacity: Option<u32>,
}

#[derive(Debug)]
enum BinAction {
    Fill(u32),
}

#[derive(Debug, thiserror::Error)]
enum BinError {
    #[error("capacity must be positive")]
    ZeroCapacity,
    #[error("bin overflow: {filled} of {capacity}")]
    Overflow { filled: u32, capacity: u32 },
}

#[async_trait]
impl ActorEntity for Bin {
    type Id = u32;
    type Create = BinCreate;
    type Update = BinUpdate;
    type Action = BinAction;
    type ActionResult = u32;
    type Context = ();
    type Error = BinError;

    fn from_create_params(id: u32, params: BinCreate) -> Result<Self, Self::Error> {
        if params.capacity == 0 {
            return Err(BinError::ZeroCapacity);
        }
        Ok(Self {
            id,
            label: params.label,
            capacity: params.capacity,
            filled: 0,
        })
    }

    async fn on_update(&mut self, update: BinUpdate, _ctx: &()) -> Result<(), Self::Error> {
        if let Some(label) = update.label {
            self.label = label;
        }
        if let Some(capacity) = update.capacity {
            self.capacity = capacity;
        }
        if self.filled > self.capacity {
            return Err(BinError::Overflow {
                filled: self.filled,
                capacity: self.capacity,
            });
        }
        Ok(())
    }

    async fn handle_action(&mut self, action: BinAction, _ctx: &()) -> Result<u32, Self::Error> {
        match action {
            BinAction::Fill(n) => {
                if self.filled + n > self.capacity {
                    return Err(BinError::Overflow {
                        filled: self.filled + n,
                        capacity: self.capacity,
                    });
                }
                self.filled += n;
                Ok(self.filled)
            }
        }
    }
}

fn bin(label: &str, capacity: u32) -> BinCreate {
    BinCreate {
        label: label.to_string(),
        capacity,
    }
}

#[tokio::test]
async fn test_store_full_lifecycle() {
    let (actor, client) = ResourceActor::<Bin>::new(10);
    let handle = tokio::spawn(actor.run(()));

    let a = client.create(bin("A1", 10)).await.unwrap();
    let b = client.create(bin("B1", 5)).await.unwrap();
    assert_eq!((a, b), (1, 2));

    assert_eq!(client.perform_action(a, BinAction::Fill(4)).await.unwrap(), 4);

    let listed = client.list().await.unwrap();
    assert_eq!(listed.iter().map(|b| b.id).collect::<Vec<_>>(), vec![1, 2]);

    let updated = client
        .update(
            b,
            BinUpdate {
                label: Some("B2".into()),
                capacity: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.label, "B2");

    client.delete(a).await.unwrap();
    assert!(client.get(a).await.unwrap().is_none());
    assert!(matches!(
        client.delete(a).await,
        Err(FrameworkError::NotFound(_))
    ));

    drop(client);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_rejected_update_leaves_entity_untouched() {
    let (actor, client) = ResourceActor::<Bin>::new(10);
    tokio::spawn(actor.run(()));

    let id = client.create(bin("C1", 10)).await.unwrap();
    client.perform_action(id, BinAction::Fill(8)).await.unwrap();

    let result = client
        .update(
            id,
            BinUpdate {
                label: Some("shrunk".into()),
                capacity: Some(3),
            },
        )
        .await;
    assert!(matches!(result, Err(FrameworkError::EntityError(_))));

    let stored = client.get(id).await.unwrap().unwrap();
    assert_eq!(stored.label, "C1");
    assert_eq!(stored.capacity, 10);
}

#[tokio::test]
async fn test_clear_keeps_id_counter() {
    let (actor, client) = ResourceActor::<Bin>::new(10);
    tokio::spawn(actor.run(()));

    client.create(bin("D1", 1)).await.unwrap();
    client.create(bin("D2", 1)).await.unwrap();
    assert!(client.create(bin("broken", 0)).await.is_err());

    assert_eq!(client.clear().await.unwrap(), 2);
    assert!(client.list().await.unwrap().is_empty());

    // Ids 1..=3 were handed out (the rejected create consumed 3).
    assert_eq!(client.create(bin("D3", 1)).await.unwrap(), 4);
}
