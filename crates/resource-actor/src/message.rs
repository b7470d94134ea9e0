use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use tokio::sync::oneshot;

/// One-shot channel an actor answers on.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Requests understood by every [`ResourceActor`](crate::ResourceActor).
///
/// CRUD, plus `List` for reloading views, `Clear` for the bulk wipe of a resource, and
/// `Action` for whatever does not fit CRUD (stock changes).
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    List {
        respond_to: Response<Vec<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    /// Removes every entity; answers with the number removed. Skips `on_delete`.
    Clear {
        respond_to: Response<usize>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
}

impl<T: ActorEntity> ResourceRequest<T> {
    /// Short name of the request, used in logs and mock diagnostics.
    pub fn kind(&self) -> &'static str {
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
