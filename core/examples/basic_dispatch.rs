// dispatch/examples/basic_dispatch.rs

use async_trait::async_trait;
use dispatch::{DispatchError, Dispatcher, Request, RequestHandler};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{error, info};

// --- Requests ---
struct AddNoteCommand {
  text: String,
}

impl Request for AddNoteCommand {
  type Response = usize; // index of the stored note
}

struct GetNoteQuery {
  index: usize,
}

impl Request for GetNoteQuery {
  type Response = Option<String>;
}

struct UnknownQuery;

impl Request for UnknownQuery {
  type Response = ();
}

// --- Custom Error Type for this example ---
#[derive(Debug, thiserror::Error)]
enum NotesError {
  #[error("Note text cannot be empty")]
  EmptyNote,
  #[error("Dispatch error: {0}")]
  Dispatch(#[from] DispatchError),
}

// --- Handlers sharing an injected store ---
type NoteStore = Arc<Mutex<Vec<String>>>;

struct AddNoteHandler {
  store: NoteStore,
}

#[async_trait]
impl RequestHandler<AddNoteCommand, NotesError> for AddNoteHandler {
  async fn handle(&self, request: AddNoteCommand) -> Result<usize, NotesError> {
    if request.text.trim().is_empty() {
      return Err(NotesError::EmptyNote);
    }
    let mut notes = self.store.lock();
    notes.push(request.text);
    Ok(notes.len() - 1)
  }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();
  info!("--- Basic Dispatch Example ---");

  let store: NoteStore = Arc::new(Mutex::new(Vec::new()));
  let dispatcher = Dispatcher::<NotesError>::new();

  dispatcher.register::<AddNoteCommand, _>(AddNoteHandler { store: store.clone() })?;
  let read_store = store.clone();
  dispatcher.register_fn(move |query: GetNoteQuery| {
    let store = read_store.clone();
    async move { Ok::<_, NotesError>(store.lock().get(query.index).cloned()) }
  })?;

  let idx = dispatcher
    .send(AddNoteCommand {
      text: "buy milk".to_string(),
    })
    .await?;
  info!("Stored note at index {}", idx);

  let note = dispatcher.send(GetNoteQuery { index: idx }).await?;
  info!("Fetched note: {:?}", note);

  match dispatcher.send(AddNoteCommand { text: "  ".to_string() }).await {
    Ok(_) => error!("Empty note should have been rejected"),
    Err(e) => info!("Rejected as expected: {}", e),
  }

  match dispatcher.send(UnknownQuery).await {
    Ok(_) => error!("UnknownQuery has no handler and should fail"),
    Err(e) => info!("Unregistered request failed as expected: {}", e),
  }

  Ok(())
}
