mod entry;
mod store;

pub use entry::{KidsroomEntry, KidsroomPatch};
pub use store::KidsroomStore;
