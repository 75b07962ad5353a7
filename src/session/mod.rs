//! Session collaborator surface.
//!
//! The engine never talks to a network or a UI directly. A session plugs in
//! through `SessionHooks`, tracks the lobby with `Presence`, and guards its
//! own input with `MoveGate`.

mod gate;
mod hooks;
mod presence;

pub use gate::{MoveGate, MoveTicket};
pub use hooks::{NoopHooks, SessionHooks};
pub(crate) use hooks::HookRelay;
pub use presence::Presence;
