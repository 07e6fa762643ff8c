mod state;

pub use state::{App, InputMode, Mode};
