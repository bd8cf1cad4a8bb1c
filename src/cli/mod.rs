pub mod commands;
pub mod render_commands;
pub mod table_commands;

pub use commands::{Cli, Commands};
pub use render_commands::RenderCommandHandler;
pub use table_commands::TableCommandHandler;
