//! CLI Commands

pub mod check;
pub mod import;
pub mod init;
pub mod lint;
pub mod list;
pub mod render;
pub mod show;

pub use self::check::CheckCommand;
pub use self::import::ImportCommand;
pub use self::init::InitCommand;
pub use self::lint::LintCommand;
pub use self::list::ListCommand;
pub use self::render::RenderCommand;
pub use self::show::ShowCommand;
