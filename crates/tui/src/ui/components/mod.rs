//! UI components: plugin list, command selector, form, output, files.

pub mod command_list;
pub mod common;
pub mod component;
pub mod files;
pub mod form;
pub mod hint_bar;
pub mod output;
pub mod plugin_list;

pub use command_list::CommandListComponent;
pub use component::*;
pub use files::{FilesComponent, UploadComponent};
pub use form::FormComponent;
pub use hint_bar::HintBarComponent;
pub use output::OutputComponent;
pub use plugin_list::PluginListComponent;
