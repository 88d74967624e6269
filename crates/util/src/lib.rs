pub mod args;
pub mod path_processing;
pub mod text_processing;

pub use args::{ArgParseError, build_args, parse_key_value};
pub use path_processing::{DOWNLOAD_DIR_ENV, default_download_dir, expand_tilde};
pub use text_processing::{render_output, summarize_outcome, truncate_for_summary};
